//! Fishbone (Ishikawa) layout.
//!
//! Main ribs sit at fixed steps along a spine running away from the head,
//! alternating above and below it. Sub-ribs continue diagonally from their
//! rib, spacing shrinking by `decay` per level, until a subtree switches to
//! another family and is handed back to the dispatcher.

use crate::engine::LayoutContext;
use crate::resolve::place_children;
use crate::tree::Side;
use mm_core::{Direction, Family, NodeIndex, Point};

pub(crate) fn place(ctx: &mut LayoutContext<'_>, idx: NodeIndex, direction: Direction) {
    let hint = ctx
        .topic(idx)
        .direction_hint
        .filter(|d| matches!(d, Direction::Left | Direction::Right));
    // Head on the right means the spine runs left.
    let xdir = match hint.unwrap_or(direction) {
        Direction::Right => -1.0,
        _ => 1.0,
    };

    let head = ctx.bounds(idx);
    let center = head.center();
    let step = ctx.config.fishbone.spine_step;
    let offset = ctx.config.fishbone.rib_offset;

    for (i, rib) in ctx.tree.children(idx).into_iter().enumerate() {
        let (vdir, side) = if i % 2 == 0 {
            (-1.0, Side::Above)
        } else {
            (1.0, Side::Below)
        };
        let cx = center.x + xdir * (head.width / 2.0 + (i + 1) as f32 * step);
        ctx.put(rib, Point::new(cx, center.y + vdir * offset), Some(side));
        sub_ribs(ctx, rib, xdir, vdir, 0);
    }
}

/// Spacing between a bone and its sub-ribs `depth` levels below the main
/// ribs.
pub fn sub_rib_spacing(sub_spacing: f32, decay: f32, depth: u32) -> f32 {
    sub_spacing * decay.powi(depth as i32)
}

fn sub_ribs(ctx: &mut LayoutContext<'_>, bone: NodeIndex, xdir: f32, vdir: f32, depth: u32) {
    let children = ctx.tree.children(bone);
    if children.is_empty() {
        return;
    }
    if ctx.tree.node(bone).structure.family() != Family::Fishbone {
        let side = if xdir < 0.0 { Side::Left } else { Side::Right };
        place_children(ctx, bone, side);
        return;
    }

    let fb = &ctx.config.fishbone;
    let spacing = sub_rib_spacing(fb.sub_spacing, fb.decay, depth);
    let side = if vdir < 0.0 { Side::Above } else { Side::Below };
    let origin = ctx.center(bone);

    for (j, sub) in children.into_iter().enumerate() {
        let d = spacing * (j + 1) as f32;
        ctx.put(sub, Point::new(origin.x + xdir * d, origin.y + vdir * d), Some(side));
        sub_ribs(ctx, sub, xdir, vdir, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layout;
    use mm_core::{LayoutConfig, Structure, TopicId, parse_outline};
    use pretty_assertions::assert_eq;

    fn center(tree: &crate::LayoutTree, id: &str) -> Point {
        tree.get_by_id(TopicId::intern(id)).unwrap().center()
    }

    #[test]
    fn spacing_decays_per_level() {
        assert_eq!(sub_rib_spacing(60.0, 0.75, 0), 60.0);
        assert_eq!(sub_rib_spacing(60.0, 0.75, 1), 45.0);
        assert_eq!(sub_rib_spacing(60.0, 0.75, 2), 33.75);
    }

    #[test]
    fn three_level_chain_decays() {
        let map = parse_outline(
            r#"
topic @fc_head { structure: fishbone
  topic @fc_rib {
    topic @fc_s1 {
      topic @fc_s2 {
        topic @fc_s3
      }
    }
  }
}
"#,
        )
        .unwrap();
        let tree = layout(&map, None, &LayoutConfig::default()).unwrap();

        let rib = center(&tree, "fc_rib");
        assert_eq!(rib, Point::new(80.0 + 140.0, -80.0));

        let s1 = center(&tree, "fc_s1");
        let s2 = center(&tree, "fc_s2");
        let s3 = center(&tree, "fc_s3");
        assert_eq!((s1.x - rib.x, s1.y - rib.y), (60.0, -60.0));
        assert_eq!((s2.x - s1.x, s2.y - s1.y), (45.0, -45.0));
        assert_eq!((s3.x - s2.x, s3.y - s2.y), (33.75, -33.75));
    }

    #[test]
    fn ribs_alternate_and_head_hint_flips_spine() {
        let map = parse_outline(
            r#"
topic @fa_head { structure: fishbone  direction: right
  topic @fa_0
  topic @fa_1
  topic @fa_2
}
"#,
        )
        .unwrap();
        let tree = layout(&map, None, &LayoutConfig::default()).unwrap();

        assert_eq!(center(&tree, "fa_0"), Point::new(-220.0, -80.0));
        assert_eq!(center(&tree, "fa_1"), Point::new(-360.0, 80.0));
        assert_eq!(center(&tree, "fa_2"), Point::new(-500.0, -80.0));
        let sides: Vec<_> = ["fa_0", "fa_1"]
            .iter()
            .map(|id| tree.get_by_id(TopicId::intern(id)).unwrap().side)
            .collect();
        assert_eq!(sides, vec![Some(Side::Above), Some(Side::Below)]);
    }

    #[test]
    fn override_hands_off_to_org_chart() {
        let map = parse_outline(
            r#"
topic @fo_head {
  topic @fo_rib { structure: org-chart
    topic @fo_leaf
  }
}
"#,
        )
        .unwrap();
        let tree = layout(&map, Structure::parse("fishbone"), &LayoutConfig::default()).unwrap();

        let rib = tree.get_by_id(TopicId::intern("fo_rib")).unwrap();
        let leaf = tree.get_by_id(TopicId::intern("fo_leaf")).unwrap();
        assert_eq!(leaf.center().x, rib.center().x);
        assert_eq!(leaf.y, rib.bounds().bottom() + 60.0);
        assert_eq!(leaf.side, Some(Side::Below));
    }
}
