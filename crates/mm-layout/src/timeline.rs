//! Timeline layout: items at fixed steps along a line from the head.
//!
//! Horizontal timelines alternate items above and below the line; vertical
//! ones stack them under the head. Everything below an item trails it at
//! `sub_spacing` steps on the same side, in document order, without
//! consulting structure overrides. Each node steps off its own parent, so a
//! pinned node drags its trail along.

use crate::engine::LayoutContext;
use crate::extent::row_height;
use crate::tree::Side;
use mm_core::{Direction, NodeIndex, Point};

pub(crate) fn place(ctx: &mut LayoutContext<'_>, idx: NodeIndex, direction: Direction) {
    match direction {
        Direction::Down => place_vertical(ctx, idx),
        Direction::Left => place_horizontal(ctx, idx, -1.0),
        _ => place_horizontal(ctx, idx, 1.0),
    }
}

fn place_horizontal(ctx: &mut LayoutContext<'_>, head: NodeIndex, xdir: f32) {
    let h = ctx.bounds(head);
    let center = h.center();
    let tl = ctx.config.timeline.clone();

    for (i, item) in ctx.tree.children(head).into_iter().enumerate() {
        let (vdir, side) = if i % 2 == 0 {
            (-1.0, Side::Above)
        } else {
            (1.0, Side::Below)
        };
        let cx = center.x + xdir * (h.width / 2.0 + (i + 1) as f32 * tl.item_spacing);
        ctx.put(item, Point::new(cx, center.y + vdir * tl.item_offset), Some(side));
        trail(ctx, item, vdir * tl.sub_spacing, side);
    }
}

fn place_vertical(ctx: &mut LayoutContext<'_>, head: NodeIndex) {
    let h = ctx.bounds(head);
    let (h_gap, v_gap) = (ctx.config.h_gap, ctx.config.v_gap);
    let step = ctx.config.timeline.sub_spacing;
    let mut cursor = h.bottom() + v_gap;

    for item in ctx.tree.children(head) {
        let half_height = ctx.tree.node(item).height / 2.0;
        ctx.put(item, Point::new(h.center().x, cursor + half_height), Some(Side::Below));

        // The first trailing level sits beside the item; deeper levels
        // share their parent's left edge.
        let b = ctx.bounds(item);
        let mut used = 0;
        for sub in ctx.tree.children(item) {
            let cx = b.right() + h_gap + ctx.tree.node(sub).width / 2.0;
            let cy = b.center().y + (used + 1) as f32 * step;
            ctx.put(sub, Point::new(cx, cy), Some(Side::Right));
            used += 1 + trail(ctx, sub, step, Side::Right);
        }
        cursor += row_height(ctx, item) + v_gap;
    }
}

/// Place every descendant of `parent` in one column, `dy` apart in
/// pre-order, each offset from its own parent. Returns the number of slots
/// taken.
fn trail(ctx: &mut LayoutContext<'_>, parent: NodeIndex, dy: f32, side: Side) -> usize {
    let p = ctx.bounds(parent);
    let mut used = 0;
    for child in ctx.tree.children(parent) {
        let cx = match side {
            Side::Right => p.x + ctx.tree.node(child).width / 2.0,
            _ => p.center().x,
        };
        let cy = p.center().y + (used + 1) as f32 * dy;
        ctx.put(child, Point::new(cx, cy), Some(side));
        used += 1 + trail(ctx, child, dy, side);
    }
    used
}

#[cfg(test)]
mod tests {
    use crate::engine::layout;
    use crate::tree::Side;
    use mm_core::{LayoutConfig, Point, Size, Structure, TopicId, parse_outline};
    use pretty_assertions::assert_eq;

    const OUTLINE: &str = r#"
topic @tl_head {
  topic @tl_a {
    topic @tl_a1 { structure: org-chart
      topic @tl_a1x
    }
  }
  topic @tl_b
}
"#;

    fn center(tree: &crate::LayoutTree, id: &str) -> Point {
        tree.get_by_id(TopicId::intern(id)).unwrap().center()
    }

    #[test]
    fn horizontal_items_alternate() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, Structure::parse("timeline"), &LayoutConfig::default()).unwrap();

        // Steps are measured from the head's right edge (root half-width 80).
        assert_eq!(center(&tree, "tl_a"), Point::new(80.0 + 180.0, -80.0));
        assert_eq!(center(&tree, "tl_b"), Point::new(80.0 + 360.0, 80.0));
        // Overrides below an item are not honoured; descendants follow the item.
        assert_eq!(center(&tree, "tl_a1"), Point::new(260.0, -130.0));
        assert_eq!(center(&tree, "tl_a1x"), Point::new(260.0, -180.0));
        let a1x = tree.get_by_id(TopicId::intern("tl_a1x")).unwrap();
        assert_eq!(a1x.side, Some(Side::Above));
    }

    #[test]
    fn wide_head_pushes_items_out() {
        let mut map = parse_outline(OUTLINE).unwrap();
        map.get_by_id_mut(TopicId::intern("tl_head")).unwrap().size = Some(Size::new(600.0, 56.0));
        let tree = layout(&map, Structure::parse("timeline"), &LayoutConfig::default()).unwrap();

        let head = tree.root_node().bounds();
        let a = tree.get_by_id(TopicId::intern("tl_a")).unwrap();
        assert_eq!(a.center().x, 300.0 + 180.0);
        assert!(!a.bounds().intersects(&head));
    }

    #[test]
    fn vertical_items_stack_under_head() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree =
            layout(&map, Structure::parse("timeline-down"), &LayoutConfig::default()).unwrap();

        // Head bottom at 28, one v_gap below it.
        assert_eq!(center(&tree, "tl_a"), Point::new(0.0, 44.0 + 20.0));
        assert_eq!(center(&tree, "tl_a1"), Point::new(160.0, 114.0));
        assert_eq!(center(&tree, "tl_a1x"), Point::new(160.0, 164.0));
        // Row a spans 20 + 2 × 50 + 20 below its top.
        assert_eq!(center(&tree, "tl_b"), Point::new(0.0, 44.0 + 140.0 + 16.0 + 20.0));
    }

    #[test]
    fn trail_follows_pinned_descendant() {
        let mut map = parse_outline(OUTLINE).unwrap();
        map.pin(TopicId::intern("tl_a1"), 1000.0, 1000.0).unwrap();

        let tree = layout(&map, Structure::parse("timeline"), &LayoutConfig::default()).unwrap();
        assert_eq!(center(&tree, "tl_a1"), Point::new(1000.0, 1000.0));
        assert_eq!(center(&tree, "tl_a1x"), Point::new(1000.0, 950.0));

        let tree =
            layout(&map, Structure::parse("timeline-down"), &LayoutConfig::default()).unwrap();
        assert_eq!(center(&tree, "tl_a1"), Point::new(1000.0, 1000.0));
        // Left edge shared with the pinned parent, one step below it.
        assert_eq!(center(&tree, "tl_a1x"), Point::new(1000.0, 1050.0));
    }

    #[test]
    fn trail_keeps_preorder_slots() {
        let map = parse_outline(
            r#"
topic @tp_head {
  topic @tp_a {
    topic @tp_a1 {
      topic @tp_a1x
    }
    topic @tp_a2
  }
}
"#,
        )
        .unwrap();
        let tree = layout(&map, Structure::parse("timeline"), &LayoutConfig::default()).unwrap();

        let a = center(&tree, "tp_a");
        assert_eq!(center(&tree, "tp_a1"), Point::new(a.x, a.y - 50.0));
        assert_eq!(center(&tree, "tp_a1x"), Point::new(a.x, a.y - 100.0));
        assert_eq!(center(&tree, "tp_a2"), Point::new(a.x, a.y - 150.0));
    }
}
