//! Branching strategies shared by tree, logic, org chart and the non-root
//! levels of a mind map.
//!
//! Horizontal mode stacks children in a column beside the parent, sized by
//! their vertical extents. Vertical mode (org chart) lays a rank of
//! children side by side, sized by their horizontal extents, one
//! `level_gap` below or above the parent.

use crate::engine::LayoutContext;
use crate::extent::{Axis, extent, total};
use crate::resolve::place_children;
use crate::tree::Side;
use mm_core::{Direction, NodeIndex, Point};

/// Stack `children` in a column on `side` of `parent`, starting at `top`.
pub(crate) fn stack(
    ctx: &mut LayoutContext<'_>,
    parent: NodeIndex,
    children: &[NodeIndex],
    side: Side,
    top: f32,
) {
    let p = ctx.bounds(parent);
    let h_gap = ctx.config.h_gap;
    let mut cursor = top;

    for &child in children {
        let ext = extent(ctx, child, Axis::Vertical);
        let half_width = ctx.tree.node(child).width / 2.0;
        let cx = match side {
            Side::Left => p.x - h_gap - half_width,
            _ => p.right() + h_gap + half_width,
        };
        ctx.put(child, Point::new(cx, cursor + ext / 2.0), Some(side));
        place_children(ctx, child, side);
        cursor += ext;
    }
}

pub(crate) fn place_horizontal(ctx: &mut LayoutContext<'_>, idx: NodeIndex, side: Side) {
    let children = ctx.tree.children(idx);
    let height = total(ctx, &children, Axis::Vertical);
    let top = ctx.center(idx).y - height / 2.0;
    stack(ctx, idx, &children, side, top);
}

pub(crate) fn place_vertical(ctx: &mut LayoutContext<'_>, idx: NodeIndex, direction: Direction) {
    let children = ctx.tree.children(idx);
    let widths: Vec<f32> = children
        .iter()
        .map(|&c| extent(ctx, c, Axis::Horizontal))
        .collect();
    let p = ctx.bounds(idx);
    let pc = p.center();
    let level_gap = ctx.config.level_gap;
    let (ydir, side) = match direction {
        Direction::Up => (-1.0, Side::Above),
        _ => (1.0, Side::Below),
    };

    let mut left = pc.x - widths.iter().sum::<f32>() / 2.0;
    for (&child, width) in children.iter().zip(widths) {
        let half_height = ctx.tree.node(child).height / 2.0;
        let cx = left + width / 2.0;
        let cy = pc.y + ydir * (p.height / 2.0 + level_gap + half_height);
        ctx.put(child, Point::new(cx, cy), Some(side));
        place_children(ctx, child, Side::Right);
        left += width;
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::layout;
    use crate::tree::Side;
    use mm_core::{LayoutConfig, Point, Structure, TopicId, parse_outline};
    use pretty_assertions::assert_eq;

    const OUTLINE: &str = r#"
topic @br_root {
  topic @br_a {
    topic @br_a1
    topic @br_a2
  }
  topic @br_b
}
"#;

    fn center(tree: &crate::LayoutTree, id: &str) -> Point {
        tree.get_by_id(TopicId::intern(id)).unwrap().center()
    }

    #[test]
    fn logic_right_stacks_column() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, Structure::parse("logic"), &LayoutConfig::default()).unwrap();

        // Root 160 wide at the origin; children 40 to the right of its edge.
        let a = center(&tree, "br_a");
        let b = center(&tree, "br_b");
        assert_eq!(a.x, 80.0 + 40.0 + 60.0);
        assert_eq!(a.x, b.x);
        // a needs two rows (2 × 56), b one row.
        assert_eq!(a.y, -168.0 / 2.0 + 56.0);
        assert_eq!(b.y, -168.0 / 2.0 + 112.0 + 28.0);

        let a1 = center(&tree, "br_a1");
        assert_eq!(a1.x, a.x + 60.0 + 40.0 + 60.0);
        assert_eq!(a1.y, a.y - 28.0);
        assert_eq!(tree.get_by_id(TopicId::intern("br_a1")).unwrap().side, Some(Side::Right));
    }

    #[test]
    fn tree_left_mirrors() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, Structure::parse("tree-left"), &LayoutConfig::default()).unwrap();
        assert_eq!(center(&tree, "br_a").x, -180.0);
        assert_eq!(center(&tree, "br_a1").x, -180.0 - 160.0);
    }

    #[test]
    fn org_chart_centres_parent_over_children() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, Structure::parse("org-chart"), &LayoutConfig::default()).unwrap();

        let a = center(&tree, "br_a");
        let b = center(&tree, "br_b");
        // a spans two leaves (2 × 160), b one.
        assert_eq!(a.x, -240.0 + 160.0);
        assert_eq!(b.x, -240.0 + 320.0 + 80.0);
        assert_eq!(a.y, 28.0 + 60.0 + 20.0);

        let a1 = center(&tree, "br_a1");
        let a2 = center(&tree, "br_a2");
        assert_eq!((a1.x + a2.x) / 2.0, a.x);
        assert_eq!(a1.y, a.y + 20.0 + 60.0 + 20.0);
        assert_eq!(tree.get_by_id(TopicId::intern("br_a1")).unwrap().side, Some(Side::Below));
    }

    #[test]
    fn org_chart_up_grows_upward() {
        let map = parse_outline(OUTLINE).unwrap();
        let config = LayoutConfig::default();
        let tree = layout(&map, Structure::parse("org-chart-up"), &config).unwrap();
        let a = center(&tree, "br_a");
        assert_eq!(a.y, -108.0);
        assert!(center(&tree, "br_a1").y < a.y);
    }
}
