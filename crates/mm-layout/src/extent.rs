//! Subtree extents: how much room a node and its visible descendants need
//! along one axis.
//!
//! Strategies reserve a slot of this size for each child and centre the
//! child in it, so every family reports a footprint symmetric about the
//! node's centre. Results are memoised per call in `LayoutContext`.

use crate::engine::LayoutContext;
use crate::radial;
use crate::traverse::descendants;
use mm_core::{Direction, Family, NodeIndex, StructureKind};

/// Layout axis an extent is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Heights, for families that stack children top-to-bottom.
    Vertical,
    /// Widths, for families that spread children left-to-right.
    Horizontal,
}

/// Extent of the subtree rooted at `idx` along `axis`.
pub(crate) fn extent(ctx: &mut LayoutContext<'_>, idx: NodeIndex, axis: Axis) -> f32 {
    let key = (ctx.tree.node(idx).id, axis);
    if let Some(&cached) = ctx.extents.get(&key) {
        return cached;
    }
    let value = compute(ctx, idx, axis).max(own(ctx, idx, axis));
    ctx.extents.insert(key, value);
    value
}

/// Sum of the children's extents along `axis`.
pub(crate) fn total(ctx: &mut LayoutContext<'_>, children: &[NodeIndex], axis: Axis) -> f32 {
    children.iter().map(|&c| extent(ctx, c, axis)).sum()
}

/// Extent of a leaf: the node itself plus one sibling gap.
fn own(ctx: &LayoutContext<'_>, idx: NodeIndex, axis: Axis) -> f32 {
    let node = ctx.tree.node(idx);
    match axis {
        Axis::Vertical => node.height + ctx.config.v_gap,
        Axis::Horizontal => node.width + ctx.config.h_gap,
    }
}

fn compute(ctx: &mut LayoutContext<'_>, idx: NodeIndex, axis: Axis) -> f32 {
    // Collapsed topics never get rendered children.
    let children = ctx.tree.children(idx);
    if children.is_empty() {
        return own(ctx, idx, axis);
    }

    let node = ctx.tree.node(idx);
    let (width, height, structure) = (node.width, node.height, node.structure);
    let is_root = idx == ctx.tree.root;

    match (structure.family(), axis) {
        (Family::Radial, Axis::Vertical) if is_root => {
            let (right, left) = radial::split(&children, structure.direction);
            let right = total(ctx, &right, Axis::Vertical);
            let left = total(ctx, &left, Axis::Vertical);
            right.max(left)
        }
        (Family::Branch, Axis::Vertical) if structure.kind == StructureKind::OrgChart => {
            let deepest = max_of(ctx, &children, Axis::Vertical);
            height + 2.0 * (ctx.config.level_gap + deepest)
        }
        (Family::Branch, Axis::Horizontal) if structure.kind == StructureKind::OrgChart => {
            total(ctx, &children, Axis::Horizontal)
        }
        (Family::Radial | Family::Branch, Axis::Vertical) => {
            total(ctx, &children, Axis::Vertical)
        }
        (Family::Radial | Family::Branch, Axis::Horizontal) => {
            let widest = max_of(ctx, &children, Axis::Horizontal);
            width + 2.0 * (ctx.config.h_gap + widest)
        }
        (Family::Fishbone, axis) => fishbone(ctx, width, height, children.len(), axis),
        (Family::Timeline, axis) if structure.direction == Direction::Down => {
            vertical_timeline(ctx, width, height, &children, axis)
        }
        (Family::Timeline, axis) => horizontal_timeline(ctx, width, height, &children, axis),
    }
}

fn max_of(ctx: &mut LayoutContext<'_>, children: &[NodeIndex], axis: Axis) -> f32 {
    children
        .iter()
        .map(|&c| extent(ctx, c, axis))
        .fold(0.0, f32::max)
}

/// Ribs alternate above and below the spine, so only half of them stack on
/// either side.
fn fishbone(ctx: &LayoutContext<'_>, width: f32, height: f32, ribs: usize, axis: Axis) -> f32 {
    let c = &ctx.config;
    match axis {
        Axis::Vertical => {
            let per_side = ribs.div_ceil(2) as f32;
            height + per_side * 2.0 * c.fishbone.rib_offset + c.v_gap
        }
        Axis::Horizontal => {
            let spine = ribs as f32 * c.fishbone.spine_step + c.node_width / 2.0;
            width + 2.0 * spine + c.h_gap
        }
    }
}

fn horizontal_timeline(
    ctx: &LayoutContext<'_>,
    width: f32,
    height: f32,
    items: &[NodeIndex],
    axis: Axis,
) -> f32 {
    let c = &ctx.config;
    match axis {
        Axis::Vertical => {
            let deepest = items
                .iter()
                .map(|&item| descendants(&ctx.tree, item).len())
                .max()
                .unwrap_or(0) as f32;
            let reach = c.timeline.item_offset + deepest * c.timeline.sub_spacing;
            height.max(2.0 * reach + c.node_height) + c.v_gap
        }
        Axis::Horizontal => {
            let line = items.len() as f32 * c.timeline.item_spacing + c.node_width / 2.0;
            width + 2.0 * line + c.h_gap
        }
    }
}

fn vertical_timeline(
    ctx: &LayoutContext<'_>,
    width: f32,
    height: f32,
    items: &[NodeIndex],
    axis: Axis,
) -> f32 {
    let c = &ctx.config;
    match axis {
        Axis::Vertical => {
            let mut below = c.v_gap;
            for &item in items {
                below += row_height(ctx, item) + c.v_gap;
            }
            height + 2.0 * below + c.v_gap
        }
        Axis::Horizontal => {
            let half = items
                .iter()
                .map(|&item| {
                    let item_width = ctx.tree.node(item).width;
                    let widest = descendants(&ctx.tree, item)
                        .into_iter()
                        .map(|d| ctx.tree.node(d).width)
                        .fold(0.0, f32::max);
                    if widest > 0.0 {
                        item_width / 2.0 + c.h_gap + widest
                    } else {
                        item_width / 2.0
                    }
                })
                .fold(width / 2.0, f32::max);
            2.0 * half + c.h_gap
        }
    }
}

/// Height of one vertical-timeline row: the item plus its descendants
/// hanging off to the right at `sub_spacing` steps.
pub(crate) fn row_height(ctx: &LayoutContext<'_>, item: NodeIndex) -> f32 {
    let item_height = ctx.tree.node(item).height;
    let step = ctx.config.timeline.sub_spacing;
    descendants(&ctx.tree, item)
        .into_iter()
        .enumerate()
        .map(|(k, d)| item_height / 2.0 + (k + 1) as f32 * step + ctx.tree.node(d).height / 2.0)
        .fold(item_height, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::context;
    use mm_core::{LayoutConfig, MindMap, Structure, Topic, TopicId};

    fn leaf_map(prefix: &str, structure: &str, n: usize) -> MindMap {
        let mut map = MindMap::new(
            Topic::named(&format!("{prefix}_root")).with_structure(Structure::parse(structure)),
        );
        let root = map.root;
        for i in 0..n {
            map.add_topic(root, Topic::named(&format!("{prefix}_{i}")))
                .unwrap();
        }
        map
    }

    #[test]
    fn leaf_extent_is_size_plus_gap() {
        let map = leaf_map("xl", "logic", 0);
        let config = LayoutConfig::default();
        let mut ctx = context(&map, &config);
        let root = ctx.tree.root;
        assert_eq!(extent(&mut ctx, root, Axis::Vertical), 56.0 + 16.0);
        assert_eq!(extent(&mut ctx, root, Axis::Horizontal), 160.0 + 40.0);
    }

    #[test]
    fn branch_sums_children() {
        let map = leaf_map("xb", "logic", 4);
        let config = LayoutConfig::default();
        let mut ctx = context(&map, &config);
        let root = ctx.tree.root;
        assert_eq!(extent(&mut ctx, root, Axis::Vertical), 4.0 * (40.0 + 16.0));
    }

    #[test]
    fn radial_root_takes_larger_side() {
        let map = leaf_map("xr", "mindmap", 5);
        let config = LayoutConfig::default();
        let mut ctx = context(&map, &config);
        let root = ctx.tree.root;
        assert_eq!(extent(&mut ctx, root, Axis::Vertical), 3.0 * 56.0);
    }

    #[test]
    fn org_chart_sums_widths() {
        let map = leaf_map("xo", "org-chart", 3);
        let config = LayoutConfig::default();
        let mut ctx = context(&map, &config);
        let root = ctx.tree.root;
        assert_eq!(extent(&mut ctx, root, Axis::Horizontal), 3.0 * 160.0);
        assert_eq!(
            extent(&mut ctx, root, Axis::Vertical),
            56.0 + 2.0 * (60.0 + 56.0)
        );
    }

    #[test]
    fn fishbone_counts_half_the_ribs() {
        let map = leaf_map("xf", "fishbone", 5);
        let config = LayoutConfig::default();
        let mut ctx = context(&map, &config);
        let root = ctx.tree.root;
        // ceil(5/2) ribs per side.
        assert_eq!(
            extent(&mut ctx, root, Axis::Vertical),
            56.0 + 3.0 * 2.0 * 80.0 + 16.0
        );
    }

    #[test]
    fn results_are_memoised_per_axis() {
        let map = leaf_map("xm", "logic", 2);
        let config = LayoutConfig::default();
        let mut ctx = context(&map, &config);
        let root = ctx.tree.root;
        extent(&mut ctx, root, Axis::Vertical);
        assert!(
            ctx.extents
                .contains_key(&(TopicId::intern("xm_root"), Axis::Vertical))
        );
        assert!(
            !ctx.extents
                .contains_key(&(TopicId::intern("xm_root"), Axis::Horizontal))
        );
        assert_eq!(ctx.extents.len(), 3);
    }
}
