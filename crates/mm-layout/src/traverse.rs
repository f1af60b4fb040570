//! Read-only walks over a finished `LayoutTree`.
//!
//! Renderers, exporters and fit-to-view code consume layouts through these
//! helpers; none of them carry layout logic.

use crate::tree::{Bounds, LayoutTree, RenderedNode};
use mm_core::{NodeIndex, TopicId};

/// Every rendered node in pre-order (parent before children, siblings in
/// document order).
pub fn flatten(tree: &LayoutTree) -> Vec<&RenderedNode> {
    preorder(tree, tree.root)
        .into_iter()
        .map(|idx| tree.node(idx))
        .collect()
}

/// Pre-order indices of the subtree rooted at `start`, `start` first.
pub fn preorder(tree: &LayoutTree, start: NodeIndex) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    let mut stack = vec![start];
    while let Some(idx) = stack.pop() {
        out.push(idx);
        // Reverse so the first child is popped first.
        stack.extend(tree.children(idx).into_iter().rev());
    }
    out
}

/// Pre-order indices strictly below `idx`.
pub fn descendants(tree: &LayoutTree, idx: NodeIndex) -> Vec<NodeIndex> {
    let mut nodes = preorder(tree, idx);
    nodes.remove(0);
    nodes
}

/// Parent chain of `idx`, nearest first, ending at the layout root.
pub fn ancestors(tree: &LayoutTree, idx: NodeIndex) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    let mut current = tree.parent(idx);
    while let Some(parent) = current {
        out.push(parent);
        current = tree.parent(parent);
    }
    out
}

/// Depth-first search for a topic id.
pub fn find_by_id(tree: &LayoutTree, id: TopicId) -> Option<&RenderedNode> {
    find_in(tree, tree.root, id)
}

fn find_in(tree: &LayoutTree, idx: NodeIndex, id: TopicId) -> Option<&RenderedNode> {
    let node = tree.node(idx);
    if node.id == id {
        return Some(node);
    }
    tree.children(idx)
        .into_iter()
        .find_map(|child| find_in(tree, child, id))
}

/// Smallest rectangle covering every node in `nodes`; `None` when empty.
pub fn bounding_box<'a, I>(nodes: I) -> Option<Bounds>
where
    I: IntoIterator<Item = &'a RenderedNode>,
{
    nodes
        .into_iter()
        .map(RenderedNode::bounds)
        .reduce(|a, b| a.union(&b))
}

/// Bounding box of a whole tree.
pub fn tree_bounds(tree: &LayoutTree) -> Option<Bounds> {
    bounding_box(tree.graph.node_indices().map(|idx| &tree.graph[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layout;
    use mm_core::{LayoutConfig, Structure, parse_outline};
    use pretty_assertions::assert_eq;

    const OUTLINE: &str = r#"
topic @tv_root {
  topic @tv_a {
    topic @tv_a1
    topic @tv_a2 {
      topic @tv_a2x
    }
  }
  topic @tv_b
}
"#;

    fn ids(nodes: &[&RenderedNode]) -> Vec<String> {
        nodes.iter().map(|n| n.id.as_str().to_string()).collect()
    }

    #[test]
    fn flatten_is_preorder() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, None, &LayoutConfig::default()).unwrap();
        assert_eq!(
            ids(&flatten(&tree)),
            vec!["tv_root", "tv_a", "tv_a1", "tv_a2", "tv_a2x", "tv_b"]
        );
    }

    #[test]
    fn ancestors_nearest_first() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, None, &LayoutConfig::default()).unwrap();
        let leaf = tree.index_of(TopicId::intern("tv_a2x")).unwrap();
        let chain: Vec<_> = ancestors(&tree, leaf)
            .into_iter()
            .map(|i| tree.node(i).id.as_str().to_string())
            .collect();
        assert_eq!(chain, vec!["tv_a2", "tv_a", "tv_root"]);

        let a = tree.index_of(TopicId::intern("tv_a")).unwrap();
        assert_eq!(descendants(&tree, a).len(), 3);
    }

    #[test]
    fn find_by_id_walks_the_tree() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, None, &LayoutConfig::default()).unwrap();
        let found = find_by_id(&tree, TopicId::intern("tv_a2x")).unwrap();
        assert_eq!(found.level, 3);
        assert!(find_by_id(&tree, TopicId::intern("tv_missing")).is_none());
    }

    #[test]
    fn bounding_box_covers_all_nodes() {
        let map = parse_outline(OUTLINE).unwrap();
        let tree = layout(&map, Structure::parse("org-chart"), &LayoutConfig::default()).unwrap();
        let bb = tree_bounds(&tree).unwrap();
        for node in flatten(&tree) {
            let b = node.bounds();
            assert!(b.x >= bb.x && b.y >= bb.y);
            assert!(b.right() <= bb.right() && b.bottom() <= bb.bottom());
        }
        assert!(bounding_box(std::iter::empty()).is_none());
    }
}
