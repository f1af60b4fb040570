//! Layout entry points and the per-call context.
//!
//! A run has two passes. The first walks the source map top-down, builds
//! the rendered tree for the visible frontier (collapsed topics keep their
//! children out), sizes every node and resolves each node's structure once.
//! The second places the root and lets the dispatcher recurse through the
//! positioning strategies. Everything mutable lives in `LayoutContext`,
//! which is dropped when the call returns.

use crate::error::LayoutError;
use crate::extent::Axis;
use crate::resolve::{Resolved, place_children};
use crate::traverse::{bounding_box, tree_bounds};
use crate::tree::{Bounds, LayoutTree, RenderedNode, Side};
use mm_core::{LayoutConfig, MindMap, NodeIndex, Point, Structure, Topic, TopicId};
use std::collections::{HashMap, HashSet};

/// Mutable state for a single layout call.
pub(crate) struct LayoutContext<'a> {
    pub map: &'a MindMap,
    pub config: LayoutConfig,
    pub tree: LayoutTree,
    /// Subtree extents memoised by topic and axis. Call-scoped.
    pub extents: HashMap<(TopicId, Axis), f32>,
}

impl<'a> LayoutContext<'a> {
    /// The source topic behind a rendered node.
    pub fn topic(&self, idx: NodeIndex) -> &'a Topic {
        let map: &'a MindMap = self.map;
        &map.graph[self.tree.graph[idx].source]
    }

    pub fn bounds(&self, idx: NodeIndex) -> Bounds {
        self.tree.graph[idx].bounds()
    }

    pub fn center(&self, idx: NodeIndex) -> Point {
        self.bounds(idx).center()
    }

    /// Place a node by its centre. A manual pin wins over `center`.
    pub fn put(&mut self, idx: NodeIndex, center: Point, side: Option<Side>) {
        let center = self.topic(idx).position.unwrap_or(center);
        let node = &mut self.tree.graph[idx];
        node.x = center.x - node.width / 2.0;
        node.y = center.y - node.height / 2.0;
        node.side = side;
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Lay out the main topic tree of `map`.
///
/// `structure` is the caller's choice for the root's children; a root
/// override beats it and `config.default_structure` backs it.
pub fn layout(
    map: &MindMap,
    structure: impl Into<Option<Structure>>,
    config: &LayoutConfig,
) -> Result<LayoutTree, LayoutError> {
    layout_subtree(map, map.root, structure, config)
}

/// Lay out the subtree rooted at `root` as if it were a standalone map.
pub fn layout_subtree(
    map: &MindMap,
    root: NodeIndex,
    structure: impl Into<Option<Structure>>,
    config: &LayoutConfig,
) -> Result<LayoutTree, LayoutError> {
    if !map.graph.contains_node(root) {
        return Err(LayoutError::UnknownRoot(root.index()));
    }
    let config = config.sanitized();
    let tree = build_tree(map, root, structure.into(), &config)?;

    let mut ctx = LayoutContext {
        map,
        config,
        tree,
        extents: HashMap::new(),
    };

    let root = ctx.tree.root;
    let origin = Point::new(ctx.config.center_x, ctx.config.center_y);
    ctx.put(root, origin, None);
    place_children(&mut ctx, root, Side::Right);

    log::debug!(
        "laid out {} nodes from {} as {}",
        ctx.tree.len(),
        ctx.tree.root_node().id,
        ctx.tree.root_node().structure
    );
    Ok(ctx.tree)
}

/// The main tree plus every floating topic, each laid out independently.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub main: LayoutTree,
    pub floating: Vec<LayoutTree>,
}

impl DocumentLayout {
    /// Union of every tree's bounding box.
    pub fn bounds(&self) -> Option<Bounds> {
        std::iter::once(&self.main)
            .chain(&self.floating)
            .filter_map(tree_bounds)
            .reduce(|a, b| a.union(&b))
    }
}

/// Lay out the main tree and all floating topics.
///
/// Floating topics are laid out one level deeper (`base_level + 1`). A
/// pinned floating topic is centred on its pin; unpinned ones are stacked
/// below everything laid out so far.
pub fn layout_document(
    map: &MindMap,
    structure: impl Into<Option<Structure>>,
    config: &LayoutConfig,
) -> Result<DocumentLayout, LayoutError> {
    let structure = structure.into();
    let main = layout(map, structure, config)?;
    let config = config.sanitized();

    let main_bottom = tree_bounds(&main).map_or(config.center_y, |b| b.bottom());
    let mut cursor = main_bottom + config.level_gap;
    let mut floating = Vec::with_capacity(map.floating.len());

    for &root in &map.floating {
        let tree = match map.graph[root].position {
            Some(pin) => layout_subtree(map, root, structure, &config.grafted(pin.x, pin.y))?,
            None => {
                // Probe once to learn how far the subtree reaches above its
                // root, then shift so its top edge lands on the cursor.
                let probe_config = config.grafted(config.center_x, cursor);
                let probe = layout_subtree(map, root, structure, &probe_config)?;
                let top = movable_bounds(map, &probe).map_or(cursor, |b| b.y);
                let placed = config.grafted(config.center_x, cursor + (cursor - top));
                let tree = layout_subtree(map, root, structure, &placed)?;
                cursor = movable_bounds(map, &tree).map_or(cursor, |b| b.bottom())
                    + config.level_gap;
                tree
            }
        };
        floating.push(tree);
    }

    Ok(DocumentLayout { main, floating })
}

/// Bounds of the nodes that move with the tree's root. Pinned topics and
/// everything laid out from them stay where they are.
fn movable_bounds(map: &MindMap, tree: &LayoutTree) -> Option<Bounds> {
    let mut nodes = Vec::new();
    let mut stack = vec![tree.root];
    while let Some(idx) = stack.pop() {
        let node = tree.node(idx);
        if idx != tree.root && map.graph[node.source].position.is_some() {
            continue;
        }
        nodes.push(node);
        stack.extend(tree.children(idx));
    }
    bounding_box(nodes)
}

// ─── Frontier pass ────────────────────────────────────────────────────────

fn build_tree(
    map: &MindMap,
    root: NodeIndex,
    structure: Option<Structure>,
    config: &LayoutConfig,
) -> Result<LayoutTree, LayoutError> {
    let topic = &map.graph[root];
    let resolved = Resolved::new(topic.structure, structure).effective(config.default_structure);
    let mut tree = LayoutTree::new(rendered_node(topic, root, 0, resolved, config));

    let mut visited = HashSet::new();
    visited.insert(root);
    if !topic.collapsed {
        let parent = tree.root;
        for child in map.children(root) {
            add_visible(map, &mut tree, parent, child, 1, resolved, config, &mut visited)?;
        }
    }
    Ok(tree)
}

#[allow(clippy::too_many_arguments)]
fn add_visible(
    map: &MindMap,
    tree: &mut LayoutTree,
    parent: NodeIndex,
    source: NodeIndex,
    depth: usize,
    inherited: Structure,
    config: &LayoutConfig,
    visited: &mut HashSet<NodeIndex>,
) -> Result<(), LayoutError> {
    let topic = &map.graph[source];
    if depth > config.max_depth {
        return Err(LayoutError::MaxDepthExceeded {
            id: topic.id,
            depth,
        });
    }
    if !visited.insert(source) {
        return Err(LayoutError::Cycle { id: topic.id });
    }

    let resolved =
        Resolved::new(topic.structure, Some(inherited)).effective(config.default_structure);
    let idx = tree.add_child(parent, rendered_node(topic, source, depth, resolved, config));

    if !topic.collapsed {
        for child in map.children(source) {
            add_visible(map, tree, idx, child, depth + 1, resolved, config, visited)?;
        }
    }
    Ok(())
}

fn rendered_node(
    topic: &Topic,
    source: NodeIndex,
    depth: usize,
    structure: Structure,
    config: &LayoutConfig,
) -> RenderedNode {
    let (width, height) = node_size(topic, depth == 0, config);
    RenderedNode {
        id: topic.id,
        source,
        x: 0.0,
        y: 0.0,
        width,
        height,
        level: config.base_level + depth as u32,
        collapsed: topic.collapsed,
        structure,
        side: None,
    }
}

/// Measured size if valid, else root dimensions for a top-level layout
/// root and node dimensions for everything else.
fn node_size(topic: &Topic, is_layout_root: bool, config: &LayoutConfig) -> (f32, f32) {
    match topic.size {
        Some(size) if size.is_valid() => return (size.width, size.height),
        Some(size) => {
            log::warn!(
                "{}: invalid size {}x{}, using defaults",
                topic.id,
                size.width,
                size.height
            );
        }
        None => {}
    }
    if is_layout_root && config.base_level == 0 {
        (config.root_width, config.root_height)
    } else {
        (config.node_width, config.node_height)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
