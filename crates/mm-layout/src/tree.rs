//! The rendered tree: positioned, sized topics mirroring the visible part
//! of the source map.
//!
//! Stored as a petgraph arena like the source document. Nodes are added
//! in pre-order, so `NodeIndex` order within a parent is document order.
//! The parent link is the single incoming edge and is only used for
//! upward traversal.

use mm_core::{NodeIndex, Point, Structure, TopicId};
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a node sits relative to its parent. Connector renderers use it to
/// pick attachment edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    Right,
    Above,
    Below,
}

/// Axis-aligned rectangle in canvas coordinates (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if this bounds intersects another (AABB overlap).
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Uniform scale that fits these bounds (plus `padding` on every side)
    /// into a `width` × `height` viewport.
    pub fn fit_scale(&self, width: f32, height: f32, padding: f32) -> f32 {
        let w = self.width + 2.0 * padding;
        let h = self.height + 2.0 * padding;
        if w <= 0.0 || h <= 0.0 {
            return 1.0;
        }
        (width / w).min(height / h)
    }
}

/// A positioned topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNode {
    pub id: TopicId,
    /// The topic this node renders, as an index into the source `MindMap`.
    #[serde(skip)]
    pub source: NodeIndex,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Depth below the layout root, offset by the configured base level.
    pub level: u32,
    pub collapsed: bool,
    /// Structure resolved for this node's children.
    pub structure: Structure,
    /// Placement relative to the parent; `None` for the layout root.
    pub side: Option<Side>,
}

impl RenderedNode {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Output of one layout run.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    pub graph: StableDiGraph<RenderedNode, ()>,
    pub root: NodeIndex,
    /// Index from TopicId → NodeIndex for fast lookup.
    pub id_index: HashMap<TopicId, NodeIndex>,
}

impl LayoutTree {
    pub(crate) fn new(root: RenderedNode) -> Self {
        let mut graph = StableDiGraph::new();
        let id = root.id;
        let root = graph.add_node(root);
        let mut id_index = HashMap::new();
        id_index.insert(id, root);
        Self {
            graph,
            root,
            id_index,
        }
    }

    pub(crate) fn add_child(&mut self, parent: NodeIndex, node: RenderedNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Number of rendered nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, idx: NodeIndex) -> &RenderedNode {
        &self.graph[idx]
    }

    pub fn root_node(&self) -> &RenderedNode {
        &self.graph[self.root]
    }

    /// Look up a rendered node by topic id.
    pub fn get_by_id(&self, id: TopicId) -> Option<&RenderedNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn index_of(&self, id: TopicId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children in document order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Ids of a node's children in document order.
    pub fn child_ids(&self, idx: NodeIndex) -> Vec<TopicId> {
        self.children(idx)
            .into_iter()
            .map(|c| self.graph[c].id)
            .collect()
    }
}
