//! Topic tree model for mind map documents.
//!
//! A document is a rooted, ordered tree of topics stored in a petgraph
//! arena; edges go parent → child. Floating topics are additional roots
//! that are not connected to the main tree. The layout engine only reads
//! this model; collapse state, per-subtree structure overrides and manual
//! pins all live on the topic itself.

use crate::error::MindMapError;
use crate::id::TopicId;
use crate::structure::{Direction, Structure};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Geometry primitives ─────────────────────────────────────────────────

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A measured node size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

// ─── Topics ──────────────────────────────────────────────────────────────

/// A single topic in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,

    /// Label. Passed through untouched; geometry never depends on it.
    pub text: String,

    /// Children exist but are neither laid out nor rendered.
    #[serde(default)]
    pub collapsed: bool,

    /// Structure used for this topic's children (and inherited below).
    #[serde(default)]
    pub structure: Option<Structure>,

    /// Orientation hint; fishbone heads use it to pick the spine side.
    #[serde(default)]
    pub direction_hint: Option<Direction>,

    /// Manual pin: the topic's centre, set by a previous drag.
    #[serde(default)]
    pub position: Option<Point>,

    /// Measured label box. Falls back to the configured node size.
    #[serde(default)]
    pub size: Option<Size>,
}

impl Topic {
    pub fn new(id: TopicId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            collapsed: false,
            structure: None,
            direction_hint: None,
            position: None,
            size: None,
        }
    }

    /// Shorthand for tests and demos: id and label from one string.
    pub fn named(id: &str) -> Self {
        Self::new(TopicId::intern(id), id)
    }

    #[must_use]
    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structure = Some(structure);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction_hint = Some(direction);
        self
    }

    #[must_use]
    pub fn pinned(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }
}

// ─── Mind map document ───────────────────────────────────────────────────

/// The complete document: a main topic tree plus floating topics.
#[derive(Debug, Clone)]
pub struct MindMap {
    /// The underlying directed graph.
    pub graph: StableDiGraph<Topic, ()>,

    /// The central topic.
    pub root: NodeIndex,

    /// Roots of independently placed floating subtrees.
    pub floating: SmallVec<[NodeIndex; 2]>,

    /// Index from TopicId → NodeIndex for fast lookup.
    pub id_index: HashMap<TopicId, NodeIndex>,

    /// Explicit child ordering. When absent for a parent, `children()`
    /// falls back to `NodeIndex` order.
    child_order: HashMap<NodeIndex, Vec<NodeIndex>>,
}

impl MindMap {
    /// Create a document containing only the central topic.
    #[must_use]
    pub fn new(root: Topic) -> Self {
        let mut graph = StableDiGraph::new();
        let id = root.id;
        let root = graph.add_node(root);
        let mut id_index = HashMap::new();
        id_index.insert(id, root);
        Self {
            graph,
            root,
            floating: SmallVec::new(),
            id_index,
            child_order: HashMap::new(),
        }
    }

    /// Append a topic as the last child of `parent`.
    pub fn add_topic(
        &mut self,
        parent: NodeIndex,
        topic: Topic,
    ) -> Result<NodeIndex, MindMapError> {
        let len = self.children(parent).len();
        self.insert_topic(parent, len, topic)
    }

    /// Insert a topic among `parent`'s children at `position` (clamped).
    pub fn insert_topic(
        &mut self,
        parent: NodeIndex,
        position: usize,
        topic: Topic,
    ) -> Result<NodeIndex, MindMapError> {
        if self.id_index.contains_key(&topic.id) {
            return Err(MindMapError::DuplicateId(topic.id));
        }
        let mut order = self.children(parent);
        let id = topic.id;
        let idx = self.graph.add_node(topic);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        order.insert(position.min(order.len()), idx);
        self.child_order.insert(parent, order);
        Ok(idx)
    }

    /// Add a floating topic, laid out independently of the main tree.
    pub fn add_floating(&mut self, topic: Topic) -> Result<NodeIndex, MindMapError> {
        if self.id_index.contains_key(&topic.id) {
            return Err(MindMapError::DuplicateId(topic.id));
        }
        let id = topic.id;
        let idx = self.graph.add_node(topic);
        self.id_index.insert(id, idx);
        self.floating.push(idx);
        Ok(idx)
    }

    /// Remove a topic and its whole subtree. Returns the removed topics in
    /// pre-order.
    pub fn remove_topic(&mut self, idx: NodeIndex) -> Result<Vec<Topic>, MindMapError> {
        if idx == self.root {
            return Err(MindMapError::RootImmutable);
        }
        if !self.graph.contains_node(idx) {
            return Err(MindMapError::UnknownIndex(idx.index()));
        }
        if let Some(parent) = self.parent(idx)
            && let Some(order) = self.child_order.get_mut(&parent)
        {
            order.retain(|&c| c != idx);
        }
        self.floating.retain(|&mut f| f != idx);

        let mut doomed = Vec::new();
        self.collect_subtree(idx, &mut doomed);
        let mut removed = Vec::with_capacity(doomed.len());
        for node in doomed {
            self.child_order.remove(&node);
            if let Some(topic) = self.graph.remove_node(node) {
                self.id_index.remove(&topic.id);
                removed.push(topic);
            }
        }
        Ok(removed)
    }

    /// Re-parent `child` under `new_parent` at `position` (clamped).
    ///
    /// Rejects moves that would put a topic inside its own subtree.
    pub fn move_topic(
        &mut self,
        child: NodeIndex,
        new_parent: NodeIndex,
        position: usize,
    ) -> Result<(), MindMapError> {
        if child == self.root {
            return Err(MindMapError::RootImmutable);
        }
        for idx in [child, new_parent] {
            if !self.graph.contains_node(idx) {
                return Err(MindMapError::UnknownIndex(idx.index()));
            }
        }
        let child_id = self.graph[child].id;
        let parent_id = self.graph[new_parent].id;
        if child == new_parent || self.is_ancestor_of(child_id, parent_id) {
            return Err(MindMapError::WouldCycle {
                child: child_id,
                new_parent: parent_id,
            });
        }

        if let Some(old_parent) = self.parent(child) {
            if let Some(edge) = self.graph.find_edge(old_parent, child) {
                self.graph.remove_edge(edge);
            }
            if let Some(order) = self.child_order.get_mut(&old_parent) {
                order.retain(|&c| c != child);
            }
        }
        self.floating.retain(|&mut f| f != child);

        let mut order = self.children(new_parent);
        self.graph.add_edge(new_parent, child, ());
        order.insert(position.min(order.len()), child);
        self.child_order.insert(new_parent, order);
        Ok(())
    }

    /// Look up a topic by its `@id`.
    pub fn get_by_id(&self, id: TopicId) -> Option<&Topic> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Look up a topic mutably by its `@id`.
    pub fn get_by_id_mut(&mut self, id: TopicId) -> Option<&mut Topic> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    /// Get the index for a TopicId.
    pub fn index_of(&self, id: TopicId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Get the parent index of a topic.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children of a topic in document order.
    ///
    /// Sorts by `NodeIndex` when no explicit order was recorded so the
    /// result does not depend on petgraph's adjacency iteration order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        if let Some(order) = self.child_order.get(&idx) {
            return order.clone();
        }

        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Flip a topic's collapse state. Returns the new state.
    pub fn toggle_collapsed(&mut self, id: TopicId) -> Result<bool, MindMapError> {
        let topic = self
            .get_by_id_mut(id)
            .ok_or(MindMapError::UnknownTopic(id))?;
        topic.collapsed = !topic.collapsed;
        Ok(topic.collapsed)
    }

    /// Set or clear the structure override for a topic's children.
    pub fn set_structure(
        &mut self,
        id: TopicId,
        structure: Option<Structure>,
    ) -> Result<(), MindMapError> {
        let topic = self
            .get_by_id_mut(id)
            .ok_or(MindMapError::UnknownTopic(id))?;
        topic.structure = structure;
        Ok(())
    }

    /// Pin a topic's centre to an absolute canvas point.
    pub fn pin(&mut self, id: TopicId, x: f32, y: f32) -> Result<(), MindMapError> {
        let topic = self
            .get_by_id_mut(id)
            .ok_or(MindMapError::UnknownTopic(id))?;
        topic.position = Some(Point::new(x, y));
        Ok(())
    }

    /// Drop a manual pin, returning the topic to computed placement.
    pub fn unpin(&mut self, id: TopicId) -> Result<Option<Point>, MindMapError> {
        let topic = self
            .get_by_id_mut(id)
            .ok_or(MindMapError::UnknownTopic(id))?;
        Ok(topic.position.take())
    }

    /// Check if `ancestor_id` is a parent/grandparent/etc. of `descendant_id`.
    pub fn is_ancestor_of(&self, ancestor_id: TopicId, descendant_id: TopicId) -> bool {
        if ancestor_id == descendant_id {
            return false;
        }
        let mut current = match self.index_of(descendant_id) {
            Some(idx) => idx,
            None => return false,
        };
        let mut steps = 0;
        while let Some(parent) = self.parent(current) {
            if self.graph[parent].id == ancestor_id {
                return true;
            }
            steps += 1;
            if steps > self.graph.node_count() {
                break;
            }
            current = parent;
        }
        false
    }

    /// Number of topics reachable from `idx` without descending into a
    /// collapsed topic's children (the topic itself included).
    pub fn visible_count(&self, idx: NodeIndex) -> usize {
        let mut count = 0;
        let mut stack = vec![idx];
        while let Some(node) = stack.pop() {
            count += 1;
            if !self.graph[node].collapsed {
                stack.extend(self.children(node));
            }
        }
        count
    }

    fn collect_subtree(&self, idx: NodeIndex, out: &mut Vec<NodeIndex>) {
        out.push(idx);
        for child in self.children(idx) {
            self.collect_subtree(child, out);
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
