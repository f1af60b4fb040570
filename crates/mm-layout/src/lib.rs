//! Layout engine for mind map documents.
//!
//! [`layout`] turns a `MindMap` and a structure into a [`LayoutTree`] of
//! positioned, sized nodes. Each topic's children are placed by the
//! strategy its resolved structure selects, so subtrees can switch family
//! (an org-chart branch under a fishbone rib, say).

mod branch;
pub mod engine;
pub mod error;
pub mod extent;
pub mod fishbone;
pub mod radial;
pub mod resolve;
mod timeline;
pub mod traverse;
pub mod tree;

pub use engine::{DocumentLayout, layout, layout_document, layout_subtree};
pub use error::LayoutError;
pub use extent::Axis;
pub use resolve::{Resolved, Strategy};
pub use traverse::{
    ancestors, bounding_box, descendants, find_by_id, flatten, preorder, tree_bounds,
};
pub use tree::{Bounds, LayoutTree, RenderedNode, Side};
