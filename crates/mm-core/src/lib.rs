pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod outline;
pub mod structure;

pub use config::{FishboneConfig, LayoutConfig, TimelineConfig};
pub use error::{MindMapError, OutlineError};
pub use id::TopicId;
pub use model::*;
pub use outline::parse_outline;
pub use structure::{Direction, Family, Structure, StructureKind};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
