//! Renderable graph output: the data model, the builder that produces
//! it from an IR, and format-only exporters.

mod builder;
mod model;
mod serializer;

pub use builder::GraphBuilder;
pub use model::{EdgeData, Element, Graph, GraphEdge, GraphNode, NodeData};
pub use serializer::{to_dot, to_mermaid};
