//! # masgraph
//!
//! Deterministic topology engine for multi-agent system visualization.
//!
//! This library turns a structured description of a multi-agent system
//! (agent groups, counts, a topology name, optional constraints) into a
//! renderable graph: nodes and edges, ready for any graph front end.
//! Everything is deterministic: the same IR always yields the same
//! node ids and the same edge set.
//!
//! ## Pipeline
//!
//! ```text
//!   MAS spec ──► GraphPlanner ──► IR ──► IrValidator ──► TopologyRegistry
//!               (external,                 │                    │
//!                untrusted)                ▼                    ▼
//!                                     violations          handler.build
//!                                                               │
//!                                                               ▼
//!                                      GraphBuilder ──► Graph ──► elements
//! ```
//!
//! The planner (typically LLM-backed) is an external collaborator; its
//! output is untrusted and always passes through validation before a
//! topology handler ever sees it. Handlers are pure functions behind a
//! conflict-checked registry, so new layouts plug in without touching
//! dispatch.
//!
//! ## Modules
//! - `ir`: the intermediate representation and its validator
//! - `topology`: the handler contract, registry, and built-in layouts
//! - `graph`: the output model, the builder, and format exporters
//! - `planner`: the external planning boundary
//! - `manager`: the spec-to-graph façade

pub mod config;
pub mod graph;
pub mod ir;
pub mod manager;
pub mod planner;
pub mod topology;

pub use config::Config;
pub use graph::{Element, Graph, GraphBuilder, GraphEdge, GraphNode};
pub use ir::{
    AgentGroup, Constraints, Ir, IrValidator, ValidationError, Violation, ViolationKind,
};
pub use manager::{VisualizationError, VisualizationManager};
pub use planner::{AgentRequirement, DirectPlanner, GraphPlanner, MasSpec};
pub use topology::{Topology, TopologyRegistry};
