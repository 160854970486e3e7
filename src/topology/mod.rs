//! Topology handlers and their registry.
//!
//! A topology handler is a pure function from IR to graph: no shared
//! state, no I/O, same IR in, same nodes and edges out. Handlers are
//! registered under a name at startup; dispatch never needs to change
//! when a new topology is added.
//!
//! # Adding a topology
//! Implement [`Topology`] and register it:
//!
//! ```
//! use std::sync::Arc;
//! use masgraph::topology::{Topology, TopologyRegistry};
//! use masgraph::{Graph, Ir};
//!
//! struct Chain;
//!
//! impl Topology for Chain {
//!     fn name(&self) -> &'static str { "chain" }
//!     fn describe(&self) -> String { "A linear chain.".to_string() }
//!     fn build(&self, ir: &Ir) -> Graph {
//!         let mut expansion = masgraph::topology::expand_instances(ir);
//!         for pair in expansion.all.clone().windows(2) {
//!             expansion.graph.connect(pair[0].clone(), pair[1].clone());
//!         }
//!         expansion.graph
//!     }
//! }
//!
//! let mut registry = TopologyRegistry::builtin();
//! registry.register(Arc::new(Chain)).unwrap();
//! ```

mod hierarchy;
mod mesh;
mod pipeline;
mod ring;
mod small_world;
mod star;

pub use hierarchy::HierarchyTopology;
pub use mesh::MeshTopology;
pub use pipeline::PipelineTopology;
pub use ring::RingTopology;
pub use small_world::SmallWorldTopology;
pub use star::StarTopology;

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::graph::{Graph, GraphNode};
use crate::ir::Ir;

/// Contract for one topology handler.
///
/// `build` may assume a structurally valid IR: malformed documents are
/// rejected by `IrValidator` before dispatch, and a violation surfacing
/// here is an integration bug, not a user error.
pub trait Topology: Send + Sync {
    /// Registry name of this topology.
    fn name(&self) -> &'static str;

    /// Human/LLM-readable description block, consumed by the external
    /// planner when assembling its prompt. Irrelevant to correctness.
    fn describe(&self) -> String;

    /// Expand the IR into concrete nodes and edges.
    fn build(&self, ir: &Ir) -> Graph;
}

/// Registry configuration and lookup failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Two handlers registered under one name: a startup configuration
    /// error, never a request-time condition.
    #[error("topology '{0}' is already registered")]
    DuplicateTopology(String),

    /// Lookup of an unregistered name. Validation prevents this on the
    /// normal path; the registry still fails explicitly for callers
    /// that bypass it.
    #[error("unknown topology '{name}' (available: {available})")]
    UnknownTopology { name: String, available: String },
}

/// Name-to-handler mapping, populated at startup and read-only after.
///
/// Discovery is deliberately explicit: built-ins are listed in
/// [`TopologyRegistry::builtin`], and anything else arrives through
/// [`TopologyRegistry::register`]. No directory scanning, no
/// import-order-dependent globals.
pub struct TopologyRegistry {
    handlers: BTreeMap<String, Arc<dyn Topology>>,
}

impl TopologyRegistry {
    /// An empty registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in topology.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        // Built-in names are distinct by construction, so these inserts
        // bypass the conflict check user registrations go through.
        for handler in [
            Arc::new(HierarchyTopology) as Arc<dyn Topology>,
            Arc::new(StarTopology),
            Arc::new(RingTopology),
            Arc::new(MeshTopology),
            Arc::new(PipelineTopology),
            Arc::new(SmallWorldTopology),
        ] {
            registry.handlers.insert(handler.name().to_string(), handler);
        }
        debug!(topologies = ?registry.names(), "built-in topology registry ready");
        registry
    }

    /// Register an additional handler under its own name.
    pub fn register(&mut self, handler: Arc<dyn Topology>) -> Result<(), RegistryError> {
        let name = handler.name().to_string();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::DuplicateTopology(name));
        }
        debug!(topology = %name, "registered topology handler");
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Look up a handler by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Topology>, RegistryError> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTopology {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// True if a handler is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Concatenated `describe()` blocks of every handler, for the
    /// external planner's prompt.
    pub fn describe_all(&self) -> String {
        self.handlers
            .values()
            .map(|h| format!("### {}\n{}", h.name(), h.describe()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A graph seeded with one node per agent instance, plus the id lists
/// handlers need to wire edges.
pub struct Expansion {
    /// Graph containing all nodes and no edges yet.
    pub graph: Graph,
    /// Normalized group types in declaration order.
    pub order: Vec<String>,
    /// Normalized group type -> instance ids, in instance order.
    pub by_type: BTreeMap<String, Vec<String>>,
    /// Every instance id, in declaration-then-instance order.
    pub all: Vec<String>,
}

/// Expand each group into `count` concrete nodes with deterministic ids
/// `"{normalized_type}_{i}"` (1-based, declaration order).
///
/// Every handler starts here, so id assignment has exactly one home.
pub fn expand_instances(ir: &Ir) -> Expansion {
    debug_assert!(
        !ir.groups.is_empty()
            && ir
                .groups
                .iter()
                .all(|g| g.count >= 1 && !g.normalized_type().is_empty()),
        "topology handler invoked with an unvalidated IR"
    );

    let mut graph = Graph::new();
    let mut order = Vec::with_capacity(ir.groups.len());
    let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut all = Vec::new();

    for group in &ir.groups {
        let normalized = group.normalized_type();
        let mut ids = Vec::with_capacity(group.count.max(0) as usize);
        for i in 1..=group.count.max(0) {
            let id = format!("{normalized}_{i}");
            let mut node = GraphNode::new(id.clone(), group.group_type.clone());
            node.metadata
                .insert("type".to_string(), serde_json::json!(normalized));
            graph.push_node(node);
            all.push(id.clone());
            ids.push(id);
        }
        order.push(normalized.clone());
        by_type.insert(normalized, ids);
    }

    Expansion {
        graph,
        order,
        by_type,
        all,
    }
}
