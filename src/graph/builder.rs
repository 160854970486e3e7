//! Orchestration of validation, handler dispatch, and the metadata
//! post-pass.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::graph::Graph;
use crate::ir::{Ir, IrValidator, ValidationError, Violation};
use crate::topology::TopologyRegistry;

/// Fixed palette; a stable hash of the group type picks the slot, so
/// the same type gets the same color across runs and across graphs.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

fn fnv1a(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Turns a validated IR into a renderable graph.
///
/// `build` is stateless per call: it validates, dispatches to the
/// registered handler, then runs one uniform post-pass that merges each
/// group's `attributes` into its nodes' metadata. The post-pass is the
/// same for every topology, so new handlers support the attribute
/// mechanism without doing anything.
pub struct GraphBuilder {
    registry: Arc<TopologyRegistry>,
    colors: bool,
}

impl GraphBuilder {
    /// Create a builder over the given registry.
    pub fn new(registry: Arc<TopologyRegistry>) -> Self {
        Self {
            registry,
            colors: true,
        }
    }

    /// Enable or disable the per-type color metadata.
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Build a graph from the IR, or fail with every violation the
    /// validator found. No partial graph is ever returned.
    pub fn build(&self, ir: &Ir) -> Result<Graph, ValidationError> {
        IrValidator::new(&self.registry).validate(ir)?;

        // Cannot fail after validation; kept as an explicit error path
        // rather than a panic for callers holding a stale registry.
        let handler = self.registry.resolve(&ir.topology).map_err(|_| ValidationError {
            violations: vec![Violation::UnknownTopology {
                name: ir.topology.clone(),
                available: self.registry.names().join(", "),
            }],
        })?;

        let mut graph = handler.build(ir);
        debug_assert_eq!(
            graph.node_count() as i64,
            ir.total_instances(),
            "handler must emit one node per agent instance"
        );

        self.apply_metadata(ir, &mut graph);
        debug!(
            topology = %ir.topology,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(graph)
    }

    /// Merge group attributes (and the color tag) into node metadata.
    /// Group attributes win over the generated color.
    fn apply_metadata(&self, ir: &Ir, graph: &mut Graph) {
        let groups: BTreeMap<String, _> = ir
            .groups
            .iter()
            .map(|g| (g.normalized_type(), g))
            .collect();

        for node in graph.nodes_mut() {
            let Some(ty) = node
                .metadata
                .get("type")
                .and_then(|v| v.as_str())
                .map(str::to_string)
            else {
                continue;
            };
            if self.colors {
                let color = PALETTE[(fnv1a(&ty) % PALETTE.len() as u64) as usize];
                node.metadata
                    .insert("color".to_string(), serde_json::json!(color));
            }
            if let Some(group) = groups.get(&ty) {
                for (key, value) in &group.attributes {
                    node.metadata.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(Arc::new(TopologyRegistry::builtin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AgentGroup, ViolationKind};
    use std::collections::HashSet;

    fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    fn star_ir() -> Ir {
        Ir::new(
            "star",
            vec![AgentGroup::new("Hub", 1), AgentGroup::new("Leaf", 3)],
        )
    }

    #[test]
    fn test_star_example_scenario() {
        let graph = builder().build(&star_ir()).unwrap();

        let ids: Vec<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["hub_1", "leaf_1", "leaf_2", "leaf_3"]);
        assert_eq!(graph.edge_count(), 3);
        for i in 1..=3 {
            assert!(graph.contains_edge(&format!("leaf_{i}"), "hub_1"));
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let b = builder();
        for topology in ["hierarchy", "star", "ring", "mesh", "pipeline", "small_world"] {
            let ir = Ir::new(
                topology,
                vec![AgentGroup::new("Front", 2), AgentGroup::new("Back", 5)],
            );
            let first = b.build(&ir).unwrap();
            let second = b.build(&ir).unwrap();
            assert_eq!(first, second, "{topology} must be deterministic");
        }
    }

    #[test]
    fn test_node_totality_and_no_dangling_edges() {
        let b = builder();
        for topology in ["hierarchy", "star", "ring", "mesh", "pipeline", "small_world"] {
            let ir = Ir::new(
                topology,
                vec![AgentGroup::new("Alpha", 3), AgentGroup::new("Beta", 4)],
            );
            let graph = b.build(&ir).unwrap();
            assert_eq!(
                graph.node_count() as i64,
                ir.total_instances(),
                "{topology} node totality"
            );

            let ids: HashSet<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
            for edge in graph.edges() {
                assert!(ids.contains(edge.source.as_str()), "{topology} dangling source");
                assert!(ids.contains(edge.target.as_str()), "{topology} dangling target");
            }
        }
    }

    #[test]
    fn test_validation_failure_returns_no_partial_graph() {
        let mut leaf = AgentGroup::new("Leaf", 3);
        leaf.connect_to = vec!["Missing".to_string()];
        let ir = Ir::new("star", vec![AgentGroup::new("Hub", 1), leaf]);

        let err = builder().build(&ir).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind(), ViolationKind::DanglingReference);
    }

    #[test]
    fn test_attributes_merge_into_metadata() {
        let mut hub = AgentGroup::new("Hub", 1);
        hub.attributes
            .insert("tier".to_string(), serde_json::json!("control"));
        hub.attributes
            .insert("color".to_string(), serde_json::json!("#000000"));
        let ir = Ir::new("star", vec![hub, AgentGroup::new("Leaf", 2)]);

        let graph = builder().build(&ir).unwrap();
        let hub_node = &graph.nodes()[0];
        assert_eq!(hub_node.metadata["tier"], serde_json::json!("control"));
        // Explicit attributes override the generated color.
        assert_eq!(hub_node.metadata["color"], serde_json::json!("#000000"));

        let leaf_node = &graph.nodes()[1];
        assert!(leaf_node.metadata.get("tier").is_none());
        assert!(leaf_node.metadata.get("color").is_some());
    }

    #[test]
    fn test_same_type_same_color_across_graphs() {
        let b = builder();
        let one = b.build(&star_ir()).unwrap();
        let two = b
            .build(&Ir::new("ring", vec![AgentGroup::new("Leaf", 2)]))
            .unwrap();
        assert_eq!(
            one.nodes()[1].metadata["color"],
            two.nodes()[0].metadata["color"]
        );
    }

    #[test]
    fn test_colors_can_be_disabled() {
        let graph = GraphBuilder::default()
            .colors(false)
            .build(&star_ir())
            .unwrap();
        assert!(graph.nodes().iter().all(|n| !n.metadata.contains_key("color")));
    }
}
