//! Mesh topology: every instance talks to every other instance.

use serde_json::Value;

use crate::graph::Graph;
use crate::ir::Ir;
use crate::topology::{expand_instances, Topology};

/// Full mesh over all instances. Each unordered pair is connected once,
/// emitted as two directed edges (A -> B and B -> A) by default, or a
/// single edge per pair when any group carries `attributes.directed =
/// false`. The only handler allowed to emit O(N^2) edges.
pub struct MeshTopology;

impl MeshTopology {
    fn is_undirected(ir: &Ir) -> bool {
        ir.groups
            .iter()
            .any(|g| g.attributes.get("directed") == Some(&Value::Bool(false)))
    }
}

impl Topology for MeshTopology {
    fn name(&self) -> &'static str {
        "mesh"
    }

    fn describe(&self) -> String {
        "A fully connected peer-to-peer network: every agent instance links to \
         every other instance. Set attributes.directed = false on a group to \
         collapse each pair to a single edge. Edge count grows quadratically, \
         so keep instance counts small."
            .to_string()
    }

    fn build(&self, ir: &Ir) -> Graph {
        let expansion = expand_instances(ir);
        let mut graph = expansion.graph;

        let undirected = Self::is_undirected(ir);
        let all = &expansion.all;
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                graph.connect(all[i].clone(), all[j].clone());
                if !undirected {
                    graph.connect(all[j].clone(), all[i].clone());
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::AgentGroup;

    #[test]
    fn test_directed_mesh_edge_count() {
        let ir = Ir::new("mesh", vec![AgentGroup::new("Peer", 4)]);
        let graph = MeshTopology.build(&ir);

        // 4 nodes, C(4,2) = 6 pairs, two directions each.
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 12);
        assert!(graph.contains_edge("peer_1", "peer_4"));
        assert!(graph.contains_edge("peer_4", "peer_1"));
    }

    #[test]
    fn test_undirected_mesh_emits_one_edge_per_pair() {
        let mut group = AgentGroup::new("Peer", 3);
        group
            .attributes
            .insert("directed".to_string(), serde_json::json!(false));
        let ir = Ir::new("mesh", vec![group]);
        let graph = MeshTopology.build(&ir);

        assert_eq!(graph.edge_count(), 3);
        // Lower instance index is always the source.
        assert!(graph.contains_edge("peer_1", "peer_2"));
        assert!(!graph.contains_edge("peer_2", "peer_1"));
    }

    #[test]
    fn test_mesh_spans_groups() {
        let ir = Ir::new(
            "mesh",
            vec![AgentGroup::new("Planner", 1), AgentGroup::new("Critic", 2)],
        );
        let graph = MeshTopology.build(&ir);
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.contains_edge("planner_1", "critic_2"));
        assert!(graph.contains_edge("critic_1", "critic_2"));
    }
}
