//! Graph data model and the wire element format.
//!
//! A `Graph` is the sole output artifact of the core: an ordered list of
//! nodes followed by an ordered list of directed edges. The wire shape
//! consumed by rendering clients is a flat element list where each entry
//! wraps its payload in a `data` object; `Graph::to_elements` produces
//! it with all node entries ahead of all edge entries.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One visual node.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Unique id within the graph, `"{normalized_type}_{i}"` with a
    /// 1-based instance index.
    pub id: String,
    /// Display label; defaults to the originating group's type.
    pub label: String,
    /// Open metadata merged from the originating group's attributes.
    pub metadata: BTreeMap<String, Value>,
}

impl GraphNode {
    /// Create a node with empty metadata.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// One directed connection between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// The output artifact: nodes plus directed edges.
///
/// # Invariants
/// - node ids are unique
/// - no self-loops
/// - no duplicate (source, target) pairs
///
/// The duplicate and self-loop rules are enforced at insertion time so
/// every topology handler gets them uniformly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    edge_index: HashSet<(String, String)>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Caller guarantees id uniqueness (ids derived from
    /// a validated IR are unique by construction).
    pub fn push_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    /// Add a directed edge. Self-loops and duplicate pairs are dropped;
    /// returns whether the edge was actually added.
    pub fn connect(&mut self, source: impl Into<String>, target: impl Into<String>) -> bool {
        let source = source.into();
        let target = target.into();
        if source == target {
            return false;
        }
        let key = (source.clone(), target.clone());
        if !self.edge_index.insert(key) {
            return false;
        }
        self.edges.push(GraphEdge { source, target });
        true
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Mutable access for the builder's metadata post-pass.
    pub(crate) fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if a node with this id exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// True if the directed edge exists.
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edge_index
            .contains(&(source.to_string(), target.to_string()))
    }

    /// Flatten into the wire element list: every node entry, then every
    /// edge entry, preserving insertion order within each kind.
    pub fn to_elements(&self) -> Vec<Element> {
        let mut elements = Vec::with_capacity(self.nodes.len() + self.edges.len());
        for node in &self.nodes {
            elements.push(Element::Node {
                data: NodeData {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    metadata: node.metadata.clone(),
                },
            });
        }
        for edge in &self.edges {
            elements.push(Element::Edge {
                data: EdgeData {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                },
            });
        }
        elements
    }
}

/// Payload of a node wire entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    /// Extra metadata keys are flattened next to id/label.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

/// Payload of an edge wire entry.
///
/// `deny_unknown_fields` keeps the untagged dispatch unambiguous: a
/// node entry (which always carries `id`) can never parse as an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
}

/// One wire entry, either a node or an edge, each wrapped in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Edge { data: EdgeData },
    Node { data: NodeData },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_self_loops_and_duplicates() {
        let mut graph = Graph::new();
        graph.push_node(GraphNode::new("a_1", "A"));
        graph.push_node(GraphNode::new("a_2", "A"));

        assert!(graph.connect("a_1", "a_2"));
        assert!(!graph.connect("a_1", "a_2"), "duplicate pair dropped");
        assert!(!graph.connect("a_1", "a_1"), "self-loop dropped");
        assert!(graph.connect("a_2", "a_1"), "reverse direction is distinct");
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_elements_nodes_precede_edges() {
        let mut graph = Graph::new();
        graph.push_node(GraphNode::new("hub_1", "Hub"));
        graph.push_node(GraphNode::new("leaf_1", "Leaf"));
        graph.connect("leaf_1", "hub_1");

        let elements = graph.to_elements();
        assert_eq!(elements.len(), 3);
        assert!(matches!(elements[0], Element::Node { .. }));
        assert!(matches!(elements[1], Element::Node { .. }));
        assert!(matches!(elements[2], Element::Edge { .. }));
    }

    #[test]
    fn test_wire_shape() {
        let mut node = GraphNode::new("hub_1", "Hub");
        node.metadata
            .insert("type".to_string(), serde_json::json!("hub"));
        let mut graph = Graph::new();
        graph.push_node(node);
        graph.push_node(GraphNode::new("leaf_1", "Leaf"));
        graph.connect("leaf_1", "hub_1");

        let json = serde_json::to_value(graph.to_elements()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"data": {"id": "hub_1", "label": "Hub", "type": "hub"}},
                {"data": {"id": "leaf_1", "label": "Leaf"}},
                {"data": {"source": "leaf_1", "target": "hub_1"}}
            ])
        );
    }

    #[test]
    fn test_elements_round_trip_distinguishes_kinds() {
        let raw = r##"[
            {"data": {"id": "a_1", "label": "A", "color": "#1f77b4"}},
            {"data": {"source": "a_1", "target": "b_1"}}
        ]"##;
        let elements: Vec<Element> = serde_json::from_str(raw).unwrap();
        assert!(matches!(elements[0], Element::Node { .. }));
        assert!(matches!(elements[1], Element::Edge { .. }));
    }
}
