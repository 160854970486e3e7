//! Format-only graph exports: Mermaid and DOT.
//!
//! These know nothing about the MAS domain, only about nodes and edges.
//! The primary wire format (the element list) lives on
//! [`Graph::to_elements`](crate::graph::Graph::to_elements).

use crate::graph::Graph;

/// Render the graph as a Mermaid flowchart (`graph TD`).
pub fn to_mermaid(graph: &Graph) -> String {
    let mut lines = vec!["graph TD".to_string()];
    for node in graph.nodes() {
        lines.push(format!("    {}[\"{}\"]", node.id, escape(&node.label)));
    }
    for edge in graph.edges() {
        lines.push(format!("    {} --> {}", edge.source, edge.target));
    }
    lines.join("\n")
}

/// Render the graph in DOT (GraphViz) format.
pub fn to_dot(graph: &Graph) -> String {
    let mut lines = vec!["digraph mas {".to_string(), "  rankdir=LR;".to_string()];
    for node in graph.nodes() {
        lines.push(format!("  \"{}\" [label=\"{}\"];", node.id, escape(&node.label)));
    }
    for edge in graph.edges() {
        lines.push(format!("  \"{}\" -> \"{}\";", edge.source, edge.target));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphNode;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.push_node(GraphNode::new("teacher_1", "Teacher"));
        graph.push_node(GraphNode::new("student_1", "Student"));
        graph.connect("teacher_1", "student_1");
        graph
    }

    #[test]
    fn test_mermaid_output() {
        assert_eq!(
            to_mermaid(&sample()),
            "graph TD\n    teacher_1[\"Teacher\"]\n    student_1[\"Student\"]\n    teacher_1 --> student_1"
        );
    }

    #[test]
    fn test_dot_output() {
        let dot = to_dot(&sample());
        assert!(dot.starts_with("digraph mas {"));
        assert!(dot.contains("  \"teacher_1\" [label=\"Teacher\"];"));
        assert!(dot.contains("  \"teacher_1\" -> \"student_1\";"));
        assert!(dot.ends_with("}"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut graph = Graph::new();
        graph.push_node(GraphNode::new("a_1", "Say \"hi\""));
        assert!(to_dot(&graph).contains("label=\"Say \\\"hi\\\"\""));
    }
}
