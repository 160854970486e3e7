//! Star topology: one hub, everything else reports to it.

use crate::graph::Graph;
use crate::ir::Ir;
use crate::topology::{expand_instances, Topology};

/// A central hub with every other instance connected directly to it.
///
/// The first group in the IR is the hub group; if it has more than one
/// instance, only its first instance acts as hub and the rest become
/// satellites like everyone else. Edge direction is satellite -> hub.
pub struct StarTopology;

impl Topology for StarTopology {
    fn name(&self) -> &'static str {
        "star"
    }

    fn describe(&self) -> String {
        "A star-shaped structure with a single central hub, commonly used for \
         coordinator, orchestrator, or router agents. The first group supplies \
         the hub; every other agent instance gets exactly one edge pointing at \
         it. No edges exist between satellites."
            .to_string()
    }

    fn build(&self, ir: &Ir) -> Graph {
        let expansion = expand_instances(ir);
        let mut graph = expansion.graph;

        let hub = expansion.all[0].clone();
        for satellite in expansion.all.iter().skip(1) {
            graph.connect(satellite.clone(), hub.clone());
        }
        graph
    }
}
