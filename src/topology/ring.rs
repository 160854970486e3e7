//! Ring topology: one circular chain over every instance.

use crate::graph::Graph;
use crate::ir::Ir;
use crate::topology::{expand_instances, Topology};

/// All instances, in declaration then instance order, form one cycle:
/// instance i -> instance (i + 1) mod N. Exactly N edges for N >= 2
/// instances; a single instance yields no edges rather than a self-loop.
pub struct RingTopology;

impl Topology for RingTopology {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn describe(&self) -> String {
        "A closed circular chain over every agent instance. Each instance \
         passes to exactly one successor and the last wraps around to the \
         first, giving peer-to-peer turn-taking with no central coordinator."
            .to_string()
    }

    fn build(&self, ir: &Ir) -> Graph {
        let expansion = expand_instances(ir);
        let mut graph = expansion.graph;

        let n = expansion.all.len();
        if n < 2 {
            return graph;
        }
        for i in 0..n {
            graph.connect(expansion.all[i].clone(), expansion.all[(i + 1) % n].clone());
        }
        graph
    }
}
