//! Pipeline topology: ordered stages with fan-in and fan-out.

use std::collections::BTreeSet;

use crate::graph::Graph;
use crate::ir::{normalize_type, Ir};
use crate::topology::{expand_instances, Topology};

/// Forward-only execution stages in group declaration order.
///
/// With no `connect_to` anywhere, every instance forms one linear chain
/// (the default pipeline). Declared relations expand type-level into a
/// full bipartite stage link, oriented from the earlier group to the
/// later one so the result stays a DAG regardless of which side named
/// the other.
pub struct PipelineTopology;

impl Topology for PipelineTopology {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn describe(&self) -> String {
        "An ordered execution pipeline. Groups are stages in declaration \
         order and data flows only forward. Without connect_to, all \
         instances form one linear chain; with connect_to, each relation \
         links every instance of the earlier stage to every instance of the \
         later one, allowing fan-in and fan-out."
            .to_string()
    }

    fn build(&self, ir: &Ir) -> Graph {
        let expansion = expand_instances(ir);
        let mut graph = expansion.graph;

        let has_relations = ir.groups.iter().any(|g| !g.connect_to.is_empty());
        if !has_relations {
            for pair in expansion.all.windows(2) {
                graph.connect(pair[0].clone(), pair[1].clone());
            }
            return graph;
        }

        let stage_of = |ty: &str| expansion.order.iter().position(|t| t == ty);

        let mut seen = BTreeSet::new();
        for group in &ir.groups {
            let a = group.normalized_type();
            for target in &group.connect_to {
                let b = normalize_type(target);
                if a == b {
                    continue;
                }
                // Orient by stage order, not by who named whom.
                let (src_ty, tgt_ty) = match (stage_of(&a), stage_of(&b)) {
                    (Some(sa), Some(sb)) if sa < sb => (a.clone(), b),
                    (Some(_), Some(_)) => (b, a.clone()),
                    _ => continue,
                };
                if !seen.insert((src_ty.clone(), tgt_ty.clone())) {
                    continue;
                }
                for src in &expansion.by_type[&src_ty] {
                    for tgt in &expansion.by_type[&tgt_ty] {
                        graph.connect(src.clone(), tgt.clone());
                    }
                }
            }
        }
        graph
    }
}
