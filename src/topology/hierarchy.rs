//! Hierarchy topology: a role-leveled tree with fan-out control.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::Graph;
use crate::ir::{normalize_type, Ir};
use crate::topology::{expand_instances, Topology};

/// A multi-level tree. Declaration order of the groups sets the
/// root-to-leaf levels; an explicit `role` of `"root"` or `"leaf"`
/// overrides position (root groups sort first, leaf groups last,
/// everything else keeps declaration order in between).
///
/// Edges come from `connect_to` relations between groups on different
/// levels, always directed parent -> child (parent = the higher level).
/// Children are distributed over parent instances round-robin by
/// instance index; `constraints.branching_factor` caps children per
/// parent, and children beyond `parents x branching_factor` attach to
/// the last parent rather than being dropped. `constraints.max_depth`
/// suppresses edges into levels deeper than the cap; the nodes are
/// still emitted, just orphaned.
pub struct HierarchyTopology;

fn role_rank(role: Option<&str>) -> u8 {
    match role.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
        Some("root") => 0,
        Some("leaf") => 2,
        _ => 1,
    }
}

impl Topology for HierarchyTopology {
    fn name(&self) -> &'static str {
        "hierarchy"
    }

    fn describe(&self) -> String {
        "A tree with explicit levels, such as managers supervising workers. \
         Group order defines the levels top-down; a role of \"root\" or \
         \"leaf\" overrides position. Use connect_to to say which group \
         supervises which, constraints.branching_factor to cap children per \
         parent, and constraints.max_depth to cut the tree off below a level."
            .to_string()
    }

    fn build(&self, ir: &Ir) -> Graph {
        let expansion = expand_instances(ir);
        let mut graph = expansion.graph;

        // Level order: stable sort on role rank, so ties keep
        // declaration order.
        let mut indices: Vec<usize> = (0..ir.groups.len()).collect();
        indices.sort_by_key(|&i| role_rank(ir.groups[i].role.as_deref()));
        let levels: Vec<String> = indices
            .iter()
            .map(|&i| ir.groups[i].normalized_type())
            .collect();
        let level_of: BTreeMap<&str, usize> = levels
            .iter()
            .enumerate()
            .map(|(level, ty)| (ty.as_str(), level))
            .collect();

        // Parent/child relations between group types. connect_to is
        // orientation-agnostic: the higher-level group is always the
        // parent, whichever side named the other.
        let mut relations: Vec<(String, String)> = Vec::new();
        let mut seen = BTreeSet::new();
        for group in &ir.groups {
            let a = group.normalized_type();
            for target in &group.connect_to {
                let b = normalize_type(target);
                if a == b {
                    continue;
                }
                let (parent, child) = if level_of[a.as_str()] <= level_of[b.as_str()] {
                    (a.clone(), b)
                } else {
                    (b, a.clone())
                };
                if seen.insert((parent.clone(), child.clone())) {
                    relations.push((parent, child));
                }
            }
        }
        // No relations declared at all: link adjacent levels.
        if relations.is_empty() {
            for pair in levels.windows(2) {
                relations.push((pair[0].clone(), pair[1].clone()));
            }
        }

        let branching = ir.constraints.branching_factor.map(|v| v as usize);
        let max_depth = ir.constraints.max_depth.map(|v| v as usize);

        for (parent_ty, child_ty) in relations {
            // Depth cut: no edges into levels deeper than max_depth
            // (levels are 1-based here).
            if let Some(depth) = max_depth {
                if level_of[child_ty.as_str()] + 1 > depth {
                    continue;
                }
            }

            let parents = &expansion.by_type[&parent_ty];
            let children = &expansion.by_type[&child_ty];
            let capacity = branching
                .map(|k| k.saturating_mul(parents.len()))
                .unwrap_or(usize::MAX);

            for (j, child) in children.iter().enumerate() {
                let p = if j < capacity {
                    j % parents.len()
                } else {
                    // Fan-out overflow: excess children pile onto the
                    // last parent instead of being dropped.
                    parents.len() - 1
                };
                graph.connect(parents[p].clone(), child.clone());
            }
        }

        graph
    }
}
