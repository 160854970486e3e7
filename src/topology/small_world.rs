//! Small-world topology: ring lattice with seeded shortcut rewiring.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::Graph;
use crate::ir::Ir;
use crate::topology::{expand_instances, Topology};

const DEFAULT_K: i64 = 4;
const DEFAULT_REWIRING_PROB: f64 = 0.1;
const DEFAULT_SEED: u64 = 7;

/// Watts-Strogatz style network: each instance connects to its `k`
/// nearest ring neighbors, and each local edge is rewired to a random
/// instance with probability `rewiring_prob`.
///
/// Parameters come through the open constraints mapping (`k`,
/// `rewiring_prob`, `seed`); the RNG is seeded from the IR, so the
/// same IR always yields the same edge set.
pub struct SmallWorldTopology;

impl Topology for SmallWorldTopology {
    fn name(&self) -> &'static str {
        "small_world"
    }

    fn describe(&self) -> String {
        "A small-world network with strong local clustering and a few \
         long-range shortcuts, suited to social-style interaction or \
         knowledge diffusion. Constraint keys: k (even local-neighbor \
         count, default 4), rewiring_prob (0.0-1.0, default 0.1), seed \
         (default 7)."
            .to_string()
    }

    fn build(&self, ir: &Ir) -> Graph {
        let expansion = expand_instances(ir);
        let mut graph = expansion.graph;

        let all = &expansion.all;
        let n = all.len();
        if n < 3 {
            return graph;
        }

        let mut k = ir
            .constraints
            .extra_i64("k")
            .unwrap_or(DEFAULT_K)
            .clamp(0, n as i64 - 1) as usize;
        if k % 2 != 0 {
            k -= 1;
        }
        let prob = ir
            .constraints
            .extra_f64("rewiring_prob")
            .unwrap_or(DEFAULT_REWIRING_PROB)
            .clamp(0.0, 1.0);
        let seed = ir
            .constraints
            .extra_i64("seed")
            .map(|s| s as u64)
            .unwrap_or(DEFAULT_SEED);
        let mut rng = StdRng::seed_from_u64(seed);

        for i in 0..n {
            for j in 1..=k / 2 {
                let mut target = &all[(i + j) % n];
                if rng.gen::<f64>() < prob {
                    target = &all[rng.gen_range(0..n)];
                    if target == &all[i] {
                        continue;
                    }
                }
                graph.connect(all[i].clone(), target.clone());
            }
        }
        graph
    }
}
