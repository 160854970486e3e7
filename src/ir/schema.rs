//! IR data model.
//!
//! All types deserialize leniently: unknown fields are ignored (or, for
//! constraints, carried through) so that a newer planner can emit fields
//! an older core does not know about without being rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One homogeneous cluster of agents.
///
/// # Invariants (enforced by `IrValidator`, not by construction)
/// - `count >= 1`
/// - `group_type` is non-empty and unique within one IR
/// - every name in `connect_to` references another group's type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentGroup {
    /// Identifier for this group (e.g. "Teacher").
    #[serde(rename = "type")]
    pub group_type: String,

    /// Number of agent instances in the group.
    #[serde(default = "default_count")]
    pub count: i64,

    /// Optional role tag ("root" / "middle" / "leaf") used by tree-like
    /// topologies to override declaration-order leveling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Types of other groups this group's instances should link to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connect_to: Vec<String>,

    /// Open metadata, merged verbatim into every node of this group.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

fn default_count() -> i64 {
    1
}

impl AgentGroup {
    /// Create a group with just a type and a count (tests and planners).
    pub fn new(group_type: impl Into<String>, count: i64) -> Self {
        Self {
            group_type: group_type.into(),
            count,
            ..Self::default()
        }
    }

    /// The id-safe form of this group's type.
    pub fn normalized_type(&self) -> String {
        normalize_type(&self.group_type)
    }
}

/// Optional layout constraints.
///
/// Only `branching_factor` and `max_depth` are recognized by the
/// built-in topologies; everything else lands in `extra` untouched so
/// custom handlers can define their own knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Constraints {
    /// Maximum children one parent node may receive (tree-like topologies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branching_factor: Option<i64>,

    /// Maximum hierarchy depth, counted in 1-based levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<i64>,

    /// Unrecognized constraint keys, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Constraints {
    /// True when no constraint of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.branching_factor.is_none() && self.max_depth.is_none() && self.extra.is_empty()
    }

    /// Read an extra (non-built-in) constraint as an integer.
    pub fn extra_i64(&self, key: &str) -> Option<i64> {
        self.extra.get(key).and_then(Value::as_i64)
    }

    /// Read an extra constraint as a float.
    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(Value::as_f64)
    }
}

/// The intermediate representation handed to `GraphBuilder`.
///
/// Constructed once per visualization request and never mutated by the
/// core; building a graph reads the IR and produces a fresh `Graph`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ir {
    /// Name of a registered topology handler.
    #[serde(default)]
    pub topology: String,

    /// Agent groups, in declaration order. Order drives deterministic
    /// id numbering and (for tree-like topologies) leveling.
    #[serde(default)]
    pub groups: Vec<AgentGroup>,

    /// Optional layout constraints.
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
}

impl Ir {
    /// Build an IR from a topology name and groups (tests and planners).
    pub fn new(topology: impl Into<String>, groups: Vec<AgentGroup>) -> Self {
        Self {
            topology: topology.into(),
            groups,
            constraints: Constraints::default(),
        }
    }

    /// Same, with constraints attached.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Look up a group by its normalized type.
    pub fn group(&self, normalized: &str) -> Option<&AgentGroup> {
        self.groups
            .iter()
            .find(|g| g.normalized_type() == normalized)
    }

    /// Total number of agent instances across all groups.
    pub fn total_instances(&self) -> i64 {
        self.groups.iter().map(|g| g.count.max(0)).sum()
    }
}

/// Normalize a group type into an id-safe token: lowercase, with every
/// run of non-alphanumeric characters collapsed to a single underscore.
///
/// `"Data Analyst"` becomes `"data_analyst"`, `"Teacher"` becomes
/// `"teacher"`.
pub fn normalize_type(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}
