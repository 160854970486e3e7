//! Structural validation of incoming IR documents.
//!
//! The planner that produces IR text is an untrusted collaborator: its
//! output always passes through here before it can reach a topology
//! handler. Validation is purely structural; it never judges whether an
//! architecture makes semantic sense.
//!
//! Checks run in a fixed order and short-circuit on the first failing
//! class while collecting every violation of that class, so a caller
//! gets the complete list of (say) invalid groups in one round trip.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::ir::{normalize_type, Ir};
use crate::topology::TopologyRegistry;

/// Machine-readable classification of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    UnknownTopology,
    EmptyGraph,
    InvalidGroup,
    DuplicateGroupType,
    DanglingReference,
    InvalidConstraint,
}

/// One structural problem found in an IR document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("unknown topology '{name}' (available: {available})")]
    UnknownTopology { name: String, available: String },

    #[error("groups is empty: at least one agent group is required")]
    EmptyGraph,

    #[error("groups[{index}].{field} is invalid for group '{group}': {reason}")]
    InvalidGroup {
        index: usize,
        group: String,
        field: &'static str,
        reason: String,
    },

    #[error("groups[{index}].type duplicates group type '{group_type}'")]
    DuplicateGroupType { index: usize, group_type: String },

    #[error("groups[{index}].connect_to on group '{group}' names unknown group type '{target}'")]
    DanglingReference {
        index: usize,
        group: String,
        target: String,
    },

    #[error("constraints.{field} must be an integer >= 1, got {value}")]
    InvalidConstraint { field: &'static str, value: i64 },
}

impl Violation {
    /// The machine-readable kind of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::UnknownTopology { .. } => ViolationKind::UnknownTopology,
            Self::EmptyGraph => ViolationKind::EmptyGraph,
            Self::InvalidGroup { .. } => ViolationKind::InvalidGroup,
            Self::DuplicateGroupType { .. } => ViolationKind::DuplicateGroupType,
            Self::DanglingReference { .. } => ViolationKind::DanglingReference,
            Self::InvalidConstraint { .. } => ViolationKind::InvalidConstraint,
        }
    }

    /// Path of the offending field within the IR document.
    pub fn path(&self) -> String {
        match self {
            Self::UnknownTopology { .. } => "topology".to_string(),
            Self::EmptyGraph => "groups".to_string(),
            Self::InvalidGroup { index, field, .. } => format!("groups[{index}].{field}"),
            Self::DuplicateGroupType { index, .. } => format!("groups[{index}].type"),
            Self::DanglingReference { index, .. } => format!("groups[{index}].connect_to"),
            Self::InvalidConstraint { field, .. } => format!("constraints.{field}"),
        }
    }
}

/// A rejected IR: one or more violations, in check order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("IR validation failed with {n} violation(s); first: {first}",
        n = .violations.len(),
        first = .violations.first().map(|v| v.to_string()).unwrap_or_default())]
pub struct ValidationError {
    /// Non-empty, ordered list of violations.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    fn one(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

/// Stateless structural checker for IR documents.
pub struct IrValidator<'a> {
    registry: &'a TopologyRegistry,
}

impl<'a> IrValidator<'a> {
    /// Create a validator over the given registry.
    pub fn new(registry: &'a TopologyRegistry) -> Self {
        Self { registry }
    }

    /// Check an IR against all structural rules.
    ///
    /// Unknown or extra IR fields never fail validation; they were
    /// already dropped or carried through at deserialization time.
    pub fn validate(&self, ir: &Ir) -> Result<(), ValidationError> {
        // 1. Topology must name a registered handler.
        if ir.topology.trim().is_empty() || !self.registry.contains(&ir.topology) {
            return Err(ValidationError::one(Violation::UnknownTopology {
                name: ir.topology.clone(),
                available: self.registry.names().join(", "),
            }));
        }

        // 2. At least one group.
        if ir.groups.is_empty() {
            return Err(ValidationError::one(Violation::EmptyGraph));
        }

        // 3. Per-group field rules, collected across all groups.
        let mut violations = Vec::new();
        for (index, group) in ir.groups.iter().enumerate() {
            if group.normalized_type().is_empty() {
                violations.push(Violation::InvalidGroup {
                    index,
                    group: group.group_type.clone(),
                    field: "type",
                    reason: "type must be a non-empty identifier".to_string(),
                });
            }
            if group.count < 1 {
                violations.push(Violation::InvalidGroup {
                    index,
                    group: group.group_type.clone(),
                    field: "count",
                    reason: format!("count must be >= 1, got {}", group.count),
                });
            }
        }
        if !violations.is_empty() {
            return Err(self.reject(violations));
        }

        // 4. Group types unique (on the normalized form: two types that
        //    normalize identically would collide in node ids).
        let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
        for (index, group) in ir.groups.iter().enumerate() {
            let normalized = group.normalized_type();
            if first_seen.contains_key(&normalized) {
                violations.push(Violation::DuplicateGroupType {
                    index,
                    group_type: group.group_type.clone(),
                });
            } else {
                first_seen.insert(normalized, index);
            }
        }
        if !violations.is_empty() {
            return Err(self.reject(violations));
        }

        // 5. Every connect_to target must name an existing group.
        for (index, group) in ir.groups.iter().enumerate() {
            for target in &group.connect_to {
                if !first_seen.contains_key(&normalize_type(target)) {
                    violations.push(Violation::DanglingReference {
                        index,
                        group: group.group_type.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        if !violations.is_empty() {
            return Err(self.reject(violations));
        }

        // 6. Recognized constraints must be sane; unrecognized keys pass.
        if let Some(value) = ir.constraints.branching_factor {
            if value < 1 {
                violations.push(Violation::InvalidConstraint {
                    field: "branching_factor",
                    value,
                });
            }
        }
        if let Some(value) = ir.constraints.max_depth {
            if value < 1 {
                violations.push(Violation::InvalidConstraint {
                    field: "max_depth",
                    value,
                });
            }
        }
        if !violations.is_empty() {
            return Err(self.reject(violations));
        }

        Ok(())
    }

    fn reject(&self, violations: Vec<Violation>) -> ValidationError {
        debug!(
            count = violations.len(),
            kind = ?violations[0].kind(),
            "IR rejected"
        );
        ValidationError { violations }
    }
}
