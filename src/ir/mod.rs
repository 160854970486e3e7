//! Intermediate representation of a multi-agent system.
//!
//! The IR is the unit of work handed from the planning collaborator into
//! the core: a topology name, an ordered list of agent groups, and
//! optional constraints. It describes what the system looks like
//! logically, not how it is laid out as a graph.

mod schema;
mod validator;

pub use schema::{normalize_type, AgentGroup, Constraints, Ir};
pub use validator::{IrValidator, ValidationError, Violation, ViolationKind};
