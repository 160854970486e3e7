//! The external planning collaborator boundary.
//!
//! Translating a free-form MAS specification into IR text is someone
//! else's job (typically an LLM-backed service). The core only defines
//! the seam: a [`GraphPlanner`] produces an [`Ir`] for a [`MasSpec`],
//! and whatever it returns is treated as untrusted until `IrValidator`
//! has passed it. [`DirectPlanner`] is the one in-repo implementation:
//! a deterministic, LLM-free mapping for hosts that already know their
//! groups and topology.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ir::{AgentGroup, Ir};

/// One requested agent cluster inside a MAS specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequirement {
    /// Agent kind (e.g. "Teacher").
    #[serde(rename = "type")]
    pub agent_type: String,

    /// How many instances of this kind.
    #[serde(default = "default_count")]
    pub count: i64,

    /// Optional role hint for tree-like topologies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Kinds this one should link to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connect_to: Vec<String>,
}

fn default_count() -> i64 {
    1
}

/// The MAS specification handed in by the host application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasSpec {
    /// Requested agent clusters.
    #[serde(default)]
    pub agents: Vec<AgentRequirement>,

    /// Requested topology name, if the user picked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<String>,

    /// Free-form description, consumed only by LLM-backed planners.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Produces an IR for a MAS specification.
///
/// Implementations may do I/O (an LLM round trip); this is the only
/// async seam in the pipeline. Output is untrusted by contract: the
/// caller must run it through validation, never repair it.
#[async_trait]
pub trait GraphPlanner: Send + Sync {
    /// Produce an IR for the given spec.
    async fn plan(&self, spec: &MasSpec) -> anyhow::Result<Ir>;
}

/// Deterministic planner that maps the spec straight onto an IR:
/// agents become groups one for one, and the topology is the requested
/// one or a configured default.
pub struct DirectPlanner {
    default_topology: String,
}

impl DirectPlanner {
    /// Create a planner falling back to the given topology when the
    /// spec does not request one.
    pub fn new(default_topology: impl Into<String>) -> Self {
        Self {
            default_topology: default_topology.into(),
        }
    }
}

impl Default for DirectPlanner {
    fn default() -> Self {
        Self::new("star")
    }
}

#[async_trait]
impl GraphPlanner for DirectPlanner {
    async fn plan(&self, spec: &MasSpec) -> anyhow::Result<Ir> {
        let topology = spec
            .topology
            .clone()
            .unwrap_or_else(|| self.default_topology.clone());
        debug!(topology = %topology, agents = spec.agents.len(), "direct planning");

        let groups = spec
            .agents
            .iter()
            .map(|agent| AgentGroup {
                group_type: agent.agent_type.clone(),
                count: agent.count,
                role: agent.role.clone(),
                connect_to: agent.connect_to.clone(),
                attributes: Default::default(),
            })
            .collect();

        Ok(Ir::new(topology, groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(topology: Option<&str>) -> MasSpec {
        MasSpec {
            agents: vec![
                AgentRequirement {
                    agent_type: "Manager".to_string(),
                    count: 1,
                    role: Some("root".to_string()),
                    connect_to: vec!["Worker".to_string()],
                },
                AgentRequirement {
                    agent_type: "Worker".to_string(),
                    count: 4,
                    role: None,
                    connect_to: vec![],
                },
            ],
            topology: topology.map(str::to_string),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_direct_planner_maps_agents_to_groups() {
        let ir = DirectPlanner::default()
            .plan(&spec(Some("hierarchy")))
            .await
            .unwrap();

        assert_eq!(ir.topology, "hierarchy");
        assert_eq!(ir.groups.len(), 2);
        assert_eq!(ir.groups[0].role.as_deref(), Some("root"));
        assert_eq!(ir.groups[0].connect_to, vec!["Worker"]);
        assert_eq!(ir.groups[1].count, 4);
    }

    #[tokio::test]
    async fn test_direct_planner_falls_back_to_default_topology() {
        let ir = DirectPlanner::new("ring").plan(&spec(None)).await.unwrap();
        assert_eq!(ir.topology, "ring");
    }

    #[test]
    fn test_mas_spec_wire_shape() {
        let spec: MasSpec = serde_json::from_str(
            r#"{"agents": [{"type": "Student", "count": 100}], "topology": "small_world"}"#,
        )
        .unwrap();
        assert_eq!(spec.agents[0].agent_type, "Student");
        assert_eq!(spec.agents[0].count, 100);
        assert_eq!(spec.topology.as_deref(), Some("small_world"));
    }
}
