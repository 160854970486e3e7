//! Top-level façade: MAS spec in, renderable graph out.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::graph::{Graph, GraphBuilder};
use crate::ir::ValidationError;
use crate::planner::{GraphPlanner, MasSpec};

/// Failure of the full visualization pipeline.
#[derive(Debug, Error)]
pub enum VisualizationError {
    /// The external planner failed to produce any IR at all.
    #[error("graph planning failed: {0}")]
    Planner(anyhow::Error),

    /// The planner produced an IR, but it is structurally invalid. The
    /// complete violation list is surfaced untouched; a malformed IR is
    /// never repaired or silently replaced.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Drives the pipeline: spec -> planner -> IR -> builder -> graph.
pub struct VisualizationManager {
    planner: Arc<dyn GraphPlanner>,
    builder: GraphBuilder,
}

impl VisualizationManager {
    /// Assemble the façade from a planner and a builder.
    pub fn new(planner: Arc<dyn GraphPlanner>, builder: GraphBuilder) -> Self {
        Self { planner, builder }
    }

    /// Produce a renderable graph for the given MAS specification.
    pub async fn generate_graph(&self, spec: &MasSpec) -> Result<Graph, VisualizationError> {
        debug!(
            agents = spec.agents.len(),
            topology = ?spec.topology,
            "visualization requested"
        );

        let ir = self
            .planner
            .plan(spec)
            .await
            .map_err(VisualizationError::Planner)?;
        debug!(topology = %ir.topology, groups = ir.groups.len(), "planner produced IR");

        let graph = self.builder.build(&ir)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "visualization graph ready"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AgentGroup, Ir, ViolationKind};
    use crate::planner::AgentRequirement;
    use async_trait::async_trait;

    /// Planner stub returning a canned IR (or failing outright).
    struct FixedPlanner(Result<Ir, String>);

    #[async_trait]
    impl GraphPlanner for FixedPlanner {
        async fn plan(&self, _spec: &MasSpec) -> anyhow::Result<Ir> {
            self.0.clone().map_err(|msg| anyhow::anyhow!(msg))
        }
    }

    fn manager(planner: FixedPlanner) -> VisualizationManager {
        VisualizationManager::new(Arc::new(planner), GraphBuilder::default())
    }

    fn spec() -> MasSpec {
        MasSpec {
            agents: vec![AgentRequirement {
                agent_type: "Agent".to_string(),
                count: 3,
                role: None,
                connect_to: vec![],
            }],
            topology: Some("ring".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_happy_path() {
        let ir = Ir::new("ring", vec![AgentGroup::new("Agent", 3)]);
        let graph = manager(FixedPlanner(Ok(ir)))
            .generate_graph(&spec())
            .await
            .unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[tokio::test]
    async fn test_invalid_planner_output_surfaces_violations() {
        // The planner hallucinated a topology; the violations reach the
        // caller unmodified, with no fallback graph.
        let ir = Ir::new("torus", vec![AgentGroup::new("Agent", 3)]);
        let err = manager(FixedPlanner(Ok(ir)))
            .generate_graph(&spec())
            .await
            .unwrap_err();
        match err {
            VisualizationError::Validation(e) => {
                assert_eq!(e.violations.len(), 1);
                assert_eq!(e.violations[0].kind(), ViolationKind::UnknownTopology);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_planner_failure_is_reported() {
        let err = manager(FixedPlanner(Err("model timeout".to_string())))
            .generate_graph(&spec())
            .await
            .unwrap_err();
        assert!(matches!(&err, VisualizationError::Planner(_)));
        assert!(err.to_string().contains("model timeout"));
    }
}
