//! masgraph - CLI entry point.
//!
//! Reads one JSON document from a file argument (or stdin) and writes
//! the graph element list to stdout. A document with an `agents` key is
//! treated as a MAS specification and planned directly; anything else
//! is parsed as an IR and built as-is. Validation violations go to
//! stderr with a non-zero exit.

use std::io::Read;
use std::sync::Arc;

use masgraph::{
    Config, DirectPlanner, GraphBuilder, Ir, MasSpec, TopologyRegistry, ValidationError,
    VisualizationError, VisualizationManager,
};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "masgraph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let input = read_input()?;
    let document: serde_json::Value = serde_json::from_str(&input)?;

    let registry = Arc::new(TopologyRegistry::builtin());
    let builder = GraphBuilder::new(Arc::clone(&registry)).colors(config.colors);

    let graph = if document.get("agents").is_some() {
        let spec: MasSpec = serde_json::from_value(document)?;
        let planner = Arc::new(DirectPlanner::new(config.default_topology.clone()));
        let manager = VisualizationManager::new(planner, builder);
        manager.generate_graph(&spec).await.map_err(|err| {
            if let VisualizationError::Validation(ref validation) = err {
                report_violations(validation);
            }
            anyhow::Error::from(err)
        })?
    } else {
        let ir: Ir = serde_json::from_value(document)?;
        builder.build(&ir).map_err(|err| {
            report_violations(&err);
            anyhow::Error::from(err)
        })?
    };

    let elements = graph.to_elements();
    let output = if config.pretty {
        serde_json::to_string_pretty(&elements)?
    } else {
        serde_json::to_string(&elements)?
    };
    println!("{output}");
    Ok(())
}

fn read_input() -> anyhow::Result<String> {
    match std::env::args().nth(1) {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn report_violations(err: &ValidationError) {
    for violation in &err.violations {
        error!(kind = ?violation.kind(), path = %violation.path(), "{violation}");
    }
}
