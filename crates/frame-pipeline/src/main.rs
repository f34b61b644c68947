//! Frame Pipeline - Main Entry Point

use anyhow::Context;
use frame_pipeline::{init_logging, Pipeline, PipelineConfig};
use std::path::PathBuf;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Frame Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = PipelineConfig::load(config_path.as_deref())
        .context("failed to load pipeline configuration")?;

    let mut pipeline = Pipeline::new_mock(config);
    info!("Pipeline configuration: {:?}", pipeline.config());
    for report in pipeline.run()? {
        info!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
