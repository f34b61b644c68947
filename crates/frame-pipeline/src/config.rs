//! Pipeline Configuration

use crate::frame::FocusRegion;
use crate::PipelineError;
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Environment variable prefix, e.g. `FRAME_PIPELINE__BUFFER_CAPACITY=3`
pub const ENV_PREFIX: &str = "FRAME_PIPELINE";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of frames held in memory at the same time
    pub buffer_capacity: usize,

    /// First frame index to process
    pub start_index: usize,

    /// Last frame index to process (inclusive)
    pub end_index: usize,

    /// Only keep keypoints inside `focus_region`
    pub focus_on_region: bool,

    pub focus_region: FocusRegion,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 2,
            start_index: 0,
            end_index: 9,
            focus_on_region: true,
            focus_region: FocusRegion::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from an optional TOML file, then `FRAME_PIPELINE__*` environment
    /// variables. Unset keys keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("Loading pipeline configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, PipelineError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.end_index < self.start_index {
            return Err(PipelineError::InvalidConfig(format!(
                "end_index {} is before start_index {}",
                self.end_index, self.start_index
            )));
        }
        if self.buffer_capacity < 2 {
            warn!(
                "buffer_capacity {} keeps fewer than two frames, matching is disabled",
                self.buffer_capacity
            );
        }
        Ok(())
    }

    /// Focus region to apply, if enabled
    pub fn active_focus_region(&self) -> Option<FocusRegion> {
        self.focus_on_region.then_some(self.focus_region)
    }

    /// Number of frames between `start_index` and `end_index`
    pub fn frame_count(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }
}
