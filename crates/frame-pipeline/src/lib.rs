//! Frame Pipeline
//!
//! Runs a sequential camera pipeline that keeps the most recent frames in a
//! ring buffer and matches keypoints between the two newest ones.
//! Supports:
//! - Pluggable image source, keypoint detector, descriptor extractor and matcher
//! - Focus region filtering of detected keypoints
//! - Per-frame timing reports

pub mod config;
pub mod frame;
pub mod mock;
pub mod pipeline;
pub mod stages;

pub use config::PipelineConfig;
pub use frame::{DataFrame, Descriptor, FocusRegion, KeyPoint, KeypointMatch};
pub use pipeline::{FrameReport, Pipeline};
pub use stages::{DescriptorExtractor, DescriptorMatcher, ImageSource, KeypointDetector};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to load frame {index}: {reason}")]
    Source { index: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
