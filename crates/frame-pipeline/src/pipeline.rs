//! Sequential Frame Pipeline

use crate::config::PipelineConfig;
use crate::frame::DataFrame;
use crate::mock::{BrightSpotDetector, NearestMatcher, PatchDescriptor, SyntheticSource};
use crate::stages::{DescriptorExtractor, DescriptorMatcher, ImageSource, KeypointDetector};
use crate::PipelineError;
use ring_buffer::RingBuffer;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of processing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// Source frame index
    pub index: usize,
    /// Keypoints kept after focus region filtering
    pub keypoints: usize,
    /// Matches against the previous frame, `None` until two frames are retained
    pub matches: Option<usize>,
    /// Time spent on detection, description and matching (milliseconds)
    pub elapsed_ms: f64,
}

/// Runs the stages over a frame sequence, retaining the newest frames
pub struct Pipeline {
    config: PipelineConfig,
    buffer: RingBuffer<DataFrame>,
    source: Box<dyn ImageSource>,
    detector: Box<dyn KeypointDetector>,
    extractor: Box<dyn DescriptorExtractor>,
    matcher: Box<dyn DescriptorMatcher>,
}

impl Pipeline {
    /// Create a pipeline from its stages
    pub fn new(
        config: PipelineConfig,
        source: impl ImageSource + 'static,
        detector: impl KeypointDetector + 'static,
        extractor: impl DescriptorExtractor + 'static,
        matcher: impl DescriptorMatcher + 'static,
    ) -> Self {
        info!(
            "Creating frame pipeline: buffer_capacity={}, frames {}..={}",
            config.buffer_capacity, config.start_index, config.end_index
        );
        Self {
            buffer: RingBuffer::new(config.buffer_capacity),
            config,
            source: Box::new(source),
            detector: Box::new(detector),
            extractor: Box::new(extractor),
            matcher: Box::new(matcher),
        }
    }

    /// Create a pipeline wired to the mock stages
    pub fn new_mock(config: PipelineConfig) -> Self {
        warn!("No vision backend configured. Using mock stages.");
        let source = SyntheticSource::road(config.end_index + 1);
        Self::new(
            config,
            source,
            BrightSpotDetector::default(),
            PatchDescriptor::default(),
            NearestMatcher,
        )
    }

    /// Process a single frame
    pub fn step(&mut self, index: usize) -> Result<FrameReport, PipelineError> {
        let image = self.source.load(index)?;
        self.buffer.insert(DataFrame::new(index, image));

        let started = Instant::now();

        let Some(frame) = self.buffer.newest_mut() else {
            debug!("Frame {} not retained by zero-capacity buffer", index);
            return Ok(FrameReport {
                index,
                keypoints: 0,
                matches: None,
                elapsed_ms: 0.0,
            });
        };

        let mut keypoints = self.detector.detect(&frame.image);
        if let Some(region) = self.config.active_focus_region() {
            let detected = keypoints.len();
            keypoints.retain(|kp| region.contains(kp));
            debug!(
                "Frame {}: kept {} of {} keypoints in focus region",
                index,
                keypoints.len(),
                detected
            );
        }
        frame.descriptors = self.extractor.describe(&keypoints, &frame.image);
        frame.keypoints = keypoints;
        let keypoint_count = frame.keypoints.len();

        let matches = if self.buffer.len() > 1 {
            let matches = self
                .matcher
                .match_descriptors(self.buffer.from_end(1), self.buffer.from_end(0));
            let count = matches.len();
            self.buffer.from_end_mut(0).matches = matches;
            Some(count)
        } else {
            None
        };

        Ok(FrameReport {
            index,
            keypoints: keypoint_count,
            matches,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Process every configured frame in order
    pub fn run(&mut self) -> Result<Vec<FrameReport>, PipelineError> {
        let mut reports = Vec::with_capacity(self.config.frame_count());
        for index in self.config.start_index..=self.config.end_index {
            reports.push(self.step(index)?);
        }
        info!("Processed {} frames", reports.len());
        Ok(reports)
    }

    /// Frames currently retained, oldest first
    pub fn buffer(&self) -> &RingBuffer<DataFrame> {
        &self.buffer
    }

    /// Configuration the pipeline was built with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
