//! Pipeline Stage Interfaces

use crate::frame::{DataFrame, Descriptor, KeyPoint, KeypointMatch};
use crate::PipelineError;
use image::GrayImage;

/// Produces the grayscale image for a frame index
pub trait ImageSource {
    fn load(&mut self, index: usize) -> Result<GrayImage, PipelineError>;
}

/// Finds keypoints in an image
pub trait KeypointDetector {
    fn detect(&self, image: &GrayImage) -> Vec<KeyPoint>;
}

/// Computes one descriptor per keypoint
pub trait DescriptorExtractor {
    fn describe(&self, keypoints: &[KeyPoint], image: &GrayImage) -> Vec<Descriptor>;
}

/// Matches the descriptors of the previous frame against the current one
pub trait DescriptorMatcher {
    fn match_descriptors(&self, previous: &DataFrame, current: &DataFrame) -> Vec<KeypointMatch>;
}
