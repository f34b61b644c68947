//! Mock Stage Implementations
//!
//! Deterministic stand-ins for the computer-vision stages, used by tests and
//! the demo binary when no real backend is wired in.

use crate::frame::{DataFrame, Descriptor, KeyPoint, KeypointMatch};
use crate::stages::{DescriptorExtractor, DescriptorMatcher, ImageSource, KeypointDetector};
use crate::PipelineError;
use image::{GrayImage, Luma};

/// Spacing of the bright dots in synthetic images (pixels)
const DOT_SPACING: u32 = 24;

/// Dot grid that scrolls right by `shift_per_frame` pixels each frame
pub struct SyntheticSource {
    width: u32,
    height: u32,
    frames: usize,
    shift_per_frame: u32,
}

impl SyntheticSource {
    /// Source producing `frames` images of `width` x `height`
    pub fn new(width: u32, height: u32, frames: usize) -> Self {
        Self {
            width,
            height,
            frames,
            shift_per_frame: 3,
        }
    }

    /// Road camera sized source (1242x375)
    pub fn road(frames: usize) -> Self {
        Self::new(1242, 375, frames)
    }
}

impl ImageSource for SyntheticSource {
    fn load(&mut self, index: usize) -> Result<GrayImage, PipelineError> {
        if index >= self.frames {
            return Err(PipelineError::Source {
                index,
                reason: format!("synthetic source only has {} frames", self.frames),
            });
        }

        let shift = (index as u32).wrapping_mul(self.shift_per_frame) % DOT_SPACING;
        Ok(GrayImage::from_fn(self.width, self.height, |x, y| {
            let on_dot = (x + DOT_SPACING - shift) % DOT_SPACING < 2 && y % DOT_SPACING < 2;
            Luma([if on_dot { 255 } else { 0 }])
        }))
    }
}

/// Reports every pixel at or above `threshold` as a keypoint
pub struct BrightSpotDetector {
    pub threshold: u8,
}

impl Default for BrightSpotDetector {
    fn default() -> Self {
        Self { threshold: 200 }
    }
}

impl KeypointDetector for BrightSpotDetector {
    fn detect(&self, image: &GrayImage) -> Vec<KeyPoint> {
        image
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel[0] >= self.threshold)
            .map(|(x, y, pixel)| KeyPoint::new(x as f32, y as f32, 1.0, pixel[0] as f32))
            .collect()
    }
}

/// Raw intensities of the square patch around each keypoint, clamped at the
/// image border
pub struct PatchDescriptor {
    pub radius: u32,
}

impl Default for PatchDescriptor {
    fn default() -> Self {
        Self { radius: 2 }
    }
}

impl DescriptorExtractor for PatchDescriptor {
    fn describe(&self, keypoints: &[KeyPoint], image: &GrayImage) -> Vec<Descriptor> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let r = self.radius as i64;

        keypoints
            .iter()
            .map(|kp| {
                let (cx, cy) = (kp.x as i64, kp.y as i64);
                let mut bytes = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
                for dy in -r..=r {
                    for dx in -r..=r {
                        let x = (cx + dx).clamp(0, width as i64 - 1) as u32;
                        let y = (cy + dy).clamp(0, height as i64 - 1) as u32;
                        bytes.push(image.get_pixel(x, y)[0]);
                    }
                }
                Descriptor(bytes)
            })
            .collect()
    }
}

/// Nearest neighbour by sum of absolute differences, one match per previous
/// descriptor
#[derive(Default)]
pub struct NearestMatcher;

impl DescriptorMatcher for NearestMatcher {
    fn match_descriptors(&self, previous: &DataFrame, current: &DataFrame) -> Vec<KeypointMatch> {
        previous
            .descriptors
            .iter()
            .enumerate()
            .filter_map(|(query_idx, query)| {
                current
                    .descriptors
                    .iter()
                    .enumerate()
                    .map(|(train_idx, train)| (train_idx, sad(query, train)))
                    .min_by_key(|&(_, distance)| distance)
                    .map(|(train_idx, distance)| KeypointMatch {
                        query_idx,
                        train_idx,
                        distance: distance as f32,
                    })
            })
            .collect()
    }
}

fn sad(a: &Descriptor, b: &Descriptor) -> u32 {
    a.0.iter()
        .zip(&b.0)
        .map(|(&x, &y)| x.abs_diff(y) as u32)
        .sum()
}
