//! Frame Data Types

use image::GrayImage;
use serde::Deserialize;

/// Detected keypoint in image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPoint {
    pub x: f32,
    pub y: f32,
    /// Diameter of the meaningful neighbourhood
    pub size: f32,
    /// Detector response strength
    pub response: f32,
}

impl KeyPoint {
    pub fn new(x: f32, y: f32, size: f32, response: f32) -> Self {
        Self { x, y, size, response }
    }
}

/// Descriptor of a single keypoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor(pub Vec<u8>);

/// Match between a keypoint of the previous frame and one of the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeypointMatch {
    /// Keypoint index in the previous frame
    pub query_idx: usize,
    /// Keypoint index in the current frame
    pub train_idx: usize,
    pub distance: f32,
}

/// Sensor information available for one time instant
#[derive(Debug, Clone)]
pub struct DataFrame {
    /// Source frame index
    pub index: usize,
    /// Grayscale camera image
    pub image: GrayImage,
    /// Keypoints detected in `image`
    pub keypoints: Vec<KeyPoint>,
    /// One descriptor per keypoint
    pub descriptors: Vec<Descriptor>,
    /// Matches between the previous frame and this one
    pub matches: Vec<KeypointMatch>,
}

impl DataFrame {
    /// Create a frame holding only its image
    pub fn new(index: usize, image: GrayImage) -> Self {
        Self {
            index,
            image,
            keypoints: Vec::new(),
            descriptors: Vec::new(),
            matches: Vec::new(),
        }
    }
}

/// Rectangle that detected keypoints must fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FocusRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for FocusRegion {
    /// Preceding vehicle in the reference road sequence
    fn default() -> Self {
        Self {
            x: 535,
            y: 180,
            width: 180,
            height: 150,
        }
    }
}

impl FocusRegion {
    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, keypoint: &KeyPoint) -> bool {
        let (x0, y0) = (self.x as f32, self.y as f32);
        let (x1, y1) = (x0 + self.width as f32, y0 + self.height as f32);
        keypoint.x >= x0 && keypoint.x < x1 && keypoint.y >= y0 && keypoint.y < y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_region_half_open() {
        let region = FocusRegion {
            x: 10,
            y: 20,
            width: 5,
            height: 5,
        };

        assert!(region.contains(&KeyPoint::new(10.0, 20.0, 1.0, 0.0)));
        assert!(region.contains(&KeyPoint::new(14.9, 24.9, 1.0, 0.0)));
        assert!(!region.contains(&KeyPoint::new(15.0, 22.0, 1.0, 0.0)));
        assert!(!region.contains(&KeyPoint::new(12.0, 25.0, 1.0, 0.0)));
        assert!(!region.contains(&KeyPoint::new(9.9, 22.0, 1.0, 0.0)));
    }

    #[test]
    fn test_new_frame_is_bare() {
        let frame = DataFrame::new(3, GrayImage::new(4, 4));
        assert_eq!(frame.index, 3);
        assert!(frame.keypoints.is_empty());
        assert!(frame.descriptors.is_empty());
        assert!(frame.matches.is_empty());
    }
}
