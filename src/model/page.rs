//! Page-level types.

use super::Bucket;
use serde::{Deserialize, Serialize};

/// One page of the source document and the bucket it currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Position in the source document (1-indexed)
    pub index: u32,

    /// Current classification
    pub bucket: Bucket,
}

impl Page {
    /// Create an unassigned page.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            bucket: Bucket::Unassigned,
        }
    }

    /// Check if the page still needs sorting.
    pub fn is_unassigned(&self) -> bool {
        self.bucket == Bucket::Unassigned
    }
}

/// Physical page size as found in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Page rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
}

impl PageGeometry {
    /// Create a geometry with the given dimensions and no rotation.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            rotation: 0,
        }
    }

    /// US Letter (8.5 x 11 inches), the fallback when no MediaBox is found.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Set rotation, normalized to a multiple of 90 in 0..360.
    pub fn with_rotation(mut self, degrees: i64) -> Self {
        self.rotation = (degrees.rem_euclid(360) / 90 * 90) as u16;
        self
    }

    /// Size as displayed, with width and height swapped for quarter turns.
    pub fn displayed(&self) -> (f32, f32) {
        if self.rotation % 180 == 90 {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Pixel size of a preview rendered at `scale` (72 dpi = 1.0).
    pub fn scaled(&self, scale: f32) -> (u32, u32) {
        let (w, h) = self.displayed();
        (
            (w * scale).round().max(1.0) as u32,
            (h * scale).round().max(1.0) as u32,
        )
    }

    /// Check if the page is displayed in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        let (w, h) = self.displayed();
        w > h
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(3);
        assert_eq!(page.index, 3);
        assert!(page.is_unassigned());
    }

    #[test]
    fn test_geometry_rotation() {
        let geometry = PageGeometry::letter().with_rotation(-90);
        assert_eq!(geometry.rotation, 270);
        assert_eq!(geometry.displayed(), (792.0, 612.0));
        assert!(geometry.is_landscape());
        assert!(!PageGeometry::letter().is_landscape());
    }

    #[test]
    fn test_geometry_scaled() {
        assert_eq!(PageGeometry::letter().scaled(0.2), (122, 158));
        assert_eq!(PageGeometry::new(1.0, 1.0).scaled(0.01), (1, 1));
    }
}
