//! Data models for toolpath geometry
//!
//! This module provides:
//! - Machine-space points in millimeters
//! - Toolpath segments tagged with their layer
//! - Axis-aligned bounding boxes with a degenerate fallback
//! - The print feature taxonomy

pub mod feature;

pub use feature::FeatureType;

use serde::{Deserialize, Serialize};

/// Point in machine space (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3 {
    /// Origin
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to `other` in the XY plane
    pub fn planar_distance(&self, other: &Point3) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Straight toolpath move between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
    /// Layer the move was printed on
    pub layer: u32,
}

impl Segment {
    pub fn new(start: Point3, end: Point3, layer: u32) -> Self {
        Self { start, end, layer }
    }

    /// Length of the move projected onto the XY plane
    pub fn planar_length(&self) -> f64 {
        self.start.planar_distance(&self.end)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::DEGENERATE
    }
}

impl Aabb {
    /// Box reported when nothing qualified for a bounding volume
    pub const DEGENERATE: Aabb = Aabb {
        min_x: 0.0,
        min_y: 0.0,
        min_z: 0.0,
        max_x: 1.0,
        max_y: 1.0,
        max_z: 0.0,
    };

    /// Smallest box containing a single point
    pub fn from_point(p: Point3) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            min_z: p.z,
            max_x: p.x,
            max_y: p.y,
            max_z: p.z,
        }
    }

    /// Grow the box to contain `p`
    pub fn expand(&mut self, p: Point3) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
        self.max_z = self.max_z.max(p.z);
    }

    /// Check whether `other` lies entirely within this box
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.min_z <= other.min_z
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
            && self.max_z >= other.max_z
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Largest extent over the three axes
    pub fn max_extent(&self) -> f64 {
        self.width().max(self.height()).max(self.depth())
    }

    /// Center of the box
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance_ignores_z() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 12.0);
        assert_eq!(a.planar_distance(&b), 5.0);
    }

    #[test]
    fn test_aabb_expand_and_contains() {
        let mut bbox = Aabb::from_point(Point3::new(1.0, 2.0, 0.2));
        bbox.expand(Point3::new(-1.0, 5.0, 0.4));
        assert_eq!(bbox.min_x, -1.0);
        assert_eq!(bbox.max_y, 5.0);
        assert!((bbox.depth() - 0.2).abs() < 1e-12);

        let inner = Aabb::from_point(Point3::new(0.0, 3.0, 0.3));
        assert!(bbox.contains(&inner));
        assert!(!inner.contains(&bbox));
    }

    #[test]
    fn test_degenerate_default() {
        let bbox = Aabb::default();
        assert_eq!(bbox, Aabb::DEGENERATE);
        assert_eq!(bbox.width(), 1.0);
        assert_eq!(bbox.depth(), 0.0);
        assert_eq!(bbox.max_extent(), 1.0);
    }
}
