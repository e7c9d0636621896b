//! Bounding box accumulation while parsing toolpaths.

use printview_core::{Aabb, Point3};

/// Bounding box accumulator.
///
/// Stays empty until the first segment is included, so no infinities ever
/// reach consumers; [`finish`](Self::finish) falls back to
/// [`Aabb::DEGENERATE`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsAccumulator {
    bounds: Option<Aabb>,
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_point(&mut self, p: Point3) {
        match &mut self.bounds {
            Some(bounds) => bounds.expand(p),
            None => self.bounds = Some(Aabb::from_point(p)),
        }
    }

    /// Include both endpoints of a move
    pub fn include_segment(&mut self, start: Point3, end: Point3) {
        self.include_point(start);
        self.include_point(end);
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn finish(self) -> Aabb {
        self.bounds.unwrap_or(Aabb::DEGENERATE)
    }
}
