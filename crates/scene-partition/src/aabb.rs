//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its minimum and maximum corners.
    #[inline]
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, `None` if there are no points.
    pub fn from_points<I: IntoIterator<Item = Point3<f32>>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |bb, p| Self {
            min: bb.min.inf(&p),
            max: bb.max.sup(&p),
        }))
    }

    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half the extent along each axis.
    #[inline]
    pub fn half_extents(&self) -> Vector3<f32> {
        (self.max - self.min) * 0.5
    }

    /// The square (in the x/z ground plane) sharing this box's center whose
    /// half size is the larger of the x and z half extents. The y range is kept.
    pub fn ground_square(&self) -> Self {
        let center = self.center();
        let half = self.half_extents();
        let side = half.x.max(half.z);
        Self {
            min: Point3::new(center.x - side, self.min.y, center.z - side),
            max: Point3::new(center.x + side, self.max.y, center.z + side),
        }
    }

    /// `true` if the boxes overlap or touch.
    pub fn intersects(&self, other: &Self) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.max.z >= other.min.z
            && self.min.z <= other.max.z
    }

    /// Returns `true` if the point lies inside the box grown by `epsilon`.
    pub fn contains_point(&self, point: Point3<f32>, epsilon: f32) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] - epsilon && point[i] <= self.max[i] + epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_empty() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn ground_square_expands_short_axis() {
        let bb = Aabb::new(Point3::new(0.0, 1.0, 0.0), Point3::new(4.0, 2.0, 2.0));
        let square = bb.ground_square();
        assert_eq!(square.min(), Point3::new(0.0, 1.0, -1.0));
        assert_eq!(square.max(), Point3::new(4.0, 2.0, 3.0));
        let half = square.half_extents();
        assert_eq!(half.x, half.z);
    }

    #[test]
    fn intersects_and_contains() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 2.0, 2.0));
        let c = Aabb::new(Point3::new(3.0, 3.0, 3.0), Point3::new(4.0, 4.0, 4.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(Point3::new(1.0, 0.5, 0.0), 0.0));
        assert!(!a.contains_point(Point3::new(1.1, 0.5, 0.0), 0.0));
    }
}
