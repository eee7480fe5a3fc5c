//! Plane representation and point classification.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Default epsilon for plane classification.
///
/// The epsilon is relative: a point is on a plane when its distance is at
/// most `epsilon` times its largest absolute coordinate (or times 1 inside
/// the unit cube).
/// Every classification in this crate takes its epsilon explicitly; this value
/// is only the default used by [`BspConfig`](crate::BspConfig) and
/// [`QuadConfig`](crate::QuadConfig).
pub const DEFAULT_EPSILON: f32 = 1e-5;

/// Distance within which `point` counts as lying on a plane.
///
/// `epsilon` is scaled by the largest absolute coordinate of `point`, so f32
/// rounding in scene-scale coordinates stays inside the tolerance. Within the
/// unit cube it is an absolute distance.
#[inline]
pub(crate) fn tolerance_at(point: Point3<f32>, epsilon: f32) -> f32 {
    epsilon * point.coords.amax().max(1.0)
}

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane3D {
    normal: Vector3<f32>,
    offset: f32,
}

impl Plane3D {
    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// Returns `None` if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Option<Self> {
        let norm = normal.norm();
        if norm <= f32::EPSILON {
            return None;
        }
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Some(Self {
            normal: unit_normal,
            offset,
        })
    }

    /// Creates a plane from three non-collinear points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Returns `None` if the points are collinear (or nearly so).
    pub fn from_three_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        Self::from_point_and_normal(a, normal)
    }

    /// Axis-aligned plane `x = value` with its normal along +X.
    pub fn x_axis(value: f32) -> Self {
        Self {
            normal: Vector3::x(),
            offset: value,
        }
    }

    /// Axis-aligned plane `z = value` with its normal along +Z.
    pub fn z_axis(value: f32) -> Self {
        Self {
            normal: Vector3::z(),
            offset: value,
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    ///
    /// The on-plane tolerance is `epsilon` scaled by the point's largest
    /// absolute coordinate, and never less than `epsilon` itself.
    pub fn classify_point(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        let tolerance = tolerance_at(point, epsilon);
        if dist > tolerance {
            PlaneSide::Front
        } else if dist < -tolerance {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns `Some((t, point))` where `t` is the interpolation parameter
    /// (0.0 = start, 1.0 = end). Returns `None` if the segment is parallel to
    /// the plane or doesn't reach it.
    pub fn intersect_segment(
        &self,
        start: Point3<f32>,
        end: Point3<f32>,
    ) -> Option<(f32, Point3<f32>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        // Segment is parallel to plane
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, start + direction * t))
    }
}
