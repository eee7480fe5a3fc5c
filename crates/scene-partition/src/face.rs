//! Planar faces, the atomic unit of scene geometry.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};
use crate::plane::tolerance_at;
use crate::{Plane3D, PlaneSide};

/// Relative tolerance for the coplanarity check in [`Face::new`].
pub const PLANARITY_EPSILON: f32 = 1e-4;

/// How a face lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceRelation {
    /// All vertices are strictly in front of the plane.
    Front,
    /// All vertices are strictly behind the plane.
    Back,
    /// Some vertices lie on the plane, the rest are in front.
    TouchingFront,
    /// Some vertices lie on the plane, the rest are behind.
    TouchingBack,
    /// All vertices lie on the plane.
    Coplanar,
    /// Vertices are on both sides of the plane.
    Spanning,
}

impl FaceRelation {
    /// `true` for faces that belong in a front partition without splitting.
    #[inline]
    pub fn is_front(self) -> bool {
        matches!(self, FaceRelation::Front | FaceRelation::TouchingFront)
    }

    /// `true` for faces that belong in a back partition without splitting.
    #[inline]
    pub fn is_back(self) -> bool {
        matches!(self, FaceRelation::Back | FaceRelation::TouchingBack)
    }
}

/// A convex planar polygon together with its supporting plane.
///
/// Vertices are in counter-clockwise winding order when viewed from the front
/// (the direction the plane normal points). Faces are immutable once built and
/// are shared between face sets through `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    vertices: Vec<Point3<f32>>,
    plane: Plane3D,
}

impl Face {
    /// Creates a face from a list of vertices.
    ///
    /// The supporting plane is derived with Newell's method, so any three
    /// collinear leading vertices do not matter as long as the polygon as a
    /// whole has area.
    ///
    /// Fails with [`PartitionError::DegenerateFace`] for fewer than three
    /// vertices or zero area, and with [`PartitionError::NonPlanarFace`] if a
    /// vertex lies off the plane by more than [`PLANARITY_EPSILON`] relative
    /// to its coordinate magnitude.
    pub fn new(vertices: Vec<Point3<f32>>) -> Result<Self> {
        let degenerate = PartitionError::DegenerateFace {
            vertices: vertices.len(),
        };
        if vertices.len() < 3 {
            return Err(degenerate);
        }

        // Relative to the first vertex, so large coordinates keep their precision.
        let anchor = vertices[0];
        let mut normal = Vector3::zeros();
        for (i, current) in vertices.iter().enumerate() {
            let current = *current - anchor;
            let next = vertices[(i + 1) % vertices.len()] - anchor;
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        let plane = Plane3D::from_point_and_normal(anchor, normal).ok_or(degenerate)?;

        for vertex in &vertices {
            let deviation = plane.signed_distance(*vertex).abs();
            if deviation > tolerance_at(*vertex, PLANARITY_EPSILON) {
                return Err(PartitionError::NonPlanarFace { deviation });
            }
        }
        Ok(Self { vertices, plane })
    }

    /// Creates a triangle. The normal follows the right-hand rule: (b - a) × (c - a).
    pub fn triangle(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Result<Self> {
        Self::new(vec![a, b, c])
    }

    /// Creates a rectangle from a corner and two edge vectors.
    ///
    /// The vertices are: origin, origin+u, origin+u+v, origin+v.
    pub fn rectangle(origin: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>) -> Result<Self> {
        Self::new(vec![origin, origin + u, origin + u + v, origin + v])
    }

    /// Builds a face that is known to lie in `plane`, e.g. a piece of a split face.
    pub(crate) fn with_plane(vertices: Vec<Point3<f32>>, plane: Plane3D) -> Self {
        debug_assert!(vertices.len() >= 3, "Face must have at least 3 vertices");
        Self { vertices, plane }
    }

    /// Returns the vertices of the face.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false` for a constructed face.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the supporting plane of the face.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the unit normal of the face.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.plane.normal()
    }

    /// Computes the centroid (vertex average) of the face.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Classifies this face relative to a plane.
    pub fn classify(&self, plane: &Plane3D, epsilon: f32) -> FaceRelation {
        let mut front = 0;
        let mut back = 0;
        let mut on_plane = 0;

        for vertex in &self.vertices {
            match plane.classify_point(*vertex, epsilon) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => on_plane += 1,
            }
        }

        match (front, back, on_plane) {
            (0, 0, _) => FaceRelation::Coplanar,
            (_, 0, 0) => FaceRelation::Front,
            (_, 0, _) => FaceRelation::TouchingFront,
            (0, _, 0) => FaceRelation::Back,
            (0, _, _) => FaceRelation::TouchingBack,
            _ => FaceRelation::Spanning,
        }
    }

    /// Classifies `other` against the supporting plane of this face.
    #[inline]
    pub fn compare_position(&self, other: &Face, epsilon: f32) -> FaceRelation {
        other.classify(&self.plane, epsilon)
    }

    /// Classifies a point against the supporting plane of this face.
    #[inline]
    pub fn compare_point(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        self.plane.classify_point(point, epsilon)
    }
}

impl From<&Face> for Plane3D {
    fn from(face: &Face) -> Self {
        face.plane.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPSILON;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Face {
        Face::triangle(a.into(), b.into(), c.into()).unwrap()
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let face = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        assert!(face.normal().y > 0.99);
        assert_eq!(face.len(), 3);
    }

    #[test]
    fn rectangle_has_four_vertices() {
        let face = Face::rectangle(Point3::origin(), Vector3::x() * 2.0, Vector3::y()).unwrap();
        assert_eq!(face.len(), 4);
        assert!((face.centroid() - Point3::new(1.0, 0.5, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn degenerate_faces_are_rejected() {
        let collinear = Face::triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(
            collinear,
            Err(PartitionError::DegenerateFace { vertices: 3 })
        );
        assert!(Face::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_err());
    }

    #[test]
    fn far_away_rectangle_is_planar() {
        let face = Face::rectangle(
            Point3::new(12345.6, 789.1, -23456.7),
            Vector3::new(3.7, 1.3, 2.9),
            Vector3::new(-2.1, 4.4, 0.7),
        )
        .unwrap();
        assert_eq!(face.len(), 4);
        assert_eq!(face.classify(face.plane(), DEFAULT_EPSILON), FaceRelation::Coplanar);
    }

    #[test]
    fn non_planar_faces_are_rejected() {
        let warped = Face::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert!(matches!(warped, Err(PartitionError::NonPlanarFace { .. })));
    }

    #[test]
    fn classify_all_relations() {
        let plane = Plane3D::z_axis(0.0);
        let eps = DEFAULT_EPSILON;

        let front = make_triangle([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        let back = make_triangle([0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]);
        let coplanar = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let touching_front = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let touching_back = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]);
        let spanning = make_triangle([0.0, 0.0, -1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);

        assert_eq!(front.classify(&plane, eps), FaceRelation::Front);
        assert_eq!(back.classify(&plane, eps), FaceRelation::Back);
        assert_eq!(coplanar.classify(&plane, eps), FaceRelation::Coplanar);
        assert_eq!(touching_front.classify(&plane, eps), FaceRelation::TouchingFront);
        assert_eq!(touching_back.classify(&plane, eps), FaceRelation::TouchingBack);
        assert_eq!(spanning.classify(&plane, eps), FaceRelation::Spanning);

        assert!(touching_front.classify(&plane, eps).is_front());
        assert!(touching_back.classify(&plane, eps).is_back());
        assert!(!spanning.classify(&plane, eps).is_front());
    }

    #[test]
    fn compare_position_uses_own_plane() {
        let floor = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let above = make_triangle([0.0, 2.0, 0.0], [0.0, 2.0, 1.0], [1.0, 2.0, 0.0]);
        assert_eq!(floor.compare_position(&above, DEFAULT_EPSILON), FaceRelation::Front);
        assert_eq!(above.compare_position(&floor, DEFAULT_EPSILON), FaceRelation::Back);
        assert_eq!(
            floor.compare_point(Point3::new(0.0, -3.0, 0.0), DEFAULT_EPSILON),
            PlaneSide::Back
        );
    }
}
