//! Face cutting operations.

use nalgebra::Point3;

use crate::{Face, FaceRelation, Plane3D, PlaneSide};

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable {
    /// Cuts the geometry by a plane.
    ///
    /// Returns `(front, back)`:
    ///
    /// - **Front / TouchingFront / Coplanar**: `(Some(self), None)`
    /// - **Back / TouchingBack**: `(None, Some(self))`
    /// - **Spanning**: `(Some(front_part), Some(back_part))`, both lying in
    ///   the original face's plane with the new vertices exactly on `plane`
    fn cut(&self, plane: &Plane3D, epsilon: f32) -> (Option<Face>, Option<Face>);
}

impl Cuttable for Face {
    fn cut(&self, plane: &Plane3D, epsilon: f32) -> (Option<Face>, Option<Face>) {
        match self.classify(plane, epsilon) {
            FaceRelation::Front | FaceRelation::TouchingFront | FaceRelation::Coplanar => {
                (Some(self.clone()), None)
            }
            FaceRelation::Back | FaceRelation::TouchingBack => (None, Some(self.clone())),
            FaceRelation::Spanning => split_face(self, plane, epsilon),
        }
    }
}

/// Sutherland-Hodgman clip of a spanning face against `plane`.
///
/// Vertices on the plane go to both pieces. An edge whose endpoints lie on
/// opposite sides adds its crossing point, interpolated from the endpoints'
/// signed distances, to both pieces.
fn split_face(face: &Face, plane: &Plane3D, epsilon: f32) -> (Option<Face>, Option<Face>) {
    let sides: Vec<(Point3<f32>, PlaneSide)> = face
        .vertices()
        .iter()
        .map(|&v| (v, plane.classify_point(v, epsilon)))
        .collect();
    let mut front = Vec::with_capacity(sides.len() + 1);
    let mut back = Vec::with_capacity(sides.len() + 1);

    for (i, &(start, start_side)) in sides.iter().enumerate() {
        let (end, end_side) = sides[(i + 1) % sides.len()];
        match start_side {
            PlaneSide::Front => front.push(start),
            PlaneSide::Back => back.push(start),
            PlaneSide::OnPlane => {
                front.push(start);
                back.push(start);
            }
        }

        if let (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front) = (start_side, end_side) {
            let (d_start, d_end) = (plane.signed_distance(start), plane.signed_distance(end));
            let crossing = start + (end - start) * (d_start / (d_start - d_end));
            front.push(crossing);
            back.push(crossing);
        }
    }

    (piece_of(face, front), piece_of(face, back))
}

/// A piece of `parent` lying in its plane, `None` once repeated points have
/// collapsed it below three vertices.
fn piece_of(parent: &Face, mut vertices: Vec<Point3<f32>>) -> Option<Face> {
    vertices.dedup();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    (vertices.len() >= 3).then(|| Face::with_plane(vertices, parent.plane().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPSILON;
    use nalgebra::Vector3;

    #[test]
    fn cut_front_face_is_untouched() {
        let face = Face::triangle(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        let (front, back) = face.cut(&Plane3D::x_axis(0.0), DEFAULT_EPSILON);
        assert_eq!(front, Some(face));
        assert!(back.is_none());
    }

    #[test]
    fn cut_spanning_square_in_half() {
        let square = Face::rectangle(
            Point3::new(-1.0, 0.0, -1.0),
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(2.0, 0.0, 0.0),
        )
        .unwrap();
        let plane = Plane3D::x_axis(0.0);

        let (front, back) = square.cut(&plane, DEFAULT_EPSILON);
        let front = front.unwrap();
        let back = back.unwrap();

        assert_eq!(front.len(), 4);
        assert_eq!(back.len(), 4);
        assert_eq!(front.classify(&plane, DEFAULT_EPSILON), FaceRelation::TouchingFront);
        assert_eq!(back.classify(&plane, DEFAULT_EPSILON), FaceRelation::TouchingBack);
        assert_eq!(front.plane(), square.plane());
        let on_plane = front
            .vertices()
            .iter()
            .filter(|v| v.x.abs() < 1e-6)
            .count();
        assert_eq!(on_plane, 2);
    }

    #[test]
    fn cut_through_vertex_gives_two_triangles() {
        let triangle = Face::triangle(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(-1.0, 0.0, -1.0),
        )
        .unwrap();
        let (front, back) = triangle.cut(&Plane3D::x_axis(0.0), DEFAULT_EPSILON);
        assert_eq!(front.unwrap().len(), 3);
        assert_eq!(back.unwrap().len(), 3);
    }

    #[test]
    fn collapsed_pieces_are_dropped() {
        let parent = Face::rectangle(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        let (a, b, c) = (Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0));

        assert!(piece_of(&parent, vec![a, a, b, b]).is_none());
        let closed = piece_of(&parent, vec![a, b, b, c, a]).unwrap();
        assert_eq!(closed.vertices(), &[a, b, c]);
        assert_eq!(closed.plane(), parent.plane());
    }
}
