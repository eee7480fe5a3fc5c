//! Face sets and the two partitioning operations over them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Aabb, Cuttable, Face, FaceRelation, Plane3D};

/// An unordered collection of shared faces, without duplicates by identity.
///
/// Two faces are the same member only if they are the same `Arc` allocation;
/// geometrically equal faces built separately are distinct members.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceSet {
    faces: Vec<Arc<Face>>,
}

/// Result of [`FaceSet::split`].
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Faces in front of the plane, including front pieces of cut faces.
    pub front: FaceSet,
    /// Faces lying in the plane.
    pub span: FaceSet,
    /// Faces behind the plane, including back pieces of cut faces.
    pub back: FaceSet,
}

/// Result of [`FaceSet::divide`].
#[derive(Debug, Clone, Default)]
pub struct Division {
    /// Faces in front of the plane, plus every spanning face.
    pub front: FaceSet,
    /// Faces lying in the plane.
    pub span: FaceSet,
    /// Faces behind the plane, plus every spanning face.
    pub back: FaceSet,
    /// The spanning faces, which appear unmodified in both `front` and `back`.
    pub duplicated: FaceSet,
}

impl FaceSet {
    /// Creates an empty face set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of faces in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterates over the faces in enumeration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Face>> {
        self.faces.iter()
    }

    /// Returns `true` if this exact face instance is a member.
    pub fn contains(&self, face: &Arc<Face>) -> bool {
        self.faces.iter().any(|f| Arc::ptr_eq(f, face))
    }

    /// Adds a face. Returns `false` if that instance was already a member.
    pub fn add(&mut self, face: Arc<Face>) -> bool {
        if self.contains(&face) {
            return false;
        }
        self.faces.push(face);
        true
    }

    /// Adds every face of `other` that is not already a member.
    pub fn add_set(&mut self, other: &FaceSet) {
        for face in other.iter() {
            self.add(Arc::clone(face));
        }
    }

    /// Removes a face by identity, returning it if it was a member.
    pub fn remove(&mut self, face: &Arc<Face>) -> Option<Arc<Face>> {
        let idx = self.faces.iter().position(|f| Arc::ptr_eq(f, face))?;
        Some(self.faces.remove(idx))
    }

    /// Appends a face the caller knows is not yet a member.
    #[inline]
    pub(crate) fn push_unique(&mut self, face: Arc<Face>) {
        debug_assert!(!self.contains(&face), "face already in set");
        self.faces.push(face);
    }

    /// Destructive partition: spanning faces are cut at the plane.
    ///
    /// The input is consumed. The outputs are pairwise disjoint by identity and
    /// each cut face is replaced by exactly two new faces, one per side.
    pub fn split(self, plane: &Plane3D, epsilon: f32) -> Partition {
        let mut out = Partition::default();
        for face in self.faces {
            match face.classify(plane, epsilon) {
                FaceRelation::Coplanar => out.span.push_unique(face),
                relation if relation.is_front() => out.front.push_unique(face),
                relation if relation.is_back() => out.back.push_unique(face),
                _ => {
                    let (front, back) = face.cut(plane, epsilon);
                    if let Some(front) = front {
                        out.front.push_unique(Arc::new(front));
                    }
                    if let Some(back) = back {
                        out.back.push_unique(Arc::new(back));
                    }
                }
            }
        }
        out
    }

    /// Conservative partition: spanning faces are shared, unmodified, by both
    /// sides and recorded in [`Division::duplicated`].
    pub fn divide(self, plane: &Plane3D, epsilon: f32) -> Division {
        let mut out = Division::default();
        for face in self.faces {
            match face.classify(plane, epsilon) {
                FaceRelation::Coplanar => out.span.push_unique(face),
                relation if relation.is_front() => out.front.push_unique(face),
                relation if relation.is_back() => out.back.push_unique(face),
                _ => {
                    out.front.push_unique(Arc::clone(&face));
                    out.back.push_unique(Arc::clone(&face));
                    out.duplicated.push_unique(face);
                }
            }
        }
        out
    }

    /// Axis-aligned bounding box of all vertices, `None` for an empty set.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.faces.iter().flat_map(|f| f.vertices().iter().copied()))
    }

    /// Total vertex count over all faces.
    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(|f| f.len()).sum()
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Self {
            faces: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl FromIterator<Arc<Face>> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Arc<Face>>>(iter: I) -> Self {
        let mut set = FaceSet::new();
        for face in iter {
            set.add(face);
        }
        set
    }
}

impl IntoIterator for FaceSet {
    type Item = Arc<Face>;
    type IntoIter = std::vec::IntoIter<Arc<Face>>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.into_iter()
    }
}

impl<'a> IntoIterator for &'a FaceSet {
    type Item = &'a Arc<Face>;
    type IntoIter = std::slice::Iter<'a, Arc<Face>>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}
