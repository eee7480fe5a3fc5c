//! Quad tree construction.

use log::{debug, trace};

use crate::error::{PartitionError, Result};
use crate::scene::replace_geometry;
use crate::{collect_faces, FaceSet, Partition, Plane3D, QuadConfig, SceneNode};

use super::node::QuadNode;

/// Builds quad trees from face sets or scenes.
///
/// Recursion stops at a node holding at most
/// [`max_face_count`](QuadConfig::max_face_count) faces, at a node whose
/// bounding square is no larger than the maximum quad size, or at
/// [`max_depth`](QuadConfig::max_depth).
#[derive(Debug, Clone, Default)]
pub struct QuadTreeBuilder {
    config: QuadConfig,
}

impl QuadTreeBuilder {
    /// Builder with at most 100 faces per leaf and a quad size of 10.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder configured from a validated [`QuadConfig`].
    pub fn try_from_config(config: QuadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the current configuration.
    #[inline]
    pub fn config(&self) -> &QuadConfig {
        &self.config
    }

    /// Sets the maximum number of faces in a leaf.
    pub fn set_max_face_count(&mut self, count: usize) {
        self.config.set_max_face_count(count);
    }

    /// Sets the maximum side length of a leaf's bounding square.
    pub fn set_max_quad_size(&mut self, size: f32) {
        self.config.set_max_quad_size(size);
    }

    /// Builds a quad tree from a face set.
    ///
    /// Fails with [`PartitionError::EmptyFaceSet`] if `faces` is empty, or
    /// with [`PartitionError::InvalidConfig`] if a setter left the
    /// configuration out of range.
    pub fn build_faces(&self, faces: FaceSet) -> Result<QuadNode> {
        self.config.validate()?;
        let input = faces.len();
        let node = self.build_node(faces, 1)?;
        debug!(
            "built quad tree from {} faces: {} nodes, {} leaves, depth {}",
            input,
            node.node_count(),
            node.leaf_count(),
            node.depth()
        );
        Ok(node)
    }

    /// Builds a quad tree over every face reachable from `scene`.
    ///
    /// Returns `Ok(None)` if the scene holds no faces.
    pub fn build(&self, scene: &SceneNode) -> Result<Option<QuadNode>> {
        let faces = collect_faces(scene);
        if faces.is_empty() {
            debug!("no faces in scene, no quad tree built");
            return Ok(None);
        }
        self.build_faces(faces).map(Some)
    }

    fn build_node(&self, faces: FaceSet, depth: usize) -> Result<QuadNode> {
        let bounds = faces
            .bounding_box()
            .ok_or(PartitionError::EmptyFaceSet)?
            .ground_square();
        let half = bounds.half_extents();

        let small = half.x <= self.config.max_half_size && half.z <= self.config.max_half_size;
        if faces.len() <= self.config.max_face_count || small || depth >= self.config.max_depth {
            trace!("quad leaf at depth {}: {} faces", depth, faces.len());
            return Ok(QuadNode::leaf(bounds, faces));
        }

        let center = bounds.center();
        let epsilon = self.config.epsilon;
        let (top, bottom) = halves(faces, &Plane3D::z_axis(center.z), epsilon);
        let (top_left, top_right) = halves(top, &Plane3D::x_axis(center.x), epsilon);
        let (bottom_left, bottom_right) = halves(bottom, &Plane3D::x_axis(center.x), epsilon);
        trace!(
            "quad split at depth {}: {} / {} / {} / {}",
            depth,
            top_left.len(),
            top_right.len(),
            bottom_left.len(),
            bottom_right.len()
        );

        let mut quadrants = [None, None, None, None];
        for (slot, faces) in quadrants
            .iter_mut()
            .zip([top_left, top_right, bottom_left, bottom_right])
        {
            if !faces.is_empty() {
                *slot = Some(self.build_node(faces, depth + 1)?);
            }
        }
        Ok(QuadNode::interior(bounds, quadrants))
    }
}

/// Splits `faces` at `plane`, keeping faces on the plane with the front half.
fn halves(faces: FaceSet, plane: &Plane3D, epsilon: f32) -> (FaceSet, FaceSet) {
    let Partition {
        mut front,
        span,
        back,
    } = faces.split(plane, epsilon);
    for face in span {
        front.push_unique(face);
    }
    (front, back)
}

/// Converts every geometry node of a scene into a quad tree, in place.
///
/// Geometry nodes without faces are removed instead.
#[derive(Debug, Clone, Default)]
pub struct QuadTransformer {
    builder: QuadTreeBuilder,
}

impl QuadTransformer {
    /// Creates a transformer that builds every tree with `builder`.
    pub fn new(builder: QuadTreeBuilder) -> Self {
        Self { builder }
    }

    /// See [`QuadTreeBuilder::set_max_face_count`].
    pub fn set_max_face_count(&mut self, count: usize) {
        self.builder.set_max_face_count(count);
    }

    /// See [`QuadTreeBuilder::set_max_quad_size`].
    pub fn set_max_quad_size(&mut self, size: f32) {
        self.builder.set_max_quad_size(size);
    }

    /// Replaces each geometry node of `scene` with a quad tree over its faces.
    pub fn transform(&self, scene: &mut SceneNode) -> Result<()> {
        replace_geometry(scene, &mut |faces: FaceSet| {
            if faces.is_empty() {
                return Ok(None);
            }
            self.builder
                .build_faces(faces)
                .map(|node| Some(SceneNode::Quad(node)))
        })
    }
}
