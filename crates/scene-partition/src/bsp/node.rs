//! BSP tree node implementation.

use std::sync::Arc;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{Face, FaceSet, PlaneSide, SceneNode, SceneVisitor};

/// A node in the BSP tree.
///
/// Each node partitions space by the plane of its divider face and stores the
/// faces lying in that plane as its span. Faces in front of or behind the
/// plane live in the respective child subtrees; an absent child is an empty
/// half-space.
///
/// Further scene nodes may be attached as children; they are visited after
/// the span and before the back subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BspNode {
    /// The face whose plane divides this node.
    divider: Arc<Face>,

    /// Faces lying in the divider plane, the divider included.
    span: FaceSet,

    /// Subtree containing faces in FRONT of the divider plane.
    front: Option<Box<BspNode>>,

    /// Subtree containing faces BEHIND the divider plane.
    back: Option<Box<BspNode>>,

    /// Attached scene nodes.
    children: Vec<SceneNode>,
}

/// Summary statistics of a BSP subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BspStats {
    /// Faces over the whole subtree, attached children included. Equal to
    /// [`BspNode::face_count`].
    pub face_count: usize,
    /// Number of BSP nodes.
    pub node_count: usize,
    /// Depth of the shallowest node without children (1 for a lone node).
    pub min_depth: usize,
    /// Depth of the deepest node (1 for a lone node).
    pub max_depth: usize,
    /// `min / max` of the front and back subtree node counts; 1 for a lone
    /// node, 0 when only one side exists.
    pub balance: f32,
}

/// Order in which [`BspNode::traverse`] reports spans relative to an eye point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthOrder {
    /// Nearest faces first.
    FrontToBack,
    /// Farthest faces first (painter's algorithm).
    BackToFront,
}

impl BspNode {
    /// Creates a node without attached children.
    pub(crate) fn new(
        divider: Arc<Face>,
        span: FaceSet,
        front: Option<BspNode>,
        back: Option<BspNode>,
    ) -> Self {
        Self {
            divider,
            span,
            front: front.map(Box::new),
            back: back.map(Box::new),
            children: Vec::new(),
        }
    }

    /// Returns the dividing face.
    #[inline]
    pub fn divider(&self) -> &Arc<Face> {
        &self.divider
    }

    /// Returns the faces lying in the divider plane.
    #[inline]
    pub fn span(&self) -> &FaceSet {
        &self.span
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.back.as_deref()
    }

    /// Returns the attached scene nodes.
    #[inline]
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Returns the attached scene nodes for modification.
    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<SceneNode> {
        &mut self.children
    }

    /// Attaches a scene node to this BSP node.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Checks if this node has no front or back subtree.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Classifies a point against the divider plane.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        self.divider.compare_point(point, epsilon)
    }

    /// Visits front, span, attached children and back, in that order.
    pub fn visit_sub_nodes<V: SceneVisitor + ?Sized>(&self, visitor: &mut V) {
        if let Some(front) = self.front() {
            visitor.visit_bsp(front);
        }
        visitor.visit_geometry(&self.span);
        for child in &self.children {
            child.accept(visitor);
        }
        if let Some(back) = self.back() {
            visitor.visit_bsp(back);
        }
    }

    /// Applies `f` to every BSP node of this subtree, parents before children.
    pub(crate) fn try_for_each_node_mut<F>(&mut self, f: &mut F) -> Result<()>
    where
        F: FnMut(&mut BspNode) -> Result<()>,
    {
        f(self)?;
        if let Some(front) = self.front.as_deref_mut() {
            front.try_for_each_node_mut(f)?;
        }
        if let Some(back) = self.back.as_deref_mut() {
            back.try_for_each_node_mut(f)?;
        }
        Ok(())
    }

    /// Returns the total number of faces in this subtree, attached children
    /// included.
    pub fn face_count(&self) -> usize {
        let mut count = self.span.len();
        count += self.children.iter().map(SceneNode::face_count).sum::<usize>();

        if let Some(ref front) = self.front {
            count += front.face_count();
        }
        if let Some(ref back) = self.back {
            count += back.face_count();
        }

        count
    }

    /// Returns the number of BSP nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.front.as_ref().map_or(0, |n| n.node_count())
            + self.back.as_ref().map_or(0, |n| n.node_count())
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }

    /// Computes summary statistics over this subtree.
    pub fn stats(&self) -> BspStats {
        let front = self.front.as_ref().map(|n| n.stats());
        let back = self.back.as_ref().map(|n| n.stats());

        let min_depth = match (&front, &back) {
            (None, None) => 1,
            (Some(f), None) => f.min_depth + 1,
            (None, Some(b)) => b.min_depth + 1,
            (Some(f), Some(b)) => f.min_depth.min(b.min_depth) + 1,
        };
        let nodes = |s: &Option<BspStats>| s.as_ref().map_or(0, |s| s.node_count);
        let (front_nodes, back_nodes) = (nodes(&front), nodes(&back));
        let balance = match (front_nodes, back_nodes) {
            (0, 0) => 1.0,
            (0, _) | (_, 0) => 0.0,
            (f, b) => f.min(b) as f32 / f.max(b) as f32,
        };

        BspStats {
            face_count: self.span.len()
                + self.children.iter().map(SceneNode::face_count).sum::<usize>()
                + front.as_ref().map_or(0, |s| s.face_count)
                + back.as_ref().map_or(0, |s| s.face_count),
            node_count: 1 + front_nodes + back_nodes,
            min_depth,
            max_depth: 1 + front
                .as_ref()
                .map_or(0, |s| s.max_depth)
                .max(back.as_ref().map_or(0, |s| s.max_depth)),
            balance,
        }
    }

    /// Reports every span in depth order relative to `eye`.
    ///
    /// An eye lying in a divider plane counts as being in front of it.
    pub fn traverse<F>(&self, eye: Point3<f32>, order: DepthOrder, epsilon: f32, visit: &mut F)
    where
        F: FnMut(&FaceSet),
    {
        let eye_in_front = self.classify_point(eye, epsilon) != PlaneSide::Back;
        // Front-to-back starts with the side the eye is on.
        let (first, second) = if eye_in_front == (order == DepthOrder::FrontToBack) {
            (self.front(), self.back())
        } else {
            (self.back(), self.front())
        };

        if let Some(node) = first {
            node.traverse(eye, order, epsilon, visit);
        }
        if !self.span.is_empty() {
            visit(&self.span);
        }
        if let Some(node) = second {
            node.traverse(eye, order, epsilon, visit);
        }
    }
}
