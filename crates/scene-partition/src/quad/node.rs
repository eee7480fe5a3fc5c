//! Quad tree node implementation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{Aabb, FaceSet, SceneNode, SceneVisitor};

/// One of the four sub-squares of a [`QuadNode`].
///
/// "Top" is the +Z half of the parent's bounding square and "left" the +X
/// half; faces lying exactly on a dividing line go to the top and left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All quadrants in visiting order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

/// A node in the quad tree, covering one square of the x/z ground plane.
///
/// An interior node owns up to four sub-quadrants; an absent quadrant held no
/// faces. A leaf node owns its faces directly through a single geometry child.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadNode {
    /// Bounding square of every face under this node.
    bounds: Aabb,

    top_left: Option<Box<QuadNode>>,
    top_right: Option<Box<QuadNode>>,
    bottom_left: Option<Box<QuadNode>>,
    bottom_right: Option<Box<QuadNode>>,

    /// Attached scene nodes, the leaf geometry included.
    children: Vec<SceneNode>,
}

impl QuadNode {
    /// Leaf node holding `faces` as its only child.
    pub(crate) fn leaf(bounds: Aabb, faces: FaceSet) -> Self {
        Self {
            bounds,
            top_left: None,
            top_right: None,
            bottom_left: None,
            bottom_right: None,
            children: vec![SceneNode::Geometry(faces)],
        }
    }

    /// Interior node over the given quadrants, in [`Quadrant::ALL`] order.
    pub(crate) fn interior(bounds: Aabb, [tl, tr, bl, br]: [Option<QuadNode>; 4]) -> Self {
        Self {
            bounds,
            top_left: tl.map(Box::new),
            top_right: tr.map(Box::new),
            bottom_left: bl.map(Box::new),
            bottom_right: br.map(Box::new),
            children: Vec::new(),
        }
    }

    /// Returns the bounding square of this node.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Returns a reference to the given sub-quadrant, if it holds faces.
    pub fn quadrant(&self, quadrant: Quadrant) -> Option<&QuadNode> {
        match quadrant {
            Quadrant::TopLeft => self.top_left.as_deref(),
            Quadrant::TopRight => self.top_right.as_deref(),
            Quadrant::BottomLeft => self.bottom_left.as_deref(),
            Quadrant::BottomRight => self.bottom_right.as_deref(),
        }
    }

    /// Present quadrants, in visiting order.
    pub fn quadrants(&self) -> impl Iterator<Item = (Quadrant, &QuadNode)> {
        Quadrant::ALL
            .into_iter()
            .filter_map(|q| self.quadrant(q).map(|node| (q, node)))
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

    /// Attaches a scene node to this quad node.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Checks if this node has no sub-quadrants.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.quadrants().next().is_none()
    }

    /// The faces of an unsubdivided leaf, `None` once the geometry has been
    /// replaced or the node is interior.
    pub fn leaf_faces(&self) -> Option<&FaceSet> {
        match self.children.as_slice() {
            [SceneNode::Geometry(faces)] if self.is_leaf() => Some(faces),
            _ => None,
        }
    }

    /// Visits the four quadrants, then the attached children.
    pub fn visit_sub_nodes<V: SceneVisitor + ?Sized>(&self, visitor: &mut V) {
        for (_, node) in self.quadrants() {
            visitor.visit_quad(node);
        }
        for child in &self.children {
            child.accept(visitor);
        }
    }

    /// Applies `f` to every quad node of this subtree, parents before children.
    pub(crate) fn try_for_each_node_mut<F>(&mut self, f: &mut F) -> Result<()>
    where
        F: FnMut(&mut QuadNode) -> Result<()>,
    {
        f(self)?;
        for node in [
            &mut self.top_left,
            &mut self.top_right,
            &mut self.bottom_left,
            &mut self.bottom_right,
        ]
        .into_iter()
        .flatten()
        {
            node.try_for_each_node_mut(f)?;
        }
        Ok(())
    }

    /// Returns the number of quad nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.quadrants().map(|(_, n)| n.node_count()).sum::<usize>()
    }

    /// Returns the number of quad nodes without sub-quadrants.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.quadrants().map(|(_, n)| n.leaf_count()).sum()
        }
    }

    /// Returns the total number of faces in this subtree, attached children
    /// included.
    pub fn face_count(&self) -> usize {
        self.children.iter().map(SceneNode::face_count).sum::<usize>()
            + self.quadrants().map(|(_, n)| n.face_count()).sum::<usize>()
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        1 + self.quadrants().map(|(_, n)| n.depth()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CollectingVisitor, Face};
    use nalgebra::Point3;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Face {
        Face::triangle(a.into(), b.into(), c.into()).unwrap()
    }

    /// Ground triangle with its corner at (x, 0, z).
    fn ground(x: f32, z: f32) -> Face {
        make_triangle([x, 0.0, z], [x, 0.0, z + 0.5], [x + 0.5, 0.0, z])
    }

    fn leaf_at(x: f32, z: f32) -> QuadNode {
        let faces: FaceSet = std::iter::once(ground(x, z)).collect();
        let bounds = faces.bounding_box().unwrap().ground_square();
        QuadNode::leaf(bounds, faces)
    }

    fn sample() -> QuadNode {
        let bounds = Aabb::new(Point3::new(-2.0, 0.0, -2.0), Point3::new(2.0, 0.0, 2.0));
        QuadNode::interior(
            bounds,
            [Some(leaf_at(1.0, 1.0)), None, Some(leaf_at(1.0, -1.0)), Some(leaf_at(-1.0, -1.0))],
        )
    }

    #[test]
    fn leaf_holds_faces() {
        let leaf = leaf_at(0.0, 0.0);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.leaf_faces().map(FaceSet::len), Some(1));
        assert_eq!(leaf.face_count(), 1);
        assert_eq!(leaf.depth(), 1);
    }

    #[test]
    fn interior_counts() {
        let root = sample();
        assert!(!root.is_leaf());
        assert!(root.leaf_faces().is_none());
        assert!(root.quadrant(Quadrant::TopRight).is_none());
        assert_eq!(root.node_count(), 4);
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(root.face_count(), 3);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn visit_order_is_quadrants_then_children() {
        let mut root = sample();
        root.add_child(SceneNode::Geometry(std::iter::once(ground(9.0, 9.0)).collect()));

        let mut visitor = CollectingVisitor::new();
        visitor.visit_quad(&root);
        let order: Vec<(f32, f32)> = visitor
            .faces()
            .iter()
            .map(|f| (f.vertices()[0].x, f.vertices()[0].z))
            .collect();
        assert_eq!(order, vec![(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (9.0, 9.0)]);
    }

    #[test]
    fn for_each_node_mut_reaches_every_node() {
        let mut root = sample();
        let mut seen = 0;
        root.try_for_each_node_mut(&mut |_: &mut QuadNode| {
            seen += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, 4);
    }
}
