//! Quad trees with BSP trees at the leaves.

use log::debug;

use crate::error::Result;
use crate::{BspTreeBuilder, FaceSet, QuadNode, QuadTreeBuilder, SceneNode};

/// Builds a quad tree, then replaces the geometry of every unsubdivided leaf
/// with a BSP tree built from exactly that leaf's faces.
///
/// Interior quad nodes are walked but left untouched.
#[derive(Debug, Clone, Default)]
pub struct QuadBspBuilder {
    quad: QuadTreeBuilder,
    bsp: BspTreeBuilder,
}

impl QuadBspBuilder {
    /// Creates a hybrid builder from a quad tree builder and a BSP tree builder.
    pub fn new(quad: QuadTreeBuilder, bsp: BspTreeBuilder) -> Self {
        Self { quad, bsp }
    }

    /// Builds a hybrid tree over every face reachable from `scene`.
    ///
    /// Returns `Ok(None)` if the scene holds no faces.
    pub fn build(&self, scene: &SceneNode) -> Result<Option<QuadNode>> {
        let Some(mut quad) = self.quad.build(scene)? else {
            return Ok(None);
        };
        self.attach_bsp_trees(&mut quad)?;
        Ok(Some(quad))
    }

    /// Builds a hybrid tree from a face set.
    pub fn build_faces(&self, faces: FaceSet) -> Result<QuadNode> {
        let mut quad = self.quad.build_faces(faces)?;
        self.attach_bsp_trees(&mut quad)?;
        Ok(quad)
    }

    fn attach_bsp_trees(&self, quad: &mut QuadNode) -> Result<()> {
        let mut replaced = 0;
        quad.try_for_each_node_mut(&mut |node: &mut QuadNode| {
            let Some(faces) = node.leaf_faces() else {
                return Ok(());
            };
            // A failed build leaves the leaf geometry in place.
            let tree = self.bsp.build_faces(faces.clone())?;
            *node.children_mut() = vec![SceneNode::Bsp(tree)];
            replaced += 1;
            Ok(())
        })?;
        debug!("replaced {} quad leaves with BSP trees", replaced);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collect_faces, Face, SceneVisitor};

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Face {
        Face::triangle(a.into(), b.into(), c.into()).unwrap()
    }

    /// Ground tiles plus one vertical wall per tile.
    fn scene(n: usize) -> SceneNode {
        let faces: FaceSet = (0..n * n)
            .flat_map(|i| {
                let (x, z) = ((i % n) as f32, (i / n) as f32);
                [
                    make_triangle([x, 0.0, z], [x, 0.0, z + 1.0], [x + 1.0, 0.0, z]),
                    make_triangle([x + 0.2, 0.0, z + 0.5], [x + 0.8, 0.0, z + 0.5], [x + 0.2, 1.0, z + 0.5]),
                ]
            })
            .collect();
        SceneNode::Group(vec![SceneNode::Geometry(faces)])
    }

    fn small_quads() -> QuadTreeBuilder {
        let mut quad = QuadTreeBuilder::new();
        quad.set_max_face_count(8);
        quad.set_max_quad_size(1.0);
        quad
    }

    fn check_leaves(node: &QuadNode, leaves: &mut usize) {
        if node.is_leaf() {
            *leaves += 1;
            assert_eq!(node.children().len(), 1);
            assert!(matches!(node.children()[0], SceneNode::Bsp(_)));
        } else {
            assert!(node.children().is_empty());
        }
        for (_, child) in node.quadrants() {
            check_leaves(child, leaves);
        }
    }

    #[test]
    fn empty_scene_is_none() {
        let builder = QuadBspBuilder::default();
        assert!(builder.build(&SceneNode::default()).unwrap().is_none());
    }

    #[test]
    fn every_leaf_becomes_bsp() {
        let builder = QuadBspBuilder::new(small_quads(), BspTreeBuilder::new());
        let tree = builder.build(&scene(4)).unwrap().unwrap();

        let mut leaves = 0;
        check_leaves(&tree, &mut leaves);
        assert_eq!(leaves, tree.leaf_count());
        assert!(leaves > 1);
    }

    #[test]
    fn flattening_conserves_faces() {
        let source = scene(4);
        let quad_only = small_quads().build(&source).unwrap().unwrap();
        let hybrid = QuadBspBuilder::new(small_quads(), BspTreeBuilder::new())
            .build(&source)
            .unwrap()
            .unwrap();

        // Every tile lies inside one quadrant, so the quad pass cuts nothing.
        assert_eq!(quad_only.face_count(), 32);
        // The ground plane cuts no face and is chosen first in every leaf.
        let flattened = collect_faces(&SceneNode::Quad(hybrid));
        assert_eq!(flattened.len(), quad_only.face_count());
    }

    #[test]
    fn failed_leaf_keeps_its_geometry() {
        let faces: FaceSet = std::iter::once(make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0])).collect();
        let bounds = faces.bounding_box().unwrap().ground_square();
        let mut tree = QuadNode::interior(
            bounds,
            [
                Some(QuadNode::leaf(bounds, FaceSet::new())),
                Some(QuadNode::leaf(bounds, faces)),
                None,
                None,
            ],
        );

        let builder = QuadBspBuilder::default();
        assert_eq!(builder.attach_bsp_trees(&mut tree), Err(crate::PartitionError::EmptyFaceSet));
        let untouched = tree.quadrant(crate::Quadrant::TopRight).unwrap();
        assert_eq!(untouched.leaf_faces().map(FaceSet::len), Some(1));
        let failed = tree.quadrant(crate::Quadrant::TopLeft).unwrap();
        assert!(failed.leaf_faces().is_some());
    }

    #[test]
    fn single_leaf_tree() {
        let tree = QuadBspBuilder::default()
            .build_faces(collect_faces(&scene(2)))
            .unwrap();
        assert!(tree.is_leaf());

        let mut count = 0;
        crate::FnVisitor::new(|faces: &FaceSet| count += faces.len()).visit_quad(&tree);
        assert_eq!(count, 8);
    }
}
