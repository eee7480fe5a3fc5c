//! Graphviz export of scene structure.
//!
//! Quad nodes are drawn as boxes, geometry leaves as ellipses with their face
//! count. A BSP tree is drawn as a single triangle labeled with its
//! statistics; its inner nodes are not expanded.

use std::fmt::Write;

use crate::{BspNode, FaceSet, QuadNode, SceneNode, SceneVisitor};

/// Visitor writing a Graphviz `digraph` of the visited scene.
#[derive(Debug, Default)]
pub struct DotVisitor {
    body: String,
    next_id: usize,
    parents: Vec<usize>,
}

impl DotVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes the graph and returns its source.
    pub fn finish(self) -> String {
        format!("digraph scene {{\n{}}}\n", self.body)
    }

    /// Emits a node linked to the current parent and returns its id.
    fn add_node(&mut self, shape: &str, label: &str) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let _ = writeln!(self.body, "  n{id} [shape={shape}, label=\"{label}\"];");
        if let Some(parent) = self.parents.last() {
            let _ = writeln!(self.body, "  n{parent} -> n{id};");
        }
        id
    }
}

impl SceneVisitor for DotVisitor {
    fn visit_group(&mut self, children: &[SceneNode]) {
        let id = self.add_node("folder", "Group");
        self.parents.push(id);
        for child in children {
            child.accept(self);
        }
        self.parents.pop();
    }

    fn visit_geometry(&mut self, faces: &FaceSet) {
        self.add_node("ellipse", &format!("Geometry\\n{} faces", faces.len()));
    }

    fn visit_bsp(&mut self, node: &BspNode) {
        let stats = node.stats();
        let label = format!(
            "BSP Tree\\nFace count: {}\\nNode count: {}\\nBalance: {:.2}\\nMin depth: {}\\nMax depth: {}",
            stats.face_count, stats.node_count, stats.balance, stats.min_depth, stats.max_depth
        );
        self.add_node("triangle", &label);
    }

    fn visit_quad(&mut self, node: &QuadNode) {
        let id = self.add_node("box", &format!("Quad Node\\n{} faces", node.face_count()));
        self.parents.push(id);
        node.visit_sub_nodes(self);
        self.parents.pop();
    }
}

/// Renders `scene` as Graphviz source.
pub fn to_dot(scene: &SceneNode) -> String {
    let mut visitor = DotVisitor::new();
    scene.accept(&mut visitor);
    visitor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BspTreeBuilder, Face, QuadTreeBuilder};

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Face {
        Face::triangle(a.into(), b.into(), c.into()).unwrap()
    }

    fn ground(n: usize) -> FaceSet {
        (0..n * n)
            .map(|i| {
                let (x, z) = ((i % n) as f32, (i / n) as f32);
                make_triangle([x, 0.0, z], [x, 0.0, z + 1.0], [x + 1.0, 0.0, z])
            })
            .collect()
    }

    #[test]
    fn empty_group() {
        let dot = to_dot(&SceneNode::default());
        assert_eq!(dot, "digraph scene {\n  n0 [shape=folder, label=\"Group\"];\n}\n");
    }

    #[test]
    fn geometry_under_group_is_linked() {
        let scene = SceneNode::Group(vec![SceneNode::Geometry(ground(2))]);
        let dot = to_dot(&scene);
        assert!(dot.contains("n1 [shape=ellipse, label=\"Geometry\\n4 faces\"];"));
        assert!(dot.contains("n0 -> n1;"));
    }

    #[test]
    fn bsp_tree_is_one_triangle() {
        let tree = BspTreeBuilder::new().build_faces(ground(2)).unwrap();
        let dot = to_dot(&SceneNode::Bsp(tree));
        assert_eq!(dot.matches("shape=").count(), 1);
        assert!(dot.contains("shape=triangle"));
        assert!(dot.contains("Face count: 4"));
    }

    #[test]
    fn quad_nodes_link_to_quadrants() {
        let mut builder = QuadTreeBuilder::new();
        builder.set_max_face_count(4);
        builder.set_max_quad_size(1.0);
        let tree = builder.build_faces(ground(4)).unwrap();
        let nodes = tree.node_count();
        let leaves = tree.leaf_count();

        let dot = to_dot(&SceneNode::Quad(tree));
        assert_eq!(dot.matches("shape=box").count(), nodes);
        assert_eq!(dot.matches("shape=ellipse").count(), leaves);
        // Every node but the root has exactly one incoming edge.
        assert_eq!(dot.matches(" -> ").count(), nodes + leaves - 1);
    }
}
