//! Scene graph nodes and face collection.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{BspNode, FaceSet, QuadNode, SceneVisitor};

/// A node of a scene hierarchy.
///
/// The set of node kinds is closed; traversals dispatch on the variant through
/// [`SceneNode::accept`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneNode {
    /// A plain container of child nodes.
    Group(Vec<SceneNode>),
    /// Leaf geometry.
    Geometry(FaceSet),
    /// Root of a BSP tree.
    Bsp(BspNode),
    /// Root of a quad tree.
    Quad(QuadNode),
}

impl Default for SceneNode {
    fn default() -> Self {
        SceneNode::Group(Vec::new())
    }
}

impl SceneNode {
    /// Dispatches to the visitor method for this node's kind.
    pub fn accept<V: SceneVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            SceneNode::Group(children) => visitor.visit_group(children),
            SceneNode::Geometry(faces) => visitor.visit_geometry(faces),
            SceneNode::Bsp(node) => visitor.visit_bsp(node),
            SceneNode::Quad(node) => visitor.visit_quad(node),
        }
    }

    /// Attached child nodes. Geometry has none; the front/back subtrees and
    /// quadrants of tree nodes are not included.
    pub fn children(&self) -> &[SceneNode] {
        match self {
            SceneNode::Group(children) => children,
            SceneNode::Geometry(_) => &[],
            SceneNode::Bsp(node) => node.children(),
            SceneNode::Quad(node) => node.children(),
        }
    }

    /// Number of faces reachable from this node, counting each occurrence.
    pub fn face_count(&self) -> usize {
        match self {
            SceneNode::Group(children) => children.iter().map(SceneNode::face_count).sum(),
            SceneNode::Geometry(faces) => faces.len(),
            SceneNode::Bsp(node) => node.face_count(),
            SceneNode::Quad(node) => node.face_count(),
        }
    }
}

impl From<FaceSet> for SceneNode {
    fn from(faces: FaceSet) -> Self {
        SceneNode::Geometry(faces)
    }
}

impl From<BspNode> for SceneNode {
    fn from(node: BspNode) -> Self {
        SceneNode::Bsp(node)
    }
}

impl From<QuadNode> for SceneNode {
    fn from(node: QuadNode) -> Self {
        SceneNode::Quad(node)
    }
}

/// Visitor gathering every face reachable from a scene, BSP spans included.
#[derive(Debug, Default)]
pub struct FaceCollector {
    faces: FaceSet,
}

impl FaceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_faces(self) -> FaceSet {
        self.faces
    }
}

impl SceneVisitor for FaceCollector {
    fn visit_geometry(&mut self, faces: &FaceSet) {
        self.faces.add_set(faces);
    }
}

/// Collects all faces of a scene into one set, without duplicates.
pub fn collect_faces(scene: &SceneNode) -> FaceSet {
    let mut collector = FaceCollector::new();
    scene.accept(&mut collector);
    collector.into_faces()
}

/// Replaces every geometry node below (and including) `node` with the result
/// of `replace`. A `None` result removes the geometry node from its parent; an
/// emptied root becomes an empty group. Replacement nodes are not revisited.
pub(crate) fn replace_geometry<F>(node: &mut SceneNode, replace: &mut F) -> Result<()>
where
    F: FnMut(FaceSet) -> Result<Option<SceneNode>>,
{
    match node {
        SceneNode::Geometry(faces) => {
            let faces = std::mem::take(faces);
            *node = replace(faces)?.unwrap_or_default();
        }
        SceneNode::Group(children) => replace_in_children(children, replace)?,
        SceneNode::Bsp(bsp) => bsp.try_for_each_node_mut(&mut |n: &mut BspNode| {
            replace_in_children(n.children_mut(), replace)
        })?,
        SceneNode::Quad(quad) => quad.try_for_each_node_mut(&mut |n: &mut QuadNode| {
            replace_in_children(n.children_mut(), replace)
        })?,
    }
    Ok(())
}

fn replace_in_children<F>(children: &mut Vec<SceneNode>, replace: &mut F) -> Result<()>
where
    F: FnMut(FaceSet) -> Result<Option<SceneNode>>,
{
    for mut child in std::mem::take(children) {
        match child {
            SceneNode::Geometry(faces) => children.extend(replace(faces)?),
            _ => {
                replace_geometry(&mut child, replace)?;
                children.push(child);
            }
        }
    }
    Ok(())
}
