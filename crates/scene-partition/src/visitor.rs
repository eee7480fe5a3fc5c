//! Visitor pattern for scene and tree traversal.
//!
//! A traversal implements [`SceneVisitor`] and overrides the methods for the
//! node kinds it cares about. The defaults recurse, so an unhandled kind is
//! simply walked through. The order in which a node's parts are visited is
//! fixed by the node kind:
//!
//! - [`BspNode`]: front subtree, span geometry, attached children, back subtree
//! - [`QuadNode`]: top-left, top-right, bottom-left, bottom-right, attached children

use std::sync::Arc;

use crate::{Aabb, BspNode, Face, FaceSet, QuadNode, SceneNode};

/// Double-dispatch visitor over [`SceneNode`] kinds.
pub trait SceneVisitor {
    fn visit_group(&mut self, children: &[SceneNode]) {
        for child in children {
            child.accept(self);
        }
    }

    /// Called for each geometry leaf, including the span of every BSP node.
    fn visit_geometry(&mut self, _faces: &FaceSet) {}

    fn visit_bsp(&mut self, node: &BspNode) {
        node.visit_sub_nodes(self);
    }

    fn visit_quad(&mut self, node: &QuadNode) {
        node.visit_sub_nodes(self);
    }
}

/// A simple visitor that collects all visited faces, in visiting order.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Arc<Face>>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the visitor, returning the collected faces.
    pub fn into_faces(self) -> Vec<Arc<Face>> {
        self.collected
    }

    pub fn faces(&self) -> &[Arc<Face>] {
        &self.collected
    }
}

impl SceneVisitor for CollectingVisitor {
    fn visit_geometry(&mut self, faces: &FaceSet) {
        self.collected.extend(faces.iter().cloned());
    }
}

/// A visitor that calls a closure for each geometry leaf.
pub struct FnVisitor<F>
where
    F: FnMut(&FaceSet),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&FaceSet),
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> SceneVisitor for FnVisitor<F>
where
    F: FnMut(&FaceSet),
{
    fn visit_geometry(&mut self, faces: &FaceSet) {
        (self.func)(faces);
    }
}

/// Visibility test supplied by the rendering front-end.
pub trait ViewingVolume {
    fn is_visible(&self, bounds: &Aabb) -> bool;
}

/// A box volume sees everything it overlaps.
impl ViewingVolume for Aabb {
    fn is_visible(&self, bounds: &Aabb) -> bool {
        self.intersects(bounds)
    }
}

impl<F> ViewingVolume for F
where
    F: Fn(&Aabb) -> bool,
{
    fn is_visible(&self, bounds: &Aabb) -> bool {
        self(bounds)
    }
}

/// Skips quad subtrees whose bounding box is outside the viewing volume and
/// forwards the remaining geometry to an inner visitor.
///
/// BSP nodes carry no bounding box and are always descended once reached;
/// their culling relies on the enclosing quad node.
pub struct CullingVisitor<'a, C: ?Sized, V> {
    volume: &'a C,
    inner: V,
    culled: usize,
    visited: usize,
}

impl<'a, C, V> CullingVisitor<'a, C, V>
where
    C: ViewingVolume + ?Sized,
    V: SceneVisitor,
{
    /// Wraps `inner` so it only sees quad subtrees overlapping `volume`.
    pub fn new(volume: &'a C, inner: V) -> Self {
        Self {
            volume,
            inner,
            culled: 0,
            visited: 0,
        }
    }

    /// Number of quad subtrees skipped.
    pub fn culled(&self) -> usize {
        self.culled
    }

    /// Number of geometry leaves forwarded to the inner visitor.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Returns a reference to the wrapped visitor.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Consumes the culler, returning the wrapped visitor.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<C, V> SceneVisitor for CullingVisitor<'_, C, V>
where
    C: ViewingVolume + ?Sized,
    V: SceneVisitor,
{
    fn visit_geometry(&mut self, faces: &FaceSet) {
        self.visited += 1;
        self.inner.visit_geometry(faces);
    }

    fn visit_quad(&mut self, node: &QuadNode) {
        if self.volume.is_visible(node.bounds()) {
            node.visit_sub_nodes(self);
        } else {
            self.culled += 1;
        }
    }
}
