//! BSP tree construction.

use log::{debug, trace};

use crate::error::Result;
use crate::scene::replace_geometry;
use crate::{collect_faces, BspConfig, FaceSet, Partition, PartitionPolicy, SceneNode};

use super::node::BspNode;
use super::partition::PartitionStrategy;
use super::selector::{BalancedDivider, DividerSelector};

/// Builds BSP trees from face sets or scenes.
///
/// The divider selector and partition strategy are fixed when the builder is
/// created and used for every node of every tree it builds.
///
/// ```ignore
/// use scene_partition::{BspTreeBuilder, SceneNode};
///
/// let scene: SceneNode = /* ... */;
/// let builder = BspTreeBuilder::new();
/// if let Some(tree) = builder.build(&scene)? {
///     println!("{} nodes, depth {}", tree.node_count(), tree.depth());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BspTreeBuilder<S = BalancedDivider, P = PartitionPolicy> {
    selector: S,
    partition: P,
    epsilon: f32,
}

impl Default for BspTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BspTreeBuilder {
    /// Builder with the balanced divider, the split policy and the default epsilon.
    pub fn new() -> Self {
        let config = BspConfig::default();
        Self::with_strategies(BalancedDivider::default(), config.policy, config.epsilon)
    }

    /// Builder configured from a validated [`BspConfig`].
    pub fn try_from_config(config: &BspConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_strategies(
            BalancedDivider::from_config(config)?,
            config.policy,
            config.epsilon,
        ))
    }
}

impl<S: DividerSelector, P: PartitionStrategy> BspTreeBuilder<S, P> {
    /// Creates a builder from an explicit selector, partition strategy and
    /// classification epsilon.
    pub fn with_strategies(selector: S, partition: P, epsilon: f32) -> Self {
        Self {
            selector,
            partition,
            epsilon,
        }
    }

    /// Returns the classification epsilon.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Builds a BSP tree from a face set.
    ///
    /// Fails with [`PartitionError::EmptyFaceSet`](crate::PartitionError::EmptyFaceSet)
    /// if `faces` is empty.
    pub fn build_faces(&self, faces: FaceSet) -> Result<BspNode> {
        let input = faces.len();
        let node = self.build_node(faces)?;
        debug!(
            "built BSP tree from {} faces: {} nodes, {} faces, depth {}",
            input,
            node.node_count(),
            node.face_count(),
            node.depth()
        );
        Ok(node)
    }

    /// Builds a BSP tree over every face reachable from `scene`.
    ///
    /// Returns `Ok(None)` if the scene holds no faces.
    pub fn build(&self, scene: &SceneNode) -> Result<Option<BspNode>> {
        let faces = collect_faces(scene);
        if faces.is_empty() {
            debug!("no faces in scene, no BSP tree built");
            return Ok(None);
        }
        self.build_faces(faces).map(Some)
    }

    /// Recursively builds a BSP node.
    ///
    /// The divider always lands in the span, so both sides hold fewer faces
    /// than `faces` and the recursion terminates. Depth is bounded only by the
    /// face count.
    fn build_node(&self, faces: FaceSet) -> Result<BspNode> {
        let divider = self.selector.find_divider(&faces, self.epsilon)?;
        let Partition { front, span, back } = self.partition.partition(&divider, faces, self.epsilon);
        trace!(
            "BSP node: {} front, {} span, {} back",
            front.len(),
            span.len(),
            back.len()
        );

        let front = self.build_side(front)?;
        let back = self.build_side(back)?;
        Ok(BspNode::new(divider, span, front, back))
    }

    fn build_side(&self, faces: FaceSet) -> Result<Option<BspNode>> {
        if faces.is_empty() {
            return Ok(None);
        }
        self.build_node(faces).map(Some)
    }
}

/// Converts every geometry node of a scene into a BSP tree, in place.
///
/// Geometry nodes without faces are removed instead.
#[derive(Debug, Clone)]
pub struct BspTransformer<S = BalancedDivider, P = PartitionPolicy> {
    builder: BspTreeBuilder<S, P>,
}

impl Default for BspTransformer {
    fn default() -> Self {
        Self::new(BspTreeBuilder::new())
    }
}

impl<S: DividerSelector, P: PartitionStrategy> BspTransformer<S, P> {
    /// Creates a transformer that builds every tree with `builder`.
    pub fn new(builder: BspTreeBuilder<S, P>) -> Self {
        Self { builder }
    }

    /// Replaces each geometry node of `scene` with a BSP tree over its faces.
    pub fn transform(&self, scene: &mut SceneNode) -> Result<()> {
        replace_geometry(scene, &mut |faces: FaceSet| {
            if faces.is_empty() {
                return Ok(None);
            }
            self.builder.build_faces(faces).map(|node| Some(SceneNode::Bsp(node)))
        })
    }
}
