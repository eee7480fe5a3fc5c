//! Spatial partitioning of static scene geometry.
//!
//! Builds BSP trees, quad trees and quad trees with BSP leaves over sets of
//! planar faces, and walks them through a double-dispatch visitor:
//!
//! - [`BspTreeBuilder`] answers "in what order must faces be drawn" through
//!   the fixed front/span/back visiting order and [`BspNode::traverse`].
//! - [`QuadTreeBuilder`] answers "what is potentially visible" through the
//!   bounding squares consulted by [`CullingVisitor`].
//! - [`QuadBspBuilder`] combines both.
//!
//! ```ignore
//! use scene_partition::{CollectingVisitor, CullingVisitor, QuadBspBuilder, SceneNode};
//!
//! let scene: SceneNode = /* load geometry */;
//! if let Some(tree) = QuadBspBuilder::default().build(&scene)? {
//!     let mut culler = CullingVisitor::new(&view_box, CollectingVisitor::new());
//!     culler.visit_quad(&tree);
//!     let visible = culler.into_inner().into_faces();
//! }
//! ```

mod aabb;
pub mod bsp;
mod config;
mod cuttable;
mod dot;
mod error;
mod face;
mod face_set;
mod hybrid;
mod plane;
pub mod quad;
mod scene;
mod visitor;

pub use aabb::Aabb;
pub use bsp::{BspNode, BspStats, BspTransformer, BspTreeBuilder, DepthOrder};
pub use config::{BspConfig, PartitionPolicy, QuadConfig};
pub use cuttable::Cuttable;
pub use dot::{to_dot, DotVisitor};
pub use error::{PartitionError, Result};
pub use face::{Face, FaceRelation, PLANARITY_EPSILON};
pub use face_set::{Division, FaceSet, Partition};
pub use hybrid::QuadBspBuilder;
pub use plane::{Plane3D, PlaneSide, DEFAULT_EPSILON};
pub use quad::{QuadNode, QuadTransformer, QuadTreeBuilder, Quadrant};
pub use scene::{collect_faces, FaceCollector, SceneNode};
pub use visitor::{CollectingVisitor, CullingVisitor, FnVisitor, SceneVisitor, ViewingVolume};
