//! Binary Space Partitioning trees over face sets.
//!
//! A BSP tree recursively partitions 3D space using the planes of its own
//! faces. Every node stores the faces lying in its divider plane; faces in
//! front of or behind the plane live in the front and back subtrees. The tree
//! enables:
//!
//! - Front-to-back and back-to-front traversal relative to an eye point
//! - Visiting a scene's geometry in a fixed spatial order
//!
//! # Example
//!
//! ```ignore
//! use scene_partition::{BspTreeBuilder, CollectingVisitor, SceneVisitor};
//!
//! let faces: FaceSet = /* create faces */;
//! let tree = BspTreeBuilder::new().build_faces(faces)?;
//!
//! // Visit front, span, children, back
//! let mut visitor = CollectingVisitor::new();
//! visitor.visit_bsp(&tree);
//! let ordered = visitor.into_faces();
//! ```
//!
//! # Architecture
//!
//! - [`BspTreeBuilder`]: Builds trees from face sets or whole scenes
//! - [`BspNode`]: Tree nodes storing a divider face and the coplanar faces
//! - [`DividerSelector`]: Strategy trait for choosing the divider face
//! - [`PartitionStrategy`]: Strategy trait for distributing faces around it
//! - [`BspTransformer`]: Replaces scene geometry with BSP trees in place

mod builder;
mod node;
mod partition;
mod selector;

pub use builder::{BspTransformer, BspTreeBuilder};
pub use node::{BspNode, BspStats, DepthOrder};
pub use partition::{DivideStrategy, PartitionStrategy, SplitStrategy};
pub use selector::{BalancedDivider, DividerSelector, FirstFace};
