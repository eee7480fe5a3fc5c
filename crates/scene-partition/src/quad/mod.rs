//! Quad trees over the x/z ground plane.
//!
//! A quad tree recursively divides the bounding square of a face set into
//! four quadrants, cutting faces that cross the dividing lines. Its tight
//! axis-aligned bounds make it suited for visibility culling; see
//! [`CullingVisitor`](crate::CullingVisitor).
//!
//! - [`QuadTreeBuilder`]: Builds trees from face sets or whole scenes
//! - [`QuadNode`]: Tree nodes with a bounding square and up to four quadrants
//! - [`QuadTransformer`]: Replaces scene geometry with quad trees in place

mod builder;
mod node;

pub use builder::{QuadTransformer, QuadTreeBuilder};
pub use node::{QuadNode, Quadrant};
