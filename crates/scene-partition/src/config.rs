//! Builder configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};
use crate::DEFAULT_EPSILON;

/// How a BSP step treats faces that span the divider plane.
///
/// Fixed for the whole of one tree build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionPolicy {
    /// Cut spanning faces in two at the divider plane.
    #[default]
    Split,
    /// Keep spanning faces whole and place them on both sides.
    Divide,
}

/// Configuration of the BSP tree builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    /// Classification tolerance.
    pub epsilon: f32,
    /// Balance ratio a divider must reach on the first selection pass.
    pub relation_minimum: f32,
    /// The minimum is multiplied by `relation_scale - 0.01` after a pass
    /// without any qualifying divider.
    pub relation_scale: f32,
    pub policy: PartitionPolicy,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            relation_minimum: 0.0,
            relation_scale: 0.5,
            policy: PartitionPolicy::Split,
        }
    }
}

impl BspConfig {
    /// Checks every field's range.
    pub fn validate(&self) -> Result<()> {
        check_epsilon(self.epsilon)?;
        check_relation(self.relation_minimum, self.relation_scale)
    }
}

/// Range checks for the divider relaxation parameters.
pub(crate) fn check_relation(relation_minimum: f32, relation_scale: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&relation_minimum) {
        return Err(PartitionError::InvalidConfig {
            field: "relation_minimum",
            reason: "must be within [0, 1]",
        });
    }
    // The decay factor must shrink the minimum and never flip its sign.
    if !(relation_scale > 0.01 && relation_scale <= 1.0) {
        return Err(PartitionError::InvalidConfig {
            field: "relation_scale",
            reason: "must be within (0.01, 1]",
        });
    }
    Ok(())
}

/// Configuration of the quad tree builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadConfig {
    /// A node holding at most this many faces becomes a leaf.
    pub max_face_count: usize,
    /// A node whose bounding square has x and z half extents at most this
    /// large becomes a leaf.
    pub max_half_size: f32,
    /// A node at this depth becomes a leaf regardless of its contents.
    pub max_depth: usize,
    /// Classification tolerance for the quadrant splits.
    pub epsilon: f32,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            max_face_count: 100,
            max_half_size: 5.0,
            max_depth: 32,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl QuadConfig {
    /// Sets the maximum number of faces in a leaf.
    pub fn set_max_face_count(&mut self, count: usize) {
        self.max_face_count = count;
    }

    /// Sets the maximum full side length of a leaf's bounding square.
    pub fn set_max_quad_size(&mut self, size: f32) {
        self.max_half_size = size / 2.0;
    }

    pub fn validate(&self) -> Result<()> {
        check_epsilon(self.epsilon)?;
        if self.max_face_count == 0 {
            return Err(PartitionError::InvalidConfig {
                field: "max_face_count",
                reason: "must be at least 1",
            });
        }
        if !(self.max_half_size > 0.0 && self.max_half_size.is_finite()) {
            return Err(PartitionError::InvalidConfig {
                field: "max_half_size",
                reason: "must be positive and finite",
            });
        }
        Ok(())
    }
}

fn check_epsilon(epsilon: f32) -> Result<()> {
    if epsilon > 0.0 && epsilon.is_finite() {
        Ok(())
    } else {
        Err(PartitionError::InvalidConfig {
            field: "epsilon",
            reason: "must be positive and finite",
        })
    }
}
