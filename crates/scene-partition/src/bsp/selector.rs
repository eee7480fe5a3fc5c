//! Divider selection strategies for BSP tree construction.
//!
//! The choice of divider affects tree balance and the number of face splits
//! during construction. Different strategies offer different trade-offs
//! between build time and tree quality.

use std::sync::Arc;

use log::trace;

use crate::config::check_relation;
use crate::error::{PartitionError, Result};
use crate::{BspConfig, Face, FaceRelation, FaceSet};

/// Strategy for selecting which face's plane divides a BSP node.
pub trait DividerSelector {
    /// Select a face from the set to use as the divider.
    ///
    /// The returned face must be a member of `faces`. Fails with
    /// [`PartitionError::EmptyFaceSet`] if the set is empty.
    fn find_divider(&self, faces: &FaceSet, epsilon: f32) -> Result<Arc<Face>>;
}

/// Selects the first face in enumeration order.
///
/// The simplest and fastest selector, but may produce unbalanced trees
/// depending on input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFace;

impl DividerSelector for FirstFace {
    fn find_divider(&self, faces: &FaceSet, _epsilon: f32) -> Result<Arc<Face>> {
        faces.iter().next().cloned().ok_or(PartitionError::EmptyFaceSet)
    }
}

/// Picks the face whose plane cuts the fewest other faces, preferring an
/// even front/back balance among equally good candidates.
///
/// A candidate only qualifies if its balance ratio is at least the current
/// minimum. When a full pass finds no qualifying face, the minimum is
/// multiplied by `relation_scale - 0.01` and the search repeats. Among equally
/// good candidates the first one in enumeration order wins.
///
/// Each pass is O(n²) in the number of faces.
#[derive(Debug, Clone, Copy)]
pub struct BalancedDivider {
    relation_minimum: f32,
    relation_scale: f32,
}

impl Default for BalancedDivider {
    fn default() -> Self {
        let config = BspConfig::default();
        Self {
            relation_minimum: config.relation_minimum,
            relation_scale: config.relation_scale,
        }
    }
}

impl BalancedDivider {
    /// Creates a selector with the given starting minimum and decay scale.
    ///
    /// Fails with [`PartitionError::InvalidConfig`] unless `relation_minimum`
    /// is within `[0, 1]` and `relation_scale` within `(0.01, 1]`.
    pub fn new(relation_minimum: f32, relation_scale: f32) -> Result<Self> {
        check_relation(relation_minimum, relation_scale)?;
        Ok(Self {
            relation_minimum,
            relation_scale,
        })
    }

    /// Creates a selector from the relaxation fields of `config`.
    pub fn from_config(config: &BspConfig) -> Result<Self> {
        Self::new(config.relation_minimum, config.relation_scale)
    }
}

/// How the other faces of a set lie against one candidate's plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    front: usize,
    back: usize,
    span: usize,
}

impl Tally {
    fn count(candidate: &Arc<Face>, faces: &FaceSet, epsilon: f32) -> Self {
        let mut tally = Tally::default();
        for other in faces.iter().filter(|f| !Arc::ptr_eq(f, candidate)) {
            match candidate.compare_position(other, epsilon) {
                FaceRelation::Front | FaceRelation::TouchingFront => tally.front += 1,
                FaceRelation::Back | FaceRelation::TouchingBack => tally.back += 1,
                FaceRelation::Spanning => tally.span += 1,
                FaceRelation::Coplanar => {}
            }
        }
        tally
    }

    /// `min / max` of the front and back counts; 0 if either side is empty.
    fn balance(&self) -> f32 {
        if self.front == 0 || self.back == 0 {
            0.0
        } else if self.front == self.back {
            1.0
        } else {
            self.front.min(self.back) as f32 / self.front.max(self.back) as f32
        }
    }
}

impl DividerSelector for BalancedDivider {
    fn find_divider(&self, faces: &FaceSet, epsilon: f32) -> Result<Arc<Face>> {
        let first = faces.iter().next().ok_or(PartitionError::EmptyFaceSet)?;
        if faces.len() == 1 {
            return Ok(Arc::clone(first));
        }

        // Clamped so every relaxation strictly shrinks the minimum.
        let decay = (self.relation_scale - 0.01).clamp(0.0, 0.99);
        let mut relation_minimum = self.relation_minimum;
        let mut pass = 0;

        loop {
            let mut best: Option<&Arc<Face>> = None;
            let mut min_span = faces.len();
            let mut best_balance = 0.0;

            for candidate in faces {
                let tally = Tally::count(candidate, faces, epsilon);
                let balance = tally.balance();
                if balance >= relation_minimum
                    && (tally.span < min_span
                        || (tally.span == min_span && balance > best_balance))
                {
                    best = Some(candidate);
                    min_span = tally.span;
                    best_balance = balance;
                }
            }

            if let Some(divider) = best {
                trace!(
                    "divider chosen from {} faces after {} relaxations: {} spanning, balance {:.3}",
                    faces.len(),
                    pass,
                    min_span,
                    best_balance
                );
                return Ok(Arc::clone(divider));
            }

            relation_minimum *= decay;
            // Once the minimum is negligible every candidate must qualify.
            if relation_minimum.is_nan() || relation_minimum < f32::EPSILON {
                relation_minimum = 0.0;
            }
            pass += 1;
        }
    }
}
