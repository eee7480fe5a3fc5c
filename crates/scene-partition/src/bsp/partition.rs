//! Partition strategies: how a face set is distributed around a divider.

use std::sync::Arc;

use log::trace;

use crate::{Division, Face, FaceSet, Partition, PartitionPolicy};

/// Distributes a face set into front, span and back sets around a divider.
///
/// The input set is consumed. When the divider is a member of the input it
/// always ends up in `span`, never in `front` or `back`.
pub trait PartitionStrategy {
    fn partition(&self, divider: &Arc<Face>, faces: FaceSet, epsilon: f32) -> Partition;
}

/// Cuts spanning faces in two. Geometry is never duplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitStrategy;

/// Places spanning faces, whole, on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivideStrategy;

impl PartitionStrategy for SplitStrategy {
    fn partition(&self, divider: &Arc<Face>, mut faces: FaceSet, epsilon: f32) -> Partition {
        let divider_member = faces.remove(divider);
        let mut partition = faces.split(divider.plane(), epsilon);
        if let Some(divider) = divider_member {
            partition.span.push_unique(divider);
        }
        partition
    }
}

impl PartitionStrategy for DivideStrategy {
    fn partition(&self, divider: &Arc<Face>, mut faces: FaceSet, epsilon: f32) -> Partition {
        let divider_member = faces.remove(divider);
        let Division {
            front,
            mut span,
            back,
            duplicated,
        } = faces.divide(divider.plane(), epsilon);
        if !duplicated.is_empty() {
            trace!("{} spanning faces duplicated on both sides", duplicated.len());
        }
        if let Some(divider) = divider_member {
            span.push_unique(divider);
        }
        Partition { front, span, back }
    }
}

impl PartitionStrategy for PartitionPolicy {
    fn partition(&self, divider: &Arc<Face>, faces: FaceSet, epsilon: f32) -> Partition {
        match self {
            PartitionPolicy::Split => SplitStrategy.partition(divider, faces, epsilon),
            PartitionPolicy::Divide => DivideStrategy.partition(divider, faces, epsilon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPSILON;

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Face {
        Face::triangle(a.into(), b.into(), c.into()).unwrap()
    }

    /// Divider in y = 0, plus one face above, one below and one crossing it.
    fn scene() -> (Arc<Face>, FaceSet) {
        let divider = Arc::new(make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]));
        let mut faces = FaceSet::new();
        faces.add(Arc::clone(&divider));
        faces.add(Arc::new(make_triangle([0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 0.0])));
        faces.add(Arc::new(make_triangle([0.0, -1.0, 0.0], [0.0, -1.0, 1.0], [1.0, -1.0, 0.0])));
        faces.add(Arc::new(make_triangle([0.0, -1.0, 0.5], [0.0, 1.0, 0.5], [1.0, -1.0, 0.5])));
        (divider, faces)
    }

    #[test]
    fn split_keeps_divider_in_span() {
        let (divider, faces) = scene();
        let partition = SplitStrategy.partition(&divider, faces, DEFAULT_EPSILON);

        assert_eq!(partition.span.len(), 1);
        assert!(partition.span.contains(&divider));
        assert_eq!(partition.front.len(), 2);
        assert_eq!(partition.back.len(), 2);
    }

    #[test]
    fn divide_shares_spanning_face() {
        let (divider, faces) = scene();
        let spanning = Arc::clone(faces.iter().last().unwrap());
        let partition = DivideStrategy.partition(&divider, faces, DEFAULT_EPSILON);

        assert!(partition.span.contains(&divider));
        assert!(partition.front.contains(&spanning));
        assert!(partition.back.contains(&spanning));
        assert_eq!(partition.front.len() + partition.back.len(), 4);
    }

    #[test]
    fn policy_dispatches() {
        let (divider, faces) = scene();
        let spanning = Arc::clone(faces.iter().last().unwrap());
        let split = PartitionPolicy::Split.partition(&divider, faces.clone(), DEFAULT_EPSILON);
        let divide = PartitionPolicy::Divide.partition(&divider, faces, DEFAULT_EPSILON);

        assert!(!split.front.contains(&spanning));
        assert!(!split.back.contains(&spanning));
        assert!(divide.front.contains(&spanning));
        assert!(divide.back.contains(&spanning));
    }
}
