//! Error type shared by face construction, tree building and configuration.

/// Everything that can go wrong while building partition trees.
///
/// A scene without any faces is not an error: the collector-level builders
/// report it as `None`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PartitionError {
    /// Divider search or BSP node construction was invoked with no faces.
    #[error("cannot partition an empty face set")]
    EmptyFaceSet,

    /// The vertices do not span a plane.
    #[error("degenerate face with {vertices} vertices has no supporting plane")]
    DegenerateFace { vertices: usize },

    /// The vertices do not lie in one plane.
    #[error("face vertices deviate {deviation} from their plane")]
    NonPlanarFace { deviation: f32 },

    /// A configuration value is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, PartitionError>;
