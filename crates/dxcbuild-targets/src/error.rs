//! Error types for target resolution.

/// Errors that can occur while resolving a build target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// Platform is not part of the target matrix.
    #[error("invalid platform '{value}'. Must be one of the following: {}", .allowed.join(", "))]
    InvalidPlatform {
        /// The rejected platform string.
        value: String,
        /// Every platform the matrix accepts, in matrix order.
        allowed: Vec<String>,
    },

    /// Architecture is not part of the target matrix.
    #[error("invalid architecture '{value}'. Must be one of the following: {}", .allowed.join(", "))]
    InvalidArchitecture {
        /// The rejected architecture string.
        value: String,
        /// Every architecture the matrix accepts, in matrix order.
        allowed: Vec<String>,
    },

    /// Host architecture is 32-bit or could not be classified.
    #[error("unsupported host architecture '{host_arch}': only 64-bit ARM and x86 hosts can be targeted implicitly (pass -A to choose one)")]
    UnsupportedArchitecture {
        /// The raw machine name reported by the host.
        host_arch: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
