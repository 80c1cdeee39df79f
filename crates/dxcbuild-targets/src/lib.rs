//! Target matrix definitions and host-aware target resolution for dxcbuild.
//!
//! A build target is an `(architecture, platform)` pair drawn from a fixed
//! [`TargetMatrix`]. Values the user does not request explicitly are derived
//! from the host:
//! - **Platform:** the raw host OS name is mapped onto the matrix vocabulary
//! - **Architecture:** the raw machine name is classified by substring,
//!   rejecting anything that is not 64-bit

pub mod error;
pub mod host;
pub mod matrix;
pub mod resolve;

pub use error::{Result, TargetError};
pub use host::{classify_architecture, normalize_platform, HostInfo};
pub use matrix::TargetMatrix;
pub use resolve::{resolve, ResolvedTarget};
