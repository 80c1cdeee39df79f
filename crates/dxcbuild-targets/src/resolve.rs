//! Resolution of requested or host-derived values into a validated target.

use std::fmt;

use crate::error::Result;
use crate::host::{classify_architecture, normalize_platform, HostInfo};
use crate::matrix::TargetMatrix;

/// A validated `(architecture, platform)` pair with optional CPU tuning.
///
/// Only constructible through [`ResolvedTarget::new`] or [`resolve`], so both
/// fields are always members of the matrix they were checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    architecture: String,
    platform: String,
    cpu: Option<String>,
}

impl ResolvedTarget {
    /// Validate `architecture` and `platform` against `matrix`, platform first.
    pub fn new(matrix: &TargetMatrix, architecture: &str, platform: &str) -> Result<Self> {
        let platform = matrix.validate_platform(platform)?;
        let architecture = matrix.validate_architecture(architecture)?;
        Ok(Self {
            architecture: architecture.to_string(),
            platform: platform.to_string(),
            cpu: None,
        })
    }

    /// Attach a CPU-specific tuning identifier.
    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn cpu(&self) -> Option<&str> {
        self.cpu.as_deref()
    }

    /// The combined `"{architecture}-{platform}"` target string.
    pub fn triple(&self) -> String {
        format!("{}-{}", self.architecture, self.platform)
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.architecture, self.platform)?;
        if let Some(cpu) = &self.cpu {
            write!(f, " (cpu: {cpu})")?;
        }
        Ok(())
    }
}

/// Resolve a build target, falling back to `host` for anything not requested.
///
/// The platform is resolved and validated before the architecture is looked
/// at; only the first failure is reported.
pub fn resolve(
    matrix: &TargetMatrix,
    requested_platform: Option<&str>,
    requested_arch: Option<&str>,
    host: &HostInfo,
) -> Result<ResolvedTarget> {
    let platform = match requested_platform {
        Some(p) => p.to_string(),
        None => normalize_platform(&host.os),
    };
    let platform = matrix.validate_platform(&platform)?;

    let architecture = match requested_arch {
        Some(a) => a,
        None => classify_architecture(&host.arch)?,
    };

    ResolvedTarget::new(matrix, architecture, platform)
}
