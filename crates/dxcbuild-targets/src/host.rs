//! Host detection and normalization into the target matrix vocabulary.

use crate::error::{Result, TargetError};

/// Raw description of the machine the build is launched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// OS name as `uname -s` spells it (e.g., "Linux", "Darwin", "Windows").
    pub os: String,
    /// Lower-cased machine name (e.g., "x86_64", "aarch64", "i686").
    pub arch: String,
}

impl HostInfo {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into().to_lowercase(),
        }
    }

    /// Describe the host this binary was compiled to run on.
    pub fn detect() -> Self {
        let os = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "Darwin",
            "windows" => "Windows",
            other => other,
        };
        Self::new(os, std::env::consts::ARCH)
    }
}

/// Map a raw host OS name onto a matrix platform identifier.
///
/// Unknown names pass through unchanged and are left for matrix
/// validation to reject.
pub fn normalize_platform(host_os: &str) -> String {
    match host_os {
        "Linux" => "linux-gnu".to_string(),
        "Darwin" => "macosx-none".to_string(),
        "Windows" => "windows-gnu".to_string(),
        other => other.to_string(),
    }
}

/// Classify a raw machine name as one of the 64-bit architecture identifiers.
pub fn classify_architecture(host_arch: &str) -> Result<&'static str> {
    let arch = host_arch.to_lowercase();
    let unsupported = || TargetError::UnsupportedArchitecture {
        host_arch: host_arch.to_string(),
    };

    if !arch.contains("64") {
        return Err(unsupported());
    }

    if arch.contains("aarch") || arch.contains("arm") {
        Ok("aarch64")
    } else if arch.contains("x86") || arch.contains("amd") {
        Ok("x86_64")
    } else {
        Err(unsupported())
    }
}
