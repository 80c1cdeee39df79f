//! The fixed set of supported platforms and architectures.

use crate::error::{Result, TargetError};

/// Supported platform and architecture identifiers.
///
/// Both sets are known at compile time and membership is exact string
/// equality. The order of each set is the order used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMatrix {
    platforms: &'static [&'static str],
    architectures: &'static [&'static str],
}

impl TargetMatrix {
    /// The matrix mach-dxcompiler can be cross-compiled for.
    pub const MACH: TargetMatrix = TargetMatrix::new(
        &["windows-gnu", "linux-gnu", "macosx-none"],
        &["aarch64", "x86_64"],
    );

    /// Build a matrix from its two identifier sets.
    ///
    /// Panics if either set is empty; used in a `const` this is a compile error.
    pub const fn new(
        platforms: &'static [&'static str],
        architectures: &'static [&'static str],
    ) -> Self {
        assert!(!platforms.is_empty(), "target matrix needs at least one platform");
        assert!(
            !architectures.is_empty(),
            "target matrix needs at least one architecture"
        );
        Self {
            platforms,
            architectures,
        }
    }

    /// Allowed platform identifiers.
    pub fn platforms(&self) -> &'static [&'static str] {
        self.platforms
    }

    /// Allowed architecture identifiers.
    pub fn architectures(&self) -> &'static [&'static str] {
        self.architectures
    }

    pub fn contains_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| *p == platform)
    }

    pub fn contains_architecture(&self, architecture: &str) -> bool {
        self.architectures.iter().any(|a| *a == architecture)
    }

    /// Check `platform` against the matrix, returning the canonical entry.
    pub fn validate_platform(&self, platform: &str) -> Result<&'static str> {
        self.platforms
            .iter()
            .copied()
            .find(|p| *p == platform)
            .ok_or_else(|| TargetError::InvalidPlatform {
                value: platform.to_string(),
                allowed: to_owned(self.platforms),
            })
    }

    /// Check `architecture` against the matrix, returning the canonical entry.
    pub fn validate_architecture(&self, architecture: &str) -> Result<&'static str> {
        self.architectures
            .iter()
            .copied()
            .find(|a| *a == architecture)
            .ok_or_else(|| TargetError::InvalidArchitecture {
                value: architecture.to_string(),
                allowed: to_owned(self.architectures),
            })
    }

    /// Every `(architecture, platform)` pair, platform-major.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.platforms.iter().flat_map(move |platform| {
            self.architectures
                .iter()
                .map(move |architecture| (*architecture, *platform))
        })
    }
}

impl Default for TargetMatrix {
    fn default() -> Self {
        Self::MACH
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mach_matrix_contents() {
        let m = TargetMatrix::MACH;
        assert_eq!(m.platforms(), ["windows-gnu", "linux-gnu", "macosx-none"]);
        assert_eq!(m.architectures(), ["aarch64", "x86_64"]);
        assert_eq!(TargetMatrix::default(), m);
    }

    #[test]
    fn membership_is_exact() {
        let m = TargetMatrix::MACH;
        assert!(m.contains_platform("linux-gnu"));
        assert!(!m.contains_platform("linux"));
        assert!(!m.contains_platform("Linux-gnu"));
        assert!(!m.contains_platform("linux-gnu "));
        assert!(m.contains_architecture("x86_64"));
        assert!(!m.contains_architecture("amd64"));
    }

    #[test]
    fn validate_platform_reports_allowed_set() {
        let err = TargetMatrix::MACH.validate_platform("plan9").unwrap_err();
        assert_eq!(
            err,
            TargetError::InvalidPlatform {
                value: "plan9".into(),
                allowed: vec![
                    "windows-gnu".into(),
                    "linux-gnu".into(),
                    "macosx-none".into()
                ],
            }
        );
    }

    #[test]
    fn validate_architecture() {
        let m = TargetMatrix::MACH;
        assert_eq!(m.validate_architecture("aarch64").unwrap(), "aarch64");
        assert!(matches!(
            m.validate_architecture("riscv64"),
            Err(TargetError::InvalidArchitecture { .. })
        ));
    }

    #[test]
    fn pairs_cover_cross_product() {
        let pairs: Vec<_> = TargetMatrix::MACH.pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], ("aarch64", "windows-gnu"));
        assert_eq!(pairs[1], ("x86_64", "windows-gnu"));
        assert_eq!(pairs[5], ("x86_64", "macosx-none"));
    }

    #[test]
    fn custom_matrix() {
        const M: TargetMatrix = TargetMatrix::new(&["freestanding-none"], &["riscv64"]);
        assert!(M.contains_platform("freestanding-none"));
        assert_eq!(M.pairs().count(), 1);
    }

    #[test]
    #[should_panic(expected = "at least one platform")]
    fn empty_platforms_rejected() {
        let _ = TargetMatrix::new(&[], &["x86_64"]);
    }
}
