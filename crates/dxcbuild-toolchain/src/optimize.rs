//! Optimization modes understood by `zig build -Doptimize=`.

use std::fmt;
use std::str::FromStr;

/// Build optimization mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OptimizeMode {
    Debug,
    ReleaseSafe,
    #[default]
    ReleaseFast,
    ReleaseSmall,
}

impl OptimizeMode {
    pub const ALL: [OptimizeMode; 4] = [
        OptimizeMode::Debug,
        OptimizeMode::ReleaseSafe,
        OptimizeMode::ReleaseFast,
        OptimizeMode::ReleaseSmall,
    ];

    /// Name as the compiler spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizeMode::Debug => "Debug",
            OptimizeMode::ReleaseSafe => "ReleaseSafe",
            OptimizeMode::ReleaseFast => "ReleaseFast",
            OptimizeMode::ReleaseSmall => "ReleaseSmall",
        }
    }

    /// The `-Doptimize=<mode>` build flag.
    pub fn flag(self) -> String {
        format!("-Doptimize={}", self.as_str())
    }
}

impl fmt::Display for OptimizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|m| m.as_str()).collect();
                format!(
                    "unknown optimize mode '{s}' (expected one of: {})",
                    names.join(", ")
                )
            })
    }
}
