//! External compiler invocation for dxcbuild.
//!
//! Turns a resolved target plus build options into the argument vector of a
//! single `zig build` run and executes it as a blocking child process. The
//! toolchain is always spawned directly from an argument vector, never
//! through a shell.

pub mod error;
pub mod invocation;
pub mod optimize;
pub mod probe;

use std::path::PathBuf;

use dxcbuild_targets::ResolvedTarget;

pub use error::{Result, ToolchainError};
pub use invocation::InvocationSpec;
pub use optimize::OptimizeMode;
pub use probe::{parse_command, probe, toolchain_version, DEFAULT_COMMAND, PINNED_ZIG_VERSION};

/// Build the invocation for `target` with the default optimize mode and run it.
pub fn build_and_run(
    command: Vec<String>,
    output_dir: impl Into<PathBuf>,
    shared: bool,
    spirv: bool,
    target: ResolvedTarget,
) -> Result<()> {
    InvocationSpec::new(command, output_dir, target)?
        .shared(shared)
        .spirv(spirv)
        .run()
}
