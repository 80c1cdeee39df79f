//! Assembly and execution of a single `zig build` invocation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use dxcbuild_targets::ResolvedTarget;

use crate::error::{Result, ToolchainError};
use crate::optimize::OptimizeMode;

/// Everything needed to run the external compiler once.
///
/// Options are fixed while the spec is being built; [`InvocationSpec::run`]
/// consumes it, so a spec is executed at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    command: Vec<String>,
    output_dir: PathBuf,
    shared: bool,
    spirv: bool,
    optimize: OptimizeMode,
    target: ResolvedTarget,
}

impl InvocationSpec {
    /// Create a spec with shared-library output and SPIR-V enabled and the
    /// default optimize mode.
    pub fn new(
        command: Vec<String>,
        output_dir: impl Into<PathBuf>,
        target: ResolvedTarget,
    ) -> Result<Self> {
        if command.is_empty() {
            return Err(ToolchainError::EmptyCommand);
        }
        Ok(Self {
            command,
            output_dir: output_dir.into(),
            shared: true,
            spirv: true,
            optimize: OptimizeMode::default(),
            target,
        })
    }

    /// Build a shared library (`-Dshared`) instead of a static one.
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Enable the SPIR-V backend (`-Dspirv`).
    pub fn spirv(mut self, spirv: bool) -> Self {
        self.spirv = spirv;
        self
    }

    pub fn optimize(mut self, optimize: OptimizeMode) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn target(&self) -> &ResolvedTarget {
        &self.target
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The full argument vector, toolchain command prefix included.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.command.iter().map(OsString::from).collect();
        args.push("build".into());
        args.push("-p".into());
        args.push(self.output_dir.clone().into_os_string());
        if self.shared {
            args.push("-Dshared".into());
        }
        if self.spirv {
            args.push("-Dspirv".into());
        }
        args.push(self.optimize.flag().into());
        args.push("-Dfrom_source".into());
        args.push(format!("-Dtarget={}", self.target.triple()).into());
        if let Some(cpu) = self.target.cpu() {
            args.push(format!("-Dcpu={cpu}").into());
        }
        args
    }

    /// The argument vector rendered as a single line for display.
    pub fn command_line(&self) -> String {
        self.args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One-line description of what is about to be built.
    pub fn summary(&self) -> String {
        format!(
            "Compiling for {}. SPIR-V support: {}. Shared Library: {}. Output directory: {}",
            self.target,
            self.spirv,
            self.shared,
            self.output_dir.display()
        )
    }

    /// Run the compiler, blocking until it exits.
    ///
    /// The child inherits stdio. A non-zero exit is reported as
    /// [`ToolchainError::Failed`].
    pub fn run(self) -> Result<()> {
        println!("{}", self.summary());
        println!("{}", self.command_line());

        let args = self.args();
        let (program, rest) = args.split_first().ok_or(ToolchainError::EmptyCommand)?;
        tracing::debug!(program = %program.to_string_lossy(), "spawning toolchain");

        let status = Command::new(program)
            .args(rest)
            .status()
            .map_err(|source| ToolchainError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        if status.success() {
            tracing::info!(triple = %self.target.triple(), "build finished");
            Ok(())
        } else {
            tracing::debug!(?status, "toolchain failed");
            Err(ToolchainError::Failed {
                exit_code: status.code(),
            })
        }
    }
}
