//! Error types for toolchain invocation.

/// Errors that can occur while probing or running the external compiler.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The toolchain command prefix contained no tokens.
    #[error("toolchain command is empty")]
    EmptyCommand,

    /// The version probe failed.
    #[error(
        "zig installation not found (tried `{command}`). Ensure zig {} is installed and pass it with -Z. \
         Nominated zig versions are listed at https://machengine.org/about/nominated-zig/",
        crate::probe::PINNED_ZIG_VERSION
    )]
    Unavailable {
        /// The command line that was probed.
        command: String,
    },

    /// The child process could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// The executable that could not be started.
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child process exited unsuccessfully.
    #[error("{}", describe_exit(.exit_code))]
    Failed {
        /// Exit code, or `None` if the child was killed by a signal.
        exit_code: Option<i32>,
    },
}

impl ToolchainError {
    /// The process exit code this error should be reported with.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolchainError::Failed {
                exit_code: Some(code),
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("toolchain exited with status {code}"),
        None => "toolchain was terminated by a signal".to_string(),
    }
}

/// Result type for toolchain operations.
pub type Result<T> = std::result::Result<T, ToolchainError>;
