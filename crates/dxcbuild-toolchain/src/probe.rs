//! Toolchain command parsing and the startup version probe.

use std::process::Command;

use crate::error::{Result, ToolchainError};

/// Zig version mach-dxcompiler is pinned to.
pub const PINNED_ZIG_VERSION: &str = "0.12.0-dev.3180+83e578a18";

/// Command used when no toolchain is configured.
pub const DEFAULT_COMMAND: &str = "zigup run 0.12.0-dev.3180+83e578a18";

/// Split a toolchain command prefix (e.g., `"zigup run 0.12.0"`) into tokens.
pub fn parse_command(text: &str) -> Result<Vec<String>> {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    if tokens.is_empty() {
        return Err(ToolchainError::EmptyCommand);
    }
    Ok(tokens)
}

/// Run `<command> version` and return the first line it prints.
///
/// Output is captured. Only the exit status decides success; the content
/// of the output is not interpreted.
pub fn toolchain_version(command: &[String]) -> Result<String> {
    let (program, rest) = command.split_first().ok_or(ToolchainError::EmptyCommand)?;
    let rendered = format!("{} version", command.join(" "));
    tracing::debug!(command = %rendered, "probing toolchain");

    let output = Command::new(program)
        .args(rest)
        .arg("version")
        .output()
        .map_err(|source| {
            tracing::debug!(%source, "toolchain probe could not start");
            ToolchainError::Unavailable {
                command: rendered.clone(),
            }
        })?;

    if !output.status.success() {
        tracing::debug!(status = ?output.status, "toolchain probe failed");
        return Err(ToolchainError::Unavailable { command: rendered });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.lines().next().unwrap_or("").trim().to_string();
    tracing::debug!(%version, "toolchain found");
    Ok(version)
}

/// Report whether the toolchain is reachable. Never fails.
pub fn probe(command: &[String]) -> bool {
    toolchain_version(command).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_whitespace() {
        assert_eq!(
            parse_command(DEFAULT_COMMAND).unwrap(),
            vec!["zigup", "run", PINNED_ZIG_VERSION]
        );
        assert_eq!(
            parse_command("  /opt/zig/zig  ").unwrap(),
            vec!["/opt/zig/zig"]
        );
        assert_eq!(parse_command("a  b\tc").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(parse_command(""), Err(ToolchainError::EmptyCommand)));
        assert!(matches!(parse_command("   "), Err(ToolchainError::EmptyCommand)));
    }

    #[test]
    fn probe_missing_tool() {
        assert!(!probe(&["dxcbuild-no-such-toolchain".to_string()]));
        assert!(!probe(&[]));
    }

    #[cfg(unix)]
    #[test]
    fn probe_reports_exit_status() {
        assert!(probe(&["true".to_string()]));
        assert!(!probe(&["false".to_string()]));
    }

    #[cfg(unix)]
    #[test]
    fn version_is_first_stdout_line() {
        let command = vec![
            "sh".to_string(),
            "-c".to_string(),
            "printf '0.12.0-dev\\nextra\\n'".to_string(),
        ];
        assert_eq!(toolchain_version(&command).unwrap(), "0.12.0-dev");
    }

    #[cfg(unix)]
    #[test]
    fn garbled_output_still_counts_as_success() {
        let command = vec![
            "sh".to_string(),
            "-c".to_string(),
            "printf '\\377\\376 not a version'; exit 0".to_string(),
        ];
        assert!(probe(&command));
    }

    #[cfg(unix)]
    #[test]
    fn failed_probe_is_unavailable() {
        let err = toolchain_version(&["false".to_string()]).unwrap_err();
        match err {
            ToolchainError::Unavailable { command } => assert_eq!(command, "false version"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
