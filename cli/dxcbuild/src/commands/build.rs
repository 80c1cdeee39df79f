//! Default action: probe the toolchain, resolve the target, run `zig build`.

use anyhow::Result;
use dxcbuild_targets::{resolve, HostInfo, TargetMatrix};
use dxcbuild_toolchain::{probe, InvocationSpec, ToolchainError};

use crate::config::BuildSettings;

/// Run the build pipeline for one target.
///
/// With `dry_run` the probe is skipped and the assembled command is printed
/// instead of executed.
pub fn run(settings: &BuildSettings, host: &HostInfo, dry_run: bool) -> Result<()> {
    if !dry_run && !probe(&settings.command) {
        return Err(ToolchainError::Unavailable {
            command: format!("{} version", settings.command.join(" ")),
        }
        .into());
    }

    let mut target = resolve(
        &TargetMatrix::MACH,
        settings.platform.as_deref(),
        settings.architecture.as_deref(),
        host,
    )?;
    if let Some(cpu) = &settings.cpu {
        target = target.with_cpu(cpu.as_str());
    }
    tracing::info!(resolved = %target, "resolved build target");

    let spec = InvocationSpec::new(settings.command.clone(), settings.output.clone(), target)?
        .shared(settings.shared)
        .spirv(settings.spirv)
        .optimize(settings.optimize);

    if dry_run {
        println!("{}", spec.summary());
        println!("{}", spec.command_line());
        return Ok(());
    }

    spec.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use dxcbuild_targets::TargetError;
    use dxcbuild_toolchain::OptimizeMode;

    use super::*;

    fn settings(command: &[&str]) -> BuildSettings {
        BuildSettings {
            command: command.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from("out/"),
            platform: None,
            architecture: None,
            cpu: None,
            optimize: OptimizeMode::ReleaseFast,
            shared: true,
            spirv: true,
        }
    }

    fn linux_x86() -> HostInfo {
        HostInfo::new("Linux", "x86_64")
    }

    #[test]
    fn dry_run_skips_probe() {
        run(&settings(&["dxcbuild-no-such-toolchain"]), &linux_x86(), true).unwrap();
    }

    #[test]
    fn dry_run_still_validates_target() {
        let mut s = settings(&["zig"]);
        s.platform = Some("plan9".into());
        let err = run(&s, &linux_x86(), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TargetError>(),
            Some(TargetError::InvalidPlatform { .. })
        ));
    }

    #[test]
    fn thirty_two_bit_host_fails() {
        let err = run(&settings(&["zig"]), &HostInfo::new("Linux", "i686"), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TargetError>(),
            Some(TargetError::UnsupportedArchitecture { .. })
        ));
    }

    #[test]
    fn missing_toolchain_is_unavailable() {
        let err = run(&settings(&["dxcbuild-no-such-toolchain"]), &linux_x86(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolchainError>(),
            Some(ToolchainError::Unavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn probe_failure_stops_before_resolution() {
        // Invalid platform would fail too, but the probe runs first.
        let mut s = settings(&["false"]);
        s.platform = Some("plan9".into());
        let err = run(&s, &linux_x86(), false).unwrap_err();
        assert!(err.downcast_ref::<ToolchainError>().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn successful_build() {
        let mut s = settings(&["true"]);
        s.cpu = Some("baseline".into());
        run(&s, &linux_x86(), false).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn build_failure_carries_exit_code() {
        // $0 is the first appended argument: "version" for the probe, "build" otherwise.
        let s = settings(&["sh", "-c", "test \"$0\" = version || exit 4"]);
        let err = run(&s, &linux_x86(), false).unwrap_err();
        let toolchain_err = err.downcast_ref::<ToolchainError>().unwrap();
        assert!(matches!(
            toolchain_err,
            ToolchainError::Failed { exit_code: Some(4) }
        ));
        assert_eq!(toolchain_err.exit_code(), 4);
    }
}
