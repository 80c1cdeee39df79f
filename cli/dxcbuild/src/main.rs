//! dxcbuild — cross-compile mach-dxcompiler with an external zig toolchain.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use dxcbuild_targets::{HostInfo, TargetMatrix};
use dxcbuild_toolchain::{OptimizeMode, ToolchainError};
use tracing_subscriber::EnvFilter;

use config::{BuildConfig, BuildSettings, CliOverrides};

#[derive(Parser, Debug)]
#[command(name = "dxcbuild", version, about = "Build mach-dxcompiler")]
struct Cli {
    /// Platform type (windows-gnu, linux-gnu, macosx-none). Defaults to the current platform
    #[arg(short = 'P', long)]
    platform: Option<String>,
    /// Platform architecture (aarch64, x86_64). Defaults to the current architecture
    #[arg(short = 'A', long)]
    architecture: Option<String>,
    /// Output directory [default: zig-out/]
    #[arg(short = 'O', long)]
    output: Option<PathBuf>,
    /// Zig installation command, space separated
    /// [default: "zigup run 0.12.0-dev.3180+83e578a18"]
    #[arg(short = 'Z', long)]
    zig_installation: Option<String>,
    /// CPU to tune for (passed as -Dcpu=)
    #[arg(long)]
    cpu: Option<String>,
    /// Optimize mode (Debug, ReleaseSafe, ReleaseFast, ReleaseSmall) [default: ReleaseFast]
    #[arg(long)]
    optimize: Option<OptimizeMode>,
    /// Build a static library instead of a shared one
    #[arg(long = "static")]
    static_lib: bool,
    /// Build without SPIR-V support
    #[arg(long)]
    no_spirv: bool,
    /// Config file (default: search for dxcbuild.toml upward from the working directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the compiler command without running it
    #[arg(long)]
    dry_run: bool,
    /// List supported targets and exit
    #[arg(long)]
    list_targets: bool,
    /// Check that the toolchain is reachable and exit
    #[arg(long)]
    check: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            platform: self.platform.clone(),
            architecture: self.architecture.clone(),
            output: self.output.clone(),
            zig_installation: self.zig_installation.clone(),
            cpu: self.cpu.clone(),
            optimize: self.optimize,
            static_lib: self.static_lib,
            no_spirv: self.no_spirv,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,dxcbuild=debug,dxcbuild_targets=debug,dxcbuild_toolchain=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Failed compiler runs exit with the compiler's own code; everything else with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ToolchainError>()
        .map_or(1, ToolchainError::exit_code)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let host = HostInfo::detect();
    tracing::debug!(os = %host.os, arch = %host.arch, "detected host");

    if cli.list_targets {
        return commands::targets::list(&TargetMatrix::MACH, &host);
    }

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let settings = BuildSettings::merge(cli.overrides(), config.as_ref())?;

    if cli.check {
        return commands::check::run(&settings.command);
    }

    commands::build::run(&settings, &host, cli.dry_run)
}

/// Load the explicit config file, or the first `dxcbuild.toml` found upward from `cwd`.
fn load_config(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Option<BuildConfig>> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading config");
        return BuildConfig::load(path).map(Some);
    }
    match BuildConfig::find_and_load(cwd)? {
        Some((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(Some(config))
        }
        None => Ok(None),
    }
}
