//! `dxcbuild.toml` parsing and merging of build settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dxcbuild_toolchain::{parse_command, OptimizeMode, DEFAULT_COMMAND};
use serde::{Deserialize, Serialize};

/// File name searched for from the working directory upward.
pub const CONFIG_FILE_NAME: &str = "dxcbuild.toml";

/// Output directory used when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "zig-out/";

/// The top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// External compiler settings.
    #[serde(default)]
    pub toolchain: ToolchainSection,
    /// Target and build-option defaults.
    #[serde(default)]
    pub build: BuildSection,
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSection {
    /// Command prefix, whitespace separated (same syntax as `-Z`).
    #[serde(default)]
    pub command: Option<String>,
}

/// `[build]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    /// CPU tuning passed as `-Dcpu=`.
    #[serde(default)]
    pub cpu: Option<String>,
    /// Optimize mode name (e.g., "ReleaseFast").
    #[serde(default)]
    pub optimize: Option<String>,
    /// Build a shared library.
    #[serde(default)]
    pub shared: Option<bool>,
    /// Enable the SPIR-V backend.
    #[serde(default)]
    pub spirv: Option<bool>,
}

impl BuildConfig {
    /// Search upward from `start_dir` for a `dxcbuild.toml` file, parse and
    /// return it along with the path it was found at.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load a config file from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a config from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Settings given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub platform: Option<String>,
    pub architecture: Option<String>,
    pub output: Option<PathBuf>,
    pub zig_installation: Option<String>,
    pub cpu: Option<String>,
    pub optimize: Option<OptimizeMode>,
    pub static_lib: bool,
    pub no_spirv: bool,
}

/// Fully merged settings for one run.
///
/// Platform and architecture stay optional here; the resolver fills them
/// in from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub command: Vec<String>,
    pub output: PathBuf,
    pub platform: Option<String>,
    pub architecture: Option<String>,
    pub cpu: Option<String>,
    pub optimize: OptimizeMode,
    pub shared: bool,
    pub spirv: bool,
}

impl BuildSettings {
    /// Merge CLI overrides over the config file over built-in defaults.
    pub fn merge(cli: CliOverrides, config: Option<&BuildConfig>) -> Result<Self> {
        let default_config = BuildConfig::default();
        let config = config.unwrap_or(&default_config);
        let build = &config.build;

        let command_text = cli
            .zig_installation
            .as_deref()
            .or(config.toolchain.command.as_deref())
            .unwrap_or(DEFAULT_COMMAND);
        let command = parse_command(command_text)?;

        let optimize = match (cli.optimize, build.optimize.as_deref()) {
            (Some(mode), _) => mode,
            (None, Some(name)) => name
                .parse::<OptimizeMode>()
                .map_err(anyhow::Error::msg)
                .context("invalid `build.optimize` in config")?,
            (None, None) => OptimizeMode::default(),
        };

        Ok(Self {
            command,
            output: cli
                .output
                .or_else(|| build.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            platform: cli.platform.or_else(|| build.platform.clone()),
            architecture: cli.architecture.or_else(|| build.architecture.clone()),
            cpu: cli.cpu.or_else(|| build.cpu.clone()),
            optimize,
            shared: !cli.static_lib && build.shared.unwrap_or(true),
            spirv: !cli.no_spirv && build.spirv.unwrap_or(true),
        })
    }
}
