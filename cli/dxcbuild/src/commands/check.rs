//! `--check`: toolchain diagnostics only.

use anyhow::Result;
use dxcbuild_toolchain::{toolchain_version, PINNED_ZIG_VERSION};

/// Probe the toolchain and print what it reports.
pub fn run(command: &[String]) -> Result<()> {
    let version = toolchain_version(command)?;
    let version = if version.is_empty() {
        "(unknown version)"
    } else {
        version.as_str()
    };

    println!("Toolchain: {}", command.join(" "));
    println!("Version:   {version}");
    if version != PINNED_ZIG_VERSION {
        println!("Note:      mach-dxcompiler is pinned to zig {PINNED_ZIG_VERSION}");
    }
    Ok(())
}
