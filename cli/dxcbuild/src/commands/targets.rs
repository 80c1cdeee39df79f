//! `--list-targets`: print the target matrix.

use anyhow::Result;
use dxcbuild_targets::{resolve, HostInfo, TargetMatrix};

/// Print every supported platform, architecture, and combined target.
pub fn list(matrix: &TargetMatrix, host: &HostInfo) -> Result<()> {
    println!("Platforms:     {}", matrix.platforms().join(", "));
    println!("Architectures: {}", matrix.architectures().join(", "));
    println!();
    println!("Targets:");
    for (architecture, platform) in matrix.pairs() {
        println!("  {architecture}-{platform}");
    }
    println!();
    match resolve(matrix, None, None, host) {
        Ok(target) => println!("Host default: {target}"),
        Err(e) => println!("Host default: none ({e})"),
    }
    Ok(())
}
