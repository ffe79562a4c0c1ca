// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Subprocess collaborators
//!
//! git initialization, dependency installation parameterized by package
//! manager, and the Node.js toolchain compatibility probe.

use semver::{Version, VersionReq};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{ScaffoldError, ScaffoldResult};

/// Minimum Node.js engine required by the starter
pub const NODE_VERSION_REQUIREMENT: &str = ">=8";

/// Package manager used for dependency installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    /// Pick yarn when `yarnpkg` is on PATH, unless npm is forced
    pub fn detect(use_npm: bool) -> Self {
        if use_npm {
            return Self::Npm;
        }
        if which::which("yarnpkg").is_ok() {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    /// Executable invoked for installs
    pub fn program(&self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Shell line that runs a package script, for the closing summary
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Yarn => format!("yarn {}", script),
            Self::Npm => format!("npm run {}", script),
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Map a spawn failure: a missing executable gets an install hint
fn spawn_error(tool: &str, command: &str, dir: &Path, e: std::io::Error) -> ScaffoldError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ScaffoldError::tool_not_found(tool)
    } else {
        ScaffoldError::CommandFailed {
            command: command.to_string(),
            dir: dir.to_path_buf(),
            stderr: e.to_string(),
        }
    }
}

/// Initialize a git repository in `dir`
pub async fn init_git(dir: &Path) -> ScaffoldResult<()> {
    let output = Command::new("git")
        .arg("init")
        .current_dir(dir)
        .output()
        .await
        .map_err(|e| spawn_error("git", "git init", dir, e))?;

    if !output.status.success() {
        return Err(ScaffoldError::CommandFailed {
            command: "git init".to_string(),
            dir: dir.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    debug!("Initialized git repository in {}", dir.display());
    Ok(())
}

/// Run `<package manager> install` in `dir`
pub async fn install_dependencies(manager: PackageManager, dir: &Path) -> ScaffoldResult<()> {
    let command = format!("{} install", manager.program());
    let output = Command::new(manager.program())
        .arg("install")
        .current_dir(dir)
        .output()
        .await
        .map_err(|e| spawn_error(manager.program(), &command, dir, e))?;

    if !output.status.success() {
        return Err(ScaffoldError::CommandFailed {
            command,
            dir: dir.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    debug!("Installed dependencies in {}", dir.display());
    Ok(())
}

/// Check the installed Node.js version against the starter's engine
/// requirement. An unsatisfied requirement is a step failure like any
/// other.
pub async fn check_node_compatibility() -> ScaffoldResult<()> {
    let output = Command::new("node")
        .arg("--version")
        .output()
        .await
        .map_err(|e| spawn_error("node", "node --version", Path::new("."), e))?;

    let raw = String::from_utf8_lossy(&output.stdout);
    let version = parse_node_version(&raw).ok_or_else(|| ScaffoldError::Io {
        message: format!("Unrecognized node version output: '{}'", raw.trim()),
    })?;

    let wanted = VersionReq::parse(NODE_VERSION_REQUIREMENT)
        .expect("engine requirement is a valid semver range");
    if !wanted.matches(&version) {
        return Err(ScaffoldError::IncompatibleToolchain {
            tool: "node".to_string(),
            wanted: NODE_VERSION_REQUIREMENT.to_string(),
            found: version.to_string(),
        });
    }

    debug!("node {} satisfies {}", version, NODE_VERSION_REQUIREMENT);
    Ok(())
}

/// Parse `node --version` output ("v18.19.0") into a semver version
fn parse_node_version(raw: &str) -> Option<Version> {
    Version::parse(raw.trim().trim_start_matches('v')).ok()
}
