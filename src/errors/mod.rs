// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Error types
//!
//! Errors fall into two classes: usage errors raised before the pipeline
//! starts (bad arguments, pre-flight directory checks) and step errors
//! captured by the pipeline runner and surfaced with the failing step's
//! title. Both render through miette and exit the process with code 1.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scaffolding operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Main error type for create-grandstack-app
#[derive(Error, Debug, Diagnostic)]
pub enum ScaffoldError {
    // ─────────────────────────────────────────────────────────────────────────
    // Usage Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("No project directory specified")]
    #[diagnostic(
        code(create_grandstack_app::missing_project_dir),
        help("For example:\n  create-grandstack-app my-grandstack-app")
    )]
    MissingProjectDir,

    #[error("'{path}' already exists and is not empty")]
    #[diagnostic(
        code(create_grandstack_app::target_not_empty),
        help("Choose a different directory or empty this one first")
    )]
    TargetDirNotEmpty { path: PathBuf },

    #[error("Unknown template: '{name}'")]
    #[diagnostic(
        code(create_grandstack_app::unknown_template),
        help("Available templates: React, React-TS, Angular, Flutter, API-Only")
    )]
    UnknownTemplate { name: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Release Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to list releases from '{url}': {error}")]
    #[diagnostic(
        code(create_grandstack_app::release_list_failed),
        help("Check your network connection and try again")
    )]
    ReleaseListFailed { url: String, error: String },

    #[error("No published releases found at '{url}'")]
    #[diagnostic(code(create_grandstack_app::no_releases))]
    NoReleases { url: String },

    #[error("Failed to download '{url}': {error}")]
    #[diagnostic(
        code(create_grandstack_app::download_failed),
        help("Check your network connection and try again")
    )]
    DownloadFailed { url: String, error: String },

    #[error("Failed to extract archive '{path}': {error}")]
    #[diagnostic(code(create_grandstack_app::extract_failed))]
    ExtractFailed { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to create directory '{path}': {error}")]
    #[diagnostic(code(create_grandstack_app::dir_create_error))]
    DirCreateError { path: PathBuf, error: String },

    #[error("Failed to remove '{path}': {error}")]
    #[diagnostic(code(create_grandstack_app::dir_remove_error))]
    DirRemoveError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(create_grandstack_app::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Process Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Tool '{tool}' not found")]
    #[diagnostic(
        code(create_grandstack_app::tool_not_found),
        help("{suggestion}")
    )]
    ToolNotFound { tool: String, suggestion: String },

    #[error("Command '{command}' failed in '{dir}': {stderr}")]
    #[diagnostic(code(create_grandstack_app::command_failed))]
    CommandFailed {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    #[error("{tool} {wanted} required, but found {found}")]
    #[diagnostic(
        code(create_grandstack_app::incompatible_toolchain),
        help("Upgrade {tool} to a version satisfying {wanted}")
    )]
    IncompatibleToolchain {
        tool: String,
        wanted: String,
        found: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Prompt Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(create_grandstack_app::prompt_error))]
    Prompt { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(create_grandstack_app::io_error))]
    Io { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(create_grandstack_app::json_error))]
    Json { message: String },
}

impl From<std::io::Error> for ScaffoldError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_json::Error> for ScaffoldError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<dialoguer::Error> for ScaffoldError {
    fn from(e: dialoguer::Error) -> Self {
        Self::Prompt { message: e.to_string() }
    }
}

impl ScaffoldError {
    /// Create a tool not found error with an installation suggestion
    pub fn tool_not_found(tool: &str) -> Self {
        let suggestion = match tool {
            "git" => "Install git: https://git-scm.com/downloads".to_string(),
            "node" => "Install Node.js: https://nodejs.org/".to_string(),
            "npm" => "Install Node.js (npm ships with it): https://nodejs.org/".to_string(),
            "yarn" => "Install yarn: https://classic.yarnpkg.com/en/docs/install".to_string(),
            _ => format!("Install {} and ensure it's in your PATH", tool),
        };

        Self::ToolNotFound {
            tool: tool.to_string(),
            suggestion,
        }
    }

    /// True for errors raised before the pipeline starts
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectDir
                | Self::TargetDirNotEmpty { .. }
                | Self::UnknownTemplate { .. }
        )
    }
}
