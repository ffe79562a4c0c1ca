// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Filesystem operations
//!
//! Directory pre-flight checks, template pruning, and the two generated
//! configuration artifacts: the API `.env` file and the scripts
//! configuration JSON.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Neo4jSettings, Template};
use crate::errors::{ScaffoldError, ScaffoldResult};

/// True when the path exists and is a directory
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// True when the directory has at least one entry
pub fn dir_is_not_empty(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Pre-flight gate: an existing, non-empty target directory is a usage
/// error and the pipeline never starts.
pub fn check_app_dir(path: &Path) -> ScaffoldResult<()> {
    if dir_exists(path) && dir_is_not_empty(path) {
        return Err(ScaffoldError::TargetDirNotEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Create the target directory, reusing it if it already exists
pub fn create_app_dir(path: &Path) -> ScaffoldResult<()> {
    std::fs::create_dir_all(path).map_err(|e| ScaffoldError::DirCreateError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Recursively delete the unselected template directories. Directories
/// the archive did not contain are ignored.
pub fn remove_unused_templates(app_dir: &Path, templates: &[String]) -> ScaffoldResult<()> {
    for name in templates {
        let path = app_dir.join(name);
        if !path.exists() {
            continue;
        }
        std::fs::remove_dir_all(&path).map_err(|e| ScaffoldError::DirRemoveError {
            path: path.clone(),
            error: e.to_string(),
        })?;
        debug!("Removed template directory {}", path.display());
    }
    Ok(())
}

/// Render the contents of the generated `api/.env`
pub fn render_dot_env(neo4j: &Neo4jSettings) -> String {
    format!(
        "# Use this file to set environment variables with credentials and configuration options
# This file is provided as an example and should be replaced with your own values
# You probably don't want to check this into version control!

NEO4J_URI={uri}
NEO4J_USER={user}
NEO4J_PASSWORD={password}

# Uncomment this line to specify a specific Neo4j database (v4.x+ only)
#NEO4J_DATABASE=neo4j

GRAPHQL_SERVER_HOST=0.0.0.0
GRAPHQL_SERVER_PORT=4001
GRAPHQL_SERVER_PATH=/graphql
",
        uri = neo4j.uri,
        user = neo4j.user,
        password = neo4j.password,
    )
}

/// Write the environment file for the API sub-project
pub fn write_dot_env(app_dir: &Path, neo4j: &Neo4jSettings) -> ScaffoldResult<PathBuf> {
    let path = app_dir.join("api").join(".env");
    std::fs::write(&path, render_dot_env(neo4j)).map_err(|e| ScaffoldError::FileWriteError {
        path: path.clone(),
        error: e.to_string(),
    })?;
    Ok(path)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptsConfig<'a> {
    template_file_name: &'a str,
    template_name: &'a str,
}

/// Write `scripts/config/index.json` recording the chosen template
pub fn write_scripts_config(app_dir: &Path, template: Template) -> ScaffoldResult<PathBuf> {
    let config_dir = app_dir.join("scripts").join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ScaffoldError::DirCreateError {
        path: config_dir.clone(),
        error: e.to_string(),
    })?;

    let config = ScriptsConfig {
        template_file_name: template.config_dir_name(),
        template_name: template.display_name(),
    };

    let path = config_dir.join("index.json");
    std::fs::write(&path, serde_json::to_string(&config)?).map_err(|e| {
        ScaffoldError::FileWriteError {
            path: path.clone(),
            error: e.to_string(),
        }
    })?;
    Ok(path)
}
