// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Starter release source
//!
//! Lists releases of the grand-stack-starter repository through the GitHub
//! API and streams the chosen archive to disk. The pipeline only sees the
//! [`ReleaseSource`] contract, so tests can substitute a canned source.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::errors::{ScaffoldError, ScaffoldResult};

/// GitHub releases endpoint for the starter repository
pub const RELEASE_URL: &str =
    "https://api.github.com/repos/grand-stack/grand-stack-starter/releases";

/// Capability for locating and fetching the latest starter archive
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// URL of the latest downloadable release archive
    async fn latest_archive_url(&self) -> ScaffoldResult<String>;

    /// Stream `url` to `dest`
    async fn download(&self, url: &str, dest: &Path) -> ScaffoldResult<()>;
}

/// The slice of the GitHub release payload we care about
#[derive(Debug, Clone, Deserialize)]
struct ReleaseEntry {
    tag_name: String,
    tarball_url: String,
}

/// Release source backed by the GitHub releases API
pub struct GithubReleases {
    client: reqwest::Client,
    releases_url: String,
}

impl GithubReleases {
    /// Client against the canonical starter repository
    pub fn new() -> ScaffoldResult<Self> {
        Self::with_url(RELEASE_URL)
    }

    /// Client against an alternate releases endpoint
    pub fn with_url(url: impl Into<String>) -> ScaffoldResult<Self> {
        // GitHub rejects requests without a User-Agent
        let client = reqwest::Client::builder()
            .user_agent(concat!("create-grandstack-app/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScaffoldError::Io { message: e.to_string() })?;

        Ok(Self {
            client,
            releases_url: url.into(),
        })
    }
}

#[async_trait]
impl ReleaseSource for GithubReleases {
    async fn latest_archive_url(&self) -> ScaffoldResult<String> {
        let list_err = |e: reqwest::Error| ScaffoldError::ReleaseListFailed {
            url: self.releases_url.clone(),
            error: e.to_string(),
        };

        let releases: Vec<ReleaseEntry> = self
            .client
            .get(&self.releases_url)
            .send()
            .await
            .map_err(list_err)?
            .error_for_status()
            .map_err(list_err)?
            .json()
            .await
            .map_err(list_err)?;

        let latest = releases.first().ok_or_else(|| ScaffoldError::NoReleases {
            url: self.releases_url.clone(),
        })?;

        debug!("Latest release: {}", latest.tag_name);
        Ok(latest.tarball_url.clone())
    }

    async fn download(&self, url: &str, dest: &Path) -> ScaffoldResult<()> {
        let dl_err = |e: reqwest::Error| ScaffoldError::DownloadFailed {
            url: url.to_string(),
            error: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(dl_err)?
            .error_for_status()
            .map_err(dl_err)?;

        let mut file = std::fs::File::create(dest).map_err(|e| ScaffoldError::FileWriteError {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(dl_err)?;
            file.write_all(&chunk)
                .map_err(|e| ScaffoldError::FileWriteError {
                    path: dest.to_path_buf(),
                    error: e.to_string(),
                })?;
            downloaded += chunk.len() as u64;
        }

        debug!("Downloaded {} bytes to {}", downloaded, dest.display());
        Ok(())
    }
}
