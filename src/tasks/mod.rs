// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Step registry
//!
//! Declares the provisioning pipeline: which steps run, in which order,
//! under which skip conditions. Each step closes over the resolved
//! configuration and the collaborators it delegates to; the runner in
//! `crate::pipeline` stays generic.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Configuration;
use crate::ops;
use crate::ops::release::ReleaseSource;
use crate::pipeline::Step;

/// Build the full pipeline for one provisioning run.
///
/// `download_path` is the staging location for the release archive; the
/// caller owns its lifetime (a temp dir held across the run).
pub fn build_pipeline(
    config: &Configuration,
    releases: Arc<dyn ReleaseSource>,
    download_path: PathBuf,
) -> Vec<Step> {
    let mut steps = create_project_steps(config, releases, download_path);
    steps.push(git_step(config));
    steps.push(install_group(config));
    steps
}

/// Steps 1-6: directory, download, extract, prune, env file, scripts config
fn create_project_steps(
    config: &Configuration,
    releases: Arc<dyn ReleaseSource>,
    download_path: PathBuf,
) -> Vec<Step> {
    let app_dir = config.app_dir.clone();

    // Existence is checked when the pipeline is built, so the title tells
    // the operator whether the directory is being reused
    let dir_title = format!(
        "{} directory '{}'",
        if ops::fs::dir_exists(&app_dir) { "Using" } else { "Creating" },
        app_dir.display()
    );
    let create_dir = {
        let dir = app_dir.clone();
        Step::action(dir_title, move || async move { ops::fs::create_app_dir(&dir) })
    };

    let download = {
        let source = Arc::clone(&releases);
        let dest = download_path.clone();
        Step::action("Downloading latest release", move || async move {
            let url = source.latest_archive_url().await?;
            source.download(&url, &dest).await
        })
    };

    let extract = {
        let archive = download_path;
        let dir = app_dir.clone();
        Step::action("Extracting latest release", move || async move {
            // GitHub source tarballs wrap the tree in a single root directory
            ops::archive::extract_archive(&archive, &dir, 1)
        })
    };

    let prune = {
        let dir = app_dir.clone();
        let templates = config.templates_to_remove.clone();
        Step::action("Removing unused templates", move || async move {
            ops::fs::remove_unused_templates(&dir, &templates)
        })
    };

    let dot_env = {
        let dir = app_dir.clone();
        let neo4j = config.neo4j.clone();
        Step::action(
            "Creating local env file with configuration options",
            move || async move { ops::fs::write_dot_env(&dir, &neo4j).map(|_| ()) },
        )
    };

    let scripts_config = {
        let dir = app_dir;
        let template = config.template;
        Step::action("Creating scripts configuration", move || async move {
            ops::fs::write_scripts_config(&dir, template).map(|_| ())
        })
    };

    vec![create_dir, download, extract, prune, dot_env, scripts_config]
}

/// Step 7: git init, skipped unless requested
fn git_step(config: &Configuration) -> Step {
    let dir = config.app_dir.clone();
    Step::action("Initializing git repository", move || async move {
        ops::process::init_git(&dir).await
    })
    .skip_when(|config| {
        if config.git_init {
            None
        } else {
            Some("Pass --git to initialize a git repository".to_string())
        }
    })
}

/// Step 8: dependency installation as a nested sub-pipeline. The group is
/// one step to the parent; it is skipped as a whole unless requested, and
/// the frontend install is omitted entirely for the API-only variant.
fn install_group(config: &Configuration) -> Step {
    let manager = config.package_manager;

    let mut children = vec![Step::action("Checking compatibility", || async {
        ops::process::check_node_compatibility().await
    })];

    {
        let dir = config.app_dir.clone();
        children.push(Step::action(
            "Installing GRANDstack CLI and dependencies",
            move || async move { ops::process::install_dependencies(manager, &dir).await },
        ));
    }

    {
        let dir = config.app_dir.join("api");
        children.push(Step::action(
            "Installing dependencies for 'api'",
            move || async move { ops::process::install_dependencies(manager, &dir).await },
        ));
    }

    if let Some(web_dir) = config.template.dir_name() {
        let dir = config.app_dir.join(web_dir);
        children.push(Step::action(
            format!("Installing dependencies for '{}'", web_dir),
            move || async move { ops::process::install_dependencies(manager, &dir).await },
        ));
    }

    Step::group("Installing packages", children).skip_when(|config| {
        if config.run_install {
            None
        } else {
            Some("Pass --install to automatically install dependencies".to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Neo4jSettings, Template};
    use crate::errors::{ScaffoldError, ScaffoldResult};
    use crate::ops::process::PackageManager;
    use crate::pipeline::{run_pipeline, RecordingReporter, StepState};
    use async_trait::async_trait;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs::File;
    use std::path::Path;

    /// Serves a pre-built archive from disk instead of the network
    struct StubReleaseSource {
        archive: PathBuf,
    }

    #[async_trait]
    impl ReleaseSource for StubReleaseSource {
        async fn latest_archive_url(&self) -> ScaffoldResult<String> {
            Ok("stub://grand-stack-starter.tar.gz".to_string())
        }

        async fn download(&self, _url: &str, dest: &Path) -> ScaffoldResult<()> {
            std::fs::copy(&self.archive, dest)?;
            Ok(())
        }
    }

    struct FailingReleaseSource;

    #[async_trait]
    impl ReleaseSource for FailingReleaseSource {
        async fn latest_archive_url(&self) -> ScaffoldResult<String> {
            Err(ScaffoldError::ReleaseListFailed {
                url: "stub://releases".to_string(),
                error: "connection refused".to_string(),
            })
        }

        async fn download(&self, _url: &str, _dest: &Path) -> ScaffoldResult<()> {
            unreachable!("download must not run when listing failed")
        }
    }

    fn test_config(sandbox: &Path, template: Template) -> Configuration {
        Configuration {
            project_path: "myapp".to_string(),
            app_dir: sandbox.join("myapp"),
            template,
            templates_to_remove: template
                .templates_to_remove()
                .into_iter()
                .map(String::from)
                .collect(),
            git_init: false,
            run_install: false,
            package_manager: PackageManager::Npm,
            neo4j: Neo4jSettings::default(),
        }
    }

    fn build_starter_archive(dir: &Path) -> PathBuf {
        let archive_path = dir.join("starter.tar.gz");
        let encoder =
            GzEncoder::new(File::create(&archive_path).unwrap(), Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let files = [
            "grand-stack-starter-0.2.0/package.json",
            "grand-stack-starter-0.2.0/api/package.json",
            "grand-stack-starter-0.2.0/web-react/package.json",
            "grand-stack-starter-0.2.0/web-react-ts/package.json",
            "grand-stack-starter-0.2.0/web-angular/package.json",
            "grand-stack-starter-0.2.0/web-flutter/pubspec.yaml",
        ];
        for path in files {
            let data = b"{}";
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, &data[..]).unwrap();
        }

        builder.into_inner().unwrap().finish().unwrap();
        archive_path
    }

    #[tokio::test]
    async fn test_full_pipeline_provisions_project() {
        let sandbox = tempfile::tempdir().unwrap();
        let archive = build_starter_archive(sandbox.path());
        let config = test_config(sandbox.path(), Template::React);

        let steps = build_pipeline(
            &config,
            Arc::new(StubReleaseSource { archive }),
            sandbox.path().join("download.tar.gz"),
        );

        let mut reporter = RecordingReporter::default();
        let outcome = run_pipeline(&config, steps, &mut reporter).await;
        assert!(outcome.success());

        let app = &config.app_dir;
        assert!(app.join("package.json").exists());
        assert!(app.join("api/package.json").exists());
        assert!(app.join("web-react").exists());
        assert!(!app.join("web-react-ts").exists());
        assert!(!app.join("web-angular").exists());
        assert!(!app.join("web-flutter").exists());

        let env = std::fs::read_to_string(app.join("api/.env")).unwrap();
        assert!(env.contains("NEO4J_URI=neo4j://localhost:7687"));

        let scripts: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(app.join("scripts/config/index.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(scripts["templateFileName"], "web-react");

        // git and install were not requested
        let skipped: Vec<&str> = outcome
            .reports
            .iter()
            .filter(|r| r.state == StepState::Skipped)
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(
            skipped,
            vec!["Initializing git repository", "Installing packages"]
        );
    }

    #[tokio::test]
    async fn test_download_failure_halts_pipeline() {
        let sandbox = tempfile::tempdir().unwrap();
        let config = test_config(sandbox.path(), Template::React);

        let steps = build_pipeline(
            &config,
            Arc::new(FailingReleaseSource),
            sandbox.path().join("download.tar.gz"),
        );

        let mut reporter = RecordingReporter::default();
        let outcome = run_pipeline(&config, steps, &mut reporter).await;

        let failure = outcome.failure.unwrap();
        assert_eq!(failure.title, "Downloading latest release");

        // Nothing after the failed download ran
        assert!(!config.app_dir.join("api").exists());
        let aborted = outcome
            .reports
            .iter()
            .filter(|r| r.state == StepState::Aborted)
            .count();
        assert_eq!(aborted, 5);
    }

    #[tokio::test]
    async fn test_directory_title_reports_using_vs_creating() {
        let sandbox = tempfile::tempdir().unwrap();
        let config = test_config(sandbox.path(), Template::React);
        let source = || Arc::new(FailingReleaseSource) as Arc<dyn ReleaseSource>;

        let steps = build_pipeline(&config, source(), sandbox.path().join("dl.tar.gz"));
        assert!(steps[0].title().starts_with("Creating directory"));

        std::fs::create_dir_all(&config.app_dir).unwrap();
        let steps = build_pipeline(&config, source(), sandbox.path().join("dl.tar.gz"));
        assert!(steps[0].title().starts_with("Using directory"));
    }

    #[test]
    fn test_install_group_covers_root_api_and_frontend() {
        let sandbox = tempfile::tempdir().unwrap();
        let config = test_config(sandbox.path(), Template::React);

        let group = install_group(&config);
        let titles = group_titles(&group);
        assert_eq!(
            titles,
            vec![
                "Checking compatibility",
                "Installing GRANDstack CLI and dependencies",
                "Installing dependencies for 'api'",
                "Installing dependencies for 'web-react'",
            ]
        );
    }

    #[test]
    fn test_install_group_omits_frontend_for_api_only() {
        let sandbox = tempfile::tempdir().unwrap();
        let config = test_config(sandbox.path(), Template::ApiOnly);

        let titles = group_titles(&install_group(&config));
        assert_eq!(titles.len(), 3);
        assert!(!titles.iter().any(|t| t.contains("web-")));
    }

    fn group_titles(step: &Step) -> Vec<String> {
        match &step.kind {
            crate::pipeline::StepKind::Group(children) => {
                children.iter().map(|c| c.title().to_string()).collect()
            }
            _ => panic!("expected a group step"),
        }
    }
}
