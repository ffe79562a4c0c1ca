// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Create handler - resolve options, run the pipeline, print the summary

use colored::Colorize;
use std::sync::Arc;

use crate::config::{self, Configuration, RawOptions};
use crate::errors::ScaffoldResult;
use crate::ops;
use crate::ops::release::GithubReleases;
use crate::pipeline::{run_pipeline, ConsoleReporter};
use crate::prompt::TerminalPrompter;
use crate::tasks;

/// Provision a new application from the resolved options
pub async fn run(options: RawOptions) -> ScaffoldResult<()> {
    let prompter = TerminalPrompter::new();
    let config = config::resolve(options, &prompter)?;

    // Pre-flight gate, before any network or filesystem mutation
    ops::fs::check_app_dir(&config.app_dir)?;

    println!("{}", "Initializing project...".green().bold());

    let releases = Arc::new(GithubReleases::new()?);

    // Staging area for the release archive, dropped after the run
    let staging = tempfile::Builder::new().prefix("grandstack").tempdir()?;
    let download_path = staging.path().join("grand-stack-starter.tar.gz");

    let steps = tasks::build_pipeline(&config, releases, download_path);

    let mut reporter = ConsoleReporter::new();
    let outcome = run_pipeline(&config, steps, &mut reporter).await;

    if let Some(failure) = outcome.failure {
        eprintln!();
        eprintln!("{}", format!("Step '{}' failed", failure.title).red().bold());
        return Err(failure.error);
    }

    print_summary(&config);
    Ok(())
}

/// Fixed closing summary, parameterized by project path and package manager
fn print_summary(config: &Configuration) {
    let manager = config.package_manager;

    println!();
    println!(
        "{}",
        format!(
            "Thanks for using GRANDstack! We've created your app in '{}'",
            config.app_dir.display()
        )
        .green()
    );
    println!("You can find documentation at: https://grandstack.io/docs");
    println!();
    println!("To start your GRANDstack web application and GraphQL API run:");
    println!();
    println!("        cd {}", config.project_path);
    println!("        {}", manager.run_script("start"));
    println!();
    println!(
        "Then (optionally) to seed the database with sample data, in the api/ directory in another terminal run:"
    );
    println!();
    println!("        {}", manager.run_script("seedDb"));
    println!();
}
