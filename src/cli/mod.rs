// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! CLI definition and the create handler
//!
//! Defines the command-line surface. Argument parsing stays here; the
//! entry point alone decides process exit codes.

pub mod create;

use clap::Parser;

use crate::config::RawOptions;

/// Scaffold a GRANDstack application
///
/// Downloads the latest GRANDstack starter release, keeps the chosen
/// frontend template, and wires up the Neo4j connection settings.
#[derive(Parser, Debug)]
#[clap(
    name = "create-grandstack-app",
    version,
    about = "Scaffold a GRANDstack (GraphQL, React, Apollo, Neo4j Database) application",
    long_about = None,
    after_help = "Examples:\n\
        create-grandstack-app myapp                   Prompt for template and credentials\n\
        create-grandstack-app myapp React --yes       Use defaults, no prompts\n\
        create-grandstack-app myapp -y -g -i          Defaults plus git init and installs\n\n\
        Templates: React, React-TS, Angular, Flutter, API-Only"
)]
pub struct Cli {
    /// Directory to create the application in
    pub project_directory: Option<String>,

    /// Project template (React, React-TS, Angular, Flutter, API-Only)
    pub template: Option<String>,

    /// Initialize a git repository
    #[clap(short, long)]
    pub git: bool,

    /// Skip interactive prompts and use defaults
    #[clap(short, long)]
    pub yes: bool,

    /// Install dependencies for the generated sub-projects
    #[clap(short, long)]
    pub install: bool,

    /// Force npm even when yarn is available
    #[clap(long)]
    pub use_npm: bool,
}

impl Cli {
    /// Lower the parsed arguments into the resolver's input record
    pub fn into_options(self) -> RawOptions {
        RawOptions {
            project_path: self.project_directory,
            template: self.template,
            yes: self.yes,
            git: self.git,
            install: self.install,
            use_npm: self.use_npm,
        }
    }
}
