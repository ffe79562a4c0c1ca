// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! # create-grandstack-app
//!
//! Scaffold a GRANDstack (GraphQL, React, Apollo, Neo4j Database)
//! application from the latest grand-stack-starter release.
//!
//! One invocation runs a fixed, ordered pipeline: create the target
//! directory, download and extract the starter, prune the unselected
//! frontend templates, write the Neo4j environment file, and optionally
//! initialize git and install dependencies. The first failing step aborts
//! everything after it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Prompt for template and credentials
//! create-grandstack-app myapp
//!
//! # Take every default, initialize git, install dependencies
//! create-grandstack-app myapp React --yes --git --install
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod ops;
pub mod pipeline;
pub mod prompt;
pub mod tasks;

// Re-export commonly used types
pub use config::{Configuration, RawOptions, Template};
pub use errors::{ScaffoldError, ScaffoldResult};
pub use pipeline::{run_pipeline, RunOutcome, Step};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
