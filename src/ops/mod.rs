// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! External collaborators
//!
//! Narrow wrappers around the capabilities the pipeline delegates to:
//! release listing and download, archive extraction, filesystem mutation,
//! and subprocess invocation. The pipeline depends on these contracts,
//! not on their internals.

pub mod archive;
pub mod fs;
pub mod process;
pub mod release;
