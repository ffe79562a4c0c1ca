// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Run reporting
//!
//! The runner never prints; it emits transitions to a [`Reporter`]. The
//! console implementation renders step titles with a spinner while running
//! and a ✓/✗/○ result line once terminal, indented by nesting depth.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::errors::ScaffoldError;

/// Observer of runner transitions
pub trait Reporter {
    fn group_started(&mut self, title: &str, depth: usize);
    fn step_started(&mut self, title: &str, depth: usize);
    fn step_succeeded(&mut self, title: &str, depth: usize);
    fn step_skipped(&mut self, title: &str, reason: &str, depth: usize);
    fn step_failed(&mut self, title: &str, error: &ScaffoldError, depth: usize);
    fn step_aborted(&mut self, title: &str, depth: usize);
}

/// Console reporter with a spinner for the running step
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(depth: usize) -> String {
        "  ".repeat(depth + 1)
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn group_started(&mut self, title: &str, depth: usize) {
        println!("{}{}", Self::indent(depth), title.bold());
    }

    fn step_started(&mut self, title: &str, depth: usize) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.blue} {msg}")
                .expect("Invalid spinner template"),
        );
        spinner.set_message(format!("{}{}...", Self::indent(depth), title));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn step_succeeded(&mut self, title: &str, depth: usize) {
        self.clear_spinner();
        println!("{}{} {}", Self::indent(depth), "✓".green(), title);
    }

    fn step_skipped(&mut self, title: &str, reason: &str, depth: usize) {
        println!(
            "{}{} {} {}",
            Self::indent(depth),
            "○".dimmed(),
            title.dimmed(),
            format!("({})", reason).dimmed()
        );
    }

    fn step_failed(&mut self, title: &str, _error: &ScaffoldError, depth: usize) {
        self.clear_spinner();
        println!("{}{} {}", Self::indent(depth), "✗".red(), title.bold());
    }

    fn step_aborted(&mut self, title: &str, depth: usize) {
        println!(
            "{}{} {}",
            Self::indent(depth),
            "•".dimmed(),
            format!("{} (aborted)", title).dimmed()
        );
    }
}

/// Reporter that records events for assertions
#[cfg(test)]
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn group_started(&mut self, title: &str, _depth: usize) {
        self.events.push(format!("group:{}", title));
    }

    fn step_started(&mut self, title: &str, _depth: usize) {
        self.events.push(format!("started:{}", title));
    }

    fn step_succeeded(&mut self, title: &str, _depth: usize) {
        self.events.push(format!("succeeded:{}", title));
    }

    fn step_skipped(&mut self, title: &str, reason: &str, _depth: usize) {
        self.events.push(format!("skipped:{}:{}", title, reason));
    }

    fn step_failed(&mut self, title: &str, _error: &ScaffoldError, _depth: usize) {
        self.events.push(format!("failed:{}", title));
    }

    fn step_aborted(&mut self, title: &str, _depth: usize) {
        self.events.push(format!("aborted:{}", title));
    }
}
