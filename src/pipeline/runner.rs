// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Pipeline runner
//!
//! Executes steps strictly in declaration order. Before each step the skip
//! predicate is evaluated against the resolved configuration; a skipped
//! step's action is never invoked. The first failure halts the pipeline:
//! every remaining step transitions straight to `Aborted` without predicate
//! evaluation. No retries, no rollback.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::config::Configuration;
use crate::errors::ScaffoldError;
use crate::pipeline::reporter::Reporter;
use crate::pipeline::step::{Step, StepKind};

/// Lifecycle of a single step
///
/// Transitions: `Pending → Skipped`, or `Pending → Running → {Succeeded,
/// Failed}`. After the first failure all remaining pending steps go
/// directly to `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Running,
    Skipped,
    Succeeded,
    Failed,
    Aborted,
}

impl StepState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Skipped | Self::Succeeded | Self::Failed | Self::Aborted)
    }
}

/// Terminal record for one step
#[derive(Debug)]
pub struct StepReport {
    pub title: String,
    pub state: StepState,
    /// Reason returned by the skip predicate, for `Skipped` steps
    pub skip_reason: Option<String>,
}

/// The single captured failure of a run
#[derive(Debug)]
pub struct StepFailure {
    /// Failing step's title; for nested steps the group title is prefixed
    pub title: String,
    pub error: ScaffoldError,
}

/// Result of executing a pipeline
#[derive(Debug)]
pub struct RunOutcome {
    /// Terminal reports, one per visited step (children precede their group)
    pub reports: Vec<StepReport>,
    /// First failure, if any
    pub failure: Option<StepFailure>,
}

impl RunOutcome {
    /// True when every step completed or was skipped
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Execute the pipeline exactly once
pub async fn run_pipeline(
    config: &Configuration,
    steps: Vec<Step>,
    reporter: &mut dyn Reporter,
) -> RunOutcome {
    let mut reports = Vec::new();
    let failure = run_steps(config, steps, reporter, 0, &mut reports).await;
    RunOutcome { reports, failure }
}

/// Run one level of steps, returning the first failure. Recurses one level
/// for groups; a group is a single step from its parent's perspective.
fn run_steps<'a>(
    config: &'a Configuration,
    steps: Vec<Step>,
    reporter: &'a mut dyn Reporter,
    depth: usize,
    reports: &'a mut Vec<StepReport>,
) -> Pin<Box<dyn Future<Output = Option<StepFailure>> + 'a>> {
    Box::pin(async move {
        let mut failure: Option<StepFailure> = None;

        for step in steps {
            if failure.is_some() {
                reporter.step_aborted(&step.title, depth);
                reports.push(StepReport {
                    title: step.title,
                    state: StepState::Aborted,
                    skip_reason: None,
                });
                continue;
            }

            if let Some(predicate) = &step.skip {
                if let Some(reason) = predicate(config) {
                    debug!("Skipping '{}': {}", step.title, reason);
                    reporter.step_skipped(&step.title, &reason, depth);
                    reports.push(StepReport {
                        title: step.title,
                        state: StepState::Skipped,
                        skip_reason: Some(reason),
                    });
                    continue;
                }
            }

            match step.kind {
                StepKind::Action(action) => {
                    reporter.step_started(&step.title, depth);
                    match action().await {
                        Ok(()) => {
                            reporter.step_succeeded(&step.title, depth);
                            reports.push(StepReport {
                                title: step.title,
                                state: StepState::Succeeded,
                                skip_reason: None,
                            });
                        }
                        Err(error) => {
                            reporter.step_failed(&step.title, &error, depth);
                            failure = Some(StepFailure {
                                title: step.title.clone(),
                                error,
                            });
                            reports.push(StepReport {
                                title: step.title,
                                state: StepState::Failed,
                                skip_reason: None,
                            });
                        }
                    }
                }
                StepKind::Group(children) => {
                    reporter.group_started(&step.title, depth);
                    match run_steps(config, children, &mut *reporter, depth + 1, &mut *reports)
                        .await
                    {
                        None => {
                            reports.push(StepReport {
                                title: step.title,
                                state: StepState::Succeeded,
                                skip_reason: None,
                            });
                        }
                        Some(child_failure) => {
                            failure = Some(StepFailure {
                                title: format!("{} → {}", step.title, child_failure.title),
                                error: child_failure.error,
                            });
                            reports.push(StepReport {
                                title: step.title,
                                state: StepState::Failed,
                                skip_reason: None,
                            });
                        }
                    }
                }
            }
        }

        failure
    })
}
