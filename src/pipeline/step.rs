// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Step definition
//!
//! A step is a named unit of work: a title for reporting, an optional skip
//! predicate evaluated against the resolved configuration, and either an
//! action or a group of nested sub-steps. Steps are built once, bound to
//! their collaborators, and handed to the runner as an ordered list.

use std::future::Future;
use std::pin::Pin;

use crate::config::Configuration;
use crate::errors::ScaffoldResult;

/// Boxed future produced by a step action
pub type StepFuture = Pin<Box<dyn Future<Output = ScaffoldResult<()>> + Send>>;

/// A step's side-effecting operation, invoked at most once
pub type StepAction = Box<dyn FnOnce() -> StepFuture + Send>;

/// Pure function of the configuration; a `Some` result is the skip reason
pub type SkipPredicate = Box<dyn Fn(&Configuration) -> Option<String> + Send + Sync>;

/// One unit of the provisioning pipeline
pub struct Step {
    pub(crate) title: String,
    pub(crate) skip: Option<SkipPredicate>,
    pub(crate) kind: StepKind,
}

pub(crate) enum StepKind {
    /// Leaf step delegating to an external collaborator
    Action(StepAction),
    /// Nested sub-pipeline, treated as a single step by the parent
    Group(Vec<Step>),
}

impl Step {
    /// Create a leaf step from an async action
    pub fn action<F, Fut>(title: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ScaffoldResult<()>> + Send + 'static,
    {
        Self {
            title: title.into(),
            skip: None,
            kind: StepKind::Action(Box::new(move || -> StepFuture { Box::pin(action()) })),
        }
    }

    /// Create a step that runs nested sub-steps; it succeeds only if all
    /// of its children succeed
    pub fn group(title: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            title: title.into(),
            skip: None,
            kind: StepKind::Group(steps),
        }
    }

    /// Attach a skip predicate; a `Some(reason)` marks the step skipped
    /// without invoking its action
    pub fn skip_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Configuration) -> Option<String> + Send + Sync + 'static,
    {
        self.skip = Some(Box::new(predicate));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            StepKind::Action(_) => "action",
            StepKind::Group(steps) => return write!(f, "Step({:?}, {} children)", self.title, steps.len()),
        };
        write!(f, "Step({:?}, {})", self.title, kind)
    }
}
