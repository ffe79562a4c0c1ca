// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Interactive prompting
//!
//! The options resolver talks to the terminal only through the [`Prompter`]
//! trait, so prompting stays injectable for tests. The real implementation
//! wraps dialoguer.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::errors::ScaffoldResult;

/// Capability for asking the operator questions
pub trait Prompter {
    /// Pick one of `options`, returning its index
    fn select(&self, message: &str, options: &[&str], default: usize) -> ScaffoldResult<usize>;

    /// Yes/no question
    fn confirm(&self, message: &str, default: bool) -> ScaffoldResult<bool>;

    /// Free-form input with a default answer
    fn input(&self, message: &str, default: &str) -> ScaffoldResult<String>;
}

/// Prompter backed by dialoguer
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, options: &[&str], default: usize) -> ScaffoldResult<usize> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(options)
            .default(default)
            .interact()?;
        Ok(choice)
    }

    fn confirm(&self, message: &str, default: bool) -> ScaffoldResult<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    fn input(&self, message: &str, default: &str) -> ScaffoldResult<String> {
        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default.to_string())
            .interact_text()?;
        Ok(answer)
    }
}

/// Scripted prompter for tests: pops pre-recorded answers in order and
/// panics when asked an unexpected question.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::sync::Mutex<std::collections::VecDeque<ScriptedAnswer>>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum ScriptedAnswer {
    Choice(usize),
    Flag(bool),
    Text(String),
}

#[cfg(test)]
impl ScriptedPrompter {
    /// A prompter that answers nothing; any question is a test failure
    pub fn silent() -> Self {
        Self::with_answers(vec![])
    }

    pub fn with_answers(answers: Vec<ScriptedAnswer>) -> Self {
        Self {
            answers: std::sync::Mutex::new(answers.into()),
        }
    }

    fn next(&self, question: &str) -> ScriptedAnswer {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected prompt: '{}'", question))
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, _options: &[&str], _default: usize) -> ScaffoldResult<usize> {
        match self.next(message) {
            ScriptedAnswer::Choice(i) => Ok(i),
            other => panic!("Expected Choice for '{}', got {:?}", message, other),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> ScaffoldResult<bool> {
        match self.next(message) {
            ScriptedAnswer::Flag(b) => Ok(b),
            other => panic!("Expected Flag for '{}', got {:?}", message, other),
        }
    }

    fn input(&self, message: &str, _default: &str) -> ScaffoldResult<String> {
        match self.next(message) {
            ScriptedAnswer::Text(s) => Ok(s),
            other => panic!("Expected Text for '{}', got {:?}", message, other),
        }
    }
}
