// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Starter template variants
//!
//! The starter ships one sub-project per frontend variant plus the `api`
//! GraphQL server, which is always kept. Everything except the chosen
//! variant gets pruned after extraction.

use crate::errors::ScaffoldError;

/// A frontend template shipped with the GRANDstack starter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    React,
    ReactTs,
    Angular,
    Flutter,
    /// GraphQL API server only, no frontend
    ApiOnly,
}

impl Template {
    /// All selectable templates, in prompt order
    pub const ALL: [Template; 5] = [
        Template::React,
        Template::ReactTs,
        Template::Angular,
        Template::Flutter,
        Template::ApiOnly,
    ];

    /// Human-facing name, as shown in the template prompt
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::React => "React",
            Self::ReactTs => "React-TS",
            Self::Angular => "Angular",
            Self::Flutter => "Flutter",
            Self::ApiOnly => "API-Only",
        }
    }

    /// Sub-project directory inside the extracted starter, if any
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            Self::React => Some("web-react"),
            Self::ReactTs => Some("web-react-ts"),
            Self::Angular => Some("web-angular"),
            Self::Flutter => Some("web-flutter"),
            Self::ApiOnly => None,
        }
    }

    /// Directory name recorded in the scripts configuration file.
    /// The API-Only variant points the starter scripts at `api`.
    pub fn config_dir_name(&self) -> &'static str {
        self.dir_name().unwrap_or("api")
    }

    /// Template directories to delete after extraction: every variant's
    /// directory except this template's own. The `api` directory is never
    /// in this set.
    pub fn templates_to_remove(&self) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|t| *t != self)
            .filter_map(|t| t.dir_name())
            .collect()
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Template {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(Self::React),
            "react-ts" | "reactts" => Ok(Self::ReactTs),
            "angular" => Ok(Self::Angular),
            "flutter" => Ok(Self::Flutter),
            "api-only" | "api" => Ok(Self::ApiOnly),
            _ => Err(ScaffoldError::UnknownTemplate { name: s.to_string() }),
        }
    }
}
