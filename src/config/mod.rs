// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Options resolution
//!
//! Merges CLI flags with interactively-collected answers into one
//! fully-populated [`Configuration`]. The record is immutable once
//! resolved; every pipeline step reads it, none mutate it. Resolution
//! performs no filesystem or network access.

mod template;

pub use template::Template;

use std::path::PathBuf;

use crate::errors::{ScaffoldError, ScaffoldResult};
use crate::ops::process::PackageManager;
use crate::prompt::Prompter;

/// Default template when none is chosen non-interactively
pub const DEFAULT_TEMPLATE: Template = Template::React;

/// Default Neo4j connection string. Encryption is carried by the URI
/// scheme (`neo4j+s://`), so there is no separate encryption flag.
pub const DEFAULT_NEO4J_URI: &str = "neo4j://localhost:7687";

/// Default Neo4j user
pub const DEFAULT_NEO4J_USER: &str = "neo4j";

/// Default Neo4j password
pub const DEFAULT_NEO4J_PASSWORD: &str = "letmein";

/// Raw flag/value structure straight out of argument parsing
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    /// Target directory positional, as typed
    pub project_path: Option<String>,
    /// Template identifier positional
    pub template: Option<String>,
    /// Skip interactive prompts and use defaults
    pub yes: bool,
    /// Initialize a git repository
    pub git: bool,
    /// Run dependency installation
    pub install: bool,
    /// Force npm over yarn
    pub use_npm: bool,
}

/// Neo4j connection settings written into the generated `api/.env`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_NEO4J_URI.to_string(),
            user: DEFAULT_NEO4J_USER.to_string(),
            password: DEFAULT_NEO4J_PASSWORD.to_string(),
        }
    }
}

/// The resolved, immutable set of choices driving one provisioning run
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Target directory as the operator typed it (used in the summary)
    pub project_path: String,
    /// Absolute path of the directory being provisioned
    pub app_dir: PathBuf,
    /// Chosen frontend template
    pub template: Template,
    /// Sub-project directories to prune after extraction
    pub templates_to_remove: Vec<String>,
    /// Initialize a git repository in the target directory
    pub git_init: bool,
    /// Install dependencies for the generated sub-projects
    pub run_install: bool,
    /// Package manager used for installs and in the summary
    pub package_manager: PackageManager,
    /// Database connection settings
    pub neo4j: Neo4jSettings,
}

/// Resolve raw options into a complete configuration, asking the prompter
/// for anything missing unless `--yes` was given.
pub fn resolve(raw: RawOptions, prompter: &dyn Prompter) -> ScaffoldResult<Configuration> {
    let project_path = raw.project_path.ok_or(ScaffoldError::MissingProjectDir)?;

    let template = match raw.template.as_deref() {
        Some(name) => name.parse::<Template>()?,
        None if raw.yes => DEFAULT_TEMPLATE,
        None => {
            let names: Vec<&str> = Template::ALL.iter().map(|t| t.display_name()).collect();
            let choice = prompter.select(
                "Please choose which project template to use",
                &names,
                0,
            )?;
            Template::ALL[choice]
        }
    };

    let git_init = if raw.git {
        true
    } else if raw.yes {
        false
    } else {
        prompter.confirm("Initialize a git repository?", false)?
    };

    let neo4j = if raw.yes {
        Neo4jSettings::default()
    } else {
        Neo4jSettings {
            uri: prompter.input(
                "Enter the connection string for Neo4j",
                DEFAULT_NEO4J_URI,
            )?,
            user: prompter.input("Enter the Neo4j user", DEFAULT_NEO4J_USER)?,
            password: prompter.input(
                "Enter the password for this user",
                DEFAULT_NEO4J_PASSWORD,
            )?,
        }
    };

    let app_dir = std::env::current_dir()?.join(&project_path);

    Ok(Configuration {
        templates_to_remove: template
            .templates_to_remove()
            .into_iter()
            .map(String::from)
            .collect(),
        project_path,
        app_dir,
        template,
        git_init,
        run_install: raw.install,
        package_manager: PackageManager::detect(raw.use_npm),
        neo4j,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{ScriptedAnswer, ScriptedPrompter};

    fn raw(project: Option<&str>) -> RawOptions {
        RawOptions {
            project_path: project.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_project_dir_fails_for_all_flag_combinations() {
        for yes in [false, true] {
            for git in [false, true] {
                for install in [false, true] {
                    let options = RawOptions {
                        project_path: None,
                        yes,
                        git,
                        install,
                        ..Default::default()
                    };
                    let err = resolve(options, &ScriptedPrompter::silent()).unwrap_err();
                    assert!(matches!(err, ScaffoldError::MissingProjectDir));
                }
            }
        }
    }

    #[test]
    fn test_yes_takes_documented_defaults_without_prompting() {
        let options = RawOptions {
            yes: true,
            ..raw(Some("myapp"))
        };

        // ScriptedPrompter::silent panics on any prompt
        let config = resolve(options, &ScriptedPrompter::silent()).unwrap();

        assert_eq!(config.template, Template::React);
        assert!(!config.git_init);
        assert!(!config.run_install);
        assert_eq!(config.neo4j, Neo4jSettings::default());
        assert_eq!(
            config.templates_to_remove,
            vec!["web-react-ts", "web-angular", "web-flutter"]
        );
        assert!(config.app_dir.is_absolute());
        assert!(config.app_dir.ends_with("myapp"));
    }

    #[test]
    fn test_template_positional_overrides_default() {
        let options = RawOptions {
            template: Some("React-TS".into()),
            yes: true,
            ..raw(Some("myapp"))
        };

        let config = resolve(options, &ScriptedPrompter::silent()).unwrap();
        assert_eq!(config.template, Template::ReactTs);
        assert!(!config
            .templates_to_remove
            .contains(&"web-react-ts".to_string()));
    }

    #[test]
    fn test_unknown_template_is_a_usage_error() {
        let options = RawOptions {
            template: Some("vue".into()),
            yes: true,
            ..raw(Some("myapp"))
        };

        let err = resolve(options, &ScriptedPrompter::silent()).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownTemplate { .. }));
        assert!(err.is_usage());
    }

    #[test]
    fn test_interactive_answers_override_defaults() {
        let prompter = ScriptedPrompter::with_answers(vec![
            ScriptedAnswer::Choice(2), // Angular
            ScriptedAnswer::Flag(true),
            ScriptedAnswer::Text("neo4j+s://db.example.com:7687".into()),
            ScriptedAnswer::Text("admin".into()),
            ScriptedAnswer::Text("s3cret".into()),
        ]);

        let config = resolve(raw(Some("myapp")), &prompter).unwrap();

        assert_eq!(config.template, Template::Angular);
        assert!(config.git_init);
        assert_eq!(config.neo4j.uri, "neo4j+s://db.example.com:7687");
        assert_eq!(config.neo4j.user, "admin");
        assert_eq!(config.neo4j.password, "s3cret");
    }

    #[test]
    fn test_git_flag_suppresses_git_prompt() {
        let prompter = ScriptedPrompter::with_answers(vec![
            ScriptedAnswer::Choice(0),
            // no Flag answer: the git confirm must not be asked
            ScriptedAnswer::Text(DEFAULT_NEO4J_URI.into()),
            ScriptedAnswer::Text(DEFAULT_NEO4J_USER.into()),
            ScriptedAnswer::Text(DEFAULT_NEO4J_PASSWORD.into()),
        ]);

        let options = RawOptions {
            git: true,
            ..raw(Some("myapp"))
        };

        let config = resolve(options, &prompter).unwrap();
        assert!(config.git_init);
    }

    #[test]
    fn test_use_npm_forces_npm() {
        let options = RawOptions {
            yes: true,
            use_npm: true,
            ..raw(Some("myapp"))
        };

        let config = resolve(options, &ScriptedPrompter::silent()).unwrap();
        assert_eq!(config.package_manager, PackageManager::Npm);
    }
}
