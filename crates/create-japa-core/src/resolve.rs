//! Maps raw selection tokens onto registry records

use crate::error::{Result, ScaffoldError};
use crate::registry::{self, Category, PluginChoice};
use std::fmt;

/// Supported project flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    TypeScript,
    JavaScript,
}

impl ProjectType {
    pub const ALL: [ProjectType; 2] = [ProjectType::TypeScript, ProjectType::JavaScript];

    /// Parse the literal accepted on the command line. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "typescript" => Some(ProjectType::TypeScript),
            "javascript" => Some(ProjectType::JavaScript),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ProjectType::TypeScript => "typescript",
            ProjectType::JavaScript => "javascript",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::TypeScript => "TypeScript",
            ProjectType::JavaScript => "JavaScript",
        }
    }

    /// Extension of every generated source file
    pub fn extension(&self) -> &'static str {
        match self {
            ProjectType::TypeScript => "ts",
            ProjectType::JavaScript => "js",
        }
    }

    /// Command written to `scripts.test` in package.json
    pub fn test_script(&self) -> &'static str {
        match self {
            ProjectType::TypeScript => "node --loader ts-node/esm --enable-source-maps bin/test.ts",
            ProjectType::JavaScript => "node bin/test.js",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Selection tokens exactly as they came from prompts or flags
#[derive(Debug, Clone, Default)]
pub struct RawSelections {
    /// Assertion library and additional plugin names, in selection order
    pub plugins: Vec<String>,
    /// Reporter names. Empty means the runner default.
    pub reporters: Vec<String>,
    pub project_type: Option<String>,
}

/// Selections after validation against the registry
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub project_type: ProjectType,
    pub assertion: Option<&'static PluginChoice>,
    /// Additional plugins in selection order
    pub plugins: Vec<&'static PluginChoice>,
    /// Never empty
    pub reporters: Vec<&'static PluginChoice>,
    pub has_browser_plugin: bool,
}

/// Resolve the project type token. Absent and unknown values are both fatal.
pub fn resolve_project_type(token: Option<&str>) -> Result<ProjectType> {
    let token = token.ok_or(ScaffoldError::MissingProjectType)?;
    ProjectType::parse(token)
        .ok_or_else(|| ScaffoldError::InvalidProjectType(token.to_string()))
}

fn lookup(token: &str) -> Result<&'static PluginChoice> {
    registry::lookup(token.trim())
        .ok_or_else(|| ScaffoldError::InvalidSelection(format!("unknown plugin '{}'", token)))
}

/// Validate every token and partition plugins by category
pub fn resolve(raw: &RawSelections) -> Result<Resolved> {
    let project_type = resolve_project_type(raw.project_type.as_deref())?;

    let mut assertion: Option<&'static PluginChoice> = None;
    let mut plugins: Vec<&'static PluginChoice> = Vec::new();

    for token in &raw.plugins {
        let choice = lookup(token)?;
        match choice.category {
            Category::Assertion => match assertion {
                Some(existing) if existing.name == choice.name => {}
                Some(existing) => {
                    return Err(ScaffoldError::InvalidSelection(format!(
                        "only one assertion library can be used, got '{}' and '{}'",
                        existing.name, choice.name
                    )));
                }
                None => assertion = Some(choice),
            },
            Category::Additional | Category::Browser => {
                if !plugins.iter().any(|p| p.name == choice.name) {
                    plugins.push(choice);
                }
            }
            Category::Reporter => {
                return Err(ScaffoldError::InvalidSelection(format!(
                    "'{}' is a reporter, select it with --reporters",
                    choice.name
                )));
            }
        }
    }

    let mut reporters: Vec<&'static PluginChoice> = Vec::new();
    for token in &raw.reporters {
        let choice = lookup(token)?;
        if choice.category != Category::Reporter {
            return Err(ScaffoldError::InvalidSelection(format!(
                "'{}' is not a reporter",
                choice.name
            )));
        }
        if !reporters.iter().any(|r| r.name == choice.name) {
            reporters.push(choice);
        }
    }
    if reporters.is_empty() {
        reporters.extend(registry::lookup(registry::DEFAULT_REPORTER));
    }

    let has_browser_plugin = plugins
        .iter()
        .any(|p| registry::is_browser_capability(p.name));

    Ok(Resolved {
        project_type,
        assertion,
        plugins,
        reporters,
        has_browser_plugin,
    })
}
