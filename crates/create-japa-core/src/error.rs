//! Error taxonomy for the scaffolding engine

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a scaffolding run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Invalid project type '{0}'. Expected one of: typescript, javascript")]
    InvalidProjectType(String),

    #[error("Project type is required. Pass --project-type <typescript|javascript>")]
    MissingProjectType,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Failed to {action} {}: {source}", path.display())]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a JSON object", path.display())]
    ManifestShape { path: PathBuf },

    #[error("Failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Unknown package manager '{0}'. Expected one of: npm, pnpm, yarn, bun")]
    UnknownPackageManager(String),

    #[error("Package manager failed: {0}")]
    PackageManager(String),
}

impl ScaffoldError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from resolving the project type
    pub fn is_project_type_error(&self) -> bool {
        matches!(self, Self::InvalidProjectType(_) | Self::MissingProjectType)
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
