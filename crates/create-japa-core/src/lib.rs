//! create-japa core - configuration synthesis for the Japa test runner
//!
//! This library turns a handful of answers (assertion library, plugins,
//! reporters, project type) into a ready-to-run Japa setup: a `bin/test` bootstrap
//! file, optional sample tests, and a created or merged `package.json`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure synthesis** - `registry`, `resolve`, `compose` and `render`
//!   never touch the filesystem
//! - **Layer 2: Side effects** - `output` (idempotent writes, manifest merge) and
//!   `install` (package manager detection and invocation)
//! - **Layer 3: Orchestration** - `pipeline::Scaffolder`, plus the optional
//!   cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use create_japa_core::{compose, resolve, Renderer, RawSelections};
//!
//! let resolved = resolve(&RawSelections {
//!     plugins: vec!["@japa/assert".into()],
//!     reporters: vec![],
//!     project_type: Some("typescript".into()),
//! })?;
//! let bootstrap = Renderer::new().bootstrap(&compose(&resolved))?;
//! ```

pub mod compose;
pub mod error;
pub mod install;
pub mod output;
pub mod pipeline;
pub mod product;
pub mod registry;
pub mod render;
pub mod resolve;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compose::{compose, Composition, TestLayout};
pub use error::ScaffoldError;
pub use install::{CommandInstaller, PackageInstaller, PackageManager};
pub use output::{ArtifactWriter, InstallPlan, ManifestAction, WriteOutcome};
pub use pipeline::{Answers, InstallOutcome, Scaffolder, ScaffoldSummary};
pub use product::ProductConfig;
pub use registry::PluginChoice;
pub use render::Renderer;
pub use resolve::{resolve, ProjectType, RawSelections};

#[cfg(feature = "tui")]
pub use tui::run;
