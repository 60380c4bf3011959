//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to brand the prompts and to decide what
//! the operator is told once the project is ready.

use crate::install::PackageManager;
use std::path::Path;

/// Configuration trait for the scaffolding CLI
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Heading shown once the setup completes
    fn completion_heading(&self) -> &'static str;

    /// Environment variable name for overriding the package manager
    fn package_manager_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after setup
    fn next_steps(&self, dir: &Path, manager: PackageManager) -> Vec<String>;
}
