//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Package manager resolution (flag, env var, lockfile detection)
//! - The injectable `PackageInstaller` seam and its process-backed implementation

pub mod installer;
pub mod package_manager;

pub use installer::{CommandInstaller, PackageInstaller};
pub use package_manager::{check_package_manager, PackageManager, PackageManagerInfo};
