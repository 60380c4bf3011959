//! Everything that touches the destination directory
//!
//! This module provides:
//! - Idempotent artifact writes that never overwrite existing files
//! - package.json creation and merging, producing the install plan

pub mod manifest;
pub mod writer;

pub use manifest::{merge_or_create, InstallPlan, ManifestAction, PackageRequest, MANIFEST_FILE};
pub use writer::{ArtifactWriter, FileReport, WriteOutcome};
