//! package.json creation and merging
//!
//! A fresh manifest is fully owned by the scaffolder. An existing one is
//! shared: only `type` and `scripts.test` are overwritten, every other key
//! keeps its value and position.

use super::writer::{ArtifactWriter, WriteOutcome};
use crate::compose::TOOLCHAIN_PACKAGES;
use crate::error::{Result, ScaffoldError};
use crate::resolve::ProjectType;
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const MANIFEST_FILE: &str = "package.json";

/// Dist-tag requested for Japa packages
const JAPA_TAG: &str = "next";

/// Dist-tag requested for the toolchain
const TOOLCHAIN_TAG: &str = "latest";

const FALLBACK_NAME: &str = "japa-project";

/// Whether the manifest was written from scratch or merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestAction {
    Created,
    Updated,
}

/// A package plus the dist-tag to install it from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    pub tag: &'static str,
}

impl PackageRequest {
    fn new(name: &str, tag: &'static str) -> Self {
        Self {
            name: name.to_string(),
            tag,
        }
    }
}

impl fmt::Display for PackageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.tag)
    }
}

/// Result of the manifest step: what happened and what to install next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub manifest: ManifestAction,
    pub packages: Vec<PackageRequest>,
}

impl InstallPlan {
    /// `name@tag` arguments for the package manager
    pub fn install_args(&self) -> Vec<String> {
        self.packages.iter().map(ToString::to_string).collect()
    }
}

/// npm-compatible package name from the destination directory
pub fn package_name_for(root: &Path) -> String {
    let base = root
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let name: String = base
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => c,
            _ => '-',
        })
        .collect();
    let name = name.trim_start_matches(['.', '_']).to_string();

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Manifest written when the project has none
pub fn fresh_manifest(name: &str, project_type: ProjectType) -> Value {
    json!({
        "name": name,
        "type": "module",
        "description": "",
        "main": "index.js",
        "scripts": { "test": project_type.test_script() },
        "version": "0.0.0",
    })
}

/// Overwrite `type` and `scripts.test`, keep everything else
pub fn merge_manifest(mut manifest: Value, project_type: ProjectType, path: &Path) -> Result<Value> {
    let object = manifest
        .as_object_mut()
        .ok_or_else(|| ScaffoldError::ManifestShape {
            path: path.to_path_buf(),
        })?;

    object.insert("type".to_string(), json!("module"));

    let scripts = object
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    if !scripts.is_object() {
        *scripts = Value::Object(Map::new());
    }
    if let Some(scripts) = scripts.as_object_mut() {
        scripts.insert("test".to_string(), json!(project_type.test_script()));
    }

    Ok(manifest)
}

/// Absolute form of `root`, so `.` and `..` resolve to a real base name
async fn canonical_root(root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(root)
        .await
        .map_err(|e| ScaffoldError::fs("create directory", root, e))?;
    fs::canonicalize(root)
        .await
        .map_err(|e| ScaffoldError::fs("resolve", root, e))
}

fn to_text(manifest: &Value) -> String {
    // Serializing a `Value` cannot fail
    let mut text = serde_json::to_string_pretty(manifest).unwrap_or_default();
    text.push('\n');
    text
}

/// Create or merge package.json under `root` and compute the install plan
pub async fn merge_or_create(
    root: &Path,
    project_type: ProjectType,
    packages: &[&str],
) -> Result<InstallPlan> {
    let path = root.join(MANIFEST_FILE);
    let japa_packages = packages.iter().map(|p| PackageRequest::new(p, JAPA_TAG));

    let exists = fs::try_exists(&path)
        .await
        .map_err(|e| ScaffoldError::fs("inspect", &path, e))?;

    if !exists {
        let name = package_name_for(&canonical_root(root).await?);
        let manifest = fresh_manifest(&name, project_type);
        let outcome = ArtifactWriter::new(root)
            .write(MANIFEST_FILE, &to_text(&manifest))
            .await?;

        // Lost a race with another writer; treat it like an existing manifest
        if outcome == WriteOutcome::Created {
            tracing::info!(path = %path.display(), "created manifest");
            return Ok(InstallPlan {
                manifest: ManifestAction::Created,
                packages: japa_packages
                    .chain(
                        TOOLCHAIN_PACKAGES
                            .iter()
                            .map(|p| PackageRequest::new(p, TOOLCHAIN_TAG)),
                    )
                    .collect(),
            });
        }
    }

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| ScaffoldError::fs("read", &path, e))?;
    let existing: Value =
        serde_json::from_str(&content).map_err(|source| ScaffoldError::ManifestParse {
            path: path.clone(),
            source,
        })?;

    let merged = merge_manifest(existing, project_type, &path)?;
    fs::write(&path, to_text(&merged))
        .await
        .map_err(|e| ScaffoldError::fs("write", &path, e))?;
    tracing::info!(path = %path.display(), "updated manifest");

    Ok(InstallPlan {
        manifest: ManifestAction::Updated,
        packages: japa_packages.collect(),
    })
}
