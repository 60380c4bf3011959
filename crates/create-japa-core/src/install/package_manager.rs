//! Package manager selection and detection

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lockfiles checked in order when nothing was requested explicitly
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "npm" => Some(PackageManager::Npm),
            "pnpm" => Some(PackageManager::Pnpm),
            "yarn" => Some(PackageManager::Yarn),
            "bun" => Some(PackageManager::Bun),
            _ => None,
        }
    }

    /// Binary name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments that add the given packages as dev dependencies
    pub fn add_dev_args(&self, packages: &[String]) -> Vec<String> {
        let base: &[&str] = match self {
            PackageManager::Npm => &["install", "-D"],
            PackageManager::Pnpm | PackageManager::Yarn => &["add", "-D"],
            PackageManager::Bun => &["add", "-d"],
        };
        base.iter()
            .map(|s| s.to_string())
            .chain(packages.iter().cloned())
            .collect()
    }

    /// Command users run afterwards to execute the tests
    pub fn run_test_command(&self) -> String {
        format!("{} run test", self.command())
    }

    /// Guess from lockfiles in `root`, defaulting to npm
    pub fn detect(root: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(file, _)| root.join(file).is_file())
            .map(|(_, manager)| *manager)
            .unwrap_or(PackageManager::Npm)
    }

    /// Flag first, then the environment variable, then lockfile detection
    pub fn resolve(flag: Option<&str>, env_var: &str, root: &Path) -> Result<Self> {
        let requested = flag
            .map(str::to_string)
            .or_else(|| std::env::var(env_var).ok().filter(|v| !v.trim().is_empty()));

        match requested {
            Some(value) => {
                Self::parse(&value).ok_or(ScaffoldError::UnknownPackageManager(value))
            }
            None => Ok(Self::detect(root)),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Detection result for the package manager binary
#[derive(Debug, Clone)]
pub struct PackageManagerInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether the package manager binary is on PATH
pub fn check_package_manager(manager: PackageManager) -> PackageManagerInfo {
    let output = Command::new(manager.command()).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            PackageManagerInfo {
                name: manager.command(),
                version: Some(version),
                available: true,
            }
        }
        _ => PackageManagerInfo {
            name: manager.command(),
            version: None,
            available: false,
        },
    }
}
