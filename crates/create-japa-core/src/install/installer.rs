//! Package installation through the project's package manager
//!
//! The pipeline only sees the [`PackageInstaller`] trait, so tests can swap
//! in a recording fake instead of spawning a real package manager.

use super::package_manager::PackageManager;
use crate::error::{Result, ScaffoldError};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a dependency install (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Installs dev dependencies into a project directory
#[allow(async_fn_in_trait)]
pub trait PackageInstaller {
    /// `packages` are `name@tag` strings
    async fn install(&self, packages: &[String], root: &Path) -> Result<()>;
}

impl<T: PackageInstaller + ?Sized> PackageInstaller for &T {
    async fn install(&self, packages: &[String], root: &Path) -> Result<()> {
        (**self).install(packages, root).await
    }
}

/// Runs the real package manager and streams its output
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    manager: PackageManager,
    timeout: Duration,
}

impl CommandInstaller {
    pub fn new(manager: PackageManager) -> Self {
        Self {
            manager,
            timeout: INSTALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    /// Full command line, for display
    pub fn command_line(&self, packages: &[String]) -> String {
        let mut parts = vec![self.manager.command().to_string()];
        parts.extend(self.manager.add_dev_args(packages));
        parts.join(" ")
    }
}

impl PackageInstaller for CommandInstaller {
    async fn install(&self, packages: &[String], root: &Path) -> Result<()> {
        let cmd = self.command_line(packages);
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(self.manager.command())
            .args(self.manager.add_dev_args(packages))
            .current_dir(root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ScaffoldError::PackageManager(format!(
                    "could not start {}: {}",
                    self.manager.command(),
                    e
                ))
            })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill().await;
            return Err(ScaffoldError::PackageManager(
                "failed to capture installer output".to_string(),
            ));
        };

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stderr_open = true;
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(self.timeout, output_task).await.is_err() {
            let _ = child.kill().await;
            println!();
            return Err(ScaffoldError::PackageManager(format!(
                "installation timed out after {} seconds. Install manually: {}",
                self.timeout.as_secs(),
                cmd
            )));
        }

        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    Ok(())
                } else {
                    Err(ScaffoldError::PackageManager(format!(
                        "exited with code {}. Install manually: {}",
                        status.code().unwrap_or(-1),
                        cmd
                    )))
                }
            }
            Ok(Err(e)) => Err(ScaffoldError::PackageManager(format!(
                "failed to wait for installer: {}",
                e
            ))),
            Err(_) => {
                let _ = child.kill().await;
                Err(ScaffoldError::PackageManager(format!(
                    "installer hung. Install manually: {}",
                    cmd
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let installer = CommandInstaller::new(PackageManager::Pnpm);
        let packages = vec![
            "@japa/runner@next".to_string(),
            "typescript@latest".to_string(),
        ];
        assert_eq!(
            installer.command_line(&packages),
            "pnpm add -D @japa/runner@next typescript@latest"
        );
    }

    #[test]
    fn test_custom_timeout() {
        let installer =
            CommandInstaller::new(PackageManager::Npm).with_timeout(Duration::from_secs(1));
        assert_eq!(installer.timeout, Duration::from_secs(1));
        assert_eq!(installer.manager(), PackageManager::Npm);
    }
}
