//! create-japa - Set up the Japa test runner in a new or existing project

use clap::Parser;
use create_japa_core::tui::ScaffoldArgs;
use create_japa_core::{PackageManager, ProductConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Japa product configuration
#[derive(Clone)]
pub struct JapaConfig;

impl ProductConfig for JapaConfig {
    fn display_name(&self) -> &'static str {
        "Japa"
    }

    fn completion_heading(&self) -> &'static str {
        "Japa setup complete"
    }

    fn package_manager_env(&self) -> &'static str {
        "CREATE_JAPA_PACKAGE_MANAGER"
    }

    fn docs_url(&self) -> &'static str {
        "https://japa.dev/docs"
    }

    fn next_steps(&self, dir: &Path, manager: PackageManager) -> Vec<String> {
        let mut steps = Vec::new();

        // Step 1: cd to directory if not current
        if let Ok(current) = std::env::current_dir() {
            if current != dir {
                let shown = dir.strip_prefix(&current).unwrap_or(dir);
                steps.push(format!("cd {}", shown.display()));
            }
        }

        // Step 2: Run the tests
        steps.push(manager.run_test_command());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-japa")]
#[command(about = "Install and configure the Japa test runner")]
#[command(version)]
pub struct Args {
    /// Path to the project root
    #[arg(default_value = ".")]
    pub destination: PathBuf,

    /// Package manager to install dependencies with (npm, pnpm, yarn, bun)
    #[arg(long = "package-manager")]
    pub package_manager: Option<String>,

    /// Assertion library and plugins to use (repeatable or comma-separated; pass "" for none)
    #[arg(long, value_delimiter = ',')]
    pub plugins: Option<Vec<String>>,

    /// Reporters to use (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub reporters: Option<Vec<String>>,

    /// Project type (typescript or javascript)
    #[arg(long = "project-type")]
    pub project_type: Option<String>,

    /// Create sample test files
    #[arg(long = "sample-test", num_args = 0..=1, default_missing_value = "true")]
    pub sample_test: Option<bool>,

    /// Skip all prompts and use defaults (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

fn non_empty(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.map(|values| {
        values
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .collect()
    })
}

impl From<Args> for ScaffoldArgs {
    fn from(args: Args) -> Self {
        ScaffoldArgs {
            destination: Some(args.destination),
            package_manager: args.package_manager,
            plugins: non_empty(args.plugins),
            reporters: non_empty(args.reporters),
            project_type: args.project_type,
            sample_test: args.sample_test,
            yes: args.yes,
        }
    }
}

/// The error itself is reported by the prompt layer
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = JapaConfig;

    let result = create_japa_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flags() {
        let args = Args::parse_from([
            "create-japa",
            "my-app",
            "--plugins",
            "@japa/assert,@japa/file-system",
            "--plugins",
            "@japa/snapshot",
            "--project-type",
            "typescript",
            "--sample-test",
        ]);

        assert_eq!(args.destination, PathBuf::from("my-app"));
        assert_eq!(
            args.plugins,
            Some(vec![
                "@japa/assert".to_string(),
                "@japa/file-system".to_string(),
                "@japa/snapshot".to_string(),
            ])
        );
        assert_eq!(args.sample_test, Some(true));
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["create-japa"]);
        assert_eq!(args.destination, PathBuf::from("."));
        assert!(args.plugins.is_none());
        assert!(args.sample_test.is_none());
        assert!(!args.yes);
    }

    #[test]
    fn test_empty_plugin_list_means_none() {
        let args = Args::parse_from(["create-japa", "--plugins", ""]);
        let scaffold: ScaffoldArgs = args.into();
        assert_eq!(scaffold.plugins, Some(Vec::new()));
    }

    #[test]
    fn test_sample_test_false() {
        let args = Args::parse_from(["create-japa", "--sample-test=false"]);
        assert_eq!(args.sample_test, Some(false));
    }

    #[test]
    fn test_failure_exits_non_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("unknown project type"))), 1);
    }

    #[test]
    fn test_next_steps_end_with_test_command() {
        let dir = std::env::current_dir().unwrap();
        let steps = JapaConfig.next_steps(&dir, PackageManager::Pnpm);
        assert_eq!(steps, vec!["pnpm run test".to_string()]);
    }
}
