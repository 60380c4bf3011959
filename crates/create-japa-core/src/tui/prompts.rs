//! Charm-style CLI prompts using cliclack

use crate::install::{check_package_manager, CommandInstaller, PackageManager};
use crate::output::{FileReport, ManifestAction, WriteOutcome, MANIFEST_FILE};
use crate::pipeline::{self, Answers, InstallOutcome, Scaffolder, ScaffoldSummary, Stage};
use crate::product::ProductConfig;
use crate::registry::{self, PluginChoice};
use crate::resolve::{ProjectType, RawSelections};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Assertion library used when prompts are skipped
const DEFAULT_ASSERTION: &str = "@japa/assert";

/// CLI arguments for the scaffold command
#[derive(Debug, Clone, Default)]
pub struct ScaffoldArgs {
    /// Project root. Defaults to the current directory.
    pub destination: Option<PathBuf>,

    /// Package manager override
    pub package_manager: Option<String>,

    /// Assertion library and additional plugins; skips both plugin prompts
    pub plugins: Option<Vec<String>>,

    /// Reporters; skips the reporter prompt
    pub reporters: Option<Vec<String>>,

    /// `typescript` or `javascript`; skips the project type prompt
    pub project_type: Option<String>,

    /// Whether to create sample tests; skips the confirmation
    pub sample_test: Option<bool>,

    /// Never prompt (non-interactive mode)
    pub yes: bool,
}

impl ScaffoldArgs {
    fn interactive(&self) -> bool {
        !self.yes && std::io::stdin().is_terminal()
    }
}

/// Run the CLI with interactive prompts.
///
/// Errors are already shown to the operator when this returns `Err`; callers
/// only need to set the exit status.
pub async fn run<C: ProductConfig>(config: &C, args: ScaffoldArgs) -> Result<()> {
    let result = scaffold(config, args).await;
    if let Err(e) = &result {
        let _ = cliclack::log::error(format!("{:#}", e));
    }
    result
}

async fn scaffold<C: ProductConfig>(config: &C, args: ScaffoldArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve the project root
    let project_dir = select_directory(&args)?;

    // Step 2: Collect answers (prompts are skipped for anything passed as a flag)
    pipeline::enter(Stage::Interact);
    let answers = collect_answers(&args)?;

    // Step 3: Pick the package manager
    let manager = select_package_manager(config, &args, &project_dir)?;

    // Step 4: Generate files, merge package.json and install
    let scaffolder = Scaffolder::new(&project_dir, CommandInstaller::new(manager));
    let summary = scaffolder.run(&answers).await?;

    // Step 5: Report what happened
    report_summary(&summary)?;

    // Step 6: Show next steps
    print_next_steps(config, &project_dir, manager)?;

    Ok(())
}

fn select_directory(args: &ScaffoldArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;

    let path = match &args.destination {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) if dir.as_os_str().is_empty() || dir == Path::new(".") => current_dir,
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    cliclack::log::info(format!("Using directory: {}", path.display()))?;
    Ok(path)
}

fn collect_answers(args: &ScaffoldArgs) -> Result<Answers> {
    let interactive = args.interactive();

    let plugins = match &args.plugins {
        Some(plugins) => plugins.clone(),
        None if interactive => {
            let mut plugins: Vec<String> = prompt_assertion_library()?
                .map(|name| vec![name.to_string()])
                .unwrap_or_default();
            plugins.extend(prompt_additional_plugins()?.into_iter().map(str::to_string));
            plugins
        }
        None => vec![DEFAULT_ASSERTION.to_string()],
    };

    let reporters = match &args.reporters {
        Some(reporters) => reporters.clone(),
        None if interactive => prompt_reporters()?
            .into_iter()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    let project_type = match &args.project_type {
        Some(project_type) => Some(project_type.clone()),
        None if interactive => Some(prompt_project_type()?.id().to_string()),
        None => None,
    };

    let create_sample_tests = match args.sample_test {
        Some(value) => value,
        None if interactive => prompt_sample_test_file()?,
        None => true,
    };

    Ok(Answers {
        selections: RawSelections {
            plugins,
            reporters,
            project_type,
        },
        create_sample_tests,
    })
}

fn hint(choice: &PluginChoice) -> &'static str {
    choice.hint.unwrap_or("")
}

/// The assertion library is optional
fn prompt_assertion_library() -> Result<Option<&'static str>> {
    let mut select = cliclack::select("Select the assertion library");
    for choice in registry::assertion_choices() {
        select = select.item(Some(choice.name), choice.name, hint(choice));
    }
    select = select.item(None, "None", "(Use node:assert)");

    Ok(select.interact()?)
}

fn prompt_additional_plugins() -> Result<Vec<&'static str>> {
    let mut multi = cliclack::multiselect("Select additional plugins");
    for choice in registry::additional_choices() {
        multi = multi.item(choice.name, choice.name, hint(choice));
    }

    Ok(multi.required(false).interact()?)
}

fn prompt_reporters() -> Result<Vec<&'static str>> {
    let mut multi = cliclack::multiselect("Select the reporters to use");
    for choice in registry::reporter_choices() {
        multi = multi.item(choice.name, choice.name, hint(choice));
    }

    Ok(multi
        .initial_values(vec![registry::DEFAULT_REPORTER])
        .required(true)
        .interact()?)
}

fn prompt_project_type() -> Result<ProjectType> {
    let mut select = cliclack::select("Select the project type");
    for project_type in ProjectType::ALL {
        select = select.item(project_type, project_type.display_name(), "");
    }

    Ok(select.interact()?)
}

fn prompt_sample_test_file() -> Result<bool> {
    Ok(cliclack::confirm("Want us to create a sample test?")
        .initial_value(true)
        .interact()?)
}

fn select_package_manager<C: ProductConfig>(
    config: &C,
    args: &ScaffoldArgs,
    project_dir: &Path,
) -> Result<PackageManager> {
    let manager = PackageManager::resolve(
        args.package_manager.as_deref(),
        config.package_manager_env(),
        project_dir,
    )?;

    let spinner = cliclack::spinner();
    spinner.start("Checking package manager...");

    let info = check_package_manager(manager);
    if info.available {
        spinner.stop(format!(
            "Package manager: {} ({})",
            info.name,
            info.version.as_deref().unwrap_or("unknown")
        ));
    } else {
        spinner.stop(format!("Package manager: {} (not installed)", info.name));
        cliclack::log::warning(format!(
            "{} was not found on PATH, installing dependencies will likely fail",
            info.name
        ))?;
    }

    Ok(manager)
}

fn report_file(report: &FileReport) -> Result<()> {
    match report.outcome {
        WriteOutcome::Created => cliclack::log::success(format!("create {}", report.path))?,
        WriteOutcome::Skipped => {
            cliclack::log::info(format!("create {} (File already exists)", report.path))?
        }
    }
    Ok(())
}

fn report_summary(summary: &ScaffoldSummary) -> Result<()> {
    for report in &summary.files {
        report_file(report)?;
    }

    match summary.plan.manifest {
        ManifestAction::Created => cliclack::log::success(format!("create {}", MANIFEST_FILE))?,
        ManifestAction::Updated => cliclack::log::success(format!("update {}", MANIFEST_FILE))?,
    }

    match &summary.install {
        InstallOutcome::Installed => cliclack::log::success("Installed dependencies")?,
        InstallOutcome::Failed(reason) => cliclack::log::warning(format!(
            "Failed to install dependencies: {}\nInstall them manually: {}",
            reason,
            summary.plan.install_args().join(" ")
        ))?,
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    manager: PackageManager,
) -> Result<()> {
    let steps = config.next_steps(project_dir, manager);

    println!();
    println!("  {}", config.completion_heading());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}
