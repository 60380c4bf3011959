//! Sequential scaffolding pipeline
//!
//! `Prepare -> Interact -> Resolve -> Compose -> WriteArtifacts -> MergeManifest
//! -> InstallPackages -> Done`. Only `Resolve` can move to `Failed` before
//! anything is written. An install failure is recorded in the summary and the run still
//! completes, so generated files stay in place.

use crate::compose::{compose, Composition};
use crate::error::Result;
use crate::install::PackageInstaller;
use crate::output::{merge_or_create, ArtifactWriter, FileReport, InstallPlan};
use crate::render::Renderer;
use crate::resolve::{resolve, RawSelections};
use std::fmt;
use std::path::PathBuf;

/// Pipeline stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Prepare,
    Interact,
    Resolve,
    Compose,
    WriteArtifacts,
    MergeManifest,
    InstallPackages,
    Done,
    /// Terminal; reached when selections or the project type are invalid
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prepare => "prepare",
            Stage::Interact => "interact",
            Stage::Resolve => "resolve",
            Stage::Compose => "compose",
            Stage::WriteArtifacts => "write-artifacts",
            Stage::MergeManifest => "merge-manifest",
            Stage::InstallPackages => "install-packages",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

pub(crate) fn enter(stage: Stage) {
    tracing::debug!(%stage, "entering stage");
}

/// Everything collected from the operator or flags
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub selections: RawSelections,
    pub create_sample_tests: bool,
}

/// How dependency installation went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// Reported as a warning; the run still succeeds
    Failed(String),
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct ScaffoldSummary {
    pub composition: Composition,
    pub files: Vec<FileReport>,
    pub plan: InstallPlan,
    pub install: InstallOutcome,
}

/// Drives one scaffolding run against a destination directory
pub struct Scaffolder<I> {
    root: PathBuf,
    installer: I,
    renderer: Renderer,
}

impl<I: PackageInstaller> Scaffolder<I> {
    pub fn new(root: impl Into<PathBuf>, installer: I) -> Self {
        enter(Stage::Prepare);
        Self {
            root: root.into(),
            installer,
            renderer: Renderer::new(),
        }
    }

    /// Run every stage after `Interact`
    pub async fn run(&self, answers: &Answers) -> Result<ScaffoldSummary> {
        enter(Stage::Resolve);
        let resolved = resolve(&answers.selections).inspect_err(|e| {
            enter(Stage::Failed);
            tracing::debug!(error = %e, "selections rejected");
        })?;

        enter(Stage::Compose);
        let composition = compose(&resolved);

        enter(Stage::WriteArtifacts);
        let files = self
            .write_artifacts(&composition, answers.create_sample_tests)
            .await?;

        enter(Stage::MergeManifest);
        let plan = merge_or_create(
            &self.root,
            composition.project_type,
            &composition.packages,
        )
        .await?;

        enter(Stage::InstallPackages);
        let install = match self.installer.install(&plan.install_args(), &self.root).await {
            Ok(()) => InstallOutcome::Installed,
            Err(e) => {
                tracing::warn!(error = %e, "package installation failed");
                InstallOutcome::Failed(e.to_string())
            }
        };

        enter(Stage::Done);
        Ok(ScaffoldSummary {
            composition,
            files,
            plan,
            install,
        })
    }

    async fn write_artifacts(
        &self,
        composition: &Composition,
        create_sample_tests: bool,
    ) -> Result<Vec<FileReport>> {
        let writer = ArtifactWriter::new(&self.root);
        let mut files = Vec::new();

        let bootstrap = self.renderer.bootstrap(composition)?;
        files.push(
            writer
                .write_report(&composition.bootstrap_path, &bootstrap)
                .await?,
        );

        if create_sample_tests {
            for sample in &composition.sample_files {
                let content = self.renderer.sample(composition, sample)?;
                files.push(writer.write_report(&sample.path, &content).await?);
            }
        }

        Ok(files)
    }
}
