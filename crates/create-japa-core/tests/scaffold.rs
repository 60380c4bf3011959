use create_japa_core::error::Result;
use create_japa_core::{
    Answers, InstallOutcome, ManifestAction, PackageInstaller, RawSelections, ScaffoldError,
    Scaffolder, WriteOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Records install calls instead of running a package manager
#[derive(Default)]
struct RecordingInstaller {
    calls: Mutex<Vec<(Vec<String>, PathBuf)>>,
    fail: bool,
}

impl RecordingInstaller {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(Vec<String>, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PackageInstaller for RecordingInstaller {
    async fn install(&self, packages: &[String], root: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((packages.to_vec(), root.to_path_buf()));
        if self.fail {
            return Err(ScaffoldError::PackageManager("exited with code 1".to_string()));
        }
        Ok(())
    }
}

fn answers(plugins: &[&str], project_type: &str, sample: bool) -> Answers {
    Answers {
        selections: RawSelections {
            plugins: plugins.iter().map(|s| s.to_string()).collect(),
            reporters: Vec::new(),
            project_type: Some(project_type.to_string()),
        },
        create_sample_tests: sample,
    }
}

fn read(dir: &TempDir, path: &str) -> String {
    std::fs::read_to_string(dir.path().join(path)).unwrap()
}

fn read_json(dir: &TempDir, path: &str) -> Value {
    serde_json::from_str(&read(dir, path)).unwrap()
}

#[tokio::test]
async fn adds_assertion_library_import_and_plugin() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());

    scaffolder
        .run(&answers(&["@japa/assert"], "typescript", false))
        .await
        .unwrap();

    let content = read(&dir, "bin/test.ts");
    assert!(content.contains("import { assert } from '@japa/assert'"));
    assert!(content.contains("plugins: [assert()],"));
    assert!(!content.contains("reporters: {"));
    assert!(!dir.path().join("tests").exists());
}

#[tokio::test]
async fn outputs_javascript_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());

    let summary = scaffolder
        .run(&answers(&["@japa/assert"], "javascript", false))
        .await
        .unwrap();

    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].path, "bin/test.js");
    assert!(read(&dir, "bin/test.js").contains("files: ['tests/**/*.spec.js'],"));
    assert_eq!(read_json(&dir, "package.json")["scripts"]["test"], "node bin/test.js");
}

#[tokio::test]
async fn uses_suites_and_two_samples_with_browser_client() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());

    let summary = scaffolder
        .run(&answers(&["@japa/assert", "@japa/browser-client"], "typescript", true))
        .await
        .unwrap();

    let content = read(&dir, "bin/test.ts");
    assert!(content.contains("suites: ["));
    assert!(!content.contains("  files: ['tests/**/*.spec.ts'],\n"));

    let created: Vec<_> = summary.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        created,
        vec![
            "bin/test.ts",
            "tests/unit/maths.spec.ts",
            "tests/browser/browser.spec.ts",
        ]
    );
    assert!(read(&dir, "tests/unit/maths.spec.ts").contains("assert.equal(1 + 1, 2)"));
    assert!(!dir.path().join("tests/maths.spec.ts").exists());
}

#[tokio::test]
async fn sample_uses_selected_assertion_library() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());

    scaffolder
        .run(&answers(&["@japa/expect"], "typescript", true))
        .await
        .unwrap();

    assert!(read(&dir, "tests/maths.spec.ts").contains("expect(1 + 1).toBe(2)"));
}

#[tokio::test]
async fn does_not_overwrite_existing_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("bin")).unwrap();
    std::fs::write(dir.path().join("bin/test.ts"), "").unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());

    let summary = scaffolder
        .run(&answers(&["@japa/assert"], "typescript", true))
        .await
        .unwrap();

    assert_eq!(read(&dir, "bin/test.ts"), "");
    assert_eq!(summary.files[0].outcome, WriteOutcome::Skipped);
    assert_eq!(summary.files[1].outcome, WriteOutcome::Created);
}

#[tokio::test]
async fn running_twice_is_idempotent_for_generated_files() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());
    let input = answers(&["@japa/assert", "@japa/file-system"], "typescript", true);

    scaffolder.run(&input).await.unwrap();
    let first = read(&dir, "bin/test.ts");
    let second_run = scaffolder.run(&input).await.unwrap();

    assert_eq!(read(&dir, "bin/test.ts"), first);
    assert!(second_run
        .files
        .iter()
        .all(|f| f.outcome == WriteOutcome::Skipped));
    assert_eq!(second_run.plan.manifest, ManifestAction::Updated);
}

#[tokio::test]
async fn creates_package_json_and_installs_toolchain() {
    let dir = tempfile::tempdir().unwrap();
    let installer = RecordingInstaller::default();
    let scaffolder = Scaffolder::new(dir.path(), installer);

    let summary = scaffolder
        .run(&answers(&["@japa/assert"], "typescript", true))
        .await
        .unwrap();

    let pkg = read_json(&dir, "package.json");
    assert_eq!(pkg["type"], "module");
    assert_eq!(
        pkg["scripts"],
        json!({ "test": "node --loader ts-node/esm --enable-source-maps bin/test.ts" })
    );
    assert_eq!(summary.plan.manifest, ManifestAction::Created);
    assert_eq!(summary.install, InstallOutcome::Installed);
    assert_eq!(
        summary.plan.install_args(),
        vec![
            "@japa/runner@next",
            "@japa/assert@next",
            "typescript@latest",
            "ts-node@latest",
        ]
    );
}

#[tokio::test]
async fn merges_existing_package_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        json!({ "name": "foo", "description": "blabla" }).to_string(),
    )
    .unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::default());

    let summary = scaffolder
        .run(&answers(&["@japa/assert"], "typescript", false))
        .await
        .unwrap();

    let pkg = read_json(&dir, "package.json");
    assert_eq!(pkg["name"], "foo");
    assert_eq!(pkg["description"], "blabla");
    assert_eq!(pkg["type"], "module");
    assert_eq!(
        pkg["scripts"],
        json!({ "test": "node --loader ts-node/esm --enable-source-maps bin/test.ts" })
    );
    assert_eq!(
        summary.plan.install_args(),
        vec!["@japa/runner@next", "@japa/assert@next"]
    );
}

#[tokio::test]
async fn installer_receives_plan_and_root() {
    let dir = tempfile::tempdir().unwrap();
    let installer = RecordingInstaller::default();

    Scaffolder::new(dir.path(), &installer)
        .run(&answers(&["@japa/browser-client"], "javascript", false))
        .await
        .unwrap();

    let calls = installer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, dir.path());
    assert_eq!(
        calls[0].0,
        vec![
            "@japa/runner@next",
            "playwright@next",
            "@japa/browser-client@next",
            "typescript@latest",
            "ts-node@latest",
        ]
    );
}

#[tokio::test]
async fn install_failure_still_completes() {
    let dir = tempfile::tempdir().unwrap();
    let scaffolder = Scaffolder::new(dir.path(), RecordingInstaller::failing());

    let summary = scaffolder
        .run(&answers(&["@japa/assert"], "typescript", true))
        .await
        .unwrap();

    assert!(matches!(summary.install, InstallOutcome::Failed(_)));
    assert!(dir.path().join("bin/test.ts").exists());
    assert!(dir.path().join("package.json").exists());
}

#[tokio::test]
async fn invalid_project_type_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let installer = RecordingInstaller::default();
    let scaffolder = Scaffolder::new(dir.path(), &installer);

    let err = scaffolder
        .run(&answers(&["@japa/assert"], "python", true))
        .await
        .unwrap_err();

    assert!(err.is_project_type_error());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(installer.calls().is_empty());
}

#[tokio::test]
async fn malformed_package_json_aborts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), "{ nope").unwrap();
    let installer = RecordingInstaller::default();
    let scaffolder = Scaffolder::new(dir.path(), &installer);

    let err = scaffolder
        .run(&answers(&["@japa/assert"], "typescript", false))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::ManifestParse { .. }));
    assert!(installer.calls().is_empty());
}
