//! Turns resolved selections into the bindings consumed by the renderer
//!
//! Composition is pure: no filesystem, no clock, no prompts. The same
//! [`Resolved`] value always produces the same [`Composition`].

use crate::registry::{self, PluginChoice, SampleAssertion};
use crate::resolve::{ProjectType, Resolved};

/// Widest `plugins: [...]` line kept on a single line
const MAX_INLINE_WIDTH: usize = 80;

/// Toolchain installed alongside a freshly created package.json
pub const TOOLCHAIN_PACKAGES: &[&str] = &["typescript", "ts-node"];

/// A named partition of the test file search space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    pub name: &'static str,
    pub files: Vec<String>,
}

/// Where the runner looks for tests. The two shapes never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestLayout {
    Files(String),
    Suites(Vec<Suite>),
}

/// Reporter block, only present when the runner default is not enough
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportersConfig {
    pub import: String,
    pub activated: Vec<&'static str>,
    pub list: Vec<String>,
}

/// How the unit sample test asserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSample {
    /// Extra import placed after the runner import
    pub preamble: Option<&'static str>,
    pub fixture: &'static str,
    pub call: &'static str,
}

const NODE_ASSERT_SAMPLE: UnitSample = UnitSample {
    preamble: Some("import assert from 'node:assert'"),
    fixture: "",
    call: "assert.strictEqual(1 + 1, 2)",
};

impl From<SampleAssertion> for UnitSample {
    fn from(sample: SampleAssertion) -> Self {
        Self {
            preamble: None,
            fixture: sample.fixture,
            call: sample.call,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Unit,
    Browser,
}

/// A sample file the scaffolder offers to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub path: String,
    pub kind: SampleKind,
}

/// Everything rendering and installation need to know
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub project_type: ProjectType,
    /// Plugin imports, index-aligned with `initializers`
    pub imports: Vec<String>,
    pub initializers: Vec<String>,
    pub has_browser_plugin: bool,
    pub layout: TestLayout,
    pub reporters: Option<ReportersConfig>,
    /// Whether `plugins: [...]` fits on one line
    pub inline_plugins: bool,
    pub bootstrap_path: String,
    pub unit_sample: UnitSample,
    pub sample_files: Vec<SampleFile>,
    /// Packages required by the selection, without dist-tags
    pub packages: Vec<&'static str>,
}

impl Composition {
    pub fn should_add_reporters_config(&self) -> bool {
        self.reporters.is_some()
    }

    pub fn plugins_line(&self) -> String {
        self.initializers.join(", ")
    }
}

fn push_plugin(imports: &mut Vec<String>, initializers: &mut Vec<String>, plugin: &PluginChoice) {
    imports.push(plugin.import_statement());
    initializers.push(plugin.initializer());
}

fn layout_for(ext: &str, has_browser_plugin: bool) -> TestLayout {
    if !has_browser_plugin {
        return TestLayout::Files(format!("tests/**/*.spec.{}", ext));
    }

    TestLayout::Suites(vec![
        Suite {
            name: "default",
            files: vec![
                format!("tests/**/*.spec.{}", ext),
                format!("!tests/browser/**/*.spec.{}", ext),
            ],
        },
        Suite {
            name: "browser",
            files: vec![format!("tests/browser/**/*.spec.{}", ext)],
        },
    ])
}

/// Omitted when only the default reporter is selected
fn reporters_config(reporters: &[&'static PluginChoice]) -> Option<ReportersConfig> {
    let only_default = matches!(reporters, [single] if single.name == registry::DEFAULT_REPORTER);
    if reporters.is_empty() || only_default {
        return None;
    }

    let named: Vec<&str> = reporters.iter().map(|r| r.named_import).collect();
    let activated = reporters
        .iter()
        .find(|r| r.name == registry::DEFAULT_REPORTER)
        .unwrap_or(&reporters[0])
        .named_import;

    Some(ReportersConfig {
        import: format!(
            "import {{ {} }} from '{}'",
            named.join(", "),
            registry::REPORTERS_IMPORT_PATH
        ),
        activated: vec![activated],
        list: reporters.iter().map(|r| r.initializer()).collect(),
    })
}

fn sample_files(ext: &str, has_browser_plugin: bool) -> Vec<SampleFile> {
    if has_browser_plugin {
        vec![
            SampleFile {
                path: format!("tests/unit/maths.spec.{}", ext),
                kind: SampleKind::Unit,
            },
            SampleFile {
                path: format!("tests/browser/browser.spec.{}", ext),
                kind: SampleKind::Browser,
            },
        ]
    } else {
        vec![SampleFile {
            path: format!("tests/maths.spec.{}", ext),
            kind: SampleKind::Unit,
        }]
    }
}

/// Build the composition for a resolved selection
pub fn compose(resolved: &Resolved) -> Composition {
    let ext = resolved.project_type.extension();
    let mut imports = Vec::new();
    let mut initializers = Vec::new();
    let mut packages = vec![registry::RUNNER_PACKAGE];

    // Assertion library always comes first
    if let Some(assertion) = resolved.assertion {
        push_plugin(&mut imports, &mut initializers, assertion);
        packages.extend(assertion.packages.iter().copied());
    }

    for plugin in &resolved.plugins {
        push_plugin(&mut imports, &mut initializers, plugin);
        packages.extend(plugin.packages.iter().copied());
    }

    let inline_width = "  plugins: [".len() + initializers.join(", ").len() + "],".len();

    let unit_sample = resolved
        .assertion
        .and_then(|a| a.sample_assertion)
        .map(UnitSample::from)
        .unwrap_or(NODE_ASSERT_SAMPLE);

    tracing::debug!(
        imports = imports.len(),
        browser = resolved.has_browser_plugin,
        "composed bootstrap"
    );

    Composition {
        project_type: resolved.project_type,
        imports,
        initializers,
        has_browser_plugin: resolved.has_browser_plugin,
        layout: layout_for(ext, resolved.has_browser_plugin),
        reporters: reporters_config(&resolved.reporters),
        inline_plugins: inline_width <= MAX_INLINE_WIDTH,
        bootstrap_path: format!("bin/test.{}", ext),
        unit_sample,
        sample_files: sample_files(ext, resolved.has_browser_plugin),
        packages,
    }
}
