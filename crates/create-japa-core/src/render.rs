//! Handlebars rendering of the bootstrap file and sample tests

use crate::compose::{Composition, SampleFile, SampleKind, TestLayout, UnitSample};
use crate::error::{Result, ScaffoldError};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{json, Value};

const BOOTSTRAP_TEMPLATE: &str = include_str!("../templates/bootstrap.hbs");
const UNIT_SAMPLE_TEMPLATE: &str = include_str!("../templates/unit-sample.hbs");
const BROWSER_SAMPLE_TEMPLATE: &str = include_str!("../templates/browser-sample.hbs");

/// Quote and join values as a JS array body: `'a', 'b'`
fn quoted_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Template bindings for `bin/test.<ext>`
pub fn bootstrap_bindings(composition: &Composition) -> Value {
    let (files_glob, suites) = match &composition.layout {
        TestLayout::Files(glob) => (Value::String(glob.clone()), Value::Null),
        TestLayout::Suites(suites) => (
            Value::Null,
            suites
                .iter()
                .map(|suite| json!({ "name": suite.name, "files": quoted_list(&suite.files) }))
                .collect(),
        ),
    };

    let reporters = composition
        .reporters
        .as_ref()
        .map(|r| {
            json!({
                "import": r.import,
                "activated": quoted_list(&r.activated),
                "list": r.list.join(", "),
            })
        })
        .unwrap_or(Value::Null);

    json!({
        "imports": composition.imports,
        "initializers": composition.initializers,
        "plugins_inline": composition.inline_plugins,
        "plugins_line": composition.plugins_line(),
        "files_glob": files_glob,
        "suites": suites,
        "reporters": reporters,
    })
}

fn unit_sample_bindings(sample: &UnitSample) -> Value {
    json!({
        "preamble": sample.preamble,
        "fixture": sample.fixture,
        "call": sample.call,
    })
}

/// Renders generated source files. Output is plain JS/TS, so HTML escaping is off.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    fn render<T: Serialize>(&self, name: &'static str, template: &str, data: &T) -> Result<String> {
        self.registry
            .render_template(template, data)
            .map_err(|source| ScaffoldError::Render {
                template: name,
                source: Box::new(source),
            })
    }

    pub fn bootstrap(&self, composition: &Composition) -> Result<String> {
        self.render(
            "bootstrap",
            BOOTSTRAP_TEMPLATE,
            &bootstrap_bindings(composition),
        )
    }

    pub fn unit_sample(&self, sample: &UnitSample) -> Result<String> {
        self.render(
            "unit sample",
            UNIT_SAMPLE_TEMPLATE,
            &unit_sample_bindings(sample),
        )
    }

    pub fn browser_sample(&self) -> Result<String> {
        self.render("browser sample", BROWSER_SAMPLE_TEMPLATE, &json!({}))
    }

    /// Render whichever sample a planned file stands for
    pub fn sample(&self, composition: &Composition, file: &SampleFile) -> Result<String> {
        match file.kind {
            SampleKind::Unit => self.unit_sample(&composition.unit_sample),
            SampleKind::Browser => self.browser_sample(),
        }
    }
}
