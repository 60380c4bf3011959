//! Static registry of the plugins and reporters the scaffolder knows about
//!
//! Every record's `name` is the public identifier accepted by `--plugins` and
//! `--reporters`. The import and parameter fields end up verbatim in generated
//! files, so editing a record changes generated output.

/// Which group a registry record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Mutually exclusive assertion library (zero or one may be picked)
    Assertion,
    /// Optional plugin (zero or many)
    Additional,
    /// Optional plugin that switches the config to a suites layout
    Browser,
    /// Test reporter shipped with the runner
    Reporter,
}

/// The fixture and call used in the generated sample test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAssertion {
    /// Destructured test context, e.g. `{ assert }`
    pub fixture: &'static str,
    /// Call expression placed in the test body
    pub call: &'static str,
}

/// A capability descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginChoice {
    pub name: &'static str,
    pub hint: Option<&'static str>,
    pub named_import: &'static str,
    pub import_path: &'static str,
    /// Literal argument list passed to the initializer call
    pub parameters: Option<&'static str>,
    pub packages: &'static [&'static str],
    pub category: Category,
    /// Only set for assertion libraries
    pub sample_assertion: Option<SampleAssertion>,
}

impl PluginChoice {
    pub fn import_statement(&self) -> String {
        format!("import {{ {} }} from '{}'", self.named_import, self.import_path)
    }

    pub fn initializer(&self) -> String {
        format!("{}({})", self.named_import, self.parameters.unwrap_or(""))
    }

    pub fn is_additional(&self) -> bool {
        matches!(self.category, Category::Additional | Category::Browser)
    }
}

/// Name of the plugin that turns on browser suites
pub const BROWSER_PLUGIN: &str = "@japa/browser-client";

/// Reporter the runner activates when nothing is configured
pub const DEFAULT_REPORTER: &str = "spec-reporter";

/// Import path shared by every built-in reporter
pub const REPORTERS_IMPORT_PATH: &str = "@japa/runner/reporters";

/// Package that provides `configure`, `processCLIArgs` and `run`
pub const RUNNER_PACKAGE: &str = "@japa/runner";

const fn reporter(name: &'static str, hint: &'static str, named_import: &'static str) -> PluginChoice {
    PluginChoice {
        name,
        hint: Some(hint),
        named_import,
        import_path: REPORTERS_IMPORT_PATH,
        parameters: None,
        packages: &[],
        category: Category::Reporter,
        sample_assertion: None,
    }
}

/// Every known record, in prompt order within each category
pub static PLUGINS: &[PluginChoice] = &[
    PluginChoice {
        name: "@japa/assert",
        hint: Some("(Chai.js assert)"),
        named_import: "assert",
        import_path: "@japa/assert",
        parameters: None,
        packages: &["@japa/assert"],
        category: Category::Assertion,
        sample_assertion: Some(SampleAssertion {
            fixture: "{ assert }",
            call: "assert.equal(1 + 1, 2)",
        }),
    },
    PluginChoice {
        name: "@japa/expect",
        hint: Some("(Jest expect)"),
        named_import: "expect",
        import_path: "@japa/expect",
        parameters: None,
        packages: &["@japa/expect"],
        category: Category::Assertion,
        sample_assertion: Some(SampleAssertion {
            fixture: "{ expect }",
            call: "expect(1 + 1).toBe(2)",
        }),
    },
    PluginChoice {
        name: "@japa/api-client",
        hint: Some("(Test API endpoints over HTTP)"),
        named_import: "apiClient",
        import_path: "@japa/api-client",
        parameters: Some("'http://localhost:3333'"),
        packages: &["@japa/api-client"],
        category: Category::Additional,
        sample_assertion: None,
    },
    PluginChoice {
        name: "@japa/file-system",
        hint: Some("(Test file system)"),
        named_import: "fileSystem",
        import_path: "@japa/file-system",
        parameters: None,
        packages: &["@japa/file-system"],
        category: Category::Additional,
        sample_assertion: None,
    },
    PluginChoice {
        name: "@japa/expect-type",
        hint: Some("(Typescript types testing)"),
        named_import: "expectTypeOf",
        import_path: "@japa/expect-type",
        parameters: None,
        packages: &["@japa/expect-type"],
        category: Category::Additional,
        sample_assertion: None,
    },
    PluginChoice {
        name: "@japa/snapshot",
        hint: Some("(Snapshot testing)"),
        named_import: "snapshot",
        import_path: "@japa/snapshot",
        parameters: None,
        packages: &["@japa/snapshot"],
        category: Category::Additional,
        sample_assertion: None,
    },
    PluginChoice {
        name: BROWSER_PLUGIN,
        hint: Some("(Browser testing)"),
        named_import: "browserClient",
        import_path: "@japa/browser-client",
        parameters: Some("{ runInSuites: ['browser'] }"),
        packages: &["playwright", "@japa/browser-client"],
        category: Category::Browser,
        sample_assertion: None,
    },
    reporter(DEFAULT_REPORTER, "(Human readable, default)", "spec"),
    reporter("dot-reporter", "(Minimal dots)", "dot"),
    reporter("ndjson-reporter", "(Newline delimited JSON)", "ndjson"),
    reporter("github-reporter", "(GitHub Actions annotations)", "github"),
];

/// Find a record by its public name
pub fn lookup(name: &str) -> Option<&'static PluginChoice> {
    PLUGINS.iter().find(|plugin| plugin.name == name)
}

pub fn assertion_choices() -> Vec<&'static PluginChoice> {
    PLUGINS
        .iter()
        .filter(|plugin| plugin.category == Category::Assertion)
        .collect()
}

pub fn additional_choices() -> Vec<&'static PluginChoice> {
    PLUGINS.iter().filter(|plugin| plugin.is_additional()).collect()
}

pub fn reporter_choices() -> Vec<&'static PluginChoice> {
    PLUGINS
        .iter()
        .filter(|plugin| plugin.category == Category::Reporter)
        .collect()
}

pub fn is_browser_capability(name: &str) -> bool {
    lookup(name).is_some_and(|plugin| plugin.category == Category::Browser)
}
