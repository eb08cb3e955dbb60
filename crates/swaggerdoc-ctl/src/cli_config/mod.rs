//! CLI configuration: completeness policy, formatter choice, boilerplate
//! overrides, and the list of packages handled by a bare `generate`/`verify`.

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use swaggerdoc_sdk::{Boilerplate, CompletenessPolicy, Exemptions};

/// Which [`SourceFormatter`](swaggerdoc_sdk::SourceFormatter) to run.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FormatterKind {
    /// Built-in canonical formatter (no Go toolchain required).
    #[default]
    Builtin,
    /// External `gofmt` binary.
    Gofmt,
}

/// A package whose swagger docs are managed from configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct PackageConfig {
    /// Go package name. Falls back to the table's `package` field.
    pub name: Option<String>,

    /// Path to the documentation table.
    pub records: String,

    /// Path of the generated file. Default: next to the table, using the
    /// boilerplate's output file name.
    pub output: Option<String>,
}

/// Contents of `.swaggerdoc.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Fail verification when fields are undocumented.
    #[serde(default)]
    pub enforce_comments: bool,

    /// Treat empty type-level descriptions as missing.
    #[serde(default)]
    pub require_type_docs: bool,

    /// Exemption patterns (`Type.field`, `Type.*`, `*.field`, `Type`).
    #[serde(default)]
    pub exempt: Vec<String>,

    #[serde(default)]
    pub formatter: FormatterKind,

    /// Path to `gofmt` when `formatter = "gofmt"`. Default: `gofmt` on PATH.
    pub gofmt_path: Option<String>,

    #[serde(default)]
    pub boilerplate: Boilerplate,

    #[serde(default)]
    pub packages: Vec<PackageConfig>,

    /// Directory relative paths are resolved against (the config file's).
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl CliConfig {
    pub(crate) fn policy(&self) -> CompletenessPolicy {
        CompletenessPolicy {
            require_type_docs: self.require_type_docs,
            exemptions: Exemptions::new(self.exempt.iter().cloned()),
        }
    }

    /// Resolve a configured path: `~/` expands to the home directory and
    /// relative paths are anchored at the config file's directory.
    pub(crate) fn resolve(&self, path: &str) -> PathBuf {
        let expanded = loader::expand_path(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        }
    }

    pub(crate) fn with_base_dir(mut self, base_dir: &Path) -> Self {
        self.base_dir = base_dir.to_path_buf();
        self
    }
}
