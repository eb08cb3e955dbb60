//! Command handlers for `swaggerdoc-ctl`.
//!
//! Each module handles one subcommand; shared target resolution and
//! generator/verifier construction live here.

pub(crate) mod check;
pub(crate) mod generate;
pub(crate) mod verify;

pub(crate) use check::handle_check_command;
pub(crate) use generate::handle_generate_command;
pub(crate) use verify::handle_verify_command;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use swaggerdoc_sdk::{
    load_table, CanonicalFormatter, DocumentationRecord, Generator, GofmtFormatter,
    SourceFormatter, SwaggerDocRenderer, Verifier,
};

use crate::cli_config::{CliConfig, FormatterKind};
use crate::TargetArgs;

pub(crate) type CliVerifier = Verifier<SwaggerDocRenderer, Box<dyn SourceFormatter>>;

/// One package to generate, verify, or check.
#[derive(Debug)]
pub(crate) struct Target {
    pub package: String,
    pub records: Vec<DocumentationRecord>,
    pub artifact_path: PathBuf,
}

/// Loaded configuration plus command-line overrides.
#[derive(Debug)]
pub(crate) struct Context {
    config: CliConfig,
    formatter: FormatterKind,
}

impl Context {
    pub(crate) fn new(config: CliConfig, formatter_override: Option<FormatterKind>) -> Self {
        let formatter = formatter_override.unwrap_or(config.formatter);
        Self { config, formatter }
    }

    pub(crate) fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Whether missing docs are fatal for this run.
    pub(crate) fn enforce_comments(&self, flag: bool) -> bool {
        flag || self.config.enforce_comments
    }

    pub(crate) fn verifier(&self) -> CliVerifier {
        let formatter: Box<dyn SourceFormatter> = match self.formatter {
            FormatterKind::Builtin => Box::new(CanonicalFormatter),
            FormatterKind::Gofmt => Box::new(
                self.config
                    .gofmt_path
                    .as_deref()
                    .map(GofmtFormatter::new)
                    .unwrap_or_default(),
            ),
        };
        tracing::debug!(formatter = ?self.formatter, "Using source formatter");

        Verifier::new(
            Generator::new(
                self.config.boilerplate.clone(),
                SwaggerDocRenderer,
                formatter,
            ),
            self.config.policy(),
        )
    }

    /// Resolve the packages a command operates on.
    ///
    /// With `--records`, exactly one target built from the flags. Otherwise
    /// every configured package, optionally narrowed by `--package`.
    pub(crate) fn resolve_targets(
        &self,
        args: &TargetArgs,
        artifact: Option<&Path>,
    ) -> anyhow::Result<Vec<Target>> {
        if let Some(records) = &args.records {
            let target = self.load_target(records, args.package.as_deref(), artifact)?;
            return Ok(vec![target]);
        }

        if artifact.is_some() {
            bail!("an explicit output file requires --records");
        }
        if self.config.packages.is_empty() {
            bail!("nothing to do: pass --records or list [[packages]] in .swaggerdoc.toml");
        }

        let mut targets = Vec::with_capacity(self.config.packages.len());
        for package in &self.config.packages {
            // Packages named in config are skipped without loading their
            // table; unnamed ones take the name from the table itself.
            if let (Some(wanted), Some(name)) = (&args.package, &package.name) {
                if wanted != name {
                    continue;
                }
            }
            let table_path = self.config.resolve(&package.records);
            let output = package.output.as_deref().map(|o| self.config.resolve(o));
            targets.push(self.load_target(&table_path, package.name.as_deref(), output.as_deref())?);
        }

        if let Some(name) = &args.package {
            targets.retain(|t| &t.package == name);
            if targets.is_empty() {
                bail!("no configured package named '{name}'");
            }
        }

        Ok(targets)
    }

    fn load_target(
        &self,
        table_path: &Path,
        package: Option<&str>,
        artifact: Option<&Path>,
    ) -> anyhow::Result<Target> {
        let table = load_table(table_path).with_context(|| {
            format!(
                "failed to load documentation table '{}'",
                table_path.display()
            )
        })?;

        let package = package
            .map(str::to_string)
            .or(table.package)
            .with_context(|| {
                format!(
                    "no package name for '{}': pass --package or set `package` in the table",
                    table_path.display()
                )
            })?;

        let artifact_path = match artifact {
            Some(path) => path.to_path_buf(),
            None => table_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(&self.config.boilerplate.output_file_name),
        };

        tracing::debug!(
            package = %package,
            table = %table_path.display(),
            artifact = %artifact_path.display(),
            types = table.types.len(),
            "Resolved target"
        );

        Ok(Target {
            package,
            records: table.types,
            artifact_path,
        })
    }
}
