//! `generate`: write (or print) swagger doc files.
//!
//! This is the only place files are written. The library produces bytes;
//! the command decides where they go.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context as _};
use swaggerdoc_sdk::completeness;

use super::Context;
use crate::output;
use crate::TargetArgs;

pub(crate) fn handle_generate_command(
    ctx: &Context,
    args: &TargetArgs,
    output_path: Option<&Path>,
    to_stdout: bool,
) -> anyhow::Result<()> {
    let targets = ctx.resolve_targets(args, output_path)?;
    if to_stdout && targets.len() != 1 {
        bail!(
            "--stdout prints a single file but {} packages are selected; pass --records or --package",
            targets.len()
        );
    }

    let verifier = ctx.verifier();

    for target in &targets {
        let report = completeness::check(verifier.policy(), &target.records);
        if !report.is_complete() {
            tracing::warn!(
                package = %target.package,
                "Generating swagger docs with {} undocumented entries:\n{}",
                report.count(),
                report.listing()
            );
        }

        let bytes = verifier
            .generator()
            .generate(&target.package, &target.records)
            .with_context(|| {
                format!(
                    "failed to generate swagger docs for package '{}'",
                    target.package
                )
            })?;

        if to_stdout {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            continue;
        }

        let path = &target.artifact_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory '{}'", parent.display())
            })?;
        }
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write output file '{}'", path.display()))?;

        output::success(format!(
            "{}: swagger docs written to {}",
            target.package,
            path.display()
        ));
    }

    Ok(())
}
