//! `verify`: fail when checked-in swagger doc files are out of date.

use std::path::Path;

use anyhow::bail;
use swaggerdoc_sdk::SwaggerDocsError;

use super::Context;
use crate::output;
use crate::TargetArgs;

pub(crate) fn handle_verify_command(
    ctx: &Context,
    args: &TargetArgs,
    file: Option<&Path>,
    enforce_flag: bool,
) -> anyhow::Result<()> {
    let targets = ctx.resolve_targets(args, file)?;
    let enforce = ctx.enforce_comments(enforce_flag);
    let verifier = ctx.verifier();

    let mut failures = 0;
    for target in &targets {
        match verifier.verify(
            &target.package,
            &target.artifact_path,
            &target.records,
            enforce,
        ) {
            // Tolerated missing docs are already logged by the verifier.
            Ok(_) => {
                output::success(format!(
                    "{}: {} is up to date",
                    target.package,
                    target.artifact_path.display()
                ));
            }
            Err(e) => {
                failures += 1;
                output::error(format!("{}: {e}", target.package));
                match e {
                    SwaggerDocsError::Stale { .. } | SwaggerDocsError::Read { .. } => {
                        output::hint("  Run `swaggerdoc-ctl generate` to regenerate the file.");
                    }
                    SwaggerDocsError::MissingDocs { .. } => {
                        output::hint("  Document the listed fields or add them to `exempt`.");
                    }
                    _ => {}
                }
            }
        }
    }

    if failures > 0 {
        bail!(
            "{failures} of {} package(s) failed swagger docs verification",
            targets.len()
        );
    }
    Ok(())
}
