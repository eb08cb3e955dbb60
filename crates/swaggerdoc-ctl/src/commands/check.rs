//! `check`: list undocumented types and fields without touching any file.

use anyhow::bail;
use swaggerdoc_sdk::completeness;

use super::Context;
use crate::output;
use crate::TargetArgs;

pub(crate) fn handle_check_command(
    ctx: &Context,
    args: &TargetArgs,
    enforce_flag: bool,
) -> anyhow::Result<()> {
    let targets = ctx.resolve_targets(args, None)?;
    let policy = ctx.config().policy();

    let mut total = 0;
    for target in &targets {
        let report = completeness::check(&policy, &target.records);
        if report.is_complete() {
            output::success(format!(
                "{}: all {} types documented",
                target.package,
                target.records.len()
            ));
            continue;
        }

        total += report.count();
        output::header(format!(
            "{}: {} undocumented entries",
            target.package,
            report.count()
        ));
        for missing in &report.missing {
            output::item(missing);
        }
    }

    if total == 0 {
        return Ok(());
    }
    if ctx.enforce_comments(enforce_flag) {
        bail!("missing swagger docs for {total} entries");
    }
    output::warning(format!(
        "{total} undocumented entries tolerated (pass --enforce-comments to fail)"
    ));
    Ok(())
}
