//! Auto shut-off command handlers.

use watergate_api::LocalClient;
use watergate_api::models::{AutoShutOffReport, AutoShutOffState, AutoShutOffUpdate};

use crate::cli::{AutoShutOffArgs, AutoShutOffCommand, AutoShutOffSetArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, opt};

pub async fn handle(
    client: &LocalClient,
    args: AutoShutOffArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AutoShutOffCommand::Show => {
            let state = client.get_auto_shut_off().await?;
            let out = output::render_optional(
                global.output,
                state.as_ref(),
                state_detail,
                "Device returned no data",
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AutoShutOffCommand::Report => {
            let report = client.get_auto_shut_off_report().await?;
            let out = output::render_optional(
                global.output,
                report.as_ref(),
                report_detail,
                "No auto shut-off has been triggered",
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AutoShutOffCommand::Set(set) => {
            let update = build_update(&set)?;
            client.update_auto_shut_off(&update).await?;
            if !global.quiet {
                eprintln!("Auto shut-off updated");
            }
            Ok(())
        }
    }
}

/// Only the flags actually given end up in the PATCH body.
fn build_update(args: &AutoShutOffSetArgs) -> Result<AutoShutOffUpdate, CliError> {
    let update = AutoShutOffUpdate {
        enabled: args.enabled,
        duration_threshold: args.duration,
        volume_threshold: args.volume,
    };
    if update.is_empty() {
        return Err(CliError::Validation {
            field: "auto-shut-off".into(),
            reason: "pass at least one of --enabled, --duration, --volume".into(),
        });
    }
    Ok(update)
}

fn state_detail(s: &AutoShutOffState) -> String {
    output::detail_table(vec![
        ("Enabled", opt(s.enabled)),
        ("Volume threshold (l)", opt(s.volume_threshold)),
        ("Duration threshold (min)", opt(s.duration_threshold)),
    ])
}

fn report_detail(r: &AutoShutOffReport) -> String {
    output::detail_table(vec![
        ("Trigger", opt(r.report_type)),
        ("Volume", opt(r.volume)),
        ("Duration", opt(r.duration)),
        ("Timestamp", opt(r.timestamp)),
    ])
}
