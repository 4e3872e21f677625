//! Command dispatch: bridges CLI args -> `LocalClient` calls -> output.

pub mod auto_shut_off;
pub mod config_cmd;
pub mod device;
pub mod valve;
pub mod webhook;

use watergate_api::LocalClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &LocalClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::State(args) => device::state(client, &args, global).await,
        Command::Networking => device::networking(client, global).await,
        Command::Telemetry => device::telemetry(client, global).await,
        Command::AutoShutOff(args) => auto_shut_off::handle(client, args, global).await,
        Command::Webhook(args) => webhook::handle(client, args, global).await,
        Command::Valve(args) => valve::handle(client, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
