//! Valve command handler.

use watergate_api::LocalClient;
use watergate_api::models::ValveState;

use crate::cli::{GlobalOpts, ValveArgs};
use crate::error::CliError;

pub async fn handle(
    client: &LocalClient,
    args: &ValveArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let state = ValveState::from(args.action);
    tracing::info!(%state, "requesting valve change");
    client.set_valve_state(state).await?;
    if !global.quiet {
        eprintln!("Valve change to '{state}' requested");
    }
    Ok(())
}
