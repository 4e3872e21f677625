//! Webhook command handlers: point the device at a receiver, or decode an
//! event body captured from one.

use std::path::Path;

use serde_json::Value;
use tokio::io::AsyncReadExt;
use watergate_api::{LocalClient, WebhookEvent};

use crate::cli::{GlobalOpts, WebhookArgs, WebhookCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &LocalClient,
    args: WebhookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WebhookCommand::Set { url } => {
            client.set_webhook_url(&url).await?;
            if !global.quiet {
                eprintln!("Webhook URL set to {url}");
            }
            Ok(())
        }
        WebhookCommand::Parse { file } => parse(file.as_deref(), global).await,
    }
}

/// Decode one event envelope from `file`, or stdin when absent.
pub async fn parse(file: Option<&Path>, global: &GlobalOpts) -> Result<(), CliError> {
    let body = match file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let event = WebhookEvent::from_json(&body)?;
    tracing::debug!(event_type = event.event_type(), "decoded webhook event");
    let out = output::render_single(global.output, &event, event_detail);
    output::print_output(&out, global.quiet);
    Ok(())
}

/// The event type followed by each payload field.
fn event_detail(event: &WebhookEvent) -> String {
    let value = serde_json::to_value(event).unwrap_or(Value::Null);
    let fields: Vec<(&str, String)> = value
        .get("data")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .map(|(key, val)| (key.as_str(), field_text(val)))
        .collect();

    let mut rows = vec![("Type", event.event_type().to_owned())];
    rows.extend(fields);
    output::detail_table(rows)
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
