mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use watergate_api::{LocalClient, RetryPolicy, TransportConfig};

use crate::cli::{Cli, Command, WebhookArgs, WebhookCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a device
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "watergate", &mut std::io::stdout());
            Ok(())
        }

        // Decoding a captured event is offline
        Command::Webhook(WebhookArgs {
            command: WebhookCommand::Parse { file },
        }) => commands::webhook::parse(file.as_deref(), &cli.global).await,

        cmd => {
            let client = build_client(&cli.global)?;
            tracing::debug!(command = ?cmd, base = %client.base_url(), "dispatching command");
            client
                .scoped(|c| commands::dispatch(cmd, c, &cli.global))
                .await
        }
    }
}

/// Build a `LocalClient` from the config file, profile, and CLI overrides.
fn build_client(global: &cli::GlobalOpts) -> Result<LocalClient, CliError> {
    let path = config::config_path(global);
    let cfg = config::load_config(&path)?;
    let target = config::resolve_device(global, &cfg, &path)?;

    let transport = TransportConfig::with_timeout(target.timeout);
    Ok(LocalClient::with_config(
        &target.url,
        transport,
        RetryPolicy::default(),
    )?)
}
