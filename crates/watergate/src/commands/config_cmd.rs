//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config(&path)?;
            output::print_output(toml::to_string_pretty(&cfg)?.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetDevice {
            url,
            name,
            profile_timeout,
            make_default,
        } => {
            if url.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "url".into(),
                    reason: "device URL cannot be empty".into(),
                });
            }

            let mut cfg = config::load_config(&path)?;
            cfg.profiles.insert(
                name.clone(),
                Profile {
                    device: url.trim().to_owned(),
                    timeout: profile_timeout,
                },
            );
            if make_default {
                cfg.default_profile = Some(name.clone());
            }
            config::save_config(&cfg, &path)?;

            if !global.quiet {
                eprintln!("Profile '{name}' saved to {}", path.display());
            }
            Ok(())
        }
    }
}
