//! CLI-owned configuration: TOML device profiles and their resolution
//! into a connection target for `watergate_api::LocalClient`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when --profile is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Device base URL (e.g., "http://192.168.1.20").
    pub device: String,

    /// Override timeout.
    pub timeout: Option<u64>,
}

/// Where and how to reach the device for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTarget {
    pub url: String,
    pub timeout: Duration,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path: `--config` / `WATERGATE_CONFIG`, then
/// the platform config directory.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.config {
        return path.clone();
    }
    ProjectDirs::from("ai", "watergate", "watergate").map_or_else(
        || PathBuf::from(".watergate").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WATERGATE_").split("__"));

    Ok(figment.extract()?)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Device resolution ────────────────────────────────────────────────

/// Resolve the device URL and timeout from flags and config.
///
/// Precedence: `--device` over the profile, `--timeout` over the
/// profile's timeout over `[defaults]`. Naming a profile explicitly that
/// does not exist is an error even when `--device` is given.
pub fn resolve_device(
    global: &GlobalOpts,
    cfg: &Config,
    path: &Path,
) -> Result<DeviceTarget, CliError> {
    let profile = match global.profile {
        Some(ref name) => Some(cfg.profiles.get(name).ok_or_else(|| {
            let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            CliError::ProfileNotFound {
                name: name.clone(),
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            }
        })?),
        None => cfg
            .default_profile
            .as_ref()
            .and_then(|name| cfg.profiles.get(name)),
    };

    let url = global
        .device
        .as_deref()
        .or_else(|| profile.map(|p| p.device.as_str()))
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| CliError::NoDevice {
            path: path.display().to_string(),
        })?;

    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);
    if timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(DeviceTarget {
        url: with_scheme(url.trim()),
        timeout: Duration::from_secs(timeout),
    })
}

/// Bare hosts like `192.168.1.20` are reached over plain HTTP.
fn with_scheme(url: &str) -> String {
    if url.contains("://") {
        url.to_owned()
    } else {
        format!("http://{url}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            device: None,
            config: None,
            output: OutputFormat::Table,
            timeout: None,
            verbose: 0,
            quiet: false,
        }
    }

    fn config_with(profiles: &[(&str, &str, Option<u64>)]) -> Config {
        let mut cfg = Config::default();
        for (name, device, timeout) in profiles {
            cfg.profiles.insert(
                (*name).to_owned(),
                Profile {
                    device: (*device).to_owned(),
                    timeout: *timeout,
                },
            );
        }
        cfg
    }

    #[test]
    fn default_profile_is_used() {
        let cfg = config_with(&[("default", "http://10.0.0.5", None)]);
        let target = resolve_device(&global(), &cfg, Path::new("c.toml")).unwrap();
        assert_eq!(target.url, "http://10.0.0.5");
        assert_eq!(target.timeout, Duration::from_secs(10));
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with(&[("default", "http://10.0.0.5", Some(20))]);
        let mut opts = global();
        opts.device = Some("10.0.0.9".into());
        opts.timeout = Some(3);

        let target = resolve_device(&opts, &cfg, Path::new("c.toml")).unwrap();
        assert_eq!(target.url, "http://10.0.0.9");
        assert_eq!(target.timeout, Duration::from_secs(3));
    }

    #[test]
    fn profile_timeout_beats_defaults() {
        let cfg = config_with(&[("garage", "http://10.0.0.7", Some(25))]);
        let mut opts = global();
        opts.profile = Some("garage".into());

        let target = resolve_device(&opts, &cfg, Path::new("c.toml")).unwrap();
        assert_eq!(target.timeout, Duration::from_secs(25));
    }

    #[test]
    fn missing_named_profile_lists_available() {
        let cfg = config_with(&[("b", "http://b", None), ("a", "http://a", None)]);
        let mut opts = global();
        opts.profile = Some("c".into());

        match resolve_device(&opts, &cfg, Path::new("c.toml")) {
            Err(CliError::ProfileNotFound { name, available }) => {
                assert_eq!(name, "c");
                assert_eq!(available, "a, b");
            }
            other => panic!("expected ProfileNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn no_device_anywhere() {
        let result = resolve_device(&global(), &Config::default(), Path::new("c.toml"));
        assert!(matches!(result, Err(CliError::NoDevice { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut opts = global();
        opts.device = Some("http://10.0.0.5".into());
        opts.timeout = Some(0);
        let result = resolve_device(&opts, &Config::default(), Path::new("c.toml"));
        assert!(matches!(result, Err(CliError::Validation { .. })));
    }

    #[test]
    fn save_then_load_round_trips_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = config_with(&[("kitchen", "http://10.0.0.8", Some(4))]);
        save_config(&cfg, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        let profile = loaded.profiles.get("kitchen").unwrap();
        assert_eq!(profile.device, "http://10.0.0.8");
        assert_eq!(profile.timeout, Some(4));
        assert_eq!(loaded.defaults.timeout, 10);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }
}
