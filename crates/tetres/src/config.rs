//! CLI-side configuration: profile selection and global flag overrides on
//! top of the shared `tetres-config` crate.

use std::time::Duration;

use tetres_api::TlsMode;
use tetres_core::{ClientConfig, TransportConfig};

pub use tetres_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Determine the active profile name from flags, config, or fallback.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut client = match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            tetres_config::profile_to_client_config(profile, &profile_name, &cfg.defaults)?
        }
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
            });
        }
        None => {
            let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            ClientConfig::new(parse_server(server)?).with_transport(TransportConfig {
                timeout: Duration::from_secs(cfg.defaults.timeout),
                ..TransportConfig::default()
            })
        }
    };

    if let Some(ref server) = global.server {
        client.base_url = parse_server(server)?;
    }
    if global.insecure {
        client.transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.transport.timeout = Duration::from_secs(secs);
    }
    Ok(client)
}

fn parse_server(server: &str) -> Result<url::Url, CliError> {
    server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })
}
