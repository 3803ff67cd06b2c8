//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        for (kind, ops) in &p.endpoints {
            let _ = writeln!(out);
            let _ = writeln!(out, "[profiles.{name}.endpoints.{kind}]");
            for (op, path) in ops {
                let _ = writeln!(out, "{op} = \"{path}\"");
            }
        }
    }

    out.trim_end().to_owned()
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask where the password comes from. Returns `(password, password_env)`.
fn prompt_password_source() -> Result<(Option<String>, Option<String>), CliError> {
    let choices = &[
        "Read from an environment variable (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where does the password come from?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        let env: String = Input::new()
            .with_prompt("Environment variable")
            .default(tetres_config::PASSWORD_ENV.into())
            .interact_text()
            .map_err(prompt_err)?;
        Ok((None, Some(env)))
    } else {
        let pass = Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_err)?;
        Ok((Some(pass), None))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("TeTRES admin -- configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let server: String = Input::new()
                .with_prompt("Server URL")
                .default("http://localhost:5000".into())
                .interact_text()
                .map_err(prompt_err)?;
            if server.parse::<url::Url>().is_err() {
                return Err(CliError::Validation {
                    field: "server".into(),
                    reason: format!("invalid URL: {server}"),
                });
            }

            let username: String = Input::new()
                .with_prompt("Username (empty for none)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let (password, password_env) = if username.is_empty() {
                (None, None)
            } else {
                prompt_password_source()?
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    server,
                    username: Some(username).filter(|u| !u.is_empty()),
                    password,
                    password_env,
                    ..Profile::default()
                },
            );
            if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            config::save_config(&cfg)?;

            eprintln!("\n   Profile '{profile_name}' saved to {}", config_path.display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            let lines: Vec<String> = cfg
                .profiles
                .iter()
                .map(|(name, p)| {
                    let marker = if *name == active { "*" } else { " " };
                    format!("{marker} {name}  {}", p.server)
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::print_status(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }
    }
}
