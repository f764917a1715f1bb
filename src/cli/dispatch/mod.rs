use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

fn string_arg(matches: &clap::ArgMatches, name: &str) -> String {
    matches
        .get_one::<String>(name)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    // Closure to return subcommand matches
    let sub_m = |subcommand| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    match matches.subcommand_name() {
        Some("login") => {
            let m = sub_m("login")?;
            Ok(Action::Login {
                email: string_arg(m, "email"),
                password: SecretString::from(string_arg(m, "password")),
                callback_url: m.get_one::<String>("callback-url").map(|s| s.to_string()),
                google: m.get_flag("google"),
            })
        }
        Some("register") => {
            let m = sub_m("register")?;
            let password = string_arg(m, "password");
            let confirm_password = m
                .get_one::<String>("confirm-password")
                .map_or_else(|| password.clone(), |s| s.to_string());
            Ok(Action::Register {
                email: string_arg(m, "email"),
                password: SecretString::from(password),
                confirm_password: SecretString::from(confirm_password),
                name: string_arg(m, "name"),
                strict_password: m.get_flag("strict-password"),
                google: m.get_flag("google"),
            })
        }
        Some("genres") => {
            let m = sub_m("genres")?;
            Ok(Action::Genres {
                catalog: m
                    .get_one::<PathBuf>("catalog")
                    .cloned()
                    .ok_or_else(|| anyhow!("missing required argument: --catalog"))?,
                select: m.get_one::<String>("select").map(|s| s.to_string()),
            })
        }
        _ => Err(anyhow!("unknown subcommand")),
    }
}
