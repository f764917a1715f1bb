use crate::app_lib::{built_info, GIT_COMMIT_HASH};
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};
use std::path::PathBuf;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email address")
        .env("AUTHFLOW_EMAIL")
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('P')
        .long("password")
        .help("Account password")
        .env("AUTHFLOW_PASSWORD")
        .hide_env_values(true)
}

fn google_arg() -> Arg {
    Arg::new("google")
        .long("google")
        .help("Continue with Google instead of the form")
        .action(ArgAction::SetTrue)
}

fn login_command() -> Command {
    Command::new("login")
        .about("Sign in with email and password")
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new("callback-url")
                .long("callback-url")
                .help("Page to land on after signing in (default: /<locale>/)"),
        )
        .arg(google_arg())
}

fn register_command() -> Command {
    Command::new("register")
        .about("Create an account")
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new("confirm-password")
                .long("confirm-password")
                .help("Password confirmation (default: same as --password)")
                .env("AUTHFLOW_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(Arg::new("name").short('n').long("name").help("Display name"))
        .arg(
            Arg::new("strict-password")
                .long("strict-password")
                .help("Require uppercase, digit and symbol in the password")
                .action(ArgAction::SetTrue),
        )
        .arg(google_arg())
}

fn genres_command() -> Command {
    Command::new("genres")
        .about("List genres from a catalog and optionally pick one")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .help("Genre catalog JSON file")
                .env("AUTHFLOW_GENRES")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("select")
                .short('s')
                .long("select")
                .help("Genre value to select"),
        )
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("authflow")
        .about("Login and registration flows")
        .long_about(format!(
            "Login and registration flows\n\nbuild: {GIT_COMMIT_HASH} ({})",
            built_info::TARGET
        ))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(login_command())
        .subcommand(register_command())
        .subcommand(genres_command())
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .help("Identity provider base URL (default: http://localhost:3000, env: AUTHFLOW_BASE_URL)")
                .global(true),
        )
        .arg(
            Arg::new("locale")
                .short('l')
                .long("locale")
                .help("Locale used for page paths (default: en, env: AUTHFLOW_LOCALE)")
                .global(true),
        )
        .arg(
            Arg::new("messages")
                .short('m')
                .long("messages")
                .help("JSON message catalog overriding the bundled English messages")
                .env("AUTHFLOW_MESSAGES")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("AUTHFLOW_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
