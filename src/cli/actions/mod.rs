pub mod genres;
pub mod login;
pub mod register;

use crate::{features::forms::SubmissionResult, routes::Navigate};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
        callback_url: Option<String>,
        google: bool,
    },
    Register {
        email: String,
        password: SecretString,
        confirm_password: SecretString,
        name: String,
        strict_password: bool,
        google: bool,
    },
    Genres {
        catalog: PathBuf,
        select: Option<String>,
    },
}

/// Terminal stand-in for page navigation: prints the destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct Console;

impl Navigate for Console {
    fn navigate(&self, path: &str) {
        println!("-> {path}");
    }
}

/// Prints the notice of a finished attempt; failures become the command's error.
pub(crate) fn report(result: &SubmissionResult) -> Result<()> {
    match result.notice() {
        Some(notice) if result.is_success() => {
            println!("{notice}");
            Ok(())
        }
        Some(notice) => Err(anyhow!("{notice}")),
        None if result.is_success() => Ok(()),
        None => Err(anyhow!("a submission is already in progress")),
    }
}
