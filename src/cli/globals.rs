use crate::app_lib::{AppConfig, AppError, Catalog, RuntimeConfig};
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub base_url: Option<String>,
    pub locale: Option<String>,
    pub messages: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(matches: &clap::ArgMatches) -> Self {
        Self {
            base_url: matches.get_one::<String>("base-url").cloned(),
            locale: matches.get_one::<String>("locale").cloned(),
            messages: matches.get_one::<PathBuf>("messages").cloned(),
        }
    }

    /// Environment config with the command-line flags applied on top.
    #[must_use]
    pub fn config(&self, strict_password: bool) -> AppConfig {
        AppConfig::load_with(RuntimeConfig::from_flags(
            self.base_url.as_deref(),
            self.locale.as_deref(),
            strict_password,
        ))
    }

    /// Bundled messages, overridden key by key by the `--messages` file.
    ///
    /// # Errors
    /// Returns an error if the override file cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        let embedded = Catalog::embedded();
        match &self.messages {
            Some(path) => Ok(embedded.merged(Catalog::from_file(path)?)),
            None => Ok(embedded),
        }
    }
}
