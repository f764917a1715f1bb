use crate::{
    app_lib::ApiClient,
    cli::{
        actions::{report, Action, Console},
        globals::GlobalArgs,
    },
    features::auth::NextAuthClient,
    routes::{LoginField, LoginForm, LoginQuery},
};
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use tracing::debug;

/// Handle the login action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login {
        email,
        password,
        callback_url,
        google,
    } = action
    else {
        return Err(anyhow!("login handler called with {action:?}"));
    };

    let config = globals.config(false);
    let catalog = globals.catalog()?;
    let provider = NextAuthClient::new(ApiClient::new(&config)?);
    debug!(base_url = %config.base_url, "signing in");

    let mut form = LoginForm::new(
        &config.locale,
        LoginQuery {
            callback_url,
            error: None,
        },
    );

    let result = if google {
        form.sign_in_with_google(&provider, &Console, &catalog).await
    } else {
        form.update_field(LoginField::Email, email);
        form.update_field(LoginField::Password, password.expose_secret());
        let result = form.submit(&provider, &Console, &catalog).await;
        for field in [LoginField::Email, LoginField::Password] {
            if let Some(message) = form.form().error_message(field, &catalog) {
                eprintln!("{field:?}: {message}");
            }
        }
        result
    };

    report(&result)
}
