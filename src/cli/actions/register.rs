use crate::{
    app_lib::{ApiClient, Translate},
    cli::{
        actions::{report, Action, Console},
        globals::GlobalArgs,
    },
    features::{
        auth::{HttpRegistration, NextAuthClient},
        forms::PasswordPolicy,
    },
    routes::{RegistrationField, RegistrationForm},
};
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;

const FIELDS: [RegistrationField; 4] = [
    RegistrationField::Email,
    RegistrationField::Password,
    RegistrationField::ConfirmPassword,
    RegistrationField::Name,
];

/// Handle the register action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Register {
        email,
        password,
        confirm_password,
        name,
        strict_password,
        google,
    } = action
    else {
        return Err(anyhow!("register handler called with {action:?}"));
    };

    let config = globals.config(strict_password);
    let catalog = globals.catalog()?;
    let api = ApiClient::new(&config)?;
    let policy = if config.strict_password {
        PasswordPolicy::AllClasses
    } else {
        PasswordPolicy::AnyClass
    };
    let mut form = RegistrationForm::new(&config.locale, policy);

    if google {
        let provider = NextAuthClient::new(api);
        let result = form.sign_up_with_google(&provider, &Console, &catalog).await;
        return report(&result);
    }

    form.update_field(RegistrationField::Email, email);
    form.update_field(RegistrationField::Password, password.expose_secret());
    form.update_field(
        RegistrationField::ConfirmPassword,
        confirm_password.expose_secret(),
    );
    form.update_field(RegistrationField::Name, name);

    if let Some(meter) = form.meter() {
        println!(
            "{}: {} ({}%)",
            catalog.t("passwordStrengthLabel"),
            catalog.t(meter.label_key),
            meter.percent
        );
    }

    let result = form
        .submit(&HttpRegistration::new(api), &Console, &catalog)
        .await;
    for field in FIELDS {
        if let Some(message) = form.form().error_message(field, &catalog) {
            eprintln!("{field:?}: {message}");
        }
    }

    report(&result)
}
