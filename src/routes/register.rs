//! Registration flow: four validators run on every change (email format,
//! password strength, confirmation match, name presence), one JSON POST per
//! submit, redirect to the localized login page on any 2xx. The name field
//! only reports "required" after it was blurred or the form was submitted.

use super::{home_path, login::follow_redirect, login_path, Navigate};
use crate::{
    app_lib::{AppError, Translate},
    features::{
        auth::{Provider, RegisterRequest, RegistrationEndpoint, SignIn, SignInParams},
        forms::{
            submission::PreflightKeys,
            validation::{
                validate_confirmation, validate_email, validate_password, validate_required,
            },
            FailureReason, FieldError, FieldSet, Form, FormSchema, PasswordPolicy,
            PasswordStrength, StrengthMeter, SubmissionResult,
        },
    },
};
use secrecy::SecretString;
use tracing::{info, instrument, warn};

pub const REGISTER_PREFLIGHT: PreflightKeys = PreflightKeys {
    title: "inputErrorTitle",
    invalid_fields: "fixFormErrors",
    missing_required: "missingRequiredFields",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationField {
    Email,
    Password,
    ConfirmPassword,
    Name,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RegistrationSchema {
    pub policy: PasswordPolicy,
}

impl FormSchema for RegistrationSchema {
    type Field = RegistrationField;
    const FIELDS: &'static [RegistrationField] = &[
        RegistrationField::Email,
        RegistrationField::Password,
        RegistrationField::ConfirmPassword,
        RegistrationField::Name,
    ];

    fn is_required(&self, _field: RegistrationField) -> bool {
        true
    }

    fn validate(
        &self,
        field: RegistrationField,
        values: &FieldSet<RegistrationField>,
        shown: bool,
    ) -> Option<FieldError> {
        let password = values.value(RegistrationField::Password);
        match field {
            RegistrationField::Email => validate_email(values.value(RegistrationField::Email)),
            RegistrationField::Password => validate_password(password, self.policy).error,
            RegistrationField::ConfirmPassword => {
                validate_confirmation(password, values.value(RegistrationField::ConfirmPassword))
            }
            RegistrationField::Name => {
                validate_required(values.value(RegistrationField::Name), shown)
            }
        }
    }

    fn message_key(&self, error: FieldError) -> &'static str {
        match error {
            FieldError::InvalidEmail => "invalidEmailFormat",
            FieldError::PasswordTooShort => "passwordTooShort",
            FieldError::PasswordTooWeak => match self.policy {
                PasswordPolicy::AnyClass => "passwordTooWeak",
                PasswordPolicy::AllClasses => "passwordTooWeakStrict",
            },
            FieldError::PasswordMismatch => "passwordMismatch",
            FieldError::Required => "nameRequired",
        }
    }
}

#[derive(Clone, Debug)]
pub struct RegistrationForm {
    form: Form<RegistrationSchema>,
    locale: String,
}

impl RegistrationForm {
    pub fn new(locale: &str, policy: PasswordPolicy) -> Self {
        Self {
            form: Form::new(RegistrationSchema { policy }),
            locale: locale.to_string(),
        }
    }

    pub fn form(&self) -> &Form<RegistrationSchema> {
        &self.form
    }

    pub fn update_field(&mut self, field: RegistrationField, value: impl Into<String>) {
        self.form.update_field(field, value);
    }

    pub fn touch(&mut self, field: RegistrationField) {
        self.form.touch(field);
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn is_busy(&self) -> bool {
        self.form.is_submitting()
    }

    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::of(self.form.value(RegistrationField::Password))
    }

    /// Meter under the password field; `None` while the password is empty.
    pub fn meter(&self) -> Option<StrengthMeter> {
        StrengthMeter::for_password(self.form.value(RegistrationField::Password))
    }

    /// Validates, posts the registration and navigates to the login page on
    /// success. Server-reported reasons are passed through verbatim.
    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        endpoint: &impl RegistrationEndpoint,
        navigator: &impl Navigate,
        t: &impl Translate,
    ) -> SubmissionResult {
        if let Err(rejection) = self.form.begin_submit() {
            return SubmissionResult::rejected(rejection, REGISTER_PREFLIGHT, t);
        }

        let request = RegisterRequest {
            email: self.form.value(RegistrationField::Email).to_string(),
            password: SecretString::from(self.form.value(RegistrationField::Password).to_string()),
            confirm_password: SecretString::from(
                self.form.value(RegistrationField::ConfirmPassword).to_string(),
            ),
            name: self.form.value(RegistrationField::Name).to_string(),
        };
        let pending = self.form.pending();
        let result = interpret_registration(endpoint.register(&request).await, t);

        pending.finish(result.is_success());
        if result.is_success() {
            info!("registered");
            navigator.navigate(&login_path(&self.locale));
        }
        result
    }

    /// Starts "sign up with Google"; the provider returns to the localized home.
    #[instrument(skip_all)]
    pub async fn sign_up_with_google(
        &mut self,
        provider: &impl SignIn,
        navigator: &impl Navigate,
        t: &impl Translate,
    ) -> SubmissionResult {
        if let Err(rejection) = self.form.begin_redirect() {
            return SubmissionResult::rejected(rejection, REGISTER_PREFLIGHT, t);
        }
        let params = SignInParams {
            credentials: None,
            callback_url: home_path(&self.locale),
        };
        let pending = self.form.pending();
        let result = follow_redirect(provider.sign_in(Provider::Google, params).await, navigator);
        pending.finish(result.is_ok());
        match result {
            Ok(()) => SubmissionResult::redirected(),
            Err(reason) => SubmissionResult::failure(
                reason,
                t.t("registerFailedTitle"),
                t.t("registerFailedDefaultDesc"),
            ),
        }
    }
}

fn interpret_registration(response: Result<(), AppError>, t: &impl Translate) -> SubmissionResult {
    match response {
        Ok(()) => {
            SubmissionResult::success(t.t("registerSuccessTitle"), t.t("registerSuccessDesc"))
        }
        Err(err @ AppError::Http { .. }) => {
            warn!(%err, "registration rejected");
            SubmissionResult::failure(
                FailureReason::ServerRejected,
                t.t("registerFailedTitle"),
                err.server_message()
                    .map_or_else(|| t.t("registerFailedDefaultDesc"), str::to_string),
            )
        }
        Err(err) => {
            warn!(%err, "registration call failed");
            SubmissionResult::failure(
                FailureReason::Transport,
                t.t("registerFailedTitle"),
                t.t("registerFailedDefaultDesc"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistrationField, RegistrationForm};
    use crate::{
        app_lib::{AppError, Catalog, KeyEcho},
        features::{
            auth::{RegisterRequest, RegistrationEndpoint},
            forms::{FailureReason, FieldError, FormState, PasswordPolicy, StrengthTone},
        },
        routes::NavigationLog,
    };
    use secrecy::ExposeSecret;
    use std::sync::Mutex;

    struct FakeEndpoint {
        answer: Result<(), AppError>,
        received: Mutex<Vec<(String, String, String, String)>>,
    }

    impl FakeEndpoint {
        fn answering(answer: Result<(), AppError>) -> Self {
            Self {
                answer,
                received: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.received
                .lock()
                .map(|received| received.len())
                .unwrap_or_default()
        }
    }

    impl RegistrationEndpoint for FakeEndpoint {
        async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
            if let Ok(mut received) = self.received.lock() {
                received.push((
                    request.email.clone(),
                    request.password.expose_secret().to_string(),
                    request.confirm_password.expose_secret().to_string(),
                    request.name.clone(),
                ));
            }
            self.answer.clone()
        }
    }

    fn filled() -> RegistrationForm {
        let mut form = RegistrationForm::new("en", PasswordPolicy::default());
        form.update_field(RegistrationField::Email, "a@b.com");
        form.update_field(RegistrationField::Password, "Abcdefg1!");
        form.update_field(RegistrationField::ConfirmPassword, "Abcdefg1!");
        form.update_field(RegistrationField::Name, "X");
        form
    }

    #[test]
    fn complete_form_can_submit() {
        let form = filled();
        assert!(form.can_submit());
        assert_eq!(form.strength().score, 4);
    }

    #[test]
    fn confirmation_tracks_password_changes() {
        let mut form = filled();
        form.update_field(RegistrationField::Password, "Abcdefg1?");
        assert_eq!(
            form.form().error(RegistrationField::ConfirmPassword),
            Some(FieldError::PasswordMismatch)
        );
        form.update_field(RegistrationField::Password, "Abcdefg1!");
        assert_eq!(form.form().error(RegistrationField::ConfirmPassword), None);
    }

    #[test]
    fn name_required_only_after_blur() {
        let mut form = RegistrationForm::new("en", PasswordPolicy::default());
        assert_eq!(form.form().error(RegistrationField::Name), None);
        form.touch(RegistrationField::Name);
        assert_eq!(
            form.form().error(RegistrationField::Name),
            Some(FieldError::Required)
        );
        assert_eq!(
            form.form().error_message(RegistrationField::Name, &KeyEcho),
            Some("nameRequired".to_string())
        );
    }

    #[test]
    fn empty_required_field_blocks_even_when_others_valid() {
        let mut form = filled();
        form.update_field(RegistrationField::Name, "");
        assert!(!form.can_submit());
    }

    #[test]
    fn meter_follows_password() {
        let mut form = RegistrationForm::new("en", PasswordPolicy::default());
        assert_eq!(form.meter(), None);
        form.update_field(RegistrationField::Password, "abcdefgh");
        assert_eq!(form.meter().map(|meter| meter.tone), Some(StrengthTone::Red));
        assert_eq!(
            form.form().error(RegistrationField::Password),
            Some(FieldError::PasswordTooWeak)
        );
    }

    #[test]
    fn strict_policy_uses_strict_message() {
        let mut form = RegistrationForm::new("en", PasswordPolicy::AllClasses);
        form.update_field(RegistrationField::Password, "abcdefg1");
        assert_eq!(
            form.form().error_message(RegistrationField::Password, &KeyEcho),
            Some("passwordTooWeakStrict".to_string())
        );
    }

    #[tokio::test]
    async fn success_navigates_to_login() {
        let endpoint = FakeEndpoint::answering(Ok(()));
        let navigator = NavigationLog::default();
        let mut form = filled();

        let result = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert!(result.is_success());
        assert_eq!(result.title, "registerSuccessTitle");
        assert_eq!(navigator.visited(), vec!["/en/auth/login"]);
        assert_eq!(form.form().state(), FormState::Succeeded);
        let received = endpoint
            .received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default();
        assert_eq!(
            received,
            vec![(
                "a@b.com".to_string(),
                "Abcdefg1!".to_string(),
                "Abcdefg1!".to_string(),
                "X".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn server_message_is_passed_through() {
        let endpoint = FakeEndpoint::answering(Err(AppError::Http {
            status: 409,
            message: Some("このメールアドレスは既に登録されています".to_string()),
        }));
        let navigator = NavigationLog::default();
        let mut form = filled();

        let result = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::ServerRejected));
        assert_eq!(result.title, "registerFailedTitle");
        assert_eq!(result.message, "このメールアドレスは既に登録されています");
        assert!(navigator.visited().is_empty());
        assert_eq!(form.form().value(RegistrationField::Email), "a@b.com");
        assert_eq!(form.form().state(), FormState::Failed);
    }

    #[tokio::test]
    async fn missing_server_message_uses_default() {
        let endpoint = FakeEndpoint::answering(Err(AppError::Http {
            status: 500,
            message: None,
        }));
        let navigator = NavigationLog::default();
        let mut form = filled();

        let result = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(result.message, "registerFailedDefaultDesc");
    }

    #[tokio::test]
    async fn transport_failure_uses_translated_default() {
        let endpoint = FakeEndpoint::answering(Err(AppError::Network(
            "Unable to reach the server".to_string(),
        )));
        let navigator = NavigationLog::default();
        let catalog = Catalog::from_json(
            r#"{"registerFailedTitle":"登録失敗","registerFailedDefaultDesc":"登録に失敗しました"}"#,
        )
        .unwrap_or_default();
        let mut form = filled();

        let result = form.submit(&endpoint, &navigator, &catalog).await;

        assert_eq!(result.reason(), Some(FailureReason::Transport));
        assert_eq!(result.title, "登録失敗");
        assert_eq!(result.message, "登録に失敗しました");
    }

    #[tokio::test]
    async fn bad_email_blocks_without_network_call() {
        let endpoint = FakeEndpoint::answering(Ok(()));
        let navigator = NavigationLog::default();
        let mut form = filled();
        form.update_field(RegistrationField::Email, "bad-email");
        assert!(!form.can_submit());

        let result = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::InvalidFields));
        assert_eq!(result.message, "fixFormErrors");
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test]
    async fn first_submit_with_empty_name_reports_missing_fields() {
        let endpoint = FakeEndpoint::answering(Ok(()));
        let navigator = NavigationLog::default();
        let mut form = filled();
        form.update_field(RegistrationField::Name, "");

        let result = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::MissingRequired));
        assert_eq!(result.message, "missingRequiredFields");
        assert_eq!(
            form.form().error(RegistrationField::Name),
            Some(FieldError::Required)
        );

        let again = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(again.reason(), Some(FailureReason::InvalidFields));
        assert_eq!(again.message, "fixFormErrors");
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test]
    async fn blurred_empty_name_reports_form_errors() {
        let endpoint = FakeEndpoint::answering(Ok(()));
        let navigator = NavigationLog::default();
        let mut form = filled();
        form.update_field(RegistrationField::Name, "");
        form.touch(RegistrationField::Name);

        let first = form.submit(&endpoint, &navigator, &KeyEcho).await;
        let second = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(first.message, "fixFormErrors");
        assert_eq!(second.message, "fixFormErrors");
        assert_eq!(first.title, "inputErrorTitle");
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test]
    async fn long_server_message_is_not_shortened() {
        let message = format!(" {} ", "Registration is closed for this domain. ".repeat(8));
        let endpoint = FakeEndpoint::answering(Err(AppError::Http {
            status: 403,
            message: Some(message.clone()),
        }));
        let navigator = NavigationLog::default();
        let mut form = filled();

        let result = form.submit(&endpoint, &navigator, &KeyEcho).await;

        assert_eq!(result.message, message);
    }
}
