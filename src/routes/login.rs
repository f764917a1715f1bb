//! Login flow: email + password, email format checked as the user types, one
//! sign-in call per submit. On success the host is sent to the callback URL;
//! on failure a single notice explains why, with a dedicated message when the
//! provider says the email is not verified.

use super::{home_path, Navigate};
use crate::{
    app_lib::{AppError, Translate},
    components::{Alert, AlertKind},
    features::{
        auth::{
            Credentials, Provider, SignIn, SignInParams, SignInResponse, CREDENTIALS_SIGNIN_ERROR,
            EMAIL_NOT_VERIFIED_MARKER,
        },
        forms::{
            submission::PreflightKeys, validation::validate_email, FailureReason, FieldError,
            FieldSet, Form, FormSchema, SubmissionResult,
        },
    },
};
use secrecy::SecretString;
use tracing::{info, instrument, warn};

pub const LOGIN_PREFLIGHT: PreflightKeys = PreflightKeys {
    title: "formErrorTitle",
    invalid_fields: "formErrorDesc",
    missing_required: "missingRequiredFields",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LoginSchema;

impl FormSchema for LoginSchema {
    type Field = LoginField;
    const FIELDS: &'static [LoginField] = &[LoginField::Email, LoginField::Password];

    fn is_required(&self, _field: LoginField) -> bool {
        true
    }

    fn validate(
        &self,
        field: LoginField,
        values: &FieldSet<LoginField>,
        _shown: bool,
    ) -> Option<FieldError> {
        match field {
            LoginField::Email => validate_email(values.value(LoginField::Email)),
            LoginField::Password => None,
        }
    }

    fn message_key(&self, error: FieldError) -> &'static str {
        match error {
            FieldError::InvalidEmail => "emailInvalid",
            FieldError::PasswordTooShort => "passwordTooShort",
            FieldError::PasswordTooWeak => "passwordTooWeak",
            FieldError::PasswordMismatch => "passwordMismatch",
            FieldError::Required => "missingRequiredFields",
        }
    }
}

/// Query parameters the login page is opened with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginQuery {
    pub callback_url: Option<String>,
    pub error: Option<String>,
}

impl LoginQuery {
    /// Parses a raw query string such as `callbackUrl=%2Fen%2Fme&error=CredentialsSignin`.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "callbackUrl" => parsed.callback_url = Some(value.to_string()),
                "error" => parsed.error = Some(value.to_string()),
                _ => {}
            }
        }
        parsed
    }
}

#[derive(Clone, Debug)]
pub struct LoginForm {
    form: Form<LoginSchema>,
    callback_url: String,
    error_param: Option<String>,
}

impl LoginForm {
    /// The callback URL defaults to the localized home page.
    pub fn new(locale: &str, query: LoginQuery) -> Self {
        Self {
            form: Form::new(LoginSchema),
            callback_url: query.callback_url.unwrap_or_else(|| home_path(locale)),
            error_param: query.error,
        }
    }

    pub fn form(&self) -> &Form<LoginSchema> {
        &self.form
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn update_field(&mut self, field: LoginField, value: impl Into<String>) {
        self.form.update_field(field, value);
    }

    pub fn touch(&mut self, field: LoginField) {
        self.form.touch(field);
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn is_busy(&self) -> bool {
        self.form.is_submitting()
    }

    /// Banner shown when the provider bounced back to this page with
    /// `error=CredentialsSignin`.
    pub fn banner(&self, t: &impl Translate) -> Option<Alert> {
        (self.error_param.as_deref() == Some(CREDENTIALS_SIGNIN_ERROR)).then(|| Alert {
            kind: AlertKind::Error,
            title: t.t("loginFailedTitle"),
            message: t.t("emailNotVerifiedErrorDesc"),
        })
    }

    /// Validates, signs in with the entered credentials and navigates to the
    /// callback URL on success. Field values survive every failure.
    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        provider: &impl SignIn,
        navigator: &impl Navigate,
        t: &impl Translate,
    ) -> SubmissionResult {
        if let Err(rejection) = self.form.begin_submit() {
            return SubmissionResult::rejected(rejection, LOGIN_PREFLIGHT, t);
        }

        let params = SignInParams {
            credentials: Some(Credentials {
                email: self.form.value(LoginField::Email).to_string(),
                password: SecretString::from(self.form.value(LoginField::Password).to_string()),
            }),
            callback_url: self.callback_url.clone(),
        };
        let pending = self.form.pending();
        let response = provider.sign_in(Provider::Credentials, params).await;
        let result = interpret_sign_in(response, t);

        pending.finish(result.is_success());
        if result.is_success() {
            info!("signed in");
            navigator.navigate(&self.callback_url);
        }
        result
    }

    /// Starts the Google sign-in redirect. The provider answers with the URL to
    /// visit; the host navigates there and the provider brings the user back to
    /// the callback URL.
    #[instrument(skip_all)]
    pub async fn sign_in_with_google(
        &mut self,
        provider: &impl SignIn,
        navigator: &impl Navigate,
        t: &impl Translate,
    ) -> SubmissionResult {
        if let Err(rejection) = self.form.begin_redirect() {
            return SubmissionResult::rejected(rejection, LOGIN_PREFLIGHT, t);
        }
        let params = SignInParams {
            credentials: None,
            callback_url: self.callback_url.clone(),
        };
        let pending = self.form.pending();
        let result = follow_redirect(provider.sign_in(Provider::Google, params).await, navigator);
        pending.finish(result.is_ok());
        match result {
            Ok(()) => SubmissionResult::redirected(),
            Err(reason) => SubmissionResult::failure(
                reason,
                t.t("loginFailedTitle"),
                t.t("loginFailedDesc"),
            ),
        }
    }
}

/// Navigates to the redirect URL of a successful provider answer.
pub(super) fn follow_redirect(
    response: Result<SignInResponse, AppError>,
    navigator: &impl Navigate,
) -> Result<(), FailureReason> {
    match response {
        Ok(SignInResponse {
            error: None,
            url: Some(url),
            ..
        }) => {
            navigator.navigate(&url);
            Ok(())
        }
        Ok(response) => {
            warn!(error = ?response.error, "redirect sign-in refused");
            Err(FailureReason::CredentialsRejected)
        }
        Err(err) => {
            warn!(%err, "redirect sign-in failed");
            Err(FailureReason::Transport)
        }
    }
}

fn interpret_sign_in(
    response: Result<SignInResponse, AppError>,
    t: &impl Translate,
) -> SubmissionResult {
    match response {
        Ok(SignInResponse { error: None, .. }) => {
            SubmissionResult::success(t.t("loginSuccessTitle"), t.t("loginSuccessDesc"))
        }
        Ok(SignInResponse {
            error: Some(error), ..
        }) if error.contains(EMAIL_NOT_VERIFIED_MARKER) => SubmissionResult::failure(
            FailureReason::EmailNotVerified,
            t.t("loginFailedTitle"),
            t.t("emailNotVerifiedErrorDesc"),
        ),
        Ok(SignInResponse {
            error: Some(error), ..
        }) => {
            warn!(%error, "sign-in rejected");
            SubmissionResult::failure(
                FailureReason::CredentialsRejected,
                t.t("loginFailedTitle"),
                t.t("loginFailedDesc"),
            )
        }
        Err(err) => {
            warn!(%err, "sign-in call failed");
            SubmissionResult::failure(
                FailureReason::Transport,
                t.t("loginFailedTitle"),
                t.t("loginFailedDesc"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoginField, LoginForm, LoginQuery};
    use crate::{
        app_lib::{AppError, Catalog, KeyEcho},
        features::{
            auth::{Provider, SignIn, SignInParams, SignInResponse},
            forms::{FailureReason, FieldError, FormState},
        },
        routes::NavigationLog,
    };
    use secrecy::ExposeSecret;
    use std::{sync::Mutex, time::Duration};

    /// Sign-in double returning a canned answer and recording each call.
    struct FakeProvider {
        answer: Result<SignInResponse, AppError>,
        calls: Mutex<Vec<(Provider, Option<(String, String)>, String)>>,
    }

    impl FakeProvider {
        fn answering(answer: Result<SignInResponse, AppError>) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_error(error: Option<&str>) -> Self {
            Self::answering(Ok(SignInResponse {
                error: error.map(str::to_string),
                status: if error.is_some() { 401 } else { 200 },
                ok: error.is_none(),
                url: Some("https://idp.example.com/next".to_string()),
            }))
        }

        fn call_count(&self) -> usize {
            self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
        }
    }

    impl SignIn for FakeProvider {
        async fn sign_in(
            &self,
            provider: Provider,
            params: SignInParams,
        ) -> Result<SignInResponse, AppError> {
            let credentials = params.credentials.map(|credentials| {
                (
                    credentials.email,
                    credentials.password.expose_secret().to_string(),
                )
            });
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((provider, credentials, params.callback_url));
            }
            self.answer.clone()
        }
    }

    /// Sign-in double that never answers.
    struct StalledProvider;

    impl SignIn for StalledProvider {
        async fn sign_in(
            &self,
            _provider: Provider,
            _params: SignInParams,
        ) -> Result<SignInResponse, AppError> {
            std::future::pending().await
        }
    }

    fn filled(locale: &str, query: LoginQuery) -> LoginForm {
        let mut form = LoginForm::new(locale, query);
        form.update_field(LoginField::Email, "a@b.com");
        form.update_field(LoginField::Password, "hunter22");
        form
    }

    #[test]
    fn query_parsing() {
        let query = LoginQuery::parse("?callbackUrl=%2Fen%2Fme&error=CredentialsSignin&x=1");
        assert_eq!(query.callback_url.as_deref(), Some("/en/me"));
        assert_eq!(query.error.as_deref(), Some("CredentialsSignin"));
        assert_eq!(LoginQuery::parse("callbackUrl="), LoginQuery::default());
    }

    #[test]
    fn callback_defaults_to_localized_home() {
        let form = LoginForm::new("ja", LoginQuery::default());
        assert_eq!(form.callback_url(), "/ja/");
    }

    #[test]
    fn email_error_appears_while_typing() {
        let mut form = LoginForm::new("en", LoginQuery::default());
        form.update_field(LoginField::Email, "bad-email");
        assert_eq!(form.form().error(LoginField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(
            form.form().error_message(LoginField::Email, &KeyEcho),
            Some("emailInvalid".to_string())
        );
        form.update_field(LoginField::Email, "");
        assert_eq!(form.form().error(LoginField::Email), None);
    }

    #[test]
    fn banner_only_for_credentials_signin() {
        let bounced = LoginForm::new(
            "en",
            LoginQuery {
                callback_url: None,
                error: Some("CredentialsSignin".to_string()),
            },
        );
        let banner = bounced.banner(&KeyEcho);
        assert_eq!(
            banner.map(|alert| alert.message),
            Some("emailNotVerifiedErrorDesc".to_string())
        );

        let other = LoginForm::new(
            "en",
            LoginQuery {
                callback_url: None,
                error: Some("OAuthSignin".to_string()),
            },
        );
        assert!(other.banner(&KeyEcho).is_none());
    }

    #[tokio::test]
    async fn success_navigates_to_callback() {
        let provider = FakeProvider::with_error(None);
        let navigator = NavigationLog::default();
        let mut form = filled(
            "en",
            LoginQuery {
                callback_url: Some("/en/mypage".to_string()),
                error: None,
            },
        );

        let result = form.submit(&provider, &navigator, &KeyEcho).await;

        assert!(result.is_success());
        assert_eq!(result.title, "loginSuccessTitle");
        assert_eq!(navigator.visited(), vec!["/en/mypage"]);
        assert_eq!(form.form().state(), FormState::Succeeded);
        let calls = provider.calls.lock().map(|calls| calls.clone()).unwrap_or_default();
        assert_eq!(
            calls,
            vec![(
                Provider::Credentials,
                Some(("a@b.com".to_string(), "hunter22".to_string())),
                "/en/mypage".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn unverified_email_gets_specific_message() {
        let provider = FakeProvider::with_error(Some("EmailNotVerified: please verify"));
        let navigator = NavigationLog::default();
        let mut form = filled("en", LoginQuery::default());

        let result = form.submit(&provider, &navigator, &Catalog::embedded()).await;

        assert_eq!(result.reason(), Some(FailureReason::EmailNotVerified));
        assert_eq!(result.message, "Your email address has not been verified yet.");
        assert!(navigator.visited().is_empty());
        assert_eq!(form.form().state(), FormState::Failed);
        assert_eq!(form.form().value(LoginField::Email), "a@b.com");
        assert_eq!(form.form().value(LoginField::Password), "hunter22");
    }

    #[tokio::test]
    async fn other_errors_get_generic_message() {
        let provider = FakeProvider::with_error(Some("CredentialsSignin"));
        let navigator = NavigationLog::default();
        let mut form = filled("en", LoginQuery::default());

        let result = form.submit(&provider, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::CredentialsRejected));
        assert_eq!(result.message, "loginFailedDesc");
    }

    #[tokio::test]
    async fn transport_failure_is_generic() {
        let provider =
            FakeProvider::answering(Err(AppError::Network("connection refused".to_string())));
        let navigator = NavigationLog::default();
        let mut form = filled("en", LoginQuery::default());

        let result = form.submit(&provider, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::Transport));
        assert_eq!(result.message, "loginFailedDesc");
    }

    #[tokio::test]
    async fn invalid_email_blocks_without_calling_provider() {
        let provider = FakeProvider::with_error(None);
        let navigator = NavigationLog::default();
        let mut form = LoginForm::new("en", LoginQuery::default());
        form.update_field(LoginField::Email, "bad-email");
        form.update_field(LoginField::Password, "whatever");
        assert!(!form.can_submit());

        let result = form.submit(&provider, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::InvalidFields));
        assert_eq!(result.title, "formErrorTitle");
        assert_eq!(result.message, "formErrorDesc");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_password_blocks_without_calling_provider() {
        let provider = FakeProvider::with_error(None);
        let navigator = NavigationLog::default();
        let mut form = LoginForm::new("en", LoginQuery::default());
        form.update_field(LoginField::Email, "a@b.com");

        let result = form.submit(&provider, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::MissingRequired));
        assert_eq!(result.message, "missingRequiredFields");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried_by_user() {
        let provider = FakeProvider::with_error(Some("CredentialsSignin"));
        let navigator = NavigationLog::default();
        let mut form = filled("en", LoginQuery::default());

        let _ = form.submit(&provider, &navigator, &KeyEcho).await;
        let _ = form.submit(&provider, &navigator, &KeyEcho).await;

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn cancelled_submit_releases_the_form() {
        let navigator = NavigationLog::default();
        let mut form = filled("en", LoginQuery::default());

        let cancelled = tokio::time::timeout(
            Duration::from_millis(20),
            form.submit(&StalledProvider, &navigator, &KeyEcho),
        )
        .await;

        assert!(cancelled.is_err());
        assert!(!form.is_busy());
        assert_eq!(form.form().state(), FormState::Failed);

        let provider = FakeProvider::with_error(None);
        let result = form.submit(&provider, &navigator, &KeyEcho).await;
        assert!(result.is_success());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn google_sign_in_follows_redirect() {
        let provider = FakeProvider::with_error(None);
        let navigator = NavigationLog::default();
        let mut form = LoginForm::new("en", LoginQuery::default());

        let result = form.sign_in_with_google(&provider, &navigator, &KeyEcho).await;

        assert!(result.is_success());
        assert!(result.notice().is_none());
        assert_eq!(navigator.visited(), vec!["https://idp.example.com/next"]);
        let calls = provider.calls.lock().map(|calls| calls.clone()).unwrap_or_default();
        assert_eq!(calls[0].0, Provider::Google);
        assert_eq!(calls[0].1, None);
        assert_eq!(calls[0].2, "/en/");
    }

    #[tokio::test]
    async fn google_sign_in_failure_is_reported() {
        let provider = FakeProvider::answering(Err(AppError::Timeout("slow".to_string())));
        let navigator = NavigationLog::default();
        let mut form = LoginForm::new("en", LoginQuery::default());

        let result = form.sign_in_with_google(&provider, &navigator, &KeyEcho).await;

        assert_eq!(result.reason(), Some(FailureReason::Transport));
        assert!(navigator.visited().is_empty());
        assert!(!form.is_busy());
    }
}
