//! HTTP implementations of the sign-in and registration seams. The sign-in
//! client speaks the NextAuth-style browser protocol: fetch a CSRF token, post
//! the form with `json=true`, and read the `error` query parameter of the
//! returned redirect URL. Cookies (CSRF and session) live in the shared
//! client's jar and are never read here.

use super::{
    provider::{RegistrationEndpoint, SignIn},
    types::{
        CsrfResponse, Provider, RedirectResponse, RegisterRequest, SignInParams, SignInResponse,
    },
};
use crate::app_lib::{ApiClient, AppError};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

/// Mount point of the identity provider's routes.
pub const AUTH_BASE_PATH: &str = "/api/auth";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/api/user/register";

#[derive(Clone, Debug)]
pub struct NextAuthClient {
    api: ApiClient,
}

impl NextAuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches a fresh CSRF token; the matching cookie lands in the jar.
    ///
    /// # Errors
    /// Propagates transport and decoding errors.
    #[instrument(skip(self))]
    pub async fn csrf_token(&self) -> Result<String, AppError> {
        let response: CsrfResponse = self
            .api
            .get_json(&format!("{AUTH_BASE_PATH}/csrf"))
            .await?;
        Ok(response.csrf_token)
    }

    fn endpoint(provider: Provider) -> String {
        match provider {
            Provider::Credentials => format!("{AUTH_BASE_PATH}/callback/credentials"),
            Provider::Google => format!("{AUTH_BASE_PATH}/signin/google"),
        }
    }

    /// Reads the `error` query parameter of a redirect URL, resolving relative
    /// URLs against the configured base.
    fn redirect_error(&self, redirect: &str) -> Option<String> {
        let parsed = Url::parse(redirect)
            .or_else(|_| Url::parse(&self.api.url("/")).and_then(|base| base.join(redirect)))
            .ok()?;
        parsed
            .query_pairs()
            .find(|(key, _)| key == "error")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

impl SignIn for NextAuthClient {
    #[instrument(skip(self, params), fields(provider = provider.id()))]
    async fn sign_in(
        &self,
        provider: Provider,
        params: SignInParams,
    ) -> Result<SignInResponse, AppError> {
        let csrf_token = self.csrf_token().await?;

        let mut form: Vec<(&str, &str)> = vec![
            ("csrfToken", csrf_token.as_str()),
            ("callbackUrl", params.callback_url.as_str()),
            ("json", "true"),
        ];
        if provider == Provider::Credentials {
            let credentials = params.credentials.as_ref().ok_or_else(|| {
                AppError::Config("Credentials sign-in requires email and password.".to_string())
            })?;
            form.push(("email", credentials.email.as_str()));
            form.push(("password", credentials.password.expose_secret()));
        }

        let (status, reply): (u16, RedirectResponse) = self
            .api
            .post_form_with_status(
                &Self::endpoint(provider),
                &form,
                &[("X-Auth-Return-Redirect", "1")],
            )
            .await?;

        let url = reply.url.unwrap_or_else(|| params.callback_url.clone());
        let error = self.redirect_error(&url);
        debug!(status, has_error = error.is_some(), "sign-in answered");

        Ok(SignInResponse {
            ok: (200..300).contains(&status),
            url: error.is_none().then_some(url),
            error,
            status,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HttpRegistration {
    api: ApiClient,
}

impl HttpRegistration {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl RegistrationEndpoint for HttpRegistration {
    #[instrument(skip(self, request))]
    async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        self.api.post_json(REGISTER_PATH, request).await
    }
}
