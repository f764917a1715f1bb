//! Request and response types for identity provider and registration calls.
//! Passwords are held as `SecretString` and only exposed while serializing the
//! outbound body; these payloads must never be logged.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Sign-in methods offered by the identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Credentials,
    Google,
}

impl Provider {
    pub fn id(self) -> &'static str {
        match self {
            Provider::Credentials => "credentials",
            Provider::Google => "google",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Clone, Debug)]
pub struct SignInParams {
    /// Required for `Provider::Credentials`, ignored otherwise.
    pub credentials: Option<Credentials>,
    pub callback_url: String,
}

/// What a sign-in call reports back. Mirrors the provider's client contract:
/// `error` is set on failure, `url` is the redirect target on success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInResponse {
    pub error: Option<String>,
    pub status: u16,
    pub ok: bool,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CsrfResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

/// Reply to a sign-in post. Providers may leave out `url`.
#[derive(Clone, Debug, Deserialize)]
pub struct RedirectResponse {
    pub url: Option<String>,
}

/// Body of `POST /api/user/register`.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
    #[serde(rename = "confirmPassword", serialize_with = "expose_secret")]
    pub confirm_password: SecretString,
    pub name: String,
}

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
