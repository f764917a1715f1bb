//! HTTP helpers for JSON APIs with consistent timeouts and error handling. Feature
//! clients use these helpers to avoid duplicating request setup. The underlying
//! client keeps a cookie jar so provider-issued session and CSRF cookies flow
//! between calls; that jar is the only session state this crate holds and it is
//! never inspected.

use super::{config::AppConfig, errors::AppError};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a cookie-aware `reqwest::Client` bound to one base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the configured base URL and timeout.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the TLS backend cannot be initialized.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Absolute URL for a path under the base URL.
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    /// Fetches JSON and fails on any non-2xx status.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.url(path);
        let response = self.http.get(&url).send().await.map_err(map_request_error)?;

        handle_json_response(response).await
    }

    /// Posts JSON and treats any 2xx status as success regardless of the body.
    /// Non-2xx responses surface the body's `error` field when present.
    #[instrument(skip(self, body))]
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let url = self.url(path);
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }

    /// Posts a form-encoded body and parses the JSON reply whatever the status,
    /// returning the status alongside it. Only an unparsable non-2xx reply is an
    /// error.
    #[instrument(skip(self, form, headers))]
    pub async fn post_form_with_status<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<(u16, T), AppError> {
        let url = self.url(path);
        let mut builder = self.http.post(&url).form(form);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = builder.send().await.map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;
        debug!(status = status.as_u16(), "form post completed");

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok((status.as_u16(), parsed)),
            Err(err) if status.is_success() => Err(AppError::Parse(format!(
                "Failed to decode response: {err}"
            ))),
            Err(_) => Err(AppError::Http {
                status: status.as_u16(),
                message: extract_error_field(&body),
            }),
        }
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with the server's message.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: extract_error_field(&body),
        })
    }
}

/// Accepts any 2xx response without reading its body.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: extract_error_field(&body),
        })
    }
}

/// Pulls the string `error` field out of a JSON body exactly as sent. An
/// empty string counts as absent.
fn extract_error_field(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
