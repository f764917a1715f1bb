use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    /// Non-2xx response. `message` carries the server's `error` field when the
    /// body had one.
    Http {
        status: u16,
        message: Option<String>,
    },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Server-supplied explanation for a rejected request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Http {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http {
                status,
                message: Some(message),
            } => write!(formatter, "Request failed ({status}): {message}"),
            AppError::Http {
                status,
                message: None,
            } => write!(formatter, "Request failed ({status})"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}
