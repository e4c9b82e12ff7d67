use core::fmt;
use std::error::Error;

/// Failure raised by a backend or by the plumbing around it.
#[derive(Debug)]
pub enum AppError {
    Config(String),
    FailedRequest(reqwest::Error),
    Io(std::io::Error),
    Json(serde_json::Error),
    NotFound(String),
    Regex(regex::Error),
    Validation(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FailedRequest(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("invalid url: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::FailedRequest(e) => write!(f, "Request to contact backend failed: {}", e),
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Json(e) => write!(f, "Malformed contact data: {}", e),
            AppError::NotFound(item) => write!(f, "{} Not found", item),
            AppError::Regex(e) => write!(f, "Invalid validation pattern: {}", e),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::FailedRequest(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Regex(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure surfaced by the contact provider to whoever drives it.
///
/// Each mutation gets its own variant so the caller can pick an
/// operation-specific message. The backend error that caused it stays
/// reachable through [`Error::source`].
#[derive(Debug)]
pub enum ContactError {
    /// A mutation was requested while nobody is signed in.
    NoSession,
    Add(AppError),
    Edit(AppError),
    Delete(AppError),
}

impl ContactError {
    pub fn backend_error(&self) -> Option<&AppError> {
        match self {
            ContactError::NoSession => None,
            ContactError::Add(e) | ContactError::Edit(e) | ContactError::Delete(e) => Some(e),
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::NoSession => {
                write!(f, "No signed-in user. Sign in to manage personal contacts.")
            }
            ContactError::Add(_) => write!(f, "Failed to add new personal contact."),
            ContactError::Edit(_) => write!(f, "Failed to edit personal contact."),
            ContactError::Delete(_) => write!(f, "Failed to delete personal contact."),
        }
    }
}

impl Error for ContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.backend_error().map(|e| e as &(dyn Error + 'static))
    }
}
