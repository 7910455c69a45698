/// Convenience result type used across memebot.
pub type MemeResult<T> = Result<T, MemeError>;

/// Message shown to users when a remote collaborator fails. The failure is recoverable: the
/// state preceding the call is preserved and the user may simply try again.
pub const REQUEST_FAILED_MESSAGE: &str = "Something went wrong. Maybe load-shedding? Try again.";

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Malformed or missing local input (blank topic, export without an image, busy editor).
    #[error("validation error: {0}")]
    Validation(String),

    /// A remote collaborator failed (transport, status, timeout, empty or malformed payload).
    #[error("request error: {0}")]
    Request(String),

    /// The drawing surface or font machinery could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Missing credential or unusable configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MemeError::Request`] value.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Build a [`MemeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MemeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Message suitable for showing to an end user.
    ///
    /// Remote failures collapse to one generic recoverable message; everything else reports its
    /// own description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(_) => REQUEST_FAILED_MESSAGE.to_string(),
            Self::Validation(msg) | Self::Render(msg) | Self::Config(msg) => msg.clone(),
            Self::Other(e) => e.to_string(),
        }
    }

    /// Return `true` for [`MemeError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Return `true` for [`MemeError::Request`].
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Return `true` for [`MemeError::Render`].
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
