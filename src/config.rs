use std::path::PathBuf;
use std::time::Duration;

use crate::foundation::error::{MemeError, MemeResult};
use crate::text::font::FontChoice;

/// Environment variable holding the Gemini credential.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Fallback credential variable.
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
/// Model used for idea generation.
pub const ENV_IDEA_MODEL: &str = "MEMEBOT_IDEA_MODEL";
/// Model used for image generation.
pub const ENV_IMAGE_MODEL: &str = "MEMEBOT_IMAGE_MODEL";
/// Per-request timeout in whole seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "MEMEBOT_REQUEST_TIMEOUT_SECS";
/// Path to a TTF/OTF caption font overriding system discovery.
pub const ENV_FONT: &str = "MEMEBOT_FONT";

/// Default idea-generation model.
pub const DEFAULT_IDEA_MODEL: &str = "gemini-2.5-flash";
/// Default image-generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Default bound on every remote call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime configuration for the remote collaborators and the caption font.
#[derive(Clone, PartialEq, Eq)]
pub struct MemebotConfig {
    /// Gemini credential; only required once a client is built.
    pub api_key: Option<String>,
    /// Idea-generation model name.
    pub idea_model: String,
    /// Image-generation model name.
    pub image_model: String,
    /// Bound on each remote call.
    pub request_timeout: Duration,
    /// Explicit caption font file.
    pub font: Option<PathBuf>,
}

impl std::fmt::Debug for MemebotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemebotConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("idea_model", &self.idea_model)
            .field("image_model", &self.image_model)
            .field("request_timeout", &self.request_timeout)
            .field("font", &self.font)
            .finish()
    }
}

impl Default for MemebotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            idea_model: DEFAULT_IDEA_MODEL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            font: None,
        }
    }
}

impl MemebotConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> MemeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MemeResult<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let request_timeout = match non_empty(ENV_REQUEST_TIMEOUT_SECS) {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|&n| n > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    MemeError::config(format!(
                        "{ENV_REQUEST_TIMEOUT_SECS} must be a positive number of seconds, got '{raw}'"
                    ))
                })?,
        };

        Ok(Self {
            api_key: non_empty(ENV_API_KEY).or_else(|| non_empty(ENV_API_KEY_FALLBACK)),
            idea_model: non_empty(ENV_IDEA_MODEL).unwrap_or_else(|| DEFAULT_IDEA_MODEL.to_owned()),
            image_model: non_empty(ENV_IMAGE_MODEL)
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_owned()),
            request_timeout,
            font: non_empty(ENV_FONT).map(PathBuf::from),
        })
    }

    /// The credential, or a configuration error naming the variables to set.
    pub fn require_api_key(&self) -> MemeResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            MemeError::config(format!(
                "{ENV_API_KEY} (or {ENV_API_KEY_FALLBACK}) is not set"
            ))
        })
    }

    /// Caption font selection implied by this configuration.
    pub fn font_choice(&self) -> FontChoice {
        match &self.font {
            Some(path) => FontChoice::File(path.clone()),
            None => FontChoice::System,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
