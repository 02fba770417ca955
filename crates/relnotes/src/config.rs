use crate::prelude::*;

/// Release-notes configuration from environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseNotesConfig {
    pub base_url: Option<String>,
}

impl ReleaseNotesConfig {
    /// Environment variable holding the issue-tracker base URL
    pub const BASE_URL_VAR: &'static str = "RELNOTES_BASE_URL";

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(Self::BASE_URL_VAR)
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = Some(url);
        }
        self
    }

    /// The configured base URL, or an error when none was given
    pub fn base_url(&self) -> Result<&str, Error> {
        self.base_url.as_deref().ok_or(Error::MissingBaseUrl)
    }
}
