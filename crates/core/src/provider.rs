use std::time::Duration;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 32768;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_ENV_VAR: &str = "CINESOFIA_MODEL";

/// Settings for the generative provider.
///
/// Built once at startup and passed to the coordinator; nothing reads the
/// environment after that.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub thinking_budget: u32,
    pub web_search: bool,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            thinking_budget: DEFAULT_THINKING_BUDGET,
            web_search: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .copied()
            .filter_map(|var| lookup(var))
            .find(|value| !value.trim().is_empty());

        let model = lookup(MODEL_ENV_VAR)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            model,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Validate that an API key is configured
    pub fn validate_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AnalysisError::MissingApiKey {
                env_var: API_KEY_ENV_VARS[0].to_string(),
            })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}
