use crate::composer::HintPolicy;
use crate::error::{Result, TryOnError};
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

pub const MISSING_API_KEY_MESSAGE: &str = "API key is missing. Set GEMINI_API_KEY (or API_KEY) in your environment or .env file with your Google API key, then restart.";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|key| lookup(*key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        let model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("GEMINI_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = lookup("GEMINI_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        GeminiConfig {
            api_key,
            model,
            base_url,
            timeout_secs,
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

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Per-request timeout. Zero means unset.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// The configured key, or a configuration error telling the operator how to set it.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(TryOnError::Config(MISSING_API_KEY_MESSAGE.into())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub hint_policy: HintPolicy,
    pub allow_custom_labels: bool,
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).map_or(false, |val| val.trim() == "true");
        let hint_policy = match lookup("MODELSHOOT_HINTS") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("Ignoring MODELSHOOT_HINTS: {}", err);
                HintPolicy::default()
            }),
            None => HintPolicy::default(),
        };

        Config {
            gemini: GeminiConfig::from_lookup(&lookup),
            hint_policy,
            allow_custom_labels: flag("MODELSHOOT_ALLOW_CUSTOM_LABELS"),
            log_json: flag("MODELSHOOT_LOG_JSON"),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_hint_policy(mut self, policy: HintPolicy) -> Self {
        self.hint_policy = policy;
        self
    }

    pub fn with_custom_labels(mut self, allowed: bool) -> Self {
        self.allow_custom_labels = allowed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gemini.timeout(), Duration::from_secs(90));
        assert_eq!(config.hint_policy, HintPolicy::Always);
        assert!(!config.allow_custom_labels);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_missing_key_is_actionable() {
        let err = GeminiConfig::new().require_api_key().unwrap_err();
        match err {
            TryOnError::Config(msg) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(GeminiConfig::new().with_api_key("   ").require_api_key().is_err());
    }

    #[test]
    fn test_api_key_fallback_and_blank_values() {
        let config = GeminiConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", " "), ("API_KEY", "abc123")]));
        assert_eq!(config.require_api_key().unwrap(), "abc123");

        let config = GeminiConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]));
        assert_eq!(config.require_api_key().unwrap(), "primary");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_MODEL", "gemini-3-pro-image-preview"),
            ("GEMINI_TIMEOUT_SECS", "15"),
            ("MODELSHOOT_HINTS", "selected"),
            ("MODELSHOOT_ALLOW_CUSTOM_LABELS", "true"),
            ("MODELSHOOT_LOG_JSON", "true"),
        ]));
        assert_eq!(config.gemini.model, "gemini-3-pro-image-preview");
        assert_eq!(config.gemini.timeout_secs, 15);
        assert_eq!(config.hint_policy, HintPolicy::SelectedOnly);
        assert!(config.allow_custom_labels);
        assert!(config.log_json);
    }

    #[test]
    fn test_zero_or_garbage_timeout_uses_default() {
        for raw in ["0", " 0 ", "-5", "soon"] {
            let config = GeminiConfig::from_lookup(lookup_from(&[("GEMINI_TIMEOUT_SECS", raw)]));
            assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS, "raw value {raw:?}");
        }
        let built = GeminiConfig::new().with_timeout_secs(0);
        assert_eq!(built.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", GeminiConfig::new().with_api_key("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
