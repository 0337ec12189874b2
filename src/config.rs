//! Discovery configuration
//!
//! Read from process environment. Binaries load `.env` through `dotenvy`
//! before calling [`DiscoveryConfig::from_env`].

use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_REVALIDATE_PATH: &str = "/explore";

/// Settings for the discovery pipeline.
///
/// `Debug` masks the API key.
#[derive(Clone)]
pub struct DiscoveryConfig {
    /// `None` when the key is unset or blank; the client then fails fast
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Path handed to the view invalidator after a live success
    pub revalidate_path: String,
}

impl DiscoveryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_key: non_blank("GEMINI_API_KEY"),
            model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_blank("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            revalidate_path: non_blank("PLACES_REVALIDATE_PATH")
                .unwrap_or_else(|| DEFAULT_REVALIDATE_PATH.to_string()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            revalidate_path: DEFAULT_REVALIDATE_PATH.to_string(),
        }
    }
}

impl fmt::Debug for DiscoveryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("revalidate_path", &self.revalidate_path)
            .finish()
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = DiscoveryConfig::from_lookup(|_| None);
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.revalidate_path, DEFAULT_REVALIDATE_PATH);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = DiscoveryConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")]));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_overrides_are_read() {
        let config = DiscoveryConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k-123"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:9000/models/"),
            ("PLACES_REVALIDATE_PATH", "/dashboard"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/models");
        assert_eq!(config.revalidate_path, "/dashboard");
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = DiscoveryConfig::default().with_api_key("super-secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("***"));
    }
}
