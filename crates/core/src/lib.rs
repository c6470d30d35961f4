pub mod domain;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod photo;
pub mod places;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub mod config {
    use crate::error::GourmetError;
    use std::time::Duration;

    pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com";
    pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_FALLBACK_DELAY_MS: u64 = 1000;

    /// Process-wide configuration, read once at startup and shared read-only
    /// with every adapter.
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub google_places_api_key: Option<String>,
        pub places_base_url: String,
        pub geocode_base_url: String,
        pub upstream_timeout: Duration,
        pub fallback_delay: Duration,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                google_places_api_key: None,
                places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
                geocode_base_url: DEFAULT_GEOCODE_BASE_URL.to_string(),
                upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS),
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self::from_lookup(|key| std::env::var(key).ok()))
        }

        /// Builds settings from any key lookup. Blank values count as unset and
        /// unparseable numbers fall back to the defaults.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
            let defaults = Self::default();
            let non_blank = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
            let number = |key: &str| non_blank(key).and_then(|s| s.trim().parse::<u64>().ok());

            Self {
                google_places_api_key: non_blank("GOOGLE_PLACES_API_KEY"),
                places_base_url: non_blank("PLACES_BASE_URL").unwrap_or(defaults.places_base_url),
                geocode_base_url: non_blank("GEOCODE_BASE_URL")
                    .unwrap_or(defaults.geocode_base_url),
                upstream_timeout: number("UPSTREAM_TIMEOUT_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.upstream_timeout),
                fallback_delay: number("FALLBACK_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.fallback_delay),
                sentry_dsn: non_blank("SENTRY_DSN"),
            }
        }

        pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
            self.google_places_api_key = Some(api_key.into());
            self
        }

        pub fn require_google_places_api_key(&self) -> Result<&str, GourmetError> {
            self.google_places_api_key.as_deref().ok_or_else(|| {
                GourmetError::Configuration("GOOGLE_PLACES_API_KEY is required".to_string())
            })
        }

        pub(crate) fn http_client(&self) -> anyhow::Result<reqwest::Client> {
            use anyhow::Context;

            reqwest::Client::builder()
                .timeout(self.upstream_timeout)
                .build()
                .context("failed to build upstream http client")
        }
    }

}
