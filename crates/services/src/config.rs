use std::env;
use std::time::Duration;

use trivia_core::model::SessionSettings;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://triviatron-backend.onrender.com/triviatron";

pub const ENV_BASE_URL: &str = "TRIVIA_BASE_URL";
pub const ENV_TOTAL_SECS: &str = "TRIVIA_TOTAL_SECS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "TRIVIA_REQUEST_TIMEOUT_MS";

/// Where the trivia service lives and how a game is timed.
#[derive(Clone, Debug)]
pub struct TriviaConfig {
    pub base_url: Url,
    pub session: SessionSettings,
    /// `None` waits on a request for as long as it takes.
    pub request_timeout: Option<Duration>,
}

impl TriviaConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            session: SessionSettings::default(),
            request_timeout: None,
        })
    }

    /// Read `TRIVIA_BASE_URL`, `TRIVIA_TOTAL_SECS` and `TRIVIA_REQUEST_TIMEOUT_MS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for values that are set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = get(ENV_TOTAL_SECS) {
            config = config.with_total_secs(parse_number(ENV_TOTAL_SECS, &raw)?)?;
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT_MS) {
            let millis = parse_number(ENV_REQUEST_TIMEOUT_MS, &raw)?;
            config = config.with_request_timeout(Some(Duration::from_millis(millis.into())));
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Session` when `total_secs` is zero.
    pub fn with_total_secs(mut self, total_secs: u32) -> Result<Self, ConfigError> {
        self.session = SessionSettings::new(total_secs, self.session.next_question_delay())?;
        Ok(self)
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout.filter(|value| !value.is_zero());
        self
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidBaseUrl` for unparsable input and
/// `ConfigError::UnsupportedScheme` for anything but http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        raw: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            raw: raw.to_string(),
        });
    }
    Ok(url)
}

fn parse_number(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = TriviaConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.session.total_secs(), 60);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = TriviaConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:8000/triviatron"),
            (ENV_TOTAL_SECS, "30"),
            (ENV_REQUEST_TIMEOUT_MS, "1500"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/triviatron");
        assert_eq!(config.session.total_secs(), 30);
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            TriviaConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "  "), (ENV_TOTAL_SECS, "")]))
                .unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.session.total_secs(), 60);
    }

    #[test]
    fn rejects_bad_values() {
        let err = TriviaConfig::from_lookup(lookup_from(&[(ENV_TOTAL_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: ENV_TOTAL_SECS, .. }));

        let err = TriviaConfig::from_lookup(lookup_from(&[(ENV_TOTAL_SECS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Session(_)));

        let err = TriviaConfig::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));

        let err = TriviaConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = TriviaConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_request_timeout(Some(Duration::ZERO));
        assert_eq!(config.request_timeout, None);
    }
}
