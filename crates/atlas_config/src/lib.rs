//! Process-wide configuration.
//!
//! Built once at start-up from an optional TOML file and the environment,
//! then handed to whoever needs it. Nothing downstream reads the environment
//! on its own.

mod error;

use std::{collections::HashMap, fs, path::Path, time::Duration};

use atlas_geo::BoundingBox;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

pub use error::{Error, Result};

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "ATLAS_";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub http: HttpConfig,
    pub nominatim: NominatimConfig,
    pub neshan: NeshanConfig,
    pub weather: WeatherConfig,
}

/// Outbound HTTP settings shared by every provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Upper bound for a single request, connect included.
    pub timeout_secs: u64,

    /// Sent with every request. Nominatim rejects requests without one.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: concat!("atlas/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NominatimConfig {
    pub base_url: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: atlas_geo::nominatim::DEFAULT_BASE_URL.to_owned(),
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NeshanConfig {
    pub base_url: String,

    /// Environment variable that contains the API key.
    pub api_key_env: String,

    /// Whether to bias results towards [`Self::extent`].
    pub bias_results: bool,

    pub extent: BoundingBox,

    /// Read from [`Self::api_key_env`], never from the file.
    #[serde(skip)]
    api_key: Option<String>,
}

impl Default for NeshanConfig {
    fn default() -> Self {
        Self {
            base_url: atlas_geo::neshan::DEFAULT_BASE_URL.to_owned(),
            api_key_env: "NESHAN_API_KEY".to_owned(),
            bias_results: true,
            extent: BoundingBox::TEHRAN,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for NeshanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeshanConfig")
            .field("base_url", &self.base_url)
            .field("api_key_env", &self.api_key_env)
            .field("bias_results", &self.bias_results)
            .field("extent", &self.extent)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl NeshanConfig {
    /// The API key, if one was configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|v: &String| !v.is_empty());
        self
    }

    /// The bounding hint to send, if biasing is enabled.
    #[must_use]
    pub fn extent(&self) -> Option<BoundingBox> {
        self.bias_results.then_some(self.extent)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: atlas_weather::open_meteo::DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl Config {
    /// Load the configuration file at `path` (if any), then apply the
    /// process environment on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file.");
                Self::from_toml(&fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };

        config.apply_env(std::env::vars())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(Into::into)
    }

    /// Apply `ATLAS_*` overrides and read the API keys from `vars`.
    pub fn apply_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) -> Result<()> {
        let mut vars = vars.into_iter().collect::<HashMap<_, _>>();

        let mut take = |key: &str| vars.remove(&format!("{ENV_PREFIX}{key}"));

        if let Some(value) = take("HTTP_TIMEOUT_SECS") {
            self.http.timeout_secs = value.parse().map_err(|_| Error::InvalidValue {
                key: format!("{ENV_PREFIX}HTTP_TIMEOUT_SECS"),
                value,
            })?;
        }

        if let Some(value) = take("HTTP_USER_AGENT") {
            self.http.user_agent = value;
        }

        if let Some(value) = take("NOMINATIM_BASE_URL") {
            self.nominatim.base_url = value;
        }

        if let Some(value) = take("NESHAN_BASE_URL") {
            self.neshan.base_url = value;
        }

        if let Some(value) = take("WEATHER_BASE_URL") {
            self.weather.base_url = value;
        }

        self.neshan.api_key = vars
            .remove(&self.neshan.api_key_env)
            .filter(|v| !v.trim().is_empty());

        trace!(
            neshan_api_key = self.neshan.api_key.is_some(),
            "Applied environment overrides."
        );

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("nominatim.base_url", &self.nominatim.base_url),
            ("neshan.base_url", &self.neshan.base_url),
            ("weather.base_url", &self.weather.base_url),
        ] {
            Url::parse(value).map_err(|source| Error::Url { key, source })?;
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::InvalidValue {
                key: "http.timeout_secs".to_owned(),
                value: "0".to_owned(),
            });
        }

        Ok(())
    }

    /// The configured Neshan API key, if any.
    #[must_use]
    pub fn neshan_api_key(&self) -> Option<String> {
        self.neshan.api_key().map(str::to_owned)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Build the HTTP client shared by all providers.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(&self.http.user_agent)
            .build()
            .map_err(Into::into)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
