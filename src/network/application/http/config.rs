use super::{Header, MAX_HEADER_VALUE_LEN};
use base64ct::{Base64, Encoding};
use core::fmt;
use heapless::{String, Vec};
use serde::Deserialize;

/// Maximum length of the configured `User-Agent`.
pub const MAX_USER_AGENT_LEN: usize = 64;
/// Maximum length of a basic auth username or password.
pub const MAX_CREDENTIAL_LEN: usize = 64;

const DEFAULT_USER_AGENT: &str = concat!("libiot-http/", env!("CARGO_PKG_VERSION"));

/// Credentials sent with HTTP basic authentication.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BasicAuth {
    /// Username.
    pub username: String<MAX_CREDENTIAL_LEN>,
    /// Password.
    pub password: String<MAX_CREDENTIAL_LEN>,
}

impl BasicAuth {
    /// Builds credentials, or `None` if either part is too long.
    pub fn new(username: &str, password: &str) -> Option<Self> {
        Some(Self {
            username: String::try_from(username).ok()?,
            password: String::try_from(password).ok()?,
        })
    }

    /// The `Authorization` header carrying these credentials.
    pub fn header(&self) -> Option<Header> {
        let mut credentials: Vec<u8, { 2 * MAX_CREDENTIAL_LEN + 1 }> = Vec::new();
        credentials
            .extend_from_slice(self.username.as_bytes())
            .ok()?;
        credentials.push(b':').ok()?;
        credentials
            .extend_from_slice(self.password.as_bytes())
            .ok()?;

        let mut encoded = [0u8; (2 * MAX_CREDENTIAL_LEN + 1).div_ceil(3) * 4];
        let encoded = Base64::encode(&credentials, &mut encoded).ok()?;

        let mut value: String<MAX_HEADER_VALUE_LEN> = String::new();
        value.push_str("Basic ").ok()?;
        value.push_str(encoded).ok()?;
        Some(Header {
            name: String::try_from("Authorization").ok()?,
            value,
        })
    }
}

/// Errors raised while loading or validating a [`Config`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse,
    /// A receive or transmit buffer size of zero.
    InvalidBufferSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse => f.write_str("malformed configuration"),
            ConfigError::InvalidBufferSize => f.write_str("buffer sizes must be positive"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::Parse => defmt::write!(f, "Parse"),
            ConfigError::InvalidBufferSize => defmt::write!(f, "InvalidBufferSize"),
        }
    }
}

/// Launcher settings shared by every request.
///
/// Missing fields take their default when deserialized, so a JSON document
/// only needs to list what it changes:
///
/// ```rust
/// use libiot_http::network::application::http::Config;
///
/// let config = Config::from_json(br#"{"timeout_ms":10000,"redirect_limit":5}"#).unwrap();
/// assert_eq!(config.timeout_ms, 10_000);
/// assert_eq!(config.redirect_limit, 5);
/// assert!(config.follow_redirects);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network timeout for every blocking transport call, in milliseconds.
    pub timeout_ms: u32,
    /// Follow `3xx` redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirects followed for one request.
    pub redirect_limit: u16,
    /// `User-Agent` sent with every request.
    pub user_agent: Option<String<MAX_USER_AGENT_LEN>>,
    /// Receive buffer size of the native client.
    pub buffer_size_rx: usize,
    /// Transmit buffer size of the native client.
    pub buffer_size_tx: usize,
    /// Watchdog timeout held while a request or read is running. `0` keeps
    /// the platform's setting.
    pub watchdog_timeout_ms: u32,
    /// Basic authentication credentials.
    pub basic_auth: Option<BasicAuth>,
    /// Let the native client answer challenges with credentials embedded in
    /// the URL.
    pub url_credentials: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: 4500,
            follow_redirects: true,
            redirect_limit: 3,
            user_agent: String::try_from(DEFAULT_USER_AGENT).ok(),
            buffer_size_rx: 512,
            buffer_size_tx: 512,
            watchdog_timeout_ms: 0,
            basic_auth: None,
            url_credentials: true,
        }
    }
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        let (config, _) =
            serde_json_core::from_slice::<Config>(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings the native client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size_rx == 0 || self.buffer_size_tx == 0 {
            return Err(ConfigError::InvalidBufferSize);
        }
        Ok(())
    }

    /// Sets the network timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Enables or disables redirect following and sets the hop limit.
    pub fn with_redirects(mut self, follow: bool, limit: u16) -> Self {
        self.follow_redirects = follow;
        self.redirect_limit = limit;
        self
    }

    /// Sets the `User-Agent`. Values that do not fit are dropped.
    pub fn with_user_agent(mut self, user_agent: Option<&str>) -> Self {
        self.user_agent = user_agent.and_then(|ua| String::try_from(ua).ok());
        self
    }

    /// Sets the receive and transmit buffer sizes.
    pub fn with_buffer_sizes(mut self, rx: usize, tx: usize) -> Self {
        self.buffer_size_rx = rx;
        self.buffer_size_tx = tx;
        self
    }

    /// Sets the watchdog timeout held during requests.
    pub fn with_watchdog_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.watchdog_timeout_ms = timeout_ms;
        self
    }

    /// Sets basic authentication credentials.
    pub fn with_basic_auth(mut self, auth: Option<BasicAuth>) -> Self {
        self.basic_auth = auth;
        self
    }

    /// Enables or disables authentication from URL credentials.
    pub fn with_url_credentials(mut self, enabled: bool) -> Self {
        self.url_credentials = enabled;
        self
    }
}
