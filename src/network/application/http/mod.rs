//! Streaming HTTP requests for embedded systems.
//!
//! This module issues one HTTP request at a time through a native transport
//! (for example the HTTP client shipped with the vendor SDK) and hands the
//! response back as a [`Session`] that streams the body in caller-sized
//! chunks.
//!
//! # Features
//!
//! - GET, POST, PUT, DELETE and PATCH
//! - Known-length and chunked response bodies
//! - Manual redirect following with a configurable hop limit
//! - Task watchdog feeding around every blocking call
//! - Exactly-once release of the native handle
//!
//! # Usage
//!
//! ```rust,no_run
//! use libiot_http::network::application::http::{Config, Launcher};
//! # use libiot_http::network::application::http::{NativeClient, Transport, TransportConfig};
//! # use libiot_http::network::error::NativeError;
//! # use libiot_http::system::platform::Platform;
//! # use libiot_http::system::watchdog::NoWatchdog;
//! # struct Board;
//! # impl Platform for Board {
//! #     fn is_connected(&self) -> bool { true }
//! #     fn millis(&self) -> u32 { 0 }
//! #     fn status_momentary_error(&self, _name: &str, _length_ms: u32) {}
//! # }
//! # struct Idf;
//! # struct IdfClient;
//! # impl NativeClient for IdfClient {
//! #     fn set_header(&mut self, _n: &str, _v: &str) -> Result<(), NativeError> { Ok(()) }
//! #     fn open(&mut self, _len: usize) -> Result<(), NativeError> { Ok(()) }
//! #     fn write(&mut self, buf: &[u8]) -> isize { buf.len() as isize }
//! #     fn fetch_headers(&mut self) -> i64 { 0 }
//! #     fn read(&mut self, _buf: &mut [u8]) -> isize { 0 }
//! #     fn status_code(&self) -> i32 { 200 }
//! #     fn set_redirection(&mut self) -> Result<(), NativeError> { Ok(()) }
//! #     fn close(&mut self) {}
//! #     fn cleanup(self) {}
//! # }
//! # impl Transport for Idf {
//! #     type Client = IdfClient;
//! #     fn init(&self, _config: &TransportConfig<'_>) -> Option<IdfClient> { Some(IdfClient) }
//! # }
//!
//! let launcher = Launcher::new(Idf, Board, NoWatchdog, Config::default());
//!
//! if let Ok(mut session) = launcher.get("https://example.com/status", &[]) {
//!     let mut buf = [0u8; 256];
//!     while let Ok(n) = session.read(&mut buf) {
//!         if n == 0 {
//!             break;
//!         }
//!         // consume &buf[..n]
//!     }
//!     session.end();
//! }
//! ```

use core::str::FromStr;
use heapless::String;

/// Launcher configuration.
pub mod config;

/// Request and read errors.
pub mod error;

/// Request launcher and redirect handling.
pub mod launcher;

/// Response sessions.
pub mod session;

/// Native transport interface.
pub mod transport;


pub use config::{BasicAuth, Config, ConfigError};
pub use error::{Error, ReadError};
pub use launcher::Launcher;
pub use session::Session;
pub use transport::{AuthType, NativeClient, Transport, TransportConfig};

/// Log target used by the HTTP client.
pub(crate) const TAG: &str = "http_request";

/// Maximum length of a header name.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum length of a header value.
pub const MAX_HEADER_VALUE_LEN: usize = 256;

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parses an upper-case method name. Anything else is
    /// [`Error::UnsupportedMethod`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            _ => Err(Error::UnsupportedMethod),
        }
    }
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name.
    pub name: String<MAX_HEADER_NAME_LEN>,
    /// Header value.
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    /// Builds a header, or returns `None` if either part does not fit.
    pub fn new(name: &str, value: &str) -> Option<Self> {
        Some(Self {
            name: String::try_from(name).ok()?,
            value: String::try_from(value).ok()?,
        })
    }
}

/// Response status as reported by the transport.
///
/// The native transport signals "no HTTP status at all" with a status of
/// `-1`. That case is kept apart from real HTTP codes so it can never be
/// mistaken for a redirect or a server error. Any other value that does not
/// fit an HTTP code is carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A status code received from the server.
    Http(u16),
    /// The connection failed before a status line was received.
    ConnectionError,
    /// A raw value that is neither `-1` nor a valid HTTP code.
    Other(i32),
}

impl Status {
    /// Raw status value the transport uses for a connection error.
    pub const CONNECTION_ERROR_CODE: i32 = -1;

    /// Interprets a raw status code from the transport.
    pub fn from_raw(code: i32) -> Self {
        if code == Self::CONNECTION_ERROR_CODE {
            return Status::ConnectionError;
        }
        match u16::try_from(code) {
            Ok(http) => Status::Http(http),
            Err(_) => Status::Other(code),
        }
    }

    /// The raw value, `-1` for a connection error.
    pub fn code(&self) -> i32 {
        match self {
            Status::Http(code) => i32::from(*code),
            Status::ConnectionError => Self::CONNECTION_ERROR_CODE,
            Status::Other(code) => *code,
        }
    }

    /// `2xx`
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Http(200..=299))
    }

    /// `301`, `302`, `303`, `307` or `308`.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Status::Http(301 | 302 | 303 | 307 | 308))
    }
}

/// Length of the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLength {
    /// The server announced the body length.
    Known(usize),
    /// Length not known in advance (chunked transfer encoding).
    Chunked,
}

impl ContentLength {
    /// Raw content length value the transport uses for chunked bodies.
    pub const CHUNKED_CODE: i64 = -1;

    /// Interprets the value returned by a header fetch.
    ///
    /// Returns `None` for negative values other than the chunked marker,
    /// which the transport uses to report a failed fetch.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            Self::CHUNKED_CODE => Some(ContentLength::Chunked),
            n if n >= 0 => usize::try_from(n).ok().map(ContentLength::Known),
            _ => None,
        }
    }

    /// The raw value, `-1` for chunked bodies.
    pub fn as_raw(&self) -> i64 {
        match self {
            ContentLength::Known(n) => *n as i64,
            ContentLength::Chunked => Self::CHUNKED_CODE,
        }
    }
}

/// Whether `url` uses the TLS scheme.
pub fn is_secure_url(url: &str) -> bool {
    url.get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https:"))
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Status::Http(code) => defmt::write!(f, "Http({})", code),
            Status::ConnectionError => defmt::write!(f, "ConnectionError"),
            Status::Other(code) => defmt::write!(f, "Other({})", code),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ContentLength {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ContentLength::Known(n) => defmt::write!(f, "Known({})", n),
            ContentLength::Chunked => defmt::write!(f, "Chunked"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Method {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.as_str())
    }
}
