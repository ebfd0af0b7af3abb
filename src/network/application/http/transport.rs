//! The seam between the launcher and the vendor HTTP stack.
//!
//! The traits mirror the native client API closely: calls block until done or
//! until the native timeout fires, and several of them report failures as
//! negative integers rather than `Result`s. Interpreting those values is the
//! launcher's and the session's job.

use super::Method;
use crate::network::error::NativeError;

/// Authentication scheme the native client should answer challenges with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// No authentication.
    None,
    /// HTTP basic authentication, using credentials embedded in the URL.
    Basic,
}

/// Everything the native client needs to be initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig<'a> {
    /// Request URL.
    pub url: &'a str,
    /// Request method.
    pub method: Method,
    /// Network timeout in milliseconds.
    pub timeout_ms: u32,
    /// Always `true`: redirects are followed by the launcher, not the transport.
    pub disable_auto_redirect: bool,
    /// Redirect cap passed through for the native client's bookkeeping.
    pub max_redirection_count: u16,
    /// Authentication scheme.
    pub auth_type: AuthType,
    /// Attach the built-in CA certificate bundle for TLS validation.
    pub attach_certificate_bundle: bool,
    /// `User-Agent` header value.
    pub user_agent: Option<&'a str>,
    /// Receive buffer size in bytes.
    pub buffer_size_rx: usize,
    /// Transmit buffer size in bytes.
    pub buffer_size_tx: usize,
}

/// Factory for native clients.
pub trait Transport {
    /// Client handle produced by [`Transport::init`].
    type Client: NativeClient;

    /// Allocate a client for one request. `None` if allocation fails.
    fn init(&self, config: &TransportConfig<'_>) -> Option<Self::Client>;
}

/// A native HTTP client handle.
///
/// The handle is owned by exactly one party at a time. [`NativeClient::cleanup`]
/// consumes it, so a released handle cannot be touched again.
pub trait NativeClient {
    /// Add a request header. Called once per header, duplicates included.
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), NativeError>;

    /// Connect and send the request line and headers, announcing `write_len`
    /// bytes of body.
    fn open(&mut self, write_len: usize) -> Result<(), NativeError>;

    /// Send part of the request body. Returns the number of bytes written,
    /// negative on failure.
    fn write(&mut self, buf: &[u8]) -> isize;

    /// Read the response headers. Returns the content length, `-1` if it is
    /// not known (chunked), any other negative value on failure.
    fn fetch_headers(&mut self) -> i64;

    /// Read part of the response body. Returns the number of bytes read,
    /// `0` at the end of the body, negative on failure.
    fn read(&mut self, buf: &mut [u8]) -> isize;

    /// Status code of the last response, `-1` on a connection error.
    fn status_code(&self) -> i32;

    /// Point the client at the `Location` of the current redirect response.
    fn set_redirection(&mut self) -> Result<(), NativeError>;

    /// The URL the client currently targets.
    fn url(&self) -> Option<&str> {
        None
    }

    /// Close the connection. The handle stays allocated.
    fn close(&mut self);

    /// Release the handle and all resources behind it.
    fn cleanup(self);
}
