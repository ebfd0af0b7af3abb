//! Native error codes reported by the underlying HTTP transport

use core::fmt;

/// An error code returned by the native transport.
///
/// Transports built on top of a vendor HTTP stack report failures as plain
/// integers. This wrapper keeps the raw value for diagnostics and knows the
/// names of the codes commonly produced by ESP-IDF style stacks.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct NativeError(pub i32);

impl NativeError {
    /// Generic failure.
    pub const FAIL: NativeError = NativeError(-1);
    /// Out of memory.
    pub const NO_MEM: NativeError = NativeError(0x101);
    /// Invalid argument.
    pub const INVALID_ARG: NativeError = NativeError(0x102);
    /// Invalid state.
    pub const INVALID_STATE: NativeError = NativeError(0x103);
    /// Operation or feature not supported.
    pub const NOT_SUPPORTED: NativeError = NativeError(0x106);
    /// Operation timed out.
    pub const TIMEOUT: NativeError = NativeError(0x107);
    /// The redirect limit of the native client was exceeded.
    pub const HTTP_MAX_REDIRECT: NativeError = NativeError(0x7001);
    /// The native client could not connect to the server.
    pub const HTTP_CONNECT: NativeError = NativeError(0x7002);
    /// Writing request data failed.
    pub const HTTP_WRITE_DATA: NativeError = NativeError(0x7003);
    /// Reading response headers failed.
    pub const HTTP_FETCH_HEADER: NativeError = NativeError(0x7004);
    /// No transport is registered for the URL scheme.
    pub const HTTP_INVALID_TRANSPORT: NativeError = NativeError(0x7005);
    /// A connection attempt is still in progress.
    pub const HTTP_CONNECTING: NativeError = NativeError(0x7006);
    /// The operation would block.
    pub const HTTP_EAGAIN: NativeError = NativeError(0x7007);
    /// The server closed the connection.
    pub const HTTP_CONNECTION_CLOSED: NativeError = NativeError(0x7008);

    /// Returns the raw native code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Returns the symbolic name of a well-known code.
    pub fn name(self) -> &'static str {
        match self {
            NativeError::FAIL => "ESP_FAIL",
            NativeError::NO_MEM => "ESP_ERR_NO_MEM",
            NativeError::INVALID_ARG => "ESP_ERR_INVALID_ARG",
            NativeError::INVALID_STATE => "ESP_ERR_INVALID_STATE",
            NativeError::NOT_SUPPORTED => "ESP_ERR_NOT_SUPPORTED",
            NativeError::TIMEOUT => "ESP_ERR_TIMEOUT",
            NativeError::HTTP_MAX_REDIRECT => "ESP_ERR_HTTP_MAX_REDIRECT",
            NativeError::HTTP_CONNECT => "ESP_ERR_HTTP_CONNECT",
            NativeError::HTTP_WRITE_DATA => "ESP_ERR_HTTP_WRITE_DATA",
            NativeError::HTTP_FETCH_HEADER => "ESP_ERR_HTTP_FETCH_HEADER",
            NativeError::HTTP_INVALID_TRANSPORT => "ESP_ERR_HTTP_INVALID_TRANSPORT",
            NativeError::HTTP_CONNECTING => "ESP_ERR_HTTP_CONNECTING",
            NativeError::HTTP_EAGAIN => "ESP_ERR_HTTP_EAGAIN",
            NativeError::HTTP_CONNECTION_CLOSED => "ESP_ERR_HTTP_CONNECTION_CLOSED",
            _ => "UNKNOWN ERROR",
        }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NativeError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ({})", self.name(), self.0)
    }
}
