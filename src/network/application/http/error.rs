use super::ConfigError;
use crate::network::error::NativeError;
use core::fmt;

/// Why a request could not produce a [`Session`](super::Session).
///
/// Every variant means no native handle is left alive: either none was ever
/// allocated, or it was released before the error was returned. A request
/// that reached the server but ended on a non-success status is *not* an
/// error; it yields a session whose body can still be read.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The device has no network connectivity.
    NotConnected,
    /// The method is not one of GET, POST, PUT, DELETE or PATCH.
    UnsupportedMethod,
    /// The launcher configuration cannot be handed to the transport.
    InvalidConfig(ConfigError),
    /// The transport could not allocate a client.
    InitFailed,
    /// Opening the connection failed.
    OpenFailed(NativeError),
    /// Sending the request body failed.
    WriteFailed,
    /// Reading the response headers failed.
    HeaderFetchFailed,
    /// Headers were fetched but the transport reports no HTTP status.
    ConnectionError {
        /// Raw status reported by the transport.
        status: i32,
    },
    /// The redirect target could not be resolved from the response.
    RedirectResolutionFailed(NativeError),
    /// Opening the connection to a redirect target failed.
    RedirectOpenFailed(NativeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotConnected => f.write_str("not connected to network"),
            Error::UnsupportedMethod => f.write_str("unsupported method"),
            Error::InvalidConfig(err) => write!(f, "invalid configuration: {}", err),
            Error::InitFailed => f.write_str("could not initialize client"),
            Error::OpenFailed(err) => write!(f, "open failed: {}", err),
            Error::WriteFailed => f.write_str("writing request body failed"),
            Error::HeaderFetchFailed => f.write_str("failed while fetching headers"),
            Error::ConnectionError { status } => write!(f, "connection error; code: {}", status),
            Error::RedirectResolutionFailed(err) => write!(f, "set redirection failed: {}", err),
            Error::RedirectOpenFailed(err) => write!(f, "open after redirect failed: {}", err),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotConnected => defmt::write!(f, "NotConnected"),
            Error::UnsupportedMethod => defmt::write!(f, "UnsupportedMethod"),
            Error::InvalidConfig(err) => defmt::write!(f, "InvalidConfig({})", err),
            Error::InitFailed => defmt::write!(f, "InitFailed"),
            Error::OpenFailed(err) => defmt::write!(f, "OpenFailed({})", err),
            Error::WriteFailed => defmt::write!(f, "WriteFailed"),
            Error::HeaderFetchFailed => defmt::write!(f, "HeaderFetchFailed"),
            Error::ConnectionError { status } => defmt::write!(f, "ConnectionError({})", status),
            Error::RedirectResolutionFailed(err) => {
                defmt::write!(f, "RedirectResolutionFailed({})", err)
            }
            Error::RedirectOpenFailed(err) => defmt::write!(f, "RedirectOpenFailed({})", err),
        }
    }
}

/// Why [`Session::read`](super::Session::read) returned no data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReadError {
    /// The session was already ended.
    UseAfterClose,
    /// The transport reported a negative read result, kept as-is.
    Transport(isize),
}

impl ReadError {
    /// The negative value a native read would have returned.
    pub fn code(&self) -> isize {
        match self {
            ReadError::UseAfterClose => -1,
            ReadError::Transport(code) => *code,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::UseAfterClose => f.write_str("read from a closed session"),
            ReadError::Transport(code) => write!(f, "transport read failed: {}", code),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReadError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ReadError::UseAfterClose => defmt::write!(f, "UseAfterClose"),
            ReadError::Transport(code) => defmt::write!(f, "Transport({})", code),
        }
    }
}
