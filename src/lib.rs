//! # libiot-http - streaming HTTP requests for IoT devices
//!
//! An HTTP client layer for embedded devices whose firmware runs under a task
//! watchdog. It sits on top of the device's native HTTP stack and adds what
//! that stack leaves to the application: request validation, watchdog feeding
//! during long transfers, manual redirect handling and exactly-once cleanup of
//! the native client handle.
//!
//! ## Features
//!
//! ### Requests
//! - **Launcher**: validates and sends one request, follows redirects
//! - **Session**: streams the response body in caller-sized chunks
//! - Known-length and chunked bodies
//! - Failed responses stay readable, so error pages can be inspected
//!
//! ### System Services
//! - Task watchdog guard that extends and restores the timeout
//! - Platform trait for connectivity, time and status reporting
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libiot-http = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use libiot_http::network::application::http::{Config, Header, Launcher};
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
//! let headers = [Header::new("Content-Type", "application/json").unwrap()];
//! match launcher.post("http://192.168.1.10/api/readings", br#"{"t":23.5}"#, &headers) {
//!     Ok(session) if session.is_success() => { /* read the body */ }
//!     Ok(session) => { /* server answered with session.status_code() */ }
//!     Err(_err) => { /* no response, nothing to clean up */ }
//! }
//! ```
//!
//! ## Platform Support
//!
//! The crate is `no_std` and does not allocate. It works on any target where
//! a native HTTP client can be wrapped in the [`Transport`] trait.
//!
//! [`Transport`]: network::application::http::Transport
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (adds a `std` clock helper)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![doc(html_root_url = "https://shishir-dey.github.io/libiot/")]

/// Network layer: native error codes and the HTTP client.
///
/// The HTTP client issues requests through a vendor transport and streams
/// responses back in bounded chunks.
pub mod network;

/// System services the HTTP client relies on.
///
/// Contains the task watchdog integration and the platform trait.
pub mod system;
