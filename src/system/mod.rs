//! System services for embedded devices.
//!
//! The HTTP client needs a handful of services from the device it runs on.
//! They are modelled as traits so that firmware, host tools and tests can
//! each plug in their own implementation.
//!
//! # Available Services
//!
//! - **[`watchdog`]**: task watchdog trait, scoped timeout guard and feeding helper
//! - **[`platform`]**: connectivity, time and status reporting
//!
//! # Usage
//!
//! ```rust
//! use libiot_http::system::platform::Platform;
//!
//! struct Board;
//!
//! impl Platform for Board {
//!     fn is_connected(&self) -> bool { true }
//!     fn millis(&self) -> u32 { 0 }
//!     fn status_momentary_error(&self, _name: &str, _length_ms: u32) {}
//! }
//!
//! assert!(!Board.has_certificate_bundle());
//! ```

/// Task watchdog trait, scoped guard and feeding helper.
pub mod watchdog;

/// Platform services: connectivity, clock and status reporting.
pub mod platform;
