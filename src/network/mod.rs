//! Network layer for embedded HTTP clients
//!
//! This module holds the error codes shared with the native transport and the
//! application protocol clients built on top of it.

#![deny(unsafe_code)]

/// Native error codes reported by transports
pub mod error;

/// Application layer protocol clients
pub mod application;

/// Re-exports of the types most callers need
pub mod prelude {
    pub use super::application::http::{
        Config, ContentLength, Header, Launcher, Method, NativeClient, Session, Status, Transport,
    };
    pub use super::error::NativeError;
}
