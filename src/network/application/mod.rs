//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) clients built on top of a native transport.
//!
//! ## Available Protocols
//!
//! - **[`http`]**: streaming HTTP request sessions with manual redirect handling
//!
//! ## Design Principles
//!
//! - **Transport Agnostic**: the wire work is delegated to a [`http::Transport`]
//!   implementation, usually a thin wrapper over the vendor HTTP stack
//! - **No-std Compatible**: no heap allocation, fixed-size strings
//! - **Watchdog Aware**: every blocking call is made under a task watchdog guard

/// HTTP request launcher and response sessions.
///
/// Provides [`http::Launcher`], which issues one request per call and hands back
/// a [`http::Session`] that streams the response body.
pub mod http;
