//! Task watchdog integration.
//!
//! Long blocking network calls must not starve the task watchdog. Two tools
//! are provided:
//!
//! - [`WatchdogManager`], a scoped guard that extends the watchdog timeout for
//!   as long as it is alive and restores the previous timeout on drop
//! - [`feed_wdt`], which resets the deadline immediately if the calling task
//!   is watched at all
//!
//! # Examples
//!
//! ```rust
//! use core::cell::Cell;
//! use libiot_http::system::watchdog::{feed_wdt, Watchdog, WatchdogManager};
//!
//! struct TaskWdt {
//!     timeout_ms: Cell<u32>,
//!     feeds: Cell<u32>,
//! }
//!
//! impl Watchdog for TaskWdt {
//!     fn timeout_ms(&self) -> u32 { self.timeout_ms.get() }
//!     fn set_timeout_ms(&self, timeout_ms: u32) { self.timeout_ms.set(timeout_ms) }
//!     fn is_task_registered(&self) -> bool { true }
//!     fn feed(&self) { self.feeds.set(self.feeds.get() + 1) }
//! }
//!
//! let wdt = TaskWdt { timeout_ms: Cell::new(5_000), feeds: Cell::new(0) };
//! {
//!     let _guard = WatchdogManager::new(&wdt, 15_000);
//!     assert_eq!(wdt.timeout_ms(), 15_000);
//!     feed_wdt(&wdt);
//! }
//! assert_eq!(wdt.timeout_ms(), 5_000);
//! assert_eq!(wdt.feeds.get(), 1);
//! ```

/// A task watchdog as seen by the HTTP client.
///
/// Methods take `&self` because the watchdog is a process-wide service shared
/// by the launcher and every session it hands out. Implementations use
/// interior mutability or call straight into the platform.
pub trait Watchdog {
    /// Current timeout in milliseconds. Zero means no timeout is configured.
    fn timeout_ms(&self) -> u32;

    /// Reconfigure the timeout.
    fn set_timeout_ms(&self, timeout_ms: u32);

    /// Whether the calling task is subscribed to the watchdog.
    fn is_task_registered(&self) -> bool;

    /// Reset the deadline of the calling task.
    fn feed(&self);
}

/// A watchdog for platforms that have none. Every operation is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn timeout_ms(&self) -> u32 {
        0
    }

    fn set_timeout_ms(&self, _timeout_ms: u32) {}

    fn is_task_registered(&self) -> bool {
        false
    }

    fn feed(&self) {}
}

/// Feed the watchdog if the calling task is registered with it.
///
/// Feeding from an unregistered task is not an error; it simply does nothing.
pub fn feed_wdt<W: Watchdog + ?Sized>(watchdog: &W) {
    if watchdog.is_task_registered() {
        watchdog.feed();
    }
}

/// Scoped watchdog timeout extension.
///
/// On construction the timeout is raised to `timeout_ms` if that is longer
/// than the one currently configured. On drop the timeout found at
/// construction is put back. A guard that did not change anything restores
/// nothing, so nested guards compose: an inner guard asking for less time
/// than an outer one leaves the outer deadline alone, and a request of `0`
/// never touches the configuration.
#[derive(Debug)]
#[must_use = "the timeout is restored as soon as the guard is dropped"]
pub struct WatchdogManager<'a, W: Watchdog + ?Sized> {
    watchdog: &'a W,
    saved_timeout_ms: Option<u32>,
}

impl<'a, W: Watchdog + ?Sized> WatchdogManager<'a, W> {
    /// Extend the watchdog timeout to at least `timeout_ms` for the lifetime
    /// of the returned guard.
    pub fn new(watchdog: &'a W, timeout_ms: u32) -> Self {
        let current = watchdog.timeout_ms();
        let saved_timeout_ms = if timeout_ms > current {
            log::trace!(target: "watchdog", "Adjusting WDT to {}ms (was {}ms)", timeout_ms, current);
            watchdog.set_timeout_ms(timeout_ms);
            Some(current)
        } else {
            None
        };
        Self {
            watchdog,
            saved_timeout_ms,
        }
    }

    /// Whether this guard changed the timeout and will restore it on drop.
    pub fn is_extending(&self) -> bool {
        self.saved_timeout_ms.is_some()
    }
}

impl<W: Watchdog + ?Sized> Drop for WatchdogManager<'_, W> {
    fn drop(&mut self) {
        if let Some(previous) = self.saved_timeout_ms.take() {
            log::trace!(target: "watchdog", "Restoring WDT to {}ms", previous);
            self.watchdog.set_timeout_ms(previous);
        }
    }
}
