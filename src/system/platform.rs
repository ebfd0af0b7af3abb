//! Platform services consumed by the HTTP client.

/// Platform-specific services.
///
/// This trait must be implemented by the target platform. It answers the
/// questions the HTTP client asks before and while running a request: is the
/// network up, what time is it, and where should transient failures be
/// reported.
pub trait Platform {
    /// Whether the device currently has network connectivity.
    fn is_connected(&self) -> bool;

    /// Milliseconds since an arbitrary fixed point. Allowed to wrap.
    fn millis(&self) -> u32;

    /// Report a momentary degraded state, e.g. flash a status LED.
    ///
    /// This is a side channel only. The HTTP client never depends on what the
    /// platform does with it.
    fn status_momentary_error(&self, name: &str, length_ms: u32);

    /// Whether a trusted CA certificate bundle is compiled into the firmware.
    fn has_certificate_bundle(&self) -> bool {
        false
    }
}

/// Monotonic millisecond clock backed by [`std::time::Instant`].
///
/// Handy for [`Platform::millis`] on hosted targets.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created, wrapping at `u32::MAX`.
    pub fn millis(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}
