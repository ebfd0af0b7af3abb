use super::transport::NativeClient;
use super::{ContentLength, ReadError, Status, TAG};
use crate::system::platform::Platform;
use crate::system::watchdog::{Watchdog, WatchdogManager, feed_wdt};
use core::fmt;

/// A response being streamed from the server.
///
/// The session owns the native client handle. The handle is released exactly
/// once: by [`Session::end`], or when the session is dropped if `end` was never
/// called.
pub struct Session<'a, C: NativeClient, P: Platform + ?Sized, W: Watchdog + ?Sized> {
    client: Option<C>,
    platform: &'a P,
    watchdog: &'a W,
    watchdog_timeout_ms: u32,
    status: Status,
    content_length: ContentLength,
    bytes_read: usize,
    duration_ms: u32,
    secure: bool,
}

impl<C: NativeClient, P: Platform + ?Sized, W: Watchdog + ?Sized> fmt::Debug
    for Session<'_, C, P, W>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("open", &self.client.is_some())
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("bytes_read", &self.bytes_read)
            .field("duration_ms", &self.duration_ms)
            .field("secure", &self.secure)
            .finish()
    }
}

impl<'a, C: NativeClient, P: Platform + ?Sized, W: Watchdog + ?Sized> Session<'a, C, P, W> {
    pub(crate) fn new(
        client: C,
        platform: &'a P,
        watchdog: &'a W,
        watchdog_timeout_ms: u32,
        secure: bool,
    ) -> Self {
        Self {
            client: Some(client),
            platform,
            watchdog,
            watchdog_timeout_ms,
            status: Status::ConnectionError,
            content_length: ContentLength::Chunked,
            bytes_read: 0,
            duration_ms: 0,
            secure,
        }
    }

    pub(crate) fn set_response(
        &mut self,
        status: Status,
        content_length: ContentLength,
        duration_ms: u32,
    ) {
        self.status = status;
        self.content_length = content_length;
        self.duration_ms = duration_ms;
    }

    /// Response status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Raw response status, `-1` for a connection error.
    pub fn status_code(&self) -> i32 {
        self.status.code()
    }

    /// Whether the response status is `2xx`.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Announced body length.
    pub fn content_length(&self) -> ContentLength {
        self.content_length
    }

    /// Body bytes handed out so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Body bytes still expected, `None` for chunked bodies.
    pub fn remaining(&self) -> Option<usize> {
        match self.content_length {
            ContentLength::Known(total) => Some(total.saturating_sub(self.bytes_read)),
            ContentLength::Chunked => None,
        }
    }

    /// Milliseconds spent in the transport: the request itself plus every read.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Whether the request URL used TLS.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Whether the native handle is still held.
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Reads the next part of the body into `buf`.
    ///
    /// Returns the number of bytes read. `Ok(0)` marks the end of the body:
    /// for a known length it is returned without touching the transport once
    /// every byte was delivered, for a chunked body it is whatever the
    /// transport reports at the end.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        let Some(client) = self.client.as_mut() else {
            log::error!(target: TAG, "Attempted to read from a closed session");
            return Err(ReadError::UseAfterClose);
        };

        let bound = match self.content_length {
            ContentLength::Known(total) => buf.len().min(total.saturating_sub(self.bytes_read)),
            ContentLength::Chunked => buf.len(),
        };
        if bound == 0 {
            return Ok(0);
        }

        let start = self.platform.millis();
        let _wdm = WatchdogManager::new(self.watchdog, self.watchdog_timeout_ms);

        feed_wdt(self.watchdog);
        let read_len = client.read(&mut buf[..bound]);
        feed_wdt(self.watchdog);

        self.duration_ms = self
            .duration_ms
            .wrapping_add(self.platform.millis().wrapping_sub(start));

        if read_len < 0 {
            return Err(ReadError::Transport(read_len));
        }
        let read_len = (read_len as usize).min(bound);
        self.bytes_read += read_len;
        Ok(read_len)
    }

    /// Closes the connection and releases the handle.
    ///
    /// Calling `end` again, or dropping the session afterwards, does nothing.
    pub fn end(&mut self) {
        let Some(mut client) = self.client.take() else {
            return;
        };
        let _wdm = WatchdogManager::new(self.watchdog, self.watchdog_timeout_ms);

        client.close();
        feed_wdt(self.watchdog);
        client.cleanup();
    }
}

impl<C: NativeClient, P: Platform + ?Sized, W: Watchdog + ?Sized> Drop for Session<'_, C, P, W> {
    fn drop(&mut self) {
        if let Some(mut client) = self.client.take() {
            client.close();
            client.cleanup();
        }
    }
}
