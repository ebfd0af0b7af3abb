use super::transport::{AuthType, NativeClient, Transport, TransportConfig};
use super::{Config, ContentLength, Error, Header, Method, Session, Status, TAG, is_secure_url};
use crate::system::platform::Platform;
use crate::system::watchdog::{Watchdog, WatchdogManager, feed_wdt};
use core::fmt;

/// Status reported to the platform on every failed request.
const STATUS_FAILED: &str = "failed";
/// How long the failure status is shown, in milliseconds.
const STATUS_FAILED_MS: u32 = 1000;

/// Status line and length of the response the transport is positioned on.
#[derive(Debug, Clone, Copy)]
struct ResponseHead {
    status: Status,
    content_length: ContentLength,
}

/// How the request/redirect exchange ended while the handle is still alive.
enum Outcome {
    /// A `2xx` response.
    Success(ResponseHead),
    /// Any other HTTP status once no more redirects will be followed.
    Failed(ResponseHead),
}

/// Issues HTTP requests through a native transport.
///
/// A launcher owns the transport factory, the platform services and the
/// watchdog. Each call to [`Launcher::start`] produces an independent
/// [`Session`] that borrows the platform and watchdog for its lifetime.
pub struct Launcher<T: Transport, P: Platform, W: Watchdog> {
    transport: T,
    platform: P,
    watchdog: W,
    config: Config,
}

impl<T: Transport, P: Platform, W: Watchdog> fmt::Debug for Launcher<T, P, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, P: Platform, W: Watchdog> Launcher<T, P, W> {
    /// Creates a launcher.
    pub fn new(transport: T, platform: P, watchdog: W, config: Config) -> Self {
        Self {
            transport,
            platform,
            watchdog,
            config,
        }
    }

    /// The launcher configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transport factory.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The platform services.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The task watchdog.
    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }

    /// Logs the effective configuration.
    pub fn dump_config(&self) {
        log::info!(target: TAG, "HTTP Request:");
        log::info!(target: TAG, "  Timeout: {}ms", self.config.timeout_ms);
        log::info!(target: TAG, "  User-Agent: {}", self.config.user_agent.as_deref().unwrap_or("(none)"));
        log::info!(target: TAG, "  Follow redirects: {}", self.config.follow_redirects);
        log::info!(target: TAG, "  Redirect limit: {}", self.config.redirect_limit);
        log::info!(target: TAG, "  URL credentials: {}", self.config.url_credentials);
        log::info!(target: TAG, "  Watchdog timeout: {}ms", self.config.watchdog_timeout_ms);
        log::info!(target: TAG, "  Buffer Size RX: {}", self.config.buffer_size_rx);
        log::info!(target: TAG, "  Buffer Size TX: {}", self.config.buffer_size_tx);
    }

    /// Shorthand for a `GET` request.
    pub fn get(&self, url: &str, headers: &[Header]) -> Result<Session<'_, T::Client, P, W>, Error> {
        self.start(url, Method::Get.as_str(), &[], headers)
    }

    /// Shorthand for a `POST` request.
    pub fn post(
        &self,
        url: &str,
        body: &[u8],
        headers: &[Header],
    ) -> Result<Session<'_, T::Client, P, W>, Error> {
        self.start(url, Method::Post.as_str(), body, headers)
    }

    /// Sends a request and positions the returned session at the start of the
    /// response body.
    ///
    /// Redirects are followed up to the configured limit. The returned session
    /// is either a `2xx` response, or the last non-success response when no
    /// further redirect applies; check [`Session::is_success`]. Such failed
    /// responses keep their connection open so an error body can still be
    /// read.
    ///
    /// Any [`Error`] means no native handle is alive.
    pub fn start(
        &self,
        url: &str,
        method: &str,
        body: &[u8],
        headers: &[Header],
    ) -> Result<Session<'_, T::Client, P, W>, Error> {
        if !self.platform.is_connected() {
            return Err(self.fail(url, Error::NotConnected));
        }

        let method: Method = method.parse().map_err(|err| self.fail(url, err))?;

        self.config
            .validate()
            .map_err(|err| self.fail(url, Error::InvalidConfig(err)))?;

        let secure = is_secure_url(url);

        let transport_config = TransportConfig {
            url,
            method,
            timeout_ms: self.config.timeout_ms,
            disable_auto_redirect: true,
            max_redirection_count: self.config.redirect_limit,
            auth_type: if self.config.url_credentials {
                AuthType::Basic
            } else {
                AuthType::None
            },
            attach_certificate_bundle: secure && self.platform.has_certificate_bundle(),
            user_agent: self.config.user_agent.as_deref(),
            buffer_size_rx: self.config.buffer_size_rx,
            buffer_size_tx: self.config.buffer_size_tx,
        };

        let start = self.platform.millis();
        let _wdm = WatchdogManager::new(&self.watchdog, self.config.watchdog_timeout_ms);

        let Some(mut client) = self.transport.init(&transport_config) else {
            return Err(self.fail(url, Error::InitFailed));
        };

        self.apply_headers(&mut client, headers);

        let outcome = match self.exchange(&mut client, body) {
            Ok(outcome) => outcome,
            Err(err) => {
                client.cleanup();
                return Err(self.fail(url, err));
            }
        };

        let duration_ms = self.platform.millis().wrapping_sub(start);
        let mut session = Session::new(
            client,
            &self.platform,
            &self.watchdog,
            self.config.watchdog_timeout_ms,
            secure,
        );

        match outcome {
            Outcome::Success(head) => {
                session.set_response(head.status, head.content_length, duration_ms);
            }
            Outcome::Failed(head) => {
                // The handle stays with the session so the error body can be read.
                log::error!(target: TAG, "HTTP Request failed; URL: {}; Code: {}", url, head.status.code());
                self.platform
                    .status_momentary_error(STATUS_FAILED, STATUS_FAILED_MS);
                session.set_response(head.status, head.content_length, duration_ms);
            }
        }

        Ok(session)
    }

    fn apply_headers(&self, client: &mut T::Client, headers: &[Header]) {
        let auth = self.config.basic_auth.as_ref().and_then(|auth| auth.header());
        for header in auth.iter().chain(headers) {
            if let Err(err) = client.set_header(&header.name, &header.value) {
                log::warn!(target: TAG, "Could not set header {}: {}", header.name.as_str(), err);
            }
        }
    }

    /// Open, send the body, read the response and follow redirects. On `Err`
    /// the caller still owns the handle and must release it.
    fn exchange(&self, client: &mut T::Client, body: &[u8]) -> Result<Outcome, Error> {
        client.open(body.len()).map_err(Error::OpenFailed)?;

        if !body.is_empty() {
            self.write_body(client, body)?;
        }

        let mut head = self.fetch_response(client)?;

        if head.status.is_success() {
            return Ok(Outcome::Success(head));
        }

        if head.status == Status::ConnectionError {
            return Err(Error::ConnectionError {
                status: head.status.code(),
            });
        }

        if self.config.follow_redirects {
            let mut remaining = self.config.redirect_limit;
            while head.status.is_redirect() && remaining > 0 {
                feed_wdt(&self.watchdog);
                client
                    .set_redirection()
                    .map_err(Error::RedirectResolutionFailed)?;
                if let Some(target) = client.url() {
                    log::trace!(target: TAG, "Redirecting to URL: {}", target);
                }

                client.open(0).map_err(Error::RedirectOpenFailed)?;

                head = self.fetch_response(client)?;
                if head.status.is_success() {
                    return Ok(Outcome::Success(head));
                }
                if head.status == Status::ConnectionError {
                    return Err(Error::ConnectionError {
                        status: head.status.code(),
                    });
                }

                remaining -= 1;
            }

            if remaining == 0 && head.status.is_redirect() {
                log::warn!(target: TAG, "Reached redirect limit count={}", self.config.redirect_limit);
            }
        }

        Ok(Outcome::Failed(head))
    }

    fn write_body(&self, client: &mut T::Client, body: &[u8]) -> Result<(), Error> {
        let mut written = 0;
        while written < body.len() {
            // Slow links can take many rounds.
            feed_wdt(&self.watchdog);
            let n = client.write(&body[written..]);
            // A write that accepts nothing would otherwise spin while feeding the watchdog.
            if n <= 0 {
                return Err(Error::WriteFailed);
            }
            written += (n as usize).min(body.len() - written);
        }
        Ok(())
    }

    fn fetch_response(&self, client: &mut T::Client) -> Result<ResponseHead, Error> {
        feed_wdt(&self.watchdog);
        let content_length =
            ContentLength::from_raw(client.fetch_headers()).ok_or(Error::HeaderFetchFailed)?;
        feed_wdt(&self.watchdog);
        let status = Status::from_raw(client.status_code());
        feed_wdt(&self.watchdog);
        Ok(ResponseHead {
            status,
            content_length,
        })
    }

    fn fail(&self, url: &str, err: Error) -> Error {
        log::error!(target: TAG, "HTTP Request failed; URL: {}; {}", url, err);
        self.platform
            .status_momentary_error(STATUS_FAILED, STATUS_FAILED_MS);
        err
    }
}
