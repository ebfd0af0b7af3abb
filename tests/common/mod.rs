//! Scripted transport, platform and watchdog doubles for HTTP client tests

#![allow(dead_code)]

use libiot_http::network::application::http::{
    AuthType, Config, Launcher, Method, NativeClient, Transport, TransportConfig,
};
use libiot_http::network::error::NativeError;
use libiot_http::system::platform::Platform;
use libiot_http::system::watchdog::Watchdog;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One response the mock server sends, consumed by one `open`.
#[derive(Debug, Clone)]
pub struct Round {
    pub status: i32,
    pub content_length: i64,
    pub body: Vec<u8>,
}

impl Round {
    pub fn new(status: i32, body: &[u8]) -> Self {
        Self {
            status,
            content_length: body.len() as i64,
            body: body.to_vec(),
        }
    }

    pub fn chunked(status: i32, body: &[u8]) -> Self {
        Self {
            status,
            content_length: -1,
            body: body.to_vec(),
        }
    }

    pub fn redirect(status: i32) -> Self {
        Self::new(status, b"")
    }

    pub fn with_content_length(mut self, content_length: i64) -> Self {
        self.content_length = content_length;
        self
    }
}

/// What the mock transport does on each call.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub rounds: Vec<Round>,
    pub init_fails: bool,
    /// Fail the n-th `open` (0-based) with the given code.
    pub open_error: Option<(usize, NativeError)>,
    pub redirect_error: Option<NativeError>,
    /// Maximum bytes accepted by one `write`, 0 for unlimited.
    pub write_chunk: usize,
    /// Fail the n-th `write` (0-based).
    pub write_error_at: Option<usize>,
    /// Accept nothing from the n-th `write` (0-based) onwards.
    pub write_stall_at: Option<usize>,
    /// Maximum bytes returned by one `read`, 0 for unlimited.
    pub read_chunk: usize,
    pub read_error: Option<isize>,
    /// Clock advance charged for every open, header fetch and read.
    pub op_cost_ms: u32,
}

impl Script {
    pub fn rounds(rounds: Vec<Round>) -> Self {
        Self {
            rounds,
            ..Self::default()
        }
    }
}

/// Owned copy of the last transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenConfig {
    pub url: String,
    pub method: Method,
    pub timeout_ms: u32,
    pub disable_auto_redirect: bool,
    pub max_redirection_count: u16,
    pub auth_type: AuthType,
    pub attach_certificate_bundle: bool,
    pub user_agent: Option<String>,
    pub buffer_size_rx: usize,
    pub buffer_size_tx: usize,
}

/// State shared between the transport, its clients and the platform.
#[derive(Debug, Default)]
pub struct Shared {
    pub clock: Cell<u32>,
    pub inits: Cell<usize>,
    pub closes: Cell<usize>,
    pub cleanups: Cell<usize>,
    pub opens: RefCell<Vec<usize>>,
    pub writes: Cell<usize>,
    pub written: RefCell<Vec<u8>>,
    pub reads: Cell<usize>,
    pub redirections: Cell<usize>,
    pub headers: RefCell<Vec<(String, String)>>,
    pub config: RefCell<Option<SeenConfig>>,
    pub statuses: RefCell<Vec<(String, u32)>>,
}

impl Shared {
    pub fn advance(&self, ms: u32) {
        self.clock.set(self.clock.get().wrapping_add(ms));
    }

    /// Handles allocated and not yet released.
    pub fn live_handles(&self) -> usize {
        self.inits.get() - self.cleanups.get()
    }
}

#[derive(Debug)]
pub struct MockTransport {
    pub shared: Rc<Shared>,
    pub script: Rc<Script>,
}

impl Transport for MockTransport {
    type Client = MockClient;

    fn init(&self, config: &TransportConfig<'_>) -> Option<MockClient> {
        *self.shared.config.borrow_mut() = Some(SeenConfig {
            url: config.url.to_string(),
            method: config.method,
            timeout_ms: config.timeout_ms,
            disable_auto_redirect: config.disable_auto_redirect,
            max_redirection_count: config.max_redirection_count,
            auth_type: config.auth_type,
            attach_certificate_bundle: config.attach_certificate_bundle,
            user_agent: config.user_agent.map(str::to_string),
            buffer_size_rx: config.buffer_size_rx,
            buffer_size_tx: config.buffer_size_tx,
        });
        if self.script.init_fails {
            return None;
        }
        self.shared.inits.set(self.shared.inits.get() + 1);
        Some(MockClient {
            shared: Rc::clone(&self.shared),
            script: Rc::clone(&self.script),
            url: config.url.to_string(),
            round: None,
            opens: 0,
            body_pos: 0,
        })
    }
}

#[derive(Debug)]
pub struct MockClient {
    shared: Rc<Shared>,
    script: Rc<Script>,
    url: String,
    round: Option<usize>,
    opens: usize,
    body_pos: usize,
}

impl MockClient {
    fn current(&self) -> &Round {
        let index = self.round.expect("no request opened");
        &self.script.rounds[index.min(self.script.rounds.len() - 1)]
    }
}

impl NativeClient for MockClient {
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), NativeError> {
        self.shared
            .headers
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn open(&mut self, write_len: usize) -> Result<(), NativeError> {
        let attempt = self.opens;
        self.opens += 1;
        self.shared.opens.borrow_mut().push(write_len);
        self.shared.advance(self.script.op_cost_ms);
        if let Some((at, err)) = self.script.open_error {
            if at == attempt {
                return Err(err);
            }
        }
        self.round = Some(attempt);
        self.body_pos = 0;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> isize {
        let attempt = self.shared.writes.get();
        self.shared.writes.set(attempt + 1);
        if self.script.write_error_at == Some(attempt) {
            return -1;
        }
        if self.script.write_stall_at.is_some_and(|at| attempt >= at) {
            return 0;
        }
        let n = if self.script.write_chunk == 0 {
            buf.len()
        } else {
            buf.len().min(self.script.write_chunk)
        };
        self.shared.written.borrow_mut().extend_from_slice(&buf[..n]);
        n as isize
    }

    fn fetch_headers(&mut self) -> i64 {
        self.shared.advance(self.script.op_cost_ms);
        self.current().content_length
    }

    fn read(&mut self, buf: &mut [u8]) -> isize {
        self.shared.reads.set(self.shared.reads.get() + 1);
        self.shared.advance(self.script.op_cost_ms);
        if let Some(code) = self.script.read_error {
            return code;
        }
        let body = self.current().body.clone();
        let left = body.len() - self.body_pos;
        let mut n = buf.len().min(left);
        if self.script.read_chunk > 0 {
            n = n.min(self.script.read_chunk);
        }
        buf[..n].copy_from_slice(&body[self.body_pos..self.body_pos + n]);
        self.body_pos += n;
        n as isize
    }

    fn status_code(&self) -> i32 {
        self.current().status
    }

    fn set_redirection(&mut self) -> Result<(), NativeError> {
        let hop = self.shared.redirections.get() + 1;
        self.shared.redirections.set(hop);
        if let Some(err) = self.script.redirect_error {
            return Err(err);
        }
        self.url = format!("http://mock.local/hop/{}", hop);
        Ok(())
    }

    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }

    fn close(&mut self) {
        self.shared.closes.set(self.shared.closes.get() + 1);
    }

    fn cleanup(self) {
        self.shared.cleanups.set(self.shared.cleanups.get() + 1);
    }
}

#[derive(Debug)]
pub struct MockPlatform {
    pub shared: Rc<Shared>,
    pub connected: bool,
    pub certificate_bundle: bool,
}

impl Platform for MockPlatform {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn millis(&self) -> u32 {
        self.shared.clock.get()
    }

    fn status_momentary_error(&self, name: &str, length_ms: u32) {
        self.shared
            .statuses
            .borrow_mut()
            .push((name.to_string(), length_ms));
    }

    fn has_certificate_bundle(&self) -> bool {
        self.certificate_bundle
    }
}

#[derive(Debug, Default)]
pub struct MockWatchdog {
    pub timeout_ms: Cell<u32>,
    pub unregistered: bool,
    pub feeds: Cell<usize>,
    pub max_timeout_ms: Cell<u32>,
}

impl Watchdog for MockWatchdog {
    fn timeout_ms(&self) -> u32 {
        self.timeout_ms.get()
    }

    fn set_timeout_ms(&self, timeout_ms: u32) {
        self.max_timeout_ms
            .set(self.max_timeout_ms.get().max(timeout_ms));
        self.timeout_ms.set(timeout_ms);
    }

    fn is_task_registered(&self) -> bool {
        !self.unregistered
    }

    fn feed(&self) {
        self.feeds.set(self.feeds.get() + 1);
    }
}

pub type MockLauncher = Launcher<MockTransport, MockPlatform, MockWatchdog>;

/// A launcher running `script` with full control over the platform doubles.
pub fn build_launcher(
    script: Script,
    config: Config,
    connected: bool,
    watchdog: MockWatchdog,
) -> (MockLauncher, Rc<Shared>) {
    let shared = Rc::new(Shared::default());
    let launcher = Launcher::new(
        MockTransport {
            shared: Rc::clone(&shared),
            script: Rc::new(script),
        },
        MockPlatform {
            shared: Rc::clone(&shared),
            connected,
            certificate_bundle: true,
        },
        watchdog,
        config,
    );
    (launcher, shared)
}

/// A connected launcher running `script` with `config`.
pub fn launcher_with(script: Script, config: Config) -> (MockLauncher, Rc<Shared>) {
    build_launcher(script, config, true, MockWatchdog::default())
}

pub fn launcher(script: Script) -> (MockLauncher, Rc<Shared>) {
    launcher_with(script, Config::default())
}

/// Reads the whole body in `chunk`-sized calls.
pub fn drain<C, P, W>(
    session: &mut libiot_http::network::application::http::Session<'_, C, P, W>,
    chunk: usize,
) -> Vec<u8>
where
    C: NativeClient,
    P: Platform + ?Sized,
    W: Watchdog + ?Sized,
{
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        match session.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(err) => panic!("read failed: {:?}", err),
        }
    }
    out
}
