use criterion::{BatchSize, Criterion, Throughput};
use libiot_http::network::application::http::{
    Config, Launcher, NativeClient, Transport, TransportConfig,
};
use libiot_http::network::error::NativeError;
use libiot_http::system::platform::Platform;
use libiot_http::system::watchdog::NoWatchdog;
use std::hint::black_box;

const BODY_LEN: usize = 64 * 1024;

/// In-memory transport serving a fixed body after `redirects` hops.
struct MemoryTransport {
    body: Vec<u8>,
    chunked: bool,
    redirects: usize,
}

struct MemoryClient<'a> {
    body: &'a [u8],
    chunked: bool,
    redirects_left: usize,
    pos: usize,
}

impl<'t> Transport for &'t MemoryTransport {
    type Client = MemoryClient<'t>;

    fn init(&self, _config: &TransportConfig<'_>) -> Option<Self::Client> {
        let transport: &'t MemoryTransport = *self;
        Some(MemoryClient {
            body: &transport.body,
            chunked: transport.chunked,
            redirects_left: transport.redirects,
            pos: 0,
        })
    }
}

impl NativeClient for MemoryClient<'_> {
    fn set_header(&mut self, _name: &str, _value: &str) -> Result<(), NativeError> {
        Ok(())
    }

    fn open(&mut self, _write_len: usize) -> Result<(), NativeError> {
        self.pos = 0;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> isize {
        buf.len() as isize
    }

    fn fetch_headers(&mut self) -> i64 {
        if self.chunked {
            -1
        } else {
            self.body.len() as i64
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> isize {
        let n = buf.len().min(self.body.len() - self.pos);
        buf[..n].copy_from_slice(&self.body[self.pos..self.pos + n]);
        self.pos += n;
        n as isize
    }

    fn status_code(&self) -> i32 {
        if self.redirects_left > 0 { 302 } else { 200 }
    }

    fn set_redirection(&mut self) -> Result<(), NativeError> {
        self.redirects_left -= 1;
        Ok(())
    }

    fn close(&mut self) {}

    fn cleanup(self) {}
}

struct HostPlatform;

impl Platform for HostPlatform {
    fn is_connected(&self) -> bool {
        true
    }

    fn millis(&self) -> u32 {
        0
    }

    fn status_momentary_error(&self, _name: &str, _length_ms: u32) {}
}

fn read_all(transport: &MemoryTransport, config: Config) -> usize {
    let launcher = Launcher::new(transport, HostPlatform, NoWatchdog, config);
    let mut session = launcher
        .get("http://bench.local/blob", &[])
        .expect("Failed to start request");
    let mut buf = [0u8; 512];
    let mut total = 0;
    loop {
        match session.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => total += black_box(n),
            Err(err) => panic!("Failed to read: {}", err),
        }
    }
    session.end();
    total
}

fn bench_body(c: &mut Criterion, group_name: &str, chunked: bool, redirects: usize) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Bytes(BODY_LEN as u64));
    group.bench_function(group_name, |b| {
        b.iter_batched_ref(
            || MemoryTransport {
                body: vec![0xA5; BODY_LEN],
                chunked,
                redirects,
            },
            |transport| {
                let total = read_all(transport, Config::default().with_redirects(true, 5));
                assert_eq!(total, BODY_LEN);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_known_length_read(c: &mut Criterion) {
    bench_body(c, "known_length_read", false, 0);
}

pub fn bench_chunked_read(c: &mut Criterion) {
    bench_body(c, "chunked_read", true, 0);
}

pub fn bench_redirect_chain(c: &mut Criterion) {
    bench_body(c, "redirect_chain", false, 3);
}
