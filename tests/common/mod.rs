#![allow(dead_code)]

use flatesink::{
    deflate::{Format, Preferences, PreferencesBuilder, CLEVEL_FAST, CLEVEL_MAX},
    Codec, Report, Result,
};
use rand::{distributions::Standard, rngs::SmallRng, Rng, SeedableRng};
use std::{cell::Cell, io, rc::Rc};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let rng = SmallRng::seed_from_u64(seed);
    rng.sample_iter(Standard).take(len).collect()
}

fn generate_data() -> impl Iterator<Item = Vec<u8>> {
    (0..14).map(|n| random_bytes(n as u64, 16 << n))
}

fn preferences_set() -> impl Iterator<Item = Preferences> {
    vec![
        PreferencesBuilder::new().build(),
        PreferencesBuilder::new().format(Format::Deflate).build(),
        PreferencesBuilder::new().format(Format::Zlib).build(),
        PreferencesBuilder::new().level(0).build(),
        PreferencesBuilder::new().level(CLEVEL_FAST).build(),
        PreferencesBuilder::new().level(CLEVEL_MAX).build(),
        PreferencesBuilder::new().buffer_size(1).build(),
        PreferencesBuilder::new()
            .format(Format::Zlib)
            .buffer_size(31)
            .build(),
    ]
    .into_iter()
}

pub fn deflate_test_set() -> impl Iterator<Item = (Vec<u8>, Preferences)> {
    generate_data()
        .map(|data| preferences_set().map(move |prefs| (data.clone(), prefs)))
        .flatten()
}

/// A sink that rejects every write.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub attempts: usize,
}

impl io::Write for FailingSink {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        Err(io::Error::new(io::ErrorKind::Other, "sink is broken"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that rejects the first `failures` writes and then records data.
#[derive(Debug, Default)]
pub struct FlakySink {
    pub failures: usize,
    pub attempts: usize,
    pub data: Vec<u8>,
}

impl FlakySink {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            ..Default::default()
        }
    }
}

impl io::Write for FlakySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        if self.failures > 0 {
            self.failures -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "flaky"));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that records data and gives up after `cap` writes.
#[derive(Debug, Default)]
pub struct CappedSink {
    pub cap: usize,
    pub writes: usize,
    pub data: Vec<u8>,
}

impl CappedSink {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            ..Default::default()
        }
    }
}

impl io::Write for CappedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        if self.writes > self.cap {
            return Err(io::Error::new(io::ErrorKind::Other, "too many writes"));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that accepts every write but fails to flush.
#[derive(Debug, Default)]
pub struct UnflushableSink {
    pub flushes: usize,
    pub data: Vec<u8>,
}

impl io::Write for UnflushableSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Err(io::Error::new(io::ErrorKind::WriteZero, "cannot flush"))
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Calls {
    pub feed: usize,
    pub produce: usize,
    pub finalize: usize,
    pub sync: usize,
    pub release: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.feed + self.produce + self.finalize + self.sync + self.release
    }
}

/// Wraps a codec and counts every call made on it.
pub struct CountingCodec<C> {
    inner: C,
    calls: Rc<Cell<Calls>>,
}

impl<C: Codec> CountingCodec<C> {
    pub fn new(inner: C) -> (Self, Rc<Cell<Calls>>) {
        let calls = Rc::new(Cell::new(Calls::default()));
        (
            Self {
                inner,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn count(&self, f: impl FnOnce(&mut Calls)) {
        let mut calls = self.calls.get();
        f(&mut calls);
        self.calls.set(calls);
    }
}

impl<C: Codec> Codec for CountingCodec<C> {
    fn feed(&mut self, src: &[u8]) -> Result<()> {
        self.count(|c| c.feed += 1);
        self.inner.feed(src)
    }

    fn produce(&mut self, dst: &mut [u8]) -> Result<Report> {
        self.count(|c| c.produce += 1);
        self.inner.produce(dst)
    }

    fn finalize(&mut self) -> Result<()> {
        self.count(|c| c.finalize += 1);
        self.inner.finalize()
    }

    fn sync(&mut self) -> Result<()> {
        self.count(|c| c.sync += 1);
        self.inner.sync()
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn release(&mut self) {
        self.count(|c| c.release += 1);
        self.inner.release()
    }
}
