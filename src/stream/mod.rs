//! Streaming compression writer
mod write;

pub use write::*;

use crate::{
    deflate::{DeflateCodec, GzipHeader, Preferences},
    Codec, Result,
};
use std::io;

/// Lifecycle state of a [`CompressingWriter`].
///
/// States only move forward: `Open -> Finished -> Closed` or `Open -> Closed`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Accepting input.
    Open,
    /// The stream has been finalized; the codec is still allocated.
    Finished,
    /// The codec has been released.
    Closed,
}

/// Builds a [`CompressingWriter`].
///
/// # Example
///
/// ```
/// use flatesink::{
///     deflate::{GzipHeader, PreferencesBuilder, CLEVEL_MAX},
///     WriterBuilder,
/// };
///
/// let mut sink = Vec::new();
/// let mut w = WriterBuilder::new()
///     .preferences(PreferencesBuilder::new().level(CLEVEL_MAX).build())
///     .gzip_header(GzipHeader::new().filename("hello.txt"))
///     .build(&mut sink)?;
/// w.write(b"Hello world!")?;
/// w.close()?;
/// # Ok::<(), flatesink::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct WriterBuilder {
    prefs: Preferences,
    header: GzipHeader,
}

impl WriterBuilder {
    /// Creates a new `WriterBuilder` with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the preferences.
    pub fn preferences(mut self, prefs: Preferences) -> Self {
        self.prefs = prefs;
        self
    }

    /// Sets the gzip header fields.
    pub fn gzip_header(mut self, header: GzipHeader) -> Self {
        self.header = header;
        self
    }

    /// Creates a writer backed by a [`DeflateCodec`].
    pub fn build<W: io::Write>(&self, writer: W) -> Result<CompressingWriter<W>> {
        let codec = DeflateCodec::with_header(&self.prefs, &self.header)?;
        CompressingWriter::with_codec(writer, codec, self.prefs.buffer_size())
    }

    /// Creates a writer driving `codec` with this buffer configuration.
    ///
    /// Only the buffer size is taken from the preferences; the format and
    /// level belong to whoever built `codec`.
    pub fn build_with<W: io::Write, C: Codec>(
        &self,
        writer: W,
        codec: C,
    ) -> Result<CompressingWriter<W, C>> {
        CompressingWriter::with_codec(writer, codec, self.prefs.buffer_size())
    }
}
