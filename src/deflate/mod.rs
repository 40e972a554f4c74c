//! DEFLATE codec with raw, zlib and gzip framing
//!
//! # Examples
//!
//! Write a gzip member to `foo.gz`.
//!
//! ```
//! # use std::env;
//! # let tmp_dir = assert_fs::TempDir::new().unwrap();
//! # env::set_current_dir(tmp_dir.path()).unwrap();
//! use flatesink::CompressingWriter;
//! use std::fs::File;
//!
//! let mut f = File::create("foo.gz")?;
//! let mut w = CompressingWriter::new(&mut f, Default::default())?;
//! w.write(b"Hello world!")?;
//! w.close()?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Compress a slice into a `Vec<u8>`.
//!
//! ```
//! use flatesink::deflate::{self, Format, PreferencesBuilder};
//!
//! let prefs = PreferencesBuilder::new().format(Format::Zlib).build();
//! let mut buf = Vec::new();
//! let len = deflate::compress_to_vec(b"Goodnight world!", &mut buf, &prefs)?;
//! assert_eq!(len, buf.len());
//! # Ok::<(), flatesink::Error>(())
//! ```

mod api;
mod gzip;
mod preferences;

pub use gzip::GzipHeader;
pub use preferences::{
    Format, Preferences, PreferencesBuilder, CLEVEL_DEFAULT, CLEVEL_FAST, CLEVEL_MAX,
};

use crate::{Codec, CompressingWriter, Error, ErrorKind, Report, Result};
use api::CompressionContext;
use flate2::{FlushCompress, Status};
use gzip::Summary;
use std::cmp;

/// Bytes waiting to be handed out ahead of, or after, the deflate stream.
#[derive(Default)]
struct Staged {
    buf: Vec<u8>,
    pos: usize,
}

impl Staged {
    fn new(buf: Vec<u8>) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn drain_into(&mut self, dst: &mut [u8]) -> usize {
        let len = cmp::min(self.buf.len() - self.pos, dst.len());
        dst[..len].copy_from_slice(&self.buf[self.pos..][..len]);
        self.pos += len;
        len
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Run,
    // The sync flush is requested but has not consumed the staged input yet.
    Sync,
    // The sync flush was issued; its output is still buffered inside flate2.
    Drain,
    Finish,
}

/// A [`Codec`] backed by a `flate2` deflate stream.
///
/// Fed input is staged inside the codec and compressed lazily by
/// [`produce`](Codec::produce). With [`Format::Gzip`] the member header is
/// handed out before the first compressed byte and the CRC-32/size trailer
/// after the end of the deflate stream.
pub struct DeflateCodec {
    ctx: Option<CompressionContext>,
    format: Format,
    mode: Mode,
    input: Vec<u8>,
    consumed: usize,
    header: Staged,
    trailer: Staged,
    summary: Option<Summary>,
    stream_end: bool,
}

impl DeflateCodec {
    /// Creates a new `DeflateCodec`.
    pub fn new(prefs: &Preferences) -> Result<Self> {
        Self::with_header(prefs, &GzipHeader::default())
    }

    /// Creates a new `DeflateCodec` with a custom gzip header.
    ///
    /// The header is ignored unless the format is [`Format::Gzip`].
    pub fn with_header(prefs: &Preferences, header: &GzipHeader) -> Result<Self> {
        prefs.validate()?;
        let format = prefs.format();
        let (header, summary) = match format {
            Format::Gzip => (
                Staged::new(header.encode(prefs.level())?),
                Some(Summary::default()),
            ),
            Format::Deflate | Format::Zlib => (Staged::default(), None),
        };
        Ok(Self {
            ctx: Some(CompressionContext::new(
                prefs.level(),
                format == Format::Zlib,
            )),
            format,
            mode: Mode::Run,
            input: Vec::new(),
            consumed: 0,
            header,
            trailer: Staged::default(),
            summary,
            stream_end: false,
        })
    }

    /// Returns the container format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Returns `true` once [`release`](Codec::release) has been called.
    pub fn is_released(&self) -> bool {
        self.ctx.is_none()
    }

    fn has_pending(&self) -> bool {
        !self.header.is_empty()
            || self.consumed < self.input.len()
            || self.mode == Mode::Sync
            || self.mode == Mode::Drain
            || (self.mode == Mode::Finish && !self.stream_end)
            || !self.trailer.is_empty()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.ctx.is_none() {
            Err(Error::new(ErrorKind::CodecReleased))
        } else {
            Ok(())
        }
    }

    fn compress_body(&mut self, dst: &mut [u8]) -> Result<Report> {
        let flush = match self.mode {
            Mode::Run | Mode::Drain => FlushCompress::None,
            Mode::Sync => FlushCompress::Sync,
            Mode::Finish => FlushCompress::Finish,
        };
        let ctx = match &mut self.ctx {
            Some(ctx) => ctx,
            None => return Err(Error::new(ErrorKind::CodecReleased)),
        };
        let (report, status) = ctx.compress(&self.input[self.consumed..], dst, flush)?;

        self.consumed += report.src_len;
        if self.consumed >= self.input.len() {
            self.input.clear();
            self.consumed = 0;
        }

        let drained = report.dst_len < dst.len();
        match self.mode {
            Mode::Run => (),
            // A second sync flush would emit another empty block, so it is
            // issued only until the staged input is gone.
            Mode::Sync if self.input.is_empty() => {
                self.mode = if drained { Mode::Run } else { Mode::Drain };
            }
            Mode::Sync => (),
            Mode::Drain => {
                if self.input.is_empty() && drained {
                    self.mode = Mode::Run;
                }
            }
            Mode::Finish => {
                if status == Status::StreamEnd {
                    self.stream_end = true;
                    if let Some(summary) = &self.summary {
                        self.trailer = Staged::new(summary.trailer());
                    }
                }
            }
        }
        Ok(report)
    }
}

impl Codec for DeflateCodec {
    fn feed(&mut self, src: &[u8]) -> Result<()> {
        self.ensure_live()?;
        if self.mode == Mode::Finish {
            return Err(Error::new(ErrorKind::CodecFinalized));
        }
        if let Some(summary) = &mut self.summary {
            summary.update(src);
        }
        self.input.extend_from_slice(src);
        Ok(())
    }

    fn produce(&mut self, dst: &mut [u8]) -> Result<Report> {
        self.ensure_live()?;
        let mut src_len = 0;
        let mut dst_len = self.header.drain_into(dst);

        let idle = self.mode == Mode::Run && self.consumed >= self.input.len();
        if !self.stream_end && !idle && dst_len < dst.len() {
            let report = self.compress_body(&mut dst[dst_len..])?;
            src_len += report.src_len;
            dst_len += report.dst_len;
        }
        if self.stream_end {
            dst_len += self.trailer.drain_into(&mut dst[dst_len..]);
        }

        Ok(Report {
            src_len,
            dst_len,
            pending: self.has_pending(),
        })
    }

    fn finalize(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.mode = Mode::Finish;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        self.ensure_live()?;
        match self.mode {
            Mode::Finish => Err(Error::new(ErrorKind::CodecFinalized)),
            _ => {
                self.mode = Mode::Sync;
                Ok(())
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.stream_end && !self.has_pending()
    }

    fn release(&mut self) {
        self.ctx = None;
        self.input = Vec::new();
        self.consumed = 0;
    }
}

/// Compresses `src` into a new stream appended to `dst`.
///
/// Returns the number of bytes appended.
pub fn compress_to_vec(src: &[u8], dst: &mut Vec<u8>, prefs: &Preferences) -> Result<usize> {
    let orig_len = dst.len();
    {
        let mut w = CompressingWriter::new(&mut *dst, *prefs)?;
        w.write(src)?;
        w.close()?;
    }
    Ok(dst.len() - orig_len)
}
