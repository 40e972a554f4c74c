use super::State;
use crate::{
    deflate::{DeflateCodec, Preferences},
    Codec, Error, ErrorKind, Result,
};
use log::{debug, trace, warn};
use std::{fmt, io};

/// The [`Write`]-based streaming compressor.
///
/// Input passed to [`write`] is fed to the codec and every compressed byte the
/// codec hands back is forwarded to the sink before the call returns.
///
/// # Example
///
/// ```
/// use flatesink::CompressingWriter;
///
/// let mut sink = Vec::new();
/// let mut w = CompressingWriter::new(&mut sink, Default::default())?;
/// w.write(b"Hello world!")?;
/// w.close()?;
///
/// // Every further write fails fast.
/// assert!(w.write(b"too late").is_err());
/// # Ok::<(), flatesink::Error>(())
/// ```
///
/// [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
/// [`write`]: CompressingWriter::write
pub struct CompressingWriter<W: io::Write, C: Codec = DeflateCodec> {
    device: W,
    codec: C,
    buffer: Box<[u8]>,
    state: State,
    finalized: bool,
    last_sink_error: Option<io::ErrorKind>,
    total_in: u64,
    total_out: u64,
}

impl<W: io::Write> CompressingWriter<W> {
    /// Creates a new `CompressingWriter<W>` backed by a [`DeflateCodec`].
    pub fn new(writer: W, prefs: Preferences) -> Result<Self> {
        let codec = DeflateCodec::new(&prefs)?;
        Self::with_codec(writer, codec, prefs.buffer_size())
    }
}

impl<W: io::Write, C: Codec> CompressingWriter<W, C> {
    /// Creates a new `CompressingWriter<W, C>` driving an arbitrary codec.
    ///
    /// `buffer_size` is the capacity of the scratch buffer and must not be zero.
    pub fn with_codec(writer: W, codec: C, buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(Error::new(ErrorKind::InvalidPreferences));
        }
        Ok(Self {
            device: writer,
            codec,
            buffer: vec![0; buffer_size].into_boxed_slice(),
            state: State::Open,
            finalized: false,
            last_sink_error: None,
            total_in: 0,
            total_out: 0,
        })
    }

    /// Compresses `data` and forwards the output to the sink.
    ///
    /// A sink failure is returned as [`ErrorKind::SinkFailed`] and leaves the
    /// writer open; a later call is attempted afresh.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_open()?;
        self.codec.feed(data)?;
        self.total_in += data.len() as u64;
        self.drain()
    }

    /// Emits a sync point and flushes the sink.
    ///
    /// Everything written so far becomes decodable from the sink contents.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.codec.sync()?;
        self.drain()?;
        self.device.flush().map_err(|err| self.sink_failed(err))
    }

    /// Finalizes the stream and writes the remaining output to the sink.
    ///
    /// On success the writer becomes [`State::Finished`]. On failure it stays
    /// open so that [`close`](CompressingWriter::close) still releases the codec,
    /// but `write`, `flush` and `finish` fail with [`ErrorKind::Closed`] from
    /// then on.
    pub fn finish(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.end()
    }

    /// Finishes the stream if needed and releases the codec.
    ///
    /// The codec is released even when finishing fails; that failure is
    /// returned once. Closing a closed writer does nothing.
    pub fn close(&mut self) -> Result<()> {
        let result = match self.state {
            State::Closed => return Ok(()),
            State::Open => self.end(),
            State::Finished => Ok(()),
        };
        if let Err(err) = &result {
            warn!("releasing codec after a failed finish: {}", err);
        }
        self.codec.release();
        debug!("codec released");
        self.transition(State::Closed);
        result
    }

    fn end(&mut self) -> Result<()> {
        self.finalized = true;
        self.codec.finalize()?;
        self.drain()?;
        if !self.codec.is_finished() {
            return Err(Error::new(ErrorKind::CodecStalled));
        }
        self.device.flush().map_err(|err| self.sink_failed(err))?;
        self.transition(State::Finished);
        Ok(())
    }

    /// Returns the lifecycle state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns `true` if the writer accepts input.
    pub fn is_open(&self) -> bool {
        self.state == State::Open && !self.finalized
    }

    /// Returns the kind of the failure of the most recent sink write.
    ///
    /// The value is cleared by the next successful sink write.
    pub const fn last_sink_error(&self) -> Option<io::ErrorKind> {
        self.last_sink_error
    }

    /// Returns the capacity of the scratch buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of uncompressed bytes accepted so far.
    pub const fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Returns the number of compressed bytes accepted by the sink so far.
    pub const fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Returns a reference to the codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns a reference to the sink.
    pub fn get_ref(&self) -> &W {
        &self.device
    }

    /// Returns a mutable reference to the sink.
    ///
    /// Writing to the sink directly corrupts the compressed stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.device
    }

    // A failed finish leaves the state `Open` but the stream is already ended.
    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::Closed))
        }
    }

    // Every iteration either forwards output, observes codec progress, or returns.
    fn drain(&mut self) -> Result<()> {
        loop {
            let report = self.codec.produce(&mut self.buffer)?;
            trace!(
                "drain: consumed {} produced {} pending {}",
                report.src_len(),
                report.dst_len(),
                report.pending()
            );
            if report.dst_len() > self.buffer.len() {
                return Err(Error::new(ErrorKind::CodecFailed));
            } else if report.dst_len() > 0 {
                self.send(report.dst_len())?;
            } else if !report.pending() {
                return Ok(());
            } else if report.is_idle() {
                return Err(Error::new(ErrorKind::CodecStalled));
            }
        }
    }

    fn send(&mut self, len: usize) -> Result<()> {
        match self.device.write_all(&self.buffer[..len]) {
            Ok(()) => {
                self.last_sink_error = None;
                self.total_out += len as u64;
                Ok(())
            }
            Err(err) => Err(self.sink_failed(err)),
        }
    }

    fn sink_failed(&mut self, err: io::Error) -> Error {
        warn!("sink failed in state {:?}: {}", self.state, err);
        self.last_sink_error = Some(err.kind());
        Error::sink(err)
    }

    fn transition(&mut self, next: State) {
        debug_assert!(next > self.state);
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl<W: io::Write, C: Codec> io::Write for CompressingWriter<W, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        CompressingWriter::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        CompressingWriter::flush(self).map_err(io::Error::from)
    }
}

impl<W: io::Write, C: Codec> fmt::Debug for CompressingWriter<W, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressingWriter")
            .field("state", &self.state)
            .field("finalized", &self.finalized)
            .field("capacity", &self.buffer.len())
            .field("total_in", &self.total_in)
            .field("total_out", &self.total_out)
            .finish()
    }
}

impl<W: io::Write, C: Codec> Drop for CompressingWriter<W, C> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
