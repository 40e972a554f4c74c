//! The codec capability driven by [`CompressingWriter`].
//!
//! A codec is a stateful engine: input is handed over with [`Codec::feed`] and
//! the compressed form is pulled out piecewise with [`Codec::produce`].
//! The writer never assumes anything about the bytes it pulls; container
//! framing such as headers and trailers is entirely up to the codec.
//!
//! [`CompressingWriter`]: crate::CompressingWriter

use crate::{Report, Result};

/// Stateful compression engine.
///
/// # Contract
///
/// - Every call to [`produce`] either consumes staged input, writes at least one
///   byte to `dst`, or reports that no output is pending.
/// - After [`finalize`] and a full drain, [`produce`] yields zero bytes forever
///   and [`is_finished`] returns `true`.
/// - [`release`] is idempotent. Any other call after it fails with
///   [`ErrorKind::CodecReleased`].
///
/// [`produce`]: Codec::produce
/// [`finalize`]: Codec::finalize
/// [`is_finished`]: Codec::is_finished
/// [`release`]: Codec::release
/// [`ErrorKind::CodecReleased`]: crate::ErrorKind::CodecReleased
pub trait Codec {
    /// Stages `src` for compression.
    fn feed(&mut self, src: &[u8]) -> Result<()>;

    /// Writes up to `dst.len()` compressed bytes into `dst`.
    fn produce(&mut self, dst: &mut [u8]) -> Result<Report>;

    /// Marks the end of input. Trailing data becomes pending.
    fn finalize(&mut self) -> Result<()>;

    /// Requests a sync point: everything fed so far becomes pending output
    /// that can be decoded without ending the stream.
    fn sync(&mut self) -> Result<()>;

    /// Returns `true` once the stream is finalized and fully drained.
    fn is_finished(&self) -> bool;

    /// Frees the resources held by this codec.
    fn release(&mut self);
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn feed(&mut self, src: &[u8]) -> Result<()> {
        (**self).feed(src)
    }

    fn produce(&mut self, dst: &mut [u8]) -> Result<Report> {
        (**self).produce(dst)
    }

    fn finalize(&mut self) -> Result<()> {
        (**self).finalize()
    }

    fn sync(&mut self) -> Result<()> {
        (**self).sync()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn release(&mut self) {
        (**self).release()
    }
}
