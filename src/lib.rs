//! Streaming compression writer with a fail-fast lifecycle.
//!
//! [`CompressingWriter`] feeds every write to a stateful [`Codec`] and forwards
//! the compressed output to any [`Write`] sink through a fixed-size scratch
//! buffer. Once the writer is finished or closed, further input is rejected
//! with [`ErrorKind::Closed`] without touching the codec or the sink, and a
//! failing sink aborts the current call instead of being retried.
//!
//! # Example
//!
//! ```
//! use flatesink::{CompressingWriter, ErrorKind, State};
//!
//! let mut sink = Vec::new();
//! let mut w = CompressingWriter::new(&mut sink, Default::default())?;
//! w.write(b"Hello world!")?;
//! w.finish()?;
//! assert_eq!(w.state(), State::Finished);
//!
//! assert_eq!(w.write(b"!").unwrap_err().kind(), ErrorKind::Closed);
//! w.close()?;
//! # Ok::<(), flatesink::Error>(())
//! ```
//!
//! [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html

#![deny(unsafe_code)]

mod common;
mod stream;

pub mod codec;
pub mod deflate;

pub use codec::Codec;
pub use common::{Error, ErrorKind, Report, Result, DEFAULT_BUF_SIZE};
pub use stream::{CompressingWriter, State, WriterBuilder};
