mod error;
mod report;

pub use error::{Error, ErrorKind, Result};
pub use report::Report;

/// Default capacity of the scratch buffer used to stage compressed output.
pub const DEFAULT_BUF_SIZE: usize = 8 * 1024;
