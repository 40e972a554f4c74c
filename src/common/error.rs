use std::{convert, error, fmt, io, result};

type Source = Box<dyn error::Error + Send + Sync + 'static>;

/// A list specifying general categories of compression writer error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The writer is finished or closed and accepts no more input.
    Closed,
    /// The underlying sink rejected a write or a flush.
    SinkFailed,
    /// The codec reported an invalid state or malformed data.
    CodecFailed,
    /// The codec reported pending output but made no progress.
    CodecStalled,
    /// The codec was asked for more input after it had been finalized.
    CodecFinalized,
    /// The codec was used after its resources had been released.
    CodecReleased,
    /// The writer configuration had an invalid value.
    InvalidPreferences,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "writer is closed",
            Self::SinkFailed => "sink write failed",
            Self::CodecFailed => "codec failed",
            Self::CodecStalled => "codec stalled with pending output",
            Self::CodecFinalized => "codec already finalized",
            Self::CodecReleased => "codec already released",
            Self::InvalidPreferences => "invalid preferences",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> result::Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

/// The error type for compression writer operations.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<Source>,
}

impl Error {
    pub(crate) const fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub(crate) fn with_source<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Source>,
    {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    pub(crate) fn sink(err: io::Error) -> Self {
        Self::with_source(ErrorKind::SinkFailed, err)
    }

    /// Returns the corresponding `ErrorKind` for this error.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if this error was reported by the codec.
    pub fn is_codec(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CodecFailed
                | ErrorKind::CodecStalled
                | ErrorKind::CodecFinalized
                | ErrorKind::CodecReleased
        )
    }

    /// Returns the sink failure wrapped by this error, if any.
    pub fn sink_error(&self) -> Option<&io::Error> {
        match self.kind {
            ErrorKind::SinkFailed => self
                .source
                .as_ref()
                .and_then(|source| source.downcast_ref::<io::Error>()),
            _ => None,
        }
    }
}

impl convert::From<Error> for io::Error {
    fn from(mut err: Error) -> Self {
        if err.kind == ErrorKind::SinkFailed {
            if let Some(source) = err.source.take() {
                match source.downcast::<io::Error>() {
                    Ok(io_err) => return *io_err,
                    Err(source) => err.source = Some(source),
                }
            }
        }
        let kind = match err.kind {
            ErrorKind::Closed => io::ErrorKind::BrokenPipe,
            ErrorKind::InvalidPreferences => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        };
        Self::new(kind, err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> result::Result<(), fmt::Error> {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.kind, source),
            None => <ErrorKind as fmt::Display>::fmt(&self.kind, f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.source {
            Some(source) => Some(source.as_ref() as &(dyn error::Error + 'static)),
            None => None,
        }
    }
}

/// A specialized [`Result`] type for compression writer operations.
///
/// [`Result`]: https://doc.rust-lang.org/std/result/enum.Result.html
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use std::io;

    #[test]
    fn sink_error_round_trips_into_io() {
        let err = Error::sink(io::Error::new(io::ErrorKind::ConnectionReset, "gone"));
        assert_eq!(err.kind(), ErrorKind::SinkFailed);
        assert_eq!(
            err.sink_error().map(io::Error::kind),
            Some(io::ErrorKind::ConnectionReset)
        );

        let io_err = io::Error::from(err);
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn closed_maps_to_broken_pipe() {
        let io_err = io::Error::from(Error::new(ErrorKind::Closed));
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(io_err.to_string(), "writer is closed");
    }

    #[test]
    fn codec_kinds() {
        assert!(Error::new(ErrorKind::CodecStalled).is_codec());
        assert!(Error::new(ErrorKind::CodecReleased).is_codec());
        assert!(!Error::new(ErrorKind::Closed).is_codec());
        assert!(Error::new(ErrorKind::Closed).sink_error().is_none());
    }
}
