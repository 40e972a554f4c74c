/// A result of a single codec production step.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Report {
    pub(crate) src_len: usize,
    pub(crate) dst_len: usize,
    pub(crate) pending: bool,
}

impl Report {
    /// Creates a new `Report`.
    ///
    /// Codecs defined outside this crate use this to describe their progress.
    pub const fn new(src_len: usize, dst_len: usize, pending: bool) -> Self {
        Self {
            src_len,
            dst_len,
            pending,
        }
    }

    /// Return the length of the input consumed during this step.
    pub const fn src_len(&self) -> usize {
        self.src_len
    }

    /// Return the length of the data written to the destination buffer.
    pub const fn dst_len(&self) -> usize {
        self.dst_len
    }

    /// Return `true` if the codec still holds output that a further step would produce.
    pub const fn pending(&self) -> bool {
        self.pending
    }

    /// Return `true` if this step neither consumed input nor produced output.
    pub const fn is_idle(&self) -> bool {
        self.src_len == 0 && self.dst_len == 0
    }
}
