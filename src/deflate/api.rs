use crate::{Error, ErrorKind, Report, Result};
use flate2::{Compress, Compression, FlushCompress, Status};

/// Thin wrapper over a `flate2` deflate stream.
pub(super) struct CompressionContext {
    stream: Compress,
}

impl CompressionContext {
    pub fn new(level: u32, zlib_header: bool) -> Self {
        Self {
            stream: Compress::new(Compression::new(level), zlib_header),
        }
    }

    pub fn compress(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        flush: FlushCompress,
    ) -> Result<(Report, Status)> {
        let total_in = self.stream.total_in();
        let total_out = self.stream.total_out();
        let status = self
            .stream
            .compress(src, dst, flush)
            .map_err(|err| Error::with_source(ErrorKind::CodecFailed, err))?;
        let report = Report {
            src_len: (self.stream.total_in() - total_in) as usize,
            dst_len: (self.stream.total_out() - total_out) as usize,
            pending: false,
        };
        Ok((report, status))
    }
}
