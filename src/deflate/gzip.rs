use super::preferences::{CLEVEL_FAST, CLEVEL_MAX};
use crate::{Error, ErrorKind, Result};

const ID1: u8 = 0x1f;
const ID2: u8 = 0x8b;
const CM_DEFLATE: u8 = 8;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;
const OS_UNKNOWN: u8 = 255;

/// Optional fields of a gzip member header.
///
/// # Example
///
/// ```
/// use flatesink::deflate::GzipHeader;
///
/// let header = GzipHeader::new()
///     .filename("notes.txt")
///     .comment("written by flatesink")
///     .mtime(1_600_000_000);
/// assert_eq!(header.filename_bytes(), Some(&b"notes.txt"[..]));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct GzipHeader {
    filename: Option<Vec<u8>>,
    comment: Option<Vec<u8>>,
    mtime: u32,
}

impl GzipHeader {
    /// Creates an empty header.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the original file name. It must not contain a NUL byte.
    pub fn filename<T: Into<Vec<u8>>>(mut self, filename: T) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the comment. It must not contain a NUL byte.
    pub fn comment<T: Into<Vec<u8>>>(mut self, comment: T) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the modification time in seconds since the Unix epoch.
    pub fn mtime(mut self, mtime: u32) -> Self {
        self.mtime = mtime;
        self
    }

    /// Returns the original file name.
    pub fn filename_bytes(&self) -> Option<&[u8]> {
        self.filename.as_deref()
    }

    /// Returns the comment.
    pub fn comment_bytes(&self) -> Option<&[u8]> {
        self.comment.as_deref()
    }

    /// Returns the modification time.
    pub const fn mtime_secs(&self) -> u32 {
        self.mtime
    }

    pub(super) fn encode(&self, level: u32) -> Result<Vec<u8>> {
        let fields = [self.filename.as_deref(), self.comment.as_deref()];
        if fields.iter().flatten().any(|field| field.contains(&0)) {
            return Err(Error::new(ErrorKind::InvalidPreferences));
        }

        let mut flags = 0;
        if self.filename.is_some() {
            flags |= FNAME;
        }
        if self.comment.is_some() {
            flags |= FCOMMENT;
        }
        let xfl = match level {
            CLEVEL_MAX => 2,
            CLEVEL_FAST => 4,
            _ => 0,
        };

        let mut buf = vec![ID1, ID2, CM_DEFLATE, flags];
        buf.extend_from_slice(&self.mtime.to_le_bytes());
        buf.extend_from_slice(&[xfl, OS_UNKNOWN]);
        for field in fields.iter().flatten() {
            buf.extend_from_slice(field);
            buf.push(0);
        }
        Ok(buf)
    }
}

/// Running CRC-32 and input size of a gzip member.
#[derive(Default)]
pub(super) struct Summary {
    crc: crc32fast::Hasher,
    size: u32,
}

impl Summary {
    pub fn update(&mut self, src: &[u8]) {
        self.crc.update(src);
        self.size = self.size.wrapping_add(src.len() as u32);
    }

    pub fn trailer(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8);
        buf.extend_from_slice(&self.crc.clone().finalize().to_le_bytes());
        buf.extend_from_slice(&self.size.to_le_bytes());
        buf
    }
}
