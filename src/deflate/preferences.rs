use crate::{Error, ErrorKind, Result, DEFAULT_BUF_SIZE};

/// Predefined compression level (1).
pub const CLEVEL_FAST: u32 = 1;

/// Predefined compression level (6).
pub const CLEVEL_DEFAULT: u32 = 6;

/// Predefined compression level (9).
pub const CLEVEL_MAX: u32 = 9;

/// Container format of the compressed stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    /// Raw DEFLATE (RFC 1951), no header or trailer.
    Deflate,
    /// zlib (RFC 1950), Adler-32 trailer.
    Zlib,
    /// gzip (RFC 1952), CRC-32 and size trailer.
    Gzip,
}

impl Default for Format {
    fn default() -> Self {
        Self::Gzip
    }
}

/// Compression preferences.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Preferences {
    format: Format,
    level: u32,
    buffer_size: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: Format::default(),
            level: CLEVEL_DEFAULT,
            buffer_size: DEFAULT_BUF_SIZE,
        }
    }
}

impl Preferences {
    /// Returns the container format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Returns the compression level.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the capacity of the scratch buffer.
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.level > CLEVEL_MAX || self.buffer_size == 0 {
            Err(Error::new(ErrorKind::InvalidPreferences))
        } else {
            Ok(())
        }
    }
}

/// Builds a custom `Preferences`.
///
/// # Example
///
/// ```
/// use flatesink::deflate::{Format, PreferencesBuilder, CLEVEL_MAX};
///
/// let prefs = PreferencesBuilder::new()
///     .format(Format::Zlib)
///     .level(CLEVEL_MAX)
///     .build();
/// assert_eq!(prefs.level(), 9);
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PreferencesBuilder {
    prefs: Preferences,
}

impl PreferencesBuilder {
    /// Creates a new `PreferencesBuilder`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the container format.
    pub fn format(&mut self, format: Format) -> &mut Self {
        self.prefs.format = format;
        self
    }

    /// Sets the compression level.
    ///
    /// Levels above [`CLEVEL_MAX`] are rejected when a writer is built.
    pub fn level(&mut self, level: u32) -> &mut Self {
        self.prefs.level = level;
        self
    }

    /// Sets the capacity of the scratch buffer.
    pub fn buffer_size(&mut self, size: usize) -> &mut Self {
        self.prefs.buffer_size = size;
        self
    }

    /// Builds a `Preferences` with this configuration.
    pub const fn build(&self) -> Preferences {
        self.prefs
    }
}

impl From<Preferences> for PreferencesBuilder {
    fn from(prefs: Preferences) -> Self {
        Self { prefs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate() {
        assert!(Preferences::default().validate().is_ok());
        assert!(PreferencesBuilder::new()
            .level(CLEVEL_MAX + 1)
            .build()
            .validate()
            .is_err());
        assert!(PreferencesBuilder::new()
            .buffer_size(0)
            .build()
            .validate()
            .is_err());
    }
}
