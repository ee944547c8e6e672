//! Reader and writer configuration

use crate::compression::CompressionAlgorithm;
use crate::header::CURRENT_VERSION;

/// How the geometry section scan treats tags it does not recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionStrictness {
    /// Fail with [`Error::UnknownSection`](crate::Error::UnknownSection)
    #[default]
    Strict,
    /// Consume the tag byte and keep scanning
    Lenient,
}

/// Options controlling how BF files are read
///
/// # Examples
///
/// ```
/// use bf_asset::{ReadOptions, SectionStrictness};
///
/// let options = ReadOptions::new().with_strictness(SectionStrictness::Lenient);
/// assert_eq!(options.max_version, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Highest header version accepted
    pub max_version: u8,
    /// Handling of unknown geometry section tags
    pub strictness: SectionStrictness,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_version: CURRENT_VERSION,
            strictness: SectionStrictness::Strict,
        }
    }
}

impl ReadOptions {
    /// Create options with the defaults (current version, strict)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest accepted version
    pub fn with_max_version(mut self, max_version: u8) -> Self {
        self.max_version = max_version;
        self
    }

    /// Set the unknown-section policy
    pub fn with_strictness(mut self, strictness: SectionStrictness) -> Self {
        self.strictness = strictness;
        self
    }
}

/// Options controlling how BF files are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Version byte written to the header; selects the compression algorithm
    pub version: u8,
    /// Compression level (0-9); does not affect the wire format
    pub compression_level: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            compression_level: CompressionAlgorithm::DEFAULT_LEVEL,
        }
    }
}

impl WriteOptions {
    /// Create options with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression level (clamped to 9 when compressing)
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }
}
