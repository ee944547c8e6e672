//! Compression algorithm selection

use std::fmt;

use crate::{Error, Result};

/// Block compression algorithm used for a BF body
///
/// Each format version has exactly one algorithm, so no tag is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionAlgorithm {
    /// Deflate with zlib framing
    Zlib,
}

impl CompressionAlgorithm {
    /// Default compression level used by writers
    pub const DEFAULT_LEVEL: u32 = 6;

    /// Algorithm implied by a header version
    pub fn for_version(version: u8) -> Result<Self> {
        match version {
            0 | 1 => Ok(CompressionAlgorithm::Zlib),
            _ => Err(Error::UnsupportedVersion {
                version,
                max_supported: crate::header::CURRENT_VERSION,
            }),
        }
    }

    /// Human-readable algorithm name
    pub fn name(self) -> &'static str {
        match self {
            CompressionAlgorithm::Zlib => "Zlib",
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
