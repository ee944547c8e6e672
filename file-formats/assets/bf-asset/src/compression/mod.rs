//! Whole-body block compression for BF files
//!
//! A BF body is compressed as a single block. The algorithm is not stored in
//! the file; it is implied by the header version.

mod methods;
mod zlib;

pub use methods::CompressionAlgorithm;

use crate::Result;

/// Compress a complete body with the given algorithm
pub fn compress(data: &[u8], algorithm: CompressionAlgorithm, level: u32) -> Result<Vec<u8>> {
    match algorithm {
        CompressionAlgorithm::Zlib => zlib::compress(data, level),
    }
}

/// Decompress a complete body, which must produce exactly `expected_size` bytes
pub fn decompress(
    data: &[u8],
    algorithm: CompressionAlgorithm,
    expected_size: usize,
) -> Result<Vec<u8>> {
    match algorithm {
        CompressionAlgorithm::Zlib => zlib::decompress(data, expected_size),
    }
}
