//! Zlib compression and decompression

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::{Error, Result};

/// Largest buffer reserved up front from an untrusted declared length
const MAX_INITIAL_CAPACITY: usize = 16 * 1024 * 1024;

/// Decompress a zlib block into a buffer of exactly `expected_size` bytes
pub(crate) fn decompress(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    // One byte past the declared size is enough to detect an overlong body
    let mut decoder = ZlibDecoder::new(data).take(expected_size as u64 + 1);
    let mut decompressed = Vec::with_capacity(expected_size.min(MAX_INITIAL_CAPACITY));

    match decoder.read_to_end(&mut decompressed) {
        Ok(_) => {
            if decompressed.len() != expected_size {
                log::debug!(
                    "Decompressed size mismatch: expected {}, got {}",
                    expected_size,
                    decompressed.len()
                );
                return Err(Error::BodyLengthMismatch {
                    declared: expected_size as u32,
                    actual: decompressed.len(),
                });
            }
            Ok(decompressed)
        }
        Err(e) => {
            log::debug!("Zlib decompression failed: {e}");
            log::trace!(
                "First 16 bytes of data: {:02X?}",
                &data[..16.min(data.len())]
            );
            Err(Error::compression(format!("Zlib decompression failed: {e}")))
        }
    }
}

/// Compress using zlib at the given level (0-9)
pub(crate) fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2 + 16),
        Compression::new(level.min(9)),
    );
    encoder
        .write_all(data)
        .map_err(|e| Error::compression(format!("Zlib compression failed: {e}")))?;

    encoder
        .finish()
        .map_err(|e| Error::compression(format!("Zlib compression failed: {e}")))
}
