//! Output formatting for sizes, body frames and timings

use std::time::Duration;

use bf_asset::BodyInfo;
use humansize::{DECIMAL, format_size};

/// Byte count in decimal units
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Percentage of `raw` saved by storing `stored` bytes
///
/// `None` when there was nothing to compress.
pub fn space_saved(raw: u64, stored: u64) -> Option<f64> {
    (raw > 0).then(|| 100.0 - stored as f64 * 100.0 / raw as f64)
}

/// `raw -> stored (N% saved)`
pub fn format_size_change(raw: u64, stored: u64) -> String {
    let sizes = format!("{} -> {}", format_bytes(raw), format_bytes(stored));
    match space_saved(raw, stored) {
        Some(saved) => format!("{sizes} ({saved:.1}% saved)"),
        None => sizes,
    }
}

/// Summary of a body frame: decompressed size against compressed block
pub fn format_body(body: &BodyInfo) -> String {
    format_size_change(
        u64::from(body.uncompressed_len),
        u64::from(body.compressed_len),
    )
}

/// Phase timing in milliseconds
pub fn format_duration(duration: Duration) -> String {
    format!("{:.3} ms", duration.as_secs_f64() * 1000.0)
}
