//! Compressed body framing

use crate::common::{full_quad, image_named};
use bf_asset::header::HEADER_SIZE;
use bf_asset::{AssetType, BfReader, BfWriter, BodyInfo, Error, Geometry, Image, WriteOptions};
use pretty_assertions::assert_eq;
use std::io::{Read, Write};

#[test]
fn test_empty_body_round_trips() {
    let mut writer = BfWriter::new(Vec::new());
    writer.write_header(AssetType::Image).unwrap();
    writer.begin_compressed_body(0).unwrap();
    let info = writer.end_compressed_body().unwrap();
    assert_eq!(info.uncompressed_len, 0);
    let bytes = writer.finish().unwrap();

    let mut reader = BfReader::new(bytes.as_slice());
    reader.read_header(AssetType::Image, 1).unwrap();
    reader.decompress_body(&mut ()).unwrap();
    let mut body = Vec::new();
    reader.read_to_end(&mut body).unwrap();
    assert!(body.is_empty());
}

#[test]
fn test_frame_lengths_match_file() {
    let geometry = full_quad();
    let bytes = geometry.write(Vec::new()).unwrap();

    let uncompressed = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
    let compressed = u32::from_be_bytes(bytes[8..12].try_into().unwrap());
    assert_eq!(uncompressed as usize, geometry.encoded_body_size());
    assert_eq!(
        bytes.len(),
        HEADER_SIZE + BodyInfo::FRAME_SIZE + compressed as usize
    );
}

#[test]
fn test_repetitive_payload_compresses() {
    let image = Image::single(
        64,
        64,
        "flat",
        bf_asset::PixelFormat::RGBA8_SRGB,
        vec![0x80; 64 * 64 * 4],
    );
    let bytes = image.write(Vec::new()).unwrap();
    assert!(bytes.len() < image.encoded_body_size() / 10);
}

#[test]
fn test_compression_level_does_not_change_payload() {
    let image = image_named(32, 32, &["a", "b"]);
    let fast = image
        .write_with_options(Vec::new(), WriteOptions::new().with_compression_level(1))
        .unwrap();
    let best = image
        .write_with_options(Vec::new(), WriteOptions::new().with_compression_level(9))
        .unwrap();

    assert_eq!(Image::read(fast.as_slice()).unwrap(), image);
    assert_eq!(Image::read(best.as_slice()).unwrap(), image);
}

#[test]
fn test_declared_length_verified() {
    let mut bytes = full_quad().write(Vec::new()).unwrap();
    let declared = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
    bytes[4..8].copy_from_slice(&(declared + 1).to_be_bytes());

    let err = Geometry::read(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, Error::BodyLengthMismatch { .. }));
    assert!(err.is_corruption());
}

#[test]
fn test_corrupt_block_rejected() {
    let mut bytes = full_quad().write(Vec::new()).unwrap();
    let last = bytes.len() - 1;
    bytes[12] ^= 0xFF;
    bytes[last] ^= 0xFF;

    let err = Geometry::read(bytes.as_slice()).unwrap_err();
    assert!(err.is_corruption(), "unexpected error: {err}");
}

#[test]
fn test_custom_payload_through_writer() {
    let mut writer = BfWriter::new(Vec::new());
    writer.write_header(AssetType::Geometry).unwrap();
    writer.begin_compressed_body(1).unwrap();
    full_quad().write_payload(&mut writer).unwrap();
    writer.flush().unwrap();
    writer.end_compressed_body().unwrap();
    let bytes = writer.finish().unwrap();

    assert_eq!(Geometry::read(bytes.as_slice()).unwrap(), full_quad());
}
