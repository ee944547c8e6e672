//! Header acceptance rules

use crate::common::quad;
use bf_asset::{Error, Geometry, Image, ReadOptions, WriteOptions};

#[test]
fn test_bad_magic_rejected_whatever_follows() {
    let mut bytes = quad().write(Vec::new()).unwrap();
    bytes[0] = b'P';
    bytes[1] = b'K';

    let err = Geometry::read(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { found: [b'P', b'K'] }));
    assert!(err.is_corruption());

    let err = Image::read(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { .. }));
}

#[test]
fn test_newer_version_rejected_before_body() {
    // Nothing after the header: a body read would fail with an I/O error
    let err = Geometry::read(&b"BFG\x02"[..]).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedVersion {
            version: 2,
            max_supported: 1
        }
    ));
}

#[test]
fn test_type_checked_before_version() {
    let err = Image::read(&b"BFG\x09"[..]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { found: b'G', .. }));
}

#[test]
fn test_max_version_is_configurable() {
    let bytes = quad().write(Vec::new()).unwrap();
    let options = ReadOptions::new().with_max_version(0);

    let err = Geometry::read_with_options(bytes.as_slice(), &options, &mut ()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion { version: 1, .. }));
}

#[test]
fn test_version_zero_files_read() {
    let options = WriteOptions {
        version: 0,
        ..WriteOptions::default()
    };
    let bytes = quad().write_with_options(Vec::new(), options).unwrap();
    assert_eq!(&bytes[..4], b"BFG\x00");
    assert_eq!(Geometry::read(bytes.as_slice()).unwrap(), quad());
}
