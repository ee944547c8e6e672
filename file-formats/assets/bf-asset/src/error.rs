//! Error types for the BF asset library

use std::io;
use thiserror::Error;

use crate::header::AssetType;

/// Result type alias for BF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for BF operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the underlying sink or source
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The first two bytes are not the `BF` magic
    #[error("Not a BF file: expected magic 'BF', found {found:02X?}")]
    FormatMismatch {
        /// The two bytes found at the start of the file
        found: [u8; 2],
    },

    /// The asset type tag does not match the kind being read
    #[error("Asset type mismatch: expected {expected}, found tag 0x{found:02X}")]
    TypeMismatch {
        /// The asset type the caller asked for
        expected: AssetType,
        /// The raw tag byte found in the header
        found: u8,
    },

    /// The asset type tag is not one this library knows
    #[error("Unknown asset type tag: 0x{0:02X}")]
    UnknownAssetType(u8),

    /// The file was written by a newer codec
    #[error("Unsupported BF version {version} (maximum supported: {max_supported})")]
    UnsupportedVersion {
        /// Version byte found in the header
        version: u8,
        /// Highest version this reader accepts
        max_supported: u8,
    },

    /// The single-layer entry point was given a multi-layer image
    #[error("Image has {0} layers, but only single-layer images are supported here")]
    TooManyLayers(usize),

    /// The single-layer entry point was given an image with no layers
    #[error("Image has no layers")]
    EmptyImage,

    /// The image cannot be assembled into a cube
    #[error("Invalid cube asset: {0}")]
    InvalidCubeAsset(String),

    /// Unrecognised color space code in a pixel format descriptor
    #[error("Unknown color space code: {0}")]
    UnknownColorSpace(u8),

    /// Unrecognised geometry section tag (strict mode only)
    #[error("Unknown geometry section tag: {0}")]
    UnknownSection(u8),

    /// Stream used out of protocol order
    #[error("Stream misuse: {0}")]
    ResourceMisuse(String),

    /// Compression/decompression error
    #[error("Compression error: {0}")]
    Compression(String),

    /// Decompressed body length differs from the declared length
    #[error("Body length mismatch: declared {declared} bytes, decompressed {actual}")]
    BodyLengthMismatch {
        /// Length stored in the body frame
        declared: u32,
        /// Length actually produced by the decompressor
        actual: usize,
    },

    /// A string field is not valid UTF-8
    #[error("Invalid UTF-8 in string field")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A length does not fit in its wire field
    #[error("{what} too large for the wire format: {len}")]
    ValueTooLarge {
        /// Description of the value
        what: &'static str,
        /// Offending length
        len: usize,
    },

    /// More layers than a `u8` count can describe
    #[error("Too many layers to write: {0} (maximum 255)")]
    LayerCountOverflow(usize),

    /// A layer raster does not match the image dimensions and format
    #[error("Layer '{layer}' raster is {actual} bytes, expected {expected}")]
    RasterSizeMismatch {
        /// Layer name
        layer: String,
        /// Size implied by width, height and format
        expected: usize,
        /// Size of the supplied raster
        actual: usize,
    },
}

impl Error {
    /// Create a new ResourceMisuse error
    pub fn resource_misuse<S: Into<String>>(msg: S) -> Self {
        Error::ResourceMisuse(msg.into())
    }

    /// Create a new Compression error
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Error::Compression(msg.into())
    }

    /// Create a new InvalidCubeAsset error
    pub fn invalid_cube<S: Into<String>>(msg: S) -> Self {
        Error::InvalidCubeAsset(msg.into())
    }

    /// Check if this error indicates the file content is malformed
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::FormatMismatch { .. }
                | Error::TypeMismatch { .. }
                | Error::UnknownAssetType(_)
                | Error::InvalidCubeAsset(_)
                | Error::UnknownColorSpace(_)
                | Error::UnknownSection(_)
                | Error::Compression(_)
                | Error::BodyLengthMismatch { .. }
                | Error::InvalidUtf8(_)
        )
    }

    /// Check if this error comes from calling the codec out of order
    pub fn is_misuse(&self) -> bool {
        matches!(self, Error::ResourceMisuse(_))
    }
}
