//! BF file header: magic, asset type tag and version

use std::fmt;
use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::{Error, Result};

/// BF magic ('BF')
pub const BF_MAGIC: [u8; 2] = [b'B', b'F'];

/// Newest format version this crate reads and writes
pub const CURRENT_VERSION: u8 = 1;

/// Size of the header in bytes
pub const HEADER_SIZE: usize = 4;

/// Kind of asset stored in a BF file
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// Triangle mesh geometry
    Geometry = b'G',
    /// Raster image, flat or cube
    Image = b'I',
}

impl AssetType {
    /// Create from the raw tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'G' => Some(AssetType::Geometry),
            b'I' => Some(AssetType::Image),
            _ => None,
        }
    }

    /// Raw tag byte written to the header
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Geometry => write!(f, "geometry ('G')"),
            AssetType::Image => write!(f, "image ('I')"),
        }
    }
}

/// Raw header as found on disk
///
/// Only the magic has been checked; the type tag and version are whatever
/// the file contains. Use [`read_header`] to enforce the acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Raw asset type tag
    pub asset_tag: u8,
    /// Version byte
    pub version: u8,
}

impl FileHeader {
    /// Read a header, checking only the magic
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;
        if magic != BF_MAGIC {
            return Err(Error::FormatMismatch { found: magic });
        }

        let asset_tag = reader.read_u8()?;
        let version = reader.read_u8()?;

        log::trace!("BF header: tag=0x{asset_tag:02X} version={version}");

        Ok(Self { asset_tag, version })
    }

    /// Known asset type, if the tag is recognised
    pub fn asset_type(&self) -> Option<AssetType> {
        AssetType::from_tag(self.asset_tag)
    }
}

/// Write the magic, asset type and version
pub fn write_header<W: Write>(writer: &mut W, asset_type: AssetType, version: u8) -> Result<()> {
    writer.write_all(&BF_MAGIC)?;
    writer.write_u8(asset_type.tag())?;
    writer.write_u8(version)?;
    Ok(())
}

/// Read and validate a header, returning the version present
///
/// Checks run in wire order: magic, then asset type, then version. Nothing
/// past the fourth byte is consumed.
pub fn read_header<R: Read>(reader: &mut R, expected: AssetType, max_version: u8) -> Result<u8> {
    let header = FileHeader::read(reader)?;

    if header.asset_tag != expected.tag() {
        return Err(Error::TypeMismatch {
            expected,
            found: header.asset_tag,
        });
    }

    if header.version > max_version {
        return Err(Error::UnsupportedVersion {
            version: header.version,
            max_supported: max_version,
        });
    }

    Ok(header.version)
}
