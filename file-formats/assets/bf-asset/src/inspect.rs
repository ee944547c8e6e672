//! Format detection for files of unknown kind
//!
//! [`inspect`] reads the header without committing to an asset type, then
//! decompresses and parses whatever the tag names.

use std::io::Read;

use crate::cube::{CubeFace, FACE_COUNT};
use crate::geometry::Geometry;
use crate::header::{AssetType, FileHeader};
use crate::image::Image;
use crate::observer::{LoadObserver, LoadPhase};
use crate::options::ReadOptions;
use crate::stream::{BfReader, BodyInfo};
use crate::{Error, Result};

/// A parsed asset of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    /// Triangle mesh
    Geometry(Geometry),
    /// Layered image (cube files parse as plain images)
    Image(Image),
}

impl Asset {
    /// Asset kind
    pub fn asset_type(&self) -> AssetType {
        match self {
            Asset::Geometry(_) => AssetType::Geometry,
            Asset::Image(_) => AssetType::Image,
        }
    }
}

/// Everything known about a file after a full read
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    /// Header as stored
    pub header: FileHeader,
    /// Body frame
    pub body: BodyInfo,
    /// Parsed payload
    pub asset: Asset,
}

impl Inspection {
    /// Whether the image's first six layers form a complete face set
    pub fn is_cube(&self) -> bool {
        let Asset::Image(image) = &self.asset else {
            return false;
        };
        if image.layers.len() < FACE_COUNT {
            return false;
        }
        let mut seen = [false; FACE_COUNT];
        for layer in &image.layers[..FACE_COUNT] {
            if let Some(face) = CubeFace::from_token(&layer.name) {
                seen[face.index()] = true;
            }
        }
        seen.iter().all(|&s| s)
    }
}

/// Read a BF file of either asset type
pub fn inspect<R: Read>(source: R, options: &ReadOptions) -> Result<Inspection> {
    inspect_with_observer(source, options, &mut ())
}

/// Read a BF file of either asset type, reporting to an observer
pub fn inspect_with_observer<R, O>(
    source: R,
    options: &ReadOptions,
    observer: &mut O,
) -> Result<Inspection>
where
    R: Read,
    O: LoadObserver + ?Sized,
{
    let mut reader = BfReader::new(source);

    observer.phase_started(LoadPhase::Header);
    let header = reader.read_file_header()?;
    let asset_type = header
        .asset_type()
        .ok_or(Error::UnknownAssetType(header.asset_tag))?;
    if header.version > options.max_version {
        return Err(Error::UnsupportedVersion {
            version: header.version,
            max_supported: options.max_version,
        });
    }
    observer.phase_finished(LoadPhase::Header);
    log::debug!("Inspecting BF {asset_type}, version {}", header.version);

    observer.phase_started(LoadPhase::Decompress);
    let body = reader.decompress_body(observer)?;
    observer.phase_finished(LoadPhase::Decompress);

    observer.phase_started(LoadPhase::Parse);
    let asset = match asset_type {
        AssetType::Geometry => {
            Asset::Geometry(Geometry::read_payload(&mut reader, options, observer)?)
        }
        AssetType::Image => Asset::Image(Image::read_payload(&mut reader, observer)?),
    };
    observer.phase_finished(LoadPhase::Parse);

    let trailing = reader.remaining();
    if trailing > 0 {
        log::debug!("{trailing} bytes left unread in the body");
    }

    Ok(Inspection {
        header,
        body,
        asset,
    })
}
