//! Geometry assets: tagged vertex attribute sections and an index array
//!
//! ```text
//! GeometryPayload := [1 Vec3Array]      positions (always written)
//!                    [2 Vec3Array]?     normals
//!                    [3 Vec2Array]?     texcoords
//!                    [4 Vec3Array]?     tangents
//!                    [5 Vec3Array]?     bitangents
//!                    6 U32Array         indices, ends the section scan
//! ```
//!
//! The writer emits sections in tag order. The reader accepts them in any
//! order until it meets the index tag.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{ReadBytesExt, WriteBytesExt};
use custom_debug::Debug;
use glam::{Vec2, Vec3};

use crate::debug;
use crate::header::AssetType;
use crate::io_ext::{self, BfReadExt, BfWriteExt};
use crate::observer::{LoadObserver, LoadPhase};
use crate::options::{ReadOptions, SectionStrictness, WriteOptions};
use crate::stream::{BfReader, BfWriter};
use crate::{Error, Result};

/// One-byte discriminator preceding each geometry array
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionTag {
    /// Vertex positions (`Vec3`)
    Positions = 1,
    /// Vertex normals (`Vec3`)
    Normals = 2,
    /// Texture coordinates (`Vec2`)
    Texcoords = 3,
    /// Tangents (`Vec3`)
    Tangents = 4,
    /// Bitangents (`Vec3`)
    Bitangents = 5,
    /// Triangle indices (`u32`)
    Indices = 6,
}

impl SectionTag {
    /// Create from the raw tag byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(SectionTag::Positions),
            2 => Some(SectionTag::Normals),
            3 => Some(SectionTag::Texcoords),
            4 => Some(SectionTag::Tangents),
            5 => Some(SectionTag::Bitangents),
            6 => Some(SectionTag::Indices),
            _ => None,
        }
    }

    /// Lowercase section name
    pub fn name(self) -> &'static str {
        match self {
            SectionTag::Positions => "positions",
            SectionTag::Normals => "normals",
            SectionTag::Texcoords => "texcoords",
            SectionTag::Tangents => "tangents",
            SectionTag::Bitangents => "bitangents",
            SectionTag::Indices => "indices",
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Triangle mesh geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    /// Vertex positions
    #[debug(with = debug::trimmed_collection_fmt)]
    pub positions: Vec<Vec3>,
    /// Per-vertex normals
    #[debug(with = debug::trimmed_optional_fmt)]
    pub normals: Option<Vec<Vec3>>,
    /// Per-vertex texture coordinates
    #[debug(with = debug::trimmed_optional_fmt)]
    pub texcoords: Option<Vec<Vec2>>,
    /// Per-vertex tangents
    #[debug(with = debug::trimmed_optional_fmt)]
    pub tangents: Option<Vec<Vec3>>,
    /// Per-vertex bitangents
    #[debug(with = debug::trimmed_optional_fmt)]
    pub bitangents: Option<Vec<Vec3>>,
    /// Triangle indices into the vertex arrays
    #[debug(with = debug::trimmed_collection_fmt)]
    pub indices: Vec<u32>,
}

/// Problem found by [`Geometry::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryIssue {
    /// A per-vertex attribute has a different length than `positions`
    AttributeLength {
        /// Offending section
        section: SectionTag,
        /// Length of the attribute array
        len: usize,
        /// Number of positions
        expected: usize,
    },
    /// An index points past the end of `positions`
    IndexOutOfRange {
        /// Position in the index array
        at: usize,
        /// The index value
        index: u32,
    },
    /// The index count is not a multiple of three
    IncompleteTriangle {
        /// Number of indices
        count: usize,
    },
}

impl fmt::Display for GeometryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryIssue::AttributeLength {
                section,
                len,
                expected,
            } => write!(f, "{section} has {len} entries, expected {expected}"),
            GeometryIssue::IndexOutOfRange { at, index } => {
                write!(f, "index {index} at position {at} is out of range")
            }
            GeometryIssue::IncompleteTriangle { count } => {
                write!(f, "{count} indices do not form whole triangles")
            }
        }
    }
}

impl Geometry {
    /// Create geometry from positions and indices
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            ..Self::default()
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Tags of the sections this geometry writes, in write order
    pub fn sections(&self) -> Vec<SectionTag> {
        let mut tags = vec![SectionTag::Positions];
        if self.normals.is_some() {
            tags.push(SectionTag::Normals);
        }
        if self.texcoords.is_some() {
            tags.push(SectionTag::Texcoords);
        }
        if self.tangents.is_some() {
            tags.push(SectionTag::Tangents);
        }
        if self.bitangents.is_some() {
            tags.push(SectionTag::Bitangents);
        }
        tags.push(SectionTag::Indices);
        tags
    }

    /// Exact size of the uncompressed payload
    pub fn encoded_body_size(&self) -> usize {
        let optional_vec3 = |v: &Option<Vec<Vec3>>| {
            v.as_deref().map_or(0, |v| 1 + io_ext::vec3_array_size(v))
        };

        1 + io_ext::vec3_array_size(&self.positions)
            + optional_vec3(&self.normals)
            + self
                .texcoords
                .as_deref()
                .map_or(0, |v| 1 + io_ext::vec2_array_size(v))
            + optional_vec3(&self.tangents)
            + optional_vec3(&self.bitangents)
            + 1
            + io_ext::u32_array_size(&self.indices)
    }

    /// Check the producer-side invariants the codec itself does not enforce
    pub fn validate(&self) -> Vec<GeometryIssue> {
        let mut issues = Vec::new();
        let expected = self.positions.len();

        let lengths = [
            (SectionTag::Normals, self.normals.as_ref().map(Vec::len)),
            (SectionTag::Texcoords, self.texcoords.as_ref().map(Vec::len)),
            (SectionTag::Tangents, self.tangents.as_ref().map(Vec::len)),
            (SectionTag::Bitangents, self.bitangents.as_ref().map(Vec::len)),
        ];
        for (section, len) in lengths {
            if let Some(len) = len {
                if len != expected {
                    issues.push(GeometryIssue::AttributeLength {
                        section,
                        len,
                        expected,
                    });
                }
            }
        }

        if self.indices.len() % 3 != 0 {
            issues.push(GeometryIssue::IncompleteTriangle {
                count: self.indices.len(),
            });
        }

        for (at, &index) in self.indices.iter().enumerate() {
            if index as usize >= expected {
                issues.push(GeometryIssue::IndexOutOfRange { at, index });
            }
        }

        issues
    }

    /// Write the payload (no header, no compression)
    pub fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(SectionTag::Positions as u8)?;
        writer.write_vec3_array(&self.positions)?;

        if let Some(normals) = &self.normals {
            writer.write_u8(SectionTag::Normals as u8)?;
            writer.write_vec3_array(normals)?;
        }
        if let Some(texcoords) = &self.texcoords {
            writer.write_u8(SectionTag::Texcoords as u8)?;
            writer.write_vec2_array(texcoords)?;
        }
        if let Some(tangents) = &self.tangents {
            writer.write_u8(SectionTag::Tangents as u8)?;
            writer.write_vec3_array(tangents)?;
        }
        if let Some(bitangents) = &self.bitangents {
            writer.write_u8(SectionTag::Bitangents as u8)?;
            writer.write_vec3_array(bitangents)?;
        }

        writer.write_u8(SectionTag::Indices as u8)?;
        writer.write_u32_array(&self.indices)?;
        Ok(())
    }

    /// Read a payload from an already decompressed body
    pub fn read_payload<R, O>(reader: &mut R, options: &ReadOptions, observer: &mut O) -> Result<Self>
    where
        R: Read + ?Sized,
        O: LoadObserver + ?Sized,
    {
        let mut geometry = Geometry::default();

        loop {
            let raw = reader.read_u8()?;
            match SectionTag::from_u8(raw) {
                Some(SectionTag::Positions) => geometry.positions = reader.read_vec3_array()?,
                Some(SectionTag::Normals) => geometry.normals = Some(reader.read_vec3_array()?),
                Some(SectionTag::Texcoords) => {
                    geometry.texcoords = Some(reader.read_vec2_array()?)
                }
                Some(SectionTag::Tangents) => geometry.tangents = Some(reader.read_vec3_array()?),
                Some(SectionTag::Bitangents) => {
                    geometry.bitangents = Some(reader.read_vec3_array()?)
                }
                Some(SectionTag::Indices) => break,
                None => match options.strictness {
                    SectionStrictness::Strict => return Err(Error::UnknownSection(raw)),
                    SectionStrictness::Lenient => {
                        log::warn!("Skipping unknown geometry section tag {raw}");
                        continue;
                    }
                },
            }
            log::trace!("Read geometry section {raw}");
        }

        geometry.indices = reader.read_u32_array()?;
        observer.indices_read(geometry.indices.len());
        observer.allocated(geometry.indices.len() * 4);

        Ok(geometry)
    }

    /// Write a complete BF geometry file
    pub fn write<W: Write>(&self, sink: W) -> Result<W> {
        self.write_with_options(sink, WriteOptions::default())
    }

    /// Write a complete BF geometry file with explicit options
    pub fn write_with_options<W: Write>(&self, sink: W, options: WriteOptions) -> Result<W> {
        let mut writer = BfWriter::with_options(sink, options);
        writer.write_header(AssetType::Geometry)?;
        writer.begin_compressed_body(self.encoded_body_size())?;
        self.write_payload(&mut writer)?;
        writer.end_compressed_body()?;
        writer.finish()
    }

    /// Read a complete BF geometry file with the default options
    pub fn read<R: Read>(source: R) -> Result<Self> {
        Self::read_with_options(source, &ReadOptions::default(), &mut ())
    }

    /// Read a complete BF geometry file
    pub fn read_with_options<R, O>(source: R, options: &ReadOptions, observer: &mut O) -> Result<Self>
    where
        R: Read,
        O: LoadObserver + ?Sized,
    {
        let mut reader = BfReader::new(source);

        observer.phase_started(LoadPhase::Header);
        let version = reader.read_header(AssetType::Geometry, options.max_version)?;
        observer.phase_finished(LoadPhase::Header);
        log::debug!("Reading BF geometry, version {version}");

        observer.phase_started(LoadPhase::Decompress);
        reader.decompress_body(observer)?;
        observer.phase_finished(LoadPhase::Decompress);

        observer.phase_started(LoadPhase::Parse);
        let geometry = Self::read_payload(&mut reader, options, observer)?;
        observer.phase_finished(LoadPhase::Parse);

        if reader.remaining() > 0 {
            log::debug!(
                "{} unread bytes after geometry payload",
                reader.remaining()
            );
        }

        Ok(geometry)
    }

    /// Load a geometry file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Save a geometry file to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = self.write(BufWriter::new(file))?;
        writer.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }
}
