//! Cube textures: six face layers stored as an image asset
//!
//! A cube file is an ordinary image file whose first six layers are named by
//! the face tokens `posx`, `negx`, `posy`, `negy`, `posz` and `negz`. Names
//! are matched without regard to ASCII case and in any order.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use byteorder::WriteBytesExt;

use crate::header::AssetType;
use crate::image::{Image, ImagePreamble, Layer, open_image};
use crate::io_ext::BfWriteExt;
use crate::observer::{LoadObserver, LoadPhase};
use crate::options::{ReadOptions, WriteOptions};
use crate::stream::BfWriter;
use crate::{Error, Result};

/// Number of faces in a cube
pub const FACE_COUNT: usize = 6;

/// One side of a cube texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CubeFace {
    /// +X
    PosX = 0,
    /// -X
    NegX = 1,
    /// +Y
    PosY = 2,
    /// -Y
    NegY = 3,
    /// +Z
    PosZ = 4,
    /// -Z
    NegZ = 5,
}

impl CubeFace {
    /// All faces in storage order
    pub const ALL: [CubeFace; FACE_COUNT] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Layer name used for this face
    pub fn token(self) -> &'static str {
        match self {
            CubeFace::PosX => "posx",
            CubeFace::NegX => "negx",
            CubeFace::PosY => "posy",
            CubeFace::NegY => "negy",
            CubeFace::PosZ => "posz",
            CubeFace::NegZ => "negz",
        }
    }

    /// Match a layer name against the face tokens, ignoring ASCII case
    pub fn from_token(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|face| face.token().eq_ignore_ascii_case(name))
    }

    /// Position in [`CubeFace::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CubeFace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
            .ok_or_else(|| Error::invalid_cube(format!("'{s}' is not a cube face name")))
    }
}

/// Routes layers to face slots
#[derive(Default)]
struct FaceSlots {
    slots: [Option<Layer>; FACE_COUNT],
}

impl FaceSlots {
    fn place(&mut self, layer: Layer) {
        let Some(face) = CubeFace::from_token(&layer.name) else {
            log::warn!(
                "Dropping layer '{}': not a cube face name",
                layer.name
            );
            return;
        };

        let slot = &mut self.slots[face.index()];
        if let Some(previous) = slot {
            log::warn!(
                "Cube face {face} given twice ('{}' then '{}'); keeping the later one",
                previous.name,
                layer.name
            );
        }
        *slot = Some(layer);
    }

    fn into_faces(self) -> Result<[Layer; FACE_COUNT]> {
        let missing: Vec<&str> = CubeFace::ALL
            .into_iter()
            .filter(|face| self.slots[face.index()].is_none())
            .map(CubeFace::token)
            .collect();
        if !missing.is_empty() {
            return Err(Error::invalid_cube(format!(
                "missing faces: {}",
                missing.join(", ")
            )));
        }

        let faces: Vec<Layer> = self.slots.into_iter().flatten().collect();
        faces
            .try_into()
            .map_err(|_| Error::invalid_cube("face slots inconsistent"))
    }
}

fn check_layer_count(count: usize) -> Result<()> {
    if count < FACE_COUNT {
        return Err(Error::invalid_cube(format!(
            "expected at least {FACE_COUNT} layers, found {count}"
        )));
    }
    if count > FACE_COUNT {
        log::warn!(
            "Cube asset has {count} layers; only the first {FACE_COUNT} are used"
        );
    }
    Ok(())
}

/// Six-sided cube texture
///
/// Faces are stored in [`CubeFace::ALL`] order. All faces share the cube's
/// width and height but may use different pixel formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeImage {
    /// Face width in pixels
    pub width: u16,
    /// Face height in pixels
    pub height: u16,
    faces: [Layer; FACE_COUNT],
}

impl CubeImage {
    /// Create a cube from faces given in [`CubeFace::ALL`] order
    ///
    /// Layer names are replaced by the face tokens.
    pub fn new(width: u16, height: u16, faces: [Layer; FACE_COUNT]) -> Self {
        let mut faces = faces;
        for (layer, face) in faces.iter_mut().zip(CubeFace::ALL) {
            if !layer.is_named(face.token()) {
                layer.name = face.token().to_string();
            }
        }
        Self {
            width,
            height,
            faces,
        }
    }

    /// Layer for one face
    pub fn face(&self, face: CubeFace) -> &Layer {
        &self.faces[face.index()]
    }

    /// Mutable layer for one face
    pub fn face_mut(&mut self, face: CubeFace) -> &mut Layer {
        &mut self.faces[face.index()]
    }

    /// Iterate faces in storage order
    pub fn faces(&self) -> impl Iterator<Item = (CubeFace, &Layer)> {
        CubeFace::ALL.into_iter().zip(self.faces.iter())
    }

    /// Assemble a cube from an in-memory image
    ///
    /// Uses the first six layers with the same routing as reading a file.
    pub fn from_image(image: Image) -> Result<Self> {
        check_layer_count(image.layers.len())?;

        let mut slots = FaceSlots::default();
        for layer in image.layers.into_iter().take(FACE_COUNT) {
            slots.place(layer);
        }

        Ok(Self {
            width: image.width,
            height: image.height,
            faces: slots.into_faces()?,
        })
    }

    /// Flatten into a six-layer image named by face tokens
    pub fn into_image(self) -> Image {
        let mut layers = Vec::with_capacity(FACE_COUNT);
        for (mut layer, face) in self.faces.into_iter().zip(CubeFace::ALL) {
            layer.name = face.token().to_string();
            layers.push(layer);
        }
        Image {
            width: self.width,
            height: self.height,
            layers,
        }
    }

    /// Exact size of the uncompressed payload
    pub fn encoded_body_size(&self) -> usize {
        let mut size = 2 + 2 + 1;
        for (face, layer) in self.faces() {
            size += crate::io_ext::string_size(face.token())
                + crate::format::FORMAT_DESCRIPTOR_SIZE
                + layer.data.len();
        }
        size
    }

    /// Write the payload (no header, no compression)
    pub fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16_be(self.width)?;
        writer.write_u16_be(self.height)?;
        writer.write_u8(FACE_COUNT as u8)?;
        for (face, layer) in self.faces() {
            layer.write_as(face.token(), writer, self.width, self.height)?;
        }
        Ok(())
    }

    /// Read a cube payload from an already decompressed body
    pub fn read_payload<R, O>(reader: &mut R, observer: &mut O) -> Result<Self>
    where
        R: Read + ?Sized,
        O: LoadObserver + ?Sized,
    {
        let preamble = ImagePreamble::read(reader)?;
        check_layer_count(preamble.layer_count)?;

        let mut slots = FaceSlots::default();
        for _ in 0..FACE_COUNT {
            let layer = Layer::read(reader, preamble.width, preamble.height, observer)?;
            slots.place(layer);
        }

        Ok(Self {
            width: preamble.width,
            height: preamble.height,
            faces: slots.into_faces()?,
        })
    }

    /// Write a complete BF cube file
    pub fn write<W: Write>(&self, sink: W) -> Result<W> {
        self.write_with_options(sink, WriteOptions::default())
    }

    /// Write a complete BF cube file with explicit options
    pub fn write_with_options<W: Write>(&self, sink: W, options: WriteOptions) -> Result<W> {
        for layer in &self.faces {
            layer.check_raster(self.width, self.height)?;
        }

        let mut writer = BfWriter::with_options(sink, options);
        writer.write_header(AssetType::Image)?;
        writer.begin_compressed_body(self.encoded_body_size())?;
        self.write_payload(&mut writer)?;
        writer.end_compressed_body()?;
        writer.finish()
    }

    /// Read a complete BF cube file
    pub fn read<R: Read>(source: R) -> Result<Self> {
        Self::read_with_options(source, &ReadOptions::default(), &mut ())
    }

    /// Read a complete BF cube file
    pub fn read_with_options<R, O>(source: R, options: &ReadOptions, observer: &mut O) -> Result<Self>
    where
        R: Read,
        O: LoadObserver + ?Sized,
    {
        let mut reader = open_image(source, options, observer)?;

        observer.phase_started(LoadPhase::Parse);
        let cube = Self::read_payload(&mut reader, observer)?;
        observer.phase_finished(LoadPhase::Parse);

        Ok(cube)
    }

    /// Load a cube file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Save a cube file to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = self.write(BufWriter::new(file))?;
        writer.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }
}
