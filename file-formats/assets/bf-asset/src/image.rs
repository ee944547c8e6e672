//! Image assets: named raster layers sharing one size
//!
//! ```text
//! ImagePayload := width(u16) height(u16) layerCount(u8)
//!                 layerCount × { nameStr FormatDesc rasterBytes }
//! ```
//!
//! Raster bytes carry no length prefix; their size follows from the image
//! dimensions and the layer's pixel format.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{ReadBytesExt, WriteBytesExt};
use custom_debug::Debug;

use crate::debug;
use crate::format::{FORMAT_DESCRIPTOR_SIZE, PixelFormat};
use crate::header::AssetType;
use crate::io_ext::{self, BfReadExt, BfWriteExt};
use crate::observer::{LoadObserver, LoadPhase};
use crate::options::{ReadOptions, WriteOptions};
use crate::stream::{BfReader, BfWriter};
use crate::{Error, Result};

/// Most layers a single image can hold
pub const MAX_LAYERS: usize = u8::MAX as usize;

/// One named raster plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Layer name; cube faces use the face tokens
    pub name: String,
    /// Pixel layout of `data`
    pub format: PixelFormat,
    /// Raw raster bytes, row-major
    #[debug(with = debug::trimmed_collection_fmt)]
    pub data: Vec<u8>,
}

impl Layer {
    /// Create a layer
    pub fn new<S: Into<String>>(name: S, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format,
            data,
        }
    }

    /// Whether the name matches, ignoring ASCII case
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    fn encoded_size(&self) -> usize {
        io_ext::string_size(&self.name) + FORMAT_DESCRIPTOR_SIZE + self.data.len()
    }

    /// Check that the raster matches the dimensions and format
    pub fn check_raster(&self, width: u16, height: u16) -> Result<()> {
        let expected = self.format.raster_len(width, height);
        if self.data.len() != expected {
            return Err(Error::RasterSizeMismatch {
                layer: self.name.clone(),
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Write name, format and raster
    pub(crate) fn write<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        width: u16,
        height: u16,
    ) -> Result<()> {
        self.write_as(&self.name, writer, width, height)
    }

    /// Write the layer under a different name
    pub(crate) fn write_as<W: Write + ?Sized>(
        &self,
        name: &str,
        writer: &mut W,
        width: u16,
        height: u16,
    ) -> Result<()> {
        self.check_raster(width, height)?;

        writer.write_string(name)?;
        self.format.write(writer)?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    /// Read name, format and raster
    pub(crate) fn read<R, O>(reader: &mut R, width: u16, height: u16, observer: &mut O) -> Result<Self>
    where
        R: Read + ?Sized,
        O: LoadObserver + ?Sized,
    {
        let name = reader.read_string()?;
        let format = PixelFormat::read(reader)?;

        let len = format.raster_len(width, height);
        let mut data = Vec::new();
        (&mut *reader).take(len as u64).read_to_end(&mut data)?;
        if data.len() != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "layer '{name}' truncated: expected {len} raster bytes, got {}",
                    data.len()
                ),
            )
            .into());
        }
        observer.allocated(data.len());

        log::trace!("Read layer '{name}' ({format}, {len} bytes)");
        Ok(Self { name, format, data })
    }
}

/// Raster image with one or more layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Layers in write order
    pub layers: Vec<Layer>,
}

/// Dimensions and layer count read from the start of an image payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImagePreamble {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) layer_count: usize,
}

impl ImagePreamble {
    pub(crate) fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let width = reader.read_u16_be()?;
        let height = reader.read_u16_be()?;
        let layer_count = usize::from(reader.read_u8()?);
        log::trace!("Image {width}x{height} with {layer_count} layers");
        Ok(Self {
            width,
            height,
            layer_count,
        })
    }
}

impl Image {
    /// Create an image without layers
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// Create a single-layer image
    pub fn single<S: Into<String>>(
        width: u16,
        height: u16,
        name: S,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            layers: vec![Layer::new(name, format, data)],
        }
    }

    /// Append a layer
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// First layer whose name matches, ignoring ASCII case
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.is_named(name))
    }

    /// Exact size of the uncompressed payload
    pub fn encoded_body_size(&self) -> usize {
        2 + 2 + 1 + self.layers.iter().map(Layer::encoded_size).sum::<usize>()
    }

    /// Write the payload (no header, no compression)
    pub fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        if self.layers.len() > MAX_LAYERS {
            return Err(Error::LayerCountOverflow(self.layers.len()));
        }

        writer.write_u16_be(self.width)?;
        writer.write_u16_be(self.height)?;
        writer.write_u8(self.layers.len() as u8)?;
        for layer in &self.layers {
            layer.write(writer, self.width, self.height)?;
        }
        Ok(())
    }

    /// Read a payload with every layer from an already decompressed body
    pub fn read_payload<R, O>(reader: &mut R, observer: &mut O) -> Result<Self>
    where
        R: Read + ?Sized,
        O: LoadObserver + ?Sized,
    {
        let preamble = ImagePreamble::read(reader)?;
        let mut layers = Vec::with_capacity(preamble.layer_count);
        for _ in 0..preamble.layer_count {
            layers.push(Layer::read(
                reader,
                preamble.width,
                preamble.height,
                observer,
            )?);
        }

        Ok(Self {
            width: preamble.width,
            height: preamble.height,
            layers,
        })
    }

    /// Write a complete BF image file
    pub fn write<W: Write>(&self, sink: W) -> Result<W> {
        self.write_with_options(sink, WriteOptions::default())
    }

    /// Write a complete BF image file with explicit options
    pub fn write_with_options<W: Write>(&self, sink: W, options: WriteOptions) -> Result<W> {
        // Fail before anything reaches the sink
        if self.layers.len() > MAX_LAYERS {
            return Err(Error::LayerCountOverflow(self.layers.len()));
        }
        for layer in &self.layers {
            layer.check_raster(self.width, self.height)?;
        }

        let mut writer = BfWriter::with_options(sink, options);
        writer.write_header(AssetType::Image)?;
        writer.begin_compressed_body(self.encoded_body_size())?;
        self.write_payload(&mut writer)?;
        writer.end_compressed_body()?;
        writer.finish()
    }

    /// Read a complete BF image file with all its layers
    pub fn read<R: Read>(source: R) -> Result<Self> {
        Self::read_with_options(source, &ReadOptions::default(), &mut ())
    }

    /// Read a complete BF image file with all its layers
    pub fn read_with_options<R, O>(source: R, options: &ReadOptions, observer: &mut O) -> Result<Self>
    where
        R: Read,
        O: LoadObserver + ?Sized,
    {
        let mut reader = open_image(source, options, observer)?;

        observer.phase_started(LoadPhase::Parse);
        let image = Self::read_payload(&mut reader, observer)?;
        observer.phase_finished(LoadPhase::Parse);

        Ok(image)
    }

    /// Read an image file that must hold exactly one layer
    ///
    /// Fails with [`Error::TooManyLayers`] if the file stores more than one
    /// layer and [`Error::EmptyImage`] if it stores none.
    pub fn read_single_layer<R: Read>(source: R) -> Result<Self> {
        Self::read_single_layer_with_options(source, &ReadOptions::default(), &mut ())
    }

    /// Read an image file that must hold exactly one layer
    pub fn read_single_layer_with_options<R, O>(
        source: R,
        options: &ReadOptions,
        observer: &mut O,
    ) -> Result<Self>
    where
        R: Read,
        O: LoadObserver + ?Sized,
    {
        let mut reader = open_image(source, options, observer)?;

        observer.phase_started(LoadPhase::Parse);
        let preamble = ImagePreamble::read(&mut reader)?;
        match preamble.layer_count {
            0 => return Err(Error::EmptyImage),
            1 => {}
            n => return Err(Error::TooManyLayers(n)),
        }
        let layer = Layer::read(&mut reader, preamble.width, preamble.height, observer)?;
        observer.phase_finished(LoadPhase::Parse);

        Ok(Self {
            width: preamble.width,
            height: preamble.height,
            layers: vec![layer],
        })
    }

    /// Load an image file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Save an image file to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = self.write(BufWriter::new(file))?;
        writer.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }
}

/// Read the header and decompress the body of an image file
pub(crate) fn open_image<R, O>(source: R, options: &ReadOptions, observer: &mut O) -> Result<BfReader<R>>
where
    R: Read,
    O: LoadObserver + ?Sized,
{
    let mut reader = BfReader::new(source);

    observer.phase_started(LoadPhase::Header);
    let version = reader.read_header(AssetType::Image, options.max_version)?;
    observer.phase_finished(LoadPhase::Header);
    log::debug!("Reading BF image, version {version}");

    observer.phase_started(LoadPhase::Decompress);
    reader.decompress_body(observer)?;
    observer.phase_finished(LoadPhase::Decompress);

    Ok(reader)
}
