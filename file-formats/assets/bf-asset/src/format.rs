//! Pixel format descriptor shared by image layers
//!
//! On disk a descriptor is three bytes in the order
//! `bits_per_pixel, channels, color_space`. In memory it is built as
//! `(channels, bits_per_pixel, color_space)`.

use std::fmt;
use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::{Error, Result};

/// Encoded size of a pixel format descriptor
pub const FORMAT_DESCRIPTOR_SIZE: usize = 3;

/// Color space of the raster samples
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorSpace {
    /// Linear samples (normal maps, masks, HDR)
    Linear = 0,
    /// sRGB-encoded color samples
    Srgb = 1,
}

impl ColorSpace {
    /// Create from the wire code
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ColorSpace::Linear),
            1 => Ok(ColorSpace::Srgb),
            other => Err(Error::UnknownColorSpace(other)),
        }
    }

    /// Wire code
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpace::Linear => write!(f, "linear"),
            ColorSpace::Srgb => write!(f, "sRGB"),
        }
    }
}

/// Layout of one pixel in a raster layer
///
/// Hashable so that renderers can key their device-format tables on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelFormat {
    /// Number of channels per pixel
    pub channels: u8,
    /// Total bits per pixel across all channels
    pub bits_per_pixel: u8,
    /// Color space of the samples
    pub color_space: ColorSpace,
}

impl PixelFormat {
    /// 8-bit RGBA, sRGB encoded
    pub const RGBA8_SRGB: Self = Self::new(4, 32, ColorSpace::Srgb);
    /// 8-bit RGBA, linear
    pub const RGBA8_LINEAR: Self = Self::new(4, 32, ColorSpace::Linear);
    /// 8-bit RGB, sRGB encoded
    pub const RGB8_SRGB: Self = Self::new(3, 24, ColorSpace::Srgb);
    /// 8-bit single channel, linear
    pub const R8_LINEAR: Self = Self::new(1, 8, ColorSpace::Linear);
    /// 16-bit float RGBA, linear
    pub const RGBA16F_LINEAR: Self = Self::new(4, 64, ColorSpace::Linear);
    /// 32-bit float RGBA, linear (widest format: 128 bits per pixel)
    pub const RGBA32F_LINEAR: Self = Self::new(4, 128, ColorSpace::Linear);

    /// Create a descriptor
    pub const fn new(channels: u8, bits_per_pixel: u8, color_space: ColorSpace) -> Self {
        Self {
            channels,
            bits_per_pixel,
            color_space,
        }
    }

    /// Bytes per pixel, rounded up for sub-byte formats
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel).div_ceil(8)
    }

    /// Size in bytes of a `width` x `height` raster in this format
    pub fn raster_len(&self, width: u16, height: u16) -> usize {
        let bits = usize::from(width) * usize::from(height) * usize::from(self.bits_per_pixel);
        bits.div_ceil(8)
    }

    /// Read a descriptor in wire order
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let bits_per_pixel = reader.read_u8()?;
        let channels = reader.read_u8()?;
        let color_space = ColorSpace::from_code(reader.read_u8()?)?;
        Ok(Self::new(channels, bits_per_pixel, color_space))
    }

    /// Write a descriptor in wire order
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.bits_per_pixel)?;
        writer.write_u8(self.channels)?;
        writer.write_u8(self.color_space.code())?;
        Ok(())
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}ch/{}bpp {}",
            self.channels, self.bits_per_pixel, self.color_space
        )
    }
}
