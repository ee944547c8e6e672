//! Big-endian field codec used by every BF payload
//!
//! Scalars are fixed width. Strings and arrays carry a `u32` element count
//! followed by the elements.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use glam::{Vec2, Vec3};

use crate::{Error, Result};

/// Upper bound on elements reserved before they have actually been read
///
/// A corrupt length prefix must not be able to trigger a huge allocation on
/// its own; past this the vector grows as data arrives.
const MAX_PREALLOC_ELEMENTS: usize = 1 << 16;

/// Size of a `u32` length prefix
pub const LEN_PREFIX_SIZE: usize = 4;

/// Encoded size of a length-prefixed UTF-8 string
pub fn string_size(value: &str) -> usize {
    LEN_PREFIX_SIZE + value.len()
}

/// Encoded size of a length-prefixed `Vec3` array
pub fn vec3_array_size(values: &[Vec3]) -> usize {
    LEN_PREFIX_SIZE + values.len() * 12
}

/// Encoded size of a length-prefixed `Vec2` array
pub fn vec2_array_size(values: &[Vec2]) -> usize {
    LEN_PREFIX_SIZE + values.len() * 8
}

/// Encoded size of a length-prefixed `u32` array
pub fn u32_array_size(values: &[u32]) -> usize {
    LEN_PREFIX_SIZE + values.len() * 4
}

fn len_prefix(what: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::ValueTooLarge { what, len })
}

fn read_array<R, T, F>(reader: &mut R, mut read_one: F) -> Result<Vec<T>>
where
    R: Read + ?Sized,
    F: FnMut(&mut R) -> Result<T>,
{
    let len = reader.read_u32::<BigEndian>()? as usize;
    let mut values = Vec::with_capacity(len.min(MAX_PREALLOC_ELEMENTS));
    for _ in 0..len {
        values.push(read_one(reader)?);
    }
    Ok(values)
}

/// Extension trait for reading BF fields from a reader
pub trait BfReadExt: Read {
    /// Read a boolean stored as one byte (non-zero is `true`)
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a big-endian `u16`
    fn read_u16_be(&mut self) -> Result<u16> {
        Ok(self.read_u16::<BigEndian>()?)
    }

    /// Read a big-endian `u32`
    fn read_u32_be(&mut self) -> Result<u32> {
        Ok(self.read_u32::<BigEndian>()?)
    }

    /// Read a big-endian `i32`
    fn read_i32_be(&mut self) -> Result<i32> {
        Ok(self.read_i32::<BigEndian>()?)
    }

    /// Read a big-endian `f32`
    fn read_f32_be(&mut self) -> Result<f32> {
        Ok(self.read_f32::<BigEndian>()?)
    }

    /// Read a length-prefixed UTF-8 string
    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32::<BigEndian>()? as usize;
        let mut bytes = Vec::with_capacity(len.min(MAX_PREALLOC_ELEMENTS));
        (&mut *self).take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("string truncated: expected {len} bytes, got {}", bytes.len()),
            )
            .into());
        }
        Ok(String::from_utf8(bytes)?)
    }

    /// Read a single `Vec3`
    fn read_vec3(&mut self) -> Result<Vec3> {
        let x = self.read_f32::<BigEndian>()?;
        let y = self.read_f32::<BigEndian>()?;
        let z = self.read_f32::<BigEndian>()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read a single `Vec2`
    fn read_vec2(&mut self) -> Result<Vec2> {
        let x = self.read_f32::<BigEndian>()?;
        let y = self.read_f32::<BigEndian>()?;
        Ok(Vec2::new(x, y))
    }

    /// Read a length-prefixed `Vec3` array
    fn read_vec3_array(&mut self) -> Result<Vec<Vec3>> {
        read_array(self, |r| r.read_vec3())
    }

    /// Read a length-prefixed `Vec2` array
    fn read_vec2_array(&mut self) -> Result<Vec<Vec2>> {
        read_array(self, |r| r.read_vec2())
    }

    /// Read a length-prefixed `u32` array
    fn read_u32_array(&mut self) -> Result<Vec<u32>> {
        read_array(self, |r| Ok(r.read_u32::<BigEndian>()?))
    }
}

/// Extension trait for writing BF fields to a writer
pub trait BfWriteExt: Write {
    /// Write a boolean as one byte
    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))?;
        Ok(())
    }

    /// Write a big-endian `u16`
    fn write_u16_be(&mut self, value: u16) -> Result<()> {
        self.write_u16::<BigEndian>(value)?;
        Ok(())
    }

    /// Write a big-endian `u32`
    fn write_u32_be(&mut self, value: u32) -> Result<()> {
        self.write_u32::<BigEndian>(value)?;
        Ok(())
    }

    /// Write a big-endian `i32`
    fn write_i32_be(&mut self, value: i32) -> Result<()> {
        self.write_i32::<BigEndian>(value)?;
        Ok(())
    }

    /// Write a big-endian `f32`
    fn write_f32_be(&mut self, value: f32) -> Result<()> {
        self.write_f32::<BigEndian>(value)?;
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string
    fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_u32::<BigEndian>(len_prefix("string", value.len())?)?;
        self.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Write a single `Vec3`
    fn write_vec3(&mut self, value: Vec3) -> Result<()> {
        self.write_f32::<BigEndian>(value.x)?;
        self.write_f32::<BigEndian>(value.y)?;
        self.write_f32::<BigEndian>(value.z)?;
        Ok(())
    }

    /// Write a single `Vec2`
    fn write_vec2(&mut self, value: Vec2) -> Result<()> {
        self.write_f32::<BigEndian>(value.x)?;
        self.write_f32::<BigEndian>(value.y)?;
        Ok(())
    }

    /// Write a length-prefixed `Vec3` array
    fn write_vec3_array(&mut self, values: &[Vec3]) -> Result<()> {
        self.write_u32::<BigEndian>(len_prefix("Vec3 array", values.len())?)?;
        for value in values {
            self.write_vec3(*value)?;
        }
        Ok(())
    }

    /// Write a length-prefixed `Vec2` array
    fn write_vec2_array(&mut self, values: &[Vec2]) -> Result<()> {
        self.write_u32::<BigEndian>(len_prefix("Vec2 array", values.len())?)?;
        for value in values {
            self.write_vec2(*value)?;
        }
        Ok(())
    }

    /// Write a length-prefixed `u32` array
    fn write_u32_array(&mut self, values: &[u32]) -> Result<()> {
        self.write_u32::<BigEndian>(len_prefix("u32 array", values.len())?)?;
        for value in values {
            self.write_u32::<BigEndian>(*value)?;
        }
        Ok(())
    }
}

// Implement the traits for all types that implement Read/Write
impl<R: Read + ?Sized> BfReadExt for R {}
impl<W: Write + ?Sized> BfWriteExt for W {}
