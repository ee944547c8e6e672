//! # bf_asset - BF Asset Container Library
//!
//! Reader and writer for BF files, a small binary container for triangle
//! meshes and layered raster images, including six-sided cube textures.
//!
//! ## Features
//!
//! - Magic, asset type and version header with strict acceptance checks
//! - Whole-body zlib compression with verified decompressed length
//! - Geometry with optional normals, texcoords, tangents and bitangents
//! - Multi-layer images, a single-layer entry point and cube assembly
//! - Load instrumentation through the [`LoadObserver`] trait
//!
//! ## File layout
//!
//! ```text
//! File   := Header Body
//! Header := 'B' 'F' assetType(u8) version(u8)
//! Body   := uncompressedLen(u32) compressedLen(u32) compressedBytes
//! ```
//!
//! All integers and floats are big-endian.
//!
//! ## Examples
//!
//! ### Geometry
//!
//! ```
//! use bf_asset::Geometry;
//! use glam::Vec3;
//!
//! # fn main() -> Result<(), bf_asset::Error> {
//! let mesh = Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]);
//! let bytes = mesh.write(Vec::new())?;
//!
//! let loaded = Geometry::read(bytes.as_slice())?;
//! assert_eq!(loaded.triangle_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ### Images and cubes
//!
//! ```no_run
//! use bf_asset::{CubeFace, CubeImage, Image};
//!
//! # fn main() -> Result<(), bf_asset::Error> {
//! let albedo = Image::load("albedo.bf")?;
//! println!("{}x{} with {} layers", albedo.width, albedo.height, albedo.layers.len());
//!
//! let sky = CubeImage::load("sky.bf")?;
//! let top = sky.face(CubeFace::PosY);
//! println!("top face: {} ({} bytes)", top.format, top.data.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Collecting load statistics
//!
//! ```
//! use bf_asset::{Geometry, LoadStats, ReadOptions};
//! use glam::Vec3;
//!
//! # fn main() -> Result<(), bf_asset::Error> {
//! let bytes = Geometry::new(vec![Vec3::ZERO; 3], vec![0, 1, 2]).write(Vec::new())?;
//!
//! let mut stats = LoadStats::new();
//! Geometry::read_with_options(bytes.as_slice(), &ReadOptions::default(), &mut stats)?;
//! assert_eq!(stats.index_count, 3);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod compression;
pub mod cube;
pub mod debug;
pub mod error;
pub mod format;
pub mod geometry;
pub mod header;
pub mod image;
pub mod inspect;
pub mod io_ext;
pub mod observer;
pub mod options;
pub mod stream;

pub use compression::CompressionAlgorithm;
pub use cube::{CubeFace, CubeImage};
pub use error::{Error, Result};
pub use format::{ColorSpace, PixelFormat};
pub use geometry::{Geometry, GeometryIssue, SectionTag};
pub use header::{AssetType, BF_MAGIC, CURRENT_VERSION, FileHeader};
pub use image::{Image, Layer};
pub use inspect::{Asset, Inspection, inspect};
pub use observer::{LoadObserver, LoadPhase, LoadStats};
pub use options::{ReadOptions, SectionStrictness, WriteOptions};
pub use stream::{BfReader, BfWriter, BodyInfo};
