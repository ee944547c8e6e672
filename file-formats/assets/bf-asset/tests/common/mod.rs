//! Common test utilities and fixtures

#![allow(dead_code)]

use bf_asset::{CubeFace, Geometry, Image, Layer, PixelFormat};
use glam::{Vec2, Vec3};
use tempfile::TempDir;

/// Create a temporary directory for tests
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// A unit quad: four vertices, two triangles
pub fn quad() -> Geometry {
    Geometry::new(
        vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// A quad with every optional attribute filled in
pub fn full_quad() -> Geometry {
    let mut geometry = quad();
    geometry.normals = Some(vec![Vec3::Z; 4]);
    geometry.texcoords = Some(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ]);
    geometry.tangents = Some(vec![Vec3::X; 4]);
    geometry.bitangents = Some(vec![Vec3::Y; 4]);
    geometry
}

/// Generate a raster of the right size for `format`
pub fn raster(width: u16, height: u16, format: PixelFormat, seed: u8) -> Vec<u8> {
    (0..format.raster_len(width, height))
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// Image with one layer per name, all RGBA8 sRGB
pub fn image_named(width: u16, height: u16, names: &[&str]) -> Image {
    let mut image = Image::new(width, height);
    for (i, name) in names.iter().enumerate() {
        let format = PixelFormat::RGBA8_SRGB;
        image
            .layers
            .push(Layer::new(*name, format, raster(width, height, format, i as u8)));
    }
    image
}

/// The six face tokens in storage order
pub fn face_tokens() -> Vec<&'static str> {
    CubeFace::ALL.iter().map(|face| face.token()).collect()
}
