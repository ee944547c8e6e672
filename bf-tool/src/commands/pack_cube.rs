//! `pack-cube` command: six raw face rasters into one cube file

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bf_asset::{CubeFace, CubeImage, Layer, PixelFormat, WriteOptions};
use console::style;

use crate::utils::format_size_change;

pub fn execute(
    input_dir: &Path,
    output: &Path,
    width: u16,
    height: u16,
    format: PixelFormat,
    compression_level: Option<u32>,
) -> Result<()> {
    let expected = format.raster_len(width, height);

    let mut faces = Vec::with_capacity(CubeFace::ALL.len());
    for face in CubeFace::ALL {
        let path = input_dir.join(format!("{}.raw", face.token()));
        let data = fs::read(&path)
            .with_context(|| format!("Failed to read face {face}: {}", path.display()))?;
        if data.len() != expected {
            anyhow::bail!(
                "Face {} is {} bytes, expected {} for {}x{} {}",
                face,
                data.len(),
                expected,
                width,
                height,
                format
            );
        }
        log::debug!("Loaded face {face} from {}", path.display());
        faces.push(Layer::new(face.token(), format, data));
    }

    let faces: [Layer; 6] = faces
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected exactly six faces"))?;
    let cube = CubeImage::new(width, height, faces);

    let mut options = WriteOptions::default();
    if let Some(level) = compression_level {
        options = options.with_compression_level(level);
    }

    let bytes = cube
        .write_with_options(Vec::new(), options)
        .context("Failed to encode cube")?;
    fs::write(output, &bytes)
        .with_context(|| format!("Failed to write file: {}", output.display()))?;

    let raw_size = cube.encoded_body_size() as u64;
    println!(
        "✓ Packed cube {}x{} ({}) to {}: {}",
        width,
        height,
        format,
        style(output.display()).green(),
        format_size_change(raw_size, bytes.len() as u64)
    );

    Ok(())
}
