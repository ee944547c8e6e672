//! `validate` command: full read plus producer-side checks

use std::path::Path;

use anyhow::{Context, Result};
use bf_asset::{Asset, CubeFace, CubeImage, ReadOptions, SectionStrictness};
use console::style;

pub fn execute(path: &Path, lenient: bool, max_version: u8) -> Result<()> {
    let strictness = if lenient {
        SectionStrictness::Lenient
    } else {
        SectionStrictness::Strict
    };
    let options = ReadOptions::new()
        .with_max_version(max_version)
        .with_strictness(strictness);

    let inspection = super::inspect_file(path, &options, &mut ())?;

    match inspection.asset {
        Asset::Geometry(geometry) => {
            let issues = geometry.validate();
            if !issues.is_empty() {
                for issue in &issues {
                    log::warn!("{issue}");
                    println!("  {} {issue}", style("✗").red());
                }
                anyhow::bail!("Validation failed: {} issue(s)", issues.len());
            }
            println!(
                "✓ Geometry file '{}' is valid ({} vertices, {} triangles)",
                style(path.display()).cyan(),
                geometry.vertex_count(),
                geometry.triangle_count()
            );
        }
        Asset::Image(image) => {
            let layers = image.layers.len();
            let looks_like_cube = image
                .layers
                .iter()
                .any(|layer| CubeFace::from_token(&layer.name).is_some());
            let kind = if looks_like_cube {
                CubeImage::from_image(image).context("Validation failed")?;
                "cube"
            } else {
                "image"
            };
            println!(
                "✓ {} file '{}' is valid ({layers} layer(s))",
                kind,
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}
