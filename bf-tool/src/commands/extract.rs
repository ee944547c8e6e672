//! `extract` command: pull one layer out of an image file

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use bf_asset::Image;
use console::style;

use crate::utils::format_bytes;

pub fn execute(path: &Path, layer_name: &str, output: &Path, raw: bool) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let image = Image::read(BufReader::new(file))
        .with_context(|| format!("Failed to read BF image: {}", path.display()))?;

    let Some(layer) = image.layer(layer_name) else {
        let available: Vec<&str> = image.layers.iter().map(|l| l.name.as_str()).collect();
        anyhow::bail!(
            "Layer '{}' not found (available: {})",
            layer_name,
            available.join(", ")
        );
    };

    if raw {
        fs::write(output, &layer.data)
            .with_context(|| format!("Failed to write file: {}", output.display()))?;
    } else {
        let single = Image::single(
            image.width,
            image.height,
            layer.name.clone(),
            layer.format,
            layer.data.clone(),
        );
        single
            .save(output)
            .with_context(|| format!("Failed to write BF image: {}", output.display()))?;
    }

    log::info!("Extracted layer '{}' ({})", layer.name, layer.format);
    println!(
        "✓ Extracted '{}' ({}x{}, {}, {}) to {}",
        style(&layer.name).cyan(),
        image.width,
        image.height,
        layer.format,
        format_bytes(layer.data.len() as u64),
        style(output.display()).green()
    );

    Ok(())
}
