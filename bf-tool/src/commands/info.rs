//! `info` command: header, body and asset summary

use std::path::Path;

use anyhow::Result;
use bf_asset::{Asset, Geometry, Image, Inspection, LoadPhase, LoadStats, ReadOptions};
use console::style;

use crate::utils::{format_body, format_bytes, format_duration};

pub fn execute(path: &Path, show_stats: bool) -> Result<()> {
    let mut stats = LoadStats::new();
    let inspection = super::inspect_file(path, &ReadOptions::default(), &mut stats)?;

    print_summary(path, &inspection);

    if show_stats {
        print_stats(&stats);
    }

    Ok(())
}

fn print_summary(path: &Path, inspection: &Inspection) {
    let body = inspection.body;

    println!("\n{}", style("BF File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Type: {}",
        style(inspection.asset.asset_type()).yellow()
    );
    println!("Version: {}", style(inspection.header.version).yellow());
    println!("Compression: {}", body.algorithm);
    println!("Body: {}", format_body(&body));

    match &inspection.asset {
        Asset::Geometry(geometry) => print_geometry(geometry),
        Asset::Image(image) => print_image(image, inspection.is_cube()),
    }
}

fn print_geometry(geometry: &Geometry) {
    println!("\n{}", style("Geometry").bold());
    println!("Vertices: {}", style(geometry.vertex_count()).green());
    println!("Triangles: {}", style(geometry.triangle_count()).green());
    println!("Indices: {}", geometry.indices.len());

    let sections: Vec<String> = geometry
        .sections()
        .iter()
        .map(|section| section.to_string())
        .collect();
    println!("Sections: {}", sections.join(", "));
}

fn print_image(image: &Image, is_cube: bool) {
    println!("\n{}", style("Image").bold());
    println!(
        "Dimensions: {}x{}",
        style(image.width).green(),
        style(image.height).green()
    );
    println!("Layers: {}", style(image.layers.len()).green());
    if is_cube {
        println!("Cube: {}", style("yes").green());
    }

    for (i, layer) in image.layers.iter().enumerate() {
        println!(
            "  [{i}] {} - {} ({})",
            style(&layer.name).cyan(),
            layer.format,
            format_bytes(layer.data.len() as u64)
        );
    }
}

fn print_stats(stats: &LoadStats) {
    println!("\n{}", style("Load Statistics").bold());
    println!("Allocated: {}", format_bytes(stats.allocated_bytes));
    if stats.index_count > 0 {
        println!("Indices read: {}", stats.index_count);
    }
    for phase in [LoadPhase::Header, LoadPhase::Decompress, LoadPhase::Parse] {
        println!("  {phase}: {}", format_duration(stats.time_in(phase)));
    }
}
