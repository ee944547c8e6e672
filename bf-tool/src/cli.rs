//! Root CLI structure for bf-tool

use std::path::PathBuf;

use bf_asset::PixelFormat;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bf-tool")]
#[command(about = "Command-line tools for BF geometry and image assets", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about a BF file
    Info {
        /// Path to the BF file
        file: PathBuf,

        /// Show allocation totals and per-phase load times
        #[arg(long)]
        stats: bool,
    },

    /// Validate a BF file
    Validate {
        /// Path to the BF file
        file: PathBuf,

        /// Skip unknown geometry sections instead of failing
        #[arg(long)]
        lenient: bool,

        /// Highest file version to accept
        #[arg(long, value_name = "VERSION", default_value_t = bf_asset::CURRENT_VERSION)]
        max_version: u8,
    },

    /// Extract one layer of an image file
    Extract {
        /// Path to the BF image file
        file: PathBuf,

        /// Name of the layer to extract (case-insensitive)
        #[arg(short, long)]
        layer: String,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Write the raw raster bytes instead of a single-layer BF file
        #[arg(long)]
        raw: bool,
    },

    /// Pack six raw face rasters into a cube file
    ///
    /// The input directory must contain posx.raw, negx.raw, posy.raw,
    /// negy.raw, posz.raw and negz.raw.
    PackCube {
        /// Directory holding the face rasters
        input_dir: PathBuf,

        /// Output cube file
        output: PathBuf,

        /// Face width in pixels
        #[arg(long)]
        width: u16,

        /// Face height in pixels
        #[arg(long)]
        height: u16,

        /// Pixel format of every face
        #[arg(short, long, value_enum, default_value_t = FormatArg::Rgba8Srgb)]
        format: FormatArg,

        /// Zlib compression level (0-9)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
        compression_level: Option<u32>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Pixel formats selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// 8-bit RGBA, sRGB
    Rgba8Srgb,
    /// 8-bit RGBA, linear
    Rgba8Linear,
    /// 8-bit RGB, sRGB
    Rgb8Srgb,
    /// 8-bit single channel, linear
    R8Linear,
    /// 16-bit float RGBA, linear
    Rgba16fLinear,
    /// 32-bit float RGBA, linear
    Rgba32fLinear,
}

impl From<FormatArg> for PixelFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Rgba8Srgb => PixelFormat::RGBA8_SRGB,
            FormatArg::Rgba8Linear => PixelFormat::RGBA8_LINEAR,
            FormatArg::Rgb8Srgb => PixelFormat::RGB8_SRGB,
            FormatArg::R8Linear => PixelFormat::R8_LINEAR,
            FormatArg::Rgba16fLinear => PixelFormat::RGBA16F_LINEAR,
            FormatArg::Rgba32fLinear => PixelFormat::RGBA32F_LINEAR,
        }
    }
}
