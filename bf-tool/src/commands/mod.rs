//! Command implementations

pub mod extract;
pub mod info;
pub mod pack_cube;
pub mod validate;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use bf_asset::{Inspection, LoadObserver, ReadOptions};

/// Open and fully parse a BF file of either kind
pub(crate) fn inspect_file<O: LoadObserver>(
    path: &Path,
    options: &ReadOptions,
    observer: &mut O,
) -> Result<Inspection> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    bf_asset::inspect::inspect_with_observer(BufReader::new(file), options, observer)
        .with_context(|| format!("Failed to read BF file: {}", path.display()))
}
