//! Debug formatting helpers for large buffers
//!
//! Rasters and vertex arrays can hold millions of elements; these helpers
//! print the first few and a count instead. Enable the `debug-print-all`
//! feature to print everything.

use std::fmt;

#[cfg(not(feature = "debug-print-all"))]
const FIRST_N_ELEMENTS: usize = 3;

#[cfg(not(feature = "debug-print-all"))]
fn trimmed_slice_fmt<T: fmt::Debug>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let shown = &items[..items.len().min(FIRST_N_ELEMENTS)];
    let hidden = items.len() - shown.len();

    if hidden == 0 {
        write!(f, "{shown:?}")
    } else {
        write!(f, "{shown:?} + {hidden} elements")
    }
}

#[cfg(feature = "debug-print-all")]
fn trimmed_slice_fmt<T: fmt::Debug>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{items:?}")
}

/// Format a vector showing only its first elements
pub fn trimmed_collection_fmt<T: fmt::Debug>(
    items: &Vec<T>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    trimmed_slice_fmt(items, f)
}

/// Format an optional vector showing only its first elements
pub fn trimmed_optional_fmt<T: fmt::Debug>(
    items: &Option<Vec<T>>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match items {
        Some(items) => {
            write!(f, "Some(")?;
            trimmed_slice_fmt(items, f)?;
            write!(f, ")")
        }
        None => write!(f, "None"),
    }
}
