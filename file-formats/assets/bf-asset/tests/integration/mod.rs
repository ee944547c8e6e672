//! Whole-file integration tests

mod cube;
mod geometry;
mod header;
mod image;
mod transport;
