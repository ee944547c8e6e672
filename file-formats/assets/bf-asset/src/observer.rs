//! Load instrumentation hooks
//!
//! Readers report phase boundaries and buffer allocations to a
//! [`LoadObserver`] supplied by the caller instead of touching any global
//! state. `()` is the no-op observer.

use std::fmt;
use std::time::{Duration, Instant};

/// Phase of a load operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    /// Reading and validating the four header bytes
    Header,
    /// Reading and decompressing the body
    Decompress,
    /// Decoding the payload from the decompressed body
    Parse,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPhase::Header => write!(f, "header"),
            LoadPhase::Decompress => write!(f, "decompress"),
            LoadPhase::Parse => write!(f, "parse"),
        }
    }
}

/// Receives notifications while an asset is loaded
pub trait LoadObserver {
    /// A phase is about to start
    fn phase_started(&mut self, _phase: LoadPhase) {}

    /// A phase completed successfully
    fn phase_finished(&mut self, _phase: LoadPhase) {}

    /// The body was decompressed
    fn body_decompressed(&mut self, _compressed_len: u32, _uncompressed_len: u32) {}

    /// A buffer of `bytes` bytes was handed to the caller
    fn allocated(&mut self, _bytes: usize) {}

    /// An index array of `count` entries was read
    fn indices_read(&mut self, _count: usize) {}
}

impl LoadObserver for () {}

impl<O: LoadObserver + ?Sized> LoadObserver for &mut O {
    fn phase_started(&mut self, phase: LoadPhase) {
        (**self).phase_started(phase);
    }

    fn phase_finished(&mut self, phase: LoadPhase) {
        (**self).phase_finished(phase);
    }

    fn body_decompressed(&mut self, compressed_len: u32, uncompressed_len: u32) {
        (**self).body_decompressed(compressed_len, uncompressed_len);
    }

    fn allocated(&mut self, bytes: usize) {
        (**self).allocated(bytes);
    }

    fn indices_read(&mut self, count: usize) {
        (**self).indices_read(count);
    }
}

/// Collects totals and timings across one or more loads
#[derive(Debug, Default, Clone)]
pub struct LoadStats {
    /// Total bytes of buffers handed to the caller
    pub allocated_bytes: u64,
    /// Total compressed body bytes read
    pub compressed_bytes: u64,
    /// Total decompressed body bytes produced
    pub uncompressed_bytes: u64,
    /// Total index entries read
    pub index_count: u64,
    /// Completed phases with their wall time, in completion order
    pub timings: Vec<(LoadPhase, Duration)>,
    started: Vec<(LoadPhase, Instant)>,
}

impl LoadStats {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Total wall time recorded for a phase
    pub fn time_in(&self, phase: LoadPhase) -> Duration {
        self.timings
            .iter()
            .filter(|(p, _)| *p == phase)
            .map(|(_, d)| *d)
            .sum()
    }

    /// Ratio of compressed to uncompressed bytes, if anything was loaded
    pub fn compression_ratio(&self) -> Option<f64> {
        if self.uncompressed_bytes == 0 {
            None
        } else {
            Some(self.compressed_bytes as f64 / self.uncompressed_bytes as f64)
        }
    }
}

impl LoadObserver for LoadStats {
    fn phase_started(&mut self, phase: LoadPhase) {
        // A start left over from a failed load is superseded
        self.started.retain(|(p, _)| *p != phase);
        self.started.push((phase, Instant::now()));
    }

    fn phase_finished(&mut self, phase: LoadPhase) {
        if let Some(pos) = self.started.iter().rposition(|(p, _)| *p == phase) {
            let (_, start) = self.started.remove(pos);
            self.timings.push((phase, start.elapsed()));
        }
    }

    fn body_decompressed(&mut self, compressed_len: u32, uncompressed_len: u32) {
        self.compressed_bytes += u64::from(compressed_len);
        self.uncompressed_bytes += u64::from(uncompressed_len);
    }

    fn allocated(&mut self, bytes: usize) {
        self.allocated_bytes += bytes as u64;
    }

    fn indices_read(&mut self, count: usize) {
        self.index_count += count as u64;
    }
}
