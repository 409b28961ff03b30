//! Run timeline: the authoritative output of a simulation
//!
//! An append-only sequence of per-generation grid snapshots, each cell
//! compressed to its state index (see [`crate::terrain::state_index`]).
//! Frame 0 is the initial configuration; frame `g + 1` is the grid after
//! generation `g`. Once a run completes the timeline is final; it is
//! never extended or replayed into a new run.

use crate::grid::Grid;
use crate::terrain::TerrainType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// State index of a burning town cell
pub const TOWN_BURNING_INDEX: u8 = TerrainType::Town as u8 * 4 + 1;

/// Recorded state-index frames of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    width: usize,
    height: usize,
    frames: Vec<Vec<u8>>,
}

impl Timeline {
    /// Create an empty timeline for a grid of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Timeline {
            width,
            height,
            frames: Vec::new(),
        }
    }

    /// Append a snapshot of the grid
    pub fn push(&mut self, grid: &Grid) {
        debug_assert_eq!(grid.width(), self.width);
        debug_assert_eq!(grid.height(), self.height);
        self.frames.push(grid.state_indices());
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major state indices of frame `index`
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    /// State index of cell `(x, y)` in frame `index`
    pub fn state_at(&self, index: usize, x: usize, y: usize) -> Option<u8> {
        self.frame(index).map(|frame| frame[y * self.width + x])
    }

    /// Fraction of the grid burning in frame `index`.
    ///
    /// Burning substates occupy index `terrain * 4 + 1`, so the scan is a
    /// residue check.
    pub fn burning_fraction(&self, index: usize) -> Option<f32> {
        let frame = self.frame(index)?;
        let burning = frame.iter().filter(|s| **s % 4 == 1).count();
        Some(burning as f32 / frame.len() as f32)
    }

    /// Index of the first frame containing a burning town cell
    pub fn first_town_burning_frame(&self) -> Option<usize> {
        self.frames
            .iter()
            .position(|frame| frame.iter().any(|s| *s == TOWN_BURNING_INDEX))
    }

    /// Save the timeline as JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TimelineError> {
        let contents = serde_json::to_string(self)
            .map_err(|e| TimelineError::SerializeFailed(e.to_string()))?;
        fs::write(path, contents).map_err(|e| TimelineError::SaveFailed(e.to_string()))
    }

    /// Load a timeline from JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TimelineError> {
        let contents =
            fs::read_to_string(path).map_err(|e| TimelineError::LoadFailed(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| TimelineError::ParseFailed(e.to_string()))
    }
}

#[derive(Debug)]
pub enum TimelineError {
    /// Failed to serialize the timeline
    SerializeFailed(String),
    /// Failed to write the timeline file
    SaveFailed(String),
    /// Failed to read the timeline file
    LoadFailed(String),
    /// Failed to parse the timeline file
    ParseFailed(String),
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            TimelineError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
            TimelineError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            TimelineError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
        }
    }
}

impl std::error::Error for TimelineError {}
