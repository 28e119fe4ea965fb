//! Puzzle text retrieval.
//!
//! A puzzle is identified by a positive integer and stored as plain text at
//! `<root>/<id>.txt`. The text is loaded once, before the first frame; its
//! contents are opaque to the engine.

use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::EngineError;

/// Positive puzzle identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PuzzleId(NonZeroU32);

impl PuzzleId {
    /// `None` for zero.
    #[inline]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PuzzleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|e| format!("invalid puzzle id {s:?}: {e}"))?;
        PuzzleId::new(n).ok_or_else(|| "puzzle id must be positive".to_string())
    }
}

/// Directory holding puzzle text files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSource {
    root: PathBuf,
}

impl PuzzleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of the text for `id`.
    pub fn path_for(&self, id: PuzzleId) -> PathBuf {
        self.root.join(format!("{id}.txt"))
    }

    /// Reads the whole puzzle text.
    pub fn fetch(&self, id: PuzzleId) -> Result<String, EngineError> {
        let path = self.path_for(id);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::info!("loaded puzzle {id} ({} bytes) from {}", text.len(), path.display());
                Ok(text)
            }
            Err(source) => Err(EngineError::ResourceUnavailable { path, source }),
        }
    }
}
