use std::fmt;
use std::path::PathBuf;

/// Which index space an out-of-range index belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexKind {
    /// `ColoredVertex::color_index` into the active palette.
    Palette,
    /// `MarkerVertex::marker_index` compared against the selection.
    Marker,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Palette => f.write_str("palette"),
            IndexKind::Marker => f.write_str("marker"),
        }
    }
}

/// Errors surfaced by the rendering core and its resource loading.
///
/// Per-frame problems (`InvalidIndex`) are recovered locally by clamping; they
/// are reported so callers can log or count them, never to abort a frame.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("palette holds at most {max} colors, got {got}")]
    CapacityExceeded { got: usize, max: usize },

    #[error("{kind} index {index} out of range (limit {limit})")]
    InvalidIndex { kind: IndexKind, index: u32, limit: u32 },

    #[error("puzzle resource {} is unavailable", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_both_sizes() {
        let err = EngineError::CapacityExceeded { got: 101, max: 100 };
        assert_eq!(err.to_string(), "palette holds at most 100 colors, got 101");
    }

    #[test]
    fn invalid_index_message_names_kind() {
        let err = EngineError::InvalidIndex { kind: IndexKind::Marker, index: 7, limit: 3 };
        assert_eq!(err.to_string(), "marker index 7 out of range (limit 3)");
    }

    #[test]
    fn resource_error_keeps_io_source() {
        use std::error::Error as _;

        let err = EngineError::ResourceUnavailable {
            path: PathBuf::from("puzzles/4.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("puzzles/4.txt"));
        assert!(err.source().is_some());
    }
}
