//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use vertex_engine::device::GpuInit;
use vertex_engine::logging::LoggingConfig;
use vertex_engine::resource::{PuzzleId, PuzzleSource};
use vertex_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Vertex puzzle viewer.
#[derive(Parser, Debug)]
#[command(
    name = "vertex-studio",
    about = "Renders a vertex puzzle scene with the vertex engine",
    version
)]
pub struct Args {
    /// Puzzle to load before the first frame (positive integer).
    #[arg(long, value_name = "ID")]
    pub puzzle: Option<PuzzleId>,

    /// Directory holding `<ID>.txt` puzzle files.
    #[arg(long, value_name = "DIR", default_value = "puzzles")]
    pub puzzle_dir: PathBuf,

    /// Initial window width in logical pixels.
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Disable vertical sync (may cause tearing).
    #[arg(long)]
    pub no_vsync: bool,

    /// Exit after rendering N frames.
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Args {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig { env_filter: self.log.clone(), ..LoggingConfig::default() }
    }

    pub fn runtime(&self) -> RuntimeConfig {
        let title = match self.puzzle {
            Some(id) => format!("vertex puzzle #{id}"),
            None => "vertex".to_string(),
        };
        RuntimeConfig {
            title,
            initial_size: LogicalSize::new(self.width.max(1) as f64, self.height.max(1) as f64),
            max_frames: self.max_frames,
        }
    }

    pub fn gpu(&self) -> GpuInit {
        GpuInit::with_vsync(!self.no_vsync)
    }

    pub fn source(&self) -> PuzzleSource {
        PuzzleSource::new(&self.puzzle_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("vertex-studio").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert!(args.puzzle.is_none());
        assert_eq!(args.puzzle_dir, PathBuf::from("puzzles"));
        assert_eq!((args.width, args.height), (1280, 720));
        assert_eq!(args.gpu().present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(args.runtime().max_frames, None);
        assert_eq!(args.runtime().title, "vertex");
    }

    #[test]
    fn full_command_line() {
        let args = parse(&[
            "--puzzle", "17", "--puzzle-dir", "data", "--width", "640", "--height", "480",
            "--no-vsync", "--max-frames", "3", "--log", "debug",
        ])
        .unwrap();

        assert_eq!(args.puzzle.map(PuzzleId::get), Some(17));
        assert_eq!(args.source().path_for(args.puzzle.unwrap()), PathBuf::from("data").join("17.txt"));
        assert_eq!(args.runtime().initial_size, LogicalSize::new(640.0, 480.0));
        assert_eq!(args.runtime().max_frames, Some(3));
        assert_eq!(args.runtime().title, "vertex puzzle #17");
        assert_eq!(args.gpu().present_mode, wgpu::PresentMode::Immediate);
        assert_eq!(args.logging().env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_puzzle_id_is_rejected() {
        assert!(parse(&["--puzzle", "0"]).is_err());
        assert!(parse(&["--puzzle", "x"]).is_err());
    }
}
