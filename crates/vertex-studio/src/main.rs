mod app;
mod args;
mod demo;

use anyhow::Context;
use clap::Parser;
use vertex_engine::logging::init_logging;
use vertex_engine::window::Runtime;

use crate::app::StudioApp;
use crate::args::Args;
use crate::demo::DemoScene;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.logging());

    // The puzzle text must be available before the first frame; a failed
    // load halts startup.
    if let Some(id) = args.puzzle {
        let text = args
            .source()
            .fetch(id)
            .with_context(|| format!("failed to load puzzle {id}"))?;
        log::info!("puzzle {id}: {} lines", text.lines().count());
    }

    let scene = DemoScene::new();
    log::info!("demo scene: {} faces", scene.face_count());

    Runtime::run(args.runtime(), args.gpu(), StudioApp::new(scene))
}
