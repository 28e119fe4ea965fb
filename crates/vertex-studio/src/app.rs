use vertex_engine::core::{App, AppControl, FrameCtx};
use vertex_engine::paint::Color;
use vertex_engine::render::SceneRenderer;
use vertex_engine::scene::SceneProvider;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

const CLEAR: Color = Color::new(0.08, 0.09, 0.11, 1.0);

/// Drives a [`SceneProvider`] through the scene renderer once per frame.
pub struct StudioApp<S> {
    scene: S,
    renderer: SceneRenderer,
}

impl<S: SceneProvider> StudioApp<S> {
    pub fn new(scene: S) -> Self {
        Self { scene, renderer: SceneRenderer::new() }
    }
}

impl<S: SceneProvider> App for StudioApp<S> {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.scene.prepare(ctx.viewport(), ctx.frame_index);

        let frame = self.scene.frame();
        let renderer = &mut self.renderer;
        ctx.render(CLEAR, |rctx, target| renderer.render(rctx, target, &frame))
    }
}
