//! Five squares, one mesh.
//!
//! Opens an 800x800 window and draws five outlined instances of a shared quad
//! under different hand-picked transforms. Escape quits.

mod squares;

use std::process::ExitCode;

use anyhow::Result;

use quadrille_engine::core::{App, AppControl, FrameCtx};
use quadrille_engine::device::GpuInit;
use quadrille_engine::input::Key;
use quadrille_engine::logging::{init_logging, LoggingConfig};
use quadrille_engine::paint::Color;
use quadrille_engine::render::{projection, QuadRenderer, RenderCtx, ShaderPolicy};
use quadrille_engine::scene::DrawList;
use quadrille_engine::window::{Runtime, RuntimeConfig};

struct SquaresApp {
    descriptors: DrawList,
    policy: ShaderPolicy,

    /// Created in `on_start`, before the window is shown. Under strict
    /// policy a shader failure therefore aborts startup with no window and
    /// no render loop.
    renderer: Option<QuadRenderer>,
}

impl App for SquaresApp {
    fn on_start(&mut self, rctx: &RenderCtx<'_>) -> Result<()> {
        let renderer = QuadRenderer::new(rctx, projection::world_to_clip(), self.policy)?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Level-triggered: polled before the frame, re-evaluated every frame.
        // An exit request terminates after the current frame, which still
        // renders below.
        let exit_requested = ctx.input.is_down(Key::Escape);

        let renderer = &mut self.renderer;
        let descriptors = &self.descriptors;

        let control = ctx.render(Color::BLACK, |rctx, target| {
            if let Some(renderer) = renderer.as_mut() {
                renderer.render(rctx, target, descriptors);
            }
        });

        resolve_frame_control(exit_requested, control)
    }
}

/// An exit request takes effect after the frame it was polled before; a
/// fatal render outcome terminates regardless.
fn resolve_frame_control(exit_requested: bool, render_control: AppControl) -> AppControl {
    if exit_requested {
        AppControl::Exit
    } else {
        render_control
    }
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let app = SquaresApp {
        descriptors: squares::descriptors(),
        policy: ShaderPolicy::Strict,
        renderer: None,
    };

    let config = RuntimeConfig {
        title: "quadrille".to_string(),
        ..RuntimeConfig::default()
    };

    log::info!("starting quadrille demo (escape to quit)");

    match Runtime::run(config, GpuInit::wireframe(), app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("startup failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_exits_after_the_current_frame() {
        // The poll happens before rendering; the directive applies after the
        // frame renders, so a successful frame still exits.
        assert_eq!(
            resolve_frame_control(true, AppControl::Continue),
            AppControl::Exit
        );
    }

    #[test]
    fn without_exit_request_the_render_outcome_passes_through() {
        assert_eq!(
            resolve_frame_control(false, AppControl::Continue),
            AppControl::Continue
        );
        // A fatal surface error exits even without an escape press.
        assert_eq!(
            resolve_frame_control(false, AppControl::Exit),
            AppControl::Exit
        );
    }
}
