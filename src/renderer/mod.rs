//! Rendering boundary
//!
//! The simulation never draws. Each frame the host turns the state into a list
//! of [`DrawCommand`]s plus HUD text and feeds them to a [`Renderer`], which
//! maps sprite handles to whatever pixels it owns.

pub mod draw;
pub mod hud;

pub use draw::{DrawCommand, Sprite, draw_list, explosion_source_rect};
pub use hud::HudText;

use glam::Vec2;

use crate::sim::GameState;

/// Backend that puts sprites and text on screen
pub trait Renderer {
    fn begin_frame(&mut self) {}
    fn draw(&mut self, command: &DrawCommand);
    fn draw_text(&mut self, text: &str, position: Vec2);
    fn end_frame(&mut self) {}
}

/// Draw one full frame: entities in back-to-front order, then the HUD
pub fn render_frame<R: Renderer>(renderer: &mut R, state: &GameState) {
    renderer.begin_frame();
    for command in draw_list(state) {
        renderer.draw(&command);
    }
    let hud = HudText::from_state(state);
    renderer.draw_text(&hud.health, HudText::HEALTH_POSITION);
    renderer.draw_text(&hud.score, HudText::SCORE_POSITION);
    renderer.end_frame();
}

/// Renderer that just remembers the last frame (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
    pub text: Vec<(String, Vec2)>,
    pub frames: u64,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.commands.clear();
        self.text.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }

    fn draw_text(&mut self, text: &str, position: Vec2) {
        self.text.push((text.to_string(), position));
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        log::trace!(
            "Frame {}: {} sprites, {} text lines",
            self.frames,
            self.commands.len(),
            self.text.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_render_frame_records_everything() {
        let state = GameState::new(11, Tuning::default());
        let mut renderer = RecordingRenderer::default();

        render_frame(&mut renderer, &state);
        render_frame(&mut renderer, &state);

        assert_eq!(renderer.frames, 2);
        // Burger plus every bear
        assert_eq!(renderer.commands.len(), 1 + state.bears.len());
        assert_eq!(renderer.text[0].0, "Health: 100");
        assert_eq!(renderer.text[1].0, "Score: 0");
    }
}
