//! Help overlay showing keyboard shortcuts.

use corona_api::ParameterSet;
use nannou::prelude::*;

use crate::renderer::LoopState;

/// Manages help overlay visibility
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn draw(&self, draw: &Draw, state: LoopState, knobs: &ParameterSet) {
        if !self.visible {
            return;
        }

        let padding = 25.0;
        let line_height = 24.0;
        let font_size = 18;

        let live = match state {
            LoopState::Running => "Pause live updates (currently LIVE)",
            _ => "Resume live updates (currently paused)",
        };
        let style = format!("Next style (currently {})", knobs.style);
        let shape = format!("Toggle particle shape (currently {})", knobs.shape);
        let posterize = format!("Posterize levels -/+ (currently {})", knobs.posterize);

        let shortcuts = [
            ("h", "Toggle this help"),
            ("q", "Quit"),
            ("Space", live),
            ("", ""),
            ("--- Look ---", ""),
            ("s", style.as_str()),
            ("p", shape.as_str()),
            ("[ / ]", posterize.as_str()),
            ("g", "Toggle grain"),
            ("b / B", "Background lighter/darker"),
            ("", ""),
            ("--- Activity ---", ""),
            ("Up/Down", "Base particles +/-"),
            ("Right/Left", "Wind multiplier +/-"),
            ("f / F", "Flare amp +/-"),
            ("", ""),
            ("d", "Toggle signal readout"),
        ];

        let visible_lines = shortcuts.len();
        let overlay_height = line_height * (visible_lines as f32) + padding * 2.0;
        let overlay_width = 580.0;
        let key_col_width = 120.0;

        // Semi-transparent background
        draw.rect()
            .x_y(0.0, 0.0)
            .w_h(overlay_width, overlay_height)
            .color(rgba(0.0, 0.0, 0.0, 0.9));

        draw.rect()
            .x_y(0.0, 0.0)
            .w_h(overlay_width, overlay_height)
            .stroke(rgba(1.0, 1.0, 1.0, 0.3))
            .stroke_weight(1.0)
            .no_fill();

        let start_y = overlay_height / 2.0 - padding - line_height / 2.0;
        let left_edge = -overlay_width / 2.0 + padding;
        let desc_width = overlay_width - key_col_width - padding * 2.0 - 15.0;

        for (i, (key, desc)) in shortcuts.iter().enumerate() {
            let y = start_y - (i as f32) * line_height;

            if key.is_empty() && desc.is_empty() {
                continue;
            }

            if key.starts_with("---") {
                // Section header
                draw.text(key)
                    .xy(pt2(0.0, y))
                    .wh(pt2(overlay_width - padding * 2.0, line_height))
                    .center_justify()
                    .color(rgba(1.0, 0.7, 0.35, 0.8))
                    .font_size(font_size);
            } else {
                let key_x = left_edge + key_col_width / 2.0;
                let desc_x = left_edge + key_col_width + 15.0 + desc_width / 2.0;

                draw.text(key)
                    .xy(pt2(key_x, y))
                    .wh(pt2(key_col_width, line_height))
                    .right_justify()
                    .color(rgb(1.0, 0.75, 0.3))
                    .font_size(font_size);

                draw.text(desc)
                    .xy(pt2(desc_x, y))
                    .wh(pt2(desc_width, line_height))
                    .left_justify()
                    .color(rgb(1.0, 1.0, 1.0))
                    .font_size(font_size);
            }
        }
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
