//! Signal readout and notification overlays.

use nannou::prelude::*;
use std::time::Instant;

use crate::renderer::AnimationLoop;

const NOTIFICATION_FRAMES: u32 = 180; // ~3 seconds at 60fps

/// Debug panel with the live signal and frame rate
pub struct Readout {
    pub visible: bool,
    /// Last frame time for FPS calculation
    last_frame_time: Instant,
    /// Smoothed FPS display value
    display_fps: f32,
}

impl Readout {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            last_frame_time: Instant::now(),
            display_fps: 0.0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Call once per update
    pub fn tick(&mut self, now: Instant) {
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let current_fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };
        // Exponential moving average
        self.display_fps = self.display_fps * 0.9 + current_fps * 0.1;
        self.last_frame_time = now;
    }

    pub fn fps(&self) -> f32 {
        self.display_fps
    }

    pub fn lines(&self, corona: &AnimationLoop) -> Vec<String> {
        let scene = corona.scene();
        let signal = scene.signal();
        let knobs = scene.knobs();
        let params = scene.params();
        let [grain_w, grain_h] = scene.grain().size();

        vec![
            format!("{:.0} fps  [{}]", self.fps(), corona.state().label()),
            format!("flare     {:.3}", signal.flare_prob()),
            format!("wind      {:.3}", signal.solar_wind_speed()),
            format!("kp        {:.3}", signal.kp_index()),
            format!("sunspots  {:.3}", signal.sunspot_area()),
            format!(
                "particles {} / {}",
                scene.population().len(),
                params.particle_target
            ),
            format!(
                "{} {} x{}  grain {}x{}",
                knobs.style,
                knobs.shape,
                knobs.posterize_levels(),
                grain_w,
                grain_h
            ),
        ]
    }

    pub fn draw(&self, draw: &Draw, bounds: Rect, corona: &AnimationLoop) {
        if !self.visible {
            return;
        }

        let lines = self.lines(corona);
        let line_height = 18.0;
        let width = 260.0;
        let height = line_height * lines.len() as f32 + 16.0;
        let x = bounds.left() + width / 2.0 + 10.0;
        let top = bounds.top() - 10.0;

        draw.rect()
            .x_y(x, top - height / 2.0)
            .w_h(width, height)
            .color(rgba(0.0, 0.0, 0.0, 0.6));

        for (i, line) in lines.iter().enumerate() {
            let y = top - 8.0 - line_height * (i as f32 + 0.5);
            draw.text(line)
                .xy(pt2(x, y))
                .wh(pt2(width - 16.0, line_height))
                .left_justify()
                .color(rgba(1.0, 1.0, 1.0, 0.85))
                .font_size(13);
        }
    }
}

/// Short message at the top of the screen that fades out
#[derive(Default)]
pub struct Notification {
    text: Option<String>,
    frames: u32,
}

impl Notification {
    pub fn show(&mut self, text: String) {
        self.text = Some(text);
        self.frames = NOTIFICATION_FRAMES;
    }

    /// Count down one frame
    pub fn tick(&mut self) {
        if self.frames > 0 {
            self.frames -= 1;
            if self.frames == 0 {
                self.text = None;
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn alpha(&self) -> f32 {
        (self.frames as f32 / NOTIFICATION_FRAMES as f32).min(1.0)
    }

    pub fn draw(&self, draw: &Draw, bounds: Rect) {
        if let Some(text) = self.text() {
            draw.text(text)
                .x_y(0.0, bounds.top() - 30.0)
                .color(rgba(1.0, 1.0, 1.0, self.alpha()))
                .font_size(24);
        }
    }
}
