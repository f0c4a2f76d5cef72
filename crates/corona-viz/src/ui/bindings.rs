//! Keyboard bindings and input handling.
//!
//! Centralizes all keyboard shortcuts and key mapping logic. Knob keys never
//! edit the running ParameterSet in place, they produce a replacement.

use corona_api::ParameterSet;
use nannou::prelude::*;

pub const PARTICLE_STEP: f32 = 50.0;
pub const WIND_STEP: f32 = 0.25;
pub const FLARE_STEP: f32 = 0.25;
pub const BACKGROUND_STEP: f32 = 2.0;

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // App-level
    Quit,
    ShowHelp,
    ToggleReadout,
    ToggleLive,

    // Knobs
    NextStyle,
    ToggleShape,
    ToggleGrain,
    Posterize(i32),
    BaseParticles(f32),
    Wind(f32),
    Flare(f32),
    Background(f32),
}

impl Action {
    /// For knob actions, the replacement knobs and a line for the notification.
    /// `None` for app-level actions.
    pub fn adjust(&self, knobs: &ParameterSet) -> Option<(ParameterSet, String)> {
        let mut next = knobs.clone();
        match *self {
            Action::NextStyle => next.style = knobs.style.next(),
            Action::ToggleShape => next.shape = knobs.shape.toggled(),
            Action::ToggleGrain => next.grain = !knobs.grain,
            Action::Posterize(delta) => {
                next.posterize = knobs.posterize.saturating_add_signed(delta)
            }
            Action::BaseParticles(delta) => next.base_particles += delta,
            Action::Wind(delta) => next.wind_multiplier += delta,
            Action::Flare(delta) => next.flare_amp += delta,
            Action::Background(delta) => next.background_lightness += delta,
            Action::Quit | Action::ShowHelp | Action::ToggleReadout | Action::ToggleLive => {
                return None
            }
        }
        let next = next.sanitized();

        let message = match self {
            Action::NextStyle => format!("Style: {}", next.style),
            Action::ToggleShape => format!("Shape: {}", next.shape),
            Action::ToggleGrain => format!("Grain: {}", if next.grain { "ON" } else { "OFF" }),
            Action::Posterize(_) => format!("Posterize: {}", next.posterize),
            Action::BaseParticles(_) => format!("Base particles: {:.0}", next.base_particles),
            Action::Wind(_) => format!("Wind multiplier: {:.2}", next.wind_multiplier),
            Action::Flare(_) => format!("Flare amp: {:.2}", next.flare_amp),
            _ => format!("Background: {:+.0}", next.background_lightness),
        };
        Some((next, message))
    }
}

/// Parse a key into an action
pub fn parse_key(key: Key, shift: bool) -> Option<Action> {
    match key {
        Key::Q => Some(Action::Quit),
        Key::H => Some(Action::ShowHelp),
        Key::D => Some(Action::ToggleReadout),
        Key::Space => Some(Action::ToggleLive),

        Key::S => Some(Action::NextStyle),
        Key::P => Some(Action::ToggleShape),
        Key::G => Some(Action::ToggleGrain),
        Key::LBracket => Some(Action::Posterize(-1)),
        Key::RBracket => Some(Action::Posterize(1)),
        Key::Up => Some(Action::BaseParticles(PARTICLE_STEP)),
        Key::Down => Some(Action::BaseParticles(-PARTICLE_STEP)),
        Key::Right => Some(Action::Wind(WIND_STEP)),
        Key::Left => Some(Action::Wind(-WIND_STEP)),
        Key::F if shift => Some(Action::Flare(-FLARE_STEP)),
        Key::F => Some(Action::Flare(FLARE_STEP)),
        Key::B if shift => Some(Action::Background(-BACKGROUND_STEP)),
        Key::B => Some(Action::Background(BACKGROUND_STEP)),
        _ => None,
    }
}
