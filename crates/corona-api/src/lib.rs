//! Shared types for the corona visualization
//!
//! The signal snapshot, user knobs, color types and the `Canvas` render target
//! that every frame is painted through.

pub mod color;
pub mod draw;
pub mod knobs;
pub mod rect;
pub mod signal;

pub use color::{Color, Hsl};
pub use draw::{Canvas, CanvasError, NannouCanvas, PixelBuffer, PixelTarget};
pub use knobs::{ParameterSet, Shape, Style};
pub use rect::Bounds;
pub use signal::Signal;
