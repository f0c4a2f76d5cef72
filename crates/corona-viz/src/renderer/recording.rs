//! Canvas that records draw calls, for tests.

use corona_api::{Canvas, CanvasError, Color, PixelBuffer};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(Color),
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        weight: f32,
        color: Color,
    },
    Gradient {
        center: (f32, f32),
        radius: f32,
        inner: Color,
        outer: Color,
    },
    Pixels {
        size: [u32; 2],
    },
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    /// Simulates a destroyed surface
    pub lost: bool,
}

impl RecordingCanvas {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn last(&self) -> Option<&Op> {
        self.ops.last()
    }

    /// True when no recorded coordinate or color component is NaN or infinite
    pub fn all_finite(&self) -> bool {
        fn color_ok(c: &Color) -> bool {
            [c.r, c.g, c.b, c.a].iter().all(|v| v.is_finite())
        }
        self.ops.iter().all(|op| match op {
            Op::Clear(c) => color_ok(c),
            Op::Rect { x, y, w, h, color } => {
                [*x, *y, *w, *h].iter().all(|v| v.is_finite()) && color_ok(color)
            }
            Op::Circle { x, y, radius, color } => {
                [*x, *y, *radius].iter().all(|v| v.is_finite()) && color_ok(color)
            }
            Op::Line {
                from,
                to,
                weight,
                color,
            } => {
                [from.0, from.1, to.0, to.1, *weight]
                    .iter()
                    .all(|v| v.is_finite())
                    && color_ok(color)
            }
            Op::Gradient {
                center,
                radius,
                inner,
                outer,
            } => {
                [center.0, center.1, *radius].iter().all(|v| v.is_finite())
                    && color_ok(inner)
                    && color_ok(outer)
            }
            Op::Pixels { .. } => true,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn status(&self) -> Result<(), CanvasError> {
        if self.lost {
            Err(CanvasError::Unavailable("surface dropped".to_string()))
        } else {
            Ok(())
        }
    }

    fn clear(&mut self, color: Color) {
        self.ops.push(Op::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.ops.push(Op::Circle { x, y, radius, color });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), weight: f32, color: Color) {
        self.ops.push(Op::Line {
            from,
            to,
            weight,
            color,
        });
    }

    fn fill_radial_gradient(&mut self, x: f32, y: f32, radius: f32, inner: Color, outer: Color) {
        self.ops.push(Op::Gradient {
            center: (x, y),
            radius,
            inner,
            outer,
        });
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        self.ops.push(Op::Pixels {
            size: pixels.size(),
        });
    }
}
