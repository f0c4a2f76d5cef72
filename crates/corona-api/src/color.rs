//! Color types

/// RGBA color, each component 0.0-1.0
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear blend, `t = 0` gives `self`
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Components clamped to 0-1, non-finite components replaced by `fallback`'s
    pub fn sanitized(self, fallback: Color) -> Self {
        fn fix(v: f32, f: f32) -> f32 {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                f
            }
        }
        Self {
            r: fix(self.r, fallback.r),
            g: fix(self.g, fallback.g),
            b: fix(self.b, fallback.b),
            a: fix(self.a, fallback.a),
        }
    }

    /// 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.sanitized(Color::TRANSPARENT);
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }
}

/// Hue in degrees, saturation and lightness in percent (0-100)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn to_color(self, alpha: f32) -> Color {
        let h = if self.h.is_finite() {
            self.h.rem_euclid(360.0)
        } else {
            0.0
        };
        let s = percent(self.s);
        let l = percent(self.l);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r1, g1, b1) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Color::rgba(r1 + m, g1 + m, b1 + m, alpha).sanitized(Color::BLACK)
    }
}

fn percent(v: f32) -> f32 {
    if v.is_finite() {
        (v / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
