//! Render target abstraction and its nannou implementation

use crate::{Bounds, Color};
use nannou::prelude::pt2;
use nannou::wgpu;
use thiserror::Error;

/// Concentric rings used to approximate a radial gradient
const GRADIENT_STEPS: usize = 32;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("render target unavailable: {0}")]
    Unavailable(String),
}

/// 2D drawing surface a frame is painted onto.
///
/// All coordinates are logical units with the origin at the center of the
/// viewport and y pointing up. Shapes are positioned by their center.
pub trait Canvas {
    /// Whether the surface can still be drawn to
    fn status(&self) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), weight: f32, color: Color);

    /// Disc of `radius` blending from `inner` at the center to `outer` at the rim
    fn fill_radial_gradient(&mut self, x: f32, y: f32, radius: f32, inner: Color, outer: Color);

    /// Stretch a raw RGBA buffer over the whole surface
    fn put_pixels(&mut self, pixels: &PixelBuffer);
}

/// Raw RGBA8 pixels, one `u32` per pixel in memory byte order r, g, b, a
#[derive(Clone, Debug, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Reallocate for a new size. Returns false when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize];
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pack an RGBA8 quadruple in this buffer's byte order
    pub fn pack(rgba: [u8; 4]) -> u32 {
        u32::from_ne_bytes(rgba)
    }
}

/// GPU resources needed to show a `PixelBuffer`
pub struct PixelTarget<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Must be RGBA8 with COPY_DST usage, sized like the buffers put into it
    pub texture: &'a wgpu::Texture,
}

/// `Canvas` backed by a `nannou::Draw`
pub struct NannouCanvas<'a> {
    draw: &'a nannou::Draw,
    bounds: Bounds,
    pixel_target: Option<PixelTarget<'a>>,
}

impl<'a> NannouCanvas<'a> {
    pub fn new(draw: &'a nannou::Draw, bounds: Bounds) -> Self {
        Self {
            draw,
            bounds,
            pixel_target: None,
        }
    }

    /// Enable `put_pixels` by giving the canvas a texture to upload into
    pub fn with_pixel_target(mut self, target: PixelTarget<'a>) -> Self {
        self.pixel_target = Some(target);
        self
    }
}

fn to_nannou(color: Color) -> nannou::color::Rgba {
    let c = color.sanitized(Color::TRANSPARENT);
    nannou::color::rgba(c.r, c.g, c.b, c.a)
}

impl Canvas for NannouCanvas<'_> {
    fn clear(&mut self, color: Color) {
        self.draw.background().color(to_nannou(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.draw.rect().x_y(x, y).w_h(w, h).color(to_nannou(color));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        let d = radius * 2.0;
        self.draw.ellipse().x_y(x, y).w_h(d, d).color(to_nannou(color));
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), weight: f32, color: Color) {
        self.draw
            .line()
            .start(pt2(from.0, from.1))
            .end(pt2(to.0, to.1))
            .weight(weight)
            .color(to_nannou(color));
    }

    fn fill_radial_gradient(&mut self, x: f32, y: f32, radius: f32, inner: Color, outer: Color) {
        // Outermost ring first so inner rings paint over it
        for i in 0..GRADIENT_STEPS {
            let t = i as f32 / GRADIENT_STEPS as f32;
            let r = radius * (1.0 - t);
            let color = outer.lerp(inner, t);
            let d = r * 2.0;
            self.draw.ellipse().x_y(x, y).w_h(d, d).color(to_nannou(color));
        }
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        let Some(target) = self.pixel_target.as_ref() else {
            return;
        };
        // A stale texture means a resize is pending, skip this overlay
        if pixels.is_empty() || target.texture.size() != pixels.size() {
            return;
        }

        let mut encoder = target
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("corona-pixels"),
            });
        target
            .texture
            .upload_data(target.device, &mut encoder, pixels.as_bytes());
        target.queue.submit(Some(encoder.finish()));

        self.draw
            .texture(target.texture)
            .x_y(self.bounds.x, self.bounds.y)
            .w_h(self.bounds.w, self.bounds.h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_buffer_resize() {
        let mut buffer = PixelBuffer::new(4, 2);
        assert_eq!(buffer.pixels().len(), 8);
        assert!(!buffer.resize(4, 2));
        assert!(buffer.resize(3, 3));
        assert_eq!(buffer.pixels().len(), 9);
        assert_eq!(buffer.as_bytes().len(), 36);
    }

    #[test]
    fn test_pack_keeps_byte_order() {
        let mut buffer = PixelBuffer::new(1, 1);
        buffer.pixels_mut()[0] = PixelBuffer::pack([1, 2, 3, 4]);
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4]);
    }
}
