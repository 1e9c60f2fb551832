//! Procedural textures.
//!
//! The diorama never loads image files. Every texture is described by a
//! [`TextureDescriptor`] and rasterised by a [`TextureSource`] collaborator.
//! [`CanvasTextureSource`] is the reference rasteriser: a handful of 2D
//! drawing primitives (gradients, rectangles, discs, thick lines) over an
//! RGBA8 [`PixelBuffer`].
//!
//! A [`Texture`] is shared between appearances through an `Arc`. Its UV
//! transform is the one piece of mutable state inside an otherwise immutable
//! appearance, which is how the water flow animation reaches every node that
//! references the water material.

use glam::{Vec2, Vec3};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// RGBA8 color value.
pub type Rgba = [u8; 4];

/// Converts a `0xRRGGBB` literal into a linear-ish float color.
#[inline]
#[must_use]
pub fn color_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[inline]
fn rgba(hex: u32, alpha: f32) -> Rgba {
    [
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

// ============================================================================
// Descriptors
// ============================================================================

/// The procedural textures used by the diorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Vertical blue-white gradient with foam streaks, scrolled every frame.
    Water,
    /// Pale disc noise with craters.
    Moon,
    /// Berber carpet: red field, gold diamonds, green motifs, ornate border.
    Carpet,
    /// Red field with a green pentagram outline.
    Flag,
    /// Soft radial glow used behind the moon.
    Halo,
}

/// Texture addressing outside the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// Everything a [`TextureSource`] needs to produce pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
    pub wrap: WrapMode,
    pub repeat: Vec2,
    /// Seed for the random marks (foam streaks, craters).
    pub seed: u64,
}

impl TextureKind {
    /// Default descriptor for this kind, at the canvas size it is painted at.
    #[must_use]
    pub fn descriptor(self, seed: u64) -> TextureDescriptor {
        let (width, height, wrap, repeat) = match self {
            TextureKind::Water => (128, 512, WrapMode::Repeat, Vec2::ONE),
            TextureKind::Moon => (512, 512, WrapMode::ClampToEdge, Vec2::ONE),
            TextureKind::Carpet => (1024, 1024, WrapMode::Repeat, Vec2::splat(4.0)),
            TextureKind::Flag => (512, 342, WrapMode::ClampToEdge, Vec2::ONE),
            TextureKind::Halo => (256, 256, WrapMode::ClampToEdge, Vec2::ONE),
        };
        TextureDescriptor {
            kind: self,
            width,
            height,
            wrap,
            repeat,
            seed,
        }
    }
}

// ============================================================================
// Pixel buffer
// ============================================================================

/// Tightly packed RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Source-over blend of `color` into one pixel. Out-of-range writes are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let a = f32::from(color[3]) / 255.0;
        for c in 0..3 {
            let dst = f32::from(self.data[i + c]);
            self.data[i + c] = (f32::from(color[c]) * a + dst * (1.0 - a)).round() as u8;
        }
        let dst_a = f32::from(self.data[i + 3]) / 255.0;
        self.data[i + 3] = ((a + dst_a * (1.0 - a)) * 255.0).round() as u8;
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        let (x1, y1) = ((x + w).ceil() as i64, (y + h).ceil() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    /// Outlines a rectangle with a stroke centred on its edges.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Rgba) {
        let half = line_width / 2.0;
        self.fill_rect(x - half, y - half, w + line_width, line_width, color);
        self.fill_rect(x - half, y + h - half, w + line_width, line_width, color);
        self.fill_rect(x - half, y + half, line_width, h - line_width, color);
        self.fill_rect(x + w - half, y + half, line_width, h - line_width, color);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        let r2 = radius * radius;
        let (x0, x1) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
        let (y0, y1) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Draws a thick segment by stamping discs along it.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgba) {
        let steps = (from.distance(to).ceil() as usize).max(1);
        for i in 0..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            self.fill_circle(p.x, p.y, line_width / 2.0, color);
        }
    }

    /// Vertical three-stop gradient: `top` → `middle` → `top`.
    pub fn fill_vertical_mirror_gradient(&mut self, top: Vec3, middle: Vec3) {
        let h = self.height.max(2) - 1;
        for y in 0..self.height {
            let t = y as f32 / h as f32;
            let k = 1.0 - (2.0 * t - 1.0).abs();
            let c = top.lerp(middle, k) * 255.0;
            let color = [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255];
            for x in 0..self.width {
                let i = ((y * self.width + x) * 4) as usize;
                self.data[i..i + 4].copy_from_slice(&color);
            }
        }
    }

    /// Radial alpha ramp from `inner_alpha` at the centre to zero at the edge.
    pub fn fill_radial_glow(&mut self, color: Vec3, inner_alpha: f32) {
        let c = Vec2::new(self.width as f32, self.height as f32) / 2.0;
        let radius = c.x.min(c.y);
        let rgb = color * 255.0;
        for y in 0..self.height {
            for x in 0..self.width {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(c) / radius;
                let alpha = inner_alpha * (1.0 - d).max(0.0);
                let i = ((y * self.width + x) * 4) as usize;
                self.data[i] = rgb.x.round() as u8;
                self.data[i + 1] = rgb.y.round() as u8;
                self.data[i + 2] = rgb.z.round() as u8;
                self.data[i + 3] = (alpha * 255.0).round() as u8;
            }
        }
    }
}

// ============================================================================
// Texture source collaborator
// ============================================================================

/// Produces the pixels for a texture descriptor.
///
/// The content of these textures carries no structure the rest of the
/// crate relies on, so callers may substitute their own source (e.g. one
/// that uploads straight to a GPU canvas).
pub trait TextureSource {
    fn generate(&self, descriptor: &TextureDescriptor) -> PixelBuffer;
}

/// Reference rasteriser reproducing the diorama's canvas drawings.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasTextureSource;

impl TextureSource for CanvasTextureSource {
    fn generate(&self, descriptor: &TextureDescriptor) -> PixelBuffer {
        let mut buf = PixelBuffer::new(descriptor.width, descriptor.height);
        let mut rng = StdRng::seed_from_u64(descriptor.seed);
        let (w, h) = (descriptor.width as f32, descriptor.height as f32);

        match descriptor.kind {
            TextureKind::Water => {
                buf.fill_vertical_mirror_gradient(color_hex(0x55aaff), color_hex(0xffffff));
                // foam streaks
                for _ in 0..40 {
                    let x = rng.random_range(0.0..w);
                    let y = rng.random_range(0.0..h);
                    let len = rng.random_range(0.0..50.0);
                    buf.fill_rect(x, y, 2.0, len, rgba(0xffffff, 0.7));
                }
            }
            TextureKind::Moon => {
                buf.fill(rgba(0xf0f4ff, 1.0));
                for _ in 0..150 {
                    let color = if rng.random_bool(0.5) {
                        rgba(0x000000, 0.08)
                    } else {
                        rgba(0xffffff, 0.2)
                    };
                    let x = rng.random_range(0.0..w);
                    let y = rng.random_range(0.0..h);
                    let r = rng.random_range(0.0..25.0);
                    buf.fill_circle(x, y, r, color);
                }
            }
            TextureKind::Carpet => {
                buf.fill(rgba(0x8b0000, 1.0));
                let cell = w / 16.0;
                for gx in 0..16 {
                    for gy in 0..16 {
                        let (x, y) = (gx as f32 * cell, gy as f32 * cell);
                        buf.stroke_rect(x + cell * 0.25, y + cell * 0.25, cell * 0.5, cell * 0.5, 4.0, rgba(0xd4a017, 1.0));
                        buf.fill_circle(x + cell * 0.5, y + cell * 0.5, cell / 8.0, rgba(0x006400, 1.0));
                        buf.fill_rect(x + cell * 0.5 - 2.0, y + cell * 0.5 - 2.0, 4.0, 4.0, rgba(0xffd700, 1.0));
                    }
                }
                // ornate borders, outermost first
                for (inset, line, color) in [(10.0, 15.0, 0x000000), (25.0, 10.0, 0x004d00), (40.0, 8.0, 0xd4a017)] {
                    buf.stroke_rect(inset, inset, w - 2.0 * inset, h - 2.0 * inset, line, rgba(color, 1.0));
                }
            }
            TextureKind::Flag => {
                buf.fill(rgba(0xc1272d, 1.0));
                let centre = Vec2::new(w / 2.0, h / 2.0);
                let r = 70.0 * (h / 342.0);
                let points: Vec<Vec2> = (0..5)
                    .map(|i| {
                        let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI * 0.8;
                        centre + Vec2::new(angle.cos(), angle.sin()) * r
                    })
                    .collect();
                for i in 0..5 {
                    buf.stroke_line(points[i], points[(i + 1) % 5], 12.0, rgba(0x006233, 1.0));
                }
            }
            TextureKind::Halo => {
                buf.fill_radial_glow(color_hex(0xfffaf0), 0.45);
            }
        }

        buf
    }
}

// ============================================================================
// Shared texture
// ============================================================================

/// UV offset/repeat applied when sampling a texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    pub offset: Vec2,
    pub repeat: Vec2,
}

/// A generated texture plus its mutable UV transform.
#[derive(Debug)]
pub struct Texture {
    pub descriptor: TextureDescriptor,
    pub pixels: PixelBuffer,
    transform: RwLock<UvTransform>,
}

impl Texture {
    #[must_use]
    pub fn new(descriptor: TextureDescriptor, pixels: PixelBuffer) -> Self {
        let transform = UvTransform {
            offset: Vec2::ZERO,
            repeat: descriptor.repeat,
        };
        Self {
            descriptor,
            pixels,
            transform: RwLock::new(transform),
        }
    }

    /// Rasterises `descriptor` with `source` and wraps the result.
    pub fn generate(source: &dyn TextureSource, descriptor: TextureDescriptor) -> Self {
        let pixels = source.generate(&descriptor);
        Self::new(descriptor, pixels)
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TextureKind {
        self.descriptor.kind
    }

    #[must_use]
    pub fn uv_transform(&self) -> UvTransform {
        *self.transform.read()
    }

    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.transform.read().offset
    }

    /// Moves the UV offset by `delta`, keeping it within one period for
    /// repeating textures so long sessions do not lose float precision.
    pub fn scroll(&self, delta: Vec2) {
        let mut t = self.transform.write();
        t.offset += delta;
        if self.descriptor.wrap == WrapMode::Repeat {
            t.offset = t.offset - t.offset.floor();
        }
    }

    pub fn set_offset(&self, offset: Vec2) {
        self.transform.write().offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_buffers_match_descriptor_size() {
        let source = CanvasTextureSource;
        for kind in [TextureKind::Water, TextureKind::Moon, TextureKind::Flag, TextureKind::Halo] {
            let desc = kind.descriptor(7);
            let buf = source.generate(&desc);
            assert_eq!(buf.data.len(), (desc.width * desc.height * 4) as usize);
        }
    }

    #[test]
    fn same_seed_same_pixels() {
        let source = CanvasTextureSource;
        let a = source.generate(&TextureKind::Water.descriptor(3));
        let b = source.generate(&TextureKind::Water.descriptor(3));
        assert_eq!(a, b);
    }

    #[test]
    fn halo_fades_to_transparent_edges() {
        let buf = CanvasTextureSource.generate(&TextureKind::Halo.descriptor(0));
        let centre = buf.pixel(128, 128).unwrap();
        let corner = buf.pixel(0, 0).unwrap();
        assert!(centre[3] > 100);
        assert_eq!(corner[3], 0);
    }

    #[test]
    fn repeating_scroll_wraps_offset() {
        let tex = Texture::generate(&CanvasTextureSource, TextureKind::Water.descriptor(1));
        tex.scroll(Vec2::new(0.0, -2.25));
        let y = tex.offset().y;
        assert!((y - 0.75).abs() < 1e-5, "offset wrapped into [0, 1), got {y}");
    }
}
