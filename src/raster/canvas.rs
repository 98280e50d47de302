use glam::Vec2;

use crate::raster::color::{blend, to_rgba8};

/// CPU pixel buffer with source-over drawing primitives.
///
/// Pixels are opaque sRGB in [0, 1]; every primitive blends into what is
/// already there and clips to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, fill: [f32; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend_pixel(&mut self, x: i64, y: i64, color: [f32; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 || alpha <= 0.0 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.pixels[i] = blend(self.pixels[i], color, alpha);
    }

    /// Overwrite this canvas with another of the same size
    pub fn copy_from(&mut self, other: &Canvas) {
        if self.width == other.width && self.height == other.height {
            self.pixels.copy_from_slice(&other.pixels);
        } else {
            *self = other.clone();
        }
    }

    /// Translucent fill over the whole canvas
    pub fn fade(&mut self, color: [f32; 3], alpha: f32) {
        for p in &mut self.pixels {
            *p = blend(*p, color, alpha);
        }
    }

    /// Vertical gradient from `top` to `bottom`, replacing the contents
    pub fn vertical_gradient(&mut self, top: [f32; 3], bottom: [f32; 3]) {
        let span = self.height.saturating_sub(1).max(1) as f32;
        for y in 0..self.height {
            let row = blend(top, bottom, y as f32 / span);
            let start = self.index(0, y);
            let end = start + self.width as usize;
            self.pixels[start..end].fill(row);
        }
    }

    /// Filled circle with a one pixel soft edge
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 3], alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let reach = radius + 0.5;
        let x0 = (center.x - reach).floor() as i64;
        let x1 = (center.x + reach).ceil() as i64;
        let y0 = (center.y - reach).floor() as i64;
        let y1 = (center.y + reach).ceil() as i64;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (reach - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// One pixel wide line, DDA stepped
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: [f32; 3], alpha: f32) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        let step = delta / steps as f32;
        let mut point = from;
        for _ in 0..=steps {
            self.blend_pixel(point.x.floor() as i64, point.y.floor() as i64, color, alpha);
            point += step;
        }
    }

    /// Radial gradient from `color` at `alpha` in the center to transparent at `radius`
    pub fn radial_glow(&mut self, center: Vec2, radius: f32, color: [f32; 3], alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0) as i64;
        let x1 = (center.x + radius).ceil().min(self.width as f32) as i64;
        let y0 = (center.y - radius).floor().max(0.0) as i64;
        let y1 = (center.y + radius).ceil().min(self.height as f32) as i64;

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let falloff = 1.0 - d / radius;
                if falloff > 0.0 {
                    self.blend_pixel(x, y, color, alpha * falloff);
                }
            }
        }
    }

    /// Pack into RGBA8 rows for upload
    pub fn write_rgba8(&self, out: &mut Vec<[u8; 4]>) {
        out.clear();
        out.extend(self.pixels.iter().map(|&p| to_rgba8(p)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    #[test]
    fn test_canvas_size() {
        let canvas = Canvas::new(64, 32, BLACK);
        assert_eq!(canvas.width(), 64);
        assert_eq!(canvas.height(), 32);
        assert_eq!(canvas.pixel(63, 31), Some(BLACK));
        assert_eq!(canvas.pixel(64, 0), None);
    }

    #[test]
    fn test_zero_sized_canvas() {
        let mut canvas = Canvas::new(0, 0, BLACK);
        assert!(canvas.is_empty());
        canvas.fade(WHITE, 0.5);
        canvas.fill_circle(Vec2::splat(1.0), 3.0, WHITE, 1.0);
        canvas.draw_line(Vec2::ZERO, Vec2::splat(10.0), WHITE, 1.0);
        canvas.radial_glow(Vec2::ZERO, 5.0, WHITE, 1.0);
        canvas.vertical_gradient(BLACK, WHITE);
    }

    #[test]
    fn test_fade_converges_to_fill() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        for _ in 0..200 {
            canvas.fade(BLACK, 0.1);
        }
        let p = canvas.pixel(2, 2).unwrap();
        assert!(p[0] < 1e-3);
    }

    #[test]
    fn test_circle_covers_center_not_corners() {
        let mut canvas = Canvas::new(20, 20, BLACK);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, WHITE, 1.0);

        assert_eq!(canvas.pixel(10, 10), Some(WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(19, 19), Some(BLACK));
    }

    #[test]
    fn test_circle_clips_at_edges() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.fill_circle(Vec2::new(0.0, 0.0), 4.0, WHITE, 0.5);
        let p = canvas.pixel(0, 0).unwrap();
        assert!((p[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_line_endpoints() {
        let mut canvas = Canvas::new(16, 16, BLACK);
        canvas.draw_line(Vec2::new(1.5, 1.5), Vec2::new(12.5, 8.5), WHITE, 1.0);
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));
        assert_eq!(canvas.pixel(12, 8), Some(WHITE));
        assert_eq!(canvas.pixel(12, 1), Some(BLACK));
    }

    #[test]
    fn test_glow_falls_off() {
        let mut canvas = Canvas::new(40, 40, BLACK);
        canvas.radial_glow(Vec2::new(20.0, 20.0), 10.0, WHITE, 0.8);

        let center = canvas.pixel(20, 20).unwrap()[0];
        let mid = canvas.pixel(25, 20).unwrap()[0];
        let outside = canvas.pixel(35, 20).unwrap()[0];
        assert!(center > mid && mid > outside);
        assert!(center <= 0.8);
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn test_gradient_rows() {
        let mut canvas = Canvas::new(3, 5, BLACK);
        canvas.vertical_gradient(BLACK, WHITE);
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(2, 4), Some(WHITE));
        assert_eq!(canvas.pixel(1, 2), Some([0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_write_rgba8() {
        let canvas = Canvas::new(2, 2, WHITE);
        let mut out = Vec::new();
        canvas.write_rgba8(&mut out);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|px| *px == [255, 255, 255, 255]));
    }
}
