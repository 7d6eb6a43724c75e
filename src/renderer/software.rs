//! CPU compositor
//!
//! Draws a [`DrawList`] into an RGBA canvas the size of the play area.
//! Sprites and particles are alpha blended. Text is not rasterized; the
//! last frame's lines are kept so callers can log or inspect them.

use std::path::Path;

use image::imageops;
use image::{ImageFormat, Pixel, Rgba, RgbaImage};

use super::{Backdrop, DrawList, GROUND_COLOR, ParticleDraw, Renderer, SKY_COLOR};
use crate::consts::{GROUND_Y, SCREEN_HEIGHT, SCREEN_WIDTH};

pub struct SoftwareRenderer {
    canvas: RgbaImage,
    frames_presented: u64,
    last_text: Vec<String>,
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self {
            canvas: RgbaImage::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
            frames_presented: 0,
            last_text: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Text lines of the most recent frame
    pub fn last_text(&self) -> &[String] {
        &self.last_text
    }

    /// Write the current canvas as a PNG
    pub fn save_png(&self, path: &Path) -> image::ImageResult<()> {
        self.canvas.save_with_format(path, ImageFormat::Png)?;
        log::info!("Wrote frame to {}", path.display());
        Ok(())
    }

    fn fill_backdrop(&mut self, background: &Backdrop<'_>) {
        match background {
            Backdrop::Image(surface) => {
                fill(&mut self.canvas, SKY_COLOR, SKY_COLOR, 0);
                imageops::replace(&mut self.canvas, surface.image(), 0, 0);
            }
            Backdrop::Sky => {
                fill(&mut self.canvas, SKY_COLOR, GROUND_COLOR, GROUND_Y.max(0) as u32);
            }
        }
    }

    fn draw_particle(&mut self, p: &ParticleDraw) {
        let alpha = (p.alpha.clamp(0.0, 1.0) * 255.0) as u8;
        if alpha == 0 {
            return;
        }
        let [r, g, b] = p.color;
        let color = Rgba([r, g, b, alpha]);
        let half = (p.size / 2.0).max(0.5);
        let x0 = (p.x - half).floor().max(0.0) as u32;
        let y0 = (p.y - half).floor().max(0.0) as u32;
        let x1 = ((p.x + half).ceil().max(0.0) as u32).min(self.canvas.width());
        let y1 = ((p.y + half).ceil().max(0.0) as u32).min(self.canvas.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.canvas.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

/// Paint rows above `split_y` with `upper` and the rest with `lower`
fn fill(canvas: &mut RgbaImage, upper: [u8; 3], lower: [u8; 3], split_y: u32) {
    let opaque = |[r, g, b]: [u8; 3]| Rgba([r, g, b, 255]);
    let (upper, lower) = (opaque(upper), opaque(lower));
    for (_, y, p) in canvas.enumerate_pixels_mut() {
        *p = if y < split_y { upper } else { lower };
    }
}

impl Renderer for SoftwareRenderer {
    fn present(&mut self, frame: &DrawList<'_>) {
        self.fill_backdrop(&frame.background);

        for sprite in &frame.sprites {
            imageops::overlay(
                &mut self.canvas,
                sprite.surface.image(),
                sprite.rect.x as i64,
                sprite.rect.y as i64,
            );
        }

        for particle in &frame.particles {
            self.draw_particle(particle);
        }

        self.last_text = frame.texts.iter().map(|t| t.text.clone()).collect();
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Surface;
    use crate::renderer::{SpriteDraw, TextItem};
    use crate::sim::Rect;

    #[test]
    fn test_sky_and_ground() {
        let mut renderer = SoftwareRenderer::new();
        renderer.present(&DrawList::new(Backdrop::Sky));
        let [r, g, b] = SKY_COLOR;
        assert_eq!(renderer.canvas().get_pixel(5, 5).0, [r, g, b, 255]);
        let [r, g, b] = GROUND_COLOR;
        assert_eq!(
            renderer.canvas().get_pixel(5, GROUND_Y as u32 + 1).0,
            [r, g, b, 255]
        );
        assert_eq!(renderer.frames_presented(), 1);
    }

    #[test]
    fn test_sprite_composited_with_alpha() {
        let block = Surface::from_fn(10, 10, |x, _| {
            if x < 5 { [255, 0, 0, 255] } else { [0, 0, 0, 0] }
        });
        let mut frame = DrawList::new(Backdrop::Sky);
        frame.sprites.push(SpriteDraw {
            surface: &block,
            rect: Rect::new(20, 20, 10, 10),
        });
        let mut renderer = SoftwareRenderer::new();
        renderer.present(&frame);

        assert_eq!(renderer.canvas().get_pixel(22, 22).0, [255, 0, 0, 255]);
        // Transparent half leaves the sky untouched
        let [r, g, b] = SKY_COLOR;
        assert_eq!(renderer.canvas().get_pixel(27, 22).0, [r, g, b, 255]);
    }

    #[test]
    fn test_offscreen_sprite_is_clipped() {
        let block = Surface::placeholder(30, 30, [0, 0, 0]);
        let mut frame = DrawList::new(Backdrop::Sky);
        frame.sprites.push(SpriteDraw {
            surface: &block,
            rect: Rect::new(-20, -20, 30, 30),
        });
        let mut renderer = SoftwareRenderer::new();
        renderer.present(&frame);
        assert_eq!(renderer.canvas().get_pixel(5, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_particles_and_text() {
        let mut frame = DrawList::new(Backdrop::Sky);
        frame.particles.push(ParticleDraw {
            x: 50.0,
            y: 50.0,
            color: [0, 0, 0],
            alpha: 1.0,
            size: 4.0,
        });
        frame.particles.push(ParticleDraw {
            x: -100.0,
            y: 1000.0,
            color: [0, 0, 0],
            alpha: 1.0,
            size: 4.0,
        });
        frame.texts.push(TextItem::new("Score: 3", 0, 0));
        let mut renderer = SoftwareRenderer::new();
        renderer.present(&frame);
        assert_eq!(renderer.canvas().get_pixel(50, 50).0, [0, 0, 0, 255]);
        assert_eq!(renderer.last_text(), ["Score: 3".to_string()]);
    }
}
