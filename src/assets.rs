//! Sprite catalog
//!
//! Loads player and obstacle images once at startup, scales them to the
//! player's size and derives a collision mask from each obstacle's alpha
//! channel. The catalog is read-only afterwards; obstacles share sprites
//! through `Arc`.
//!
//! Missing or unreadable images never abort loading: they are replaced by a
//! solid grey placeholder and logged.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::consts::*;
use crate::sim::mask::Mask;
use crate::sim::player::PlayerState;
use crate::sim::state::RunAnimation;

/// Pixels with alpha above this are opaque for collision
const ALPHA_THRESHOLD: u8 = 127;
/// Placeholder used when an image cannot be loaded
const PLACEHOLDER_SIZE: (u32, u32) = (100, 100);
const PLACEHOLDER_COLOR: [u8; 3] = [150, 150, 150];
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Why an image could not be loaded
#[derive(Debug)]
pub enum AssetError {
    Missing(PathBuf),
    Decode(image::ImageError),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing(path) => write!(f, "asset not found: {}", path.display()),
            AssetError::Decode(err) => write!(f, "failed to decode image: {err}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Missing(_) => None,
            AssetError::Decode(err) => Some(err),
        }
    }
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        AssetError::Decode(err)
    }
}

/// An RGBA image ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Solid, fully opaque rectangle
    pub fn placeholder(width: u32, height: u32, color: [u8; 3]) -> Self {
        let [r, g, b] = color;
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])))
    }

    /// Build a surface pixel by pixel
    pub fn from_fn(width: u32, height: u32, mut pixel: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_fn(width, height, |x, y| Rgba(pixel(x, y))))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Size in screen units
    pub fn size(&self) -> (i32, i32) {
        (self.width() as i32, self.height() as i32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Opacity mask from the alpha channel
    pub fn alpha_mask(&self) -> Mask {
        Mask::from_fn(self.width(), self.height(), |x, y| {
            self.image.get_pixel(x, y).0[3] > ALPHA_THRESHOLD
        })
    }
}

/// Decode an image file
pub fn load_image(path: &Path) -> Result<Surface, AssetError> {
    if !path.exists() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    let image = image::open(path)?.to_rgba8();
    Ok(Surface::from_image(image))
}

/// Decode an image file, falling back to a grey placeholder
pub fn load_image_safe(path: &Path) -> Surface {
    match load_image(path) {
        Ok(surface) => surface,
        Err(err) => {
            log::warn!("{err}; using placeholder");
            let (w, h) = PLACEHOLDER_SIZE;
            Surface::placeholder(w, h, PLACEHOLDER_COLOR)
        }
    }
}

/// Scale to `new_height` keeping the aspect ratio. Without `allow_upscale`
/// the surface is returned unchanged when scaling would make it wider.
pub fn scale_to_height(surface: &Surface, new_height: u32, allow_upscale: bool) -> Surface {
    let (w, h) = (surface.width(), surface.height());
    if h == 0 || new_height == 0 {
        return surface.clone();
    }
    let scale = new_height as f32 / h as f32;
    let new_width = ((w as f32 * scale) as u32).max(1);
    if !allow_upscale && new_width > w {
        return surface.clone();
    }
    if (new_width, new_height) == (w, h) {
        return surface.clone();
    }
    Surface::from_image(imageops::resize(
        surface.image(),
        new_width,
        new_height,
        FilterType::Triangle,
    ))
}

/// An obstacle image and its collision mask
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub surface: Surface,
    pub mask: Mask,
}

impl Sprite {
    pub fn from_surface(surface: Surface) -> Self {
        let mask = surface.alpha_mask();
        Self { surface, mask }
    }

    pub fn size(&self) -> (i32, i32) {
        self.surface.size()
    }
}

/// Player animation frames
#[derive(Debug, Clone)]
pub struct PlayerSprites {
    /// Never empty
    pub run_frames: Vec<Surface>,
    pub jump: Surface,
    pub slide: Surface,
    pub idle: Surface,
}

impl PlayerSprites {
    /// Load from a directory holding `run1.png`..`run10.png` (or `run.png`),
    /// `jump.png`, `slide.png` and optionally `idle.png`. Player frames are
    /// never upscaled.
    pub fn load(dir: &Path, height: u32) -> Self {
        let mut run_frames: Vec<Surface> = (1..=10)
            .map(|i| dir.join(format!("run{i}.png")))
            .filter(|path| path.exists())
            .map(|path| scale_to_height(&load_image_safe(&path), height, false))
            .collect();
        if run_frames.is_empty() {
            run_frames.push(scale_to_height(
                &load_image_safe(&dir.join("run.png")),
                height,
                false,
            ));
        }

        let slide_height = (height as f32 * SLIDE_HEIGHT_RATIO) as u32;
        let idle_path = dir.join("idle.png");
        let idle_path = if idle_path.exists() {
            idle_path
        } else {
            dir.join("run1.png")
        };

        Self {
            jump: scale_to_height(&load_image_safe(&dir.join("jump.png")), height, false),
            slide: scale_to_height(&load_image_safe(&dir.join("slide.png")), slide_height, false),
            idle: scale_to_height(&load_image_safe(&idle_path), height, false),
            run_frames,
        }
    }

    /// Upright body size
    pub fn standing_size(&self) -> (i32, i32) {
        self.run_frames
            .first()
            .map(Surface::size)
            .unwrap_or_else(|| self.idle.size())
    }

    /// Sliding body size
    pub fn slide_size(&self) -> (i32, i32) {
        self.slide.size()
    }

    /// Frame to draw for the player's current state
    pub fn frame(&self, state: PlayerState, is_jumping: bool, animation: &RunAnimation) -> &Surface {
        match state {
            PlayerState::Sliding => &self.slide,
            PlayerState::WallSliding => &self.jump,
            _ if is_jumping => &self.jump,
            PlayerState::Running => self
                .run_frames
                .get(animation.frame % self.run_frames.len().max(1))
                .unwrap_or(&self.idle),
            PlayerState::Jumping => &self.idle,
        }
    }
}

/// Everything drawable, loaded once
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    pub player: PlayerSprites,
    pub ground: Vec<Arc<Sprite>>,
    pub flying: Vec<Arc<Sprite>>,
    /// Full-screen backdrop, if one was found
    pub background: Option<Surface>,
}

impl SpriteCatalog {
    /// Load from an asset directory laid out as `player/`,
    /// `ground_obstacles/`, `flying_obstacles/` and `background.png`
    pub fn load(asset_dir: &Path) -> Self {
        let player_height = PLAYER_HEIGHT as u32;
        let catalog = Self {
            player: PlayerSprites::load(&asset_dir.join("player"), player_height),
            ground: load_obstacles(
                &asset_dir.join("ground_obstacles"),
                player_height,
                GROUND_OBSTACLE_SCALE,
            ),
            flying: load_obstacles(
                &asset_dir.join("flying_obstacles"),
                player_height,
                FLYING_OBSTACLE_SCALE,
            ),
            background: load_background(&asset_dir.join("background.png")),
        };
        log::info!(
            "Loaded catalog from {}: {} run frames, {} ground and {} flying obstacles",
            asset_dir.display(),
            catalog.player.run_frames.len(),
            catalog.ground.len(),
            catalog.flying.len()
        );
        catalog
    }

    /// Catalog built from generated shapes, for headless runs and tests
    pub fn procedural() -> Self {
        let standing = Surface::placeholder(60, PLAYER_HEIGHT as u32, [40, 90, 200]);
        let slide_height = (PLAYER_HEIGHT as f32 * SLIDE_HEIGHT_RATIO) as u32;
        let ground_size = (PLAYER_HEIGHT as f32 * GROUND_OBSTACLE_SCALE) as u32;
        let flying_size = (PLAYER_HEIGHT as f32 * FLYING_OBSTACLE_SCALE) as u32;

        let crate_box = Surface::placeholder(ground_size, ground_size, [139, 90, 43]);
        let spike = Surface::from_fn(ground_size, ground_size, |x, y| {
            // Upward-pointing triangle
            let half = ground_size as i32 / 2;
            let inside = (x as i32 - half).abs() * 2 <= y as i32 + 1;
            if inside { [120, 120, 130, 255] } else { [0, 0, 0, 0] }
        });
        let bird = Surface::from_fn(flying_size, flying_size, |x, y| {
            let c = flying_size as i32 / 2;
            let inside = (x as i32 - c).abs() + (y as i32 - c).abs() <= c;
            if inside { [200, 40, 40, 255] } else { [0, 0, 0, 0] }
        });

        Self {
            player: PlayerSprites {
                run_frames: vec![standing.clone()],
                jump: standing.clone(),
                slide: Surface::placeholder(60, slide_height, [40, 90, 200]),
                idle: standing,
            },
            ground: vec![
                Arc::new(Sprite::from_surface(crate_box)),
                Arc::new(Sprite::from_surface(spike)),
            ],
            flying: vec![Arc::new(Sprite::from_surface(bird))],
            background: None,
        }
    }

    pub fn obstacle_count(&self) -> usize {
        self.ground.len() + self.flying.len()
    }
}

/// Load every image in `folder` (sorted by file name), scaled to
/// `player_height * ratio` with upscaling allowed. A missing folder yields
/// no obstacles.
pub fn load_obstacles(folder: &Path, player_height: u32, ratio: f32) -> Vec<Arc<Sprite>> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("No obstacles in {}: {err}", folder.display());
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_image_extension(path))
        .collect();
    paths.sort();

    let height = ((player_height as f32 * ratio) as u32).max(4);
    paths
        .iter()
        .map(|path| {
            let surface = scale_to_height(&load_image_safe(path), height, true);
            Arc::new(Sprite::from_surface(surface))
        })
        .collect()
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn load_background(path: &Path) -> Option<Surface> {
    if !path.exists() {
        return None;
    }
    match load_image(path) {
        Ok(surface) => Some(Surface::from_image(imageops::resize(
            surface.image(),
            SCREEN_WIDTH as u32,
            SCREEN_HEIGHT as u32,
            FilterType::Triangle,
        ))),
        Err(err) => {
            log::warn!("Background unavailable: {err}");
            None
        }
    }
}
