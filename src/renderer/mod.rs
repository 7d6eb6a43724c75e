//! Rendering module
//!
//! The game never draws directly. Each frame it builds a [`DrawList`]
//! (see [`frame`]) and hands it to whatever [`Renderer`] the front end
//! owns. [`SoftwareRenderer`] composites into an RGBA buffer and is what
//! the headless binary and the tests use.

pub mod frame;
pub mod software;

pub use frame::{build_play_frame, build_text_frame};
pub use software::SoftwareRenderer;

use crate::assets::Surface;
use crate::sim::Rect;

/// Sky fill used when no background image is loaded
pub const SKY_COLOR: [u8; 3] = [135, 206, 235];
/// Ground band below `GROUND_Y`
pub const GROUND_COLOR: [u8; 3] = [96, 72, 48];
pub const TEXT_COLOR: [u8; 3] = [255, 255, 255];
pub const HIGHLIGHT_COLOR: [u8; 3] = [255, 215, 0];

/// What fills the screen before anything else is drawn
#[derive(Debug, Clone, Copy)]
pub enum Backdrop<'a> {
    /// Background image, already scaled to the play area
    Image(&'a Surface),
    /// Flat sky with a ground band
    Sky,
}

/// A surface placed on screen
#[derive(Debug, Clone, Copy)]
pub struct SpriteDraw<'a> {
    pub surface: &'a Surface,
    pub rect: Rect,
}

/// One particle as a small square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDraw {
    pub x: f32,
    pub y: f32,
    pub color: [u8; 3],
    /// Opacity in 0..=1
    pub alpha: f32,
    pub size: f32,
}

/// A line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: [u8; 3],
}

impl TextItem {
    pub fn new(text: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            color: TEXT_COLOR,
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }
}

/// Everything needed to draw one frame, back to front
#[derive(Debug, Clone)]
pub struct DrawList<'a> {
    pub background: Backdrop<'a>,
    /// Obstacles first, then the player
    pub sprites: Vec<SpriteDraw<'a>>,
    pub particles: Vec<ParticleDraw>,
    pub texts: Vec<TextItem>,
}

impl<'a> DrawList<'a> {
    pub fn new(background: Backdrop<'a>) -> Self {
        Self {
            background,
            sprites: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// All text lines in draw order
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|t| t.text.as_str())
    }
}

/// Consumes one draw list per frame
pub trait Renderer {
    fn present(&mut self, frame: &DrawList<'_>);
}
