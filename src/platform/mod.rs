//! Platform abstraction layer
//!
//! Front ends translate their native events into [`Key`] presses and
//! drive the simulation through a [`FixedStep`] clock. Nothing in here
//! polls devices.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// A discrete key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character (text entry, letter shortcuts)
    Char(char),
    Enter,
    Escape,
    Backspace,
    Space,
    Up,
    Down,
    Tab,
    F1,
}

impl Key {
    /// Jump in play (Space or Up)
    pub fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::Up)
    }

    /// Slide in play (Down or `s`)
    pub fn is_slide(self) -> bool {
        matches!(self, Key::Down | Key::Char('s') | Key::Char('S'))
    }
}

/// Fixed-timestep accumulator
///
/// Wall-clock frame time goes in, a whole number of 60 Hz ticks comes out.
/// Long stalls are clamped and at most `MAX_SUBSTEPS` ticks run per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop whatever the cap left behind
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
