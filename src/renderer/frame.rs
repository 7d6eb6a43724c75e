//! Draw list construction
//!
//! Copies what the renderer needs out of the run state so rendering never
//! touches simulation types beyond this point.

use super::{Backdrop, DrawList, HIGHLIGHT_COLOR, ParticleDraw, SpriteDraw, TextItem};
use crate::assets::SpriteCatalog;
use crate::consts::*;
use crate::sim::{Rect, RunState};

/// Left margin and line spacing for HUD and menu text
const TEXT_X: i32 = 10;
const LINE_HEIGHT: i32 = 30;

fn backdrop(catalog: &SpriteCatalog) -> Backdrop<'_> {
    match &catalog.background {
        Some(surface) => Backdrop::Image(surface),
        None => Backdrop::Sky,
    }
}

/// Frame for an active run: obstacles, player, particles and the HUD
pub fn build_play_frame<'a>(run: &'a RunState, catalog: &'a SpriteCatalog) -> DrawList<'a> {
    let mut frame = DrawList::new(backdrop(catalog));

    // 1. Obstacles in spawn order
    frame.sprites.extend(run.obstacles.iter().map(|o| SpriteDraw {
        surface: &o.sprite.surface,
        rect: o.rect,
    }));

    // 2. Player, bottom-aligned with its body
    let player = &run.player;
    let surface = catalog
        .player
        .frame(player.state, player.is_jumping, &run.animation);
    let body = player.rect();
    let (w, h) = surface.size();
    frame.sprites.push(SpriteDraw {
        surface,
        rect: Rect::from_bottom_left(body.left(), body.bottom(), w, h),
    });

    // 3. Particles
    frame.particles.extend(run.particles.iter().map(|p| ParticleDraw {
        x: p.pos.x,
        y: p.pos.y,
        color: p.color,
        alpha: p.alpha().clamp(0.0, 1.0),
        size: p.size,
    }));

    // 4. HUD
    frame.texts.push(TextItem::new(
        format!("Score: {}", run.score.score),
        TEXT_X,
        TEXT_X,
    ));
    frame.texts.push(TextItem::new(
        format!("Level: {}", run.difficulty.level),
        TEXT_X,
        TEXT_X + LINE_HEIGHT,
    ));
    frame.texts.push(TextItem::new(
        format!("Player: {}", run.player_name),
        SCREEN_WIDTH - 200,
        TEXT_X,
    ));

    frame
}

/// Frame with a highlighted title and plain lines below it
pub fn build_text_frame<'a>(
    catalog: &'a SpriteCatalog,
    title: &str,
    lines: &[String],
) -> DrawList<'a> {
    let mut frame = DrawList::new(backdrop(catalog));
    frame
        .texts
        .push(TextItem::new(title, TEXT_X * 4, LINE_HEIGHT).with_color(HIGHLIGHT_COLOR));
    for (i, line) in lines.iter().enumerate() {
        let y = LINE_HEIGHT * (i as i32 + 3);
        frame.texts.push(TextItem::new(line.clone(), TEXT_X * 4, y));
    }
    frame
}
