//! Player vs obstacle collision
//!
//! The player is vulnerable only through a hitbox anchored at the bottom
//! center of its body, smaller than the sprite. Each obstacle is first
//! tested rectangle-against-rectangle; only when that overlaps is the
//! obstacle's pixel mask consulted.
//!
//! Flying obstacles are a special case: unless the player is sliding, the
//! hitbox is stretched far above and below the body, so jumping over or
//! standing under a flying obstacle always collides. Sliding is the only
//! way past one.

use super::mask::Mask;
use super::player::{Player, PlayerState};
use super::rect::Rect;
use super::state::{Obstacle, ObstacleKind};
use crate::consts::PLAYER_HEIGHT;

/// Vertical reach of the stretched flying-obstacle hitbox beyond the body
const FLYING_HITBOX_MARGIN: i32 = 50;

/// Vulnerable region for the player's current state
pub fn hitbox(player: &Player) -> Rect {
    let body = player.rect();
    // Sliding: short and wide. Upright: taller and narrower.
    let (w, h) = if player.state == PlayerState::Sliding {
        ((body.w * 7 / 10).max(10), (PLAYER_HEIGHT * 15 / 100).max(4))
    } else {
        ((body.w / 2).max(10), (PLAYER_HEIGHT / 4).max(6))
    };
    Rect::from_mid_bottom(body.centerx(), body.bottom(), w, h)
}

/// Hitbox used against flying obstacles when not sliding: same width,
/// extending `FLYING_HITBOX_MARGIN` above and below the body
pub fn flying_hitbox(player: &Player, hitbox: &Rect) -> Rect {
    let body = player.rect();
    Rect::new(
        hitbox.x,
        body.top() - FLYING_HITBOX_MARGIN,
        hitbox.w,
        body.h + 2 * FLYING_HITBOX_MARGIN,
    )
}

/// Box to test against an obstacle of `kind`
pub fn collision_box(player: &Player, hitbox: &Rect, kind: ObstacleKind) -> Rect {
    match (kind, player.state) {
        (ObstacleKind::Flying, state) if state != PlayerState::Sliding => {
            flying_hitbox(player, hitbox)
        }
        _ => *hitbox,
    }
}

/// Broad phase then narrow phase for a single obstacle
pub fn obstacle_hit(obstacle: &Obstacle, collision_box: &Rect) -> bool {
    if !obstacle.rect.colliderect(collision_box) {
        return false;
    }
    let box_mask = Mask::filled(collision_box.w as u32, collision_box.h as u32);
    let offset = (
        collision_box.x - obstacle.rect.x,
        collision_box.y - obstacle.rect.y,
    );
    obstacle.sprite.mask.overlap(&box_mask, offset).is_some()
}

/// Index of the first obstacle (in spawn order) the player collides with
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let hitbox = hitbox(player);
    obstacles
        .iter()
        .position(|o| obstacle_hit(o, &collision_box(player, &hitbox, o.kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Sprite, Surface};
    use crate::consts::*;
    use std::sync::Arc;

    fn player() -> Player {
        Player::new((60, 100), (60, 60))
    }

    fn solid(w: i32, h: i32) -> Arc<Sprite> {
        Arc::new(Sprite::from_surface(Surface::placeholder(
            w as u32,
            h as u32,
            [150, 150, 150],
        )))
    }

    fn obstacle_at(kind: ObstacleKind, sprite: Arc<Sprite>, rect: Rect) -> Obstacle {
        Obstacle { kind, sprite, rect }
    }

    #[test]
    fn test_hitbox_dimensions() {
        let mut p = player();
        let hb = hitbox(&p);
        assert_eq!((hb.w, hb.h), (30, 25));
        assert_eq!(hb.bottom(), GROUND_Y);
        assert_eq!(hb.centerx(), p.rect().centerx());

        p.try_slide();
        let hb = hitbox(&p);
        assert_eq!((hb.w, hb.h), (42, 15));
        assert_eq!(hb.bottom(), GROUND_Y);
    }

    #[test]
    fn test_hitbox_minimums() {
        let p = Player::new((8, 100), (8, 60));
        let hb = hitbox(&p);
        assert_eq!(hb.w, 10);
    }

    #[test]
    fn test_ground_obstacle_matching_hitbox_collides() {
        let p = player();
        let hb = hitbox(&p);
        let obstacles = vec![obstacle_at(ObstacleKind::Ground, solid(hb.w, hb.h), hb)];
        assert_eq!(first_collision(&p, &obstacles), Some(0));
    }

    #[test]
    fn test_sliding_under_flying_obstacle_is_safe() {
        let mut p = player();
        p.try_slide();
        let sprite = solid(50, 50);
        // Overlaps the sliding body but sits entirely above the slide hitbox
        let rect = Rect::from_bottom_left(p.rect().x, GROUND_Y - FLYING_HEIGHT, 50, 50);
        assert!(rect.colliderect(&Rect::new(p.rect().x, 0, 60, GROUND_Y)));
        let obstacles = vec![obstacle_at(ObstacleKind::Flying, sprite, rect)];
        assert_eq!(first_collision(&p, &obstacles), None);
    }

    #[test]
    fn test_flying_obstacle_hits_jumping_player() {
        let mut p = player();
        p.try_jump();
        // High above the body but within the stretched hitbox
        p.y = 300.0 - 100.0 - 140.0;
        let hb = hitbox(&p);
        let rect = Rect::new(hb.x, p.rect().top() - 40, 20, 20);
        let obstacles = vec![obstacle_at(ObstacleKind::Flying, solid(20, 20), rect)];
        assert_eq!(first_collision(&p, &obstacles), Some(0));

        // A ground obstacle in the same spot misses the normal hitbox
        let obstacles = vec![obstacle_at(ObstacleKind::Ground, solid(20, 20), rect)];
        assert_eq!(first_collision(&p, &obstacles), None);
    }

    #[test]
    fn test_transparent_pixels_do_not_collide() {
        let p = player();
        let hb = hitbox(&p);
        // Only the right-most column of the obstacle is opaque
        let surface = Surface::from_fn(40, 40, |x, _| {
            if x == 39 { [0, 0, 0, 255] } else { [0, 0, 0, 0] }
        });
        let sprite = Arc::new(Sprite::from_surface(surface));
        // Rectangles overlap by 10 pixels on the left side of the obstacle
        let rect = Rect::new(hb.right() - 10, hb.y, 40, 40);
        let obstacles = vec![obstacle_at(ObstacleKind::Ground, sprite.clone(), rect)];
        assert_eq!(first_collision(&p, &obstacles), None);

        // Slide it left so the opaque column enters the hitbox
        let rect = Rect::new(hb.right() - 40, hb.y, 40, 40);
        let obstacles = vec![obstacle_at(ObstacleKind::Ground, sprite, rect)];
        assert_eq!(first_collision(&p, &obstacles), Some(0));
    }

    #[test]
    fn test_first_collision_short_circuits_in_order() {
        let p = player();
        let hb = hitbox(&p);
        let far = obstacle_at(ObstacleKind::Ground, solid(10, 10), Rect::new(600, 300, 10, 10));
        let a = obstacle_at(ObstacleKind::Ground, solid(hb.w, hb.h), hb);
        let b = a.clone();
        assert_eq!(first_collision(&p, &[far, a, b]), Some(1));
    }

    #[test]
    fn test_identical_obstacles_identical_outcome() {
        let p = player();
        let hb = hitbox(&p);
        let sprite = solid(30, 30);
        let rect = Rect::new(hb.x + 5, hb.y - 10, 30, 30);
        let a = obstacle_at(ObstacleKind::Ground, sprite.clone(), rect);
        let b = obstacle_at(ObstacleKind::Ground, sprite, rect);
        let cb = collision_box(&p, &hb, ObstacleKind::Ground);
        assert_eq!(obstacle_hit(&a, &cb), obstacle_hit(&b, &cb));
    }
}
