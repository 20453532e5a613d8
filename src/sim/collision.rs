//! Proximity collision between the player and lane entities
//!
//! Sprites are compared by their top-left corners: anything whose corner
//! lies strictly inside a window around the player's corner is a hit.

use glam::Vec2;

use super::entity::{Collectible, Drifter, Mover};
use crate::between;
use crate::consts::{HIT_WINDOW_AFTER, HIT_WINDOW_BEFORE};

/// Open axis-aligned window around the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub min: Vec2,
    pub max: Vec2,
}

impl HitWindow {
    /// Window `(x-20, x+40) x (y-20, y+40)` around a player corner
    pub fn around(player_pos: Vec2) -> Self {
        Self {
            min: player_pos - Vec2::splat(HIT_WINDOW_BEFORE),
            max: player_pos + Vec2::splat(HIT_WINDOW_AFTER),
        }
    }

    /// Strict containment on both axes
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        between(point.x, self.min.x, self.max.x) && between(point.y, self.min.y, self.max.y)
    }
}

/// First mover inside the window, by slot order
pub fn first_mover_hit<'a>(
    window: &HitWindow,
    movers: impl IntoIterator<Item = &'a Mover>,
) -> Option<u32> {
    movers
        .into_iter()
        .find(|m| window.contains(m.pos))
        .map(|m| m.id())
}

/// Every collectible inside the window, enabled or not
pub fn collectibles_hit<'a>(
    window: HitWindow,
    collectibles: impl IntoIterator<Item = &'a mut Collectible>,
) -> impl Iterator<Item = &'a mut Collectible> {
    collectibles
        .into_iter()
        .filter(move |c| window.contains(c.pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Sprite;

    #[test]
    fn test_window_bounds_are_open() {
        let window = HitWindow::around(Vec2::new(200.0, 400.0));
        assert!(window.contains(Vec2::new(210.0, 400.0)));
        assert!(window.contains(Vec2::new(181.0, 439.0)));
        assert!(!window.contains(Vec2::new(180.0, 400.0)));
        assert!(!window.contains(Vec2::new(240.0, 400.0)));
        assert!(!window.contains(Vec2::new(200.0, 380.0)));
        assert!(!window.contains(Vec2::new(200.0, 440.0)));
    }

    #[test]
    fn test_mover_hit_needs_both_axes() {
        let window = HitWindow::around(Vec2::new(200.0, 60.0));
        let movers = vec![
            Mover::new(1, Vec2::new(195.0, 230.0), 1, None),
            Mover::new(2, Vec2::new(-100.0, 60.0), 1, None),
            Mover::new(3, Vec2::new(195.0, 60.0), 1, None),
        ];
        assert_eq!(first_mover_hit(&window, &movers), Some(3));

        let window = HitWindow::around(Vec2::new(200.0, 400.0));
        assert_eq!(first_mover_hit(&window, &movers), None);
    }

    #[test]
    fn test_collectibles_hit_includes_disabled() {
        let window = HitWindow::around(Vec2::new(200.0, 400.0));
        let mut gems = vec![
            Collectible::new(1, Vec2::new(210.0, 400.0), Sprite::GemGreen, 1, None),
            Collectible::new(2, Vec2::new(500.0, 400.0), Sprite::GemOrange, 1, None),
        ];
        gems[0].enabled = false;

        let hits: Vec<u32> = collectibles_hit(window, &mut gems).map(|c| c.id).collect();
        assert_eq!(hits, vec![1]);
    }
}
