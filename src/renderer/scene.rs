//! Frame composition: tiled background, then gems, bugs and the player

use crate::consts::{NUM_COLS, NUM_ROWS, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::{Entity, GameState, Sprite};

use super::Renderer;

/// Background tile for each row, top to bottom
pub const ROW_SPRITES: [Sprite; NUM_ROWS] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::GrassBlock,
];

pub fn draw_background(renderer: &mut impl Renderer) {
    for (row, &sprite) in ROW_SPRITES.iter().enumerate() {
        for col in 0..NUM_COLS {
            renderer.draw_sprite(sprite, col as f32 * TILE_WIDTH, row as f32 * TILE_HEIGHT);
        }
    }
}

/// Draw enabled collectibles, every mover, then the player on top
pub fn draw_entities(state: &GameState, renderer: &mut impl Renderer) {
    for gem in state.collectibles.iter().filter(|c| c.enabled) {
        draw(renderer, gem);
    }
    for mover in &state.movers {
        draw(renderer, mover);
    }
    draw(renderer, &state.player);
}

pub fn render_frame(state: &GameState, renderer: &mut impl Renderer) {
    draw_background(renderer);
    draw_entities(state, renderer);
}

fn draw(renderer: &mut impl Renderer, entity: &impl Entity) {
    let pos = entity.pos();
    renderer.draw_sprite(entity.sprite(), pos.x, pos.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Rules;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Sprite, f32, f32)>,
    }

    impl Renderer for Recorder {
        fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) {
            self.calls.push((sprite, x, y));
        }
    }

    #[test]
    fn test_background_grid() {
        let mut rec = Recorder::default();
        draw_background(&mut rec);
        assert_eq!(rec.calls.len(), 30);
        assert_eq!(rec.calls[0], (Sprite::WaterBlock, 0.0, 0.0));
        assert_eq!(rec.calls[29], (Sprite::GrassBlock, 404.0, 415.0));
    }

    #[test]
    fn test_disabled_gems_skipped_player_last() {
        let mut state = GameState::new(3, Rules::default(), 10);
        let mut rec = Recorder::default();
        render_frame(&state, &mut rec);
        let with_gem = rec.calls.len();
        assert_eq!(with_gem, 30 + 1 + 2 + 1);
        assert_eq!(rec.calls.last().map(|c| c.0), Some(Sprite::CharBoy));

        for gem in &mut state.collectibles {
            gem.enabled = false;
        }
        let mut rec = Recorder::default();
        render_frame(&state, &mut rec);
        assert_eq!(rec.calls.len(), with_gem - 1);
        assert!(rec.calls.iter().all(|c| !matches!(c.0, Sprite::GemGreen | Sprite::GemOrange)));
    }
}
