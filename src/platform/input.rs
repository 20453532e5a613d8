//! Keyboard mapping

use crate::sim::Direction;

/// DOM-style key codes for the arrow keys
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;

/// Map an arrow key code to a direction; anything else is ignored
pub fn direction_for_key(key_code: u32) -> Option<Direction> {
    match key_code {
        KEY_LEFT => Some(Direction::Left),
        KEY_UP => Some(Direction::Up),
        KEY_RIGHT => Some(Direction::Right),
        KEY_DOWN => Some(Direction::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(direction_for_key(37), Some(Direction::Left));
        assert_eq!(direction_for_key(38), Some(Direction::Up));
        assert_eq!(direction_for_key(39), Some(Direction::Right));
        assert_eq!(direction_for_key(40), Some(Direction::Down));
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        assert_eq!(direction_for_key(32), None);
        assert_eq!(direction_for_key(0), None);
        assert_eq!(direction_for_key(41), None);
    }
}
