use bevy::prelude::*;

use crate::board::Square;
use crate::core::config::FIELD_SIZE;

const FILES: f32 = 8.0;

pub const BOARD_SIZE: Vec2 = Vec2::splat(FILES * FIELD_SIZE);

/// Centre of a field, board centred on the origin with rank 1 at the bottom.
pub fn square_to_world(square: Square) -> Vec2 {
    let half = BOARD_SIZE / 2.0;
    Vec2::new(
        (square.file as f32 + 0.5).mul_add(FIELD_SIZE, -half.x),
        (square.rank as f32 + 0.5).mul_add(FIELD_SIZE, -half.y),
    )
}

/// Field under a world position, `None` off the board.
pub fn world_to_square(position: Vec2) -> Option<Square> {
    let local = (position + BOARD_SIZE / 2.0) / FIELD_SIZE;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    Square::new(local.x.floor() as u8, local.y.floor() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(file: u8, rank: u8) -> Square {
        Square::new(file, rank).expect("on the board")
    }

    #[test]
    fn a1_is_bottom_left() {
        assert_eq!(square_to_world(square(0, 0)), Vec2::new(-224.0, -224.0), "a1");
        assert_eq!(square_to_world(square(7, 7)), Vec2::new(224.0, 224.0), "h8");
    }

    #[test]
    fn every_centre_maps_back() {
        for square in Square::all() {
            assert_eq!(
                world_to_square(square_to_world(square)),
                Some(square),
                "{square}"
            );
        }
    }

    #[test]
    fn edges_and_outside() {
        assert_eq!(world_to_square(Vec2::new(-256.0, -256.0)), Some(square(0, 0)), "corner");
        assert_eq!(world_to_square(Vec2::new(0.0, 0.0)), Some(square(4, 4)), "centre");
        assert_eq!(world_to_square(Vec2::new(-256.1, 0.0)), None, "left of the board");
        assert_eq!(world_to_square(Vec2::new(0.0, 256.0)), None, "above the board");
        assert_eq!(world_to_square(Vec2::new(300.0, -300.0)), None, "far away");
    }
}
