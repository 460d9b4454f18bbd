use bevy::prelude::*;
use strum::EnumIter;
use toy_helpers::input::Swipe;

/// Heading of the snake on the grid. Rows grow downward, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const fn as_ivec2(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The heading after asking for `requested`. A full reversal is ignored.
    pub const fn turned(self, requested: Self) -> Self {
        if requested as u8 == self.opposite() as u8 {
            self
        } else {
            requested
        }
    }
}

impl From<Swipe> for Direction {
    fn from(swipe: Swipe) -> Self {
        match swipe {
            Swipe::Up => Self::Up,
            Swipe::Down => Self::Down,
            Swipe::Left => Self::Left,
            Swipe::Right => Self::Right,
        }
    }
}

pub const fn go_up(current: Direction) -> Direction {
    current.turned(Direction::Up)
}

pub const fn go_down(current: Direction) -> Direction {
    current.turned(Direction::Down)
}

pub const fn go_left(current: Direction) -> Direction {
    current.turned(Direction::Left)
}

pub const fn go_right(current: Direction) -> Direction {
    current.turned(Direction::Right)
}
