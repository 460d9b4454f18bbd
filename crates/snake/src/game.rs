use std::collections::VecDeque;

use bevy::prelude::*;

use crate::core::SnakeSettings;
use crate::movement::Direction;

/// Wraps a cell onto the toroidal grid, negative coordinates included.
pub const fn wrap(cell: IVec2, grid: IVec2) -> IVec2 {
    IVec2::new(cell.x.rem_euclid(grid.x), cell.y.rem_euclid(grid.y))
}

fn random_cell(rng: &mut fastrand::Rng, grid: IVec2) -> IVec2 {
    IVec2::new(rng.i32(0..grid.x), rng.i32(0..grid.y))
}

/// Outcome of a single step of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub head: IVec2,
    pub ate_apple: bool,
}

/// Everything the snake game knows. Systems and the renderer read it as a resource.
#[derive(Resource, Debug, Clone)]
pub struct SnakeGame {
    settings: SnakeSettings,
    head: IVec2,
    direction: Direction,
    apple: IVec2,
    trail: VecDeque<IVec2>,
    length: usize,
    steps: u64,
    rng: fastrand::Rng,
}

impl SnakeGame {
    pub fn new(settings: SnakeSettings) -> Self {
        Self::with_rng(settings, fastrand::Rng::new())
    }

    pub fn with_rng(settings: SnakeSettings, mut rng: fastrand::Rng) -> Self {
        let apple = random_cell(&mut rng, settings.grid);
        Self {
            settings,
            head: IVec2::ZERO,
            direction: Direction::Right,
            apple,
            trail: VecDeque::with_capacity(settings.initial_length + 1),
            length: settings.initial_length,
            steps: 0,
            rng,
        }
    }

    pub fn reset(&mut self) {
        let rng = core::mem::replace(&mut self.rng, fastrand::Rng::with_seed(0));
        *self = Self::with_rng(self.settings, rng);
    }

    pub const fn grid(&self) -> IVec2 {
        self.settings.grid
    }

    pub const fn head(&self) -> IVec2 {
        self.head
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn apple(&self) -> IVec2 {
        self.apple
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Cells behind the head, oldest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = IVec2> + '_ {
        self.trail.iter().copied()
    }

    /// Applies a turn request. Returns whether the heading changed.
    pub fn steer(&mut self, requested: Direction) -> bool {
        let turned = self.direction.turned(requested);
        let changed = turned != self.direction;
        self.direction = turned;
        changed
    }

    #[cfg(test)]
    pub(crate) fn place_apple(&mut self, cell: IVec2) {
        self.apple = cell;
    }

    /// Advances the snake by one cell.
    ///
    /// The apple check runs before the trail update, which runs before the head moves, so
    /// eating grows the trail bound in the same step.
    pub fn step(&mut self) -> Step {
        let next = wrap(self.head + self.direction.as_ivec2(), self.settings.grid);

        let ate_apple = next == self.apple;
        if ate_apple {
            self.length += 1;
            // May land under the body.
            self.apple = random_cell(&mut self.rng, self.settings.grid);
        }

        while !self.trail.is_empty() && self.trail.len() >= self.length {
            self.trail.pop_front();
        }
        if self.length > 0 {
            self.trail.push_back(self.head);
        }

        self.head = next;
        self.steps += 1;

        Step {
            head: next,
            ate_apple,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::movement::{go_down, go_left, go_up};

    fn seeded_game() -> SnakeGame {
        SnakeGame::with_rng(SnakeSettings::default(), fastrand::Rng::with_seed(7))
    }

    #[test]
    fn starts_top_left_heading_right() {
        let game = seeded_game();
        assert_eq!(game.head(), IVec2::ZERO, "head starts at the origin");
        assert_eq!(game.direction(), Direction::Right, "heading right");
        assert_eq!(game.length(), 3, "initial length");
        assert_eq!(game.trail().len(), 0, "no trail yet");
        let apple = game.apple();
        assert!(
            (0..40).contains(&apple.x) && (0..24).contains(&apple.y),
            "apple {apple} on the grid"
        );
    }

    #[test]
    fn wraps_past_every_edge() {
        let grid = IVec2::new(40, 24);
        assert_eq!(wrap(IVec2::new(40, 3), grid), IVec2::new(0, 3), "right edge");
        assert_eq!(wrap(IVec2::new(-1, 3), grid), IVec2::new(39, 3), "left edge");
        assert_eq!(wrap(IVec2::new(5, 24), grid), IVec2::new(5, 0), "bottom edge");
        assert_eq!(wrap(IVec2::new(5, -1), grid), IVec2::new(5, 23), "top edge");
    }

    #[test]
    fn moving_up_from_the_top_row_wraps_to_the_bottom() {
        let mut game = seeded_game();
        game.place_apple(IVec2::new(20, 20));
        game.steer(Direction::Up);
        let step = game.step();
        assert_eq!(step.head, IVec2::new(0, 23), "wrapped to the last row");
        assert!(!step.ate_apple, "apple is elsewhere");
    }

    #[test]
    fn trail_is_bounded_by_length() {
        let mut game = seeded_game();
        game.place_apple(IVec2::new(30, 20));
        for _ in 0..10 {
            game.step();
            assert!(game.trail().len() <= game.length(), "trail within bound");
        }
        assert_eq!(game.trail().len(), 3, "trail filled up to the length");
        assert_eq!(
            game.trail().collect::<Vec<_>>(),
            vec![IVec2::new(7, 0), IVec2::new(8, 0), IVec2::new(9, 0)],
            "oldest cells were dropped"
        );
    }

    #[test]
    fn eating_grows_by_exactly_one() {
        let mut game = seeded_game();
        game.place_apple(IVec2::new(30, 20));
        for _ in 0..5 {
            game.step();
        }
        assert_eq!(game.head(), IVec2::new(5, 0), "moved five cells");
        game.place_apple(IVec2::new(6, 0));

        let step = game.step();
        assert!(step.ate_apple, "head landed on the apple");
        assert_eq!(game.length(), 4, "grew by one");
        assert_eq!(game.trail().len(), 4, "the bound grew in the same step");

        game.place_apple(IVec2::new(30, 20));
        for _ in 0..5 {
            game.step();
            assert_eq!(game.trail().len(), 4, "trail stays at the new bound");
        }
    }

    #[test]
    fn apple_is_relocated_after_being_eaten() {
        let mut game = seeded_game();
        game.place_apple(IVec2::new(1, 0));
        let step = game.step();
        assert!(step.ate_apple, "ate");
        let apple = game.apple();
        assert!(
            (0..40).contains(&apple.x) && (0..24).contains(&apple.y),
            "new apple {apple} on the grid"
        );
    }

    #[test]
    fn steer_reports_changes() {
        let mut game = seeded_game();
        assert!(game.steer(go_down(game.direction())), "right to down");
        assert!(!game.steer(go_up(game.direction())), "down to up is rejected");
        assert!(game.steer(go_left(game.direction())), "down to left");
        assert_eq!(game.direction(), Direction::Left, "ends heading left");
    }

    #[test]
    fn reset_restores_the_start() {
        let mut game = seeded_game();
        game.steer(Direction::Down);
        for _ in 0..4 {
            game.step();
        }
        game.reset();
        assert_eq!(game.head(), IVec2::ZERO, "head back at the origin");
        assert_eq!(game.direction(), Direction::Right, "heading reset");
        assert_eq!(game.trail().len(), 0, "trail cleared");
        assert_eq!(game.steps(), 0, "step counter cleared");
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn head_stays_on_the_grid(
            seed in any::<u64>(),
            turns in proptest::collection::vec(direction(), 1..200),
        ) {
            let mut game = SnakeGame::with_rng(SnakeSettings::default(), fastrand::Rng::with_seed(seed));
            for turn in turns {
                let length_before = game.length();
                game.steer(turn);
                let step = game.step();
                prop_assert!((0..40).contains(&step.head.x));
                prop_assert!((0..24).contains(&step.head.y));
                prop_assert!(game.trail().len() <= game.length());
                let expected = length_before + usize::from(step.ate_apple);
                prop_assert_eq!(game.length(), expected);
            }
        }

        #[test]
        fn wrap_lands_on_the_grid(x in -1000i32..1000, y in -1000i32..1000) {
            let cell = wrap(IVec2::new(x, y), IVec2::new(40, 24));
            prop_assert!((0..40).contains(&cell.x));
            prop_assert!((0..24).contains(&cell.y));
        }
    }
}
