use core::time::Duration;

use bevy::prelude::*;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum SnakeState {
    #[default]
    Running,
    Stopped,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnakeSet {
    Input,
    Advance,
    Render,
}

/// Sent after every step of the game loop.
#[derive(Event, Debug, Clone, Copy)]
pub struct SnakeAdvanced {
    pub head: IVec2,
}

/// Sent when the head lands on the apple. `apple` is the new apple cell.
#[derive(Event, Debug, Clone, Copy)]
pub struct AppleEaten {
    pub length: usize,
    pub apple: IVec2,
}

/// Sent when the game was put back into its initial state.
#[derive(Event, Debug, Clone, Copy)]
pub struct SnakeReset;

/// Drives the game loop. Only present while the game is running.
#[derive(Resource)]
pub struct StepTimer(pub Timer);

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SnakeSettings {
    pub grid: IVec2,
    pub step_period: Duration,
    pub initial_length: usize,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid: IVec2::new(config::GRID_WIDTH, config::GRID_HEIGHT),
            step_period: config::STEP_PERIOD,
            initial_length: config::INITIAL_LENGTH,
        }
    }
}

pub mod config {
    use core::time::Duration;

    use bevy::prelude::*;

    pub const GRID_WIDTH: i32 = 40;
    pub const GRID_HEIGHT: i32 = 24;
    pub const STEP_PERIOD: Duration = Duration::from_millis(100);
    pub const INITIAL_LENGTH: usize = 3;

    pub const CELL_SIZE: f32 = 16.0; // 1rem
    pub const BORDER_WIDTH: f32 = 1.0;

    pub const BODY_COLOR: Color = Color::srgb(0.231, 0.510, 0.965); // blue-500
    pub const APPLE_COLOR: Color = Color::srgb(0.133, 0.773, 0.369); // green-500
    pub const BORDER_COLOR: Color = Color::srgb(0.086, 0.639, 0.290); // green-600
}
