use bevy::prelude::*;
use host::Snake;

mod core;
mod game;
mod gameplay;
mod host;
mod input;
mod movement;
mod render;

pub use crate::core::{AppleEaten, SnakeAdvanced, SnakeReset, SnakeSettings, SnakeState};
pub use crate::game::{SnakeGame, Step, wrap};
pub use crate::movement::{Direction, go_down, go_left, go_right, go_up};

pub fn run() {
    toy_helpers::get_default_app::<Snake>(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .add_plugins(gameplay::GameplayPlugin)
        .add_plugins(input::SteeringPlugin)
        .add_plugins(render::BoardRenderPlugin)
        .add_systems(Update, host::report_score.after(crate::core::SnakeSet::Advance))
        .run();
}
