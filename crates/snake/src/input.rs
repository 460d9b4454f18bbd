use bevy::prelude::*;
use toy_helpers::input::{
    SwipeTracker, just_pressed_screen_position, just_released_screen_position,
    pressed_screen_position,
};

use crate::core::{SnakeSet, SnakeState};
use crate::game::SnakeGame;
use crate::movement::{Direction, go_down, go_left, go_right, go_up};

/// Keyboard and swipe steering. Listens globally, there is no focus scoping.
pub struct SteeringPlugin;

impl Plugin for SteeringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SwipeTracker>().add_systems(
            Update,
            (keyboard_steering, swipe_steering)
                .in_set(SnakeSet::Input)
                .run_if(in_state(SnakeState::Running)),
        );
    }
}

/// Turn function bound to a key, WASD or arrows.
pub fn turn_for_key(key: KeyCode) -> Option<fn(Direction) -> Direction> {
    let turn: fn(Direction) -> Direction = match key {
        KeyCode::KeyW | KeyCode::ArrowUp => go_up,
        KeyCode::KeyS | KeyCode::ArrowDown => go_down,
        KeyCode::KeyA | KeyCode::ArrowLeft => go_left,
        KeyCode::KeyD | KeyCode::ArrowRight => go_right,
        _ => return None,
    };
    Some(turn)
}

fn keyboard_steering(keyboard: Res<ButtonInput<KeyCode>>, mut game: ResMut<SnakeGame>) {
    for key in keyboard.get_just_pressed() {
        let Some(turn) = turn_for_key(*key) else {
            continue;
        };
        let requested = turn(game.direction());
        if game.steer(requested) {
            debug!("{key:?} turned {requested:?}");
        }
    }
}

fn swipe_steering(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    mut tracker: ResMut<SwipeTracker>,
    mut game: ResMut<SnakeGame>,
) {
    if let Some(position) = just_pressed_screen_position(&mouse, &touches, &windows) {
        tracker.start(position);
        return;
    }

    if tracker.is_tracking() {
        if let Some(swipe) = pressed_screen_position(&mouse, &touches, &windows)
            .and_then(|position| tracker.moved(position))
        {
            let requested = Direction::from(swipe);
            if game.steer(requested) {
                debug!("Swipe turned {requested:?}");
            }
        }
    }

    if just_released_screen_position(&mouse, &touches, &windows).is_some() {
        tracker.cancel();
    }
}
