use bevy::log::info;
use bevy::prelude::*;
use toy_helpers::{GameMessage, HostMessageHandler, send_game_message};

use crate::core::{AppleEaten, SnakeReset, SnakeState, StepTimer};
use crate::game::SnakeGame;

#[derive(Default, Clone, Copy)]
pub struct Snake;

impl HostMessageHandler for Snake {
    fn restart(world: &mut World) {
        info!("Restarting Snake");

        let mut game = world.resource_mut::<SnakeGame>();
        game.reset();
        let length = game.length() as u32;
        if let Some(mut timer) = world.get_resource_mut::<StepTimer>() {
            timer.0.reset();
        }
        world.send_event(SnakeReset);
        send_game_message(GameMessage::Score(length));

        let mut next_state = world.resource_mut::<NextState<SnakeState>>();
        next_state.set(SnakeState::Running);
    }

    fn stop(world: &mut World) {
        info!("Stopping Snake");

        let mut next_state = world.resource_mut::<NextState<SnakeState>>();
        next_state.set(SnakeState::Stopped);
    }
}

/// The snake's length is its score.
pub fn report_score(mut eaten: EventReader<AppleEaten>) {
    if let Some(event) = eaten.read().last() {
        send_game_message(GameMessage::Score(event.length as u32));
    }
}
