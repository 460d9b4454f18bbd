use bevy::log::info;
use bevy::prelude::*;
use toy_helpers::HostMessageHandler;

use crate::board::Board;
use crate::core::{ChessState, PieceSprite};
use crate::drag::{DragSession, resting_transform};

#[derive(Default, Clone, Copy)]
pub struct Chess;

impl HostMessageHandler for Chess {
    fn restart(world: &mut World) {
        info!("Restarting Chess");

        world.resource_mut::<DragSession>().cancel();
        // Replacing the board redraws every piece on its field.
        world.insert_resource(Board::starting_position());

        let mut next_state = world.resource_mut::<NextState<ChessState>>();
        next_state.set(ChessState::Playing);
    }

    fn stop(world: &mut World) {
        info!("Stopping Chess");

        let cancelled = world.resource_mut::<DragSession>().cancel();
        if let Some((entity, from)) = cancelled {
            if let Some(mut transform) = world.get_mut::<Transform>(entity) {
                *transform = resting_transform(from);
            }
        }

        let mut next_state = world.resource_mut::<NextState<ChessState>>();
        next_state.set(ChessState::Stopped);
    }
}
