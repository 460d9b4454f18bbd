use bevy::prelude::*;
use host::Chess;

mod board;
mod core;
mod drag;
mod host;
mod layout;
mod piece;
mod render;

pub use crate::board::{Board, FenError, STARTING_FEN, Square};
pub use crate::core::{ChessState, PieceDropped};
pub use crate::drag::{DragSession, DropOutcome};
pub use crate::layout::{square_to_world, world_to_square};
pub use crate::piece::{FALLBACK_IMAGE, Piece, PieceColor, PieceKind};

/// Board state, drag-and-drop and the drop log. No rendering.
pub struct ChessBoardPlugin;

impl Plugin for ChessBoardPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Board::starting_position())
            .init_state::<ChessState>()
            .configure_sets(
                Update,
                (
                    crate::core::ChessSet::Input,
                    crate::core::ChessSet::Moves,
                    crate::core::ChessSet::Render,
                )
                    .chain(),
            )
            .add_plugins(drag::DragPlugin);
    }
}

pub fn run() {
    toy_helpers::get_default_app::<Chess>(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .add_plugins(ChessBoardPlugin)
        .add_plugins(render::BoardRenderPlugin)
        .run();
}
