use bevy::prelude::*;

use crate::board::Square;
use crate::piece::Piece;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum ChessState {
    #[default]
    Playing,
    Stopped,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChessSet {
    Input,
    Moves,
    Render,
}

/// A piece was released over a field. Board state is left untouched; move handling hooks in
/// here.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDropped {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

/// Sprite of a board field. Fields without a piece carry the fallback image.
#[derive(Component, Debug, Clone, Copy)]
pub struct PieceSprite {
    pub square: Square,
    pub piece: Piece,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Field(pub Square);

#[derive(Component)]
pub struct HoverHighlight;

pub mod config {
    use bevy::prelude::*;

    pub const FIELD_SIZE: f32 = 64.0;
    pub const DRAG_SCALE: f32 = 0.9;

    pub const PIECE_DEPTH: f32 = 2.0;
    pub const DRAGGED_DEPTH: f32 = 5.0;
    pub const HIGHLIGHT_DEPTH: f32 = 1.0;

    pub const LIGHT_FIELD: Color = Color::srgb(0.886, 0.910, 0.941); // slate-200
    pub const DARK_FIELD: Color = Color::srgb(0.118, 0.227, 0.541); // blue-900
    pub const HIGHLIGHT_COLOR: Color = Color::srgba(0.984, 0.749, 0.141, 0.45); // amber-400
    pub const WHITE_LETTER: Color = Color::WHITE;
    pub const BLACK_LETTER: Color = Color::BLACK;
}
