use bevy::prelude::*;
use toy_helpers::window_fit::FitContent;

use crate::board::{Board, Square};
use crate::core::config::{
    BLACK_LETTER, DARK_FIELD, FIELD_SIZE, HIGHLIGHT_COLOR, HIGHLIGHT_DEPTH, LIGHT_FIELD,
    WHITE_LETTER,
};
use crate::core::{ChessSet, Field, HoverHighlight, PieceSprite};
use crate::drag::{DragSession, resting_transform};
use crate::layout::{BOARD_SIZE, square_to_world};
use crate::piece::{FALLBACK_IMAGE, Piece, PieceColor};

pub struct BoardRenderPlugin;

impl Plugin for BoardRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board).add_systems(
            Update,
            (spawn_pieces, follow_hover).in_set(ChessSet::Render),
        );
    }
}

/// Image to load for a field. Bevy decodes no SVG, so the PNG sibling is requested.
pub fn sprite_image_path(piece: Piece) -> String {
    let path = piece
        .image_path()
        .unwrap_or_else(|| FALLBACK_IMAGE.to_owned());
    match path.strip_suffix(".svg") {
        Some(stem) => format!("{stem}.png"),
        None => path,
    }
}

fn field_color(square: Square) -> Color {
    if square.is_light() {
        LIGHT_FIELD
    } else {
        DARK_FIELD
    }
}

fn spawn_board(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.insert_resource(FitContent::new(BOARD_SIZE));

    for square in Square::all() {
        commands.spawn((
            Sprite::from_color(field_color(square), Vec2::splat(FIELD_SIZE)),
            Transform::from_translation(square_to_world(square).extend(0.0)),
            Field(square),
        ));
    }

    commands.spawn((
        Sprite::from_color(HIGHLIGHT_COLOR, Vec2::splat(FIELD_SIZE)),
        Transform::from_xyz(0.0, 0.0, HIGHLIGHT_DEPTH),
        Visibility::Hidden,
        HoverHighlight,
    ));
}

/// Rebuilds the piece sprites whenever the board resource changes.
fn spawn_pieces(
    mut commands: Commands,
    board: Res<Board>,
    asset_server: Res<AssetServer>,
    sprites: Query<Entity, With<PieceSprite>>,
) {
    if !board.is_changed() {
        return;
    }
    info!("Drawing position {}", board.to_fen_placement());

    for entity in &sprites {
        commands.entity(entity).despawn_recursive();
    }

    for (square, piece) in board.pieces() {
        let mut sprite = commands.spawn((
            Sprite {
                image: asset_server.load(sprite_image_path(piece)),
                custom_size: Some(Vec2::splat(FIELD_SIZE)),
                ..default()
            },
            resting_transform(square),
            PieceSprite { square, piece },
        ));

        if let Some(letter) = piece.fen_char() {
            let color = match piece.color() {
                Some(PieceColor::Black) => BLACK_LETTER,
                _ => WHITE_LETTER,
            };
            sprite.with_child((
                Text2d::new(letter.to_string()),
                TextFont {
                    font_size: FIELD_SIZE * 0.6,
                    ..default()
                },
                TextColor(color),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        }
    }
}

fn follow_hover(
    session: Res<DragSession>,
    mut highlight: Query<(&mut Transform, &mut Visibility), With<HoverHighlight>>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok((mut transform, mut visibility)) = highlight.get_single_mut() else {
        return;
    };

    match session.hovered() {
        Some(square) => {
            transform.translation = square_to_world(square).extend(HIGHLIGHT_DEPTH);
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}
