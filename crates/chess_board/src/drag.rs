use bevy::prelude::*;
use toy_helpers::input::{
    just_pressed_world_position, just_released_world_position, pressed_world_position,
};

use crate::board::{Board, Square};
use crate::core::config::{DRAG_SCALE, DRAGGED_DEPTH, PIECE_DEPTH};
use crate::core::{ChessSet, ChessState, PieceDropped, PieceSprite};
use crate::layout::{square_to_world, world_to_square};
use crate::piece::Piece;

/// The pointer let go of the dragged piece. `at` is `None` off the board or outside the window.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragReleased {
    pub at: Option<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag {
    entity: Entity,
    from: Square,
    piece: Piece,
    hovered: Option<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped(PieceDropped),
    Cancelled,
}

/// At most one piece is carried at a time.
#[derive(Resource, Debug, Default)]
pub struct DragSession {
    active: Option<ActiveDrag>,
}

impl DragSession {
    /// Starts carrying `piece`. Empty fields and a second pick-up are refused.
    pub fn pick_up(&mut self, entity: Entity, from: Square, piece: Piece) -> bool {
        if self.active.is_some() || piece.is_empty() {
            return false;
        }
        self.active = Some(ActiveDrag {
            entity,
            from,
            piece,
            hovered: Some(from),
        });
        true
    }

    pub const fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged(&self) -> Option<Entity> {
        self.active.map(|drag| drag.entity)
    }

    pub fn hovered(&self) -> Option<Square> {
        self.active.and_then(|drag| drag.hovered)
    }

    /// Returns whether the hovered field changed.
    pub fn hover(&mut self, square: Option<Square>) -> bool {
        let Some(drag) = self.active.as_mut() else {
            return false;
        };
        let changed = drag.hovered != square;
        drag.hovered = square;
        changed
    }

    /// Ends the drag. The entity is returned so its sprite can be put back.
    pub fn drop(&mut self, at: Option<Square>) -> Option<(Entity, Square, DropOutcome)> {
        let drag = self.active.take()?;
        let outcome = at.map_or(DropOutcome::Cancelled, |to| {
            DropOutcome::Dropped(PieceDropped {
                piece: drag.piece,
                from: drag.from,
                to,
            })
        });
        Some((drag.entity, drag.from, outcome))
    }

    pub fn cancel(&mut self) -> Option<(Entity, Square)> {
        self.active.take().map(|drag| (drag.entity, drag.from))
    }
}

pub struct DragPlugin;

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragSession>()
            .add_event::<DragReleased>()
            .add_event::<PieceDropped>()
            .add_systems(
                Update,
                (pick_up_piece, drag_piece, release_piece)
                    .chain()
                    .in_set(ChessSet::Input)
                    .run_if(in_state(ChessState::Playing)),
            )
            .add_systems(Update, finish_drag.in_set(ChessSet::Moves))
            .add_systems(Update, log_drop.after(ChessSet::Moves));
    }
}

/// Transform of a sprite resting on its field.
pub fn resting_transform(square: Square) -> Transform {
    Transform::from_translation(square_to_world(square).extend(PIECE_DEPTH))
}

fn pick_up_piece(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<DragSession>,
    mut sprites: Query<(Entity, &PieceSprite, &mut Transform)>,
) {
    let Some(square) = just_pressed_world_position(&mouse, &touches, &windows, &camera)
        .and_then(world_to_square)
    else {
        return;
    };

    for (entity, sprite, mut transform) in &mut sprites {
        if sprite.square != square {
            continue;
        }
        if session.pick_up(entity, square, sprite.piece) {
            debug!("Picked up {:?} on {square}", sprite.piece);
            transform.scale = Vec3::splat(DRAG_SCALE);
            transform.translation.z = DRAGGED_DEPTH;
        }
    }
}

fn drag_piece(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<DragSession>,
    mut transforms: Query<&mut Transform, With<PieceSprite>>,
) {
    let Some(entity) = session.dragged() else {
        return;
    };
    let Some(position) = pressed_world_position(&mouse, &touches, &windows, &camera) else {
        return;
    };

    if let Ok(mut transform) = transforms.get_mut(entity) {
        transform.translation = position.extend(DRAGGED_DEPTH);
    }
    session.hover(world_to_square(position));
}

fn release_piece(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    session: Res<DragSession>,
    mut released: EventWriter<DragReleased>,
) {
    if !session.is_dragging() {
        return;
    }
    if !mouse.just_released(MouseButton::Left) && !touches.any_just_released() {
        return;
    }

    let at = just_released_world_position(&mouse, &touches, &windows, &camera)
        .and_then(world_to_square);
    released.send(DragReleased { at });
}

/// Emits the drop and puts the sprite back on its origin field.
fn finish_drag(
    mut released: EventReader<DragReleased>,
    mut session: ResMut<DragSession>,
    mut dropped: EventWriter<PieceDropped>,
    mut transforms: Query<&mut Transform, With<PieceSprite>>,
) {
    for DragReleased { at } in released.read() {
        let Some((entity, from, outcome)) = session.drop(*at) else {
            continue;
        };
        match outcome {
            DropOutcome::Dropped(event) => {
                dropped.send(event);
            }
            DropOutcome::Cancelled => debug!("Drag from {from} cancelled off the board"),
        }
        if let Ok(mut transform) = transforms.get_mut(entity) {
            *transform = resting_transform(from);
        }
    }
}

fn log_drop(mut dropped: EventReader<PieceDropped>, board: Res<Board>) {
    for event in dropped.read() {
        tracing::info!(
            piece = ?event.piece,
            from = %event.from,
            to = %event.to,
            position = %board.to_fen_placement(),
            "Piece dropped"
        );
    }
}
