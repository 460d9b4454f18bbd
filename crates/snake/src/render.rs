use bevy::prelude::*;
use toy_helpers::window_fit::FitContent;

use crate::core::config::{APPLE_COLOR, BODY_COLOR, BORDER_COLOR, BORDER_WIDTH, CELL_SIZE};
use crate::core::{AppleEaten, SnakeAdvanced, SnakeReset, SnakeSet};
use crate::game::SnakeGame;

#[derive(Component)]
struct TrailSegment;

#[derive(Component)]
struct AppleCell;

#[derive(Component)]
struct LengthText;

pub struct BoardRenderPlugin;

impl Plugin for BoardRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board).add_systems(
            Update,
            (sync_cells, update_length_text).in_set(SnakeSet::Render),
        );
    }
}

/// Centre of a grid cell in world space. Row 0 is the top row.
pub fn cell_to_world(cell: IVec2, grid: IVec2, depth: f32) -> Vec3 {
    let board = grid.as_vec2() * CELL_SIZE;
    Vec3::new(
        (cell.x as f32 + 0.5).mul_add(CELL_SIZE, -board.x / 2.0),
        (cell.y as f32 + 0.5).mul_add(-CELL_SIZE, board.y / 2.0),
        depth,
    )
}

fn cell_sprite(color: Color) -> Sprite {
    Sprite::from_color(color, Vec2::splat(CELL_SIZE))
}

fn spawn_board(mut commands: Commands, game: Res<SnakeGame>) {
    commands.spawn(Camera2d);

    let board = game.grid().as_vec2() * CELL_SIZE;
    commands.insert_resource(FitContent::new(board));

    commands
        .spawn((
            Sprite::from_color(BORDER_COLOR, board + Vec2::splat(BORDER_WIDTH * 2.0)),
            Transform::from_xyz(0.0, 0.0, -10.0),
        ))
        .with_child((
            Sprite::from_color(Color::BLACK, board),
            Transform::from_xyz(0.0, 0.0, 1.0),
        ));

    commands.spawn((
        cell_sprite(APPLE_COLOR),
        Transform::from_translation(cell_to_world(game.apple(), game.grid(), 1.0)),
        AppleCell,
    ));

    commands.spawn((
        Text::new(format!("Length: {}", game.length())),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
        LengthText,
    ));
}

/// Re-positions every cell sprite after the game state moved. Only the trail is drawn, so
/// the visible body is as long as the length shown in the text.
fn sync_cells(
    mut commands: Commands,
    mut advanced: EventReader<SnakeAdvanced>,
    mut reset: EventReader<SnakeReset>,
    game: Res<SnakeGame>,
    mut segments: Query<(Entity, &mut Transform), With<TrailSegment>>,
    mut apple: Query<&mut Transform, (With<AppleCell>, Without<TrailSegment>)>,
) {
    let moved = advanced.read().count() > 0;
    let restarted = reset.read().count() > 0;
    if !moved && !restarted {
        return;
    }

    let grid = game.grid();
    let mut trail = game.trail();
    for (entity, mut transform) in &mut segments {
        match trail.next() {
            Some(cell) => transform.translation = cell_to_world(cell, grid, 2.0),
            None => commands.entity(entity).despawn(),
        }
    }
    for cell in trail {
        commands.spawn((
            cell_sprite(BODY_COLOR),
            Transform::from_translation(cell_to_world(cell, grid, 2.0)),
            TrailSegment,
        ));
    }

    if let Ok(mut transform) = apple.get_single_mut() {
        transform.translation = cell_to_world(game.apple(), grid, 1.0);
    }
}

fn update_length_text(
    mut eaten: EventReader<AppleEaten>,
    mut reset: EventReader<SnakeReset>,
    game: Res<SnakeGame>,
    mut texts: Query<&mut Text, With<LengthText>>,
) {
    let grew = eaten.read().count() > 0;
    let restarted = reset.read().count() > 0;
    if !grew && !restarted {
        return;
    }
    for mut text in &mut texts {
        text.0 = format!("Length: {}", game.length());
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::core::SnakeSettings;
    use crate::gameplay::GameplayPlugin;

    #[test]
    fn drawn_body_matches_the_length() {
        let mut game = SnakeGame::with_rng(SnakeSettings::default(), fastrand::Rng::with_seed(5));
        // Out of the way of a snake heading right along row 0.
        game.place_apple(IVec2::new(20, 20));

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(game)
            .add_plugins((GameplayPlugin, BoardRenderPlugin));
        for _ in 0..8 {
            app.update();
        }

        let length = app.world().resource::<SnakeGame>().length();
        let drawn = app
            .world_mut()
            .query_filtered::<(), With<TrailSegment>>()
            .iter(app.world())
            .count();
        assert_eq!(length, 3, "no apple eaten");
        assert_eq!(drawn, length, "one sprite per unit of length");
    }

    #[test]
    fn corners_map_inside_the_board() {
        let grid = IVec2::new(40, 24);
        let top_left = cell_to_world(IVec2::ZERO, grid, 0.0);
        assert_eq!(top_left, Vec3::new(-312.0, 184.0, 0.0), "first cell centre");

        let bottom_right = cell_to_world(IVec2::new(39, 23), grid, 0.0);
        assert_eq!(bottom_right, Vec3::new(312.0, -184.0, 0.0), "last cell centre");
    }

    #[test]
    fn rows_grow_downward() {
        let grid = IVec2::new(40, 24);
        let upper = cell_to_world(IVec2::new(5, 2), grid, 0.0);
        let lower = cell_to_world(IVec2::new(5, 3), grid, 0.0);
        assert!(lower.y < upper.y, "next row is lower on screen");
        assert!((upper.y - lower.y - CELL_SIZE).abs() < f32::EPSILON, "one cell apart");
    }
}
