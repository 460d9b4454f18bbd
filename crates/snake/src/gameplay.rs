use bevy::prelude::*;

use crate::core::{
    AppleEaten, SnakeAdvanced, SnakeReset, SnakeSet, SnakeSettings, SnakeState, StepTimer,
};
use crate::game::SnakeGame;

/// Game state, the fixed-period loop and its events. No rendering or input.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnakeSettings>();
        if !app.world().contains_resource::<SnakeGame>() {
            let settings = *app.world().resource::<SnakeSettings>();
            app.insert_resource(SnakeGame::new(settings));
        }

        app.init_state::<SnakeState>()
            .add_event::<SnakeAdvanced>()
            .add_event::<AppleEaten>()
            .add_event::<SnakeReset>()
            .configure_sets(
                Update,
                (SnakeSet::Input, SnakeSet::Advance, SnakeSet::Render).chain(),
            )
            .add_systems(OnEnter(SnakeState::Running), start_loop)
            .add_systems(OnExit(SnakeState::Running), stop_loop)
            .add_systems(
                Update,
                advance_snake
                    .in_set(SnakeSet::Advance)
                    .run_if(in_state(SnakeState::Running)),
            );
    }
}

fn start_loop(mut commands: Commands, settings: Res<SnakeSettings>) {
    info!("Snake loop started, one step every {:?}", settings.step_period);
    commands.insert_resource(StepTimer(Timer::new(
        settings.step_period,
        TimerMode::Repeating,
    )));
}

fn stop_loop(mut commands: Commands, game: Res<SnakeGame>) {
    info!(
        "Snake loop stopped after {} steps at length {}",
        game.steps(),
        game.length()
    );
    commands.remove_resource::<StepTimer>();
}

fn advance_snake(
    time: Res<Time>,
    timer: Option<ResMut<StepTimer>>,
    mut game: ResMut<SnakeGame>,
    mut advanced: EventWriter<SnakeAdvanced>,
    mut eaten: EventWriter<AppleEaten>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    timer.0.tick(time.delta());

    for _ in 0..timer.0.times_finished_this_tick() {
        let step = game.step();
        debug!(
            "Snake at {} trail {:?}",
            step.head,
            game.trail().collect::<Vec<_>>()
        );

        if step.ate_apple {
            info!(
                "Apple eaten, length {} trail {:?}",
                game.length(),
                game.trail().collect::<Vec<_>>()
            );
            eaten.send(AppleEaten {
                length: game.length(),
                apple: game.apple(),
            });
        }
        advanced.send(SnakeAdvanced { head: step.head });
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use bevy::input::touch::{TouchInput, TouchPhase, Touches, touch_screen_input_system};
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::input::SteeringPlugin;
    use crate::movement::Direction;

    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(SnakeGame::with_rng(
                SnakeSettings::default(),
                fastrand::Rng::with_seed(3),
            ))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .add_plugins((GameplayPlugin, SteeringPlugin));
        app
    }

    #[test]
    fn loop_advances_with_time() {
        let mut app = headless_app();
        for _ in 0..6 {
            app.update();
        }

        let game = app.world().resource::<SnakeGame>();
        assert!(
            (3..=6).contains(&game.steps()),
            "about one step per 100ms frame, got {}",
            game.steps()
        );
        assert!(app.world().contains_resource::<StepTimer>(), "loop is running");
    }

    #[test]
    fn leaving_the_running_state_cancels_the_loop() {
        let mut app = headless_app();
        app.update();
        app.update();

        app.world_mut()
            .resource_mut::<NextState<SnakeState>>()
            .set(SnakeState::Stopped);
        app.update();
        assert!(!app.world().contains_resource::<StepTimer>(), "timer removed");

        let steps = app.world().resource::<SnakeGame>().steps();
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(
            app.world().resource::<SnakeGame>().steps(),
            steps,
            "no steps once stopped"
        );
    }

    #[test]
    fn keyboard_turns_the_snake() {
        let mut app = headless_app();
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyS);
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().direction(),
            Direction::Down,
            "S turns down"
        );

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release_all();
        keys.clear();
        keys.press(KeyCode::ArrowUp);
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().direction(),
            Direction::Down,
            "reversing up is rejected"
        );
    }

    fn touch(app: &mut App, phase: TouchPhase, position: Vec2) {
        app.world_mut().send_event(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id: 0,
        });
    }

    #[test]
    fn swipe_turns_once_per_gesture() {
        let mut app = headless_app();
        app.add_event::<TouchInput>()
            .add_systems(PreUpdate, touch_screen_input_system);
        app.update();

        touch(&mut app, TouchPhase::Started, Vec2::new(100.0, 100.0));
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().direction(),
            Direction::Right,
            "pressing alone does not steer"
        );

        touch(&mut app, TouchPhase::Moved, Vec2::new(105.0, 160.0));
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().direction(),
            Direction::Down,
            "downward swipe turns down"
        );

        touch(&mut app, TouchPhase::Moved, Vec2::new(20.0, 165.0));
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().direction(),
            Direction::Down,
            "second move of the same gesture is ignored"
        );

        touch(&mut app, TouchPhase::Ended, Vec2::new(20.0, 165.0));
        app.update();
        touch(&mut app, TouchPhase::Started, Vec2::new(200.0, 100.0));
        app.update();
        touch(&mut app, TouchPhase::Moved, Vec2::new(120.0, 110.0));
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().direction(),
            Direction::Left,
            "a new gesture steers again"
        );
    }
}
