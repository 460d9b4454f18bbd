use bevy::prelude::*;

pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

pub fn pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input.iter().next().map(|touch| touch.position())
    }
}

pub fn just_released_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_released(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else if touch_input.any_just_released() {
        let touch = touch_input.iter_just_released().next()?;
        Some(touch.position())
    } else {
        None
    }
}

pub fn screen_to_world(
    position: Vec2,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;
    screen_to_world(position, camera)
}

pub fn pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = pressed_screen_position(button_input, touch_input, windows)?;
    screen_to_world(position, camera)
}

pub fn just_released_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_released_screen_position(button_input, touch_input, windows)?;
    screen_to_world(position, camera)
}

/// Direction of a resolved swipe, in screen terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swipe {
    Up,
    Down,
    Left,
    Right,
}

/// Picks the swipe for a pointer displacement in screen coordinates (y grows downward).
///
/// The axis with the larger absolute delta wins, a tie goes to the vertical axis.
/// Returns `None` for a zero displacement.
pub fn resolve_swipe(start: Vec2, end: Vec2) -> Option<Swipe> {
    let delta = end - start;
    if delta == Vec2::ZERO {
        return None;
    }

    let swipe = if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 { Swipe::Right } else { Swipe::Left }
    } else if delta.y > 0.0 {
        Swipe::Down
    } else {
        Swipe::Up
    };
    Some(swipe)
}

/// Remembers where a touch went down until the next move resolves it into a swipe.
#[derive(Resource, Debug, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn start(&mut self, position: Vec2) {
        self.start = Some(position);
    }

    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Resolves the move against the stored start. The start is cleared once a swipe is
    /// produced, so one gesture turns at most once.
    pub fn moved(&mut self, position: Vec2) -> Option<Swipe> {
        let start = self.start?;
        let swipe = resolve_swipe(start, position)?;
        self.start = None;
        Some(swipe)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}
