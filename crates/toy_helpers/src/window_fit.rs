use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// World-space size a game wants fully visible. Games insert it once their board exists.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FitContent {
    pub size: Vec2,
    pub margin: f32,
}

impl FitContent {
    pub const fn new(size: Vec2) -> Self {
        Self { size, margin: 16.0 }
    }
}

/// Camera scale at which `content` fits inside `window` on both axes.
pub fn fit_scale(window: Vec2, content: Vec2) -> f32 {
    if window.x <= 0.0 || window.y <= 0.0 {
        return 1.0;
    }
    (content.x / window.x).max(content.y / window.y)
}

pub struct WindowFitPlugin;

impl Plugin for WindowFitPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, fit_camera_to_content);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(PreUpdate, handle_browser_resize);
        }
    }
}

fn fit_camera_to_content(
    content: Option<Res<FitContent>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut projections: Query<&mut OrthographicProjection, With<Camera2d>>,
) {
    let Some(content) = content else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };

    let padded = content.size + Vec2::splat(content.margin * 2.0);
    let scale = fit_scale(window.size(), padded);
    for mut projection in &mut projections {
        if (projection.scale - scale).abs() > f32::EPSILON {
            projection.scale = scale;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_browser_resize(mut primary_query: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(wasm_window) = web_sys::window() else {
        return;
    };
    let Ok(inner_width) = wasm_window.inner_width() else {
        return;
    };
    let Ok(inner_height) = wasm_window.inner_height() else {
        return;
    };
    let Some(target_width) = inner_width.as_f64() else {
        return;
    };
    let Some(target_height) = inner_height.as_f64() else {
        return;
    };

    // wgpu rejects surfaces larger than the max texture extent
    const MAX_EXTENT: f32 = 2048.0;

    let target = Vec2::new(target_width as f32, target_height as f32).min(Vec2::splat(MAX_EXTENT));

    for mut window in &mut primary_query {
        if (window.resolution.width() - target.x).abs() > f32::EPSILON
            || (window.resolution.height() - target.y).abs() > f32::EPSILON
        {
            window.resolution.set(target.x, target.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_content_is_limited_by_width() {
        let scale = fit_scale(Vec2::new(400.0, 400.0), Vec2::new(800.0, 200.0));
        assert!((scale - 2.0).abs() < f32::EPSILON, "needs to zoom out twice");
    }

    #[test]
    fn small_content_zooms_in() {
        let scale = fit_scale(Vec2::new(800.0, 600.0), Vec2::new(400.0, 150.0));
        assert!((scale - 0.5).abs() < f32::EPSILON, "width ratio dominates");
    }

    #[test]
    fn minimised_window_keeps_unit_scale() {
        assert!(
            (fit_scale(Vec2::ZERO, Vec2::new(10.0, 10.0)) - 1.0).abs() < f32::EPSILON,
            "zero sized window"
        );
    }
}
