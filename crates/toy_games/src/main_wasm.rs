// Bevy's main cannot take arguments in the browser, the game is picked from `?game=`.

use core::str::FromStr;

use wasm_bindgen::prelude::*;
use web_sys::{UrlSearchParams, console};

use crate::game_name::GameName;

fn requested_game() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let search = window.location().search()?;
    UrlSearchParams::new_with_str(&search)?
        .get("game")
        .ok_or_else(|| JsValue::from_str("Missing ?game= parameter"))
}

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    let name = requested_game()?;
    let Ok(game) = GameName::from_str(&name) else {
        return Err(JsValue::from_str(&format!("Invalid game name: {name}")));
    };
    console::log_1(&format!("Starting {game}").into());
    game.run();
    Ok(())
}
