mod game_name;

#[cfg(target_arch = "wasm32")]
mod main_wasm;

#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), wasm_bindgen::prelude::JsValue> {
    main_wasm::main_wasm()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use core::str::FromStr;

    use anyhow::Context;
    use strum::IntoEnumIterator;

    let available = || {
        game_name::GameName::iter()
            .map(|game| game.to_string())
            .collect::<Vec<_>>()
            .join("|")
    };
    let name = std::env::args()
        .nth(1)
        .with_context(|| format!("usage: toy_games <{}>", available()))?;
    let game = game_name::GameName::from_str(&name)
        .with_context(|| format!("unknown game {name:?}, expected one of {}", available()))?;

    game.run();
    Ok(())
}
