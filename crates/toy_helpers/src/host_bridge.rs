use std::sync::{Arc, LazyLock};

use bevy::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

/// Messages the embedding page sends to a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    Restart,
    Stop,
}

/// Messages a game posts back to the embedding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum GameMessage {
    Ready,
    Score(u32),
    Stopped,
}

pub static HOST_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<HostMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

/// Without a host page nothing reads the outgoing messages, only the newest ones are kept.
#[cfg(not(target_arch = "wasm32"))]
pub const GAME_MESSAGE_BACKLOG: usize = 64;

#[cfg(not(target_arch = "wasm32"))]
pub static GAME_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<GameMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(target_arch = "wasm32")]
pub fn listen_host_messages() {
    let Some(window) = web_sys::window() else {
        error!("No global `window`, host messages disabled");
        return;
    };
    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let message: Result<HostMessage, serde_wasm_bindgen::Error> =
            serde_wasm_bindgen::from_value(event.data());

        let Ok(message) = message else {
            // The page also receives messages that are not meant for us.
            debug!("Ignoring message {:?}", &event.data());
            return;
        };

        HOST_MESSAGE_QUEUE.lock().push(message);
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Err(err) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Could not listen to host messages. {err:?}");
        return;
    }

    // The listener lives as long as the page.
    closure.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_game_message(message: GameMessage) {
    debug!("Game message {message:?}");
    let mut queue = GAME_MESSAGE_QUEUE.lock();
    if queue.len() >= GAME_MESSAGE_BACKLOG {
        queue.remove(0);
    }
    queue.push(message);
}

#[cfg(target_arch = "wasm32")]
pub fn send_game_message(message: GameMessage) {
    let Some(window) = web_sys::window() else {
        error!("{message:?} not sent, no global `window`.");
        return;
    };
    let Ok(value) = serde_wasm_bindgen::to_value(&message) else {
        error!("Could not serialize {message:?}");
        return;
    };

    // Running standalone, not inside an iframe.
    let Ok(Some(parent_window)) = window.parent() else {
        debug!("{message:?} not sent, no parent window.");
        return;
    };

    if let Err(err) = parent_window.post_message(&value, "*") {
        error!("Could not post message {value:?}. {err:?}");
    };
}

/// Game specific reactions to host messages.
///
/// Implementations get exclusive world access and are run from `PostUpdate`, after the
/// frame's gameplay systems.
pub trait HostMessageHandler: Send + Sync + Default + 'static {
    fn restart(world: &mut World);
    fn stop(world: &mut World);
}

fn process_host_messages<T: HostMessageHandler>(world: &mut World) {
    let messages = HOST_MESSAGE_QUEUE.lock().drain(..).collect::<Vec<_>>();

    for message in messages {
        info!("Host message {message:?}");
        match message {
            HostMessage::Restart => T::restart(world),
            HostMessage::Stop => {
                T::stop(world);
                send_game_message(GameMessage::Stopped);
            }
        }
    }
}

fn ready() {
    send_game_message(GameMessage::Ready);
}

#[derive(Default)]
pub struct HostBridgePlugin<T: HostMessageHandler>(core::marker::PhantomData<T>);

impl<T: HostMessageHandler> Plugin for HostBridgePlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, process_host_messages::<T>);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, listen_host_messages);
        }
        app.add_systems(PostStartup, ready);
    }
}
