//! WASM entry points for the web worker.
//!
//! Only compiled for `wasm32`. The worker calls `init` once, then feeds every
//! UI message through `process_message`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::dispatch::{process_json, to_json};
use crate::messages::{EngineToUi, SessionSnapshot};
use crate::state::BridgeState;

// Single-threaded in the web worker.
thread_local! {
    static BRIDGE_STATE: RefCell<Option<BridgeState>> = RefCell::new(None);
}

fn not_initialized() -> String {
    to_json(&EngineToUi::Error {
        message: "Engine not initialized. Call init() first.".to_string(),
    })
}

/// Initialize the engine. Calling it again starts a fresh session.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    BRIDGE_STATE.with(|cell| {
        *cell.borrow_mut() = Some(BridgeState::new());
    });
}

/// Process a JSON-serialized `UiToEngine` message and return the
/// JSON-serialized `EngineToUi` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    BRIDGE_STATE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(state) => process_json(state, json_input),
        None => not_initialized(),
    })
}

/// Current session state as JSON, without sending a command.
#[wasm_bindgen]
pub fn get_state() -> String {
    BRIDGE_STATE.with(|cell| match cell.borrow().as_ref() {
        Some(state) => to_json(&EngineToUi::StateUpdated {
            state: SessionSnapshot::of(&state.session),
        }),
        None => not_initialized(),
    })
}
