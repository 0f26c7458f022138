//! JSON bridge between the UI thread and the lathe engine.

pub mod dispatch;
pub mod messages;
pub mod state;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::{dispatch, process_json};
pub use messages::{EngineToUi, ExportKind, SessionSnapshot, UiToEngine};
pub use state::{AssistantGate, BridgeError, BridgeState};
