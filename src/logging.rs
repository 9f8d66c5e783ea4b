//! Browser log sink.
//!
//! The crate logs through `tracing`; with its `log` feature and no subscriber
//! installed, events are forwarded to the `log` facade, which `console_log`
//! writes to the devtools console.

use wasm_bindgen::prelude::*;

/// Install the console logger at `info` and the panic hook.
///
/// Safe to call more than once; later calls keep the first logger.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    init(log::Level::Info);
}

/// Install the console logger at `level` and the panic hook.
pub fn init(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(level) {
        tracing::debug!(error = %err, "console logger already installed");
    }
}
