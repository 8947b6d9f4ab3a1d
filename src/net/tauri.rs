//! [`Bridge`] over the desktop host's injected `window.__TAURI__` API.
//!
//! Values cross the JS boundary as JSON text; rejections carrying a numeric
//! `code` become [`BridgeFailure::Api`], anything else is a transport failure.

use futures::FutureExt;
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use super::bridge::{Bridge, BridgeFailure, BridgeFuture, EventHandler};
use bridge::ApiError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "tauri"], js_name = invoke, catch)]
    async fn tauri_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen, catch)]
    async fn tauri_listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

/// Emitted by the host window when the user asks to close it.
pub const CLOSE_REQUESTED: &str = "tauri://close-requested";

#[derive(Clone, Copy, Debug, Default)]
pub struct TauriBridge;

impl TauriBridge {
    pub fn new() -> Self {
        Self
    }
}

fn to_js(value: &Value) -> Result<JsValue, BridgeFailure> {
    let text = serde_json::to_string(value).map_err(|e| BridgeFailure::Transport(e.to_string()))?;
    js_sys::JSON::parse(&text).map_err(|e| BridgeFailure::Transport(describe(&e)))
}

fn from_js(value: &JsValue) -> Result<Value, BridgeFailure> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = js_sys::JSON::stringify(value)
        .map_err(|e| BridgeFailure::Transport(describe(&e)))?
        .into();
    serde_json::from_str(&text).map_err(|e| BridgeFailure::Transport(e.to_string()))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn rejection(value: &JsValue) -> BridgeFailure {
    match from_js(value) {
        Ok(raw) => match ApiError::from_value(&raw) {
            Some(api) => BridgeFailure::Api(api),
            None => BridgeFailure::Transport(raw.as_str().map_or_else(|| raw.to_string(), str::to_owned)),
        },
        Err(failure) => failure,
    }
}

impl Bridge for TauriBridge {
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<Value> {
        let command = command.to_owned();
        async move {
            let args = to_js(&args)?;
            match tauri_invoke(&command, args).await {
                Ok(value) => from_js(&value),
                Err(err) => Err(rejection(&err)),
            }
        }
        .boxed_local()
    }

    fn listen(&self, channel: &str, handler: EventHandler) -> BridgeFuture<()> {
        let channel = channel.to_owned();
        async move {
            let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                let payload = js_sys::Reflect::get(&event, &JsValue::from_str("payload")).unwrap_or(JsValue::NULL);
                match from_js(&payload) {
                    Ok(value) => handler(value),
                    Err(e) => log::warn!("dropping undecodable event payload: {e}"),
                }
            });
            tauri_listen(&channel, &closure).await.map_err(|e| rejection(&e))?;
            // The host keeps calling it for the lifetime of the window.
            closure.forget();
            Ok(())
        }
        .boxed_local()
    }
}
