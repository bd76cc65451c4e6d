use wasm_bindgen::JsValue;

/// Best effort text for an error thrown by the js side.
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("Unable to retrieve the error: {value:?}"))
}
