// Small helpers shared by the model and the components

/// Logs to the browser console. Native builds (tests) drop the message.
pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

/// Heart string for the HUD, filled first.
pub fn format_hearts(filled: u32, empty: u32) -> String {
    let mut s = String::with_capacity(filled.saturating_add(empty) as usize * '♥'.len_utf8());
    for _ in 0..filled {
        s.push('♥');
    }
    for _ in 0..empty {
        s.push('♡');
    }
    s
}

/// Remaining time as whole seconds, rounded up, e.g. "2s".
pub fn format_remaining(ms: f64) -> String {
    format!("{}s", (ms.max(0.0) / 1000.0).ceil() as u64)
}
