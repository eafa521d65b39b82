//! JavaScript snippets injected into the search page.
//!
//! Every snippet returns a `{ success: bool }`-shaped object so callers can
//! tell "element missing" apart from "evaluation failed". Selectors and query
//! text are sanitized before injection so they can never break out of the JS
//! string literal context.

/// Clear any pre-existing value in the search input.
pub fn clear_input(selector: &str) -> String {
    format!(
        r#"(() => {{
            const el = document.querySelector('{}');
            if (!el) return {{ success: false }};
            el.value = '';
            return {{ success: true }};
        }})()"#,
        sanitize_js_string(selector)
    )
}

/// Set the input's value through the framework's native setter and dispatch
/// the full `input`/`change`/`keydown`/`keyup` volley.
///
/// Simulated typing alone does not reliably update a framework-controlled
/// input's reactive state; the portal's search button stays disabled until
/// these events fire against the native value setter.
pub fn sync_input_events(selector: &str, value: &str) -> String {
    format!(
        r#"(() => {{
            const el = document.querySelector('{}');
            if (!el) return {{ success: false }};
            const setter = Object.getOwnPropertyDescriptor(
                window.HTMLInputElement.prototype, 'value').set;
            setter.call(el, '{}');
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            el.dispatchEvent(new KeyboardEvent('keydown', {{ bubbles: true }}));
            el.dispatchEvent(new KeyboardEvent('keyup', {{ bubbles: true }}));
            return {{ success: true }};
        }})()"#,
        sanitize_js_string(selector),
        sanitize_js_string(value)
    )
}

/// Probe the search button: does it exist, and has its disabled state cleared?
pub fn button_state(selector: &str) -> String {
    format!(
        r#"(() => {{
            const btn = document.querySelector('{}');
            if (!btn) return {{ found: false, enabled: false }};
            return {{ found: true, enabled: !btn.disabled }};
        }})()"#,
        sanitize_js_string(selector)
    )
}

/// Click the search button.
pub fn click_button(selector: &str) -> String {
    format!(
        r#"(() => {{
            const btn = document.querySelector('{}');
            if (!btn) return {{ success: false }};
            btn.click();
            return {{ success: true }};
        }})()"#,
        sanitize_js_string(selector)
    )
}

/// Dispatch an Enter keypress on the input — the fallback trigger when the
/// search button never enables.
pub fn press_enter(selector: &str) -> String {
    format!(
        r#"(() => {{
            const el = document.querySelector('{}');
            if (!el) return {{ success: false }};
            const opts = {{ key: 'Enter', code: 'Enter', keyCode: 13, bubbles: true }};
            el.dispatchEvent(new KeyboardEvent('keydown', opts));
            el.dispatchEvent(new KeyboardEvent('keyup', opts));
            if (el.form) el.form.requestSubmit();
            return {{ success: true }};
        }})()"#,
        sanitize_js_string(selector)
    )
}

/// Sanitize a string for safe injection into a JavaScript string literal.
///
/// Escapes all characters that could break out of a JS string context:
/// backslashes, quotes, backticks, newlines, script tags, null bytes.
pub fn sanitize_js_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '"' => result.push_str("\\\""),
            '`' => result.push_str("\\`"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\0' => {}
            '<' => result.push_str("\\x3c"),
            '>' => result.push_str("\\x3e"),
            _ => result.push(ch),
        }
    }
    result
}

/// Read the `success` flag out of a snippet's result object.
pub fn succeeded(result: &serde_json::Value) -> bool {
    result
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
