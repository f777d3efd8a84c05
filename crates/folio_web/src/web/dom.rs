use folio::config::FolioConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::ui_model::CONFIG_ATTRIBUTE;

pub(super) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(super) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(super) fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

/// Config comes from a JSON `data-*` attribute on `<body>`. Anything missing
/// or malformed falls back to defaults.
pub(super) fn read_config(document: &Document) -> FolioConfig {
    let Some(raw) = document
        .body()
        .and_then(|b| b.get_attribute(CONFIG_ATTRIBUTE))
    else {
        return FolioConfig::default();
    };
    let parsed = FolioConfig::from_json(&raw).map_err(|e| e.to_string());
    match parsed.and_then(|c| c.validate().map(|_| c).map_err(|e| e.to_string())) {
        Ok(config) => config,
        Err(e) => {
            warn(&format!("folio: ignoring {CONFIG_ATTRIBUTE}: {e}"));
            FolioConfig::default()
        }
    }
}

pub(super) fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub(super) fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    // Style writes only fail on read-only declarations.
    let _ = el.style().set_property(prop, value);
}

/// Append a `<div class=..>text</div>` to `parent` and keep it scrolled to the
/// newest child.
pub(super) fn append_div(
    document: &Document,
    parent: &Element,
    class: &str,
    text: &str,
) -> Option<Element> {
    let div = document.create_element("div").ok()?;
    div.set_class_name(class);
    div.set_text_content(Some(text));
    parent.append_child(&div).ok()?;
    parent.set_scroll_top(parent.scroll_height());
    Some(div)
}
