use folio_widgets::risk::{RiskFeatures, RiskReading};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

use super::dom;
use crate::ui_model::{self, ids};

/// Read a form field as a string. Checkboxes report `"true"`/`"false"`.
fn field_value(document: &Document, id: &str) -> String {
    if let Some(input) = dom::by_id::<HtmlInputElement>(document, id) {
        if input.type_() == "checkbox" {
            return input.checked().to_string();
        }
        return input.value();
    }
    dom::by_id::<HtmlSelectElement>(document, id)
        .map(|s| s.value())
        .unwrap_or_default()
}

fn read_features(document: &Document) -> RiskFeatures {
    let [amount, hour, day, merchant, distance, unusual] =
        ids::RISK_INPUTS.map(|id| field_value(document, id));
    RiskFeatures::from_fields(&amount, &hour, &day, &merchant, &distance, &unusual)
}

fn render(document: &Document) {
    let reading = RiskReading::evaluate(&read_features(document));

    if let Some(needle) = dom::by_id::<HtmlElement>(document, ids::RISK_NEEDLE) {
        dom::set_style(&needle, "transform", &ui_model::gauge_transform(&reading));
    }
    if let Some(percent) = document.get_element_by_id(ids::RISK_PERCENT) {
        dom::set_text(&percent, &ui_model::percent_text(&reading));
    }
    if let Some(label) = dom::by_id::<HtmlElement>(document, ids::RISK_LABEL) {
        dom::set_text(&label, reading.tier.label());
        dom::set_style(&label, "color", reading.tier.color());
    }
}

pub(super) fn mount(document: &Document) {
    if document.get_element_by_id(ids::RISK_NEEDLE).is_none() {
        return;
    }

    for id in ids::RISK_INPUTS {
        let Some(el) = document.get_element_by_id(id) else {
            continue;
        };
        let doc = document.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            render(&doc);
        }) as Box<dyn FnMut(web_sys::Event)>);
        for event in ["input", "change"] {
            if el
                .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
                .is_err()
            {
                dom::warn(&format!("folio: could not listen for {event} on #{id}"));
            }
        }
        // Listeners live as long as the page.
        cb.forget();
    }

    render(document);
}
