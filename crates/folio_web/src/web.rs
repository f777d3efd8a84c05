mod canvas;
mod cartpole_widget;
mod chat_widget;
mod dom;
mod risk_widget;

use folio::prng::Prng;

/// Mount every widget whose elements are present on the page.
///
/// Called once by the wasm entry point. Widgets whose container is missing
/// are skipped, so a page can host any subset of them.
pub fn start() {
    let Some(document) = dom::document() else {
        return;
    };
    let config = dom::read_config(&document);

    risk_widget::mount(&document);
    chat_widget::mount(&document, &config.chat);
    cartpole_widget::mount(&document, &config.cartpole);
}

/// Seed from the config when present, otherwise from `Math.random`.
fn seeded_prng(seed: Option<u64>) -> Prng {
    match seed {
        Some(seed) => Prng::new(seed),
        None => {
            let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
            let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
            Prng::from_entropy_hint((hi << 32) | lo)
        }
    }
}
