//! Page inventory and display strings that should be available on both wasm
//! and native.
//!
//! Keeping these out of the wasm-only `web` module lets us unit-test them on
//! the host.

use folio::numfmt;
use folio_widgets::responder::Sender;
use folio_widgets::risk::RiskReading;

/// Ids of the display elements each widget binds to. A widget whose elements
/// are missing from the page does nothing.
pub mod ids {
    pub const RISK_AMOUNT: &str = "amount";
    pub const RISK_HOUR: &str = "hour";
    pub const RISK_DAY: &str = "day";
    pub const RISK_MERCHANT: &str = "merchant-risk";
    pub const RISK_DISTANCE: &str = "distance";
    pub const RISK_UNUSUAL: &str = "unusual-category";
    pub const RISK_NEEDLE: &str = "risk-needle";
    pub const RISK_PERCENT: &str = "risk-percent";
    pub const RISK_LABEL: &str = "risk-label";

    pub const CHAT_MESSAGES: &str = "chat-messages";
    pub const CHAT_INPUT: &str = "chat-input";
    pub const CHAT_SEND: &str = "chat-send";

    pub const CARTPOLE_CANVAS: &str = "cartpole-canvas";
    pub const CARTPOLE_TOGGLE: &str = "cartpole-toggle";

    /// Form fields that trigger a re-score, in `RiskFeatures::from_fields` order.
    pub const RISK_INPUTS: [&str; 6] = [
        RISK_AMOUNT,
        RISK_HOUR,
        RISK_DAY,
        RISK_MERCHANT,
        RISK_DISTANCE,
        RISK_UNUSUAL,
    ];
}

/// `data-*` attribute on `<body>` holding optional JSON config.
pub const CONFIG_ATTRIBUTE: &str = "data-folio-config";

/// CSS transform for the gauge needle: 0deg at score 0 up to 180deg at
/// score 1.
///
/// The page's stylesheet places the unrotated needle along the left end of
/// the dial (pointing at "low"), with its pivot at the dial center.
pub fn gauge_transform(reading: &RiskReading) -> String {
    format!("rotate({}deg)", numfmt::fixed(reading.gauge_degrees, 1))
}

pub fn percent_text(reading: &RiskReading) -> String {
    format!("{}%", reading.percent)
}

pub fn bubble_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "message user-message",
        Sender::Assistant => "message bot-message",
    }
}

pub const TYPING_CLASS: &str = "message bot-message typing";
pub const TYPING_TEXT: &str = "...";

pub fn toggle_label(running: bool) -> &'static str {
    if running {
        "Stop"
    } else {
        "Start"
    }
}
