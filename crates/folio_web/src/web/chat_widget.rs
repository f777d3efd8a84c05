use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{Local, NaiveTime};
use folio::config::ChatConfig;
use folio::prng::Prng;
use folio_widgets::responder::{ChatEntry, ChatSession, PendingReply};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlInputElement};

use super::dom;
use crate::ui_model::{self, ids};

struct ChatWidget {
    document: Document,
    messages: Element,
    input: HtmlInputElement,
    session: ChatSession,
    rng: Prng,
}

fn now() -> NaiveTime {
    Local::now().time()
}

impl ChatWidget {
    fn append(&self, entry: &ChatEntry) {
        dom::append_div(
            &self.document,
            &self.messages,
            ui_model::bubble_class(entry.sender),
            &entry.text,
        );
    }
}

/// Resolve after `delay` using `setTimeout`.
async fn sleep(delay: Duration) {
    let ms = delay.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}

fn send(widget: &Rc<RefCell<ChatWidget>>) {
    let pending: PendingReply = {
        let mut w = widget.borrow_mut();
        let text = w.input.value();
        let ChatWidget { session, rng, .. } = &mut *w;
        let Some(pending) = session.submit(&text, now(), rng) else {
            return;
        };
        w.input.set_value("");
        if let Some(entry) = w.session.transcript().entries().last() {
            w.append(entry);
        }
        pending
    };

    let typing = {
        let w = widget.borrow();
        dom::append_div(
            &w.document,
            &w.messages,
            ui_model::TYPING_CLASS,
            ui_model::TYPING_TEXT,
        )
    };

    let widget = widget.clone();
    wasm_bindgen_futures::spawn_local(async move {
        sleep(pending.delay()).await;
        if let Some(typing) = typing {
            typing.remove();
        }
        let mut w = widget.borrow_mut();
        let entry = w.session.deliver(pending, now()).clone();
        w.append(&entry);
    });
}

pub(super) fn mount(document: &Document, config: &ChatConfig) {
    let (Some(messages), Some(input)) = (
        document.get_element_by_id(ids::CHAT_MESSAGES),
        dom::by_id::<HtmlInputElement>(document, ids::CHAT_INPUT),
    ) else {
        return;
    };

    let delay = Duration::from_millis(config.reply_delay_ms);
    let session = if config.greet_on_open {
        ChatSession::with_greeting(delay, now())
    } else {
        ChatSession::new(delay)
    };
    let widget = Rc::new(RefCell::new(ChatWidget {
        document: document.clone(),
        messages,
        input: input.clone(),
        session,
        rng: super::seeded_prng(config.seed),
    }));
    {
        let w = widget.borrow();
        for entry in w.session.transcript().entries() {
            w.append(entry);
        }
    }

    if let Some(button) = document.get_element_by_id(ids::CHAT_SEND) {
        let widget = widget.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            send(&widget);
        }) as Box<dyn FnMut(web_sys::Event)>);
        if button
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .is_err()
        {
            dom::warn("folio: could not bind chat send button");
        }
        cb.forget();
    }

    let cb = Closure::wrap(Box::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            send(&widget);
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
    if input
        .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
        .is_err()
    {
        dom::warn("folio: could not bind chat input");
    }
    cb.forget();
}
