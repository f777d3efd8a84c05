use std::cell::RefCell;
use std::rc::Rc;

use folio::config::CartPoleConfig;
use folio::prng::Prng;
use folio::schedule::{FrameHandle, FrameScheduler};
use folio_widgets::animation::CartPoleAnimation;
use folio_widgets::cartpole::CartPoleParams;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use super::canvas::CanvasSurface;
use super::dom;
use crate::ui_model::{self, ids};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` as a [`FrameScheduler`].
///
/// The callback is installed after the animation that owns this scheduler is
/// built, since the callback itself captures the animation.
struct RafScheduler {
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
            .map(|id| FrameHandle(id as u64))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0 as i32);
        }
    }
}

type Animation = CartPoleAnimation<RafScheduler, Prng>;

pub(super) fn mount(document: &Document, config: &CartPoleConfig) {
    let Some(canvas) = dom::by_id::<HtmlCanvasElement>(document, ids::CARTPOLE_CANVAS) else {
        return;
    };
    let mut surface = match CanvasSurface::new(&canvas) {
        Ok(s) => s,
        Err(e) => {
            dom::warn(&format!("folio: {e}"));
            return;
        }
    };

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let anim: Rc<RefCell<Animation>> = Rc::new(RefCell::new(CartPoleAnimation::new(
        CartPoleParams::default(),
        RafScheduler {
            callback: callback.clone(),
        },
        super::seeded_prng(config.seed),
        config.average_window,
    )));
    anim.borrow().draw(&mut surface);

    let surface = Rc::new(RefCell::new(surface));
    // The scheduler holds the callback and the callback holds the animation,
    // so the widget lives for the rest of the page.
    {
        let anim = anim.clone();
        let surface = surface.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            anim.borrow_mut().on_frame(&mut *surface.borrow_mut());
        }) as Box<dyn FnMut(f64)>));
    }

    let Some(button) = document.get_element_by_id(ids::CARTPOLE_TOGGLE) else {
        // No control on the page: just run.
        anim.borrow_mut().start();
        return;
    };
    dom::set_text(&button, ui_model::toggle_label(false));

    let label_target = button.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let running = anim.borrow_mut().toggle();
        dom::set_text(&label_target, ui_model::toggle_label(running));
    }) as Box<dyn FnMut(web_sys::Event)>);
    if button
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .is_err()
    {
        dom::warn("folio: could not bind cart-pole toggle");
    }
    cb.forget();
}
