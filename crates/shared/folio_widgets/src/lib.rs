//! Portfolio widget logic, free of any display host.
//!
//! - [`risk`]: rule-based transaction risk score and gauge reading
//! - [`responder`]: keyword-bucket chat replies and the transcript
//! - [`cartpole`]: the randomized cart-pole toy and its episode bookkeeping
//! - [`render`] / [`animation`]: drawing and the start/stop frame loop
//!
//! Randomness comes in through `folio::prng::RandomSource`, frames through
//! `folio::schedule::FrameScheduler`, pixels through `folio::surface::Surface`.

pub mod animation;
pub mod cartpole;
pub mod render;
pub mod responder;
pub mod risk;
pub mod stats;
