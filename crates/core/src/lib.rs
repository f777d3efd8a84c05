//! # folio
//!
//! Host-independent plumbing for the portfolio widgets.
//!
//! The widgets themselves live in `folio_widgets`; this crate provides what
//! they are driven through:
//!
//! - [`prng`]: seedable randomness behind the [`prng::RandomSource`] trait
//! - [`schedule`]: the "schedule next frame" capability and the Running/Stopped loop
//! - [`surface`]: a minimal 2-D drawing surface and a recording implementation
//! - [`numfmt`]: wasm-safe fixed-point float formatting for HUD text
//! - [`config`]: JSON configuration shared by the hosts
//! - [`error`]: the error type for the fallible edges (config, host setup)
//!
//! ```
//! use folio::prelude::*;
//!
//! let mut lp = RunLoop::new(ManualScheduler::new());
//! lp.start();
//! lp.start(); // no second loop
//! assert_eq!(lp.scheduler().requests(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): configuration loading

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/schedule.rs"]
pub mod schedule;

#[path = "core/surface.rs"]
pub mod surface;

#[path = "core/numfmt.rs"]
pub mod numfmt;

#[path = "core/error.rs"]
pub mod error;

#[cfg(feature = "serde")]
#[path = "core/config.rs"]
pub mod config;

/// Prelude module for convenient imports.
pub mod prelude {
    #[cfg(feature = "serde")]
    pub use crate::config::FolioConfig;
    pub use crate::error::FolioError;
    pub use crate::prng::{Prng, RandomSource};
    pub use crate::schedule::{FrameHandle, FrameScheduler, ManualScheduler, RunLoop, RunState};
    pub use crate::surface::{Color, DrawCommand, DrawList, Rect, Surface};
}
