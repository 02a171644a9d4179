//! Observation and control of the slide viewer
//!
//! The viewer is a third-party UI this crate does not own: navigation is
//! requested, never guaranteed, and the current position must be inferred
//! from two independently-updated signals. This module provides:
//! - [`DeckSurface`] / [`HostUi`]: the narrow boundary to the viewer page,
//!   with [`CdpViewer`] as the CDP-backed implementation
//! - [`SlideLocator`]: position and slide-count resolution over noisy signals
//! - [`Navigator`]: bounded-retry navigation with a synthetic-input fallback
//! - [`InputGuard`]: whole-document input suppression while a traversal runs

pub mod guard;
pub mod locator;
pub mod navigator;
pub mod surface;

#[cfg(test)]
pub(crate) mod fake;

pub use guard::InputGuard;
pub use locator::SlideLocator;
pub use navigator::{Navigator, NavigatorConfig};
pub use surface::{CdpViewer, DeckSurface, HostUi, NudgeDirection, SLIDE_SURFACE_SELECTOR};
