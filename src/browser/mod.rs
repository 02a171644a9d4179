//! Browser session management
//!
//! Wraps a Chrome/Chromium instance driven over the Chrome DevTools Protocol.
//! The session owns the browser process (or a WebSocket connection to an
//! existing one) and resolves the tab that currently displays the
//! presentation viewer.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
