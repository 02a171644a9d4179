//! # deck2pdf
//!
//! Export a web-hosted slide presentation to PDF by driving the viewer's own
//! navigation over the Chrome DevTools Protocol (CDP): walk the deck
//! slide-by-slide, capture a raster snapshot of each slide, and assemble the
//! snapshots into a paginated document.
//!
//! ## Features
//!
//! - **Browser Session Management**: Launch or connect to Chrome/Chromium instances
//! - **Resilient Navigation**: Dual position signals, bounded polling, and a
//!   synthetic arrow-key fallback for a viewer that exposes no completion callback
//! - **Input Suppression**: User interaction with the host page is blocked for
//!   the duration of a traversal and always released afterwards
//! - **PDF Assembly**: One page per slide, sized to each snapshot at 72 pt per 96 px
//!
//! ## CLI
//!
//! The crate ships a `deck2pdf` binary (feature `cli`, enabled by default):
//!
//! ```bash
//! # Export immediately, headless
//! deck2pdf "https://docs.google.com/presentation/d/<id>/preview" --now
//!
//! # Headed: inject an export button into the viewer toolbar and wait for a click
//! deck2pdf "https://docs.google.com/presentation/d/<id>/preview" --headed
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use deck2pdf::{BrowserSession, LaunchOptions};
//! use deck2pdf::{CdpCapture, CdpViewer, PdfAssembler, TraversalController};
//!
//! # fn main() -> deck2pdf::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://docs.google.com/presentation/d/<id>/preview")?;
//! session.wait_for_navigation()?;
//!
//! let viewer = CdpViewer::new(&session);
//! let capture = CdpCapture::new(&session);
//! let assembler = PdfAssembler::new();
//!
//! let report = TraversalController::new(&viewer, &capture, &assembler)
//!     .with_output("deck.pdf")
//!     .export_all()?;
//! println!("captured {} of {} slides", report.captured, report.total_slides);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`viewer`]: Slide locator, navigator, input guard, and the CDP viewer boundary
//! - [`export`]: Capture adapter, PDF assembler, and the traversal controller
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod error;
pub mod export;
pub mod viewer;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use error::{ExportError, Result};
pub use export::{
    CaptureAdapter, CapturedSlide, CdpCapture, DocumentAssembler, ExportReport, PdfAssembler,
    TraversalController, derive_filename,
};
pub use viewer::{
    CdpViewer, DeckSurface, HostUi, InputGuard, Navigator, NavigatorConfig, SlideLocator,
};
