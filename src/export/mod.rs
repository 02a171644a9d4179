//! The export pipeline: slide capture, PDF assembly, and the traversal
//! controller that drives both across a whole deck.

pub mod assembler;
pub mod capture;
pub mod traversal;

pub use assembler::{DocumentAssembler, PageOrientation, PdfAssembler};
pub use capture::{CaptureAdapter, CapturedSlide, CdpCapture, JPEG_QUALITY};
pub use traversal::{ExportReport, TraversalController};

use regex::Regex;
use std::sync::OnceLock;

/// Derive the output filename from the host page title: any bracketed
/// `[...]` segment is stripped, and the fixed document extension appended.
pub fn derive_filename(title: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s*\[.*?\]\s*").unwrap());

    let stripped = re.replace_all(title, "");
    let stem = stripped.trim();
    if stem.is_empty() {
        "presentation.pdf".to_string()
    } else {
        format!("{}.pdf", stem)
    }
}
