//! Error types and result aliases

use thiserror::Error;

/// Errors that can occur while driving the viewer or assembling the document
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to launch the browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// A tab-level operation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Script evaluation in the page failed
    #[error("Script evaluation failed: {0}")]
    ScriptFailed(String),

    /// Navigation command could not be issued
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// An expected element was not found in the page
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The total slide count could not be detected; fatal to the whole export
    #[error("Slide count could not be detected")]
    SlideCountUndetected,

    /// Another export is already running in this process
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Capturing a single slide failed
    #[error("Slide capture failed: {0}")]
    CaptureFailed(String),

    /// Assembling the PDF document failed
    #[error("Document assembly failed: {0}")]
    AssemblyFailed(String),

    /// Filesystem error while writing the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExportError>;
