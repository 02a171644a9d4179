use crate::browser::BrowserSession;
use crate::error::{ExportError, Result};
use crate::viewer::surface::SLIDE_SURFACE_SELECTOR;
use headless_chrome::protocol::cdp::Page;
use image::GenericImageView;

/// Fixed JPEG quality for slide snapshots
pub const JPEG_QUALITY: u32 = 92;

/// One captured slide: encoded raster bytes plus pixel dimensions
#[derive(Debug, Clone)]
pub struct CapturedSlide {
    /// JPEG-encoded image data
    pub data: Vec<u8>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

/// Converts the visual surface of the active slide into a raster image
pub trait CaptureAdapter {
    /// Capture the currently visible slide. One failure per slide; the
    /// caller decides whether to skip or abort.
    fn capture_active(&self) -> Result<CapturedSlide>;
}

/// Capture adapter backed by CDP element screenshots
pub struct CdpCapture<'a> {
    session: &'a BrowserSession,
    quality: u32,
}

impl<'a> CdpCapture<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, quality: JPEG_QUALITY }
    }
}

impl CaptureAdapter for CdpCapture<'_> {
    fn capture_active(&self) -> Result<CapturedSlide> {
        let tab = self.session.tab()?;

        let surfaces = tab
            .find_elements(SLIDE_SURFACE_SELECTOR)
            .map_err(|e| ExportError::ElementNotFound(format!("No slide surface: {}", e)))?;

        // The viewer keeps previously rendered slides in the DOM; the last
        // surface is the one currently shown.
        let active = surfaces
            .last()
            .ok_or_else(|| ExportError::ElementNotFound("No slide surface rendered".to_string()))?;

        let viewport = active
            .get_box_model()
            .map_err(|e| ExportError::CaptureFailed(format!("No box model for slide surface: {}", e)))?
            .content_viewport();

        let data = tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Jpeg,
                Some(self.quality),
                Some(viewport),
                true,
            )
            .map_err(|e| ExportError::CaptureFailed(e.to_string()))?;

        let (width, height) = probe_dimensions(&data)?;

        Ok(CapturedSlide { data, width, height })
    }
}

/// Decode the pixel dimensions of an encoded image
fn probe_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| ExportError::CaptureFailed(format!("Undecodable screenshot: {}", e)))?;
    Ok(decoded.dimensions())
}
