use crate::error::{ExportError, Result};
use crate::export::assembler::DocumentAssembler;
use crate::export::capture::{CaptureAdapter, CapturedSlide};
use crate::export::derive_filename;
use crate::viewer::guard::InputGuard;
use crate::viewer::locator::SlideLocator;
use crate::viewer::navigator::{Navigator, NavigatorConfig};
use crate::viewer::surface::{DeckSurface, HostUi};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome summary of one export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    /// Slide count the viewer reported
    pub total_slides: u32,

    /// Slides actually captured
    pub captured: u32,

    /// Slides missing from the document (capture failures or an early stop)
    pub skipped: u32,

    /// Where the document was written; `None` when nothing was captured
    pub output: Option<PathBuf>,
}

/// Orchestrates one traversal: locator, navigator, capture and assembly,
/// with the viewer position and host UI restored on every exit path.
pub struct TraversalController<'a, V, C, A>
where
    V: DeckSurface + HostUi,
    C: CaptureAdapter,
    A: DocumentAssembler,
{
    viewer: &'a V,
    capture: &'a C,
    assembler: &'a A,
    navigator: NavigatorConfig,
    output: Option<PathBuf>,
}

impl<'a, V, C, A> TraversalController<'a, V, C, A>
where
    V: DeckSurface + HostUi,
    C: CaptureAdapter,
    A: DocumentAssembler,
{
    pub fn new(viewer: &'a V, capture: &'a C, assembler: &'a A) -> Self {
        Self {
            viewer,
            capture,
            assembler,
            navigator: NavigatorConfig::default(),
            output: None,
        }
    }

    /// Builder method: override the navigation polling policy
    pub fn with_navigator(mut self, config: NavigatorConfig) -> Self {
        self.navigator = config;
        self
    }

    /// Builder method: set an explicit output path instead of deriving one
    /// from the page title
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Run one complete traversal and assemble the captured slides.
    ///
    /// Fatal only when the slide count cannot be detected or another export
    /// already holds the input guard. Per-slide capture failures and
    /// navigation timeouts degrade the result instead of aborting it.
    pub fn export_all(&self) -> Result<ExportReport> {
        let locator = SlideLocator::new(self.viewer);
        let navigator = Navigator::with_config(self.viewer, self.navigator.clone());

        let mut guard = InputGuard::new(self.viewer);
        guard.engage()?;

        if let Err(e) = self.viewer.show_overlay(0) {
            log::debug!("Progress overlay unavailable: {}", e);
        }

        let total = match locator.total_slides() {
            Ok(Some(total)) => total,
            Ok(None) => {
                log::error!("Slide count could not be detected; aborting export");
                self.teardown(&mut guard);
                return Err(ExportError::SlideCountUndetected);
            }
            Err(e) => {
                self.teardown(&mut guard);
                return Err(e);
            }
        };

        let starting = locator.current_position().unwrap_or(1);

        let outcome = self.traverse(&locator, &navigator, total);

        // Cleanup runs regardless of how the loop exited: restore the
        // original viewer position, then drop the overlay and the guard.
        if let Err(e) = navigator.navigate_to(starting.max(1)) {
            log::warn!("Failed to restore starting slide {}: {}", starting, e);
        }
        self.teardown(&mut guard);

        let slides = outcome?;
        let captured = slides.len() as u32;
        let mut report = ExportReport {
            total_slides: total,
            captured,
            skipped: total - captured,
            output: None,
        };

        if slides.is_empty() {
            log::warn!("No slides captured; skipping document assembly");
            return Ok(report);
        }

        let output = self.resolve_output()?;
        self.assembler.assemble(&slides, &output)?;
        report.output = Some(output);

        Ok(report)
    }

    fn traverse(
        &self,
        locator: &SlideLocator<'a, V>,
        navigator: &Navigator<'a, V>,
        total: u32,
    ) -> Result<Vec<CapturedSlide>> {
        let mut current = locator.current_position()?;
        if current != 1 {
            navigator.navigate_to(1)?;
            current = 1;
        }

        let mut captured: Vec<CapturedSlide> = Vec::new();

        for index in 0..total {
            if !self.viewer.has_active_slide()? {
                log::warn!("No active slide surface resolvable; stopping traversal early");
                break;
            }

            match self.capture.capture_active() {
                Ok(slide) => {
                    captured.push(slide);
                    let percent = (captured.len() as f64 / total as f64 * 100.0).round() as u8;
                    if let Err(e) = self.viewer.update_overlay(percent) {
                        log::debug!("Failed to update progress overlay: {}", e);
                    }
                }
                Err(e) => {
                    // Best-effort skip; the slide is missing from the output
                    log::error!("Capture failed for slide {}: {}", current, e);
                }
            }

            if captured.len() as u32 >= total {
                break;
            }

            if index < total - 1 {
                let target = current + 1;
                navigator.navigate_to(target)?;
                current = target;
            }
        }

        Ok(captured)
    }

    fn teardown(&self, guard: &mut InputGuard<'a, V>) {
        if let Err(e) = self.viewer.remove_overlay() {
            log::debug!("Failed to remove progress overlay: {}", e);
        }
        guard.release();
    }

    fn resolve_output(&self) -> Result<PathBuf> {
        if let Some(path) = &self.output {
            return Ok(path.clone());
        }
        let title = self.viewer.page_title()?;
        Ok(PathBuf::from(derive_filename(&title)))
    }
}
