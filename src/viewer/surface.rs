use crate::browser::BrowserSession;
use crate::error::{ExportError, Result};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// CSS selector for the rendered surface of one slide. The last matching node
/// is the currently visible slide.
pub const SLIDE_SURFACE_SELECTOR: &str = ".punch-viewer-svgpage-svgcontainer";

/// Placement attempts for the export trigger before falling back to a
/// floating button
pub const TRIGGER_PLACEMENT_ATTEMPTS: u32 = 15;

/// Delay between trigger placement attempts
pub const TRIGGER_PLACEMENT_RETRY: Duration = Duration::from_millis(200);

/// Direction of a synthetic arrow-key nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Forward,
    Backward,
}

/// Observation and command boundary to the slide viewer.
///
/// The viewer is a third-party UI applying state changes asynchronously, so
/// every observation here is a point-in-time sample of a machine this crate
/// does not own. The two position signals (URL fragment and slide ordinal
/// attribute) may disagree transiently during navigation.
pub trait DeckSurface {
    /// Slide position parsed from a trailing numeric token in the viewer URL.
    /// Authoritative only once navigation has visually settled.
    fn fragment_position(&self) -> Result<Option<u32>>;

    /// Slide position read from the ordinal attribute of the active slide
    /// surface. Reflects true render state even before the URL updates.
    fn ordinal_position(&self) -> Result<Option<u32>>;

    /// Slide count declared by the viewer toolbar caption, when rendered
    fn declared_total(&self) -> Result<Option<u32>>;

    /// Number of slide surfaces currently rendered in the DOM. Undercounts
    /// while the viewer is still lazily rendering.
    fn rendered_count(&self) -> Result<u32>;

    /// Rewrite the viewer URL fragment to request a slide. Best-effort: the
    /// viewer applies the request asynchronously and sometimes not at all.
    fn request_slide(&self, target: u32) -> Result<()>;

    /// Dispatch a synthetic directional key event, the documented-equivalent
    /// fallback when fragment rewrites are ignored
    fn send_nudge(&self, direction: NudgeDirection) -> Result<()>;

    /// Whether an active slide surface is currently resolvable
    fn has_active_slide(&self) -> Result<bool>;
}

/// Host-page surfaces owned by this crate: input suppression, the progress
/// overlay, and the export trigger button.
pub trait HostUi {
    /// Title of the host document
    fn page_title(&self) -> Result<String>;

    /// Attach the capture-phase listener set that swallows user input
    fn attach_input_blockers(&self) -> Result<()>;

    /// Detach the listener set and clear retained references
    fn detach_input_blockers(&self) -> Result<()>;

    /// Show the full-screen progress overlay at the given percent
    fn show_overlay(&self, percent: u8) -> Result<()>;

    /// Update the overlay percent, if the overlay is present
    fn update_overlay(&self, percent: u8) -> Result<()>;

    /// Remove the overlay, if present
    fn remove_overlay(&self) -> Result<()>;

    /// Insert the export trigger button into the viewer toolbar, falling back
    /// to a floating button after bounded placement attempts
    fn insert_trigger(&self) -> Result<()>;

    /// Poll and consume the trigger click flag
    fn trigger_clicked(&self) -> Result<bool>;
}

/// Parse the trailing `p<digits>` token from a viewer URL
pub(crate) fn parse_fragment_position(url: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"p(\d+)$").unwrap());
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// CDP-backed implementation of both viewer boundaries
pub struct CdpViewer<'a> {
    session: &'a BrowserSession,
}

impl<'a> CdpViewer<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }

    fn eval_u32(&self, expression: &str) -> Result<Option<u32>> {
        let value = self.session.evaluate(expression)?;
        Ok(value.and_then(|v| v.as_u64()).map(|n| n as u32))
    }
}

impl DeckSurface for CdpViewer<'_> {
    fn fragment_position(&self) -> Result<Option<u32>> {
        let url = self.session.url()?;
        Ok(parse_fragment_position(&url))
    }

    fn ordinal_position(&self) -> Result<Option<u32>> {
        self.eval_u32(
            r#"
            (function () {
                var surfaces = document.querySelectorAll(".punch-viewer-svgpage-svgcontainer");
                var active = surfaces[surfaces.length - 1];
                if (!active) { return null; }
                var pos = parseInt(active.getAttribute("aria-posinset") || "", 10);
                return isNaN(pos) ? null : pos;
            })()
            "#,
        )
    }

    fn declared_total(&self) -> Result<Option<u32>> {
        self.eval_u32(
            r#"
            (function () {
                var caption = document.querySelector(".docs-material-menu-button-flat-default-caption");
                var size = caption ? caption.getAttribute("aria-setsize") : null;
                if (!size) { return null; }
                var total = parseInt(size, 10);
                return isNaN(total) ? null : total;
            })()
            "#,
        )
    }

    fn rendered_count(&self) -> Result<u32> {
        let count = self.eval_u32(
            r#"document.querySelectorAll(".punch-viewer-svgpage-svgcontainer").length"#,
        )?;
        Ok(count.unwrap_or(0))
    }

    fn request_slide(&self, target: u32) -> Result<()> {
        self.session
            .evaluate(&format!(r#"window.location.hash = "slide=id.p{}";"#, target))?;
        Ok(())
    }

    fn send_nudge(&self, direction: NudgeDirection) -> Result<()> {
        let key = match direction {
            NudgeDirection::Forward => "ArrowRight",
            NudgeDirection::Backward => "ArrowLeft",
        };
        self.session
            .tab()?
            .press_key(key)
            .map_err(|e| ExportError::NavigationFailed(format!("Failed to dispatch {}: {}", key, e)))?;
        Ok(())
    }

    fn has_active_slide(&self) -> Result<bool> {
        let value = self.session.evaluate(
            r#"document.querySelectorAll(".punch-viewer-svgpage-svgcontainer").length > 0"#,
        )?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }
}

impl HostUi for CdpViewer<'_> {
    fn page_title(&self) -> Result<String> {
        self.session.title()
    }

    fn attach_input_blockers(&self) -> Result<()> {
        self.session.evaluate(include_str!("js/input_guard_attach.js"))?;
        Ok(())
    }

    fn detach_input_blockers(&self) -> Result<()> {
        self.session.evaluate(include_str!("js/input_guard_detach.js"))?;
        Ok(())
    }

    fn show_overlay(&self, percent: u8) -> Result<()> {
        let script = include_str!("js/overlay_show.js").replace("__PERCENT__", &percent.to_string());
        self.session.evaluate(&script)?;
        Ok(())
    }

    fn update_overlay(&self, percent: u8) -> Result<()> {
        let script = include_str!("js/overlay_update.js").replace("__PERCENT__", &percent.to_string());
        self.session.evaluate(&script)?;
        Ok(())
    }

    fn remove_overlay(&self) -> Result<()> {
        self.session.evaluate(include_str!("js/overlay_remove.js"))?;
        Ok(())
    }

    fn insert_trigger(&self) -> Result<()> {
        for _ in 0..TRIGGER_PLACEMENT_ATTEMPTS {
            let attached = self
                .session
                .evaluate(include_str!("js/trigger_insert.js"))?
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if attached {
                return Ok(());
            }
            std::thread::sleep(TRIGGER_PLACEMENT_RETRY);
        }

        // No toolbar appeared; float the button at a fixed position instead
        self.session.evaluate(include_str!("js/trigger_float.js"))?;
        Ok(())
    }

    fn trigger_clicked(&self) -> Result<bool> {
        let value = self.session.evaluate(
            r#"
            (function () {
                var clicked = window.__deck2pdfExportRequested === true;
                window.__deck2pdfExportRequested = false;
                return clicked;
            })()
            "#,
        )?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }
}
