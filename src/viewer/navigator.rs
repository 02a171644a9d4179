use crate::error::Result;
use crate::viewer::locator::SlideLocator;
use crate::viewer::surface::{DeckSurface, NudgeDirection};
use std::time::Duration;

/// Polling policy for a single navigation call
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Interval between position polls
    pub poll_interval: Duration,

    /// Attempt ceiling before the navigation is abandoned
    pub max_attempts: u32,

    /// A stall nudge is considered every this many polls
    pub nudge_every: u32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(150),
            max_attempts: 50,
            nudge_every: 10,
        }
    }
}

impl NavigatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builder method: set the attempt ceiling
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}

/// Commands the viewer to move to a slide and confirms arrival.
///
/// Navigation is a best-effort request against a UI that exposes no
/// completion callback: the fragment rewrite is issued once, then both
/// position signals are polled until either matches the target. A viewer
/// that shows no fragment drift at all gets a synthetic arrow-key nudge
/// every [`NavigatorConfig::nudge_every`] polls.
pub struct Navigator<'a, S: DeckSurface> {
    surface: &'a S,
    config: NavigatorConfig,
}

impl<'a, S: DeckSurface> Navigator<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self::with_config(surface, NavigatorConfig::default())
    }

    pub fn with_config(surface: &'a S, config: NavigatorConfig) -> Self {
        Self { surface, config }
    }

    /// Navigate to `target`, returning once either position signal reports
    /// arrival or the attempt ceiling is reached.
    ///
    /// A timeout is logged and swallowed: the caller proceeds from whatever
    /// position was reached, since partial progress beats total failure here.
    /// Errors from the underlying surface do propagate.
    pub fn navigate_to(&self, target: u32) -> Result<()> {
        let previous = SlideLocator::new(self.surface).current_position()?;

        if self.arrived(target)? {
            return Ok(());
        }

        self.surface.request_slide(target)?;

        for attempt in 0..self.config.max_attempts {
            let from_fragment = self.surface.fragment_position()?;
            let from_ordinal = self.surface.ordinal_position()?;

            if from_fragment == Some(target) || from_ordinal == Some(target) {
                return Ok(());
            }

            // No drift from where we started means the fragment rewrite was
            // ignored; fall back to simulating the user's navigation key.
            let observed = from_fragment.or(from_ordinal).unwrap_or(1);
            if attempt % self.config.nudge_every == 0 && observed == previous {
                let direction = if target > previous {
                    NudgeDirection::Forward
                } else {
                    NudgeDirection::Backward
                };
                self.surface.send_nudge(direction)?;
            }

            std::thread::sleep(self.config.poll_interval);
        }

        log::warn!(
            "Navigation to slide {} timed out after {} attempts; continuing from current position",
            target,
            self.config.max_attempts
        );
        Ok(())
    }

    fn arrived(&self, target: u32) -> Result<bool> {
        Ok(self.surface.fragment_position()? == Some(target)
            || self.surface.ordinal_position()? == Some(target))
    }
}
