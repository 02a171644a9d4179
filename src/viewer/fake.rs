//! In-memory viewer double used by unit tests across the crate.
//!
//! Models the observable behavior of a deck viewer: position signals that can
//! be configured to respond, lag, or ignore navigation entirely.

use crate::error::Result;
use crate::viewer::surface::{DeckSurface, HostUi, NudgeDirection};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

pub(crate) struct FakeViewer {
    fragment: Cell<Option<u32>>,
    ordinal: Cell<Option<u32>>,
    declared_total: Cell<Option<u32>>,
    rendered_count: Cell<u32>,
    active_slide: Cell<bool>,
    title: RefCell<String>,

    /// When true, `request_slide` moves both signals immediately
    responsive: Cell<bool>,
    /// When true, `request_slide` moves only the ordinal signal
    ordinal_on_request: Cell<bool>,
    /// When true, nudges step the ordinal signal by one
    nudges_advance: Cell<bool>,
    /// Targets for which `request_slide` is silently ignored
    unreachable: RefCell<HashSet<u32>>,

    requests: RefCell<Vec<u32>>,
    nudges: RefCell<Vec<NudgeDirection>>,

    blockers_attached: Cell<bool>,
    attach_calls: Cell<u32>,
    detach_calls: Cell<u32>,

    overlay_present: Cell<bool>,
    overlay_updates: RefCell<Vec<u8>>,
    overlay_removes: Cell<u32>,
}

impl FakeViewer {
    pub fn new() -> Self {
        Self {
            fragment: Cell::new(None),
            ordinal: Cell::new(None),
            declared_total: Cell::new(None),
            rendered_count: Cell::new(0),
            active_slide: Cell::new(true),
            title: RefCell::new("Untitled presentation".to_string()),
            responsive: Cell::new(true),
            ordinal_on_request: Cell::new(false),
            nudges_advance: Cell::new(false),
            unreachable: RefCell::new(HashSet::new()),
            requests: RefCell::new(Vec::new()),
            nudges: RefCell::new(Vec::new()),
            blockers_attached: Cell::new(false),
            attach_calls: Cell::new(0),
            detach_calls: Cell::new(0),
            overlay_present: Cell::new(false),
            overlay_updates: RefCell::new(Vec::new()),
            overlay_removes: Cell::new(0),
        }
    }

    /// A responsive deck showing `total` slides with the viewer at `position`
    pub fn with_deck(total: u32, position: u32) -> Self {
        let viewer = Self::new();
        viewer.set_declared_total(Some(total));
        viewer.set_rendered_count(total);
        viewer.set_fragment(Some(position));
        viewer.set_ordinal(Some(position));
        viewer
    }

    pub fn set_fragment(&self, position: Option<u32>) {
        self.fragment.set(position);
    }

    pub fn set_ordinal(&self, position: Option<u32>) {
        self.ordinal.set(position);
    }

    pub fn set_declared_total(&self, total: Option<u32>) {
        self.declared_total.set(total);
    }

    pub fn set_rendered_count(&self, count: u32) {
        self.rendered_count.set(count);
    }

    pub fn set_active_slide(&self, active: bool) {
        self.active_slide.set(active);
    }

    pub fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    pub fn set_responsive(&self, responsive: bool) {
        self.responsive.set(responsive);
    }

    pub fn set_ordinal_on_request(&self, enabled: bool) {
        self.ordinal_on_request.set(enabled);
    }

    pub fn set_nudges_advance(&self, enabled: bool) {
        self.nudges_advance.set(enabled);
    }

    pub fn set_unreachable(&self, target: u32) {
        self.unreachable.borrow_mut().insert(target);
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requests.borrow().clone()
    }

    pub fn nudges(&self) -> Vec<NudgeDirection> {
        self.nudges.borrow().clone()
    }

    pub fn blockers_attached(&self) -> bool {
        self.blockers_attached.get()
    }

    pub fn attach_calls(&self) -> u32 {
        self.attach_calls.get()
    }

    pub fn detach_calls(&self) -> u32 {
        self.detach_calls.get()
    }

    pub fn overlay_present(&self) -> bool {
        self.overlay_present.get()
    }

    pub fn overlay_updates(&self) -> Vec<u8> {
        self.overlay_updates.borrow().clone()
    }

    pub fn overlay_removes(&self) -> u32 {
        self.overlay_removes.get()
    }

    /// Position the deck currently shows, preferring the ordinal signal
    pub fn shown_position(&self) -> u32 {
        self.ordinal.get().or(self.fragment.get()).unwrap_or(1)
    }
}

impl DeckSurface for FakeViewer {
    fn fragment_position(&self) -> Result<Option<u32>> {
        Ok(self.fragment.get())
    }

    fn ordinal_position(&self) -> Result<Option<u32>> {
        Ok(self.ordinal.get())
    }

    fn declared_total(&self) -> Result<Option<u32>> {
        Ok(self.declared_total.get())
    }

    fn rendered_count(&self) -> Result<u32> {
        Ok(self.rendered_count.get())
    }

    fn request_slide(&self, target: u32) -> Result<()> {
        self.requests.borrow_mut().push(target);

        if self.unreachable.borrow().contains(&target) {
            return Ok(());
        }

        if self.responsive.get() {
            self.fragment.set(Some(target));
            self.ordinal.set(Some(target));
        } else if self.ordinal_on_request.get() {
            self.ordinal.set(Some(target));
        }
        Ok(())
    }

    fn send_nudge(&self, direction: NudgeDirection) -> Result<()> {
        self.nudges.borrow_mut().push(direction);

        if self.nudges_advance.get() {
            let current = self.shown_position();
            let next = match direction {
                NudgeDirection::Forward => current + 1,
                NudgeDirection::Backward => current.saturating_sub(1).max(1),
            };
            self.ordinal.set(Some(next));
        }
        Ok(())
    }

    fn has_active_slide(&self) -> Result<bool> {
        Ok(self.active_slide.get())
    }
}

impl HostUi for FakeViewer {
    fn page_title(&self) -> Result<String> {
        Ok(self.title.borrow().clone())
    }

    fn attach_input_blockers(&self) -> Result<()> {
        self.attach_calls.set(self.attach_calls.get() + 1);
        self.blockers_attached.set(true);
        Ok(())
    }

    fn detach_input_blockers(&self) -> Result<()> {
        self.detach_calls.set(self.detach_calls.get() + 1);
        self.blockers_attached.set(false);
        Ok(())
    }

    fn show_overlay(&self, percent: u8) -> Result<()> {
        self.overlay_present.set(true);
        self.overlay_updates.borrow_mut().push(percent);
        Ok(())
    }

    fn update_overlay(&self, percent: u8) -> Result<()> {
        if self.overlay_present.get() {
            self.overlay_updates.borrow_mut().push(percent);
        }
        Ok(())
    }

    fn remove_overlay(&self) -> Result<()> {
        self.overlay_present.set(false);
        self.overlay_removes.set(self.overlay_removes.get() + 1);
        Ok(())
    }

    fn insert_trigger(&self) -> Result<()> {
        Ok(())
    }

    fn trigger_clicked(&self) -> Result<bool> {
        Ok(false)
    }
}
