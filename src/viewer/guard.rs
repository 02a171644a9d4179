use crate::error::{ExportError, Result};
use crate::viewer::surface::HostUi;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide flag gating the guard. Set while a traversal is running;
/// also the rejection point for a second concurrent export.
static BLOCKING: AtomicBool = AtomicBool::new(false);

/// Suppresses user interaction with the host page while a traversal runs.
///
/// Slide navigation relies on the same key events a user might press, so
/// uncoordinated input during a traversal would corrupt position tracking.
/// `engage`/`release` are idempotent, and `release` is safe to call when the
/// guard was never engaged.
pub struct InputGuard<'a, H: HostUi> {
    host: &'a H,
    attached: bool,
}

impl<'a, H: HostUi> InputGuard<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host, attached: false }
    }

    /// Engage the guard: claim the process-wide flag and attach the
    /// capture-phase listener set.
    ///
    /// Returns [`ExportError::ExportInProgress`] when another traversal
    /// already holds the flag.
    pub fn engage(&mut self) -> Result<()> {
        if self.attached {
            return Ok(());
        }

        if BLOCKING
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::ExportInProgress);
        }

        if let Err(e) = self.host.attach_input_blockers() {
            BLOCKING.store(false, Ordering::SeqCst);
            return Err(e);
        }

        self.attached = true;
        Ok(())
    }

    /// Release the guard: clear the flag and detach the listener set.
    ///
    /// Never fails; a detach error is logged and the guard still counts as
    /// released.
    pub fn release(&mut self) {
        if !self.attached {
            return;
        }

        BLOCKING.store(false, Ordering::SeqCst);

        if let Err(e) = self.host.detach_input_blockers() {
            log::debug!("Failed to detach input blockers: {}", e);
        }
        self.attached = false;
    }

    /// Whether any traversal currently holds the process-wide flag
    pub fn is_engaged() -> bool {
        BLOCKING.load(Ordering::SeqCst)
    }
}

impl<H: HostUi> Drop for InputGuard<'_, H> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Serializes tests that touch the process-wide BLOCKING flag
#[cfg(test)]
pub(crate) fn exclusive() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
