use crate::error::Result;
use crate::viewer::surface::DeckSurface;

/// Resolves "what slide am I on" and "how many slides exist" from the noisy
/// signals a [`DeckSurface`] exposes.
pub struct SlideLocator<'a, S: DeckSurface> {
    surface: &'a S,
}

impl<'a, S: DeckSurface> SlideLocator<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// Current slide position, 1-indexed.
    ///
    /// Resolution order: URL fragment token, then the ordinal attribute of the
    /// active slide surface, then 1. The fragment is authoritative only after
    /// navigation has settled; the ordinal reflects render state before the
    /// fragment updates.
    pub fn current_position(&self) -> Result<u32> {
        if let Some(position) = self.surface.fragment_position()? {
            return Ok(position);
        }
        if let Some(position) = self.surface.ordinal_position()? {
            return Ok(position);
        }
        Ok(1)
    }

    /// Total slide count, or `None` when undetected.
    ///
    /// Prefers the set size declared on the toolbar caption; falls back to
    /// counting rendered slide surfaces (which may undercount during lazy
    /// rendering). A count of 0 is reported as undetected, never coerced.
    pub fn total_slides(&self) -> Result<Option<u32>> {
        if let Some(declared) = self.surface.declared_total()? {
            return Ok(Some(declared).filter(|&n| n > 0));
        }

        let rendered = self.surface.rendered_count()?;
        Ok(Some(rendered).filter(|&n| n > 0))
    }
}
