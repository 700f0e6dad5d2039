#![forbid(unsafe_code)]

//! Presenter: applies frames to a display.

use crate::diff::FrameDiff;
use crate::frame::{Frame, Patch};

/// A display that presentation patches can be applied to.
///
/// Implementations only need [`apply`](Presenter::apply). Patches addressed to
/// elements the display does not have must be skipped silently: a missing
/// element means that part of the page is simply not rendered.
pub trait Presenter {
    /// Failure raised by the display itself (not by missing elements).
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Apply one patch.
    fn apply(&mut self, patch: &Patch) -> Result<(), Self::Error>;

    /// Present `frame`: every patch when `diff` is `None` (full repaint),
    /// otherwise only the patches the diff selects. Returns how many patches
    /// were applied.
    fn present(&mut self, frame: &Frame, diff: Option<&FrameDiff>) -> Result<usize, Self::Error> {
        let mut applied = 0;
        match diff {
            Some(diff) => {
                for patch in diff.patches(frame) {
                    self.apply(patch)?;
                    applied += 1;
                }
            }
            None => {
                for patch in frame.patches() {
                    self.apply(patch)?;
                    applied += 1;
                }
            }
        }
        Ok(applied)
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    type Error = P::Error;

    fn apply(&mut self, patch: &Patch) -> Result<(), Self::Error> {
        (**self).apply(patch)
    }
}
