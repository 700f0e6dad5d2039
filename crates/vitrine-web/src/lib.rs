#![forbid(unsafe_code)]

//! Host layer for Vitrine.
//!
//! - [`config`]: selectors and timing constants, with JSON overrides.
//! - [`page`]: mounts every controller the markup supports onto one backend
//!   and drives them from a shared clock.
//! - `wasm` (wasm32 only): the live-document adapter exported to JavaScript as
//!   `VitrinePage`.
//!
//! Native builds get the same [`page::Page`] over a
//! [`HeadlessBackend`](vitrine_runtime::HeadlessBackend), which is what the
//! tests drive.

pub mod config;
pub mod error;
pub mod page;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::{PageConfig, Scope, Selector, Selectors, Timings};
pub use error::WebError;
pub use page::{Page, PageStep};

#[cfg(target_arch = "wasm32")]
pub use wasm::VitrinePage;

/// Native builds compile the browser entry point as a stub so workspace
/// checks stay green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct VitrinePage;

#[cfg(not(target_arch = "wasm32"))]
impl VitrinePage {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
