#![forbid(unsafe_code)]

//! Vitrine public facade crate.
//!
//! Re-exports the types a host needs to mount and drive the page controllers,
//! plus a prelude for tests and small hosts.

// --- Core re-exports -------------------------------------------------------

pub use vitrine_core::markup::{MarkupSource, StaticMarkup};
pub use vitrine_core::{ElementKey, Event, ScrollMetrics};

// --- Render re-exports -----------------------------------------------------

pub use vitrine_render::{Frame, FrameDiff, Node, Patch, Presenter, VirtualPage};

// --- Runtime re-exports ----------------------------------------------------

pub use vitrine_runtime::{
    Backend, Cmd, HeadlessBackend, Model, ProgramSimulator, RuntimeError, StepProgram, StepResult,
};

// --- Widget re-exports -----------------------------------------------------

pub use vitrine_widgets::{
    CounterGroup, CounterSpec, HoverMenu, NavChrome, ServicePanel, Showcase, SlideStack, Stepper,
    ToggleMenu,
};

// --- Host re-exports -------------------------------------------------------

#[cfg(feature = "web")]
pub use vitrine_web::{Page, PageConfig, PageStep, Selectors, Timings, WebError as Error};

/// Standard result type for page-level APIs.
#[cfg(feature = "web")]
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cmd, ElementKey, Event, Frame, MarkupSource, Model, ProgramSimulator, ScrollMetrics,
        StaticMarkup, VirtualPage,
    };

    #[cfg(feature = "web")]
    pub use crate::{Error, Page, PageConfig, Result};

    pub use crate::{core, render, runtime, widgets};
}

pub use vitrine_core as core;
pub use vitrine_render as render;
pub use vitrine_runtime as runtime;
pub use vitrine_widgets as widgets;
