#![forbid(unsafe_code)]

//! Render: the declarative output of a controller's `view`.
//!
//! A [`frame::Frame`] is a list of [`frame::Patch`]es addressed by
//! [`ElementKey`](vitrine_core::ElementKey). Frames are recomputed from state on
//! every render; [`diff::FrameDiff`] picks out what changed since the last
//! presented frame and a [`presenter::Presenter`] applies it to a display.

pub mod diff;
pub mod frame;
pub mod node;
pub mod presenter;
pub mod virtual_page;

pub use diff::FrameDiff;
pub use frame::{ClassList, Frame, Patch};
pub use node::Node;
pub use presenter::Presenter;
pub use virtual_page::VirtualPage;
