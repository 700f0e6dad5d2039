#![forbid(unsafe_code)]

//! Runtime: drives controllers through trigger → update → render cycles.
//!
//! The host owns the event loop. It pushes [`Event`](vitrine_core::Event)s,
//! advances a deterministic clock, and calls [`StepProgram::step`]; the
//! runtime fires due timers and interval subscriptions, runs `update`, and
//! presents the changed part of the recomputed view. Nothing blocks and no
//! threads are spawned, so the same code runs on `wasm32-unknown-unknown` and
//! under test.

pub mod backend;
pub mod program;
pub mod simulator;
pub mod step_program;
pub mod subscription;
pub mod timer;

pub use backend::{Backend, HeadlessBackend, ScrollRequest};
pub use program::{Cmd, Model, TimerId};
pub use simulator::ProgramSimulator;
pub use step_program::{DeterministicClock, RuntimeError, StepProgram, StepResult};
pub use subscription::{Every, SubId};
