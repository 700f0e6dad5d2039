#![forbid(unsafe_code)]

//! Page controllers.
//!
//! Each controller is an independent [`Model`](vitrine_runtime::Model) that
//! owns a disjoint set of elements, identified by the role constants of its
//! module. Controllers are built from a
//! [`MarkupSource`](vitrine_core::markup::MarkupSource) and return `None`
//! when the elements they need are missing, so an incomplete page simply
//! loses that behavior.
//!
//! | Controller | Trigger | State |
//! |------------|---------|-------|
//! | [`NavChrome`] | window scroll | solid / overlay |
//! | [`HoverMenu`] | enter / leave / focus, 150 ms close delay | closed / open / closing |
//! | [`ToggleMenu`] | click, outside pointer-down | open / closed |
//! | [`CounterGroup`] | first visibility | eased count-up |
//! | [`Stepper`] | 3.5 s interval | active step |
//! | [`Showcase`] | tab click, strip scroll, resize | active category, arrows |
//! | [`SlideStack`] | prev / next / dot, 8 s interval | active slide, in flight |
//! | [`ServicePanel`] | option click | active service |

pub mod catalog;
pub mod counter;
pub mod cyclic;
pub mod hover_menu;
pub mod nav_chrome;
pub mod service_panel;
pub mod showcase;
pub mod slide_stack;
pub mod stepper;
pub mod toggle_menu;

pub use counter::{CounterGroup, CounterSpec};
pub use hover_menu::HoverMenu;
pub use nav_chrome::NavChrome;
pub use service_panel::ServicePanel;
pub use showcase::Showcase;
pub use slide_stack::SlideStack;
pub use stepper::Stepper;
pub use toggle_menu::ToggleMenu;
