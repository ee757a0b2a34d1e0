//! Client-side reactive state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each state struct is wrapped in an `RwSignal` and provided through Leptos
//! context by `App`. `tour` is the caller-side scene graph; `ui` carries
//! viewer chrome such as the debug toggle counter.

pub mod tour;
pub mod ui;
