//! Browser helpers for the viewer host.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules isolate browser mechanics (page-load events, timers,
//! blocking dialogs) from the component so its wiring reads as lifecycle
//! steps.

pub mod defer;
pub mod host_ready;
pub mod notice;
