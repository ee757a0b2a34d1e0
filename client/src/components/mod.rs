//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `vrview_host` embeds the panoramic viewer and bridges Leptos reactivity to
//! the `viewer` lifecycle core; `debug_toggle` drives its overlay switch.

pub mod debug_toggle;
pub mod vrview_host;
