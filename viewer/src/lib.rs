//! Lifecycle core for an embedded panoramic scene viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but the
//! lifecycle logic itself never touches the DOM. It owns the coordination
//! around one external rendering engine instance: deferring construction
//! until the host page is ready, keeping displayed content in step with the
//! caller's scene data, binding hotspot regions to a single click
//! dispatcher, and re-creating the instance when the diagnostics overlay is
//! toggled. The host UI layer (see the `client` crate) only wires browser
//! events and timers to the [`viewer::Viewer`] and processes the returned
//! [`bindings::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`viewer`] | Lifecycle manager: mount, content sync, toggle, teardown |
//! | [`hotspot`] | Hotspot binding and the shared [`hotspot::ClickDispatcher`] |
//! | [`debug`] | Diagnostics overlay state, detection and toggle planning |
//! | [`engine`] | Capability contract the rendering engine must satisfy |
//! | [`scene`] | Scene configuration and hotspot descriptors |
//! | [`bindings`] | Caller-facing action resolution (callbacks, notices) |
//! | [`vrview`] | `wasm-bindgen` binding to the `VRView.Player` engine |
//! | [`error`] | Error types |
//! | [`consts`] | Shared identifiers and event names |

pub mod bindings;
pub mod consts;
pub mod debug;
pub mod engine;
pub mod error;
pub mod hotspot;
pub mod scene;
pub mod viewer;
pub mod vrview;

#[cfg(test)]
mod fake;
