//! Tour document loading.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the tour schema and its errors, `tour` fetches a tour
//! document over HTTP.

pub mod tour;
pub mod types;
