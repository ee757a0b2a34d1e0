//! Shared identifiers for the viewer crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default id of the host element the engine embeds its surface into.
pub const DEFAULT_TARGET_SURFACE_ID: &str = "vrview";

/// Id of the element the engine renders into its document when the
/// diagnostics overlay is enabled.
pub const DEFAULT_DIAGNOSTICS_MARKER_ID: &str = "stats";

// ── Hotspots ────────────────────────────────────────────────────

/// Region radius used when a hotspot descriptor omits one.
pub const DEFAULT_HOTSPOT_RADIUS: f64 = 0.05;

/// Region distance used when a hotspot descriptor omits one.
pub const DEFAULT_HOTSPOT_DISTANCE: f64 = 1.0;

// ── Engine events ───────────────────────────────────────────────

/// Fired once per instance when it has finished initializing.
pub const EVENT_READY: &str = "ready";

/// Fired with `{ id }` when an interactive region is clicked.
pub const EVENT_CLICK: &str = "click";

// ── Notices ─────────────────────────────────────────────────────

/// Prefix of the notice shown for a hotspot with no action configured.
pub const UNCONFIGURED_NOTICE_PREFIX: &str = "No scene defined for hotspot: ";
