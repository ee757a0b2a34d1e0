//! Scene configuration: media reference, view options and hotspot descriptors.
//!
//! A [`SceneConfig`] is owned by the caller and treated as immutable by the
//! viewer. The only configuration the viewer ever produces is a derived copy
//! (see [`SceneConfig::derive`]) carrying the debug flag and rendered size it
//! needs when it re-creates the engine instance.
//!
//! Hotspot names are expected to be unique within a scene. The engine keys
//! regions by name, so a duplicate silently replaces the earlier region;
//! [`SceneConfig::duplicate_hotspot_names`] lets the binder warn about it.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DEFAULT_HOTSPOT_DISTANCE, DEFAULT_HOTSPOT_RADIUS};
use crate::error::ConfigError;

/// Externally supplied description of one scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Scene identifier, the value hotspots use as `target_scene_id`.
    pub id: String,
    /// What the engine displays and how.
    #[serde(default, alias = "scene")]
    pub media: SceneMedia,
    /// Whether the engine should render its diagnostics overlay.
    #[serde(default, alias = "isDebug", skip_serializing_if = "Option::is_none")]
    pub is_debug: Option<bool>,
    /// Rendered width, as the engine accepts it (`"640"`, `"100%"`).
    #[serde(default, deserialize_with = "dimension", skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Rendered height, as the engine accepts it.
    #[serde(default, deserialize_with = "dimension", skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Interactive regions, in binding order.
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// Media reference and view options passed through to the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stereo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_autopan_off: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_vr_off: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_yaw_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_yaw: Option<f64>,
}

/// A clickable region of the panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Region key; must be unique within the scene.
    pub name: String,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_distance")]
    pub distance: f64,
    /// Scene to request when the hotspot is activated.
    #[serde(
        default,
        alias = "idNewScene",
        alias = "targetSceneId",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_scene_id: Option<String>,
    /// Explicit action; takes priority over `target_scene_id`.
    #[serde(
        default,
        alias = "clickFn",
        alias = "inlineAction",
        deserialize_with = "hotspot_action",
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<HotspotAction>,
}

/// What happens when a hotspot is clicked.
///
/// This is a closed set. Caller code is reached only through a handler id
/// registered in [`crate::bindings::HandlerRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HotspotAction {
    /// Request a transition to another scene.
    Navigate { target: String },
    /// Invoke a handler the caller registered under this id.
    Callback { handler: String },
}

/// Spatial parameters of a region, as handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HotspotRegion {
    pub pitch: f64,
    pub yaw: f64,
    pub radius: f64,
    pub distance: f64,
}

/// Rendered dimensions as reported by the engine's surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: String,
    pub height: String,
}

/// Viewer-owned adjustments layered over the caller's config on
/// (re)construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneOverrides {
    pub debug: Option<bool>,
    pub size: Option<SurfaceSize>,
}

/// Option object handed to the engine for construction and content
/// replacement. Keys are the engine's snake_case names.
#[derive(Debug, Serialize)]
pub struct PlayerOptions<'a> {
    #[serde(flatten)]
    pub media: &'a SceneMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<&'a str>,
}

impl SceneConfig {
    /// Parse a scene from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the document is malformed.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// A copy of this config with the viewer's overrides applied.
    #[must_use]
    pub fn derive(&self, overrides: &SceneOverrides) -> Self {
        let mut derived = self.clone();
        if let Some(debug) = overrides.debug {
            derived.is_debug = Some(debug);
        }
        if let Some(size) = &overrides.size {
            derived.width = Some(size.width.clone());
            derived.height = Some(size.height.clone());
        }
        derived
    }

    /// Names that occur more than once in the hotspot list, each reported once.
    #[must_use]
    pub fn duplicate_hotspot_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for hotspot in &self.hotspots {
            let name = hotspot.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Look up a hotspot by name. With duplicates, the last one wins, as in
    /// the engine.
    #[must_use]
    pub fn hotspot(&self, name: &str) -> Option<&Hotspot> {
        self.hotspots.iter().rev().find(|h| h.name == name)
    }

    /// Engine-facing option object.
    #[must_use]
    pub fn player_options(&self) -> PlayerOptions<'_> {
        PlayerOptions {
            media: &self.media,
            is_debug: self.is_debug,
            width: self.width.as_deref(),
            height: self.height.as_deref(),
        }
    }
}

impl Hotspot {
    /// A hotspot at `(pitch, yaw)` with default radius and distance and no action.
    #[must_use]
    pub fn new(name: impl Into<String>, pitch: f64, yaw: f64) -> Self {
        Self {
            name: name.into(),
            pitch,
            yaw,
            radius: DEFAULT_HOTSPOT_RADIUS,
            distance: DEFAULT_HOTSPOT_DISTANCE,
            target_scene_id: None,
            action: None,
        }
    }

    #[must_use]
    pub fn region(&self) -> HotspotRegion {
        HotspotRegion { pitch: self.pitch, yaw: self.yaw, radius: self.radius, distance: self.distance }
    }
}

fn default_radius() -> f64 {
    DEFAULT_HOTSPOT_RADIUS
}

fn default_distance() -> f64 {
    DEFAULT_HOTSPOT_DISTANCE
}

/// Width/height arrive either as CSS strings or bare pixel numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Text(String),
    Number(f64),
}

fn dimension<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawDimension>::deserialize(deserializer)?.map(|raw| match raw {
        RawDimension::Text(text) => text,
        RawDimension::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
        RawDimension::Number(n) => n.to_string(),
    }))
}

/// The legacy inline-action string is read as a handler id, never as code.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAction {
    Typed(HotspotAction),
    Legacy(String),
}

fn hotspot_action<'de, D>(deserializer: D) -> Result<Option<HotspotAction>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawAction>::deserialize(deserializer)?.map(|raw| match raw {
        RawAction::Typed(action) => action,
        RawAction::Legacy(handler) => HotspotAction::Callback { handler },
    }))
}
