//! `wasm-bindgen` binding to the `VRView.Player` engine.
//!
//! The player script is loaded by the host page and exposes a global
//! `VRView.Player(selector, options)` constructor. Each player renders into
//! an iframe it appends to the selected element. This module adapts that
//! API to the [`engine`](crate::engine) traits:
//!
//! - option objects are serialized with `serde_json` and parsed into JS;
//! - `ready` and `click` listeners post into an [`EventMailbox`] tagged
//!   with the instance id, and are kept alive by the instance;
//! - the iframe is the [`RenderSurface`].
//!
//! The diagnostics marker is looked up in the iframe's document. A player
//! served from another origin hides that document, so the overlay state is
//! unknown there.

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::HtmlIFrameElement;

use crate::consts::{EVENT_CLICK, EVENT_READY};
use crate::engine::{EngineEvent, EngineFactory, EngineInstance, EventMailbox, InstanceId, RenderSurface};
use crate::error::EngineError;
use crate::scene::{HotspotRegion, SceneConfig, SurfaceSize};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = VRView)]
    type Player;

    #[wasm_bindgen(catch, constructor, js_namespace = VRView)]
    fn new(selector: &str, options: &JsValue) -> Result<Player, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Player, event: &str, callback: &Function);

    #[wasm_bindgen(catch, method, js_name = addHotspot)]
    fn add_hotspot(this: &Player, name: &str, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = setContent)]
    fn set_content(this: &Player, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, getter)]
    fn iframe(this: &Player) -> HtmlIFrameElement;
}

/// Builds players on the host page.
pub struct VrviewFactory {
    mailbox: EventMailbox,
    marker_id: String,
}

impl VrviewFactory {
    /// Players built by this factory post their events into `mailbox`.
    #[must_use]
    pub fn new(mailbox: EventMailbox, marker_id: impl Into<String>) -> Self {
        Self { mailbox, marker_id: marker_id.into() }
    }
}

impl EngineFactory for VrviewFactory {
    type Instance = VrviewInstance;

    fn construct(&mut self, id: InstanceId, target: &str, scene: &SceneConfig) -> Result<VrviewInstance, EngineError> {
        let construct_error = |message: String| EngineError::Construct { target: target.to_string(), message };
        let options = to_js(&scene.player_options()).map_err(construct_error)?;
        let player = Player::new(&format!("#{target}"), &options).map_err(|err| construct_error(describe(&err)))?;

        let mailbox = self.mailbox.clone();
        let on_ready = Closure::wrap(Box::new(move || {
            mailbox.post(EngineEvent::ready(id));
        }) as Box<dyn FnMut()>);

        let mailbox = self.mailbox.clone();
        let on_click = Closure::wrap(Box::new(move |event: JsValue| match click_id(&event) {
            Some(hotspot) => mailbox.post(EngineEvent::click(id, hotspot)),
            None => log::warn!("instance {id} click event without a hotspot id"),
        }) as Box<dyn FnMut(JsValue)>);

        player.on(EVENT_READY, on_ready.as_ref().unchecked_ref());
        player.on(EVENT_CLICK, on_click.as_ref().unchecked_ref());

        let surface = IframeSurface { iframe: player.iframe(), marker_id: self.marker_id.clone() };
        log::debug!("player {id} created on #{target}");
        Ok(VrviewInstance { player, surface, _on_ready: on_ready, _on_click: on_click })
    }
}

/// One live player and the listeners it calls back into.
pub struct VrviewInstance {
    player: Player,
    surface: IframeSurface,
    _on_ready: Closure<dyn FnMut()>,
    _on_click: Closure<dyn FnMut(JsValue)>,
}

impl EngineInstance for VrviewInstance {
    type Surface = IframeSurface;

    fn add_hotspot(&mut self, name: &str, region: &HotspotRegion) -> Result<(), EngineError> {
        let region_error = |message: String| EngineError::Region { name: name.to_string(), message };
        let options = to_js(region).map_err(region_error)?;
        self.player.add_hotspot(name, &options).map_err(|err| region_error(describe(&err)))
    }

    fn set_content(&mut self, scene: &SceneConfig) -> Result<(), EngineError> {
        let options = to_js(&scene.player_options()).map_err(EngineError::Content)?;
        self.player.set_content(&options).map_err(|err| EngineError::Content(describe(&err)))
    }

    fn surface(&self) -> &IframeSurface {
        &self.surface
    }
}

/// The iframe a player renders into.
pub struct IframeSurface {
    iframe: HtmlIFrameElement,
    marker_id: String,
}

impl RenderSurface for IframeSurface {
    fn has_diagnostics_marker(&self) -> Option<bool> {
        if !self.iframe.is_connected() {
            return Some(false);
        }
        let doc = self.iframe.content_document()?;
        Some(doc.get_element_by_id(&self.marker_id).is_some())
    }

    fn rendered_size(&self) -> Option<SurfaceSize> {
        if !self.iframe.is_connected() {
            return None;
        }
        let width = non_empty(self.iframe.width()).unwrap_or_else(|| self.iframe.client_width().to_string());
        let height = non_empty(self.iframe.height()).unwrap_or_else(|| self.iframe.client_height().to_string());
        Some(SurfaceSize { width, height })
    }

    fn detach(&self) -> Result<(), EngineError> {
        let Some(parent) = self.iframe.parent_node() else {
            return Ok(());
        };
        parent
            .remove_child(&self.iframe)
            .map(|_removed| ())
            .map_err(|err| EngineError::Surface(describe(&err)))
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|err| err.to_string())?;
    js_sys::JSON::parse(&json).map_err(|err| describe(&err))
}

fn click_id(event: &JsValue) -> Option<String> {
    match Reflect::get(event, &JsValue::from_str("id")) {
        Ok(id) => id.as_string(),
        Err(err) => {
            log::debug!("click event has no readable id: {}", describe(&err));
            None
        }
    }
}

fn describe(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{err:?}"),
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
