//! Recording engine double shared by the native test suites.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::engine::{EngineFactory, EngineInstance, InstanceId, RenderSurface};
use crate::error::EngineError;
use crate::scene::{HotspotRegion, SceneConfig, SurfaceSize};

/// One call the viewer made into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Construct { instance: InstanceId, target: String, scene: SceneConfig },
    AddHotspot { instance: InstanceId, name: String, region: HotspotRegion },
    SetContent { instance: InstanceId, scene: SceneConfig },
    Detach { instance: InstanceId },
}

/// Shared call log plus failure switches.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub calls: Vec<Call>,
    pub fail_construct: bool,
    pub fail_region: Option<String>,
    pub fail_content: bool,
    /// Overrides what the surface renders, regardless of the debug flag.
    pub forced_marker: Option<bool>,
    /// Surfaces built while set hide their document, like a cross-origin iframe.
    pub unreadable_marker: bool,
}

impl EngineLog {
    pub fn constructs(&self) -> Vec<(InstanceId, SceneConfig)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Construct { instance, scene, .. } => Some((*instance, scene.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn hotspots_added(&self, instance: InstanceId) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::AddHotspot { instance: i, name, .. } if *i == instance => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn content_sets(&self) -> Vec<(InstanceId, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetContent { instance, scene } => Some((*instance, scene.id.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn detached(&self) -> Vec<InstanceId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Detach { instance } => Some(*instance),
                _ => None,
            })
            .collect()
    }
}

pub type SharedLog = Rc<RefCell<EngineLog>>;

/// Surface size reported when the scene does not specify one.
pub const FAKE_DEFAULT_WIDTH: &str = "100%";
pub const FAKE_DEFAULT_HEIGHT: &str = "300";

#[derive(Debug, Default)]
pub struct FakeFactory {
    pub log: SharedLog,
}

impl FakeFactory {
    pub fn new() -> (Self, SharedLog) {
        let log = SharedLog::default();
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl EngineFactory for FakeFactory {
    type Instance = FakeInstance;

    fn construct(&mut self, id: InstanceId, target: &str, scene: &SceneConfig) -> Result<FakeInstance, EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_construct {
            return Err(EngineError::Construct { target: target.to_string(), message: "refused".into() });
        }
        log.calls.push(Call::Construct { instance: id, target: target.to_string(), scene: scene.clone() });
        let marker = (!log.unreadable_marker).then(|| log.forced_marker.unwrap_or(scene.is_debug == Some(true)));
        let size = SurfaceSize {
            width: scene.width.clone().unwrap_or_else(|| FAKE_DEFAULT_WIDTH.to_string()),
            height: scene.height.clone().unwrap_or_else(|| FAKE_DEFAULT_HEIGHT.to_string()),
        };
        Ok(FakeInstance {
            id,
            log: Rc::clone(&self.log),
            surface: FakeSurface { id, log: Rc::clone(&self.log), marker, size, attached: Cell::new(true) },
        })
    }
}

#[derive(Debug)]
pub struct FakeInstance {
    id: InstanceId,
    log: SharedLog,
    surface: FakeSurface,
}

impl EngineInstance for FakeInstance {
    type Surface = FakeSurface;

    fn add_hotspot(&mut self, name: &str, region: &HotspotRegion) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_region.as_deref() == Some(name) {
            return Err(EngineError::Region { name: name.to_string(), message: "rejected".into() });
        }
        log.calls.push(Call::AddHotspot { instance: self.id, name: name.to_string(), region: *region });
        Ok(())
    }

    fn set_content(&mut self, scene: &SceneConfig) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_content {
            return Err(EngineError::Content("rejected".into()));
        }
        log.calls.push(Call::SetContent { instance: self.id, scene: scene.clone() });
        Ok(())
    }

    fn surface(&self) -> &FakeSurface {
        &self.surface
    }
}

#[derive(Debug)]
pub struct FakeSurface {
    id: InstanceId,
    log: SharedLog,
    marker: Option<bool>,
    size: SurfaceSize,
    attached: Cell<bool>,
}

impl RenderSurface for FakeSurface {
    fn has_diagnostics_marker(&self) -> Option<bool> {
        if self.attached.get() { self.marker } else { Some(false) }
    }

    fn rendered_size(&self) -> Option<SurfaceSize> {
        self.attached.get().then(|| self.size.clone())
    }

    fn detach(&self) -> Result<(), EngineError> {
        if self.attached.replace(false) {
            self.log.borrow_mut().calls.push(Call::Detach { instance: self.id });
        }
        Ok(())
    }
}
