//! Capability contract of the external rendering engine.
//!
//! The engine is a black box. The viewer needs exactly three things from it:
//! a way to construct an instance on a target surface ([`EngineFactory`]),
//! a handful of operations on that instance ([`EngineInstance`]), and access
//! to the rendered surface so it can be inspected and removed
//! ([`RenderSurface`]).
//!
//! Engine events flow the other way through an [`EventMailbox`]. The binding
//! posts into it from whatever callback the engine invokes, and the host
//! drains it on a later scheduling turn. Nothing is ever delivered to the
//! viewer from inside an engine call, so the engine's own event machinery is
//! never re-entered while it is dispatching.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::error::EngineError;
use crate::scene::{HotspotRegion, SceneConfig, SurfaceSize};

/// Identifies one engine instance within a viewer.
///
/// Ids increase with every construction, so an event tagged with an older id
/// came from an instance that has since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creates engine instances bound to a host surface.
pub trait EngineFactory {
    type Instance: EngineInstance;

    /// Construct an instance on the element with id `target`.
    ///
    /// The instance must tag every event it posts with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Construct`] when the engine refuses.
    fn construct(&mut self, id: InstanceId, target: &str, scene: &SceneConfig) -> Result<Self::Instance, EngineError>;
}

/// Operations the viewer performs on a live instance.
pub trait EngineInstance {
    type Surface: RenderSurface;

    /// Register an interactive region keyed by `name`. A second region with
    /// the same name replaces the first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Region`] when the engine rejects the region.
    fn add_hotspot(&mut self, name: &str, region: &HotspotRegion) -> Result<(), EngineError>;

    /// Replace the displayed content.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Content`] when the engine rejects the content.
    fn set_content(&mut self, scene: &SceneConfig) -> Result<(), EngineError>;

    /// The surface the instance renders into.
    fn surface(&self) -> &Self::Surface;
}

/// The rendered output of an instance.
pub trait RenderSurface {
    /// Whether the rendered document contains the diagnostics marker element.
    /// `None` when the document exists but cannot be inspected.
    fn has_diagnostics_marker(&self) -> Option<bool>;

    /// Current rendered dimensions, if the surface is still attached.
    fn rendered_size(&self) -> Option<SurfaceSize>;

    /// Remove the surface from its host container. Detaching a surface that
    /// is already detached is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Surface`] when removal fails.
    fn detach(&self) -> Result<(), EngineError>;
}

/// What the engine reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEventKind {
    /// The instance finished initializing.
    Ready,
    /// A region was clicked. `id` is the region name.
    Click { id: String },
}

/// An event posted by one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub instance: InstanceId,
    pub kind: EngineEventKind,
}

impl EngineEvent {
    #[must_use]
    pub fn ready(instance: InstanceId) -> Self {
        Self { instance, kind: EngineEventKind::Ready }
    }

    #[must_use]
    pub fn click(instance: InstanceId, id: impl Into<String>) -> Self {
        Self { instance, kind: EngineEventKind::Click { id: id.into() } }
    }
}

/// Single-threaded queue of engine events awaiting the host's next turn.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct EventMailbox {
    queue: Rc<RefCell<VecDeque<EngineEvent>>>,
    waker: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl EventMailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the callback invoked after every post. The host uses it to
    /// schedule a drain.
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.waker.borrow_mut() = Some(Rc::new(waker));
    }

    /// Remove the waker. Events posted afterwards are queued silently.
    pub fn clear_waker(&self) {
        self.waker.borrow_mut().take();
    }

    /// Queue an event and wake the host.
    pub fn post(&self, event: EngineEvent) {
        self.queue.borrow_mut().push_back(event);
        // Clone out so the waker may touch the mailbox.
        let waker = self.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }
    }

    /// Take every queued event, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<EngineEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl fmt::Debug for EventMailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMailbox")
            .field("queued", &self.len())
            .field("has_waker", &self.waker.borrow().is_some())
            .finish()
    }
}
