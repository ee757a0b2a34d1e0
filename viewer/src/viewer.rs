//! Viewer lifecycle manager.
//!
//! [`Viewer`] owns at most one engine instance and everything attached to it.
//! The host drives it with explicit inputs:
//!
//! 1. [`Viewer::mount`] when the component mounts, then [`Viewer::host_ready`]
//!    once the page has loaded. Only then is the instance constructed.
//! 2. [`Viewer::handle_event`] for every engine event drained from the
//!    mailbox. `Ready` binds hotspots; `Click` returns [`Action`]s.
//! 3. [`Viewer::on_scene_config_change`] when the caller supplies new scene
//!    data. The returned [`SyncTicket`] is run with
//!    [`Viewer::run_deferred`] on the next scheduling turn.
//! 4. [`Viewer::toggle_debug`] to re-create the instance with the
//!    diagnostics overlay flipped.
//! 5. [`Viewer::teardown`] when the component unmounts.
//!
//! Every engine access is behind an existence check. A viewer without an
//! instance answers with a not-ready outcome and makes no engine calls.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use log::{debug, info, warn};

use crate::bindings::Action;
use crate::consts::{DEFAULT_DIAGNOSTICS_MARKER_ID, DEFAULT_TARGET_SURFACE_ID};
use crate::debug::{self, DebugMode};
use crate::engine::{EngineEvent, EngineEventKind, EngineFactory, EngineInstance, InstanceId, RenderSurface};
use crate::error::{EngineError, ViewerError};
use crate::hotspot::{ClickDispatcher, clear_click_handlers, load_hotspots};
use crate::scene::{SceneConfig, SceneOverrides};

/// Per-viewer identifiers. Distinct ids let several viewers share a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Id of the host element the engine embeds into.
    pub target_surface_id: String,
    /// Id of the element the engine renders when the overlay is on.
    pub diagnostics_marker_id: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            target_surface_id: DEFAULT_TARGET_SURFACE_ID.to_string(),
            diagnostics_marker_id: DEFAULT_DIAGNOSTICS_MARKER_ID.to_string(),
        }
    }
}

/// Where the viewer is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, not yet mounted.
    Unmounted,
    /// Mounted; waiting for the host page to finish loading.
    AwaitingHost,
    /// The host is ready and construction has been attempted.
    Live,
    /// Torn down. Every further input is ignored.
    TornDown,
}

/// Handle for one deferred content sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncTicket(u64);

/// Result of running a deferred content sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Content replaced and this many hotspots bound.
    Applied { hotspots: usize },
    /// The instance has not reported ready; the latest content is applied
    /// when it does.
    AwaitingReady,
    /// No instance exists yet. Nothing was touched.
    NotReady,
    /// A newer change was issued after this ticket.
    Superseded,
    /// The viewer was torn down before the ticket ran.
    Cancelled,
}

/// Result of a debug toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The instance was replaced.
    Toggled { from: DebugMode, to: DebugMode, instance: InstanceId },
    /// No instance exists to toggle.
    NotReady,
}

/// One constructed engine instance plus everything bound to it.
///
/// Releasing clears the click observers and detaches the surface. It happens
/// on every replacement path and, failing that, on drop.
struct LiveInstance<I: EngineInstance> {
    id: InstanceId,
    engine: I,
    dispatcher: ClickDispatcher,
    ready: bool,
    debug: DebugMode,
    /// What the engine is currently displaying.
    displayed: SceneConfig,
    released: bool,
}

impl<I: EngineInstance> LiveInstance<I> {
    fn new(id: InstanceId, engine: I, displayed: SceneConfig) -> Self {
        Self {
            id,
            engine,
            dispatcher: ClickDispatcher::new(),
            ready: false,
            debug: DebugMode::from_flag(displayed.is_debug),
            displayed,
            released: false,
        }
    }

    fn show(&mut self, scene: &SceneConfig) -> Result<(), EngineError> {
        self.engine.set_content(scene)?;
        self.displayed = scene.clone();
        Ok(())
    }

    fn rebind(&mut self, scene: &SceneConfig) -> Result<usize, EngineError> {
        self.dispatcher.clear();
        let duplicates = scene.duplicate_hotspot_names();
        if !duplicates.is_empty() {
            warn!("scene `{}` repeats hotspot names {duplicates:?}; later regions replace earlier ones", scene.id);
        }
        let bound = load_hotspots(&mut self.engine, &mut self.dispatcher, Some(scene.hotspots.as_slice()))?;
        debug!("instance {} bound {bound} hotspots for scene `{}`", self.id, scene.id);
        Ok(bound)
    }

    fn release(&mut self) -> Result<(), EngineError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        let cleared = self.dispatcher.clear();
        debug!("releasing instance {} ({cleared} click observers)", self.id);
        self.engine.surface().detach()
    }
}

impl<I: EngineInstance> Drop for LiveInstance<I> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("instance {} surface not released: {err}", self.id);
        }
    }
}

/// Lifecycle manager for one embedded viewer.
pub struct Viewer<F: EngineFactory> {
    options: ViewerOptions,
    factory: F,
    scene: SceneConfig,
    overrides: SceneOverrides,
    phase: Phase,
    instance: Option<LiveInstance<F::Instance>>,
    last_instance: u64,
    last_ticket: u64,
    pending: Option<SyncTicket>,
}

impl<F: EngineFactory> Viewer<F> {
    #[must_use]
    pub fn new(options: ViewerOptions, factory: F, scene: SceneConfig) -> Self {
        Self {
            options,
            factory,
            scene,
            overrides: SceneOverrides::default(),
            phase: Phase::Unmounted,
            instance: None,
            last_instance: 0,
            last_ticket: 0,
            pending: None,
        }
    }

    // --- Lifecycle inputs ---

    /// The component mounted. Construction waits for [`Self::host_ready`].
    pub fn mount(&mut self) {
        if self.phase == Phase::Unmounted {
            debug!("viewer #{} mounted; awaiting host", self.options.target_surface_id);
            self.phase = Phase::AwaitingHost;
        } else {
            debug!("mount ignored in phase {:?}", self.phase);
        }
    }

    /// The host page finished loading: construct the instance.
    ///
    /// Only the first call after [`Self::mount`] constructs. Returns the new
    /// instance id, or `None` when the call was ignored.
    ///
    /// # Errors
    ///
    /// Propagates engine construction failure. It is not retried.
    pub fn host_ready(&mut self) -> Result<Option<InstanceId>, ViewerError> {
        if self.phase != Phase::AwaitingHost {
            debug!("host ready ignored in phase {:?}", self.phase);
            return Ok(None);
        }
        self.phase = Phase::Live;
        Ok(Some(self.install()?))
    }

    /// Process one event drained from the engine mailbox.
    ///
    /// Events from any instance other than the current one are dropped.
    ///
    /// # Errors
    ///
    /// Propagates engine failures while applying content or binding
    /// hotspots on `Ready`.
    pub fn handle_event(&mut self, event: EngineEvent) -> Result<Vec<Action>, ViewerError> {
        let Some(live) = self.instance.as_mut() else {
            debug!("dropping {:?} from {}: no instance", event.kind, event.instance);
            return Ok(Vec::new());
        };
        if live.id != event.instance {
            debug!("dropping {:?} from replaced instance {}", event.kind, event.instance);
            return Ok(Vec::new());
        }

        match event.kind {
            EngineEventKind::Ready => {
                if live.ready {
                    debug!("instance {} reported ready twice", live.id);
                    return Ok(Vec::new());
                }
                live.ready = true;
                live.debug = debug::reconcile(live.debug, live.engine.surface());
                let effective = self.scene.derive(&self.overrides);
                if live.displayed != effective {
                    live.show(&effective)?;
                }
                live.rebind(&effective)?;
                info!("instance {} ready on #{}", live.id, self.options.target_surface_id);
                Ok(Vec::new())
            }
            EngineEventKind::Click { id } => {
                if !live.ready {
                    debug!("click on `{id}` before instance {} was ready", live.id);
                    return Ok(Vec::new());
                }
                let actions = live.dispatcher.dispatch(&id);
                if actions.is_empty() {
                    debug!("click on `{id}` matches no bound hotspot");
                }
                Ok(actions)
            }
        }
    }

    /// The caller supplied new scene data.
    ///
    /// The config is recorded now; the engine is touched only when the
    /// returned ticket is run on a later turn. Issuing a ticket supersedes
    /// any earlier one.
    pub fn on_scene_config_change(&mut self, scene: SceneConfig) -> SyncTicket {
        self.scene = scene;
        self.last_ticket += 1;
        let ticket = SyncTicket(self.last_ticket);
        if self.phase == Phase::TornDown {
            debug!("scene change after teardown will not be applied");
        } else {
            self.pending = Some(ticket);
        }
        ticket
    }

    /// Run a deferred content sync: clear click observers, replace the
    /// displayed content, rebind hotspots.
    ///
    /// # Errors
    ///
    /// Propagates engine failures from content replacement or binding.
    pub fn run_deferred(&mut self, ticket: SyncTicket) -> Result<SyncOutcome, ViewerError> {
        if self.phase == Phase::TornDown {
            return Ok(SyncOutcome::Cancelled);
        }
        if self.pending != Some(ticket) {
            return Ok(SyncOutcome::Superseded);
        }
        self.pending = None;

        clear_click_handlers(self.instance.as_mut().map(|live| &mut live.dispatcher));
        let Some(live) = self.instance.as_mut() else {
            debug!("scene `{}` recorded; no instance yet", self.scene.id);
            return Ok(SyncOutcome::NotReady);
        };
        if !live.ready {
            debug!("instance {} not ready; scene `{}` applies on ready", live.id, self.scene.id);
            return Ok(SyncOutcome::AwaitingReady);
        }

        let effective = self.scene.derive(&self.overrides);
        live.show(&effective)?;
        let hotspots = live.rebind(&effective)?;
        Ok(SyncOutcome::Applied { hotspots })
    }

    /// Re-create the instance with the diagnostics overlay flipped, keeping
    /// its rendered size.
    ///
    /// The old surface is removed before the new instance is constructed on
    /// the same target. Callers observe a single step.
    ///
    /// # Errors
    ///
    /// Propagates failure to detach the old surface or to construct the new
    /// instance. The viewer is left without an instance in either case.
    pub fn toggle_debug(&mut self) -> Result<ToggleOutcome, ViewerError> {
        let Some(mut old) = self.instance.take() else {
            debug!("debug toggle ignored: no instance");
            return Ok(ToggleOutcome::NotReady);
        };

        old.dispatcher.clear();
        let plan = debug::plan_toggle(old.debug, old.engine.surface(), &self.overrides);
        self.overrides = plan.overrides;
        old.release()?;
        drop(old);

        let instance = self.install()?;
        info!("debug overlay {:?} -> {:?} (instance {instance})", plan.from, plan.to);
        Ok(ToggleOutcome::Toggled { from: plan.from, to: plan.to, instance })
    }

    /// The component is going away: cancel deferred work and release the
    /// instance. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.phase = Phase::TornDown;
        self.pending = None;
        if let Some(mut live) = self.instance.take() {
            if let Err(err) = live.release() {
                warn!("teardown could not detach instance {}: {err}", live.id);
            }
        }
        info!("viewer #{} torn down", self.options.target_surface_id);
    }

    fn install(&mut self) -> Result<InstanceId, EngineError> {
        self.last_instance += 1;
        let id = InstanceId(self.last_instance);
        let effective = self.scene.derive(&self.overrides);
        let engine = self.factory.construct(id, &self.options.target_surface_id, &effective)?;
        debug!("constructed instance {id} for scene `{}`", effective.id);
        self.instance = Some(LiveInstance::new(id, engine, effective));
        Ok(id)
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    #[must_use]
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.instance.as_ref().map(|live| live.id)
    }

    /// Whether the current instance has reported ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.instance.as_ref().is_some_and(|live| live.ready)
    }

    /// Click observers currently attached.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.instance.as_ref().map_or(0, |live| live.dispatcher.len())
    }

    /// Declared overlay state of the current instance.
    #[must_use]
    pub fn debug_mode(&self) -> Option<DebugMode> {
        self.instance.as_ref().map(|live| live.debug)
    }

    /// Overlay state read off the current instance's rendered output. `None`
    /// without an instance or when the output cannot be read.
    #[must_use]
    pub fn detected_debug_mode(&self) -> Option<DebugMode> {
        self.instance.as_ref().and_then(|live| debug::detect(live.engine.surface()))
    }

    /// The caller's latest scene config.
    #[must_use]
    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// The config the engine is given: the caller's plus the viewer's overrides.
    #[must_use]
    pub fn effective_scene(&self) -> SceneConfig {
        self.scene.derive(&self.overrides)
    }

    /// A deferred sync waiting to run, if any.
    #[must_use]
    pub fn pending_sync(&self) -> Option<SyncTicket> {
        self.pending
    }

    /// Whether the current instance's surface reports a size, i.e. is attached.
    #[must_use]
    pub fn has_attached_surface(&self) -> bool {
        self.instance.as_ref().is_some_and(|live| live.engine.surface().rendered_size().is_some())
    }
}
