//! Viewer host component bridging Leptos state to the `viewer` crate.
//!
//! SYSTEM CONTEXT
//! ==============
//! `VrviewHost` renders the target element and, on hydration, owns one
//! `viewer::viewer::Viewer`. Everything imperative happens here:
//!
//! - mount once the element exists, then construct when this host's own
//!   page-load future resolves;
//! - drain engine events from the mailbox on a zero-delay timeout and route
//!   the resulting actions through `HostBindings`;
//! - turn every scene change into a deferred sync scheduled one turn later;
//! - re-create the instance whenever `debug_toggle_seq` moves;
//! - tear down on cleanup, cancelling the readiness wait and both timers.
//!
//! Engine failures reaching this boundary are logged; the viewer has already
//! left itself in a consistent state.

use leptos::prelude::*;
use viewer::bindings::HandlerRegistry;
use viewer::scene::SceneConfig;
use viewer::viewer::ViewerOptions;

#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use futures::channel::oneshot;
#[cfg(feature = "hydrate")]
use viewer::bindings::HostBindings;
#[cfg(feature = "hydrate")]
use viewer::engine::EventMailbox;
#[cfg(feature = "hydrate")]
use viewer::viewer::{SyncTicket, Viewer};
#[cfg(feature = "hydrate")]
use viewer::vrview::VrviewFactory;

#[cfg(feature = "hydrate")]
use crate::state::ui::ViewerUiState;
#[cfg(feature = "hydrate")]
use crate::util::defer::DeferSlot;
#[cfg(feature = "hydrate")]
use crate::util::host_ready::wait_for_page_load;
#[cfg(feature = "hydrate")]
use crate::util::notice::AlertNotifier;

#[cfg(feature = "hydrate")]
struct HostRuntime {
    viewer: RefCell<Viewer<VrviewFactory>>,
    mailbox: EventMailbox,
    bindings: HostBindings,
    drain: RefCell<DeferSlot>,
    sync: RefCell<DeferSlot>,
    cancel_ready: RefCell<Option<oneshot::Sender<()>>>,
}

#[cfg(feature = "hydrate")]
impl HostRuntime {
    fn new(options: ViewerOptions, scene: SceneConfig, bindings: HostBindings) -> Rc<Self> {
        let mailbox = EventMailbox::new();
        let factory = VrviewFactory::new(mailbox.clone(), options.diagnostics_marker_id.clone());
        let runtime = Rc::new(Self {
            viewer: RefCell::new(Viewer::new(options, factory, scene)),
            mailbox,
            bindings,
            drain: RefCell::default(),
            sync: RefCell::default(),
            cancel_ready: RefCell::new(None),
        });
        let weak = Rc::downgrade(&runtime);
        runtime.mailbox.set_waker(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.schedule_drain();
            }
        });
        runtime
    }

    fn start(self: &Rc<Self>) {
        self.viewer.borrow_mut().mount();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        *self.cancel_ready.borrow_mut() = Some(cancel_tx);
        let weak = Rc::downgrade(self);
        leptos::task::spawn_local(async move {
            if !wait_for_page_load(cancel_rx).await {
                return;
            }
            if let Some(runtime) = weak.upgrade() {
                runtime.cancel_ready.borrow_mut().take();
                runtime.host_ready();
            }
        });
    }

    fn host_ready(&self) {
        let result = self.viewer.borrow_mut().host_ready();
        match result {
            Ok(Some(instance)) => log::debug!("viewer instance {instance} constructed"),
            Ok(None) => {}
            Err(err) => log::error!("viewer construction failed: {err}"),
        }
    }

    fn schedule_drain(self: &Rc<Self>) {
        if self.drain.borrow().is_pending() {
            return;
        }
        let weak = Rc::downgrade(self);
        self.drain.borrow_mut().schedule(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.drain.borrow_mut().fired();
                runtime.drain_events();
            }
        });
    }

    fn drain_events(&self) {
        loop {
            let events = self.mailbox.drain();
            if events.is_empty() {
                break;
            }
            for event in events {
                let result = self.viewer.borrow_mut().handle_event(event);
                match result {
                    Ok(actions) => self.bindings.apply(actions),
                    Err(err) => log::error!("viewer event handling failed: {err}"),
                }
            }
        }
    }

    fn scene_changed(self: &Rc<Self>, scene: SceneConfig) {
        let ticket = self.viewer.borrow_mut().on_scene_config_change(scene);
        let weak = Rc::downgrade(self);
        self.sync.borrow_mut().schedule(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.sync.borrow_mut().fired();
                runtime.run_sync(ticket);
            }
        });
    }

    fn run_sync(&self, ticket: SyncTicket) {
        let result = self.viewer.borrow_mut().run_deferred(ticket);
        match result {
            Ok(outcome) => log::debug!("scene sync: {outcome:?}"),
            Err(err) => log::error!("scene sync failed: {err}"),
        }
    }

    fn toggle_debug(&self) {
        let result = self.viewer.borrow_mut().toggle_debug();
        match result {
            Ok(outcome) => log::debug!("debug toggle: {outcome:?}"),
            Err(err) => log::error!("debug toggle failed: {err}"),
        }
    }

    fn teardown(&self) {
        if let Some(cancel) = self.cancel_ready.borrow_mut().take() {
            let _ = cancel.send(());
        }
        self.sync.borrow_mut().cancel();
        self.drain.borrow_mut().cancel();
        self.mailbox.clear_waker();
        self.viewer.borrow_mut().teardown();
    }
}

/// Embedded panoramic viewer.
///
/// `scene` is observed for content changes; `on_hotspot` receives the target
/// scene id of activated hotspots; `handlers` resolves `callback` hotspot
/// actions; every change of `debug_toggle_seq` flips the diagnostics overlay.
#[component]
pub fn VrviewHost(
    #[prop(into)] scene: Signal<SceneConfig>,
    #[prop(into)] debug_toggle_seq: Signal<u64>,
    #[prop(optional)] on_hotspot: Option<Callback<String>>,
    #[prop(optional)] handlers: HandlerRegistry,
    #[prop(optional)] options: ViewerOptions,
) -> impl IntoView {
    let target = options.target_surface_id.clone();
    let host_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        let ui = use_context::<RwSignal<ViewerUiState>>();
        let mut bindings = HostBindings::new(Rc::new(AlertNotifier::new(ui))).with_handlers(handlers);
        if let Some(callback) = on_hotspot {
            bindings = bindings.on_hotspot_activated(move |scene_id| callback.run(scene_id.to_string()));
        }
        let runtime = HostRuntime::new(options, scene.get_untracked(), bindings);
        let stored = StoredValue::new_local(Rc::clone(&runtime));

        let mount_runtime = Rc::clone(&runtime);
        let started = Cell::new(false);
        Effect::new(move || {
            if host_ref.get().is_none() || started.replace(true) {
                return;
            }
            mount_runtime.start();
        });

        let scene_runtime = Rc::clone(&runtime);
        Effect::new(move || {
            let next = scene.get();
            if *scene_runtime.viewer.borrow().scene() == next {
                return;
            }
            scene_runtime.scene_changed(next);
        });

        let toggle_runtime = Rc::clone(&runtime);
        let seen_seq = Cell::new(debug_toggle_seq.get_untracked());
        Effect::new(move || {
            let seq = debug_toggle_seq.get();
            if seen_seq.replace(seq) == seq {
                return;
            }
            toggle_runtime.toggle_debug();
        });

        on_cleanup(move || {
            if stored.try_with_value(|runtime| runtime.teardown()).is_none() {
                log::debug!("viewer host already disposed at cleanup");
            }
        });
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scene, debug_toggle_seq, on_hotspot, handlers, options);
    }

    view! {
        <div id=target class="vrview-host" node_ref=host_ref></div>
    }
}
