//! Caller-facing resolution of hotspot activity.
//!
//! The viewer never calls into the embedding application directly. Click
//! handling produces [`Action`]s, and the host hands them to
//! [`HostBindings::apply`], which routes each one to the caller's navigation
//! callback, a handler from the caller's [`HandlerRegistry`], or the
//! blocking [`Notifier`].

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::consts::UNCONFIGURED_NOTICE_PREFIX;

/// Outcome of a click for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The caller should transition to `scene_id`. The viewer itself never
    /// switches scenes.
    HotspotActivated { scene_id: String },
    /// Run the caller's handler registered under `handler`.
    InvokeHandler { handler: String, hotspot: String },
    /// The hotspot has nothing configured; tell the user.
    Notice { hotspot: String },
}

/// Sink for blocking, user-facing notices.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// A caller handler. Receives the name of the hotspot that fired it.
pub type HandlerFn = Rc<dyn Fn(&str)>;

/// Lookup table from handler id to caller callback.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerFn>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `id`, replacing any previous handler.
    pub fn register(&mut self, id: impl Into<String>, handler: impl Fn(&str) + 'static) {
        self.handlers.insert(id.into(), Rc::new(handler));
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, handler: impl Fn(&str) + 'static) -> Self {
        self.register(id, handler);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Run handler `id` for `hotspot`. Returns `false` when none is registered.
    pub fn invoke(&self, id: &str, hotspot: &str) -> bool {
        match self.handlers.get(id) {
            Some(handler) => {
                handler(hotspot);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("HandlerRegistry").field("handlers", &ids).finish()
    }
}

/// Everything the caller supplied for reacting to hotspots.
pub struct HostBindings {
    on_hotspot_activated: Option<Rc<dyn Fn(&str)>>,
    handlers: HandlerRegistry,
    notifier: Rc<dyn Notifier>,
}

impl HostBindings {
    #[must_use]
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self { on_hotspot_activated: None, handlers: HandlerRegistry::new(), notifier }
    }

    /// Set the callback receiving target scene ids.
    #[must_use]
    pub fn on_hotspot_activated(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_hotspot_activated = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    /// Route each action to the caller, in order.
    pub fn apply(&self, actions: Vec<Action>) {
        for action in actions {
            self.apply_one(action);
        }
    }

    fn apply_one(&self, action: Action) {
        match action {
            Action::HotspotActivated { scene_id } => match &self.on_hotspot_activated {
                Some(callback) => callback(&scene_id),
                None => log::debug!("hotspot requested scene `{scene_id}` but no callback is attached"),
            },
            Action::InvokeHandler { handler, hotspot } => {
                if !self.handlers.invoke(&handler, &hotspot) {
                    log::warn!("hotspot `{hotspot}` references unregistered handler `{handler}`");
                    self.notifier.notify(&unregistered_handler_notice(&handler, &hotspot));
                }
            }
            Action::Notice { hotspot } => self.notifier.notify(&unconfigured_notice(&hotspot)),
        }
    }
}

impl fmt::Debug for HostBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBindings")
            .field("on_hotspot_activated", &self.on_hotspot_activated.is_some())
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// Notice text for a hotspot with neither an action nor a target scene.
#[must_use]
pub fn unconfigured_notice(hotspot: &str) -> String {
    format!("{UNCONFIGURED_NOTICE_PREFIX}{hotspot}")
}

fn unregistered_handler_notice(handler: &str, hotspot: &str) -> String {
    format!("No handler `{handler}` registered for hotspot: {hotspot}")
}
