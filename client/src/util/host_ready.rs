//! Per-component page-load readiness.
//!
//! Each viewer host waits on its own future rather than sharing a global
//! `window.onload` slot, so several hosts on one page never overwrite each
//! other's hook. The wait is cancellable: the host keeps the sending half of
//! a oneshot channel and fires or drops it on cleanup, after which the
//! future resolves `false` and its `load` listener is removed.

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use futures::channel::oneshot;
#[cfg(feature = "hydrate")]
use futures::future::{Either, select};
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "hydrate")]
const LOAD_EVENT: &str = "load";

/// Resolve once the page has finished loading.
///
/// Returns `true` when the page is loaded (immediately if it already was)
/// and `false` when `cancel` fires or is dropped first, or when there is no
/// window to wait on.
#[cfg(feature = "hydrate")]
pub async fn wait_for_page_load(cancel: oneshot::Receiver<()>) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    if window
        .document()
        .is_some_and(|doc| doc.ready_state() == "complete")
    {
        return true;
    }

    let (loaded_tx, loaded_rx) = oneshot::channel::<()>();
    let loaded_tx = Rc::new(RefCell::new(Some(loaded_tx)));
    let on_load = Closure::wrap(Box::new(move || {
        if let Some(tx) = loaded_tx.borrow_mut().take() {
            let _ = tx.send(());
        }
    }) as Box<dyn FnMut()>);

    if let Err(err) = window.add_event_listener_with_callback(LOAD_EVENT, on_load.as_ref().unchecked_ref()) {
        log::error!("cannot observe page load: {err:?}");
        return false;
    }

    let loaded = match select(loaded_rx, cancel).await {
        Either::Left((result, _)) => result.is_ok(),
        Either::Right(_) => {
            log::debug!("page-load wait cancelled");
            false
        }
    };

    let _ = window.remove_event_listener_with_callback(LOAD_EVENT, on_load.as_ref().unchecked_ref());
    loaded
}
