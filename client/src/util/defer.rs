//! Cancellable zero-delay scheduling.
//!
//! A [`DeferSlot`] holds at most one pending callback. Scheduling again
//! replaces (and so cancels) the previous one; dropping the slot cancels
//! whatever is pending.

#[cfg(feature = "hydrate")]
use gloo_timers::callback::Timeout;

/// One pending next-turn callback, or none.
#[derive(Default)]
pub struct DeferSlot {
    #[cfg(feature = "hydrate")]
    pending: Option<Timeout>,
}

impl DeferSlot {
    /// Run `callback` on the next scheduling turn, cancelling any callback
    /// already waiting in this slot.
    #[cfg(feature = "hydrate")]
    pub fn schedule(&mut self, callback: impl FnOnce() + 'static) {
        self.pending = Some(Timeout::new(0, callback));
    }

    /// Drop the pending callback without running it.
    pub fn cancel(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            self.pending = None;
        }
    }

    /// Forget a callback that has fired. Call from inside the callback so the
    /// slot accepts the next one.
    pub fn fired(&mut self) {
        self.cancel();
    }

    pub fn is_pending(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.pending.is_some()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }
}
