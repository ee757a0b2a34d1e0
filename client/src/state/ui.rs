//! Local viewer chrome state.
//!
//! DESIGN
//! ======
//! The debug toggle is an imperative action on the viewer, so it is modeled
//! as a counter: the host component re-creates the instance whenever the
//! value it last saw differs from the current one.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state shared by the tour page and the viewer host.
#[derive(Clone, Debug, Default)]
pub struct ViewerUiState {
    /// Bumped once per debug toggle request.
    pub debug_toggle_seq: u64,
    /// Last blocking notice shown to the user.
    pub last_notice: Option<String>,
}

impl ViewerUiState {
    pub fn request_debug_toggle(&mut self) {
        self.debug_toggle_seq = self.debug_toggle_seq.wrapping_add(1);
    }
}
