//! Shared application state

use crate::engine::overlay::OverlayEngine;
use crate::session::marker::RecordingSession;
use crate::session::settings::Settings;
use std::sync::Arc;

/// Engine plus the last session handle an observer has seen.
///
/// The engine replaces its session wholesale on every mutation, so
/// observers compare `Arc` identity instead of diffing contents.
pub struct AppState {
    pub engine: OverlayEngine,
    observed: Arc<RecordingSession>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let engine = OverlayEngine::new();
        let observed = engine.session_arc();
        Self { engine, observed }
    }

    pub fn with_settings(settings: Settings) -> Self {
        let engine = OverlayEngine::with_settings(settings);
        let observed = engine.session_arc();
        Self { engine, observed }
    }

    /// Whether the session changed since the last check; marks it seen.
    pub fn session_changed(&mut self) -> bool {
        let current = self.engine.session_arc();
        let changed = !Arc::ptr_eq(&self.observed, &current);
        self.observed = current;
        changed
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.engine.update_settings(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fixture::FixturePage;

    #[test]
    fn test_session_change_detection_by_identity() {
        let page = FixturePage::sample();
        let mut state = AppState::new();
        assert!(!state.session_changed());

        state.engine.start_recording(page.introspection()).unwrap();
        assert!(state.session_changed());
        assert!(!state.session_changed());

        state.engine.clicked(&page, page.introspection(), 60.0, 220.0);
        // Locking alone does not replace the session.
        assert!(!state.session_changed());

        state.engine.clicked(&page, page.introspection(), 60.0, 220.0);
        assert!(state.session_changed());
    }
}
