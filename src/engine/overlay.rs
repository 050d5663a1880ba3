//! Overlay interaction engine
//!
//! Single-threaded state machine driven by host-forwarded pointer,
//! click, and key events. The engine owns the session (behind an `Arc`
//! so observers can detect replacement by identity), decides click
//! disposition, and emits [`EngineEvent`]s for the chrome to render.

use super::breadcrumb::BreadcrumbTrail;
use super::state::{ClickOutcome, EngineEvent, EngineState, Highlight, Tooltip};
use crate::host::introspection::Introspection;
use crate::host::page::{ElementId, HostPage};
use crate::resolve::node::ComponentNode;
use crate::resolve::walker::ComponentWalker;
use crate::session::marker::{MarkerAnnotation, RecordingSession};
use crate::session::settings::Settings;
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Tooltip offset from the pointer, in CSS pixels.
const TOOLTIP_OFFSET: f64 = 12.0;

/// Half the rendered badge size; badges are centered on the element's
/// right edge.
const BADGE_HALF: f64 = 14.0;

/// The annotation engine.
///
/// All methods are synchronous; hosts call them from their event loop
/// and apply the returned events and dispositions.
pub struct OverlayEngine {
    state: EngineState,
    recording: bool,
    session: Arc<RecordingSession>,
    settings: Settings,
    walker: ComponentWalker,
    breadcrumbs: Option<BreadcrumbTrail>,
    highlight: Option<Highlight>,
    tooltip: Option<Tooltip>,
    /// Elements belonging to the engine's own chrome; never annotation
    /// targets, and clicks on them pass through.
    chrome: HashSet<ElementId>,
    /// Host overlays that swallow pointer events; hidden during hit
    /// testing so the page underneath stays targetable.
    click_capture: HashSet<ElementId>,
}

impl Default for OverlayEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Inactive,
            recording: false,
            session: Arc::new(RecordingSession::default()),
            settings: Settings::default(),
            walker: ComponentWalker::new(),
            breadcrumbs: None,
            highlight: None,
            tooltip: None,
            chrome: HashSet::new(),
            click_capture: HashSet::new(),
        }
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::new()
        }
    }

    // --- lifecycle ---

    /// Begin a fresh recording session.
    ///
    /// Fails when framework introspection is unavailable; markers from
    /// any previous session are discarded.
    pub fn start_recording(&mut self, intro: &dyn Introspection) -> Result<Vec<EngineEvent>> {
        if !intro.is_available() {
            return Err(Error::Introspection(
                "framework debug surface is not available on this page".to_string(),
            ));
        }

        self.session = Arc::new(RecordingSession::start());
        self.recording = true;
        self.reset_interaction();
        info!(session_id = %self.session.id, "recording started");
        Ok(vec![EngineEvent::RecordingStarted])
    }

    /// Stop recording and clear all transient interaction state.
    pub fn stop_recording(&mut self) -> Vec<EngineEvent> {
        if !self.recording {
            return Vec::new();
        }
        self.session = Arc::new(self.session.stopped());
        self.recording = false;
        self.reset_interaction();
        info!(
            session_id = %self.session.id,
            markers = self.session.len(),
            "recording stopped"
        );
        vec![EngineEvent::RecordingStopped]
    }

    fn reset_interaction(&mut self) {
        self.state = EngineState::Inactive;
        self.breadcrumbs = None;
        self.highlight = None;
        self.tooltip = None;
    }

    // --- pointer events ---

    /// Forward a pointer move.
    ///
    /// Hover resolution is suspended while Locked or EditingMarker; the
    /// existing highlight stays put until the lock is released.
    pub fn pointer_moved(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        x: f64,
        y: f64,
    ) -> Vec<EngineEvent> {
        if !self.recording || self.state.suspends_hover() {
            return Vec::new();
        }

        let Some(element) = self.element_under(page, x, y) else {
            return self.clear_hover();
        };
        if self.chrome.contains(&element) {
            // Chrome is transparent to hover; the last page hover stands.
            return Vec::new();
        }

        if let EngineState::Hovering(current) = &self.state {
            if current.element == element {
                // Same target; only the tooltip follows the pointer.
                if let Some(tooltip) = &mut self.tooltip {
                    tooltip.x = x + TOOLTIP_OFFSET;
                    tooltip.y = y + TOOLTIP_OFFSET;
                }
                return Vec::new();
            }
        }

        match self.walker.resolve(page, intro, element) {
            Some(node) => {
                self.highlight = Some(Highlight {
                    rect: node.rect,
                    color: self.settings.marker_color,
                });
                self.tooltip = Some(Tooltip {
                    text: self.tooltip_text(&node),
                    x: x + TOOLTIP_OFFSET,
                    y: y + TOOLTIP_OFFSET,
                });
                self.state = EngineState::Hovering(node.clone());
                vec![EngineEvent::ComponentHovered(node)]
            }
            None => self.clear_hover(),
        }
    }

    fn tooltip_text(&self, node: &ComponentNode) -> String {
        if node.is_component() && self.settings.show_framework_components {
            format!("<{}> {}", node.selector, node.display_name)
        } else {
            node.display_name.clone()
        }
    }

    fn clear_hover(&mut self) -> Vec<EngineEvent> {
        if matches!(self.state, EngineState::Hovering(_)) {
            self.state = EngineState::Inactive;
            self.highlight = None;
            self.tooltip = None;
            vec![EngineEvent::HoverCleared]
        } else {
            Vec::new()
        }
    }

    /// Forward a click.
    ///
    /// While recording, every click outside the chrome is suppressed so
    /// the page never reacts to annotation gestures.
    pub fn clicked(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        x: f64,
        y: f64,
    ) -> ClickOutcome {
        if !self.recording {
            return ClickOutcome::pass_through();
        }

        let element = self.element_under(page, x, y);
        if let Some(element) = element {
            if self.chrome.contains(&element) {
                return ClickOutcome::pass_through();
            }
        }

        if matches!(self.state, EngineState::EditingMarker(_)) {
            // The editor owns the interaction until saved or cancelled.
            return ClickOutcome::suppress(Vec::new());
        }

        let Some(element) = element else {
            return ClickOutcome::suppress(self.unlock());
        };

        if let EngineState::Locked(locked) = &self.state {
            if locked.element == element {
                let node = locked.clone();
                return ClickOutcome::suppress(self.confirm(node));
            }
        }

        // Lock (or re-lock) onto the clicked element, unless it already
        // carries a marker, in which case the editor opens instead.
        if let Some(existing) = self.session.marker_for_element(element) {
            let index = existing.index;
            self.state = EngineState::EditingMarker(index);
            self.highlight = None;
            self.tooltip = None;
            self.breadcrumbs = None;
            return ClickOutcome::suppress(vec![EngineEvent::EditorOpened(index)]);
        }

        match self.walker.resolve(page, intro, element) {
            Some(node) => ClickOutcome::suppress(self.lock(page, intro, node)),
            None => ClickOutcome::suppress(self.unlock()),
        }
    }

    fn lock(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        node: ComponentNode,
    ) -> Vec<EngineEvent> {
        debug!(target = %node.display_name, "element locked");
        self.highlight = Some(Highlight {
            rect: node.rect,
            color: self.settings.marker_color,
        });
        self.tooltip = None;
        self.breadcrumbs = Some(BreadcrumbTrail::for_node(page, intro, &node));
        let event = EngineEvent::ComponentHovered(node.clone());
        self.state = EngineState::Locked(node);
        vec![event]
    }

    fn unlock(&mut self) -> Vec<EngineEvent> {
        let events = if matches!(self.state, EngineState::Hovering(_)) {
            vec![EngineEvent::HoverCleared]
        } else {
            Vec::new()
        };
        self.reset_interaction();
        events
    }

    /// Confirm the given node as a marker and rearm. An element that
    /// already carries a marker opens its editor instead; at most one
    /// marker exists per distinct element.
    fn confirm(&mut self, node: ComponentNode) -> Vec<EngineEvent> {
        if let Some(existing) = self.session.marker_for_element(node.element) {
            let index = existing.index;
            self.state = EngineState::EditingMarker(index);
            self.highlight = None;
            self.tooltip = None;
            self.breadcrumbs = None;
            return vec![EngineEvent::EditorOpened(index)];
        }

        let next = self
            .session
            .with_marker(node, self.settings.marker_color);
        let index = next.len();
        self.session = Arc::new(next);
        self.reset_interaction();
        info!(index, "marker added");
        vec![EngineEvent::MarkerAdded(index)]
    }

    // --- breadcrumbs ---

    /// Single click on a breadcrumb entry: the selected entry confirms
    /// the lock, any other entry retargets it.
    pub fn breadcrumb_clicked(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        index: usize,
    ) -> Vec<EngineEvent> {
        let Some(trail) = &self.breadcrumbs else {
            return Vec::new();
        };
        let Some(entry) = trail.entries().get(index) else {
            return Vec::new();
        };

        if index == trail.selected() {
            if let EngineState::Locked(node) = &self.state {
                let node = node.clone();
                return self.confirm(node);
            }
            return Vec::new();
        }

        let element = entry.element;
        match self.walker.resolve(page, intro, element) {
            Some(node) => {
                let events = self.lock(page, intro, node);
                if let Some(trail) = &mut self.breadcrumbs {
                    trail.select(index);
                }
                events
            }
            None => self.unlock(),
        }
    }

    /// Double click: confirm the entry directly, whichever it is.
    pub fn breadcrumb_double_clicked(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        index: usize,
    ) -> Vec<EngineEvent> {
        let Some(trail) = &self.breadcrumbs else {
            return Vec::new();
        };
        let Some(entry) = trail.entries().get(index) else {
            return Vec::new();
        };
        let element = entry.element;
        match self.walker.resolve(page, intro, element) {
            Some(node) => self.confirm(node),
            None => self.unlock(),
        }
    }

    // --- keyboard ---

    /// Forward a key press. `Ctrl+Shift+I` toggles recording; `Escape`
    /// stops recording entirely.
    pub fn key_pressed(
        &mut self,
        intro: &dyn Introspection,
        key: &str,
        ctrl: bool,
        shift: bool,
    ) -> Vec<EngineEvent> {
        if ctrl && shift && key.eq_ignore_ascii_case("i") {
            return if self.recording {
                self.stop_recording()
            } else {
                self.start_recording(intro).unwrap_or_default()
            };
        }

        if key == "Escape" && self.recording {
            return self.stop_recording();
        }

        Vec::new()
    }

    // --- editor ---

    /// Save the editor's intent text for marker `index` and rearm.
    pub fn editor_save(&mut self, index: usize, intent: &str) -> Vec<EngineEvent> {
        self.session = Arc::new(self.session.with_intent(index, intent));
        self.state = EngineState::Inactive;
        vec![EngineEvent::MarkerUpdated(index)]
    }

    /// Delete marker `index` from the editor and rearm. Remaining
    /// markers are renumbered.
    pub fn editor_delete(&mut self, index: usize) -> Vec<EngineEvent> {
        self.session = Arc::new(self.session.without_marker(index));
        self.state = EngineState::Inactive;
        vec![EngineEvent::MarkerDeleted(index)]
    }

    /// Close the editor without changes.
    pub fn editor_cancel(&mut self) -> Vec<EngineEvent> {
        self.state = EngineState::Inactive;
        Vec::new()
    }

    /// Host notification that a report copy succeeded. Clears the
    /// session when `clear_on_copy` is set.
    pub fn report_copied(&mut self) -> Vec<EngineEvent> {
        if !self.settings.clear_on_copy || self.session.is_empty() {
            return Vec::new();
        }
        self.session = Arc::new(self.session.cleared());
        info!("session cleared after copy");
        vec![EngineEvent::SessionCleared]
    }

    // --- settings & registration ---

    /// Apply new settings; a marker-color change recolors every existing
    /// marker retroactively.
    pub fn update_settings(&mut self, settings: Settings) {
        if settings.marker_color != self.settings.marker_color {
            self.session = Arc::new(self.session.recolored(settings.marker_color));
        }
        self.settings = settings;
    }

    /// Exclude an element of the engine's own chrome from targeting.
    pub fn register_chrome(&mut self, element: ElementId) {
        self.chrome.insert(element);
    }

    /// Register a host overlay to hide during hit testing.
    pub fn register_click_capture(&mut self, element: ElementId) {
        self.click_capture.insert(element);
    }

    // --- queries ---

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    /// Shared handle to the current session; replaced wholesale on every
    /// mutation, so `Arc::ptr_eq` detects changes.
    pub fn session_arc(&self) -> Arc<RecordingSession> {
        Arc::clone(&self.session)
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn breadcrumbs(&self) -> Option<&BreadcrumbTrail> {
        self.breadcrumbs.as_ref()
    }

    /// Page position of the numbered badge for a marker: vertically
    /// centered on the target, hanging off its right edge.
    pub fn marker_badge_position(
        &self,
        page: &dyn HostPage,
        marker: &MarkerAnnotation,
    ) -> (f64, f64) {
        let (scroll_x, scroll_y) = page.scroll_offset();
        let rect = &marker.target.rect;
        let left = rect.x + scroll_x + rect.width - BADGE_HALF;
        let top = rect.y + scroll_y + rect.height / 2.0 - BADGE_HALF;
        (left, top)
    }

    /// Target rectangle the host should scroll into view for marker
    /// `index`.
    pub fn scroll_target_for(&self, index: usize) -> Option<crate::host::page::Rect> {
        self.session.marker(index).map(|m| m.target.rect)
    }

    /// Hit test with registered click-capture overlays hidden.
    fn element_under(&self, page: &dyn HostPage, x: f64, y: f64) -> Option<ElementId> {
        for overlay in &self.click_capture {
            page.set_hidden(*overlay, true);
        }
        let hit = page.element_at(x, y);
        for overlay in &self.click_capture {
            page.set_hidden(*overlay, false);
        }
        hit
    }
}
