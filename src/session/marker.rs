//! Markers and recording sessions
//!
//! Pure data plus invariant-preserving operations. Every mutation returns
//! a new session value so that holders of the previous value can detect a
//! change by identity; marker indices stay a dense `1..=N` sequence after
//! every operation.

use crate::host::page::ElementId;
use crate::resolve::node::ComponentNode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The seven marker color tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Purple,
    Blue,
    Cyan,
    Green,
    Yellow,
    Orange,
    Red,
}

impl MarkerColor {
    pub const ALL: [MarkerColor; 7] = [
        MarkerColor::Purple,
        MarkerColor::Blue,
        MarkerColor::Cyan,
        MarkerColor::Green,
        MarkerColor::Yellow,
        MarkerColor::Orange,
        MarkerColor::Red,
    ];

    /// Hex rendering used by host chrome.
    pub fn hex(&self) -> &'static str {
        match self {
            MarkerColor::Purple => "#a855f7",
            MarkerColor::Blue => "#3b82f6",
            MarkerColor::Cyan => "#06b6d4",
            MarkerColor::Green => "#22c55e",
            MarkerColor::Yellow => "#eab308",
            MarkerColor::Orange => "#f97316",
            MarkerColor::Red => "#ef4444",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerColor::Purple => "purple",
            MarkerColor::Blue => "blue",
            MarkerColor::Cyan => "cyan",
            MarkerColor::Green => "green",
            MarkerColor::Yellow => "yellow",
            MarkerColor::Orange => "orange",
            MarkerColor::Red => "red",
        }
    }
}

impl std::str::FromStr for MarkerColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkerColor::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown marker color: {s}"))
    }
}

/// One user-confirmed annotation binding an intent to a component node.
///
/// `index` is the session-scoped stable identity other components use;
/// it is renumbered contiguously after deletions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerAnnotation {
    /// 1-based position within the session.
    pub index: usize,
    /// The resolved node this marker targets; reused, never recomputed.
    pub target: ComponentNode,
    /// Free-text intent, may be empty.
    pub intent: String,
    pub color: MarkerColor,
    /// Epoch milliseconds at confirmation time.
    pub timestamp: i64,
}

/// An in-memory recording session: an ordered set of markers.
///
/// Insertion order is display and index order. Sessions are replaced
/// wholesale on every mutation — see the module docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSession {
    pub id: String,
    markers: Vec<MarkerAnnotation>,
    /// Epoch milliseconds; zero until recording starts.
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub is_recording: bool,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self {
            id: new_session_id(),
            markers: Vec::new(),
            start_time: 0,
            end_time: None,
            is_recording: false,
        }
    }
}

fn new_session_id() -> String {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "session-{}-{}",
        Utc::now().timestamp_millis(),
        &suffix[..9]
    )
}

impl RecordingSession {
    /// Begin a fresh session. Markers from any previous session are
    /// discarded by construction.
    pub fn start() -> Self {
        Self {
            id: new_session_id(),
            markers: Vec::new(),
            start_time: Utc::now().timestamp_millis(),
            end_time: None,
            is_recording: true,
        }
    }

    /// The session with recording stopped and an end time stamped.
    pub fn stopped(&self) -> Self {
        Self {
            is_recording: false,
            end_time: Some(Utc::now().timestamp_millis()),
            ..self.clone()
        }
    }

    /// Markers in display order.
    pub fn markers(&self) -> &[MarkerAnnotation] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The session with a new marker appended at index `len + 1`.
    pub fn with_marker(&self, target: ComponentNode, color: MarkerColor) -> Self {
        let mut next = self.clone();
        next.markers.push(MarkerAnnotation {
            index: next.markers.len() + 1,
            target,
            intent: String::new(),
            color,
            timestamp: Utc::now().timestamp_millis(),
        });
        next
    }

    /// The session without marker `index`, remaining markers renumbered
    /// contiguously from 1.
    pub fn without_marker(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.markers.retain(|m| m.index != index);
        for (position, marker) in next.markers.iter_mut().enumerate() {
            marker.index = position + 1;
        }
        next
    }

    /// The session with marker `index`'s intent replaced.
    pub fn with_intent(&self, index: usize, intent: impl Into<String>) -> Self {
        let intent = intent.into();
        let mut next = self.clone();
        if let Some(marker) = next.markers.iter_mut().find(|m| m.index == index) {
            marker.intent = intent;
        }
        next
    }

    /// The session with every marker recolored. Intent, target, and
    /// timestamp are untouched.
    pub fn recolored(&self, color: MarkerColor) -> Self {
        let mut next = self.clone();
        for marker in &mut next.markers {
            marker.color = color;
        }
        next
    }

    /// The session with all markers removed.
    pub fn cleared(&self) -> Self {
        let mut next = self.clone();
        next.markers.clear();
        next
    }

    /// Marker targeting the given element, if one exists. At most one
    /// marker exists per distinct element handle.
    pub fn marker_for_element(&self, element: ElementId) -> Option<&MarkerAnnotation> {
        self.markers.iter().find(|m| m.target.element == element)
    }

    pub fn marker(&self, index: usize) -> Option<&MarkerAnnotation> {
        self.markers.iter().find(|m| m.index == index)
    }

    /// Save the session as pretty JSON.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a session from JSON.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::page::{ElementId, Rect};
    use crate::resolve::node::{ComponentNode, NodeKind};
    use tempfile::NamedTempFile;

    fn make_node(element: u64) -> ComponentNode {
        ComponentNode {
            uid: format!("ag-0-{element}"),
            display_name: format!("Node{element}"),
            selector: "app-node".to_string(),
            dom_path: "body > app-node".to_string(),
            bound_properties: Vec::new(),
            emitted_events: Vec::new(),
            public_state: Vec::new(),
            element: ElementId(element),
            rect: Rect::default(),
            computed_styles: Vec::new(),
            behaviors: Vec::new(),
            parent: None,
            kind: NodeKind::Component,
        }
    }

    fn assert_dense_indices(session: &RecordingSession) {
        for (position, marker) in session.markers().iter().enumerate() {
            assert_eq!(marker.index, position + 1);
        }
    }

    #[test]
    fn test_start_discards_previous_markers() {
        let session = RecordingSession::start().with_marker(make_node(1), MarkerColor::Blue);
        assert_eq!(session.len(), 1);

        let fresh = RecordingSession::start();
        assert!(fresh.is_empty());
        assert!(fresh.is_recording);
        assert_ne!(fresh.id, session.id);
    }

    #[test]
    fn test_marker_indices_stay_dense_after_delete() {
        let session = RecordingSession::start()
            .with_marker(make_node(1), MarkerColor::Blue)
            .with_marker(make_node(2), MarkerColor::Blue)
            .with_marker(make_node(3), MarkerColor::Blue)
            .with_marker(make_node(4), MarkerColor::Blue);
        assert_dense_indices(&session);

        let session = session.without_marker(2);
        assert_eq!(session.len(), 3);
        assert_dense_indices(&session);
        // Marker 3 shifted down to index 2.
        assert_eq!(session.marker(2).unwrap().target.element, ElementId(3));
        assert_eq!(session.marker(3).unwrap().target.element, ElementId(4));
    }

    #[test]
    fn test_recolor_updates_every_marker_and_nothing_else() {
        let session = RecordingSession::start()
            .with_marker(make_node(1), MarkerColor::Blue)
            .with_marker(make_node(2), MarkerColor::Green)
            .with_intent(1, "Fix styling");

        let before: Vec<_> = session
            .markers()
            .iter()
            .map(|m| (m.intent.clone(), m.target.clone(), m.timestamp))
            .collect();

        let recolored = session.recolored(MarkerColor::Red);
        assert!(recolored.markers().iter().all(|m| m.color == MarkerColor::Red));
        let after: Vec<_> = recolored
            .markers()
            .iter()
            .map(|m| (m.intent.clone(), m.target.clone(), m.timestamp))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_intent_update_by_index() {
        let session = RecordingSession::start()
            .with_marker(make_node(1), MarkerColor::Blue)
            .with_marker(make_node(2), MarkerColor::Blue)
            .with_intent(2, "Align right");

        assert_eq!(session.marker(1).unwrap().intent, "");
        assert_eq!(session.marker(2).unwrap().intent, "Align right");
    }

    #[test]
    fn test_marker_for_element_dedupe_lookup() {
        let session = RecordingSession::start().with_marker(make_node(7), MarkerColor::Blue);
        assert!(session.marker_for_element(ElementId(7)).is_some());
        assert!(session.marker_for_element(ElementId(8)).is_none());
    }

    #[test]
    fn test_stopped_preserves_markers() {
        let session = RecordingSession::start().with_marker(make_node(1), MarkerColor::Blue);
        let stopped = session.stopped();
        assert!(!stopped.is_recording);
        assert!(stopped.end_time.is_some());
        assert_eq!(stopped.len(), 1);
    }

    #[test]
    fn test_save_load_round_trip() {
        let session = RecordingSession::start()
            .with_marker(make_node(1), MarkerColor::Cyan)
            .with_intent(1, "Check contrast");

        let file = NamedTempFile::new().unwrap();
        session.save(file.path()).unwrap();
        let loaded = RecordingSession::load(file.path()).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_marker_color_parsing_and_hex() {
        assert_eq!("blue".parse::<MarkerColor>().unwrap(), MarkerColor::Blue);
        assert!("magenta".parse::<MarkerColor>().is_err());
        assert_eq!(MarkerColor::Blue.hex(), "#3b82f6");
        assert_eq!(MarkerColor::ALL.len(), 7);
    }
}
