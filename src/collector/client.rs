//! Remote collector client
//!
//! Talks to an optional annotation collector over HTTP. The collector is
//! best-effort infrastructure: every failure here degrades to
//! "disconnected" and is never fatal to the host application.

use crate::report::generator::Environment;
use crate::session::marker::MarkerAnnotation;
use crate::{Error, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request timeout for every collector call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default interval between annotation polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Lifecycle of an annotation on the collector side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStatus {
    Pending,
    Accepted,
    Resolved,
    Rejected,
}

/// Wire shape of an annotation submitted to or fetched from a collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorAnnotation {
    pub id: String,
    pub session_id: String,
    pub url: Option<String>,
    /// Element label plus DOM path, enough for the collector UI.
    pub target: String,
    pub intent: String,
    pub timestamp: i64,
    pub status: AnnotationStatus,
}

/// Connection state, updated on every status check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectorStatus {
    pub connected: bool,
    pub session_id: Option<String>,
    pub last_error: Option<String>,
}

/// Blocking HTTP client for a remote collector.
pub struct CollectorClient {
    base_url: String,
    client: reqwest::blocking::Client,
    status: CollectorStatus,
}

impl CollectorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            base_url,
            client,
            status: CollectorStatus::default(),
        }
    }

    pub fn status(&self) -> &CollectorStatus {
        &self.status
    }

    /// Probe `GET /status` and update the connection state.
    pub fn check_status(&mut self) -> bool {
        let url = format!("{}/status", self.base_url);
        match self.client.get(&url).send() {
            Ok(response) if response.status().is_success() => {
                self.status.connected = true;
                self.status.last_error = None;
                true
            }
            Ok(response) => {
                self.mark_disconnected(format!("collector returned {}", response.status()));
                false
            }
            Err(err) => {
                self.mark_disconnected(err.to_string());
                false
            }
        }
    }

    fn mark_disconnected(&mut self, reason: String) {
        debug!(reason = %reason, "collector unreachable");
        self.status.connected = false;
        self.status.last_error = Some(reason);
    }

    /// Connect, adopting an existing collector session id or minting a
    /// fresh one.
    pub fn connect(&mut self, session_id: Option<String>) -> Result<String> {
        if !self.check_status() {
            return Err(Error::Collector(
                self.status
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "collector status check failed".to_string()),
            ));
        }
        let id = session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        self.status.session_id = Some(id.clone());
        info!(session_id = %id, "connected to collector");
        Ok(id)
    }

    /// `POST /annotations`.
    pub fn submit(&mut self, annotation: &CollectorAnnotation) -> Result<()> {
        let url = format!("{}/annotations", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(annotation)
            .send()
            .map_err(|err| {
                self.mark_disconnected(err.to_string());
                Error::Collector(format!("submit failed: {err}"))
            })?;
        if !response.status().is_success() {
            return Err(Error::Collector(format!(
                "submit rejected with {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// `GET /sessions/{id}/annotations`.
    pub fn fetch_annotations(&mut self) -> Result<Vec<CollectorAnnotation>> {
        let session_id = self
            .status
            .session_id
            .clone()
            .ok_or_else(|| Error::Collector("not connected to a collector session".to_string()))?;
        let url = format!("{}/sessions/{}/annotations", self.base_url, session_id);
        let response = self.client.get(&url).send().map_err(|err| {
            self.mark_disconnected(err.to_string());
            Error::Collector(format!("fetch failed: {err}"))
        })?;
        if !response.status().is_success() {
            return Err(Error::Collector(format!(
                "fetch rejected with {}",
                response.status()
            )));
        }
        response
            .json()
            .map_err(|err| Error::Collector(format!("malformed annotation list: {err}")))
    }

    /// Background poller: refreshes the shared annotation snapshot on a
    /// fixed interval until the stop flag flips. Failures are swallowed
    /// and the previous snapshot stays in place.
    pub fn spawn_poller(
        mut self,
        interval: Duration,
        snapshot: Arc<Mutex<Vec<CollectorAnnotation>>>,
        stop: Arc<AtomicBool>,
    ) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                match self.fetch_annotations() {
                    Ok(annotations) => {
                        *snapshot.lock() = annotations;
                    }
                    Err(err) => {
                        debug!(error = %err, "annotation poll failed, keeping previous snapshot");
                    }
                }
                std::thread::sleep(interval);
            }
        })
    }
}

/// Build the wire annotation for a confirmed marker.
pub fn annotation_from_marker(
    marker: &MarkerAnnotation,
    collector_session: &str,
    env: &Environment,
) -> CollectorAnnotation {
    CollectorAnnotation {
        id: uuid::Uuid::new_v4().to_string(),
        session_id: collector_session.to_string(),
        url: env.url.clone(),
        target: format!("{} ({})", marker.target.display_name, marker.target.dom_path),
        intent: marker.intent.clone(),
        timestamp: marker.timestamp,
        status: AnnotationStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_collector_is_not_fatal() {
        // Nothing listens on this port.
        let mut client = CollectorClient::new("http://127.0.0.1:1/");
        assert!(!client.check_status());
        assert!(!client.status().connected);
        assert!(client.status().last_error.is_some());
        assert!(client.connect(None).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = CollectorClient::new("http://localhost:7007/");
        assert_eq!(client.base_url, "http://localhost:7007");
    }

    #[test]
    fn test_fetch_requires_connected_session() {
        let mut client = CollectorClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.fetch_annotations(),
            Err(Error::Collector(_))
        ));
    }

    #[test]
    fn test_annotation_wire_shape() {
        use crate::host::page::{ElementId, Rect};
        use crate::resolve::node::{ComponentNode, NodeKind};
        use crate::session::marker::MarkerColor;

        let node = ComponentNode {
            uid: "ag-1-1".to_string(),
            display_name: "CardComponent".to_string(),
            selector: "app-card".to_string(),
            dom_path: "body > app-card".to_string(),
            bound_properties: Vec::new(),
            emitted_events: Vec::new(),
            public_state: Vec::new(),
            element: ElementId(1),
            rect: Rect::default(),
            computed_styles: Vec::new(),
            behaviors: Vec::new(),
            parent: None,
            kind: NodeKind::Component,
        };
        let session = crate::session::marker::RecordingSession::start()
            .with_marker(node, MarkerColor::Blue)
            .with_intent(1, "Tighten spacing");
        let marker = session.marker(1).unwrap();

        let env = Environment {
            url: Some("http://localhost:4200/products".to_string()),
            ..Environment::default()
        };
        let annotation = annotation_from_marker(marker, "abc", &env);
        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["sessionId"], "abc");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["target"], "CardComponent (body > app-card)");
        assert_eq!(json["intent"], "Tighten spacing");
    }
}
