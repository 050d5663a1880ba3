//! # Agentation
//!
//! A UI annotation engine that lets a user point at live, rendered UI
//! elements, attach free-text intent to them, and export a structured,
//! tiered textual report for consumption by an automated reader such as
//! a coding agent.
//!
//! ## Overview
//!
//! The engine resolves arbitrary UI elements to semantically meaningful
//! component nodes by walking the host page through a framework
//! introspection capability, drives a pointer/keyboard interaction state
//! machine (hover-preview, click-to-lock, breadcrumb ancestor selection,
//! multi-mark sessions, in-place re-editing), and renders each confirmed
//! marker into deterministic, size-bounded report text.
//!
//! ## Quick Start
//!
//! ```
//! use agentation::host::fixture::FixturePage;
//! use agentation::engine::OverlayEngine;
//! use agentation::report::{Environment, ReportGenerator};
//! use agentation::session::Settings;
//!
//! let page = FixturePage::sample();
//! let mut engine = OverlayEngine::new();
//! engine.start_recording(page.introspection()).expect("fixture introspection is available");
//!
//! // Hover, lock, and confirm the login button at (60, 220).
//! engine.pointer_moved(&page, page.introspection(), 60.0, 220.0);
//! engine.clicked(&page, page.introspection(), 60.0, 220.0);
//! engine.clicked(&page, page.introspection(), 60.0, 220.0);
//!
//! let mut generator = ReportGenerator::new();
//! let report = generator.generate(
//!     engine.session().markers(),
//!     &Settings::default(),
//!     &Environment::default(),
//!     &page,
//! );
//! println!("{report}");
//! ```
//!
//! ## Architecture
//!
//! - [`host`]: host-page abstraction — element handles, runtime values,
//!   the introspection capability, and a fixture-backed test double
//! - [`sanitize`]: recursive, cycle- and size-bounded value sanitizer
//! - [`resolve`]: component node model and the node resolver
//! - [`session`]: markers, recording sessions, and settings
//! - [`engine`]: the pointer/keyboard interaction state machine
//! - [`report`]: four-tier report generator
//! - [`collector`]: remote annotation collector client
//! - [`clipboard`]: clipboard capability with synchronous fallback
//! - [`app`]: CLI, configuration, and shared application state
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Pointer/  │───▶│   Overlay   │───▶│  Component  │───▶│  Recording  │
//! │   Keyboard  │    │   Engine    │    │   Walker    │    │   Session   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Clipboard/ │◀───│   Report    │◀───│    Value    │◀───│   Markers   │
//! │  Collector  │    │  Generator  │    │  Sanitizer  │    └─────────────┘
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! ## Host Integration
//!
//! Nothing here touches a real DOM. The embedder implements
//! [`host::HostPage`] and [`host::Introspection`] over its live document;
//! the bundled [`host::fixture`] implementations back the tests and the
//! CLI demo.

pub mod app;
pub mod clipboard;
pub mod collector;
pub mod engine;
pub mod host;
pub mod report;
pub mod resolve;
pub mod sanitize;
pub mod session;

// Re-export commonly used types
pub use engine::{EngineEvent, EngineState, OverlayEngine};
pub use host::{ElementId, HostPage, Introspection, Rect, Value};
pub use report::{Environment, ReportGenerator};
pub use resolve::{ComponentNode, ComponentWalker};
pub use sanitize::Sanitizer;
pub use session::{MarkerAnnotation, MarkerColor, OutputDetail, RecordingSession, Settings};

/// Result type alias for the annotation engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the annotation engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Introspection error: {0}")]
    Introspection(String),

    #[error("Resolution error: {0}")]
    Resolve(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Collector error: {0}")]
    Collector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
