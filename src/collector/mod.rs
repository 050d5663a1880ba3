//! Remote collector module
//!
//! Optional HTTP integration for shipping annotations to a central
//! collector and polling its review state.

pub mod client;

pub use client::{
    annotation_from_marker, AnnotationStatus, CollectorAnnotation, CollectorClient,
    CollectorStatus, DEFAULT_POLL_INTERVAL,
};
