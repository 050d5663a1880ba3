//! End-to-end annotation workflow tests
//!
//! These tests drive the complete pipeline on the fixture page:
//! pointer events -> overlay engine -> node resolution -> session ->
//! report generation -> clipboard / persistence.

use agentation::clipboard::{copy_with_fallback, CopyOutcome, FailingClipboard, MemoryClipboard};
use agentation::engine::{EngineEvent, EngineState, OverlayEngine};
use agentation::host::fixture::FixturePage;
use agentation::report::{Environment, ReportGenerator};
use agentation::session::{OutputDetail, RecordingSession, Settings};
use tempfile::NamedTempFile;

const CARD: (f64, f64) = (45.0, 85.0);
const BUTTON: (f64, f64) = (60.0, 220.0);

/// Confirm a marker on the element at the given point and attach intent.
fn annotate(engine: &mut OverlayEngine, page: &FixturePage, point: (f64, f64), intent: &str) {
    engine.clicked(page, page.introspection(), point.0, point.1);
    let outcome = engine.clicked(page, page.introspection(), point.0, point.1);
    let index = match outcome.events.as_slice() {
        [EngineEvent::MarkerAdded(index)] => *index,
        other => panic!("expected MarkerAdded, got {other:?}"),
    };
    engine.editor_save(index, intent);
}

#[test]
fn test_full_annotation_to_report_pipeline() {
    let page = FixturePage::sample();
    let mut engine = OverlayEngine::new();
    engine.start_recording(page.introspection()).unwrap();

    annotate(&mut engine, &page, CARD, "Card spacing feels cramped");
    annotate(&mut engine, &page, BUTTON, "Label should say 'Sign in'");
    engine.stop_recording();

    let session = engine.session();
    assert_eq!(session.len(), 2);
    assert!(!session.is_recording);

    let settings = Settings {
        output_detail: OutputDetail::Forensic,
        ..Settings::default()
    };
    let env = Environment::from_page(&page);
    let report = ReportGenerator::new().generate(session.markers(), &settings, &env, &page);

    assert!(report.starts_with("## Page Feedback: /products"));
    assert!(report.contains("### 1. ProductCardComponent"));
    assert!(report.contains("### 2. button \"Log in\""));
    assert!(report.contains("**Feedback:** Card spacing feels cramped"));
    assert!(report.contains("**Feedback:** Label should say 'Sign in'"));
    assert!(report.contains("- User Agent: AgentationFixture/1.0"));
}

#[test]
fn test_report_copy_with_fallback() {
    let page = FixturePage::sample();
    let mut engine = OverlayEngine::new();
    engine.start_recording(page.introspection()).unwrap();
    annotate(&mut engine, &page, BUTTON, "Too small");

    let report = ReportGenerator::new().generate(
        engine.session().markers(),
        &Settings::default(),
        &Environment::from_page(&page),
        &page,
    );

    let mut primary = FailingClipboard;
    let mut fallback = MemoryClipboard::new();
    let outcome = copy_with_fallback(&mut primary, &mut fallback, &report).unwrap();
    assert_eq!(outcome, CopyOutcome::Fallback);
    assert_eq!(fallback.contents(), Some(report.as_str()));
}

#[test]
fn test_session_survives_save_and_reload() {
    let page = FixturePage::sample();
    let mut engine = OverlayEngine::new();
    engine.start_recording(page.introspection()).unwrap();
    annotate(&mut engine, &page, CARD, "Check contrast");
    engine.stop_recording();

    let file = NamedTempFile::new().unwrap();
    engine.session().save(file.path()).unwrap();
    let loaded = RecordingSession::load(file.path()).unwrap();

    assert_eq!(loaded, *engine.session());
    let marker = loaded.marker(1).unwrap();
    assert_eq!(marker.intent, "Check contrast");
    assert_eq!(marker.target.display_name, "ProductCardComponent");
    assert_eq!(
        marker.target.emitted_events,
        vec!["addToCart", "priceChanged"]
    );

    // A reloaded session renders without access to the original page.
    let report = ReportGenerator::new().generate(
        loaded.markers(),
        &Settings::default(),
        &Environment::default(),
        &FixturePage::empty(),
    );
    assert!(report.contains("**Full DOM Path:** body > app-root > app-product-card"));
    assert!(report.contains("**Feedback:** Check contrast"));
}

#[test]
fn test_stop_recording_resets_every_transient() {
    let page = FixturePage::sample();
    let mut engine = OverlayEngine::new();
    engine.start_recording(page.introspection()).unwrap();

    engine.pointer_moved(&page, page.introspection(), BUTTON.0, BUTTON.1);
    engine.clicked(&page, page.introspection(), BUTTON.0, BUTTON.1);
    assert!(engine.highlight().is_some());
    assert!(engine.breadcrumbs().is_some());

    let events = engine.stop_recording();
    assert_eq!(events, vec![EngineEvent::RecordingStopped]);
    assert_eq!(engine.state(), &EngineState::Inactive);
    assert!(engine.highlight().is_none());
    assert!(engine.tooltip().is_none());
    assert!(engine.breadcrumbs().is_none());
    assert!(!engine.is_recording());
}

#[test]
fn test_marker_indices_dense_across_engine_operations() {
    let page = FixturePage::sample();
    let mut engine = OverlayEngine::new();
    engine.start_recording(page.introspection()).unwrap();

    annotate(&mut engine, &page, CARD, "first");
    annotate(&mut engine, &page, BUTTON, "second");
    annotate(&mut engine, &page, (50.0, 290.0), "third");
    assert_eq!(engine.session().len(), 3);

    engine.editor_delete(2);
    let markers = engine.session().markers();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].index, 1);
    assert_eq!(markers[1].index, 2);
    assert_eq!(markers[0].intent, "first");
    assert_eq!(markers[1].intent, "third");
}
