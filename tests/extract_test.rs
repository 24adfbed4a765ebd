//! Error detection, collection and sanitising for one node


use graphics_error_scraper::{
    DetailPanelState, ErrorExtractor, Extraction, Pacing, RawDiagnostics, ScrapeError,
};
use mock_surface::{fast_options, MockSurface};
use serde_json::json;
use std::time::Duration;

fn one_main_error() -> RawDiagnostics {
    RawDiagnostics {
        main_errors: vec![json!({"code": "E1", "url": "http://x"})],
        ..RawDiagnostics::default()
    }
}

#[tokio::test]
async fn test_no_entry_without_view_graphics_control() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);
    surface.set_panel(
        node,
        DetailPanelState {
            view_graphics: false,
            error_indication_visible: true,
        },
    );
    surface.set_diagnostics(node, one_main_error());

    let pacing = Pacing::new(fast_options());
    let outcome = ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await
        .unwrap();

    assert_eq!(outcome, Extraction::Clean);
    assert_eq!(surface.diagnostics_calls(), 0);
}

#[tokio::test]
async fn test_no_entry_when_error_panel_hidden() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);
    surface.set_panel(
        node,
        DetailPanelState {
            view_graphics: true,
            error_indication_visible: false,
        },
    );
    surface.set_diagnostics(node, one_main_error());

    let pacing = Pacing::new(fast_options());
    let outcome = ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await
        .unwrap();

    assert_eq!(outcome, Extraction::Clean);
}

#[tokio::test]
async fn test_records_are_sanitized() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);
    surface.fail_with(
        node,
        RawDiagnostics {
            main_errors: vec![
                json!({"code": "E1", "url": "http://x"}),
                json!({"code": "E2"}),
            ],
            ..RawDiagnostics::default()
        },
    );

    let pacing = Pacing::new(fast_options());
    let outcome = ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await
        .unwrap();

    let Extraction::Reported(diagnostics) = outcome else {
        panic!("expected error state");
    };
    let main = diagnostics.main_errors.expect("main errors present");
    assert_eq!(main[0], json!({"code": "E1"}));
    assert_eq!(main[1], json!({"code": "E2"}));
    assert!(diagnostics.action_errors.is_none());
    assert!(diagnostics.info_messages.is_none());
}

#[tokio::test]
async fn test_only_non_empty_categories_survive() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);
    surface.fail_with(
        node,
        RawDiagnostics {
            main_errors: vec![],
            action_errors: vec![json!({"code": "A1"})],
            info_messages: vec![],
        },
    );

    let pacing = Pacing::new(fast_options());
    let outcome = ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await
        .unwrap();

    let Extraction::Reported(diagnostics) = outcome else {
        panic!("expected error state");
    };
    assert_eq!(diagnostics.main_errors, None);
    assert_eq!(diagnostics.action_errors, Some(vec![json!({"code": "A1"})]));
    assert_eq!(diagnostics.info_messages, None);
}

#[tokio::test]
async fn test_stale_node_is_skipped() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);
    surface.fail_with(node, one_main_error());
    surface.make_stale(node);

    let pacing = Pacing::new(fast_options());
    let outcome = ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await
        .unwrap();

    assert_eq!(outcome, Extraction::Skipped);
    assert_eq!(surface.idle_waits(), 0, "no settle after a failed selection");
}

#[tokio::test]
async fn test_selection_timeout_is_fatal() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);
    surface.make_hang(node);

    let mut options = fast_options();
    options.timeout = Duration::from_millis(50);
    let pacing = Pacing::new(options);
    let result = ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await;

    assert!(
        matches!(result, Err(ScrapeError::Timeout { .. })),
        "expected timeout, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_selection_settles_before_detection() {
    let surface = MockSurface::new();
    let node = surface.leaf("Site", None);

    let pacing = Pacing::new(fast_options());
    ErrorExtractor::new(&surface, &pacing)
        .extract(MockSurface::handle(node))
        .await
        .unwrap();

    assert_eq!(surface.idle_waits(), 1);
}
