//! ReadingProgressController: bar width, ARIA value, and show/fade timing.

use folio::dom::{Document, VirtualDocument};
use folio::managers::reading_progress::{
    track_percentage, ProgressControllerTrait, ReadingProgressController,
};
use folio::managers::Lifecycle;
use folio::types::dom::{ElementId, ElementSnapshot};
use folio::types::settings::ProgressSettings;
use rstest::rstest;

fn page(article_height: f64) -> VirtualDocument {
    let mut doc = VirtualDocument::from_snapshot(vec![
        ElementSnapshot::new("reading-progress", "div"),
        ElementSnapshot::new("reading-progress-bar", "div").child_of("reading-progress"),
        ElementSnapshot::new("post-content", "article").with_scroll_height(article_height),
    ]);
    doc.set_scroll(0.0, 1_000.0);
    doc
}

fn bar() -> ElementId {
    ElementId::new("reading-progress-bar")
}

fn container_visible(doc: &VirtualDocument) -> bool {
    doc.has_class(&ElementId::new("reading-progress"), "visible")
}

#[rstest]
#[case(0.0, 3_000.0, 1_000.0, 0.0)]
#[case(1_000.0, 3_000.0, 1_000.0, 50.0)]
#[case(2_000.0, 3_000.0, 1_000.0, 100.0)]
#[case(2_600.0, 3_000.0, 1_000.0, 100.0)]
#[case(-50.0, 3_000.0, 1_000.0, 0.0)]
// Article shorter than the viewport: no track to cover.
#[case(0.0, 600.0, 1_000.0, 0.0)]
#[case(300.0, 1_000.0, 1_000.0, 0.0)]
#[case(300.0, f64::NAN, 1_000.0, 0.0)]
#[case(f64::INFINITY, 3_000.0, 1_000.0, 100.0)]
fn test_track_percentage_cases(
    #[case] scroll_y: f64,
    #[case] height: f64,
    #[case] viewport: f64,
    #[case] expected: f64,
) {
    assert_eq!(track_percentage(scroll_y, height, viewport), expected);
}

#[test]
fn test_mount_sets_aria_range_and_shows_bar() {
    let mut doc = page(3_000.0);
    let mut ctl = ReadingProgressController::new(ProgressSettings::default());

    assert!(ctl.mount(&mut doc, 0));
    assert_eq!(ctl.lifecycle(), Lifecycle::Active);
    assert_eq!(doc.attribute(&bar(), "aria-valuemin").as_deref(), Some("0"));
    assert_eq!(doc.attribute(&bar(), "aria-valuemax").as_deref(), Some("100"));
    assert_eq!(doc.attribute(&bar(), "aria-valuenow").as_deref(), Some("0"));
    assert_eq!(doc.style(&bar(), "width").as_deref(), Some("0.00%"));
    assert!(container_visible(&doc));
    assert_eq!(ctl.next_deadline(), Some(1_000));
}

#[test]
fn test_scroll_updates_width_and_rounded_aria_value() {
    let mut doc = page(3_000.0);
    let mut ctl = ReadingProgressController::new(ProgressSettings::default());
    ctl.mount(&mut doc, 0);

    doc.set_scroll(673.0, 1_000.0);
    ctl.on_scroll(&mut doc, 50);

    assert!((ctl.percentage() - 33.65).abs() < 1e-9);
    assert_eq!(doc.style(&bar(), "width").as_deref(), Some("33.65%"));
    assert_eq!(doc.attribute(&bar(), "aria-valuenow").as_deref(), Some("34"));
}

#[test]
fn test_fades_one_second_after_last_scroll() {
    let mut doc = page(3_000.0);
    let mut ctl = ReadingProgressController::new(ProgressSettings::default());
    ctl.mount(&mut doc, 0);

    doc.set_scroll(400.0, 1_000.0);
    ctl.on_scroll(&mut doc, 500);
    assert!(!ctl.tick(&mut doc, 1_000));
    assert!(!ctl.tick(&mut doc, 1_499));
    assert!(ctl.is_visible());

    assert!(ctl.tick(&mut doc, 1_500));
    assert!(!ctl.is_visible());
    assert!(!container_visible(&doc));

    // The next scroll brings it back.
    doc.set_scroll(450.0, 1_000.0);
    ctl.on_scroll(&mut doc, 2_000);
    assert!(ctl.is_visible());
    assert!(container_visible(&doc));
}

#[test]
fn test_short_article_stays_at_zero() {
    let mut doc = page(500.0);
    let mut ctl = ReadingProgressController::new(ProgressSettings::default());
    ctl.mount(&mut doc, 0);
    doc.set_scroll(200.0, 1_000.0);
    ctl.on_scroll(&mut doc, 10);
    assert_eq!(ctl.percentage(), 0.0);
    assert_eq!(doc.style(&bar(), "width").as_deref(), Some("0.00%"));
}

#[rstest]
#[case("reading-progress")]
#[case("reading-progress-bar")]
#[case("post-content")]
fn test_any_missing_element_makes_controller_inert(#[case] missing: &str) {
    let mut doc = page(3_000.0);
    doc.remove(&ElementId::new(missing));
    doc.drain_patches();

    let mut ctl = ReadingProgressController::new(ProgressSettings::default());
    assert!(!ctl.mount(&mut doc, 0));
    assert_eq!(ctl.lifecycle(), Lifecycle::Inert);

    doc.set_scroll(500.0, 1_000.0);
    ctl.on_scroll(&mut doc, 10);
    assert!(doc.patches().is_empty());
    assert_eq!(ctl.next_deadline(), None);
}

#[test]
fn test_teardown_cancels_fade() {
    let mut doc = page(3_000.0);
    let mut ctl = ReadingProgressController::new(ProgressSettings::default());
    ctl.mount(&mut doc, 0);
    ctl.teardown();
    assert_eq!(ctl.next_deadline(), None);
    assert!(!ctl.tick(&mut doc, 5_000));
    assert!(container_visible(&doc));
}
