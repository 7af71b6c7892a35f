//! ThemePreferenceController behaviour against an in-memory document and store.

use folio::dom::{Document, VirtualDocument};
use folio::services::preference_store::{MemoryStore, PreferenceStore};
use folio::services::theme_controller::{ThemeControllerTrait, ThemePreferenceController};
use folio::types::dom::{ElementId, ElementSnapshot};
use folio::types::settings::ThemeSettings;
use folio::types::theme::{AppliedMode, ThemePreference};
use rstest::rstest;

fn page() -> VirtualDocument {
    VirtualDocument::from_snapshot(vec![ElementSnapshot::new("body", "body")])
}

fn controller(store: MemoryStore) -> ThemePreferenceController<MemoryStore> {
    ThemePreferenceController::new(ThemeSettings::default(), store)
}

fn is_dark(doc: &VirtualDocument) -> bool {
    doc.has_class(&ElementId::new("body"), "dark")
}

#[rstest]
#[case(None, false, AppliedMode::Light)]
#[case(None, true, AppliedMode::Dark)]
#[case(Some("auto"), true, AppliedMode::Dark)]
#[case(Some("auto"), false, AppliedMode::Light)]
#[case(Some("light"), true, AppliedMode::Light)]
#[case(Some("dark"), false, AppliedMode::Dark)]
fn test_initialize_resolves_stored_preference(
    #[case] stored: Option<&str>,
    #[case] system_dark: bool,
    #[case] expected: AppliedMode,
) {
    let store = match stored {
        Some(value) => MemoryStore::new().with_value("pref-theme", value),
        None => MemoryStore::new(),
    };
    let mut doc = page();
    let mut ctl = controller(store);

    assert_eq!(ctl.initialize(&mut doc, system_dark), expected);
    assert_eq!(is_dark(&doc), expected == AppliedMode::Dark);
}

#[rstest]
#[case("")]
#[case("Dark")]
#[case("sepia")]
#[case(" light")]
#[case("{\"mode\":\"dark\"}")]
fn test_invalid_stored_value_behaves_as_auto(#[case] raw: &str) {
    let mut doc = page();
    let mut ctl = controller(MemoryStore::new().with_value("pref-theme", raw));

    assert_eq!(ctl.initialize(&mut doc, true), AppliedMode::Dark);
    assert_eq!(ctl.preference(), ThemePreference::Auto);
    assert_eq!(ctl.on_system_change(&mut doc, false), Some(AppliedMode::Light));
}

#[test]
fn test_initialize_never_writes_storage() {
    let mut doc = page();
    let mut ctl = controller(MemoryStore::new());
    ctl.initialize(&mut doc, true);
    assert_eq!(ctl.applied_mode(), AppliedMode::Dark);
    assert_eq!(ctl.store().write_count(), 0);

    ctl.toggle(&mut doc);
    assert_eq!(ctl.store().write_count(), 1);
}

#[test]
fn test_toggle_from_auto_pins_the_opposite_mode() {
    let mut doc = page();
    let mut ctl = controller(MemoryStore::new());
    ctl.initialize(&mut doc, true);

    assert_eq!(ctl.toggle(&mut doc), AppliedMode::Light);
    assert_eq!(ctl.preference(), ThemePreference::Light);
    assert_eq!(ctl.store().raw("pref-theme"), Some("light"));

    // Now explicit: the system signal no longer matters.
    assert_eq!(ctl.on_system_change(&mut doc, false), None);
    assert_eq!(ctl.on_system_change(&mut doc, true), None);
    assert!(!is_dark(&doc));
}

#[test]
fn test_set_auto_follows_system_again() {
    let mut doc = page();
    let mut ctl = controller(MemoryStore::new().with_value("pref-theme", "light"));
    ctl.initialize(&mut doc, false);

    // System changes while explicit are remembered for later.
    assert_eq!(ctl.on_system_change(&mut doc, true), None);
    assert_eq!(ctl.set_preference(&mut doc, ThemePreference::Auto), AppliedMode::Dark);
    assert_eq!(ctl.store().raw("pref-theme"), Some("auto"));
    assert!(is_dark(&doc));
}

#[test]
fn test_unavailable_storage_keeps_session_preference() {
    let mut doc = page();
    let mut ctl = controller(MemoryStore::unavailable());

    assert_eq!(ctl.initialize(&mut doc, false), AppliedMode::Light);
    assert_eq!(ctl.toggle(&mut doc), AppliedMode::Dark);
    assert_eq!(ctl.preference(), ThemePreference::Dark);
    assert!(ctl.store().get("pref-theme").is_err());
    assert!(is_dark(&doc));
}

#[test]
fn test_custom_storage_key_and_class() {
    let settings = ThemeSettings {
        storage_key: "site-theme".to_string(),
        root: ElementId::new("html"),
        dark_class: "theme-dark".to_string(),
    };
    let mut doc = VirtualDocument::from_snapshot(vec![ElementSnapshot::new("html", "html")]);
    let mut ctl = ThemePreferenceController::new(
        settings,
        MemoryStore::new().with_value("site-theme", "dark"),
    );

    ctl.initialize(&mut doc, false);
    assert!(doc.has_class(&ElementId::new("html"), "theme-dark"));
    assert_eq!(
        doc.attribute(&ElementId::new("html"), "data-theme").as_deref(),
        Some("dark")
    );
}

#[test]
fn test_missing_root_element_is_harmless() {
    let mut doc = VirtualDocument::new();
    let mut ctl = controller(MemoryStore::new());
    assert_eq!(ctl.initialize(&mut doc, true), AppliedMode::Dark);
    assert!(doc.patches().is_empty());
}
