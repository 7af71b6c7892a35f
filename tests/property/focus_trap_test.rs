//! Property-based tests for the off-canvas menu focus trap.

use folio::dom::{Document, VirtualDocument};
use folio::managers::off_canvas_menu::{MenuControllerTrait, OffCanvasMenuController};
use folio::types::dom::{ElementId, ElementSnapshot};
use folio::types::menu::{KeyEvent, KeyOutcome};
use folio::types::settings::MenuSettings;
use proptest::prelude::*;

/// A panel holding `n` focusable items, interleaved with `filler` plain
/// elements that must never receive focus.
fn menu_page(n: usize, filler: usize) -> (VirtualDocument, Vec<ElementId>) {
    let mut elements = vec![
        ElementSnapshot::new("body", "body"),
        ElementSnapshot::new("menu-toggle", "button").child_of("body").focusable(),
        ElementSnapshot::new("side-menu", "nav").child_of("body"),
    ];
    let mut items = Vec::new();
    for i in 0..n {
        for f in 0..filler {
            elements.push(ElementSnapshot::new(format!("text-{}-{}", i, f), "p").child_of("side-menu"));
        }
        let id = format!("item-{}", i);
        elements.push(ElementSnapshot::new(id.clone(), "a").child_of("side-menu").focusable());
        items.push(ElementId::new(id));
    }
    (VirtualDocument::from_snapshot(elements), items)
}

fn opened(n: usize, filler: usize) -> (VirtualDocument, OffCanvasMenuController, Vec<ElementId>) {
    let (mut doc, items) = menu_page(n, filler);
    let mut menu = OffCanvasMenuController::new(MenuSettings::default());
    menu.mount(&mut doc);
    menu.open(&mut doc);
    (doc, menu, items)
}

proptest! {
    #[test]
    fn tab_on_last_cycles_to_first(n in 1usize..12, filler in 0usize..3) {
        let (mut doc, mut menu, items) = opened(n, filler);
        let last = items[n - 1].clone();

        let outcome = menu.on_key(&mut doc, &KeyEvent::tab(Some(last)));
        prop_assert_eq!(outcome, KeyOutcome::PREVENTED);
        prop_assert_eq!(doc.active_element(), Some(items[0].clone()));
    }

    #[test]
    fn shift_tab_on_first_cycles_to_last(n in 1usize..12, filler in 0usize..3) {
        let (mut doc, mut menu, items) = opened(n, filler);
        let first = items[0].clone();

        let outcome = menu.on_key(&mut doc, &KeyEvent::shift_tab(Some(first)));
        prop_assert_eq!(outcome, KeyOutcome::PREVENTED);
        prop_assert_eq!(doc.active_element(), Some(items[n - 1].clone()));
    }

    #[test]
    fn inner_items_are_not_trapped(n in 3usize..12, pick in 1usize..11, shift in any::<bool>()) {
        prop_assume!(pick < n - 1);
        let (mut doc, mut menu, items) = opened(n, 0);
        doc.drain_patches();

        let event = if shift {
            KeyEvent::shift_tab(Some(items[pick].clone()))
        } else {
            KeyEvent::tab(Some(items[pick].clone()))
        };
        prop_assert_eq!(menu.on_key(&mut doc, &event), KeyOutcome::DEFAULT);
        prop_assert!(doc.patches().is_empty());
    }

    #[test]
    fn open_focuses_first_item(n in 1usize..12, filler in 0usize..3) {
        let (doc, _menu, items) = opened(n, filler);
        prop_assert_eq!(doc.active_element(), Some(items[0].clone()));
    }
}
