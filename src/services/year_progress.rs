//! Year progress widget: how much of the current calendar year has elapsed.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::dom::Document;
use crate::types::dom::ElementId;

const FILL_ID: &str = "year-progress-fill";
const PERCENTAGE_ID: &str = "year-percentage";
const BAR_CLASS: &str = "year-progress-bar";

/// Percentage of `now`'s year that has elapsed, in `[0, 100)`.
pub fn year_percentage(now: NaiveDateTime) -> Option<f64> {
    let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let elapsed = (now - start).num_milliseconds() as f64;
    let total = (end - start).num_milliseconds() as f64;
    Some(elapsed / total * 100.0)
}

/// Renders the widget if its fill and label elements exist.
pub fn render_year_progress(doc: &mut dyn Document, now: NaiveDateTime) -> Option<f64> {
    let fill = ElementId::new(FILL_ID);
    let label = ElementId::new(PERCENTAGE_ID);
    if !doc.contains(&fill) || !doc.contains(&label) {
        return None;
    }
    let percent = year_percentage(now)?;
    let value = format!("{:.2}", percent);
    doc.set_style(&fill, "width", &format!("{}%", value));
    doc.set_text(&label, &format!("{:.1}", percent));
    if let Some(bar) = doc.elements_with_class(BAR_CLASS).into_iter().next() {
        doc.set_attribute(&bar, "aria-valuenow", &value);
    }
    Some(percent)
}
