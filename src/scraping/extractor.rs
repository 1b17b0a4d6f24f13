//! Field extraction from well detail markup
//!
//! Locates each field's span by ID and takes its direct text content,
//! stripping any nested markup. A missing locator is an absent field,
//! never an error. The coordinates span is located once and fanned out
//! through the coordinate parser.

use scraper::{ElementRef, Html, Selector};

use crate::fields::{COORDINATES_LOCATOR, FIELD_LOCATORS, WellField};
use crate::types::WellRecord;

use super::coords::parse_lat_lon_crs;

/// Extracts a [`WellRecord`] from a fetched detail page.
pub struct FieldExtractor {
    /// Pre-compiled `span#<id>` selectors, one per field.
    selectors: Vec<(WellField, Selector)>,
    coord_selector: Option<Selector>,
}

impl FieldExtractor {
    pub fn new() -> Self {
        let selectors = FIELD_LOCATORS
            .iter()
            .filter_map(|(field, id)| {
                Selector::parse(&format!("span#{}", id))
                    .ok()
                    .map(|s| (*field, s))
            })
            .collect();

        let coord_selector = Selector::parse(&format!("span#{}", COORDINATES_LOCATOR)).ok();

        Self {
            selectors,
            coord_selector,
        }
    }

    /// Produce one record for the identifier from the raw page body.
    pub fn extract(&self, api: &str, body: &str) -> WellRecord {
        let document = Html::parse_document(body);
        let mut record = WellRecord::new(api);

        // Coordinates are parsed once; the triple is all-present or
        // all-absent.
        let coord_text = self
            .coord_selector
            .as_ref()
            .and_then(|s| span_text(&document, s));
        let (latitude, longitude, crs) = parse_lat_lon_crs(coord_text.as_deref());
        record.latitude = latitude;
        record.longitude = longitude;
        record.crs = crs;

        for (field, selector) in &self.selectors {
            record.set_field(*field, span_text(&document, selector));
        }

        record
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Trimmed text of the first matching span's direct text nodes.
/// Nested elements are dropped; empty text collapses to `None`.
fn span_text(document: &Html, selector: &Selector) -> Option<String> {
    let element: ElementRef = document.select(selector).next()?;

    let text: String = element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| &**t))
        .collect();

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
