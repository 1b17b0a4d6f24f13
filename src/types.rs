//! Core types shared across the scraper, store, and read API.

use serde::{Deserialize, Serialize};

use crate::fields::WellField;

/// One scraped well record, keyed by its API number.
///
/// Constructed once by the field extractor and never mutated afterwards.
/// Every field other than `api` is optional; absence in the source markup
/// is represented as `None`, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    pub api: String,
    pub operator: Option<String>,
    pub status: Option<String>,
    pub well_type: Option<String>,
    pub work_type: Option<String>,
    pub directional_status: Option<String>,
    pub multi_lateral: Option<String>,
    pub mineral_owner: Option<String>,
    pub surface_owner: Option<String>,
    pub surface_location: Option<String>,
    pub gl_elevation: Option<f64>,
    pub kb_elevation: Option<f64>,
    pub df_elevation: Option<f64>,
    pub single_multiple_completion: Option<String>,
    pub potash_waiver: Option<String>,
    pub spud_date: Option<String>,
    pub last_inspection: Option<String>,
    pub tvd: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub crs: Option<String>,
}

impl WellRecord {
    /// Create an empty record for the given identifier.
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            operator: None,
            status: None,
            well_type: None,
            work_type: None,
            directional_status: None,
            multi_lateral: None,
            mineral_owner: None,
            surface_owner: None,
            surface_location: None,
            gl_elevation: None,
            kb_elevation: None,
            df_elevation: None,
            single_multiple_completion: None,
            potash_waiver: None,
            spud_date: None,
            last_inspection: None,
            tvd: None,
            latitude: None,
            longitude: None,
            crs: None,
        }
    }

    /// Assign a field from its extracted text. Numeric fields are parsed
    /// leniently (thousands separators stripped); unparseable text
    /// degrades to `None`.
    pub(crate) fn set_field(&mut self, field: WellField, text: Option<String>) {
        match field {
            WellField::Operator => self.operator = text,
            WellField::Status => self.status = text,
            WellField::WellType => self.well_type = text,
            WellField::WorkType => self.work_type = text,
            WellField::DirectionalStatus => self.directional_status = text,
            WellField::MultiLateral => self.multi_lateral = text,
            WellField::MineralOwner => self.mineral_owner = text,
            WellField::SurfaceOwner => self.surface_owner = text,
            WellField::SurfaceLocation => self.surface_location = text,
            WellField::GlElevation => self.gl_elevation = parse_float(text),
            WellField::KbElevation => self.kb_elevation = parse_float(text),
            WellField::DfElevation => self.df_elevation = parse_float(text),
            WellField::SingleMultipleCompletion => self.single_multiple_completion = text,
            WellField::PotashWaiver => self.potash_waiver = text,
            WellField::SpudDate => self.spud_date = text,
            WellField::LastInspection => self.last_inspection = text,
            WellField::Tvd => self.tvd = parse_float(text),
        }
    }

    /// True when every field other than the identifier is absent.
    ///
    /// A page that yields nothing (wrong identifier, placeholder page)
    /// produces an empty record, which the coordinator counts as an
    /// error rather than persisting.
    pub fn is_empty(&self) -> bool {
        self.operator.is_none()
            && self.status.is_none()
            && self.well_type.is_none()
            && self.work_type.is_none()
            && self.directional_status.is_none()
            && self.multi_lateral.is_none()
            && self.mineral_owner.is_none()
            && self.surface_owner.is_none()
            && self.surface_location.is_none()
            && self.gl_elevation.is_none()
            && self.kb_elevation.is_none()
            && self.df_elevation.is_none()
            && self.single_multiple_completion.is_none()
            && self.potash_waiver.is_none()
            && self.spud_date.is_none()
            && self.last_inspection.is_none()
            && self.tvd.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.crs.is_none()
    }
}

fn parse_float(text: Option<String>) -> Option<f64> {
    text.and_then(|t| t.replace(',', "").trim().parse().ok())
}

/// Final counters for one scrape run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Records successfully fetched, extracted, and upserted.
    pub inserted: u64,
    /// Identifiers that failed to fetch, yielded no data, or hit an
    /// unexpected error during processing.
    pub errored: u64,
    /// Blank identifiers that never reached the fetcher.
    pub skipped: u64,
}

impl RunSummary {
    pub fn total(&self) -> u64 {
        self.inserted + self.errored + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_detection() {
        let mut record = WellRecord::new("30-025-12345");
        assert!(record.is_empty());

        record.set_field(WellField::Operator, Some("ACME Energy".to_string()));
        assert!(!record.is_empty());
    }

    #[test]
    fn numeric_fields_parse_leniently() {
        let mut record = WellRecord::new("30-025-12345");
        record.set_field(WellField::Tvd, Some("12,345".to_string()));
        assert_eq!(record.tvd, Some(12345.0));

        record.set_field(WellField::GlElevation, Some("not a number".to_string()));
        assert_eq!(record.gl_elevation, None);

        record.set_field(WellField::KbElevation, None);
        assert_eq!(record.kb_elevation, None);
    }

    #[test]
    fn summary_totals() {
        let summary = RunSummary {
            inserted: 3,
            errored: 1,
            skipped: 2,
        };
        assert_eq!(summary.total(), 6);
    }
}
