//! Field map for the well detail page
//!
//! Maps each logical well field to the span ID it lives under in the
//! OCD permitting markup. The coordinates span is a synthetic entry: its
//! text holds latitude, longitude, and reference system together, and the
//! coordinate parser fans it out into three record fields.

/// Logical fields scraped from a well detail page, excluding the
/// coordinate-derived triple (latitude, longitude, crs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellField {
    Operator,
    Status,
    WellType,
    WorkType,
    DirectionalStatus,
    MultiLateral,
    MineralOwner,
    SurfaceOwner,
    SurfaceLocation,
    GlElevation,
    KbElevation,
    DfElevation,
    SingleMultipleCompletion,
    PotashWaiver,
    SpudDate,
    LastInspection,
    Tvd,
}

/// Span-id locators for every non-coordinate field.
pub const FIELD_LOCATORS: &[(WellField, &str)] = &[
    (
        WellField::Operator,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblOperator",
    ),
    (
        WellField::Status,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblStatus",
    ),
    (
        WellField::WellType,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblWellType",
    ),
    (
        WellField::WorkType,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblWorkType",
    ),
    (
        WellField::DirectionalStatus,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblDirectionalStatus",
    ),
    (
        WellField::MultiLateral,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblMultiLateral",
    ),
    (
        WellField::MineralOwner,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblMineralOwner",
    ),
    (
        WellField::SurfaceOwner,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblSurfaceOwner",
    ),
    (
        WellField::SurfaceLocation,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_Location_lblLocation",
    ),
    (
        WellField::GlElevation,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblGLElevation",
    ),
    (
        WellField::KbElevation,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblKBElevation",
    ),
    (
        WellField::DfElevation,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblDFElevation",
    ),
    (
        WellField::SingleMultipleCompletion,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblCompletions",
    ),
    (
        WellField::PotashWaiver,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblPotashWaiver",
    ),
    (
        WellField::SpudDate,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblSpudDate",
    ),
    (
        WellField::LastInspection,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblLastInspectionDate",
    ),
    (
        WellField::Tvd,
        "ctl00_ctl00__main_main_ucGeneralWellInformation_lblTrueVerticalDepth",
    ),
];

/// Locator for the combined coordinates span (`"<lat>,<lon> <crs>"`).
pub const COORDINATES_LOCATOR: &str =
    "ctl00_ctl00__main_main_ucGeneralWellInformation_Location_lblCoordinates";
