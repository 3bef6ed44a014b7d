use serde::Serialize;

use crate::filter::FilterState;
use crate::models::RegionClass;

/// Number of regions carrying a classification tag.
#[derive(Debug, Serialize)]
pub struct ClassCount {
    pub class: RegionClass,
    pub total: usize,
    pub shown: usize,
}

/// Summary statistics for the filtered view.
#[derive(Debug, Serialize)]
pub struct OverviewSection {
    pub rendered_at: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pilot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    pub filters: FilterState,
    pub total_regions: usize,
    pub shown_regions: usize,
    pub hidden_regions: usize,
    pub visible_fragments: usize,
    pub classes: Vec<ClassCount>,
}

/// A region that survived filtering.
#[derive(Debug, Serialize)]
pub struct RegionView {
    pub id: String,
    pub class: RegionClass,
    pub heading: String,
    pub lines: Vec<String>,
    pub fragments: Vec<String>,
}

/// The remediation script offered alongside a changes-only view.
#[derive(Debug, Serialize)]
pub struct ScriptOffer {
    pub suggested_filename: String,
    pub media_type: String,
    pub fragment_count: usize,
    pub bytes: usize,
    pub sha256: String,
}

/// The filtered report as rendered to the operator.
#[derive(Debug, Serialize)]
pub struct ReportView {
    pub overview: OverviewSection,
    pub regions: Vec<RegionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptOffer>,
}
