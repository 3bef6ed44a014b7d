use serde::{Deserialize, Serialize};

/// Classification tag attached to every region by the comparison engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionClass {
    /// Non-change content that is dropped from the changes-only view.
    ChangeOnly,
    /// Content describing a default (out-of-box) sync rule.
    DefaultRule,
    /// End-to-end attribute flow summary.
    SummaryFlow,
    #[default]
    Unclassified,
}

impl RegionClass {
    pub const ALL: [RegionClass; 4] = [
        RegionClass::ChangeOnly,
        RegionClass::DefaultRule,
        RegionClass::SummaryFlow,
        RegionClass::Unclassified,
    ];
}

impl std::fmt::Display for RegionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionClass::ChangeOnly => write!(f, "ChangeOnly"),
            RegionClass::DefaultRule => write!(f, "DefaultRule"),
            RegionClass::SummaryFlow => write!(f, "SummaryFlow"),
            RegionClass::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// A piece of remediation script text embedded in a region.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Fragment {
    pub text: String,
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment {
            text: text.to_string(),
        }
    }
}

/// A classified, independently hideable block of the comparison report.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub class: RegionClass,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

/// The rendered comparison between the pilot and production rule sets.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: Option<String>,
    pub pilot: Option<String>,
    pub production: Option<String>,
    pub regions: Vec<Region>,
}

impl ReportDocument {
    pub fn fragment_count(&self) -> usize {
        self.regions.iter().map(|r| r.fragments.len()).sum()
    }
}
