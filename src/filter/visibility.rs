use crate::models::{RegionClass, ReportDocument};

use super::FilterState;

/// Which regions are shown under a given filter state, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    shown: Vec<bool>,
    download_offered: bool,
}

impl Visibility {
    pub fn is_shown(&self, index: usize) -> bool {
        self.shown.get(index).copied().unwrap_or(false)
    }

    /// The remediation script is only offered in the changes-only view.
    pub fn download_offered(&self) -> bool {
        self.download_offered
    }

    pub fn shown_count(&self) -> usize {
        self.shown.iter().filter(|s| **s).count()
    }

    pub fn hidden_count(&self) -> usize {
        self.shown.len() - self.shown_count()
    }
}

/// Whether a region of the given class is shown under `state`.
pub fn is_class_shown(class: RegionClass, state: &FilterState) -> bool {
    let hidden_by_changes = state.only_show_changes && class == RegionClass::ChangeOnly;
    let hidden_by_defaults = state.hide_default_rules && class == RegionClass::DefaultRule;
    let hidden_by_summary = state.hide_end_to_end_summary && class == RegionClass::SummaryFlow;
    !hidden_by_changes && !hidden_by_defaults && !hidden_by_summary
}

/// Compute region visibility for the whole document.
pub fn apply_filters(doc: &ReportDocument, state: &FilterState) -> Visibility {
    Visibility {
        shown: doc
            .regions
            .iter()
            .map(|r| is_class_shown(r.class, state))
            .collect(),
        download_offered: state.only_show_changes,
    }
}
