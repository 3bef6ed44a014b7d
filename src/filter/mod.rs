pub mod visibility;

use serde::Serialize;

pub use visibility::{Visibility, apply_filters};

/// The three operator toggles controlling which regions are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub only_show_changes: bool,
    pub hide_default_rules: bool,
    pub hide_end_to_end_summary: bool,
}

/// A single operator action flipping one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    OnlyShowChanges,
    HideDefaultRules,
    HideEndToEndSummary,
}

impl Toggle {
    /// Parse a session command word into a toggle.
    pub fn from_command(word: &str) -> Option<Toggle> {
        match word {
            "changes" => Some(Toggle::OnlyShowChanges),
            "defaults" => Some(Toggle::HideDefaultRules),
            "summary" => Some(Toggle::HideEndToEndSummary),
            _ => None,
        }
    }
}

impl FilterState {
    /// Return the state with one toggle flipped.
    pub fn toggle(self, toggle: Toggle) -> FilterState {
        let mut next = self;
        match toggle {
            Toggle::OnlyShowChanges => next.only_show_changes = !next.only_show_changes,
            Toggle::HideDefaultRules => next.hide_default_rules = !next.hide_default_rules,
            Toggle::HideEndToEndSummary => {
                next.hide_end_to_end_summary = !next.hide_end_to_end_summary
            }
        }
        next
    }
}

impl std::fmt::Display for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |b: bool| if b { "on" } else { "off" };
        write!(
            f,
            "changes-only: {} | hide defaults: {} | hide summary: {}",
            flag(self.only_show_changes),
            flag(self.hide_default_rules),
            flag(self.hide_end_to_end_summary)
        )
    }
}
