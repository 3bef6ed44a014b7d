use serde::Serialize;

use crate::filter::Visibility;
use crate::models::ReportDocument;
use crate::utils::hash_bytes;

use super::footer::render_footer;
use super::normalize::normalize_line_endings;

pub const SCRIPT_FILENAME: &str = "SyncRuleChanges.ps1.txt";
pub const SCRIPT_MEDIA_TYPE: &str = "text/plain";

/// The remediation script built from the currently visible fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledScript {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub fragment_count: usize,
    pub media_type: &'static str,
    pub suggested_filename: &'static str,
}

impl AssembledScript {
    pub fn digest(&self) -> String {
        hash_bytes(&self.bytes)
    }
}

/// Concatenate visible fragments in document order, append the footer and
/// normalize every line terminator to `\r\n`.
pub fn assemble(doc: &ReportDocument, visibility: &Visibility) -> AssembledScript {
    let mut text = String::new();
    let mut fragment_count = 0;

    for (index, region) in doc.regions.iter().enumerate() {
        if !visibility.is_shown(index) {
            continue;
        }
        for fragment in &region.fragments {
            text.push_str(&fragment.text);
            if !fragment.text.ends_with('\n') {
                text.push('\n');
            }
            fragment_count += 1;
        }
    }

    text.push_str(&render_footer(fragment_count));

    AssembledScript {
        bytes: normalize_line_endings(text.as_bytes()),
        fragment_count,
        media_type: SCRIPT_MEDIA_TYPE,
        suggested_filename: SCRIPT_FILENAME,
    }
}
