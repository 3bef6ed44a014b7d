mod assembler;
mod footer;
mod normalize;

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::delivery::{Delivery, DeliveryAdapter, SaveHost};
use crate::filter::{FilterState, apply_filters};
use crate::report::loader::load_report;

pub use assembler::{AssembledScript, assemble};

#[cfg(test)]
pub use assembler::{SCRIPT_FILENAME, SCRIPT_MEDIA_TYPE};

/// Assemble the remediation script from a report in changes-only view and
/// either save it under `out_dir` or write the raw bytes to stdout.
pub fn generate_script(
    report_path: &str,
    hide_default_rules: bool,
    hide_summary: bool,
    out_dir: &str,
    to_stdout: bool,
) -> Result<()> {
    let doc = load_report(Path::new(report_path))?;
    let state = FilterState {
        only_show_changes: true,
        hide_default_rules,
        hide_end_to_end_summary: hide_summary,
    };
    let visibility = apply_filters(&doc, &state);
    let script = assemble(&doc, &visibility);
    tracing::debug!(
        fragments = script.fragment_count,
        digest = %script.digest(),
        "assembled script"
    );

    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&script.bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    let mut adapter = DeliveryAdapter::new(SaveHost::new(out_dir));
    match adapter.deliver(&script)? {
        Delivery::Saved { path } => println!(
            "Wrote {} ({} fragments) to {}",
            script.suggested_filename,
            script.fragment_count,
            path.display()
        ),
        Delivery::Link(link) => println!("Script available at {}", link.url),
    }
    Ok(())
}
