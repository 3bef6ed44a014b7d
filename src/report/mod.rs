pub mod loader;
mod models;
mod output;

use anyhow::Result;
use std::path::Path;
use walkdir::WalkDir;

use crate::filter::{FilterState, apply_filters};
use crate::models::{RegionClass, ReportDocument};
use crate::script::assemble;
use crate::utils::is_report_file;
use models::{ClassCount, OverviewSection, RegionView, ReportView, ScriptOffer};

/// Render a report under the given filters.
pub fn view_report(
    path: &str,
    state: FilterState,
    format: &str,
    output_file: Option<&str>,
) -> Result<()> {
    let doc = loader::load_report(Path::new(path))?;
    let view = build_view(&doc, state);

    match format {
        "json" => output::output_json(&view, output_file)?,
        "markdown" | "md" => output::output_markdown(&view, output_file)?,
        "html" => output::output_html(&view, output_file)?,
        _ => output::output_terminal(&view)?,
    }

    Ok(())
}

/// Validate one report, or every report file under a directory.
/// Returns true if any report was invalid.
pub fn validate_reports(path: &str) -> Result<bool> {
    let root = Path::new(path);
    let files: Vec<_> = if root.is_dir() {
        let mut found: Vec<_> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_report_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        found.sort();
        found
    } else {
        vec![root.to_path_buf()]
    };

    if files.is_empty() {
        tracing::warn!(path, "no report files found");
    }

    let mut has_invalid = false;
    for file in &files {
        match loader::load_report(file) {
            Ok(doc) => println!(
                "Report '{}' is valid ({} regions, {} fragments): {}",
                doc.title,
                doc.regions.len(),
                doc.fragment_count(),
                file.display()
            ),
            Err(e) => {
                has_invalid = true;
                println!("Invalid: {:#}", e);
            }
        }
    }
    Ok(has_invalid)
}

/// Apply `state` to `doc` and collect what the operator sees.
pub fn build_view(doc: &ReportDocument, state: FilterState) -> ReportView {
    let visibility = apply_filters(doc, &state);

    let regions: Vec<RegionView> = doc
        .regions
        .iter()
        .enumerate()
        .filter(|(i, _)| visibility.is_shown(*i))
        .map(|(_, r)| RegionView {
            id: r.id.clone(),
            class: r.class,
            heading: r.heading.clone(),
            lines: r.lines.clone(),
            fragments: r.fragments.iter().map(|f| f.text.clone()).collect(),
        })
        .collect();

    let classes = RegionClass::ALL
        .iter()
        .map(|class| ClassCount {
            class: *class,
            total: doc.regions.iter().filter(|r| r.class == *class).count(),
            shown: regions.iter().filter(|r| r.class == *class).count(),
        })
        .filter(|c| c.total > 0)
        .collect();

    let script = visibility.download_offered().then(|| {
        let script = assemble(doc, &visibility);
        ScriptOffer {
            suggested_filename: script.suggested_filename.to_string(),
            media_type: script.media_type.to_string(),
            fragment_count: script.fragment_count,
            bytes: script.bytes.len(),
            sha256: script.digest(),
        }
    });

    let overview = OverviewSection {
        rendered_at: chrono::Utc::now().to_rfc3339(),
        title: doc.title.clone(),
        report_generated_at: doc.generated_at.clone(),
        pilot: doc.pilot.clone(),
        production: doc.production.clone(),
        filters: state,
        total_regions: doc.regions.len(),
        shown_regions: visibility.shown_count(),
        hidden_regions: visibility.hidden_count(),
        visible_fragments: regions.iter().map(|r| r.fragments.len()).sum(),
        classes,
    };

    ReportView {
        overview,
        regions,
        script,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fragment, Region};

    fn make_doc() -> ReportDocument {
        let region = |id: &str, class: RegionClass, fragment: Option<&str>| Region {
            id: id.to_string(),
            class,
            heading: id.to_string(),
            lines: vec![format!("{} details", id)],
            fragments: fragment.map(Fragment::from).into_iter().collect(),
        };
        ReportDocument {
            title: "Pilot vs Production".to_string(),
            generated_at: None,
            pilot: Some("pilot".to_string()),
            production: Some("prod".to_string()),
            regions: vec![
                region("header", RegionClass::Unclassified, Some("Import-Module ADSync\n")),
                region("same", RegionClass::ChangeOnly, None),
                region("default", RegionClass::DefaultRule, Some("Set-ADSyncRule\n")),
                region("flow", RegionClass::SummaryFlow, None),
            ],
        }
    }

    #[test]
    fn test_default_view_shows_everything_without_script() {
        let view = build_view(&make_doc(), FilterState::default());
        assert_eq!(view.regions.len(), 4);
        assert_eq!(view.overview.hidden_regions, 0);
        assert_eq!(view.overview.visible_fragments, 2);
        assert!(view.script.is_none());
    }

    #[test]
    fn test_changes_only_view_offers_script() {
        let state = FilterState {
            only_show_changes: true,
            ..FilterState::default()
        };
        let view = build_view(&make_doc(), state);
        let ids: Vec<&str> = view.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["header", "default", "flow"]);
        let script = view.script.unwrap();
        assert_eq!(script.fragment_count, 2);
        assert_eq!(script.suggested_filename, "SyncRuleChanges.ps1.txt");
    }

    #[test]
    fn test_class_counts() {
        let state = FilterState {
            hide_default_rules: true,
            hide_end_to_end_summary: true,
            ..FilterState::default()
        };
        let view = build_view(&make_doc(), state);
        assert_eq!(view.overview.classes.len(), 4);
        let default = view
            .overview
            .classes
            .iter()
            .find(|c| c.class == RegionClass::DefaultRule)
            .unwrap();
        assert_eq!((default.total, default.shown), (1, 0));
        assert_eq!(view.overview.shown_regions, 2);
    }

    #[test]
    fn test_validate_reports_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("good.json"),
            r#"{"title": "ok", "regions": [{"id": "a"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        assert!(!validate_reports(dir.path().to_str().unwrap()).unwrap());

        std::fs::write(dir.path().join("bad.yaml"), "title: bad\nregions: []\n").unwrap();
        assert!(validate_reports(dir.path().to_str().unwrap()).unwrap());
    }
}
