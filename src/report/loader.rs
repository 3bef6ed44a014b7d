use anyhow::{Context, Result, bail, ensure};
use std::collections::HashSet;
use std::path::Path;

use crate::models::ReportDocument;

/// Load and validate a report document from disk (JSON, YAML or TOML).
pub fn load_report(path: &Path) -> Result<ReportDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;

    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let doc = parse_report(&content, ext)
        .with_context(|| format!("Failed to parse report: {}", path.display()))?;

    validate_report(&doc)
        .with_context(|| format!("Invalid report: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        regions = doc.regions.len(),
        fragments = doc.fragment_count(),
        "loaded report"
    );
    Ok(doc)
}

/// Parse report content according to its file extension.
pub fn parse_report(content: &str, ext: &str) -> Result<ReportDocument> {
    let doc = match ext {
        "yaml" | "yml" => serde_yaml::from_str(content).context("Failed to parse YAML")?,
        "json" => serde_json::from_str(content).context("Failed to parse JSON")?,
        "toml" => toml::from_str(content).context("Failed to parse TOML")?,
        _ => bail!("Unsupported report format: {}", ext),
    };
    Ok(doc)
}

/// Validate that the report is well-formed.
fn validate_report(doc: &ReportDocument) -> Result<()> {
    ensure!(
        !doc.regions.is_empty(),
        "Report must contain at least one region"
    );

    let mut seen_ids = HashSet::new();
    for region in &doc.regions {
        ensure!(!region.id.trim().is_empty(), "Region id must not be empty");
        ensure!(
            seen_ids.insert(&region.id),
            "Duplicate region id: '{}'",
            region.id
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionClass;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_report_file(content: &str, extension: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{}", extension))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_report() {
        let file = write_report_file(
            r##"{
  "title": "Pilot vs Production",
  "pilot": "AADC-PILOT",
  "production": "AADC-PROD",
  "regions": [
    {"id": "header", "heading": "Setup", "fragments": ["Import-Module ADSync\n"]},
    {"id": "in-from-ad-user", "class": "DefaultRule", "heading": "In from AD - User",
     "lines": ["precedence 100 -> 105"], "fragments": ["Set-ADSyncRule -Precedence 105\n"]}
  ]
}"##,
            "json",
        );
        let doc = load_report(file.path()).unwrap();
        assert_eq!(doc.title, "Pilot vs Production");
        assert_eq!(doc.regions.len(), 2);
        assert_eq!(doc.regions[0].class, RegionClass::Unclassified);
        assert_eq!(doc.regions[1].class, RegionClass::DefaultRule);
        assert_eq!(doc.fragment_count(), 2);
    }

    #[test]
    fn test_load_yaml_report() {
        let file = write_report_file(
            r#"
title: "yaml report"
regions:
  - id: flow
    class: SummaryFlow
    heading: "End-to-end flow"
    lines:
      - "mail -> mail"
  - id: same
    class: ChangeOnly
    heading: "Unchanged rule"
"#,
            "yaml",
        );
        let doc = load_report(file.path()).unwrap();
        assert_eq!(doc.regions[0].class, RegionClass::SummaryFlow);
        assert_eq!(doc.regions[1].class, RegionClass::ChangeOnly);
        assert!(doc.regions[1].fragments.is_empty());
    }

    #[test]
    fn test_load_toml_report() {
        let file = write_report_file(
            r#"
title = "toml report"

[[regions]]
id = "rule-1"
class = "Unclassified"
heading = "Out to AAD - User"
fragments = ["New-ADSyncRule -Name 'Out to AAD - User'"]
"#,
            "toml",
        );
        let doc = load_report(file.path()).unwrap();
        assert_eq!(doc.regions[0].fragments[0].text, "New-ADSyncRule -Name 'Out to AAD - User'");
    }

    #[test]
    fn test_load_report_empty_regions() {
        let file = write_report_file(r#"{"title": "empty", "regions": []}"#, "json");
        let result = load_report(file.path());
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("at least one region"));
    }

    #[test]
    fn test_load_report_duplicate_ids() {
        let file = write_report_file(
            r#"{"title": "dupes", "regions": [{"id": "a"}, {"id": "a"}]}"#,
            "json",
        );
        let result = load_report(file.path());
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("Duplicate region id"));
    }

    #[test]
    fn test_load_report_unknown_class() {
        let file = write_report_file(
            r#"{"title": "bad", "regions": [{"id": "a", "class": "Mystery"}]}"#,
            "json",
        );
        assert!(load_report(file.path()).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = parse_report("<html></html>", "html");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported"));
    }
}
