/// Delimiter line framing the footer banner.
pub const BANNER_DELIMITER: &str =
    "################################################################################";

pub const BANNER_TITLE: &str = "# Sync rule change summary";

/// Closing lines emitted when the script holds no real changes.
pub const NO_CHANGES_NOTICE: [&str; 2] = [
    "Write-Host \"No sync rule changes were detected between pilot and production.\" -ForegroundColor Green",
    "Write-Host \"Review the comparison report manually to confirm nothing needs to be applied.\" -ForegroundColor Yellow",
];

/// Closing block that reports whether any earlier command in the script failed.
pub const ERROR_CHECK: [&str; 9] = [
    "if ($Error.Count -gt 0) {",
    "    Write-Host \"$($Error.Count) error(s) were raised while applying the sync rule changes.\" -ForegroundColor Red",
    "    Write-Host \"Review the errors above before running a synchronization cycle.\" -ForegroundColor Red",
    "}",
    "else {",
    "    Write-Host \"All sync rule changes were applied without errors.\" -ForegroundColor Green",
    "    Write-Host \"Re-run the comparison report to confirm pilot and production now match.\" -ForegroundColor Green",
    "    Write-Host \"Then run a full synchronization cycle: Start-ADSyncSyncCycle -PolicyType Initial\" -ForegroundColor Green",
    "}",
];

/// Build the footer for a script containing `fragment_count` fragments.
/// Lines are terminated with `\n`; normalization happens afterwards.
pub fn render_footer(fragment_count: usize) -> String {
    let mut footer = String::new();
    footer.push_str(BANNER_DELIMITER);
    footer.push('\n');
    footer.push_str(BANNER_TITLE);
    footer.push('\n');
    footer.push_str(BANNER_DELIMITER);
    footer.push('\n');
    footer.push('\n');

    let closing: &[&str] = if fragment_count <= 1 {
        &NO_CHANGES_NOTICE
    } else {
        &ERROR_CHECK
    };
    for line in closing {
        footer.push_str(line);
        footer.push('\n');
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_shape() {
        let footer = render_footer(3);
        let lines: Vec<&str> = footer.split('\n').collect();
        assert!(lines[0].chars().all(|c| c == '#'));
        assert_eq!(lines[1], BANNER_TITLE);
        assert_eq!(lines[2], BANNER_DELIMITER);
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_single_fragment_uses_notice() {
        let footer = render_footer(1);
        assert!(footer.contains("No sync rule changes were detected"));
        assert!(!footer.contains("$Error.Count"));
    }

    #[test]
    fn test_many_fragments_use_error_check() {
        let footer = render_footer(2);
        assert!(footer.contains("if ($Error.Count -gt 0) {"));
        assert!(footer.contains("Start-ADSyncSyncCycle -PolicyType Initial"));
        assert!(!footer.contains("No sync rule changes were detected"));
    }
}
