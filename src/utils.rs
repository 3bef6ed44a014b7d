use sha2::{Digest, Sha256};
use std::io::IsTerminal;
use std::path::Path;
use termcolor::ColorChoice;

/// Compute the SHA-256 hex digest of a byte slice
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Check if a file is a supported report document format
pub fn is_report_file(p: &Path) -> bool {
    matches!(
        p.extension().and_then(|s| s.to_str()),
        Some("yml" | "yaml" | "json" | "toml")
    )
}

/// Colors only when stdout is a terminal, so piped output stays plain
pub fn color_choice() -> ColorChoice {
    if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
