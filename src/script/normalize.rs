use lazy_static::lazy_static;
use regex::bytes::{NoExpand, Regex};

lazy_static! {
    // An optional carriage return followed by a line feed.
    static ref LINE_BREAK: Regex = Regex::new(r"\r?\n").unwrap();
}

/// Rewrite every bare `\n` as `\r\n`. Existing `\r\n` pairs are left as they are.
pub fn normalize_line_endings(bytes: &[u8]) -> Vec<u8> {
    LINE_BREAK.replace_all(bytes, NoExpand(b"\r\n")).into_owned()
}
