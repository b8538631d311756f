//! Humanizer - turns raw identifiers and resource paths into display labels
//!
//! `ExecuteDebugger` -> `Execute Debugger`, `/icons/run_http.svg` -> `Run HTTP`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Boundary between a lowercase letter/digit and an uppercase letter (`runAll`)
static LOWER_UPPER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid LOWER_UPPER_RE regex"));

/// Boundary inside an uppercase run followed by a capitalized word (`HTTPServer`)
static ACRONYM_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").expect("Invalid ACRONYM_WORD_RE regex"));

/// Words always rendered fully uppercase
static ACRONYMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "API", "ADB", "CPU", "GPU", "USB", "HTTP", "HTTPS", "XML", "SQL", "SDK", "APK", "JVM",
        "JRE", "JDK", "NPM",
    ]
    .into_iter()
    .collect()
});

/// Humanize a raw identifier such as a field or file stem
pub fn humanize_identifier(raw: &str) -> String {
    let spaced = raw.replace(['-', '_'], " ");
    let spaced = LOWER_UPPER_RE.replace_all(&spaced, "$1 $2");
    let spaced = ACRONYM_WORD_RE.replace_all(&spaced, "$1 $2");

    spaced
        .split_whitespace()
        .map(humanize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Humanize a resource path by its file stem (`/icons/actions/execute.svg` -> `Execute`)
pub fn humanize_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(idx) if idx > 0 => &file[..idx],
        _ => file,
    };
    humanize_identifier(stem)
}

fn humanize_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if ACRONYMS.contains(upper.as_str()) {
        return upper;
    }
    if word.eq_ignore_ascii_case("wifi") {
        return "WiFi".to_string();
    }

    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_split() {
        assert_eq!(humanize_identifier("ExecuteDebugger"), "Execute Debugger");
        assert_eq!(humanize_identifier("runAll2Tests"), "Run All2 Tests");
    }

    #[test]
    fn test_separators_normalized() {
        assert_eq!(humanize_identifier("run_all-tests"), "Run All Tests");
        assert_eq!(humanize_identifier("  spaced__out  "), "Spaced Out");
    }

    #[test]
    fn test_acronyms_preserved() {
        assert_eq!(humanize_identifier("HTTPServer"), "HTTP Server");
        assert_eq!(humanize_identifier("run_sql"), "Run SQL");
        assert_eq!(humanize_identifier("adbDevice"), "ADB Device");
    }

    #[test]
    fn test_wifi_special_case() {
        assert_eq!(humanize_identifier("wifi_on"), "WiFi On");
    }

    #[test]
    fn test_upper_constant_lowercased() {
        assert_eq!(humanize_identifier("EXECUTE"), "Execute");
    }

    #[test]
    fn test_humanize_path_uses_stem() {
        assert_eq!(humanize_path("/icons/run.svg"), "Run");
        assert_eq!(humanize_path("/icons/actions/stop_all.png"), "Stop All");
        assert_eq!(humanize_path("noext"), "Noext");
        assert_eq!(humanize_path("/icons/.hidden"), ".hidden");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(humanize_identifier(""), "");
    }
}
