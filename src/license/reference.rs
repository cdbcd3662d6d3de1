use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

static FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bsee\s+license\s+in\s+(\S+)").expect("valid file reference pattern")
});

/// Detect a pointer to license text that lives elsewhere.
///
/// Returns the URL or filename verbatim. URLs win over file references.
pub fn detect_reference(normalized: &str) -> Option<String> {
    if let Some(url) = URL_PATTERN.find(normalized) {
        return Some(url.as_str().to_string());
    }

    FILE_PATTERN
        .captures(normalized)
        .map(|caps| caps[1].to_string())
}
