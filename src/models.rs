use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// Outcome of classifying one declared license string.
///
/// The [`Display`](std::fmt::Display) form is the public string contract:
/// verbatim expressions, starred guesses, exact matches such as
/// `Public Domain`, `Custom: <value>` and `Undefined`. A missing
/// classification is represented by `None` at the call site, never by a
/// variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// No declared value at all.
    Undefined,
    /// The input already parses as a license expression; kept verbatim.
    Expression(String),
    /// A license recognized heuristically from its signature text.
    Guessed(String),
    /// A signature whose result is rendered as-is, without a marker.
    Exact(String),
    /// A URL or file the real license text lives in.
    Custom(String),
}

impl Classification {
    /// `true` for results produced by signature matching and rendered with `*`.
    pub fn is_guess(&self) -> bool {
        matches!(self, Classification::Guessed(_))
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Undefined => write!(f, "Undefined"),
            Classification::Expression(expr) => write!(f, "{}", expr),
            Classification::Guessed(id) => write!(f, "{}*", id),
            Classification::Exact(id) => write!(f, "{}", id),
            Classification::Custom(value) => write!(f, "Custom: {}", value),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVerdict {
    Pass,
    Warn,
    Error,
}

impl std::fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVerdict::Pass => write!(f, "pass"),
            PolicyVerdict::Warn => write!(f, "warn"),
            PolicyVerdict::Error => write!(f, "error"),
        }
    }
}

/// Where a declared license string came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum InputSource {
    Argument,
    Stdin,
    File(PathBuf),
    Package(PathBuf),
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Argument => write!(f, "argument"),
            InputSource::Stdin => write!(f, "stdin"),
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Package(path) => write!(f, "{} (license)", path.display()),
        }
    }
}

/// One classified declaration, as reported by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub source: InputSource,
    pub declared: Option<String>,
    pub license: Option<Classification>,
    pub verdict: PolicyVerdict,
}

impl Finding {
    /// Rendered classification, or `"unknown"` when nothing matched.
    pub fn license_label(&self) -> String {
        self.license
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contract() {
        assert_eq!(Classification::Undefined.to_string(), "Undefined");
        assert_eq!(
            Classification::Expression("MIT OR ISC".into()).to_string(),
            "MIT OR ISC"
        );
        assert_eq!(Classification::Guessed("GPL-2.0".into()).to_string(), "GPL-2.0*");
        assert_eq!(
            Classification::Exact("Public Domain".into()).to_string(),
            "Public Domain"
        );
        assert_eq!(
            Classification::Custom("LICENSE.md".into()).to_string(),
            "Custom: LICENSE.md"
        );
    }

    #[test]
    fn test_only_guesses_are_starred() {
        assert!(Classification::Guessed("MIT".into()).is_guess());
        assert!(!Classification::Exact("Public Domain".into()).is_guess());
        assert!(!Classification::Expression("MIT".into()).is_guess());
    }

    #[test]
    fn test_finding_serializes_rendered_license() {
        let finding = Finding {
            source: InputSource::Argument,
            declared: Some("BSD".into()),
            license: Some(Classification::Expression("BSD".into())),
            verdict: PolicyVerdict::Warn,
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["license"], "BSD");
        assert_eq!(json["verdict"], "warn");
        assert_eq!(json["source"]["kind"], "argument");
    }
}
