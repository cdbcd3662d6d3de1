use serde_json::Value;

use crate::license::expression;
use crate::license::normalize::{as_text, normalize, LicenseError, Normalized};
use crate::license::reference::detect_reference;
use crate::license::signatures::match_signature;
use crate::models::Classification;

/// Classify a declared license string.
///
/// Stages, first hit wins:
/// 1. Absent or blank input → [`Classification::Undefined`]
/// 2. A well-formed license expression → passed through verbatim
/// 3. A known license signature → starred guess (or an exact match)
/// 4. A URL or `see license in <file>` reference → [`Classification::Custom`]
///
/// `None` means nothing could be recognized; that is an ordinary outcome.
pub fn classify(raw: Option<&str>) -> Option<Classification> {
    let text = match normalize(raw) {
        Normalized::Undefined => return Some(Classification::Undefined),
        Normalized::Text(text) => text,
    };

    if is_passthrough_expression(&text) {
        return Some(Classification::Expression(text));
    }

    if let Some(found) = match_signature(&text) {
        return Some(found);
    }

    detect_reference(&text).map(Classification::Custom)
}

/// String form of [`classify`].
pub fn license(raw: Option<&str>) -> Option<String> {
    classify(raw).map(|c| c.to_string())
}

/// Classify a dynamically typed value such as a `package.json` `license` field.
///
/// Fails only when the value is not a string (or `null`).
pub fn license_value(value: &Value) -> Result<Option<String>, LicenseError> {
    Ok(license(as_text(value)?))
}

/// A bare identifier spelled like "public domain" is left to the matcher.
fn is_passthrough_expression(text: &str) -> bool {
    match expression::parse(text) {
        Ok(expr) => !expr
            .as_single_id()
            .is_some_and(|id| id.eq_ignore_ascii_case("public-domain")),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expression_takes_precedence() {
        assert_eq!(
            classify(Some("MIT")),
            Some(Classification::Expression("MIT".to_string()))
        );
        assert_eq!(license(Some("BSD")), Some("BSD".to_string()));
    }

    #[test]
    fn test_signature_is_starred() {
        assert_eq!(license(Some("asdf\nMIT\nasdf")), Some("MIT*".to_string()));
    }

    #[test]
    fn test_public_domain_spellings() {
        for s in ["Public Domain", "Public-Domain", "public-domain", "Public_Domain"] {
            assert_eq!(license(Some(s)), Some("Public Domain".to_string()), "{s}");
        }
    }

    #[test]
    fn test_reference_after_signatures() {
        assert_eq!(
            license(Some("MIT, see http://example.com/LICENSE")),
            Some("MIT*".to_string())
        );
        assert_eq!(
            license(Some("See license at http://example.com/foo")),
            Some("Custom: http://example.com/foo".to_string())
        );
    }

    #[test]
    fn test_nothing_recognized() {
        assert_eq!(classify(Some("this is empty, hi")), None);
    }

    #[test]
    fn test_undefined() {
        assert_eq!(classify(None), Some(Classification::Undefined));
        assert_eq!(license(Some("\n\n")), Some("Undefined".to_string()));
    }

    #[test]
    fn test_license_value() {
        assert_eq!(license_value(&json!("ISC")), Ok(Some("ISC".to_string())));
        assert_eq!(license_value(&Value::Null), Ok(Some("Undefined".to_string())));
        assert!(license_value(&json!({ "type": "MIT" })).is_err());
        assert!(license_value(&json!(["MIT"])).is_err());
    }
}
