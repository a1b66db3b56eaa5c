//! Cached provider payloads.

use serde::de::IgnoredAny;

/// Verbatim JSON text of a provider document.
///
/// Construction validates that the text is well-formed JSON, so anything held
/// in a `RawRates` is safe to write to the cache or serve as a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRates(String);

impl RawRates {
    /// Wraps `text` after checking it parses as JSON.
    pub fn parse(text: impl Into<String>) -> Result<Self, serde_json::Error> {
        let text = text.into();
        serde_json::from_str::<IgnoredAny>(&text)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_text_verbatim() {
        let text = r#"{ "usd" : { "eur" : 1.05 } }"#;
        let raw = RawRates::parse(text).unwrap();
        assert_eq!(raw.as_str(), text);
        assert_eq!(raw.into_string(), text);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(RawRates::parse("<html>502 Bad Gateway</html>").is_err());
        assert!(RawRates::parse(r#"{"truncated": "#).is_err());
    }
}
