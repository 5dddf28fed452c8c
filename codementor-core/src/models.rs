//! Request and response models for the analysis endpoint.
//!
//! The wire format is fixed by the endpoint: a POST body of
//! `{"code": ..., "language": ...}` and a reply of
//! `{"explanation": ..., "improvements": [...], "documentation": ...}`.

use serde::{Deserialize, Serialize};

/// Source languages accepted by the analysis endpoint.
///
/// The serialized form is the exact lowercase tag the endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Language {
    /// Python
    #[default]
    Python,
    /// JavaScript
    Javascript,
    /// Java
    Java,
    /// C++
    Cpp,
    /// TypeScript
    Typescript,
}

impl Language {
    /// All languages, in selector order.
    pub fn all() -> &'static [Language] {
        &[
            Language::Python,
            Language::Javascript,
            Language::Java,
            Language::Cpp,
            Language::Typescript,
        ]
    }

    /// The wire tag sent to the endpoint.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Typescript => "typescript",
        }
    }

    /// Human-readable name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Javascript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::Typescript => "TypeScript",
        }
    }

    /// The language after this one in selector order, wrapping around.
    pub fn next(&self) -> Language {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// The language before this one in selector order, wrapping around.
    pub fn prev(&self) -> Language {
        let all = Self::all();
        let idx = all.iter().position(|l| l == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::Javascript),
            "java" => Ok(Language::Java),
            "cpp" => Ok(Language::Cpp),
            "typescript" => Ok(Language::Typescript),
            _ => Err(format!(
                "Invalid language: '{s}'. Valid options: python, javascript, java, cpp, typescript"
            )),
        }
    }
}

/// A single analysis submission. Built fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The source code to analyze
    pub code: String,
    /// The language the code is written in
    pub language: Language,
}

/// The endpoint's reply.
///
/// The endpoint performs no schema negotiation, so every field defaults to
/// empty when missing rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Prose explanation of what the code does
    #[serde(default)]
    pub explanation: String,
    /// Improvement suggestions, in endpoint order
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Generated documentation, displayed preformatted
    #[serde(default)]
    pub documentation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags_round_trip() {
        for language in Language::all() {
            let json = serde_json::to_string(language).unwrap();
            assert_eq!(json, format!("\"{}\"", language.tag()));
            let back: Language = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *language);
            assert_eq!(language.tag().parse::<Language>().unwrap(), *language);
        }
    }

    #[test]
    fn five_languages_in_selector_order() {
        let tags: Vec<&str> = Language::all().iter().map(Language::tag).collect();
        assert_eq!(tags, ["python", "javascript", "java", "cpp", "typescript"]);
    }

    #[test]
    fn language_cycling_wraps() {
        assert_eq!(Language::Typescript.next(), Language::Python);
        assert_eq!(Language::Python.prev(), Language::Typescript);
        let mut language = Language::Python;
        for _ in 0..Language::all().len() {
            language = language.next();
        }
        assert_eq!(language, Language::Python);
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = AnalysisRequest {
            code: "int main() { return 0; }".to_string(),
            language: Language::Cpp,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "int main() { return 0; }",
                "language": "cpp",
            })
        );
    }

    #[test]
    fn response_parses_full_body() {
        let body = r#"{
            "explanation": "E",
            "improvements": ["a", "b"],
            "documentation": "D"
        }"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.explanation, "E");
        assert_eq!(response.improvements, ["a", "b"]);
        assert_eq!(response.documentation, "D");
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let response: AnalysisResponse =
            serde_json::from_str(r#"{"explanation": "E"}"#).unwrap();
        assert_eq!(response.explanation, "E");
        assert!(response.improvements.is_empty());
        assert!(response.documentation.is_empty());
    }

    #[test]
    fn invalid_language_is_rejected() {
        assert!("rust".parse::<Language>().is_err());
        assert!(serde_json::from_str::<Language>("\"rust\"").is_err());
    }
}
