//! Configuration for the Code Mentor binaries.

use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default base URL of the analysis endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Runtime configuration, loadable from a TOML file.
///
/// Command-line flags override anything loaded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
    /// Base URL of the analysis endpoint
    pub endpoint: String,
    /// Language preselected in the form
    pub default_language: Language,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_language: Language::Python,
        }
    }
}

impl MentorConfig {
    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_endpoint_contract() {
        let config = MentorConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.default_language, Language::Python);
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://analysis.internal:9000\"").unwrap();

        let config = MentorConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://analysis.internal:9000");
        assert_eq!(config.default_language, Language::Python);
    }

    #[test]
    fn load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://127.0.0.1:8000\"").unwrap();
        writeln!(file, "default_language = \"typescript\"").unwrap();

        let config = MentorConfig::load(file.path()).unwrap();
        assert_eq!(config.default_language, Language::Typescript);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(MentorConfig::load(Path::new("/nonexistent/mentor.toml")).is_err());
    }
}
