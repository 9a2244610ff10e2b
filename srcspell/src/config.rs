//! Engine configuration supplied by the host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{Language, TextKind};

/// Host-supplied configuration for one engine context.
///
/// Loading and merging configuration files is the host's business; the
/// engine only reads the resulting value. Each text kind can carry its own
/// candidate-language list so an identifier can be held to different
/// languages than a comment; kinds without a list use the default one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Languages used when no kind-specific list is configured.
    pub default_languages: Vec<Language>,
    /// Languages for identifier checks.
    pub identifier_languages: Option<Vec<Language>>,
    /// Languages for prose: comments and documentation text.
    pub prose_languages: Option<Vec<Language>>,
    /// Languages for attribute-argument strings.
    pub attribute_argument_languages: Option<Vec<Language>>,
    /// Folder holding one custom word list per language.
    pub custom_words_folder: PathBuf,
    /// Base URL of the remote grammar service, if any.
    pub grammar_endpoint: Option<String>,
    /// Seconds before a grammar request is abandoned.
    pub grammar_timeout_secs: u64,
    /// Maximum number of suggestions kept per language.
    pub n_best: usize,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            default_languages: vec![],
            identifier_languages: None,
            prose_languages: None,
            attribute_argument_languages: None,
            custom_words_folder: PathBuf::from("custom-words"),
            grammar_endpoint: None,
            grammar_timeout_secs: 10,
            n_best: 10,
        }
    }
}

impl EngineConfig {
    /// Candidate languages for `kind`, falling back to the default list.
    pub fn languages_for(&self, kind: TextKind) -> &[Language] {
        let specific = match kind {
            TextKind::Identifier => &self.identifier_languages,
            TextKind::Prose => &self.prose_languages,
            TextKind::AttributeArgument => &self.attribute_argument_languages,
        };
        specific.as_deref().unwrap_or(&self.default_languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_specific_lists_override_the_default() {
        let mut config = EngineConfig::default();
        config.default_languages = vec![Language::new("en_US", "en-US")];
        config.prose_languages = Some(vec![
            Language::new("en_US", "en-US"),
            Language::new("de_DE", "de-DE"),
        ]);

        assert_eq!(config.languages_for(TextKind::Identifier).len(), 1);
        assert_eq!(config.languages_for(TextKind::Prose).len(), 2);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "default_languages": [{ "dictionary_code": "en_US", "remote_code": "en-US" }] }"#,
        )
        .unwrap();

        assert_eq!(config.n_best, 10);
        assert_eq!(config.grammar_timeout_secs, 10);
        assert!(config.grammar_endpoint.is_none());
        assert_eq!(config.default_languages[0].dictionary_code, "en_US");
    }
}
