//! The engine context: orchestration of tokenization, caching and lookup.

use std::sync::Arc;
use std::time::Duration;

use smol_str::SmolStr;

use crate::cache::CorrectnessCache;
use crate::config::EngineConfig;
use crate::custom::CustomWordRegistry;
use crate::grammar::{GrammarClient, GrammarError, GrammarMatch};
use crate::store::source::DictionarySource;
use crate::store::DictionaryStore;
use crate::tokenizer::{case_handling, Tokenize};
use crate::types::{Category, Finding, Language, LanguageSuggestions, TextKind};

/// One long-lived spellchecking context.
///
/// Owns every piece of shared mutable state — the per-language dictionary
/// map, the correctness cache, the custom word sets and the grammar
/// circuit breaker — so lifetime and thread-safety are explicit. Construct
/// once per process and share between threads; the engine performs no
/// internal threading of its own.
pub struct SpellcheckEngine {
    config: EngineConfig,
    store: Arc<DictionaryStore>,
    custom: Arc<CustomWordRegistry>,
    cache: CorrectnessCache,
    grammar: Option<GrammarClient>,
}

impl SpellcheckEngine {
    /// Builds an engine from `config`, reading dictionaries from `source`.
    ///
    /// A grammar endpoint that fails client construction disables the
    /// remote pass; nothing here is fatal.
    pub fn new(config: EngineConfig, source: Box<dyn DictionarySource>) -> SpellcheckEngine {
        let store = Arc::new(DictionaryStore::new(source, config.n_best));
        let custom = Arc::new(CustomWordRegistry::new(&config.custom_words_folder));
        let cache = CorrectnessCache::new(Arc::clone(&store), Arc::clone(&custom));
        let grammar = config.grammar_endpoint.as_deref().and_then(|endpoint| {
            let timeout = Duration::from_secs(config.grammar_timeout_secs);
            match GrammarClient::new(endpoint, timeout) {
                Ok(client) => Some(client),
                Err(err) => {
                    log::warn!("grammar client disabled: {}", err);
                    None
                }
            }
        });

        SpellcheckEngine {
            config,
            store,
            custom,
            cache,
            grammar,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The dictionary store, e.g. to invalidate a replaced source.
    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    /// Checks `text` of the given kind against its configured languages.
    pub fn check(&self, text: &str, kind: TextKind) -> Vec<Finding> {
        self.check_with_languages(text, kind, self.config.languages_for(kind))
    }

    /// Checks `text` of the given kind against an explicit candidate set.
    ///
    /// An empty candidate set confirms nothing and yields no findings.
    pub fn check_with_languages(
        &self,
        text: &str,
        kind: TextKind,
        languages: &[Language],
    ) -> Vec<Finding> {
        match kind {
            TextKind::Identifier => self.check_identifier(text, languages),
            TextKind::Prose | TextKind::AttributeArgument => {
                self.check_text(text, kind, languages)
            }
        }
    }

    /// Checks prose token by token, without casing decomposition.
    ///
    /// A token is reported only when every candidate language rejects it;
    /// GUID-shaped tokens are never reported.
    pub fn check_text(&self, text: &str, kind: TextKind, languages: &[Language]) -> Vec<Finding> {
        if languages.is_empty() {
            return vec![];
        }

        let mut findings = Vec::new();
        for token in text.words() {
            if token.text.is_guid() {
                continue;
            }
            if self.correct_anywhere(token.text, languages) {
                continue;
            }
            findings.push(self.finding(kind.category(), token.text, token.offset, languages));
        }
        findings
    }

    /// Splits `identifier` into casing-based sub-words and checks each
    /// one; an identifier with zero sub-word findings is correct as a
    /// whole. A PascalCase identifier is never itself a dictionary word,
    /// which is why prose and identifiers take different paths.
    pub fn check_identifier(&self, identifier: &str, languages: &[Language]) -> Vec<Finding> {
        if languages.is_empty() {
            return vec![];
        }

        let mut findings = Vec::new();
        for token in identifier.words() {
            // the whole token with exactly this casing may be a custom
            // word, e.g. "HiFi"
            if languages
                .iter()
                .any(|l| self.custom.is_custom_word(&l.dictionary_code, token.text))
            {
                continue;
            }
            if token.text.is_guid() {
                continue;
            }

            for part in case_handling::case_splits(token.text) {
                if self.correct_anywhere(part.text, languages) {
                    continue;
                }
                findings.push(self.finding(
                    Category::Naming,
                    part.text,
                    token.offset + part.offset,
                    languages,
                ));
            }
        }
        findings
    }

    /// Grammar-checks `text` remotely, falling back to the local
    /// dictionary path when the service is unconfigured, offline or
    /// failing. The remote pass uses the first candidate language's
    /// locale.
    pub fn check_with_grammar(
        &self,
        text: &str,
        kind: TextKind,
        languages: &[Language],
    ) -> Vec<Finding> {
        if let (Some(client), Some(language)) = (self.grammar.as_ref(), languages.first()) {
            match client.check(text, &language.remote_code) {
                Ok(matches) => {
                    return matches
                        .into_iter()
                        .map(|m| grammar_finding(m, language))
                        .collect();
                }
                Err(GrammarError::Offline) => {}
                Err(err) => {
                    log::debug!("falling back to local dictionaries: {}", err);
                }
            }
        }

        self.check_with_languages(text, kind, languages)
    }

    /// Adds `word` to the custom list for `language`; the correctness
    /// cache accepts it immediately, without waiting for a dictionary
    /// call.
    pub fn add_word(&self, language: &Language, word: &str) {
        self.custom.add_word(&language.dictionary_code, word);
        self.cache.mark_correct(&language.dictionary_code, word);
    }

    /// Whether the remote grammar pass is currently usable.
    pub fn grammar_available(&self) -> bool {
        self.grammar.as_ref().map_or(false, |g| !g.is_offline())
    }

    fn correct_anywhere(&self, word: &str, languages: &[Language]) -> bool {
        languages
            .iter()
            .any(|language| self.cache.is_correct(&language.dictionary_code, word))
    }

    fn finding(
        &self,
        category: Category,
        word: &str,
        offset: usize,
        languages: &[Language],
    ) -> Finding {
        // suggestions stay grouped by language, in candidate order; the
        // host decides presentation
        let suggestions = languages
            .iter()
            .filter_map(|language| {
                let suggestions = self.store.suggest(&language.dictionary_code, word);
                if suggestions.is_empty() {
                    None
                } else {
                    Some(LanguageSuggestions {
                        language: language.clone(),
                        suggestions,
                    })
                }
            })
            .collect();

        Finding {
            category,
            word: SmolStr::new(word),
            offset,
            length: word.len(),
            suggestions,
            languages: languages.to_vec(),
        }
    }
}

fn grammar_finding(m: GrammarMatch, language: &Language) -> Finding {
    Finding {
        category: m.category,
        word: m.word,
        offset: m.offset,
        length: m.length,
        suggestions: vec![LanguageSuggestions {
            language: language.clone(),
            suggestions: m.replacements,
        }],
        languages: vec![language.clone()],
    }
}
