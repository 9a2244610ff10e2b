//! Lazily built per-language Hunspell dictionaries.

pub mod source;

use std::sync::Arc;

use hashbrown::HashMap;
use itertools::Itertools;
use parking_lot::RwLock;
use smol_str::SmolStr;
use spellbook::Dictionary;
use unic_ucd_category::GeneralCategory;

use self::source::DictionarySource;

/// Outcome of one dictionary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The dictionary accepts the word.
    Correct,
    /// The dictionary rejects the word.
    Incorrect,
    /// No dictionary could be built for the language, so nothing can be
    /// confirmed; callers must not report a misspelling from this.
    NoDictionary,
}

/// Owns one compiled dictionary per language, built on first use and
/// reused for the process lifetime unless explicitly invalidated.
///
/// A failed build is remembered too: the language stays dictionary-less
/// instead of recompiling (and re-failing) on every check.
pub struct DictionaryStore {
    source: Box<dyn DictionarySource>,
    dictionaries: RwLock<HashMap<SmolStr, Option<Arc<Dictionary>>>>,
    n_best: usize,
}

impl DictionaryStore {
    /// Creates a store over `source`, truncating suggestion lists to
    /// `n_best` entries.
    pub fn new(source: Box<dyn DictionarySource>, n_best: usize) -> DictionaryStore {
        DictionaryStore {
            source,
            dictionaries: RwLock::new(HashMap::new()),
            n_best,
        }
    }

    /// Checks `word` against the dictionary for `language`.
    ///
    /// A word without a single letter is never a misspelling.
    pub fn check(&self, language: &str, word: &str) -> Lookup {
        if word.chars().all(|c| !GeneralCategory::of(c).is_letter()) {
            return Lookup::Correct;
        }

        match self.dictionary(language) {
            Some(dictionary) => {
                if dictionary.check(word) {
                    Lookup::Correct
                } else {
                    Lookup::Incorrect
                }
            }
            None => Lookup::NoDictionary,
        }
    }

    /// Ranked alternative spellings for `word`; empty without a dictionary.
    pub fn suggest(&self, language: &str, word: &str) -> Vec<SmolStr> {
        let dictionary = match self.dictionary(language) {
            Some(v) => v,
            None => return vec![],
        };

        let mut suggestions = Vec::new();
        dictionary.suggest(word, &mut suggestions);
        suggestions
            .into_iter()
            .map(SmolStr::new)
            .unique()
            .take(self.n_best)
            .collect()
    }

    /// Drops the compiled dictionary for `language` so the next check
    /// rebuilds it from the source.
    pub fn invalidate(&self, language: &str) {
        self.dictionaries.write().remove(language);
    }

    /// Drops every compiled dictionary.
    pub fn invalidate_all(&self) {
        self.dictionaries.write().clear();
    }

    fn dictionary(&self, language: &str) -> Option<Arc<Dictionary>> {
        if let Some(entry) = self.dictionaries.read().get(language) {
            return entry.clone();
        }

        // Built outside the lock; when two threads race, both may build
        // but the first insert wins and the duplicate is dropped.
        let built = self.build(language);
        let mut map = self.dictionaries.write();
        map.entry(SmolStr::new(language)).or_insert(built).clone()
    }

    fn build(&self, language: &str) -> Option<Arc<Dictionary>> {
        let data = match self.source.open(language) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("no dictionary available for {}: {}", language, err);
                return None;
            }
        };

        match Dictionary::new(data.affix(), data.word_list()) {
            Ok(dictionary) => Some(Arc::new(dictionary)),
            Err(err) => {
                log::warn!("dictionary for {} failed to compile: {}", language, err);
                None
            }
        }
    }
}
