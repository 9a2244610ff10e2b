//! Memoized correctness results in front of the dictionary store.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use smol_str::SmolStr;

use crate::custom::CustomWordRegistry;
use crate::store::{DictionaryStore, Lookup};

/// Memoizes `(language, word)` correctness so repeated checks skip the
/// dictionary.
///
/// Custom words always win. A language without a dictionary cannot
/// confirm a misspelling, so its words read as correct. Concurrent
/// readers and writers are fine; a lost update costs at most one extra
/// dictionary call.
pub struct CorrectnessCache {
    store: Arc<DictionaryStore>,
    custom: Arc<CustomWordRegistry>,
    entries: RwLock<HashMap<(SmolStr, SmolStr), bool>>,
}

impl CorrectnessCache {
    /// Cache sitting in front of `store` and `custom`.
    pub fn new(store: Arc<DictionaryStore>, custom: Arc<CustomWordRegistry>) -> CorrectnessCache {
        CorrectnessCache {
            store,
            custom,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Whether `word` is correct for `language`.
    pub fn is_correct(&self, language: &str, word: &str) -> bool {
        if self.custom.is_custom_word(language, word) {
            return true;
        }

        let key = (SmolStr::new(language), SmolStr::new(word));
        if let Some(&correct) = self.entries.read().get(&key) {
            return correct;
        }

        let correct = !matches!(self.store.check(language, word), Lookup::Incorrect);
        self.entries.write().insert(key, correct);
        correct
    }

    /// Marks `word` correct for `language`, overwriting any cached
    /// negative, so a freshly approved word is accepted without another
    /// dictionary call.
    pub fn mark_correct(&self, language: &str, word: &str) {
        self.entries
            .write()
            .insert((SmolStr::new(language), SmolStr::new(word)), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::test_source;

    fn cache(custom_root: &std::path::Path) -> CorrectnessCache {
        CorrectnessCache::new(
            Arc::new(DictionaryStore::new(test_source(), 10)),
            Arc::new(CustomWordRegistry::new(custom_root)),
        )
    }

    #[test]
    fn dictionary_results_are_memoized_and_returned() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());

        assert!(cache.is_correct("en_US", "sender"));
        assert!(!cache.is_correct("en_US", "Hifi"));
        // the repeated query is served from the memo map
        assert!(!cache.is_correct("en_US", "Hifi"));
    }

    #[test]
    fn adding_a_custom_word_flips_a_cached_negative() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());

        assert!(!cache.is_correct("en_US", "Hifi"));

        cache.custom.add_word("en_US", "Hifi");
        cache.mark_correct("en_US", "Hifi");

        assert!(cache.is_correct("en_US", "Hifi"));
    }

    #[test]
    fn custom_words_win_without_a_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());

        cache.custom.add_word("tlh_TLH", "Qapla");
        assert!(cache.is_correct("tlh_TLH", "Qapla"));
    }

    #[test]
    fn missing_dictionary_reads_as_correct() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(dir.path());

        // no dictionary for de_DE in the test source: fail open
        assert!(cache.is_correct("de_DE", "Temprature"));
    }
}
