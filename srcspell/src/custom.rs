//! User-approved words that override dictionary results.

use std::fs;
use std::path::PathBuf;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use smol_str::SmolStr;

/// Per-language sets of user-approved words, mirrored from line-oriented
/// word-list files under one root folder.
///
/// Each language persists to `<root>/<language>.txt`, one word per line,
/// UTF-8. The file is read fully on the first query for its language and
/// rewritten fully on every addition. Words are matched exactly and
/// case-sensitively, so `HiFi` can be approved without approving `hifi`.
pub struct CustomWordRegistry {
    root: PathBuf,
    words: RwLock<HashMap<SmolStr, HashSet<SmolStr>>>,
}

impl CustomWordRegistry {
    /// Registry persisting under `root`.
    pub fn new(root: impl Into<PathBuf>) -> CustomWordRegistry {
        CustomWordRegistry {
            root: root.into(),
            words: RwLock::new(HashMap::new()),
        }
    }

    /// Exact, case-sensitive membership test.
    pub fn is_custom_word(&self, language: &str, word: &str) -> bool {
        if let Some(words) = self.words.read().get(language) {
            return words.contains(word);
        }

        let loaded = self.load(language);
        let contains = loaded.contains(word);
        self.words
            .write()
            .entry(SmolStr::new(language))
            .or_insert(loaded);
        contains
    }

    /// Adds `word` for `language` and persists the updated list; no-op
    /// when the word is already a member. Returns whether it was added.
    ///
    /// A failed write-back is logged and swallowed: the in-memory set
    /// keeps the word, so the word stays approved for this process.
    pub fn add_word(&self, language: &str, word: &str) -> bool {
        let contents = {
            let mut map = self.words.write();
            let words = map
                .entry(SmolStr::new(language))
                .or_insert_with(|| self.load(language));
            if !words.insert(SmolStr::new(word)) {
                return false;
            }

            let mut lines: Vec<&str> = words.iter().map(SmolStr::as_str).collect();
            lines.sort_unstable();
            let mut contents = lines.join("\n");
            contents.push('\n');
            contents
        };

        let path = self.path(language);
        fs::create_dir_all(&self.root).ok();
        if let Err(err) = fs::write(&path, contents) {
            log::warn!(
                "failed to persist custom words for {} to {}: {}",
                language,
                path.display(),
                err
            );
        }
        true
    }

    fn load(&self, language: &str) -> HashSet<SmolStr> {
        let path = self.path(language);
        match fs::read_to_string(&path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(SmolStr::new)
                .collect(),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!(
                        "failed to read custom words for {} from {}: {}",
                        language,
                        path.display(),
                        err
                    );
                }
                HashSet::new()
            }
        }
    }

    fn path(&self, language: &str) -> PathBuf {
        self.root.join(format!("{}.txt", language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CustomWordRegistry::new(dir.path());

        assert!(registry.add_word("en_US", "HiFi"));
        assert!(registry.is_custom_word("en_US", "HiFi"));
        assert!(!registry.is_custom_word("en_US", "hifi"));
        assert!(!registry.is_custom_word("de_DE", "HiFi"));
    }

    #[test]
    fn adding_twice_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CustomWordRegistry::new(dir.path());

        assert!(registry.add_word("en_US", "HiFi"));
        assert!(!registry.add_word("en_US", "HiFi"));
    }

    #[test]
    fn additions_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let registry = CustomWordRegistry::new(dir.path());
            registry.add_word("en_US", "HiFi");
            registry.add_word("en_US", "btree");
            registry.add_word("de_DE", "Anwendungsfall");
        }

        let reloaded = CustomWordRegistry::new(dir.path());
        assert!(reloaded.is_custom_word("en_US", "HiFi"));
        assert!(reloaded.is_custom_word("en_US", "btree"));
        assert!(reloaded.is_custom_word("de_DE", "Anwendungsfall"));
        assert!(!reloaded.is_custom_word("de_DE", "btree"));
    }

    #[test]
    fn word_lists_are_line_oriented_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CustomWordRegistry::new(dir.path());
        registry.add_word("en_US", "zebra");
        registry.add_word("en_US", "aardvark");

        let contents = fs::read_to_string(dir.path().join("en_US.txt")).unwrap();
        assert_eq!(contents, "aardvark\nzebra\n");
    }

    #[test]
    fn failed_persistence_keeps_the_word_in_memory() {
        // a file where the root folder should be makes every write fail
        let dir = tempfile::tempdir().unwrap();
        let bogus_root = dir.path().join("not-a-folder");
        fs::write(&bogus_root, b"").unwrap();

        let registry = CustomWordRegistry::new(&bogus_root);
        assert!(registry.add_word("en_US", "HiFi"));
        assert!(registry.is_custom_word("en_US", "HiFi"));
    }
}
