//! Core value types shared across the engine.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Identifies one local dictionary and its equivalent remote-service locale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// Tag of the local Hunspell dictionary, e.g. `en_US`.
    pub dictionary_code: SmolStr,
    /// Locale code understood by the remote grammar service, e.g. `en-US`.
    pub remote_code: SmolStr,
}

impl Language {
    /// Creates a language from a dictionary tag and a remote locale.
    pub fn new(dictionary_code: impl AsRef<str>, remote_code: impl AsRef<str>) -> Language {
        Language {
            dictionary_code: SmolStr::new(dictionary_code),
            remote_code: SmolStr::new(remote_code),
        }
    }
}

/// A contiguous slice of checkable text.
///
/// Offsets are relative to the start of the text handed to the tokenizer;
/// the caller translates them into its own coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word-like text of this token.
    pub text: &'a str,
    /// Byte offset of the token within its source text.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Byte length of the token.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The kind of source artifact a piece of text came from.
///
/// The set is closed and the engine dispatches on the tag: identifiers get
/// casing decomposition, the other kinds are checked token by token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextKind {
    /// A compound identifier such as a type, function or variable name.
    Identifier,
    /// Natural-language text: comments and documentation.
    Prose,
    /// A string passed as an attribute argument.
    AttributeArgument,
}

impl TextKind {
    /// The category reported for local dictionary findings of this kind.
    pub fn category(self) -> Category {
        match self {
            TextKind::Identifier => Category::Naming,
            TextKind::Prose => Category::Comment,
            TextKind::AttributeArgument => Category::Content,
        }
    }
}

/// Category attached to a finding.
///
/// `Naming`, `Comment` and `Content` are produced by the local dictionary
/// path, one per [`TextKind`]. The remaining values mirror the remote
/// grammar service's rule category taxonomy; anything the service reports
/// outside that taxonomy lands in [`Category::Misc`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Misspelled identifier part.
    Naming,
    /// Misspelled word in a comment.
    Comment,
    /// Misspelled word in a string literal or attribute argument.
    Content,
    /// Remote: capitalization issues.
    Casing,
    /// Remote: colloquial wording.
    Colloquialisms,
    /// Remote: compound-word issues.
    Compounding,
    /// Remote: commonly confused words.
    ConfusedWords,
    /// Remote: false friends between languages.
    FalseFriends,
    /// Remote: gender-neutral wording.
    GenderNeutrality,
    /// Remote: grammar errors.
    Grammar,
    /// Remote: anything without a more specific category.
    Misc,
    /// Remote: punctuation errors.
    Punctuation,
    /// Remote: redundant phrasing.
    Redundancy,
    /// Remote: regional usage.
    Regionalisms,
    /// Remote: repeated words.
    Repetitions,
    /// Remote: semantic inconsistencies.
    Semantics,
    /// Remote: style issues.
    Style,
    /// Remote: typography issues.
    Typography,
    /// Remote: typos.
    Typos,
    /// Remote: rules contributed from Wikipedia.
    Wikipedia,
}

impl Category {
    /// Maps a remote rule category identifier onto a stable category.
    pub fn from_remote(id: &str) -> Category {
        match id {
            "CASING" => Category::Casing,
            "COLLOQUIALISMS" => Category::Colloquialisms,
            "COMPOUNDING" => Category::Compounding,
            "CONFUSED_WORDS" => Category::ConfusedWords,
            "FALSE_FRIENDS" => Category::FalseFriends,
            "GENDER_NEUTRALITY" => Category::GenderNeutrality,
            "GRAMMAR" => Category::Grammar,
            "PUNCTUATION" => Category::Punctuation,
            "REDUNDANCY" => Category::Redundancy,
            "REGIONALISMS" => Category::Regionalisms,
            "REPETITIONS" => Category::Repetitions,
            "SEMANTICS" => Category::Semantics,
            "STYLE" => Category::Style,
            "TYPOGRAPHY" => Category::Typography,
            "TYPOS" => Category::Typos,
            "WIKIPEDIA" => Category::Wikipedia,
            _ => Category::Misc,
        }
    }
}

/// One reported spelling or grammar issue.
///
/// Findings are transient: recomputed on every check, never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct Finding {
    /// Category of the rule that produced this finding.
    pub category: Category,
    /// The offending word or phrase.
    pub word: SmolStr,
    /// Byte offset of the issue, relative to the checked text.
    pub offset: usize,
    /// Byte length of the issue.
    pub length: usize,
    /// Replacement suggestions, grouped per language in candidate order.
    pub suggestions: Vec<LanguageSuggestions>,
    /// The languages the text was checked against.
    pub languages: Vec<Language>,
}

/// The suggestions one language produced for an offending word.
#[derive(Clone, Debug, Serialize)]
pub struct LanguageSuggestions {
    /// The language whose dictionary produced the suggestions.
    pub language: Language,
    /// Ranked replacement spellings.
    pub suggestions: Vec<SmolStr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_category_mapping() {
        assert_eq!(Category::from_remote("TYPOS"), Category::Typos);
        assert_eq!(Category::from_remote("CONFUSED_WORDS"), Category::ConfusedWords);
        assert_eq!(Category::from_remote("GENDER_NEUTRALITY"), Category::GenderNeutrality);
        assert_eq!(Category::from_remote("MISC"), Category::Misc);
    }

    #[test]
    fn unknown_remote_category_falls_back_to_misc() {
        assert_eq!(Category::from_remote("AI_DETECTION"), Category::Misc);
        assert_eq!(Category::from_remote(""), Category::Misc);
    }

    #[test]
    fn kind_category() {
        assert_eq!(TextKind::Identifier.category(), Category::Naming);
        assert_eq!(TextKind::Prose.category(), Category::Comment);
        assert_eq!(TextKind::AttributeArgument.category(), Category::Content);
    }
}
