//! Word and identifier tokenization.

pub mod case_handling;

use crate::types::Token;

/// Tokenization entry points, implemented for `str`.
pub trait Tokenize {
    /// Lazily yields the word-like tokens of this text.
    fn words(&self) -> Words;

    /// Whether this text is shaped like a canonical GUID.
    fn is_guid(&self) -> bool;
}

impl Tokenize for str {
    fn words(&self) -> Words {
        Words {
            text: self,
            cursor: 0,
        }
    }

    fn is_guid(&self) -> bool {
        is_guid(self)
    }
}

/// Iterator over the word-like tokens of a text.
///
/// A token is a maximal run of non-whitespace, non-slash characters; the
/// slash splits tokens because it is a common delimiter in compound
/// technical phrases (`sender/receiver`). A single trailing `.` is dropped
/// the way a sentence boundary would be. Purely a function of the input.
pub struct Words<'a> {
    text: &'a str,
    cursor: usize,
}

#[inline(always)]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '/'
}

impl<'a> Iterator for Words<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let rest = &self.text[self.cursor..];
            let start_rel = rest
                .char_indices()
                .find(|&(_, c)| !is_separator(c))
                .map(|(i, _)| i)?;
            let start = self.cursor + start_rel;

            let run = &self.text[start..];
            let end = run
                .char_indices()
                .find(|&(_, c)| is_separator(c))
                .map(|(i, _)| start + i)
                .unwrap_or(self.text.len());
            self.cursor = end;

            let word = &self.text[start..end];
            let word = match word.strip_suffix('.') {
                Some(stripped) if stripped.chars().any(|c| c != '.') => stripped,
                _ => word,
            };

            if !word.is_empty() {
                return Some(Token {
                    text: word,
                    offset: start,
                });
            }
        }
    }
}

/// Recognizes the canonical hyphenated or braced 32-hex-digit GUID shape.
///
/// GUID-shaped tokens are excluded from spellchecking entirely; they are
/// not natural-language words.
pub fn is_guid(word: &str) -> bool {
    let word = word
        .strip_prefix(|c| c == '{' || c == '(')
        .unwrap_or(word);
    let word = word
        .strip_suffix(|c| c == '}' || c == ')')
        .unwrap_or(word);

    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
    let mut rest = word;
    for (i, &len) in GROUPS.iter().enumerate() {
        let bytes = rest.as_bytes();
        if bytes.len() < len || !bytes[..len].iter().all(u8::is_ascii_hexdigit) {
            return false;
        }
        rest = &rest[len..];
        if i < GROUPS.len() - 1 {
            rest = rest.strip_prefix('-').unwrap_or(rest);
        }
    }

    rest.is_empty()
}
