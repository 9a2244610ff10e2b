//! Casing decomposition for compound identifiers.

use crate::types::Token;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
    Neither,
}

impl Case {
    #[inline(always)]
    fn of(ch: char) -> Case {
        if ch.is_lowercase() {
            Case::Lower
        } else if ch.is_uppercase() {
            Case::Upper
        } else {
            Case::Neither
        }
    }
}

/// Lazily splits an identifier into sub-words at casing transitions.
///
/// A sub-word is one or more uppercase letters, or exactly one lowercase
/// letter, followed by any number of lowercase letters. An uppercase run
/// directly followed by lowercase keeps its last letter for the next
/// sub-word, so acronym runs stay whole: `XMLParser` yields `XML` and
/// `Parser`. Non-letters separate sub-words and are never yielded.
pub fn case_splits(word: &str) -> CaseSplits {
    CaseSplits { word, cursor: 0 }
}

/// Iterator over the casing-based sub-words of one identifier.
pub struct CaseSplits<'a> {
    word: &'a str,
    cursor: usize,
}

impl<'a> Iterator for CaseSplits<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let text = self.word;
        let (start, first) = text[self.cursor..]
            .char_indices()
            .map(|(i, c)| (self.cursor + i, c))
            .find(|&(_, c)| Case::of(c) != Case::Neither)?;

        let end = if Case::of(first) == Case::Upper {
            let mut tail = text[start..].char_indices().map(|(i, c)| (start + i, c));
            tail.next();

            let mut last_upper = start;
            let mut run_end = text.len();
            let mut follower = None;
            for (i, c) in tail {
                if Case::of(c) == Case::Upper {
                    last_upper = i;
                } else {
                    run_end = i;
                    follower = Some(c);
                    break;
                }
            }

            match follower {
                Some(c) if Case::of(c) == Case::Lower => {
                    if last_upper > start {
                        // acronym run: its last capital opens the next sub-word
                        last_upper
                    } else {
                        lower_run_end(text, run_end)
                    }
                }
                _ => run_end,
            }
        } else {
            lower_run_end(text, start)
        };

        self.cursor = end;
        Some(Token {
            text: &text[start..end],
            offset: start,
        })
    }
}

fn lower_run_end(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|&(_, c)| Case::of(c) != Case::Lower)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(word: &str) -> Vec<&str> {
        case_splits(word).map(|t| t.text).collect()
    }

    #[test]
    fn pascal_case() {
        assert_eq!(parts("XMLParserFactory"), vec!["XML", "Parser", "Factory"]);
        assert_eq!(parts("HelloWorld"), vec!["Hello", "World"]);
    }

    #[test]
    fn camel_case() {
        assert_eq!(parts("prntNow"), vec!["prnt", "Now"]);
        assert_eq!(parts("readFileToString"), vec!["read", "File", "To", "String"]);
    }

    #[test]
    fn acronym_runs_stay_whole() {
        assert_eq!(parts("XML"), vec!["XML"]);
        assert_eq!(parts("parseXML"), vec!["parse", "XML"]);
        assert_eq!(parts("HTTPSProxy"), vec!["HTTPS", "Proxy"]);
    }

    #[test]
    fn non_letters_separate_sub_words() {
        assert_eq!(parts("snake_case"), vec!["snake", "case"]);
        assert_eq!(parts("base64Encode"), vec!["base", "Encode"]);
        assert_eq!(parts("__dunder__"), vec!["dunder"]);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(parts(""), Vec::<&str>::new());
        assert_eq!(parts("_42_"), Vec::<&str>::new());
        assert_eq!(parts("a"), vec!["a"]);
        assert_eq!(parts("A"), vec!["A"]);
    }

    #[test]
    fn offsets_are_relative_to_the_identifier() {
        let tokens: Vec<_> = case_splits("XMLParserFactory").collect();
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 3);
        assert_eq!(tokens[2].offset, 9);
    }

    #[test]
    fn splitting_is_pure() {
        let first: Vec<_> = case_splits("PrntNow").collect();
        let second: Vec<_> = case_splits("PrntNow").collect();
        assert_eq!(first, second);
    }
}
