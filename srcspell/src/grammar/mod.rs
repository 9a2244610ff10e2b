//! Remote grammar checking with an offline circuit breaker.

pub mod response;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use smol_str::SmolStr;
use thiserror::Error;

use self::response::CheckResponse;
use crate::types::Category;

/// Failure modes of the grammar client.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The circuit breaker tripped earlier in this process; no request
    /// was attempted.
    #[error("grammar service is offline for the remainder of the process")]
    Offline,
    /// The endpoint could not be reached or answered with an error status.
    #[error("grammar request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The body did not match the expected `matches` shape.
    #[error("grammar response could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One normalized grammar issue.
///
/// Offsets and lengths are already corrected for escape characters and
/// index into the host's escaped source representation; `word` is the
/// offending excerpt of the raw checked text.
#[derive(Clone, Debug)]
pub struct GrammarMatch {
    /// Corrected byte offset of the issue.
    pub offset: usize,
    /// Corrected byte length of the issue.
    pub length: usize,
    /// The offending excerpt.
    pub word: SmolStr,
    /// Condensed description, possibly empty.
    pub short_message: String,
    /// Full human-readable description.
    pub message: String,
    /// Stable identifier of the rule that fired.
    pub rule_id: SmolStr,
    /// Category of the rule, [`Category::Misc`] when unrecognized.
    pub category: Category,
    /// Ranked replacement strings.
    pub replacements: Vec<SmolStr>,
}

/// Client for a LanguageTool-style `check` endpoint.
///
/// One transport failure or malformed body flips the client offline for
/// the remainder of the process; there is no retry and no backoff. The
/// original motivation: a long-running session must not keep timing out
/// against an unreachable local service.
pub struct GrammarClient {
    endpoint: String,
    client: reqwest::blocking::Client,
    offline: AtomicBool,
}

impl GrammarClient {
    /// Client for `endpoint`, abandoning each request after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<GrammarClient, GrammarError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(GrammarClient {
            endpoint: endpoint.into(),
            client,
            offline: AtomicBool::new(false),
        })
    }

    /// Whether the circuit breaker has tripped.
    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Relaxed)
    }

    /// Checks `text` against the service for the given remote locale.
    ///
    /// Callers receiving any error must fall back to the local dictionary
    /// path for this text.
    pub fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        if self.is_offline() {
            return Err(GrammarError::Offline);
        }

        match self.request(text, language) {
            Ok(matches) => Ok(matches),
            Err(err) => {
                self.offline.store(true, Ordering::Relaxed);
                log::warn!("grammar service marked offline: {}", err);
                Err(err)
            }
        }
    }

    fn request(&self, text: &str, language: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        let url = format!("{}/check", self.endpoint.trim_end_matches('/'));
        let body = self
            .client
            .get(url)
            .query(&[("text", text), ("language", language)])
            .send()?
            .error_for_status()?
            .text()?;

        let response: CheckResponse = serde_json::from_str(&body)?;
        Ok(response
            .matches
            .into_iter()
            .map(|m| normalize(text, m))
            .collect())
    }
}

fn normalize(text: &str, raw: response::Match) -> GrammarMatch {
    let (offset, length) = adjust_for_escapes(text, raw.offset, raw.length);
    let category = raw
        .rule
        .as_ref()
        .and_then(|rule| rule.category.as_ref())
        .map(|category| Category::from_remote(&category.id))
        .unwrap_or(Category::Misc);

    GrammarMatch {
        offset,
        length,
        word: excerpt(text, raw.offset, raw.length),
        short_message: raw.short_message,
        message: raw.message,
        rule_id: raw.rule.map(|rule| SmolStr::new(rule.id)).unwrap_or_default(),
        category,
        replacements: raw
            .replacements
            .into_iter()
            .map(|replacement| SmolStr::new(replacement.value))
            .collect(),
    }
}

fn excerpt(text: &str, offset: usize, length: usize) -> SmolStr {
    let end = offset.saturating_add(length).min(text.len());
    let start = offset.min(end);
    text.get(start..end).map(SmolStr::new).unwrap_or_default()
}

/// Translates service offsets into the host's escaped representation.
///
/// The service counts the raw text at one character per control or
/// escape-relevant character, while the host's source representation
/// spends two (`\n`, `\"`). Every such character before the match shifts
/// the start by one unit; every one inside it stretches the length by one.
pub fn adjust_for_escapes(text: &str, offset: usize, length: usize) -> (usize, usize) {
    let mut adjusted_offset = offset;
    let mut adjusted_length = length;
    for (i, c) in text.char_indices() {
        if i >= offset.saturating_add(length) {
            break;
        }
        if needs_escape(c) {
            if i < offset {
                adjusted_offset += 1;
            } else {
                adjusted_length += 1;
            }
        }
    }
    (adjusted_offset, adjusted_length)
}

#[inline(always)]
fn needs_escape(c: char) -> bool {
    c == '"' || c == '\\' || c.is_ascii_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrects_an_offset_past_escaped_characters() {
        // raw text as the service sees it: one newline, two quotes before
        // the match
        let text = "Line one.\nHe said \"go\" and wrote a escapng today.";
        assert_eq!(&text[35..42], "escapng");

        let (offset, length) = adjust_for_escapes(text, 35, 7);
        assert_eq!((offset, length), (38, 7));

        // the same text as the host's source representation spells it
        let escaped = r#"Line one.\nHe said \"go\" and wrote a escapng today."#;
        assert_eq!(&escaped[offset..offset + length], "escapng");
    }

    #[test]
    fn stretches_a_match_spanning_escaped_characters() {
        let text = "Line one.\nHe said \"go\" and wrote a escapng today.";
        assert_eq!(&text[18..22], "\"go\"");

        let (offset, length) = adjust_for_escapes(text, 18, 4);
        assert_eq!((offset, length), (19, 6));

        let escaped = r#"Line one.\nHe said \"go\" and wrote a escapng today."#;
        assert_eq!(&escaped[offset..offset + length], r#"\"go\""#);
    }

    #[test]
    fn plain_text_needs_no_correction() {
        let (offset, length) = adjust_for_escapes("nothing to see here", 8, 2);
        assert_eq!((offset, length), (8, 2));
    }

    #[test]
    fn normalizes_category_and_replacements() {
        let body = r#"{
          "matches": [{
            "message": "Possible spelling mistake found.",
            "shortMessage": "Spelling mistake",
            "offset": 0,
            "length": 8,
            "replacements": [{ "value": "sentence" }],
            "sentence": "Sentense with a typo.",
            "rule": {
              "id": "MORFOLOGIK_RULE_EN_US",
              "issueType": "misspelling",
              "category": { "id": "TYPOS", "name": "Possible Typo" }
            }
          }]
        }"#;
        let response: CheckResponse = serde_json::from_str(body).unwrap();
        let text = "Sentense with a typo.";
        let m = normalize(text, response.matches[0].clone());

        assert_eq!(m.category, Category::Typos);
        assert_eq!(m.word, "Sentense");
        assert_eq!(m.rule_id, "MORFOLOGIK_RULE_EN_US");
        assert_eq!(m.replacements, vec![SmolStr::new("sentence")]);
    }

    #[test]
    fn matches_without_a_rule_fall_back_to_misc() {
        let response: CheckResponse =
            serde_json::from_str(r#"{ "matches": [{ "offset": 0, "length": 4 }] }"#).unwrap();
        let m = normalize("word salad", response.matches[0].clone());
        assert_eq!(m.category, Category::Misc);
        assert_eq!(m.rule_id, "");
    }

    #[test]
    fn one_failure_trips_the_circuit_breaker() {
        // nothing listens on the discard port; the first call fails fast
        let client =
            GrammarClient::new("http://127.0.0.1:9", Duration::from_millis(250)).unwrap();
        assert!(!client.is_offline());

        let first = client.check("some text", "en-US");
        assert!(matches!(
            first,
            Err(GrammarError::Transport(_)) | Err(GrammarError::Malformed(_))
        ));
        assert!(client.is_offline());

        // the second call short-circuits without touching the network
        let second = client.check("some text", "en-US");
        assert!(matches!(second, Err(GrammarError::Offline)));
    }
}
