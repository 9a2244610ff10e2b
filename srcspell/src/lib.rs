/*! Spellchecking for source-code artifacts.

Splits identifiers, comments and string literals into checkable words,
looks the words up in per-language Hunspell dictionaries behind a
correctness cache and user-managed custom word lists, and produces
findings with ranked replacement suggestions. An optional client for a
LanguageTool-style service adds a remote grammar pass guarded by an
offline circuit breaker.

The host walking a syntax tree supplies `(text, kind, languages)`; the
engine returns findings with offsets the host translates into its own
coordinate space.

# Usage example

```no_run
use srcspell::config::EngineConfig;
use srcspell::store::source::FsDictionarySource;
use srcspell::{Language, SpellcheckEngine, TextKind};

let mut config = EngineConfig::default();
config.default_languages = vec![Language::new("en_US", "en-US")];

let source = FsDictionarySource::new("/usr/share/hunspell");
let engine = SpellcheckEngine::new(config, Box::new(source));

for finding in engine.check("TemplateRendrer", TextKind::Identifier) {
    println!("{} at {}: {:?}", finding.word, finding.offset, finding.suggestions);
}
```
*/

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod custom;
pub mod engine;
pub mod grammar;
pub mod store;
pub mod tokenizer;
pub mod types;
pub mod vfs;

pub use crate::engine::SpellcheckEngine;
pub use crate::types::{Category, Finding, Language, LanguageSuggestions, TextKind, Token};
