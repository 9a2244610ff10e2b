use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use gumdrop::Options;
use serde::Serialize;

use srcspell::config::EngineConfig;
use srcspell::store::source::FsDictionarySource;
use srcspell::{Finding, Language, SpellcheckEngine, TextKind};

trait OutputWriter {
    fn write_correction(&mut self, input: &str, is_correct: bool);
    fn write_findings(&mut self, input: &str, findings: &[Finding]);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, input: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            input,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_findings(&mut self, _input: &str, findings: &[Finding]) {
        for finding in findings {
            println!(
                "{:?}: {} at {}..{}",
                finding.category,
                finding.word,
                finding.offset,
                finding.offset + finding.length
            );
            for group in &finding.suggestions {
                let suggestions = group
                    .suggestions
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  [{}] {}", group.language.dictionary_code, suggestions);
            }
        }
        println!();
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct CheckedInput {
    input: String,
    is_correct: bool,
    findings: Vec<Finding>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<CheckedInput>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, input: &str, is_correct: bool) {
        self.results.push(CheckedInput {
            input: input.to_owned(),
            is_correct,
            findings: vec![],
        });
    }

    fn write_findings(&mut self, _input: &str, findings: &[Finding]) {
        let i = self.results.len() - 1;
        self.results[i].findings = findings.to_vec();
    }

    fn finish(&mut self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap());
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(
        short = "d",
        help = "folder containing <code>.aff and <code>.dic dictionary pairs"
    )]
    dictionaries: Option<PathBuf>,

    #[options(
        short = "l",
        help = "comma-separated language tags, e.g. en_US,de_DE or en_US:en-US"
    )]
    languages: Option<String>,

    #[options(help = "folder holding per-language custom word lists")]
    custom_words: Option<PathBuf>,

    #[options(help = "base URL of a LanguageTool-style grammar service")]
    grammar: Option<String>,

    #[options(short = "i", help = "treat the inputs as identifiers and split them by casing")]
    identifier: bool,

    #[options(help = "output results as JSON")]
    json: bool,

    #[options(free, help = "text to check; stdin is read line by line when empty")]
    inputs: Vec<String>,
}

fn parse_languages(spec: &str) -> Vec<Language> {
    spec.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| match code.split_once(':') {
            Some((local, remote)) => Language::new(local.trim(), remote.trim()),
            // en_US pairs with en-US unless told otherwise
            None => Language::new(code, code.replace('_', "-")),
        })
        .collect()
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse_args_default_or_exit();

    let dictionaries = match args.dictionaries {
        Some(v) => v,
        None => bail!("--dictionaries is required"),
    };
    let languages = parse_languages(args.languages.as_deref().unwrap_or("en_US"));
    if languages.is_empty() {
        bail!("--languages must name at least one language");
    }

    let mut config = EngineConfig::default();
    config.default_languages = languages;
    if let Some(folder) = args.custom_words {
        config.custom_words_folder = folder;
    }
    config.grammar_endpoint = args.grammar;

    let engine = SpellcheckEngine::new(config, Box::new(FsDictionarySource::new(dictionaries)));

    let inputs = if args.inputs.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
            .lines()
            .map(str::to_owned)
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        args.inputs
    };

    let kind = if args.identifier {
        TextKind::Identifier
    } else {
        TextKind::Prose
    };

    let mut writer: Box<dyn OutputWriter> = if args.json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    for input in inputs {
        let languages = engine.config().languages_for(kind).to_vec();
        let findings = match kind {
            TextKind::Identifier => engine.check(&input, kind),
            _ => engine.check_with_grammar(&input, kind, &languages),
        };

        writer.write_correction(&input, findings.is_empty());
        if !findings.is_empty() {
            writer.write_findings(&input, &findings);
        }
    }

    writer.finish();
    Ok(())
}
