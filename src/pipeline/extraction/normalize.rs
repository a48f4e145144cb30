//! Lexical normalization of report text ahead of pattern matching.
//!
//! Two synonym tables are applied in order: units first, then medical terms.
//! Order inside each table is part of the contract: multi-word phrases come
//! before their abbreviations so an abbreviation never rewrites half a phrase.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use thiserror::Error;

/// Unit spellings → canonical unit. Matched as plain substrings.
pub const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("mmhg", "mmHg"),
    ("mg/dl", "mg/dL"),
    ("mg dl", "mg/dL"),
    ("spo2", "SpO2"),
    ("°c", "°C"),
    ("c°", "°C"),
    ("gradi", "°C"),
];

/// Medical wording → label the extraction patterns anchor on.
/// Matched on word boundaries.
pub const MEDICAL_TERM_SYNONYMS: &[(&str, &str)] = &[
    ("pressione arteriosa", "pressione"),
    ("press art", "pressione"),
    ("pa", "pressione"),
    ("frequenza cardiaca", "frequenza"),
    ("freq cardiaca", "frequenza"),
    ("fc", "frequenza"),
    ("battiti", "bpm"),
    ("saturazione ossigeno", "saturazione"),
    ("sat o2", "saturazione"),
    ("ossigenazione", "saturazione"),
    ("glucosio", "glicemia"),
    ("temperatura corporea", "temperatura"),
    ("temp", "temperatura"),
    ("febbre", "temperatura"),
];

static RE_DECIMAL_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),(\d)").expect("Invalid normalizer regex"));
static RE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]").expect("Invalid normalizer regex"));
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid normalizer regex"));

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Invalid synonym phrase {phrase:?}: {source}")]
    Pattern {
        phrase: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled synonym rule.
#[derive(Debug, Clone)]
struct Synonym {
    regex: Regex,
    replacement: String,
}

impl Synonym {
    fn substring(phrase: &str, replacement: &str) -> Result<Self, NormalizerError> {
        Self::compile(phrase, regex::escape(phrase), replacement)
    }

    /// Phrase edges that are word characters get a `\b`, so `pa` leaves
    /// `paziente` alone and `temp` leaves `temperatura` alone.
    fn word(phrase: &str, replacement: &str) -> Result<Self, NormalizerError> {
        let mut pattern = regex::escape(phrase);
        if phrase.chars().next().is_some_and(char::is_alphanumeric) {
            pattern.insert_str(0, r"\b");
        }
        if phrase.chars().last().is_some_and(char::is_alphanumeric) {
            pattern.push_str(r"\b");
        }
        Self::compile(phrase, pattern, replacement)
    }

    fn compile(phrase: &str, pattern: String, replacement: &str) -> Result<Self, NormalizerError> {
        let regex = Regex::new(&pattern).map_err(|source| NormalizerError::Pattern {
            phrase: phrase.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            replacement: replacement.to_string(),
        })
    }

    fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// Canonicalizes case, whitespace, punctuation and vocabulary.
///
/// Immutable after construction, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    units: Vec<Synonym>,
    terms: Vec<Synonym>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_tables(UNIT_SYNONYMS, MEDICAL_TERM_SYNONYMS)
            .expect("Built-in synonym tables must compile")
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalizer from custom tables. Phrases are matched lower-case.
    pub fn with_tables(
        units: &[(&str, &str)],
        terms: &[(&str, &str)],
    ) -> Result<Self, NormalizerError> {
        let units = units
            .iter()
            .map(|(phrase, replacement)| Synonym::substring(&phrase.to_lowercase(), replacement))
            .collect::<Result<Vec<_>, _>>()?;
        let terms = terms
            .iter()
            .map(|(phrase, replacement)| Synonym::word(&phrase.to_lowercase(), replacement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { units, terms })
    }

    /// Normalize report text. Pure, and a fixed point on its own output.
    ///
    /// One pass can expose a new match for an earlier rule (`pa arteriosa` →
    /// `pressione arteriosa`, `cc°` → `c°C` → `°cc` once lowercased again), so
    /// passes repeat until the text stops changing.
    pub fn normalize(&self, text: &str) -> String {
        // each changing pass moves a unit marker or rewrites a phrase; a cyclic
        // custom table stops here
        let max_passes = text.chars().count().pow(2) + 2;
        let mut current = self.pass(text);
        for _ in 0..max_passes {
            let next = self.pass(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn pass(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let repaired = RE_DECIMAL_COMMA.replace_all(&lower, "$1.$2");
        let separated = RE_SEPARATORS.replace_all(&repaired, " ");
        let collapsed = RE_WHITESPACE.replace_all(&separated, " ");

        let mut text = collapsed.trim().to_string();
        for synonym in self.units.iter().chain(&self.terms) {
            text = synonym.apply(&text);
        }
        text
    }
}
