//! Line-level editing suggestions.
//!
//! A fixed battery of independent rules runs against one element. Every rule
//! that applies fires; none suppresses another. Confidence values are fixed
//! per rule rather than derived from the strength of the match.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::element::{ElementType, ScriptElement};
use crate::variation::capitalize;

pub const WORD_CHOICE_CONFIDENCE: f64 = 0.8;
pub const PASSIVE_VOICE_CONFIDENCE: f64 = 0.6;
pub const REPETITION_CONFIDENCE: f64 = 0.7;
pub const FORMATTING_CONFIDENCE: f64 = 0.95;
pub const EXPANSION_CONFIDENCE: f64 = 0.5;

/// Action lines shorter than this many characters get an expansion.
pub const SHORT_ACTION_CHARS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionType {
    WordChoice,
    PassiveVoice,
    Repetition,
    Formatting,
    Expansion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoSuggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    /// Proposed replacement for the whole element content.
    pub text: String,
    pub confidence: f64,
    pub context: String,
    pub reasoning: String,
}

const INTENSIFIED: &[(&str, &str)] = &[
    ("good", "excellent"),
    ("bad", "terrible"),
    ("big", "enormous"),
    ("small", "tiny"),
    ("happy", "delighted"),
    ("sad", "miserable"),
    ("fast", "rapid"),
    ("slow", "sluggish"),
    ("important", "crucial"),
    ("tired", "exhausted"),
    ("scared", "terrified"),
    ("angry", "furious"),
    ("beautiful", "stunning"),
    ("old", "ancient"),
    ("cold", "freezing"),
    ("hot", "scorching"),
    ("quiet", "silent"),
    ("loud", "deafening"),
];

const SYNONYMS: &[(&str, &[&str])] = &[
    ("said", &["stated", "replied", "remarked"]),
    ("look", &["glance", "gaze", "stare"]),
    ("looks", &["glances", "gazes", "stares"]),
    ("walk", &["stroll", "stride", "wander"]),
    ("walks", &["strolls", "strides", "wanders"]),
    ("good", &["fine", "great", "solid"]),
    ("really", &["truly", "genuinely", "honestly"]),
    ("very", &["extremely", "remarkably", "highly"]),
    ("just", &["simply", "merely", "only"]),
    ("thing", &["object", "item", "matter"]),
    ("things", &["objects", "items", "matters"]),
    ("great", &["superb", "wonderful", "terrific"]),
    ("think", &["believe", "suppose", "reckon"]),
    ("moves", &["shifts", "edges", "advances"]),
    ("turns", &["spins", "pivots", "swivels"]),
];

const EXPANSIONS: &[(&str, &str)] = &[
    ("enters", "enters the room, pausing to take in the surroundings."),
    ("exits", "exits without looking back, the door swinging shut behind."),
    ("sits", "sits down slowly, weighing every word before speaking."),
    ("waits", "waits in silence as the seconds stretch out."),
    ("runs", "runs at full speed, breath ragged, never glancing back."),
    ("laughs", "laughs, the tension in the room finally breaking."),
    ("cries", "cries quietly, turning away to hide the tears."),
    ("silence", "A heavy silence settles over the room."),
    ("pause", "A long pause. No one dares to speak first."),
    ("beat", "A beat. The moment hangs in the air."),
    ("dawn", "Dawn breaks, washing the landscape in pale gold light."),
    ("night", "Night falls, and the streets empty one by one."),
];

static VERY_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvery (\w+)").expect("valid regex"));
static PASSIVE_VOICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:was|were|is|are|been|being)\s+(\w+ed)\s+by\b").expect("valid regex")
});
static PASSIVE_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\w+ed)\s+by\b").expect("valid regex"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w']+").expect("valid regex"));

static INTENSIFIED_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| INTENSIFIED.iter().copied().collect());
static SYNONYM_MAP: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| SYNONYMS.iter().copied().collect());
static EXPANSION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| EXPANSIONS.iter().copied().collect());

/// Runs every suggestion rule against `element`; `context` is echoed into
/// each suggestion so callers can tell where it was requested.
pub fn generate_auto_suggestions(element: &ScriptElement, context: &str) -> Vec<AutoSuggestion> {
    let content = element.content.as_str();
    let mut suggestions = Vec::new();
    let mut push = |suggestion_type, text: String, confidence, reasoning: &str| {
        suggestions.push(AutoSuggestion {
            suggestion_type,
            text,
            confidence,
            context: context.to_string(),
            reasoning: reasoning.to_string(),
        });
    };

    if content.contains("very ") {
        push(
            SuggestionType::WordChoice,
            replace_intensifiers(content),
            WORD_CHOICE_CONFIDENCE,
            "Replace \"very\" + adjective with a single stronger word.",
        );
    }

    if PASSIVE_VOICE.is_match(content) {
        push(
            SuggestionType::PassiveVoice,
            PASSIVE_BY.replace_all(content, "$1").into_owned(),
            PASSIVE_VOICE_CONFIDENCE,
            "Passive construction detected; active voice reads more directly.",
        );
    }

    for word in repeated_words(content) {
        push(
            SuggestionType::Repetition,
            vary_repetitions(content, &word),
            REPETITION_CONFIDENCE,
            &format!("\"{word}\" appears more than twice; vary the wording."),
        );
    }

    if element.element_type == ElementType::Character && content != content.to_uppercase() {
        push(
            SuggestionType::Formatting,
            content.to_uppercase(),
            FORMATTING_CONFIDENCE,
            "Character names are written in upper case.",
        );
    }

    if element.element_type == ElementType::Action
        && content.trim().chars().count() < SHORT_ACTION_CHARS
    {
        push(
            SuggestionType::Expansion,
            expand_action(content),
            EXPANSION_CONFIDENCE,
            "Short action lines can carry more visual detail.",
        );
    }

    suggestions
}

/// `very <word>` becomes the dictionary synonym, or just `<word>` when the
/// dictionary has no entry.
fn replace_intensifiers(content: &str) -> String {
    VERY_WORD
        .replace_all(content, |caps: &Captures<'_>| {
            let word = &caps[1];
            let lower = word.to_lowercase();
            match INTENSIFIED_MAP.get(lower.as_str()) {
                Some(synonym) => (*synonym).to_string(),
                None => word.to_string(),
            }
        })
        .into_owned()
}

/// Lower-cased words longer than three characters that occur more than
/// twice, in order of first appearance.
fn repeated_words(content: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for token in WORD.find_iter(content) {
        let word = token.as_str().to_lowercase();
        if word.chars().count() <= 3 {
            continue;
        }
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter(|word| counts.get(word).copied().unwrap_or(0) > 2)
        .collect()
}

/// Keeps the first occurrence of `word` and replaces later ones by cycling
/// through its synonyms. Words without synonyms are left alone.
fn vary_repetitions(content: &str, word: &str) -> String {
    let Some(synonyms) = SYNONYM_MAP.get(word).filter(|list| !list.is_empty()) else {
        return content.to_string();
    };
    let mut seen = 0usize;
    WORD.replace_all(content, |caps: &Captures<'_>| {
        let token = &caps[0];
        if token.to_lowercase() != word {
            return token.to_string();
        }
        seen += 1;
        if seen == 1 {
            return token.to_string();
        }
        let synonym = synonyms[(seen - 2) % synonyms.len()];
        if token.starts_with(|c: char| c.is_uppercase()) {
            capitalize(synonym)
        } else {
            synonym.to_string()
        }
    })
    .into_owned()
}

fn expand_action(content: &str) -> String {
    let key = content.trim().to_lowercase();
    match EXPANSION_MAP.get(key.as_str()) {
        Some(expansion) => (*expansion).to_string(),
        None => content.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/suggestions_tests.rs"]
mod tests;
