//! Template-based voiceover narration.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::composer::ScriptComposer;
use crate::error::ScriptError;
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NarrationStyle {
    #[default]
    Documentary,
    Commercial,
    Narrative,
}

/// Phrase lists one narration style draws from.
#[derive(Clone, Copy, Debug)]
pub struct NarrationTemplates {
    pub openings: &'static [&'static str],
    pub transitions: &'static [&'static str],
    pub closings: &'static [&'static str],
}

const DOCUMENTARY: NarrationTemplates = NarrationTemplates {
    openings: &[
        "Here, we witness how",
        "Our journey begins as",
        "In this remarkable place,",
        "For generations,",
        "As the story unfolds,",
    ],
    transitions: &[
        "Meanwhile,",
        "As we look closer,",
        "Beyond this,",
        "In time,",
    ],
    closings: &["In the end,", "Ultimately,", "And so,", "Finally,"],
};

const COMMERCIAL: NarrationTemplates = NarrationTemplates {
    openings: &[
        "Imagine a world where",
        "Discover how",
        "Introducing the moment",
        "Picture this:",
    ],
    transitions: &["And that's not all:", "Even better,", "Plus,"],
    closings: &["Don't wait:", "Best of all,", "Experience it today:"],
};

const NARRATIVE: NarrationTemplates = NarrationTemplates {
    openings: &["Once upon a time,", "It all began when", "Long ago,"],
    transitions: &["Then,", "Soon after,", "Before long,"],
    closings: &["And in the end,", "At last,", "When it was all over,"],
};

impl NarrationStyle {
    pub const ALL: [NarrationStyle; 3] = [
        NarrationStyle::Documentary,
        NarrationStyle::Commercial,
        NarrationStyle::Narrative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NarrationStyle::Documentary => "documentary",
            NarrationStyle::Commercial => "commercial",
            NarrationStyle::Narrative => "narrative",
        }
    }

    pub fn templates(self) -> NarrationTemplates {
        match self {
            NarrationStyle::Documentary => DOCUMENTARY,
            NarrationStyle::Commercial => COMMERCIAL,
            NarrationStyle::Narrative => NARRATIVE,
        }
    }
}

impl fmt::Display for NarrationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NarrationStyle {
    type Err = ScriptError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NarrationStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ScriptError::InvalidInput(format!("unknown narration style '{value}'")))
    }
}

/// Splits text on `.`, `!` and `?` into trimmed, non-empty sentences.
pub fn split_sentences(content: &str) -> Vec<&str> {
    content
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Wraps the sentences of `content` in style phrases picked from `rng`.
pub fn compose_narration<R: RandomSource + ?Sized>(
    content: &str,
    style: NarrationStyle,
    rng: &mut R,
) -> String {
    let sentences: Vec<String> = split_sentences(content)
        .into_iter()
        .map(str::to_lowercase)
        .collect();
    let templates = style.templates();
    let opening = templates.openings[rng.pick_index(templates.openings.len())];
    let transition = templates.transitions[rng.pick_index(templates.transitions.len())];
    let closing = templates.closings[rng.pick_index(templates.closings.len())];

    match sentences.as_slice() {
        [] => String::new(),
        [only] => format!("{opening} {only}."),
        [first, second] => format!("{opening} {first}. {transition} {second}."),
        [first, middle @ .., last] => format!(
            "{opening} {first}. {}. {closing} {last}.",
            middle.join(". ")
        ),
    }
}

impl<R: RandomSource> ScriptComposer<R> {
    pub fn generate_voiceover_narration(&mut self, content: &str, style: NarrationStyle) -> String {
        compose_narration(content, style, &mut self.rng)
    }
}
