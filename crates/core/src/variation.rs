//! Dialogue rewrites for A/B testing.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composer::ScriptComposer;
use crate::element::ElementId;
use crate::random::RandomSource;
use crate::script::{Script, ScriptSource};

/// Rewrite applied to spoken lines of one A/B version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    Formal,
    Casual,
    Concise,
    Original,
}

impl VariantKind {
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => VariantKind::Formal,
            1 => VariantKind::Casual,
            2 => VariantKind::Concise,
            _ => VariantKind::Original,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariantKind::Formal => "formal",
            VariantKind::Casual => "casual",
            VariantKind::Concise => "concise",
            VariantKind::Original => "original",
        }
    }
}

/// Audience metrics; collected after publishing, zero at generation time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetrics {
    pub views: u64,
    pub engagement_rate: f64,
    pub completion_rate: f64,
    pub average_watch_time: f64,
    pub conversions: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbTestVersion {
    pub id: ElementId,
    pub name: String,
    pub variant: VariantKind,
    /// Content digest of the script this version was derived from.
    pub base_digest: String,
    pub script: Script,
    pub metrics: VersionMetrics,
}

struct Rewrite {
    pattern: Regex,
    replacement: &'static str,
}

fn rewrites(table: &[(&str, &'static str)]) -> Vec<Rewrite> {
    table
        .iter()
        .map(|(from, to)| Rewrite {
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(from)))
                .expect("valid rewrite pattern"),
            replacement: to,
        })
        .collect()
}

static FORMALIZE: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    rewrites(&[
        ("can't", "cannot"),
        ("won't", "will not"),
        ("don't", "do not"),
        ("doesn't", "does not"),
        ("didn't", "did not"),
        ("isn't", "is not"),
        ("aren't", "are not"),
        ("wasn't", "was not"),
        ("weren't", "were not"),
        ("couldn't", "could not"),
        ("shouldn't", "should not"),
        ("wouldn't", "would not"),
        ("it's", "it is"),
        ("that's", "that is"),
        ("there's", "there is"),
        ("I'm", "I am"),
        ("I've", "I have"),
        ("I'll", "I will"),
        ("you're", "you are"),
        ("we're", "we are"),
        ("they're", "they are"),
        ("we'll", "we will"),
        ("let's", "let us"),
    ])
});

static CASUALIZE: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    rewrites(&[
        ("cannot", "can't"),
        ("will not", "won't"),
        ("do not", "don't"),
        ("does not", "doesn't"),
        ("did not", "didn't"),
        ("it is", "it's"),
        ("is not", "isn't"),
        ("are not", "aren't"),
        ("I am", "I'm"),
        ("you are", "you're"),
        ("we are", "we're"),
        ("they are", "they're"),
        ("going to", "gonna"),
        ("want to", "wanna"),
    ])
});

static SHORTEN: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    rewrites(&[
        ("in order to", "to"),
        ("at this point in time", "now"),
        ("at the present time", "now"),
        ("due to the fact that", "because"),
        ("in spite of the fact that", "although"),
        ("in the event that", "if"),
        ("for the purpose of", "for"),
        ("a large number of", "many"),
        ("each and every", "every"),
        ("in the near future", "soon"),
    ])
});

fn apply_rewrites(text: &str, table: &[Rewrite]) -> String {
    let mut output = text.to_string();
    for rewrite in table {
        output = rewrite
            .pattern
            .replace_all(&output, |caps: &Captures<'_>| {
                let matched = &caps[0];
                if matched.starts_with(|c: char| c.is_uppercase()) {
                    capitalize(rewrite.replacement)
                } else {
                    rewrite.replacement.to_string()
                }
            })
            .into_owned();
    }
    output
}

pub(crate) fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrites `text` for variant `index`: 0 expands contractions, 1 contracts,
/// 2 shortens stock phrases, anything else returns the text unchanged.
pub fn generate_variation(text: &str, index: usize) -> String {
    match VariantKind::for_index(index) {
        VariantKind::Formal => apply_rewrites(text, &FORMALIZE),
        VariantKind::Casual => apply_rewrites(text, &CASUALIZE),
        VariantKind::Concise => apply_rewrites(text, &SHORTEN),
        VariantKind::Original => text.to_string(),
    }
}

fn version_name(index: usize) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => format!("Version {}", char::from(b'A' + offset)),
        _ => format!("Version {}", index + 1),
    }
}

impl<R: RandomSource> ScriptComposer<R> {
    /// Produces `count` copies of `base` with spoken lines rewritten per
    /// variant index. Every element gets a fresh id; metrics start at zero.
    pub fn generate_ab_test_versions(&mut self, base: &Script, count: usize) -> Vec<AbTestVersion> {
        let base_digest = base.content_digest();
        let versions: Vec<AbTestVersion> = (0..count)
            .map(|index| {
                let name = version_name(index);
                let elements = base
                    .elements
                    .iter()
                    .map(|element| {
                        let mut copy = element.clone();
                        copy.id = self.rng.next_element_id();
                        if copy.element_type.is_spoken() {
                            copy.content = generate_variation(&element.content, index);
                        }
                        copy
                    })
                    .collect();
                let mut script = Script::new(
                    self.rng.next_element_id(),
                    format!("{} ({name})", base.title),
                );
                script.elements = elements;
                script.metadata = base.metadata.clone();
                script.metadata.source = ScriptSource::Variation;
                AbTestVersion {
                    id: self.rng.next_element_id(),
                    name,
                    variant: VariantKind::for_index(index),
                    base_digest: base_digest.clone(),
                    script,
                    metrics: VersionMetrics::default(),
                }
            })
            .collect();
        debug!(count, "generated A/B test versions");
        versions
    }
}
