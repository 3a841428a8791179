//! Ordered script documents and the editing operations on them.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::element::{reading_duration, ElementId, ElementType, ScriptElement};
use crate::error::{json_deserialize_error, json_serialize_error, ScriptError, ScriptResult};
use crate::version::SCRIPT_SCHEMA_VERSION;

/// Where a script's elements came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptSource {
    Storyboard,
    Transcription,
    #[default]
    Manual,
    Variation,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMetadata {
    /// Seconds.
    pub estimated_runtime: f64,
    /// Character names in first-seen order.
    pub characters: Vec<String>,
    #[serde(default)]
    pub source: ScriptSource,
}

/// A formatted screenplay: elements ordered by `order`, which always equals
/// the element's index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: ElementId,
    pub title: String,
    pub elements: Vec<ScriptElement>,
    pub metadata: ScriptMetadata,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptEnvelope {
    #[serde(default, rename = "script_schema_version")]
    script_schema_version: Option<String>,
    #[serde(flatten)]
    script: Script,
}

/// Aggregate numbers shown on the production dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStats {
    pub element_count: usize,
    pub counts: BTreeMap<ElementType, usize>,
    pub word_count: usize,
    pub dialogue_word_count: usize,
    /// Share of words that are spoken, in [0, 1].
    pub dialogue_ratio: f64,
    /// Seconds.
    pub estimated_reading_time: f64,
}

impl Script {
    pub fn new(id: ElementId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            elements: Vec::new(),
            metadata: ScriptMetadata::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements_of(&self, element_type: ElementType) -> impl Iterator<Item = &ScriptElement> {
        self.elements
            .iter()
            .filter(move |element| element.element_type == element_type)
    }

    /// Appends an element, assigning it the next order value.
    pub fn push(&mut self, mut element: ScriptElement) {
        element.order = order_for(self.elements.len());
        self.elements.push(element);
    }

    /// Inserts an element at `index` (which may equal the length).
    pub fn insert(&mut self, index: usize, element: ScriptElement) -> ScriptResult<()> {
        if index > self.elements.len() {
            return Err(ScriptError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        self.elements.insert(index, element);
        self.renumber();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> ScriptResult<ScriptElement> {
        if index >= self.elements.len() {
            return Err(ScriptError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        let removed = self.elements.remove(index);
        self.renumber();
        Ok(removed)
    }

    pub fn move_element(&mut self, from: usize, to: usize) -> ScriptResult<()> {
        let len = self.elements.len();
        for index in [from, to] {
            if index >= len {
                return Err(ScriptError::IndexOutOfRange { index, len });
            }
        }
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        self.renumber();
        Ok(())
    }

    /// Rewrites every `order` so it matches the element's position.
    pub fn renumber(&mut self) {
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.order = order_for(index);
        }
    }

    /// Rebuilds `metadata.characters` from the character elements.
    pub fn refresh_characters(&mut self) {
        self.metadata.characters = collect_characters(&self.elements);
    }

    pub fn stats(&self) -> ScriptStats {
        let mut counts = BTreeMap::new();
        let mut word_count = 0usize;
        let mut dialogue_word_count = 0usize;
        let mut estimated_reading_time = 0.0;
        for element in &self.elements {
            *counts.entry(element.element_type).or_insert(0) += 1;
            let words = element.word_count();
            word_count += words;
            if element.element_type.is_spoken() {
                dialogue_word_count += words;
            }
            estimated_reading_time += reading_duration(&element.content);
        }
        let dialogue_ratio = if word_count == 0 {
            0.0
        } else {
            (dialogue_word_count as f64 / word_count as f64).min(1.0)
        };
        ScriptStats {
            element_count: self.elements.len(),
            counts,
            word_count,
            dialogue_word_count,
            dialogue_ratio,
            estimated_reading_time,
        }
    }

    /// Hex SHA-256 over element types and contents, in order.
    ///
    /// Ids, formatting and timing do not contribute, so re-generated copies of
    /// the same text share a digest.
    pub fn content_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for element in &self.elements {
            hasher.update(element.element_type.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(element.content.as_bytes());
            hasher.update([0xFFu8]);
        }
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }

    /// Serializes the script to pretty JSON with the current schema version.
    pub fn to_json(&self) -> ScriptResult<String> {
        let envelope = ScriptEnvelope {
            script_schema_version: Some(SCRIPT_SCHEMA_VERSION.to_string()),
            script: self.clone(),
        };
        serde_json::to_string_pretty(&envelope).map_err(|err| json_serialize_error(&err))
    }

    /// Parses a script, accepting the current schema version or none.
    pub fn from_json(input: &str) -> ScriptResult<Self> {
        let envelope: ScriptEnvelope =
            serde_json::from_str(input).map_err(|err| json_deserialize_error(input, &err))?;
        match envelope.script_schema_version.as_deref() {
            Some(version) if version != SCRIPT_SCHEMA_VERSION => {
                Err(ScriptError::InvalidInput(format!(
                    "schema incompatible: found {version}, expected {SCRIPT_SCHEMA_VERSION}"
                )))
            }
            _ => Ok(envelope.script),
        }
    }
}

pub(crate) fn order_for(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

pub(crate) fn collect_characters(elements: &[ScriptElement]) -> Vec<String> {
    let mut seen = HashSet::new();
    elements
        .iter()
        .filter(|element| element.element_type == ElementType::Character)
        .filter(|element| seen.insert(element.content.as_str()))
        .map(|element| element.content.clone())
        .collect()
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
