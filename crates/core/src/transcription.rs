//! Transcription projects, their editing operations, and conversion into
//! character/dialogue script elements.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composer::{ElementSink, ScriptComposer, LOW_CONFIDENCE_NOTE};
use crate::element::{ElementTiming, ElementType};
use crate::error::{ScriptError, ScriptResult};
use crate::random::RandomSource;
use crate::script::{collect_characters, Script, ScriptSource};

/// Speaker name used for segments without one.
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// One timestamped span of transcribed speech.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    #[serde(default)]
    pub id: String,
    /// Seconds.
    pub start_time: f64,
    /// Seconds.
    pub end_time: f64,
    pub text: String,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl TranscriptSegment {
    /// Speaker name with missing or blank names mapped to [`UNKNOWN_SPEAKER`].
    pub fn speaker_name(&self) -> &str {
        self.speaker
            .as_deref()
            .map(str::trim)
            .filter(|speaker| !speaker.is_empty())
            .unwrap_or(UNKNOWN_SPEAKER)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionProject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl TranscriptionProject {
    /// Distinct speaker names in first-seen order.
    pub fn speakers(&self) -> Vec<&str> {
        let mut speakers: Vec<&str> = Vec::new();
        for segment in &self.segments {
            let name = segment.speaker_name();
            if !speakers.contains(&name) {
                speakers.push(name);
            }
        }
        speakers
    }

    /// Segments grouped by speaker. Speakers appear in first-seen order and
    /// each group keeps the original segment order.
    pub fn group_by_speaker(&self) -> Vec<(&str, Vec<&TranscriptSegment>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&TranscriptSegment>)> = Vec::new();
        for segment in &self.segments {
            let name = segment.speaker_name();
            let slot = *index.entry(name).or_insert_with(|| {
                groups.push((name, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(segment);
        }
        groups
    }

    pub fn low_confidence_segments(&self, threshold: f64) -> Vec<&TranscriptSegment> {
        self.segments
            .iter()
            .filter(|segment| segment.confidence < threshold)
            .collect()
    }

    /// Renames every segment attributed to `from`; returns how many changed.
    pub fn rename_speaker(&mut self, from: &str, to: &str) -> usize {
        let mut renamed = 0;
        for segment in &mut self.segments {
            if segment.speaker_name() == from {
                segment.speaker = Some(to.to_string());
                renamed += 1;
            }
        }
        renamed
    }

    /// Merges segment `index` with the one after it.
    pub fn merge_segments(&mut self, index: usize) -> ScriptResult<()> {
        let len = self.segments.len();
        let next_index = index.saturating_add(1);
        if next_index >= len {
            return Err(ScriptError::IndexOutOfRange {
                index: next_index,
                len,
            });
        }
        let next = self.segments.remove(next_index);
        let current = &mut self.segments[index];
        let text = format!("{} {}", current.text.trim_end(), next.text.trim_start());
        current.text = text.trim().to_string();
        current.start_time = current.start_time.min(next.start_time);
        current.end_time = current.end_time.max(next.end_time);
        current.confidence = current.confidence.min(next.confidence);
        Ok(())
    }

    /// Splits segment `index` at byte offset `at`, dividing its time span in
    /// proportion to the text on each side.
    pub fn split_segment(&mut self, index: usize, at: usize) -> ScriptResult<()> {
        let len = self.segments.len();
        let segment = self
            .segments
            .get(index)
            .ok_or(ScriptError::IndexOutOfRange { index, len })?;
        if at == 0 || at >= segment.text.len() || !segment.text.is_char_boundary(at) {
            return Err(ScriptError::InvalidInput(format!(
                "cannot split segment {index} at offset {at}"
            )));
        }
        let (head, tail) = segment.text.split_at(at);
        let head = head.trim().to_string();
        let ratio = at as f64 / segment.text.len() as f64;
        let split_time = segment.start_time + (segment.end_time - segment.start_time) * ratio;

        let mut second = segment.clone();
        second.id = format!("{}-b", segment.id);
        second.text = tail.trim().to_string();
        second.start_time = split_time;

        let first = &mut self.segments[index];
        first.text = head;
        first.end_time = split_time;
        self.segments.insert(index + 1, second);
        Ok(())
    }

    /// Span from the earliest start to the latest end, in seconds.
    pub fn duration(&self) -> f64 {
        let start = self
            .segments
            .iter()
            .map(|segment| segment.start_time)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .segments
            .iter()
            .map(|segment| segment.end_time)
            .fold(f64::NEG_INFINITY, f64::max);
        if start.is_finite() && end.is_finite() {
            (end - start).max(0.0)
        } else {
            0.0
        }
    }
}

impl<R: RandomSource> ScriptComposer<R> {
    /// Converts a transcription into character/dialogue pairs grouped by
    /// speaker. Segments are not re-interleaved chronologically.
    pub fn process_transcription(&mut self, project: &TranscriptionProject) -> Script {
        let threshold = self.low_confidence_threshold;
        let mut sink = ElementSink::new(&mut self.rng);

        for (speaker, segments) in project.group_by_speaker() {
            for segment in segments {
                let timing = ElementTiming {
                    start_time: segment.start_time,
                    end_time: segment.end_time,
                    duration: (segment.end_time - segment.start_time).max(0.0),
                };
                let low_confidence = segment.confidence < threshold;

                let character = sink.emit(ElementType::Character, speaker.to_uppercase());
                character.timing = Some(timing);
                if low_confidence {
                    character.note = Some(LOW_CONFIDENCE_NOTE.to_string());
                }

                let dialogue = sink.emit(ElementType::Dialogue, segment.text.clone());
                dialogue.timing = Some(timing);
                if low_confidence {
                    dialogue.note = Some(LOW_CONFIDENCE_NOTE.to_string());
                }
            }
        }

        let elements = sink.finish();
        let title = if project.title.trim().is_empty() {
            "Transcript".to_string()
        } else {
            project.title.clone()
        };
        let mut script = Script::new(self.rng.next_element_id(), title);
        script.metadata.estimated_runtime = project.duration();
        script.metadata.characters = collect_characters(&elements);
        script.metadata.source = ScriptSource::Transcription;
        script.elements = elements;
        debug!(
            segments = project.segments.len(),
            elements = script.elements.len(),
            "processed transcription"
        );
        script
    }
}

#[cfg(test)]
#[path = "tests/transcription_tests.rs"]
mod tests;
