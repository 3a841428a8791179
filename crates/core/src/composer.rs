//! Storyboard-to-script conversion.
//!
//! The composer maps input records onto typed [`ScriptElement`]s in a fixed
//! per-frame order, numbering them with one counter shared by the whole
//! conversion. It never reorders, sorts or drops frames.

use tracing::debug;

use crate::element::{ElementTiming, ElementType, ScriptElement};
use crate::random::{RandomSource, StdRandom};
use crate::script::{collect_characters, order_for, Script, ScriptSource};
use crate::storyboard::{StoryboardFrame, TransitionKind};

/// Note attached to transcript lines below the confidence threshold.
pub const LOW_CONFIDENCE_NOTE: &str = "Low confidence transcription";

/// Confidence below which a transcript segment is flagged.
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Stateless element composer that owns its random source.
#[derive(Clone, Debug)]
pub struct ScriptComposer<R = StdRandom> {
    pub(crate) rng: R,
    pub(crate) low_confidence_threshold: f64,
}

impl ScriptComposer<StdRandom> {
    pub fn new() -> Self {
        Self::with_random(StdRandom::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_random(StdRandom::seeded(seed))
    }
}

impl Default for ScriptComposer<StdRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> ScriptComposer<R> {
    pub fn with_random(rng: R) -> Self {
        Self {
            rng,
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn with_low_confidence_threshold(mut self, threshold: f64) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }

    pub fn random_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Converts storyboard frames, in input order, into a formatted script.
    pub fn convert_storyboard_to_script(&mut self, frames: &[StoryboardFrame]) -> Script {
        let mut sink = ElementSink::new(&mut self.rng);
        let mut cursor = 0.0f64;
        let last = frames.len().saturating_sub(1);

        for (index, frame) in frames.iter().enumerate() {
            let title = frame.title.trim();
            if !title.is_empty() {
                sink.emit(ElementType::SceneHeading, title.to_uppercase());
            }
            if let Some(shot) = frame.shot_line() {
                sink.emit(ElementType::Shot, shot);
            }

            let duration = frame.effective_duration();
            let action = sink.emit(ElementType::Action, frame.description.clone());
            action.timing = Some(ElementTiming {
                start_time: cursor,
                end_time: cursor + duration,
                duration,
            });
            cursor += duration;

            for cue in &frame.voiceover {
                sink.emit(ElementType::Voiceover, voiceover_content(&cue.speaker, &cue.text));
            }

            for line in &frame.dialogue {
                sink.emit(ElementType::Character, line.character.trim().to_uppercase());
                if let Some(parenthetical) = line
                    .parenthetical
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                {
                    sink.emit(ElementType::Parenthetical, wrap_parenthetical(parenthetical));
                }
                sink.emit(ElementType::Dialogue, line.text.clone());
            }

            let effects: Vec<&str> = frame
                .sound_effects
                .iter()
                .map(|effect| effect.trim())
                .filter(|effect| !effect.is_empty())
                .collect();
            if !effects.is_empty() {
                sink.emit(ElementType::SoundEffect, effects.join(", "));
            }
            if let Some(music) = frame
                .music
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
            {
                sink.emit(ElementType::Music, music);
            }
            if !frame.notes.trim().is_empty() {
                sink.emit(ElementType::Action, format!("NOTE: {}", frame.notes.trim()));
            }
            if index != last {
                sink.emit(ElementType::Transition, TransitionKind::Cut.label());
            }
        }

        let elements = sink.finish();
        let mut script = Script::new(self.rng.next_element_id(), "Storyboard Script");
        script.metadata.estimated_runtime = frames
            .iter()
            .map(StoryboardFrame::effective_duration)
            .sum();
        script.metadata.characters = collect_characters(&elements);
        script.metadata.source = ScriptSource::Storyboard;
        script.elements = elements;
        debug!(
            frames = frames.len(),
            elements = script.elements.len(),
            "converted storyboard"
        );
        script
    }
}

/// `"{SPEAKER} (V.O.)\n{text}"`.
pub fn voiceover_content(speaker: &str, text: &str) -> String {
    format!("{} (V.O.)\n{}", speaker.trim().to_uppercase(), text)
}

fn wrap_parenthetical(value: &str) -> String {
    if value.starts_with('(') && value.ends_with(')') {
        value.to_string()
    } else {
        format!("({value})")
    }
}

/// Appends elements with a shared, monotonically increasing order counter.
pub(crate) struct ElementSink<'a, R> {
    rng: &'a mut R,
    elements: Vec<ScriptElement>,
}

impl<'a, R: RandomSource> ElementSink<'a, R> {
    pub(crate) fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            elements: Vec::new(),
        }
    }

    pub(crate) fn emit(
        &mut self,
        element_type: ElementType,
        content: impl Into<String>,
    ) -> &mut ScriptElement {
        let order = order_for(self.elements.len());
        let element = ScriptElement::new(self.rng.next_element_id(), element_type, content, order);
        self.elements.push(element);
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    pub(crate) fn finish(self) -> Vec<ScriptElement> {
        self.elements
    }
}

#[cfg(test)]
#[path = "tests/composer_tests.rs"]
mod tests;
