use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ScriptError, ScriptResult};
use crate::storyboard::StoryboardFrame;
use crate::transcription::TranscriptionProject;

/// Caps applied when reading external JSON. The transforms themselves never
/// check these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub max_frames: usize,
    /// Bytes, per text field.
    pub max_text_length: usize,
    pub max_segments: usize,
    pub max_input_bytes: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_frames: 1_000,
            max_text_length: 16 * 1024,
            max_segments: 50_000,
            max_input_bytes: 8 * 1024 * 1024,
        }
    }
}

fn exceeded(what: String) -> ScriptError {
    warn!(limit = %what, "rejected input");
    ScriptError::ResourceLimit(what)
}

impl InputLimits {
    pub fn check_input_size(&self, input: &str) -> ScriptResult<()> {
        if input.len() > self.max_input_bytes {
            return Err(exceeded(format!(
                "input is {} bytes, limit is {}",
                input.len(),
                self.max_input_bytes
            )));
        }
        Ok(())
    }

    fn check_text(&self, field: &str, index: usize, text: &str) -> ScriptResult<()> {
        if text.len() > self.max_text_length {
            return Err(exceeded(format!("{field} of item {index} too long")));
        }
        Ok(())
    }

    pub fn validate_frames(&self, frames: &[StoryboardFrame]) -> ScriptResult<()> {
        if frames.len() > self.max_frames {
            return Err(exceeded(format!(
                "{} frames, limit is {}",
                frames.len(),
                self.max_frames
            )));
        }
        for (index, frame) in frames.iter().enumerate() {
            self.check_text("title", index, &frame.title)?;
            self.check_text("description", index, &frame.description)?;
            self.check_text("notes", index, &frame.notes)?;
            for cue in &frame.voiceover {
                self.check_text("voiceover", index, &cue.text)?;
            }
            for line in &frame.dialogue {
                self.check_text("dialogue", index, &line.text)?;
            }
        }
        Ok(())
    }

    pub fn validate_transcription(&self, project: &TranscriptionProject) -> ScriptResult<()> {
        if project.segments.len() > self.max_segments {
            return Err(exceeded(format!(
                "{} segments, limit is {}",
                project.segments.len(),
                self.max_segments
            )));
        }
        for (index, segment) in project.segments.iter().enumerate() {
            self.check_text("segment text", index, &segment.text)?;
        }
        Ok(())
    }
}
