//! Script elements and their static per-type formatting.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Words per second used to estimate reading time (150 wpm).
pub const READING_WORDS_PER_SECOND: f64 = 2.5;

/// Unique identifier of a script element or script.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ElementId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of screenplay element kinds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Shot,
    Voiceover,
    SoundEffect,
    Music,
    Title,
    Montage,
}

impl ElementType {
    pub const ALL: [ElementType; 12] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Shot,
        ElementType::Voiceover,
        ElementType::SoundEffect,
        ElementType::Music,
        ElementType::Title,
        ElementType::Montage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene-heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Shot => "shot",
            ElementType::Voiceover => "voiceover",
            ElementType::SoundEffect => "sound-effect",
            ElementType::Music => "music",
            ElementType::Title => "title",
            ElementType::Montage => "montage",
        }
    }

    /// Elements whose text is spoken; these are rewritten by A/B variations.
    pub fn is_spoken(self) -> bool {
        matches!(self, ElementType::Dialogue | ElementType::Voiceover)
    }

    /// Static formatting for this element type.
    pub fn formatting(self) -> ElementFormatting {
        let base = ElementFormatting::default();
        match self {
            ElementType::SceneHeading => ElementFormatting {
                bold: true,
                line_spacing: 2.0,
                ..base
            },
            ElementType::Action => base,
            ElementType::Character => ElementFormatting {
                indent: 3.7,
                ..base
            },
            ElementType::Dialogue => ElementFormatting {
                indent: 2.5,
                ..base
            },
            ElementType::Parenthetical => ElementFormatting {
                italic: true,
                indent: 3.1,
                ..base
            },
            ElementType::Transition => ElementFormatting {
                alignment: Alignment::Right,
                line_spacing: 2.0,
                ..base
            },
            ElementType::Shot => ElementFormatting {
                bold: true,
                ..base
            },
            ElementType::Voiceover => ElementFormatting {
                italic: true,
                indent: 2.5,
                color: "#1F3A93".to_string(),
                ..base
            },
            ElementType::SoundEffect => ElementFormatting {
                bold: true,
                color: "#8B0000".to_string(),
                ..base
            },
            ElementType::Music => ElementFormatting {
                italic: true,
                color: "#4B0082".to_string(),
                ..base
            },
            ElementType::Title => ElementFormatting {
                font_size: 18.0,
                bold: true,
                alignment: Alignment::Center,
                line_spacing: 2.0,
                ..base
            },
            ElementType::Montage => ElementFormatting {
                bold: true,
                underline: true,
                ..base
            },
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Style record attached to every element. `indent` is in inches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ElementFormatting {
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: String,
    pub alignment: Alignment,
    pub indent: f32,
    pub line_spacing: f32,
}

impl Default for ElementFormatting {
    fn default() -> Self {
        Self {
            font_family: "Courier Prime".to_string(),
            font_size: 12.0,
            bold: false,
            italic: false,
            underline: false,
            color: "#000000".to_string(),
            alignment: Alignment::Left,
            indent: 0.0,
            line_spacing: 1.0,
        }
    }
}

/// Timing window of an element, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ElementTiming {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

impl ElementTiming {
    pub fn span(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            duration: (end_time - start_time).max(0.0),
        }
    }
}

/// Estimated time to read `text` aloud.
pub fn reading_duration(text: &str) -> f64 {
    text.split_whitespace().count() as f64 / READING_WORDS_PER_SECOND
}

/// One formatted unit of a script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub content: String,
    pub formatting: ElementFormatting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<ElementTiming>,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ScriptElement {
    pub fn new(
        id: ElementId,
        element_type: ElementType,
        content: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id,
            element_type,
            content: content.into(),
            formatting: element_type.formatting(),
            timing: None,
            order,
            note: None,
        }
    }

    pub fn with_timing(mut self, timing: ElementTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
