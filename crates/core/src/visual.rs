//! Visual design records attached to generated storyboard frames.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storyboard::TransitionKind;

/// Storyboard canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    Tense,
    Mysterious,
    Melancholic,
    Romantic,
    Cheerful,
    Dramatic,
    #[default]
    Neutral,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub mood: Mood,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl ColorPalette {
    /// Fixed palette for a mood.
    pub fn for_mood(mood: Mood) -> Self {
        let (primary, secondary, accent, background) = match mood {
            Mood::Tense => ("#8B0000", "#1C1C1C", "#FF4500", "#0D0D0D"),
            Mood::Mysterious => ("#2C3E50", "#34495E", "#8E44AD", "#0B0C10"),
            Mood::Melancholic => ("#5D6D7E", "#85929E", "#AEB6BF", "#1B2631"),
            Mood::Romantic => ("#C0392B", "#F5B7B1", "#F7DC6F", "#FDEDEC"),
            Mood::Cheerful => ("#F4D03F", "#58D68D", "#EB984E", "#FEF9E7"),
            Mood::Dramatic => ("#7B241C", "#212F3D", "#D4AC0D", "#17202A"),
            Mood::Neutral => ("#7F8C8D", "#BDC3C7", "#3498DB", "#ECF0F1"),
        };
        Self {
            mood,
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            background: background.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum LightingStyle {
    Neon,
    Silhouette,
    GoldenHour,
    Practical,
    LowKey,
    HighKey,
    #[default]
    Natural,
}

/// Three-point lighting plan. Intensities are in [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct LightingSetup {
    pub style: LightingStyle,
    pub key_light: f64,
    pub fill_light: f64,
    pub back_light: f64,
    /// Kelvin.
    pub color_temperature: u32,
    pub notes: String,
}

impl LightingSetup {
    pub fn for_style(style: LightingStyle) -> Self {
        let (key_light, fill_light, back_light, color_temperature) = match style {
            LightingStyle::Neon => (0.6, 0.2, 0.8, 5600),
            LightingStyle::Silhouette => (0.1, 0.0, 1.0, 5600),
            LightingStyle::GoldenHour => (0.7, 0.3, 0.6, 3200),
            LightingStyle::Practical => (0.4, 0.1, 0.2, 1900),
            LightingStyle::LowKey => (0.8, 0.1, 0.5, 4300),
            LightingStyle::HighKey => (0.9, 0.7, 0.5, 5600),
            LightingStyle::Natural => (0.8, 0.5, 0.4, 5600),
        };
        let notes = match style {
            LightingStyle::Neon => "Colored practicals with strong rim light",
            LightingStyle::Silhouette => "Expose for the background; subject in shadow",
            LightingStyle::GoldenHour => "Warm low sun as key, bounce for fill",
            LightingStyle::Practical => "Motivated by in-frame flame sources",
            LightingStyle::LowKey => "High contrast ratio, deep shadows",
            LightingStyle::HighKey => "Soft, even light with minimal shadows",
            LightingStyle::Natural => "Standard three-point setup",
        };
        Self {
            style,
            key_light,
            fill_light,
            back_light,
            color_temperature,
            notes: notes.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum Facing {
    Left,
    Right,
    #[default]
    Front,
}

/// Placement of one character on the storyboard canvas, in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct CharacterPosition {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub facing: Facing,
}

/// Visual plan generated for a frame; ignored by script conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct FrameVisuals {
    pub color_palette: Option<ColorPalette>,
    pub lighting: Option<LightingSetup>,
    #[serde(default)]
    pub characters: Vec<CharacterPosition>,
    #[serde(default)]
    pub props: Vec<String>,
    #[serde(default)]
    pub transition: TransitionKind,
}
