//! Storyboard input records and the camera vocabulary they use.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::visual::FrameVisuals;

/// One storyboard entry describing a single shot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct StoryboardFrame {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub shot_type: Option<ShotType>,
    #[serde(default)]
    pub camera_angle: Option<CameraAngle>,
    #[serde(default)]
    pub camera_movement: Option<CameraMovement>,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub voiceover: Vec<VoiceoverCue>,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    #[serde(default)]
    pub sound_effects: Vec<String>,
    #[serde(default)]
    pub music: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub order: u32,
    /// Visual plan filled in by the frame generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visuals: Option<FrameVisuals>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct VoiceoverCue {
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub character: String,
    pub text: String,
    #[serde(default)]
    pub parenthetical: Option<String>,
}

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Screenplay label for this value.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum! {
    pub enum ShotType {
        ExtremeWide => "EXTREME WIDE SHOT",
        Wide => "WIDE SHOT",
        Medium => "MEDIUM SHOT",
        MediumCloseUp => "MEDIUM CLOSE-UP",
        CloseUp => "CLOSE-UP",
        ExtremeCloseUp => "EXTREME CLOSE-UP",
        OverTheShoulder => "OVER THE SHOULDER",
        PointOfView => "POV",
        TwoShot => "TWO SHOT",
        Establishing => "ESTABLISHING SHOT",
        Insert => "INSERT",
    }
}

labeled_enum! {
    pub enum CameraAngle {
        EyeLevel => "EYE LEVEL",
        LowAngle => "LOW ANGLE",
        HighAngle => "HIGH ANGLE",
        BirdsEye => "BIRD'S EYE",
        DutchAngle => "DUTCH ANGLE",
        WormsEye => "WORM'S EYE",
        PointOfView => "POINT OF VIEW",
    }
}

labeled_enum! {
    pub enum CameraMovement {
        Static => "STATIC",
        Pan => "PAN",
        Tilt => "TILT",
        Dolly => "DOLLY",
        Tracking => "TRACKING",
        Crane => "CRANE",
        Handheld => "HANDHELD",
        Zoom => "ZOOM",
    }
}

labeled_enum! {
    pub enum TransitionKind {
        Cut => "CUT TO:",
        Dissolve => "DISSOLVE TO:",
        FadeIn => "FADE IN:",
        FadeOut => "FADE OUT.",
        SmashCut => "SMASH CUT TO:",
        MatchCut => "MATCH CUT TO:",
        Wipe => "WIPE TO:",
    }
}

impl Default for CameraAngle {
    fn default() -> Self {
        CameraAngle::EyeLevel
    }
}

impl Default for CameraMovement {
    fn default() -> Self {
        CameraMovement::Static
    }
}

impl Default for TransitionKind {
    fn default() -> Self {
        TransitionKind::Cut
    }
}

impl StoryboardFrame {
    /// Content of the shot element, or `None` when the frame has no shot type.
    pub fn shot_line(&self) -> Option<String> {
        let shot = self.shot_type?;
        let mut line = shot.label().to_string();
        if let Some(angle) = self.camera_angle {
            line.push_str(" - ");
            line.push_str(angle.label());
        }
        if let Some(movement) = self.camera_movement {
            if movement != CameraMovement::Static {
                line.push_str(" (");
                line.push_str(movement.label());
                line.push(')');
            }
        }
        Some(line)
    }

    /// Duration treated as zero when negative or not finite.
    pub fn effective_duration(&self) -> f64 {
        if self.duration.is_finite() && self.duration > 0.0 {
            self.duration
        } else {
            0.0
        }
    }
}
