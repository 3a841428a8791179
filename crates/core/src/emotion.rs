//! Keyword emotion scoring and the emotional arc of a script.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::ElementType;
use crate::script::Script;

/// Score added per matched keyword.
pub const KEYWORD_WEIGHT: f64 = 0.25;
/// Minimum difference between half means for a rising or falling arc.
pub const TREND_THRESHOLD: f64 = 0.1;
/// Minimum lead of an interior peak over both ends for a peaked arc.
pub const PEAK_THRESHOLD: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EmotionType {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Tension,
    #[default]
    Neutral,
}

impl EmotionType {
    /// Types that carry a keyword score, in tie-break order.
    pub const SCORED: [EmotionType; 6] = [
        EmotionType::Joy,
        EmotionType::Sadness,
        EmotionType::Anger,
        EmotionType::Fear,
        EmotionType::Surprise,
        EmotionType::Tension,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            EmotionType::Joy => &[
                "happy", "joy", "laugh", "laughs", "laughing", "smile", "smiles", "celebrate",
                "celebrates", "delighted", "love", "wonderful", "cheer", "cheers",
            ],
            EmotionType::Sadness => &[
                "sad", "cry", "cries", "crying", "tears", "grief", "alone", "lonely", "loss",
                "mourn", "mourns", "funeral", "sorrow",
            ],
            EmotionType::Anger => &[
                "angry", "furious", "rage", "shout", "shouts", "yells", "slams", "hate",
                "fight", "fights",
            ],
            EmotionType::Fear => &[
                "afraid", "scared", "fear", "terrified", "dark", "panic", "trembles", "hides",
                "scream", "screams",
            ],
            EmotionType::Surprise => &[
                "suddenly", "surprise", "shock", "shocked", "unexpected", "gasps", "stunned",
                "reveal", "reveals",
            ],
            EmotionType::Tension => &[
                "chase", "danger", "threat", "tense", "waits", "silence", "clock", "escape",
                "hunt", "pursuit",
            ],
            EmotionType::Neutral => &[],
        }
    }
}

/// Per-emotion keyword scores in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionScores {
    pub joy: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
    pub tension: f64,
}

impl EmotionScores {
    pub fn get(&self, emotion: EmotionType) -> f64 {
        match emotion {
            EmotionType::Joy => self.joy,
            EmotionType::Sadness => self.sadness,
            EmotionType::Anger => self.anger,
            EmotionType::Fear => self.fear,
            EmotionType::Surprise => self.surprise,
            EmotionType::Tension => self.tension,
            EmotionType::Neutral => 0.0,
        }
    }

    fn set(&mut self, emotion: EmotionType, score: f64) {
        match emotion {
            EmotionType::Joy => self.joy = score,
            EmotionType::Sadness => self.sadness = score,
            EmotionType::Anger => self.anger = score,
            EmotionType::Fear => self.fear = score,
            EmotionType::Surprise => self.surprise = score,
            EmotionType::Tension => self.tension = score,
            EmotionType::Neutral => {}
        }
    }

    /// Highest-scoring emotion, earliest in [`EmotionType::SCORED`] on ties,
    /// or neutral when every score is zero.
    pub fn dominant(&self) -> EmotionType {
        let mut best = EmotionType::Neutral;
        let mut best_score = 0.0;
        for emotion in EmotionType::SCORED {
            let score = self.get(emotion);
            if score > best_score {
                best = emotion;
                best_score = score;
            }
        }
        best
    }

    pub fn intensity(&self) -> f64 {
        self.get(self.dominant())
    }
}

/// Scores each emotion by the number of its keywords present as words.
pub fn analyze_emotion(text: &str) -> EmotionScores {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|token| !token.is_empty())
        .collect();

    let mut scores = EmotionScores::default();
    for emotion in EmotionType::SCORED {
        let hits = emotion
            .keywords()
            .iter()
            .filter(|keyword| tokens.contains(*keyword))
            .count();
        scores.set(emotion, (KEYWORD_WEIGHT * hits as f64).min(1.0));
    }
    scores
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPoint {
    /// `order` of the source element.
    pub order: u32,
    /// Relative position in the script, 0 to 1.
    pub position: f64,
    pub emotion: EmotionType,
    pub intensity: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ArcShape {
    Rising,
    Falling,
    Peaked,
    #[default]
    Flat,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalArc {
    pub points: Vec<EmotionPoint>,
    /// Index into `points` of the most intense point.
    pub peak: Option<usize>,
    pub average_intensity: f64,
    pub shape: ArcShape,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Classifies a sequence of intensities. An interior peak that clears both
/// ends by [`PEAK_THRESHOLD`] wins; otherwise the means of the two halves
/// decide, with the middle point of an odd sequence counted in the second.
fn classify(intensities: &[f64], peak: Option<usize>) -> ArcShape {
    let n = intensities.len();
    if n < 2 {
        return ArcShape::Flat;
    }
    if let Some(peak) = peak.filter(|index| *index > 0 && *index < n - 1) {
        let ends = intensities[0].max(intensities[n - 1]);
        if intensities[peak] - ends >= PEAK_THRESHOLD {
            return ArcShape::Peaked;
        }
    }
    let (first, second) = intensities.split_at(n / 2);
    let delta = mean(second) - mean(first);
    if delta > TREND_THRESHOLD {
        ArcShape::Rising
    } else if delta < -TREND_THRESHOLD {
        ArcShape::Falling
    } else {
        ArcShape::Flat
    }
}

/// One point per action, dialogue and voiceover element of `script`.
pub fn analyze_emotional_arc(script: &Script) -> EmotionalArc {
    let scored: Vec<_> = script
        .elements
        .iter()
        .filter(|element| {
            matches!(
                element.element_type,
                ElementType::Action | ElementType::Dialogue | ElementType::Voiceover
            )
        })
        .collect();

    let last = scored.len().saturating_sub(1);
    let points: Vec<EmotionPoint> = scored
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let scores = analyze_emotion(&element.content);
            EmotionPoint {
                order: element.order,
                position: if last == 0 {
                    0.0
                } else {
                    index as f64 / last as f64
                },
                emotion: scores.dominant(),
                intensity: scores.intensity(),
            }
        })
        .collect();

    let intensities: Vec<f64> = points.iter().map(|point| point.intensity).collect();
    let peak = intensities
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, value)| match best {
            Some((_, top)) if *value <= top => best,
            _ => Some((index, *value)),
        })
        .map(|(index, _)| index);
    let shape = classify(&intensities, peak);
    let average_intensity = mean(&intensities);

    debug!(points = points.len(), ?shape, "analyzed emotional arc");

    EmotionalArc {
        points,
        peak,
        average_intensity,
        shape,
    }
}
