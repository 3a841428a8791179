//! Keyword-presence scoring of free-text scene descriptions.
//!
//! Every score is additive over a fixed keyword list and clamped where it is
//! computed. Scores are derived independently and never cross-validated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const COMPLEXITY_KEYWORDS: &[&str] =
    &["multiple", "crowd", "action", "movement", "complex", "detailed"];
pub const VISUAL_KEYWORDS: &[&str] = &[
    "color", "light", "shadow", "bright", "dark", "beautiful", "stunning", "dramatic",
];
pub const PACING_KEYWORDS: &[&str] =
    &["suddenly", "slowly", "quickly", "then", "meanwhile", "after"];
pub const CHALLENGE_KEYWORDS: &[&str] =
    &["explosion", "flying", "underwater", "fire", "crowd", "night"];

pub const BASE_COMPLEXITY: f64 = 0.3;
pub const BASE_VISUAL_INTEREST: f64 = 0.4;
pub const BASE_PACING: f64 = 0.5;
pub const MIN_FEASIBILITY: f64 = 0.3;

pub const SPLIT_SHOTS_SUGGESTION: &str = "Consider breaking this scene into multiple shots";
pub const SETUP_TIME_SUGGESTION: &str = "Plan additional setup time for complex staging";
pub const VISUAL_DETAIL_SUGGESTION: &str =
    "Add visual details such as lighting, color, or texture to strengthen the frame";
pub const FAST_PACING_SUGGESTION: &str =
    "Fast pacing detected: consider quick cuts and dynamic camera movement";
pub const TEMPORAL_CUES_SUGGESTION: &str =
    "Consider adding temporal cues (then, suddenly, meanwhile) to clarify pacing";
pub const TECHNICAL_CHALLENGE_WARNING: &str =
    "This scene involves significant technical challenges; consider VFX or stunt coordination";
pub const NIGHT_WARNING: &str = "Night scenes require additional lighting equipment and planning";
pub const CROWD_WARNING: &str = "Crowd scenes require extras coordination and location permits";
pub const UNDERWATER_WARNING: &str =
    "Underwater filming requires specialized housings and certified divers";
pub const PYROTECHNICS_WARNING: &str =
    "Fire and explosions require licensed pyrotechnicians and safety personnel";

/// Heuristic production scores for one description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// [0, 1]
    pub scene_complexity: f64,
    /// [0, 1]
    pub visual_interest: f64,
    /// [0, 1]
    pub narrative_pacing: f64,
    /// [0.3, 1]
    pub technical_feasibility: f64,
    pub suggestions: Vec<String>,
    pub warnings: Vec<String>,
}

/// Number of `keywords` contained anywhere in `haystack`.
fn substring_hits(haystack: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .count()
}

/// Number of `keywords` equal to one of the whitespace-separated tokens.
/// Multi-word keywords can never match.
fn token_hits(tokens: &[&str], keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| tokens.contains(*keyword))
        .count()
}

pub fn analyze_text_description(description: &str) -> AiAnalysis {
    let lower = description.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let scene_complexity =
        (BASE_COMPLEXITY + 0.2 * substring_hits(&lower, COMPLEXITY_KEYWORDS) as f64).min(1.0);
    let visual_interest =
        (BASE_VISUAL_INTEREST + 0.15 * token_hits(&tokens, VISUAL_KEYWORDS) as f64).min(1.0);
    let narrative_pacing =
        (BASE_PACING + 0.1 * token_hits(&tokens, PACING_KEYWORDS) as f64).min(1.0);
    let technical_feasibility =
        (1.0 - 0.2 * token_hits(&tokens, CHALLENGE_KEYWORDS) as f64).max(MIN_FEASIBILITY);

    let mut suggestions = Vec::new();
    let mut warnings = Vec::new();

    if scene_complexity > 0.7 {
        suggestions.push(SPLIT_SHOTS_SUGGESTION.to_string());
        suggestions.push(SETUP_TIME_SUGGESTION.to_string());
    }
    if visual_interest < 0.5 {
        suggestions.push(VISUAL_DETAIL_SUGGESTION.to_string());
    }
    if narrative_pacing > 0.7 {
        suggestions.push(FAST_PACING_SUGGESTION.to_string());
    }
    if narrative_pacing <= BASE_PACING {
        suggestions.push(TEMPORAL_CUES_SUGGESTION.to_string());
    }
    if technical_feasibility < 0.6 {
        warnings.push(TECHNICAL_CHALLENGE_WARNING.to_string());
    }
    if lower.contains("night") {
        warnings.push(NIGHT_WARNING.to_string());
    }
    if lower.contains("crowd") {
        warnings.push(CROWD_WARNING.to_string());
    }
    if lower.contains("underwater") {
        warnings.push(UNDERWATER_WARNING.to_string());
    }
    if lower.contains("explosion") || lower.contains("fire") {
        warnings.push(PYROTECHNICS_WARNING.to_string());
    }

    debug!(
        scene_complexity,
        visual_interest, narrative_pacing, technical_feasibility, "analyzed description"
    );

    AiAnalysis {
        scene_complexity,
        visual_interest,
        narrative_pacing,
        technical_feasibility,
        suggestions,
        warnings,
    }
}

#[cfg(test)]
#[path = "tests/analyzer_tests.rs"]
mod tests;
