//! Keyword decision tables that turn a prose description into a storyboard
//! frame.
//!
//! Every table scans the lower-cased description in a fixed priority order.
//! Single-choice tables return the first rule that matches; accumulating
//! tables collect every match in table order. A key matches a word token
//! exactly, with a plural `s`/`es` suffix, or as a prefix when the key has
//! at least four characters. Keys containing spaces or punctuation match as
//! substrings.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::analyze_text_description;
use crate::narration::split_sentences;
use crate::storyboard::{
    CameraAngle, CameraMovement, DialogueLine, ShotType, StoryboardFrame, TransitionKind,
    VoiceoverCue,
};
use crate::variation::capitalize;
use crate::visual::{
    Canvas, CharacterPosition, ColorPalette, Facing, FrameVisuals, LightingSetup, LightingStyle,
    Mood,
};

/// Upper bound on generated character placements.
pub const MAX_CHARACTERS: usize = 8;
pub const MIN_FRAME_SECONDS: f64 = 3.0;
pub const MAX_FRAME_SECONDS: f64 = 15.0;
pub const TITLE_WORDS: usize = 6;
pub const NARRATOR: &str = "Narrator";

const CHARACTER_ROW: f64 = 0.7;

/// Words of a lower-cased description, split on anything that is not
/// alphanumeric or an apostrophe.
struct Keywords<'a> {
    lower: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Keywords<'a> {
    fn new(lower: &'a str) -> Self {
        let tokens = lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|token| !token.is_empty())
            .collect();
        Self { lower, tokens }
    }

    fn matches(&self, key: &str) -> bool {
        if key.chars().any(|c| !c.is_alphanumeric()) {
            return self.lower.contains(key);
        }
        self.tokens.iter().any(|token| token_matches(token, key))
    }

    fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.matches(key))
    }

    /// Position of the first token matching `key`.
    fn position(&self, key: &str) -> Option<usize> {
        self.tokens.iter().position(|token| token_matches(token, key))
    }
}

fn token_matches(token: &str, key: &str) -> bool {
    if token == key {
        return true;
    }
    match token.strip_prefix(key) {
        Some("s") | Some("es") => true,
        Some(_) => key.len() >= 4,
        None => false,
    }
}

/// First entry whose keys match, in table order.
fn first_match<T: Copy>(words: &Keywords<'_>, table: &[(&[&str], T)]) -> Option<T> {
    table
        .iter()
        .find(|(keys, _)| words.any(keys))
        .map(|(_, value)| *value)
}

const ESTABLISHING_KEYS: &[&str] = &[
    "landscape", "city", "skyline", "exterior", "establishing", "aerial", "horizon", "valley",
];

const SHOT_RULES: &[(&[&str], &[ShotType])] = &[
    (
        &["conversation", "talk", "discuss", "argue", "dialogue", "interview"],
        &[ShotType::TwoShot, ShotType::OverTheShoulder],
    ),
    (
        &["face", "eyes", "tear", "expression", "smile", "whisper"],
        &[ShotType::CloseUp],
    ),
    (
        &["hand", "detail", "letter", "phone", "screen", "note", "ring"],
        &[ShotType::Insert],
    ),
    (
        &["sees", "watches", "through", "peers"],
        &[ShotType::PointOfView],
    ),
    (
        &["stares", "realizes", "shock", "gasps"],
        &[ShotType::ExtremeCloseUp],
    ),
];

/// Shot list for a description: an opener (establishing or wide) followed by
/// the shots of every matching rule, or medium and close-up when no rule
/// matches.
pub fn generate_shot_sequence(description: &str) -> Vec<ShotType> {
    let lower = description.to_lowercase();
    let words = Keywords::new(&lower);
    let opener = if words.any(ESTABLISHING_KEYS) {
        ShotType::Establishing
    } else {
        ShotType::Wide
    };

    let mut shots = vec![opener];
    for (keys, rule_shots) in SHOT_RULES {
        if words.any(keys) {
            for shot in *rule_shots {
                if !shots.contains(shot) {
                    shots.push(*shot);
                }
            }
        }
    }
    if shots.len() == 1 {
        shots.extend([ShotType::Medium, ShotType::CloseUp]);
    }
    shots
}

const ANGLE_RULES: &[(&[&str], CameraAngle)] = &[
    (&["overhead", "above", "aerial", "bird's"], CameraAngle::BirdsEye),
    (
        &["powerful", "towering", "heroic", "dominant", "giant", "looms"],
        CameraAngle::LowAngle,
    ),
    (
        &["vulnerable", "small", "weak", "defeated", "alone", "helpless"],
        CameraAngle::HighAngle,
    ),
    (
        &["chaos", "disoriented", "uneasy", "drunk", "confused", "tilted"],
        CameraAngle::DutchAngle,
    ),
    (&["ground", "insect", "beneath", "crawl"], CameraAngle::WormsEye),
    (&["sees", "pov", "point of view"], CameraAngle::PointOfView),
];

pub fn suggest_camera_angle(description: &str) -> CameraAngle {
    let lower = description.to_lowercase();
    first_match(&Keywords::new(&lower), ANGLE_RULES).unwrap_or_default()
}

const MOVEMENT_RULES: &[(&[&str], CameraMovement)] = &[
    (
        &["chase", "follows", "running", "runs", "race", "pursue"],
        CameraMovement::Tracking,
    ),
    (
        &["approach", "closer", "reveal", "toward"],
        CameraMovement::Dolly,
    ),
    (
        &["frantic", "shaky", "fight", "struggle", "panic"],
        CameraMovement::Handheld,
    ),
    (
        &["sweeping", "rises above", "soars", "aerial"],
        CameraMovement::Crane,
    ),
    (&["panorama", "across", "scans", "landscape"], CameraMovement::Pan),
    (&["climbs", "towers", "tall", "descends"], CameraMovement::Tilt),
    (&["zoom", "focuses", "notices"], CameraMovement::Zoom),
];

pub fn suggest_camera_movement(description: &str) -> CameraMovement {
    let lower = description.to_lowercase();
    first_match(&Keywords::new(&lower), MOVEMENT_RULES).unwrap_or_default()
}

const MOOD_RULES: &[(&[&str], Mood)] = &[
    (
        &["chase", "danger", "threat", "fight", "tense", "suspense", "escape"],
        Mood::Tense,
    ),
    (
        &["mystery", "mysterious", "shadow", "fog", "secret", "strange", "unknown"],
        Mood::Mysterious,
    ),
    (
        &["sad", "rain", "alone", "loss", "grief", "lonely", "tear", "funeral"],
        Mood::Melancholic,
    ),
    (
        &["love", "kiss", "romantic", "embrace", "heart", "wedding"],
        Mood::Romantic,
    ),
    (
        &["happy", "laugh", "sunny", "celebrat", "joy", "party", "bright"],
        Mood::Cheerful,
    ),
    (
        &["dramatic", "storm", "confront", "explosion", "fire", "war"],
        Mood::Dramatic,
    ),
];

pub fn detect_mood(description: &str) -> Mood {
    let lower = description.to_lowercase();
    first_match(&Keywords::new(&lower), MOOD_RULES).unwrap_or_default()
}

pub fn generate_color_palette(description: &str) -> ColorPalette {
    ColorPalette::for_mood(detect_mood(description))
}

const LIGHTING_RULES: &[(&[&str], LightingStyle)] = &[
    (&["neon", "club", "city lights", "arcade"], LightingStyle::Neon),
    (&["silhouette", "backlit"], LightingStyle::Silhouette),
    (
        &["sunset", "sunrise", "dawn", "dusk", "golden"],
        LightingStyle::GoldenHour,
    ),
    (
        &["candle", "fireplace", "lamp", "torch", "lantern"],
        LightingStyle::Practical,
    ),
    (&["night", "dark", "shadow", "noir"], LightingStyle::LowKey),
    (
        &["bright", "happy", "white", "clean", "clinic"],
        LightingStyle::HighKey,
    ),
];

pub fn generate_lighting_setup(description: &str) -> LightingSetup {
    let lower = description.to_lowercase();
    let style = first_match(&Keywords::new(&lower), LIGHTING_RULES).unwrap_or_default();
    LightingSetup::for_style(style)
}

const ROLE_WORDS: &[&str] = &[
    "man", "woman", "boy", "girl", "child", "detective", "officer", "doctor", "nurse", "soldier",
    "teacher", "mother", "father", "stranger", "narrator", "king", "queen", "driver",
    "scientist", "farmer", "guard",
];

const GROUP_WORDS: &[(&str, usize)] = &[
    ("two", 2),
    ("couple", 2),
    ("pair", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("multiple", 3),
    ("several", 3),
    ("group", 4),
    ("crowd", MAX_CHARACTERS),
];

/// Character names found in a description: role words in order of first
/// appearance, padded with numbered placeholders up to the largest head
/// count any group word implies.
pub fn extract_characters(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    let words = Keywords::new(&lower);

    let mut roles: Vec<(usize, &str)> = ROLE_WORDS
        .iter()
        .filter_map(|role| {
            words
                .tokens
                .iter()
                .position(|token| *token == *role || token.strip_prefix(*role) == Some("s"))
                .map(|index| (index, *role))
        })
        .collect();
    roles.sort_by_key(|(index, _)| *index);

    let mut names: Vec<String> = roles.into_iter().map(|(_, role)| capitalize(role)).collect();
    let wanted = GROUP_WORDS
        .iter()
        .filter(|(word, _)| words.position(word).is_some())
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0);
    while names.len() < wanted.min(MAX_CHARACTERS) {
        names.push(format!("Person {}", names.len() + 1));
    }
    names.truncate(MAX_CHARACTERS);
    names
}

/// Spreads `names` across the canvas on one row. Characters left of centre
/// face right and vice versa; a lone or middle character faces the camera.
pub fn layout_characters(names: &[String], canvas: Canvas) -> Vec<CharacterPosition> {
    let count = names.len();
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let x = match count {
                1 => canvas.width / 2.0,
                2 if index == 0 => canvas.width * 0.3,
                2 => canvas.width * 0.7,
                _ => canvas.width * (index + 1) as f64 / (count + 1) as f64,
            };
            let facing = if 2 * index + 1 == count {
                Facing::Front
            } else if 2 * index < count {
                Facing::Right
            } else {
                Facing::Left
            };
            CharacterPosition {
                name: name.clone(),
                x,
                y: canvas.height * CHARACTER_ROW,
                scale: 1.0,
                facing,
            }
        })
        .collect()
}

pub fn generate_character_positions(description: &str, canvas: Canvas) -> Vec<CharacterPosition> {
    layout_characters(&extract_characters(description), canvas)
}

const PROPS: &[(&str, &str)] = &[
    ("phone", "phone"),
    ("letter", "letter"),
    ("car", "car"),
    ("gun", "gun"),
    ("knife", "knife"),
    ("book", "book"),
    ("coffee", "coffee cup"),
    ("cup", "cup"),
    ("table", "table"),
    ("chair", "chair"),
    ("door", "door"),
    ("window", "window"),
    ("candle", "candle"),
    ("camera", "camera"),
    ("map", "map"),
    ("bag", "bag"),
    ("laptop", "laptop"),
    ("computer", "computer"),
    ("photo", "photograph"),
    ("key", "keys"),
    ("umbrella", "umbrella"),
    ("bottle", "bottle"),
    ("clock", "clock"),
    ("suitcase", "suitcase"),
];

/// Props named in the description, deduplicated, in table order.
pub fn generate_props(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    let words = Keywords::new(&lower);
    let mut props: Vec<String> = Vec::new();
    for (key, prop) in PROPS {
        if words.matches(key) && !props.iter().any(|existing| existing == prop) {
            props.push((*prop).to_string());
        }
    }
    props
}

const TRANSITION_RULES: &[(&[&str], TransitionKind)] = &[
    (
        &["suddenly", "shock", "bang", "explosion", "scream"],
        TransitionKind::SmashCut,
    ),
    (
        &["later", "time passes", "years", "memory", "remembers", "dream"],
        TransitionKind::Dissolve,
    ),
    (&["similar", "mirror", "echo", "same"], TransitionKind::MatchCut),
    (&["end", "finally", "death", "farewell"], TransitionKind::FadeOut),
    (&["begin", "opens", "first", "dawn"], TransitionKind::FadeIn),
    (&["elsewhere", "meanwhile"], TransitionKind::Wipe),
];

pub fn suggest_transition(description: &str) -> TransitionKind {
    let lower = description.to_lowercase();
    first_match(&Keywords::new(&lower), TRANSITION_RULES).unwrap_or_default()
}

const VOICEOVER_TRIGGERS: &[&str] = &[
    "narrator", "narrates", "voiceover", "voice-over", "remembers", "memory", "thinks",
    "reflects", "recalls", "years ago",
];

fn voice_tone(mood: Mood) -> &'static str {
    match mood {
        Mood::Tense => "urgent",
        Mood::Mysterious => "hushed",
        Mood::Melancholic => "somber",
        Mood::Romantic => "warm",
        Mood::Cheerful => "upbeat",
        Mood::Dramatic => "intense",
        Mood::Neutral => "neutral",
    }
}

/// Narrator cue reading the first sentence, when the description asks for
/// narration or reflection.
pub fn generate_voiceover_cue(description: &str) -> Option<VoiceoverCue> {
    let lower = description.to_lowercase();
    if !Keywords::new(&lower).any(VOICEOVER_TRIGGERS) {
        return None;
    }
    let sentence = split_sentences(description).into_iter().next()?;
    Some(VoiceoverCue {
        speaker: NARRATOR.to_string(),
        text: format!("{sentence}."),
        tone: Some(voice_tone(detect_mood(description)).to_string()),
    })
}

/// Sound design suggested by a description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudioCues {
    pub sound_effects: Vec<String>,
    pub music: Option<String>,
    pub ambience: Option<String>,
}

impl AudioCues {
    pub fn is_empty(&self) -> bool {
        self.sound_effects.is_empty() && self.music.is_none() && self.ambience.is_none()
    }
}

const SOUND_EFFECTS: &[(&str, &str)] = &[
    ("door", "Door creaks"),
    ("footstep", "Footsteps"),
    ("walk", "Footsteps"),
    ("running", "Running footsteps"),
    ("thunder", "Thunder rumbles"),
    ("storm", "Wind howls"),
    ("rain", "Rain patters"),
    ("car", "Engine revs"),
    ("phone", "Phone rings"),
    ("gun", "Gunshot"),
    ("explosion", "Explosion"),
    ("fire", "Fire crackles"),
    ("glass", "Glass shatters"),
    ("bird", "Birdsong"),
    ("wave", "Waves crash"),
    ("knock", "Knocking"),
    ("clock", "Clock ticks"),
    ("dog", "Dog barks"),
];

const AMBIENCE: &[(&[&str], &str)] = &[
    (&["city", "street", "traffic"], "City traffic"),
    (&["forest", "woods", "jungle"], "Forest ambience"),
    (&["ocean", "beach", "sea", "harbor"], "Ocean surf"),
    (&["office"], "Office room tone"),
    (&["crowd", "market", "stadium"], "Crowd walla"),
    (&["night"], "Night crickets"),
    (&["rain"], "Steady rain"),
];

fn mood_music(mood: Mood) -> Option<&'static str> {
    match mood {
        Mood::Tense => Some("Pulsing suspense score"),
        Mood::Mysterious => Some("Sparse ambient drones"),
        Mood::Melancholic => Some("Solo piano, slow tempo"),
        Mood::Romantic => Some("Soft strings"),
        Mood::Cheerful => Some("Upbeat acoustic guitar"),
        Mood::Dramatic => Some("Full orchestral swell"),
        Mood::Neutral => None,
    }
}

pub fn generate_audio_cues(description: &str) -> AudioCues {
    let lower = description.to_lowercase();
    let words = Keywords::new(&lower);

    let mut sound_effects: Vec<String> = Vec::new();
    for (key, effect) in SOUND_EFFECTS {
        if words.matches(key) && !sound_effects.iter().any(|existing| existing == effect) {
            sound_effects.push((*effect).to_string());
        }
    }
    let ambience = AMBIENCE
        .iter()
        .find(|(keys, _)| words.any(keys))
        .map(|(_, ambience)| (*ambience).to_string());
    let music = mood_music(detect_mood(description)).map(str::to_string);

    AudioCues {
        sound_effects,
        music,
        ambience,
    }
}

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“]([^"”]+)["”]"#).expect("valid regex"));

fn frame_title(text: &str, order: u32) -> String {
    let title = split_sentences(text)
        .into_iter()
        .next()
        .map(|sentence| {
            sentence
                .split_whitespace()
                .take(TITLE_WORDS)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    if title.is_empty() {
        format!("Scene {}", u64::from(order) + 1)
    } else {
        title
    }
}

/// Reading time at 2.5 words per second, clamped and rounded to half
/// seconds.
fn frame_duration(text: &str) -> f64 {
    let seconds = text.split_whitespace().count() as f64 / 2.5;
    (seconds.clamp(MIN_FRAME_SECONDS, MAX_FRAME_SECONDS) * 2.0).round() / 2.0
}

/// Builds one frame from prose on the default canvas.
pub fn generate_frame_from_text(text: &str, order: u32) -> StoryboardFrame {
    generate_frame_with_canvas(text, order, Canvas::default())
}

pub fn generate_frame_with_canvas(text: &str, order: u32, canvas: Canvas) -> StoryboardFrame {
    let description = text.trim();
    let analysis = analyze_text_description(description);
    let shots = generate_shot_sequence(description);
    let names = extract_characters(description);
    let audio = generate_audio_cues(description);

    let dialogue = QUOTED
        .captures_iter(description)
        .enumerate()
        .map(|(index, caps)| DialogueLine {
            character: match names.as_slice() {
                [] => "Speaker".to_string(),
                list => list[index % list.len()].clone(),
            },
            text: caps[1].trim().to_string(),
            parenthetical: None,
        })
        .collect();

    let visuals = FrameVisuals {
        color_palette: Some(generate_color_palette(description)),
        lighting: Some(generate_lighting_setup(description)),
        characters: layout_characters(&names, canvas),
        props: generate_props(description),
        transition: suggest_transition(description),
    };

    debug!(order, shots = shots.len(), characters = names.len(), "generated frame");

    StoryboardFrame {
        id: format!("frame-{}", u64::from(order) + 1),
        title: frame_title(description, order),
        description: description.to_string(),
        shot_type: shots.first().copied(),
        camera_angle: Some(suggest_camera_angle(description)),
        camera_movement: Some(suggest_camera_movement(description)),
        duration: frame_duration(description),
        voiceover: generate_voiceover_cue(description).into_iter().collect(),
        dialogue,
        sound_effects: audio.sound_effects,
        music: audio.music,
        notes: analysis.warnings.join("; "),
        order,
        visuals: Some(visuals),
    }
}

/// Splits prose into paragraphs on blank lines and builds one frame per
/// paragraph.
pub fn generate_storyboard_from_text(text: &str) -> Vec<StoryboardFrame> {
    generate_storyboard_with_canvas(text, Canvas::default())
}

pub fn generate_storyboard_with_canvas(text: &str, canvas: Canvas) -> Vec<StoryboardFrame> {
    paragraphs(text)
        .iter()
        .zip(0u32..)
        .map(|(paragraph, order)| generate_frame_with_canvas(paragraph, order, canvas))
        .collect()
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

#[cfg(test)]
#[path = "tests/frame_generator_tests.rs"]
mod tests;
