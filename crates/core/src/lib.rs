mod analyzer;
mod assistant;
mod composer;
mod config;
mod element;
mod emotion;
mod error;
mod frame_generator;
mod input;
mod limits;
mod narration;
mod random;
mod script;
mod storyboard;
mod suggestions;
mod transcription;
mod variation;
mod version;
mod visual;

pub use analyzer::{analyze_text_description, AiAnalysis};
pub use assistant::ScriptAssistant;
pub use composer::{
    voiceover_content, ScriptComposer, DEFAULT_LOW_CONFIDENCE_THRESHOLD, LOW_CONFIDENCE_NOTE,
};
pub use config::{
    AbTestConfig, AssistantConfig, CanvasConfig, LatencyConfig, NarrationConfig,
    TranscriptionConfig,
};
pub use element::{
    reading_duration, Alignment, ElementFormatting, ElementId, ElementTiming, ElementType,
    ScriptElement, READING_WORDS_PER_SECOND,
};
pub use emotion::{
    analyze_emotion, analyze_emotional_arc, ArcShape, EmotionPoint, EmotionScores, EmotionType,
    EmotionalArc,
};
pub use error::{ScriptError, ScriptResult};
pub use frame_generator::{
    detect_mood, extract_characters, generate_audio_cues, generate_character_positions,
    generate_color_palette, generate_frame_from_text, generate_frame_with_canvas,
    generate_lighting_setup, generate_props, generate_shot_sequence,
    generate_storyboard_from_text, generate_storyboard_with_canvas, generate_voiceover_cue,
    layout_characters, suggest_camera_angle, suggest_camera_movement, suggest_transition,
    AudioCues,
};
pub use input::{
    script_schema, storyboard_from_json, storyboard_from_json_with_limits, storyboard_schema,
    transcription_from_json, transcription_from_json_with_limits, transcription_schema,
};
pub use limits::InputLimits;
pub use narration::{compose_narration, split_sentences, NarrationStyle, NarrationTemplates};
pub use random::{FirstChoice, RandomSource, StdRandom};
pub use script::{Script, ScriptMetadata, ScriptSource, ScriptStats};
pub use storyboard::{
    CameraAngle, CameraMovement, DialogueLine, ShotType, StoryboardFrame, TransitionKind,
    VoiceoverCue,
};
pub use suggestions::{generate_auto_suggestions, AutoSuggestion, SuggestionType};
pub use transcription::{TranscriptSegment, TranscriptionProject, UNKNOWN_SPEAKER};
pub use variation::{generate_variation, AbTestVersion, VariantKind, VersionMetrics};
pub use version::{INPUT_SCHEMA_VERSION, SCRIPT_SCHEMA_VERSION};
pub use visual::{
    Canvas, CharacterPosition, ColorPalette, Facing, FrameVisuals, LightingSetup, LightingStyle,
    Mood,
};
