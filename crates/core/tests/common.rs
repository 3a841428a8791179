#![allow(dead_code)]

use scriptcraft::{
    storyboard_from_json, transcription_from_json, FirstChoice, Script, ScriptComposer,
    StoryboardFrame, TranscriptionProject,
};

/// Three-frame harbor storyboard in the external JSON shape.
pub const HARBOR_STORYBOARD: &str = r#"
{
    "input_schema_version": "1.0",
    "frames": [
        {
            "id": "f1",
            "title": "Harbor at dawn",
            "description": "Fog rolls over the harbor.",
            "shotType": "establishing",
            "duration": 5.0,
            "voiceover": [{"speaker": "Narrator", "text": "Every morning begins here."}],
            "music": "Low strings",
            "order": 0
        },
        {
            "id": "f2",
            "description": "Two fishermen argue on the dock.",
            "shotType": "two-shot",
            "cameraAngle": "eye-level",
            "duration": 4.0,
            "dialogue": [
                {"character": "Marco", "text": "We leave now.", "parenthetical": "firmly"},
                {"character": "Luca", "text": "Not in this fog."}
            ],
            "soundEffects": ["Gulls", "Creaking rope"],
            "notes": "Check tide tables",
            "order": 1
        },
        {
            "id": "f3",
            "title": "Open sea",
            "description": "The boat disappears into the mist.",
            "duration": 6.0,
            "order": 2
        }
    ]
}
"#;

pub const INTERVIEW: &str = r#"
{
    "id": "t1",
    "title": "Harbor interview",
    "language": "en",
    "segments": [
        {"id": "s1", "startTime": 0.0, "endTime": 3.2, "text": "I started fishing at twelve.", "speaker": "Marco", "confidence": 0.95},
        {"id": "s2", "startTime": 3.2, "endTime": 5.0, "text": "What changed since then?", "speaker": "Host", "confidence": 0.9},
        {"id": "s3", "startTime": 5.0, "endTime": 9.5, "text": "The fish moved north.", "speaker": "Marco", "confidence": 0.6}
    ]
}
"#;

pub fn harbor_frames() -> Vec<StoryboardFrame> {
    storyboard_from_json(HARBOR_STORYBOARD).expect("parse storyboard fixture")
}

pub fn interview() -> TranscriptionProject {
    transcription_from_json(INTERVIEW).expect("parse transcription fixture")
}

pub fn composer() -> ScriptComposer<FirstChoice> {
    ScriptComposer::with_random(FirstChoice::default())
}

/// One line per element: order, type tag and content with newlines shown
/// as ` / `.
pub fn render_outline(script: &Script) -> String {
    script
        .elements
        .iter()
        .map(|element| {
            format!(
                "{} {} | {}",
                element.order,
                element.element_type,
                element.content.replace('\n', " / ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
