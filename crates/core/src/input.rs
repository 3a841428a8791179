//! Reading storyboard and transcription JSON from outside the process.
//!
//! A storyboard document is either a bare array of frames or an object with
//! a `frames` array and an optional `input_schema_version`. A transcription
//! document is a project object that may carry the same version field.

use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::Deserialize;
use tracing::debug;

use crate::error::{json_deserialize_error, ScriptError, ScriptResult};
use crate::limits::InputLimits;
use crate::script::Script;
use crate::storyboard::StoryboardFrame;
use crate::transcription::TranscriptionProject;
use crate::version::INPUT_SCHEMA_VERSION;

#[derive(Deserialize)]
#[serde(untagged)]
enum StoryboardDocument {
    Frames(Vec<StoryboardFrame>),
    Envelope {
        #[serde(default)]
        input_schema_version: Option<String>,
        frames: Vec<StoryboardFrame>,
    },
}

#[derive(Deserialize)]
struct TranscriptionDocument {
    #[serde(default)]
    input_schema_version: Option<String>,
    #[serde(flatten)]
    project: TranscriptionProject,
}

fn check_version(version: Option<&str>) -> ScriptResult<()> {
    match version {
        Some(found) if found != INPUT_SCHEMA_VERSION => Err(ScriptError::InvalidInput(format!(
            "schema incompatible: found {found}, expected {INPUT_SCHEMA_VERSION}"
        ))),
        _ => Ok(()),
    }
}

pub fn storyboard_from_json(input: &str) -> ScriptResult<Vec<StoryboardFrame>> {
    storyboard_from_json_with_limits(input, InputLimits::default())
}

pub fn storyboard_from_json_with_limits(
    input: &str,
    limits: InputLimits,
) -> ScriptResult<Vec<StoryboardFrame>> {
    limits.check_input_size(input)?;
    let document: StoryboardDocument =
        serde_json::from_str(input).map_err(|err| json_deserialize_error(input, &err))?;
    let frames = match document {
        StoryboardDocument::Frames(frames) => frames,
        StoryboardDocument::Envelope {
            input_schema_version,
            frames,
        } => {
            check_version(input_schema_version.as_deref())?;
            frames
        }
    };
    limits.validate_frames(&frames)?;
    debug!(frames = frames.len(), "parsed storyboard");
    Ok(frames)
}

pub fn transcription_from_json(input: &str) -> ScriptResult<TranscriptionProject> {
    transcription_from_json_with_limits(input, InputLimits::default())
}

pub fn transcription_from_json_with_limits(
    input: &str,
    limits: InputLimits,
) -> ScriptResult<TranscriptionProject> {
    limits.check_input_size(input)?;
    let document: TranscriptionDocument =
        serde_json::from_str(input).map_err(|err| json_deserialize_error(input, &err))?;
    check_version(document.input_schema_version.as_deref())?;
    limits.validate_transcription(&document.project)?;
    debug!(
        segments = document.project.segments.len(),
        "parsed transcription"
    );
    Ok(document.project)
}

/// JSON Schema of a storyboard document (array form).
pub fn storyboard_schema() -> RootSchema {
    schema_for!(Vec<StoryboardFrame>)
}

pub fn transcription_schema() -> RootSchema {
    schema_for!(TranscriptionProject)
}

pub fn script_schema() -> RootSchema {
    schema_for!(Script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_and_envelope_both_parse() {
        let bare = storyboard_from_json(r#"[{"title": "Open"}, {"title": "Close"}]"#).unwrap();
        assert_eq!(bare.len(), 2);

        let wrapped = storyboard_from_json(
            r#"{"input_schema_version": "1.0", "frames": [{"title": "Open"}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped[0].title, "Open");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = storyboard_from_json(r#"{"input_schema_version": "9.0", "frames": []}"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidInput(_)));

        let err = transcription_from_json(r#"{"input_schema_version": "2.0", "segments": []}"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidInput(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = transcription_from_json("{\n  \"segments\": [,]\n}").unwrap_err();
        assert!(matches!(err, ScriptError::Serialization { .. }));
    }

    #[test]
    fn limits_apply_before_parsing() {
        let limits = InputLimits {
            max_input_bytes: 2,
            ..InputLimits::default()
        };
        let err = storyboard_from_json_with_limits("[{}]", limits).unwrap_err();
        assert!(matches!(err, ScriptError::ResourceLimit(_)));

        let limits = InputLimits {
            max_frames: 1,
            ..InputLimits::default()
        };
        let err = storyboard_from_json_with_limits("[{}, {}]", limits).unwrap_err();
        assert!(matches!(err, ScriptError::ResourceLimit(_)));
    }

    #[test]
    fn transcription_defaults_confidence() {
        let project = transcription_from_json(
            r#"{"title": "Interview", "segments": [{"startTime": 0, "endTime": 2.5, "text": "Hello"}]}"#,
        )
        .unwrap();
        assert_eq!(project.segments[0].confidence, 1.0);
        assert_eq!(project.segments[0].speaker_name(), "UNKNOWN");
    }

    #[test]
    fn schemas_name_the_root_types() {
        let script = serde_json::to_value(script_schema()).unwrap();
        assert_eq!(script["title"], "Script");
        let storyboard = serde_json::to_value(storyboard_schema()).unwrap();
        assert_eq!(storyboard["type"], "array");
    }
}
