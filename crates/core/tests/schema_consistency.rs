use std::env;
use std::fs;
use std::path::PathBuf;

use schemars::schema::RootSchema;
use scriptcraft::{script_schema, storyboard_schema, transcription_schema};
use serde_json::Value;

fn verify_schema(name: &str, schema: RootSchema) {
    let schema_json = serde_json::to_string_pretty(&schema).unwrap();

    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("schemas");
    path.push(format!("{name}.schema.json"));

    if env::var("UPDATE_SCHEMA").is_ok() {
        fs::create_dir_all(path.parent().expect("schema dir")).expect("failed to create dir");
        fs::write(&path, schema_json).expect("failed to write schema");
        return;
    }

    let existing_json = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "Missing schema snapshot {}. Run with UPDATE_SCHEMA=1 to create it.",
            path.display()
        )
    });

    // Key order and whitespace are not part of the contract.
    let actual: Value = serde_json::to_value(&schema).unwrap();
    let expected: Value = serde_json::from_str(&existing_json).expect("snapshot is valid JSON");

    if actual != expected {
        panic!(
            "Schema mismatch for {name}. Run with UPDATE_SCHEMA=1 to update.\nExpected:\n{existing_json}\nActual:\n{schema_json}"
        );
    }
}

#[test]
fn test_storyboard_schema_snapshot() {
    verify_schema("storyboard", storyboard_schema());
}

#[test]
fn test_transcription_schema_snapshot() {
    verify_schema("transcription", transcription_schema());
}

#[test]
fn test_script_schema_snapshot() {
    verify_schema("script", script_schema());
}

#[test]
fn test_schema_lists_every_element_type() {
    let schema = serde_json::to_string(&script_schema()).unwrap();
    for tag in ["scene-heading", "sound-effect", "voiceover", "montage"] {
        assert!(schema.contains(tag), "missing {tag}");
    }
}

#[test]
fn test_snapshots_are_checked_in() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas");
    for name in ["storyboard", "transcription", "script"] {
        assert!(
            dir.join(format!("{name}.schema.json")).is_file(),
            "{name} schema snapshot is not checked in"
        );
    }
}
