use super::*;
use crate::element::ElementTiming;
use uuid::Uuid;

fn id(n: u128) -> ElementId {
    ElementId::from(Uuid::from_u128(n))
}

fn sample() -> Script {
    let mut script = Script::new(id(0), "Sample");
    script.push(ScriptElement::new(id(1), ElementType::SceneHeading, "INT. LAB - DAY", 0));
    script.push(ScriptElement::new(id(2), ElementType::Character, "ANA", 0));
    script.push(ScriptElement::new(id(3), ElementType::Dialogue, "We are close now", 0));
    script.push(ScriptElement::new(id(4), ElementType::Character, "BEN", 0));
    script.push(ScriptElement::new(id(5), ElementType::Dialogue, "Not close enough", 0));
    script.push(ScriptElement::new(id(6), ElementType::Character, "ANA", 0));
    script
}

fn orders(script: &Script) -> Vec<u32> {
    script.elements.iter().map(|element| element.order).collect()
}

#[test]
fn test_push_assigns_sequential_orders() {
    let script = sample();
    assert_eq!(orders(&script), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(script.len(), 6);
    assert!(!script.is_empty());
}

#[test]
fn test_insert_remove_and_move_renumber() {
    let mut script = sample();

    script
        .insert(0, ScriptElement::new(id(9), ElementType::Title, "THE LAB", 99))
        .unwrap();
    assert_eq!(script.elements[0].content, "THE LAB");
    assert_eq!(orders(&script), (0..7).collect::<Vec<u32>>());

    let removed = script.remove(1).unwrap();
    assert_eq!(removed.element_type, ElementType::SceneHeading);
    assert_eq!(orders(&script), (0..6).collect::<Vec<u32>>());

    script.move_element(0, 5).unwrap();
    assert_eq!(script.elements[5].content, "THE LAB");
    assert_eq!(orders(&script), (0..6).collect::<Vec<u32>>());
}

#[test]
fn test_out_of_range_edits_fail() {
    let mut script = sample();
    assert!(matches!(
        script.remove(6),
        Err(ScriptError::IndexOutOfRange { index: 6, len: 6 })
    ));
    assert!(script.move_element(0, 6).is_err());
    assert!(script
        .insert(7, ScriptElement::new(id(9), ElementType::Action, "x", 0))
        .is_err());
    assert!(script
        .insert(6, ScriptElement::new(id(9), ElementType::Action, "x", 0))
        .is_ok());
}

#[test]
fn test_characters_are_deduplicated_in_first_seen_order() {
    let mut script = sample();
    script.refresh_characters();
    assert_eq!(script.metadata.characters, vec!["ANA", "BEN"]);
    assert_eq!(script.elements_of(ElementType::Character).count(), 3);
}

#[test]
fn test_stats_count_words_by_kind() {
    let stats = sample().stats();
    assert_eq!(stats.element_count, 6);
    assert_eq!(stats.counts[&ElementType::Character], 3);
    assert_eq!(stats.counts[&ElementType::Dialogue], 2);
    // 4 heading words, 3 names, 7 spoken words.
    assert_eq!(stats.word_count, 14);
    assert_eq!(stats.dialogue_word_count, 7);
    assert!((stats.dialogue_ratio - 0.5).abs() < 1e-9);
    assert!((stats.estimated_reading_time - 14.0 / 2.5).abs() < 1e-9);
}

#[test]
fn test_empty_script_stats() {
    let stats = Script::new(id(0), "Empty").stats();
    assert_eq!(stats.word_count, 0);
    assert_eq!(stats.dialogue_ratio, 0.0);
}

#[test]
fn test_digest_ignores_ids_and_timing() {
    let a = sample();
    let mut b = sample();
    for element in &mut b.elements {
        element.id = id(u128::from(element.order) + 100);
        element.timing = Some(ElementTiming::span(0.0, 1.0));
    }
    assert_eq!(a.content_digest(), b.content_digest());
    assert_eq!(a.content_digest().len(), 64);

    b.elements[2].content.push('!');
    assert_ne!(a.content_digest(), b.content_digest());
}

#[test]
fn test_digest_separates_type_from_content() {
    let mut a = Script::new(id(0), "A");
    a.push(ScriptElement::new(id(1), ElementType::Action, "ab", 0));
    let mut b = Script::new(id(0), "A");
    b.push(ScriptElement::new(id(1), ElementType::Dialogue, "ab", 0));
    assert_ne!(a.content_digest(), b.content_digest());
}

#[test]
fn test_json_roundtrip_carries_schema_version() {
    let mut script = sample();
    script.refresh_characters();
    let json = script.to_json().unwrap();
    assert!(json.contains("\"script_schema_version\": \"1.0\""));
    assert!(json.contains("\"type\": \"scene-heading\""));
    assert_eq!(Script::from_json(&json).unwrap(), script);
}

#[test]
fn test_json_without_version_is_accepted() {
    let json = r#"{
        "id": "00000000-0000-0000-0000-000000000000",
        "title": "Bare",
        "elements": [],
        "metadata": {"estimatedRuntime": 0.0, "characters": []}
    }"#;
    let script = Script::from_json(json).unwrap();
    assert_eq!(script.title, "Bare");
    assert_eq!(script.metadata.source, ScriptSource::Manual);
}

#[test]
fn test_schema_mismatch_rejected() {
    let json = r#"{
        "script_schema_version": "0.9",
        "id": "00000000-0000-0000-0000-000000000000",
        "title": "Old",
        "elements": [],
        "metadata": {"estimatedRuntime": 0.0, "characters": []}
    }"#;
    let err = Script::from_json(json).unwrap_err();
    assert!(matches!(err, ScriptError::InvalidInput(_)));
}

#[test]
fn test_malformed_json_points_at_source() {
    let err = Script::from_json("{\n  \"title\": \n}").unwrap_err();
    match err {
        ScriptError::Serialization { src, .. } => assert!(src.contains("title")),
        other => panic!("unexpected error: {other:?}"),
    }
}
