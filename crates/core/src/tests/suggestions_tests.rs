use super::*;
use crate::element::ElementId;
use uuid::Uuid;

fn element(element_type: ElementType, content: &str) -> ScriptElement {
    ScriptElement::new(ElementId::from(Uuid::nil()), element_type, content, 0)
}

fn of_type(suggestions: &[AutoSuggestion], kind: SuggestionType) -> Vec<&AutoSuggestion> {
    suggestions
        .iter()
        .filter(|s| s.suggestion_type == kind)
        .collect()
}

#[test]
fn test_very_adjective_becomes_stronger_word() {
    let suggestions =
        generate_auto_suggestions(&element(ElementType::Dialogue, "She is very happy"), "scene 1");
    assert_eq!(suggestions.len(), 1);
    let suggestion = &suggestions[0];
    assert_eq!(suggestion.suggestion_type, SuggestionType::WordChoice);
    assert_eq!(suggestion.text, "She is delighted");
    assert_eq!(suggestion.confidence, WORD_CHOICE_CONFIDENCE);
    assert_eq!(suggestion.context, "scene 1");
}

#[test]
fn test_unknown_intensified_word_drops_very() {
    let suggestions =
        generate_auto_suggestions(&element(ElementType::Dialogue, "It is very purple"), "");
    assert_eq!(suggestions[0].text, "It is purple");
}

#[test]
fn test_passive_voice_rewrite_is_naive() {
    let suggestions = generate_auto_suggestions(
        &element(ElementType::Dialogue, "The door was opened by the guard"),
        "",
    );
    let passive = of_type(&suggestions, SuggestionType::PassiveVoice);
    assert_eq!(passive.len(), 1);
    assert_eq!(passive[0].text, "The door was opened the guard");
    assert_eq!(passive[0].confidence, PASSIVE_VOICE_CONFIDENCE);
}

#[test]
fn test_repetitions_cycle_synonyms_after_first() {
    let suggestions = generate_auto_suggestions(
        &element(ElementType::Dialogue, "She looks left, looks right, looks back."),
        "",
    );
    let repetition = of_type(&suggestions, SuggestionType::Repetition);
    assert_eq!(repetition.len(), 1);
    assert_eq!(repetition[0].text, "She looks left, glances right, gazes back.");
    assert_eq!(repetition[0].confidence, REPETITION_CONFIDENCE);
}

#[test]
fn test_repetition_without_synonyms_still_fires() {
    let suggestions =
        generate_auto_suggestions(&element(ElementType::Dialogue, "Rain, rain, rain."), "");
    let repetition = of_type(&suggestions, SuggestionType::Repetition);
    assert_eq!(repetition.len(), 1);
    assert_eq!(repetition[0].text, "Rain, rain, rain.");
}

#[test]
fn test_short_words_and_pairs_are_not_repetitions() {
    let suggestions = generate_auto_suggestions(
        &element(ElementType::Dialogue, "the the the cat; walks and walks"),
        "",
    );
    assert!(of_type(&suggestions, SuggestionType::Repetition).is_empty());
}

#[test]
fn test_character_names_are_upper_cased() {
    let suggestions = generate_auto_suggestions(&element(ElementType::Character, "Ana"), "");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].suggestion_type, SuggestionType::Formatting);
    assert_eq!(suggestions[0].text, "ANA");
    assert_eq!(suggestions[0].confidence, FORMATTING_CONFIDENCE);

    assert!(generate_auto_suggestions(&element(ElementType::Character, "ANA"), "").is_empty());
    // Only character elements are checked.
    assert!(generate_auto_suggestions(&element(ElementType::Dialogue, "Ana"), "").is_empty());
}

#[test]
fn test_short_action_gets_expansion() {
    let suggestions = generate_auto_suggestions(&element(ElementType::Action, "Silence"), "");
    let expansion = of_type(&suggestions, SuggestionType::Expansion);
    assert_eq!(expansion.len(), 1);
    assert_eq!(expansion[0].text, "A heavy silence settles over the room.");
    assert_eq!(expansion[0].confidence, EXPANSION_CONFIDENCE);
}

#[test]
fn test_unmatched_short_action_passes_through() {
    let suggestions = generate_auto_suggestions(&element(ElementType::Action, "Nothing"), "");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].text, "Nothing");

    let long = generate_auto_suggestions(
        &element(ElementType::Action, "He walks to the door slowly"),
        "",
    );
    assert!(of_type(&long, SuggestionType::Expansion).is_empty());
}

#[test]
fn test_expansion_length_ignores_surrounding_whitespace() {
    let padded = generate_auto_suggestions(&element(ElementType::Action, "   Silence    "), "");
    let expansion = of_type(&padded, SuggestionType::Expansion);
    assert_eq!(expansion.len(), 1);
    assert_eq!(expansion[0].text, "A heavy silence settles over the room.");

    // Ten characters is not short.
    let exact = generate_auto_suggestions(&element(ElementType::Action, "Door opens"), "");
    assert!(of_type(&exact, SuggestionType::Expansion).is_empty());
}

#[test]
fn test_independent_rules_all_fire() {
    let suggestions = generate_auto_suggestions(&element(ElementType::Action, "very sad"), "beat");
    let kinds: Vec<SuggestionType> = suggestions.iter().map(|s| s.suggestion_type).collect();
    assert_eq!(kinds, vec![SuggestionType::WordChoice, SuggestionType::Expansion]);
    assert_eq!(suggestions[0].text, "miserable");
    assert_eq!(suggestions[1].text, "very sad");
    assert!(suggestions.iter().all(|s| s.context == "beat"));
}

#[test]
fn test_clean_line_has_no_suggestions() {
    let suggestions = generate_auto_suggestions(
        &element(ElementType::Dialogue, "We leave at dawn, together."),
        "",
    );
    assert!(suggestions.is_empty());
}
