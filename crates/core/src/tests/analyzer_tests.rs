use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_empty_description_uses_base_scores() {
    let analysis = analyze_text_description("");
    assert!(approx(analysis.scene_complexity, 0.3));
    assert!(approx(analysis.visual_interest, 0.4));
    assert!(approx(analysis.narrative_pacing, 0.5));
    assert!(approx(analysis.technical_feasibility, 1.0));
    assert_eq!(
        analysis.suggestions,
        vec![
            VISUAL_DETAIL_SUGGESTION.to_string(),
            TEMPORAL_CUES_SUGGESTION.to_string()
        ]
    );
    assert!(analysis.warnings.is_empty());
}

#[test]
fn test_night_chase_example() {
    let analysis =
        analyze_text_description("A dramatic night chase scene with multiple characters");
    assert!(approx(analysis.scene_complexity, 0.5));
    assert!(approx(analysis.visual_interest, 0.55));
    assert!(approx(analysis.technical_feasibility, 0.8));
    assert!(analysis.warnings.contains(&NIGHT_WARNING.to_string()));
    assert!(!analysis.warnings.contains(&TECHNICAL_CHALLENGE_WARNING.to_string()));
}

#[test]
fn test_complexity_counts_substrings() {
    // "actions" contains "action"; "complexity" contains "complex".
    let analysis = analyze_text_description("complexity of actions in a detailed crowd");
    assert!(approx(analysis.scene_complexity, 1.0));
    assert!(analysis
        .suggestions
        .contains(&SPLIT_SHOTS_SUGGESTION.to_string()));
    assert!(analysis
        .suggestions
        .contains(&SETUP_TIME_SUGGESTION.to_string()));
}

#[test]
fn test_visual_keywords_need_whole_tokens() {
    let punctuated = analyze_text_description("light, shadow.");
    assert!(approx(punctuated.visual_interest, 0.4));

    let spaced = analyze_text_description("light and shadow and color");
    assert!(approx(spaced.visual_interest, 0.85));
    assert!(!spaced
        .suggestions
        .contains(&VISUAL_DETAIL_SUGGESTION.to_string()));
}

#[test]
fn test_fast_pacing_and_temporal_cues_are_exclusive() {
    let fast = analyze_text_description("suddenly then quickly meanwhile it ends");
    assert!(approx(fast.narrative_pacing, 0.9));
    assert!(fast.suggestions.contains(&FAST_PACING_SUGGESTION.to_string()));
    assert!(!fast.suggestions.contains(&TEMPORAL_CUES_SUGGESTION.to_string()));

    let one_cue = analyze_text_description("then it ends");
    assert!(approx(one_cue.narrative_pacing, 0.6));
    assert!(!one_cue.suggestions.contains(&FAST_PACING_SUGGESTION.to_string()));
    assert!(!one_cue.suggestions.contains(&TEMPORAL_CUES_SUGGESTION.to_string()));
}

#[test]
fn test_feasibility_floor_and_warnings() {
    let analysis = analyze_text_description(
        "explosion fire underwater crowd night flying over the harbor",
    );
    assert!(approx(analysis.technical_feasibility, 0.3));
    assert_eq!(
        analysis.warnings,
        vec![
            TECHNICAL_CHALLENGE_WARNING.to_string(),
            NIGHT_WARNING.to_string(),
            CROWD_WARNING.to_string(),
            UNDERWATER_WARNING.to_string(),
            PYROTECHNICS_WARNING.to_string(),
        ]
    );
}

#[test]
fn test_substring_warnings_fire_without_token_match() {
    let analysis = analyze_text_description("Nightfall over the crowded campfire.");
    assert!(approx(analysis.technical_feasibility, 1.0));
    assert_eq!(analysis.warnings.len(), 3);
}

#[test]
fn test_scores_stay_in_bounds() {
    let inputs = [
        "",
        "multiple crowd action movement complex detailed multiple crowd",
        "color light shadow bright dark beautiful stunning dramatic",
        "suddenly slowly quickly then meanwhile after",
        "explosion flying underwater fire crowd night",
        "ünïcödé 🚀 text",
    ];
    for input in inputs {
        let analysis = analyze_text_description(input);
        assert!((0.0..=1.0).contains(&analysis.scene_complexity));
        assert!((0.0..=1.0).contains(&analysis.visual_interest));
        assert!((0.0..=1.0).contains(&analysis.narrative_pacing));
        assert!((0.3..=1.0).contains(&analysis.technical_feasibility));
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let text = "Slowly the light fades over a detailed city at night";
    assert_eq!(analyze_text_description(text), analyze_text_description(text));
}
