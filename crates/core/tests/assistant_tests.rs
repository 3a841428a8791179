use std::time::Duration;

use scriptcraft::{
    AssistantConfig, FirstChoice, NarrationStyle, ScriptAssistant, ShotType,
};
use tokio::time::Instant;

mod common;
use common::harbor_frames;

fn assistant() -> ScriptAssistant<FirstChoice> {
    ScriptAssistant::with_random(FirstChoice::default(), AssistantConfig::default())
}

#[tokio::test(start_paused = true)]
async fn analysis_waits_for_configured_latency() {
    let assistant = assistant();
    let started = Instant::now();
    let analysis = assistant
        .analyze_description("A dramatic night chase scene with multiple characters")
        .await;
    assert_eq!(started.elapsed(), Duration::from_millis(1_000));
    assert!((analysis.scene_complexity - 0.5).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn generation_calls_wait_longer() {
    let mut assistant = assistant();

    let started = Instant::now();
    let frame = assistant.generate_frame("The city skyline at dusk", 0).await;
    assert_eq!(started.elapsed(), Duration::from_millis(2_000));
    assert_eq!(frame.shot_type, Some(ShotType::Establishing));

    let started = Instant::now();
    let script = assistant.convert_storyboard(&harbor_frames()).await;
    assert_eq!(started.elapsed(), Duration::from_millis(2_000));
    assert_eq!(script.elements.len(), 18);
}

#[tokio::test(start_paused = true)]
async fn configured_defaults_flow_through() {
    let mut config = AssistantConfig::default();
    config.latency.generation_ms = 10;
    config.narration.default_style = NarrationStyle::Narrative;
    config.ab_test.default_versions = 2;
    let mut assistant = ScriptAssistant::with_random(FirstChoice::default(), config);

    let started = Instant::now();
    let narration = assistant.narrate("The boat sails.", None).await;
    assert_eq!(started.elapsed(), Duration::from_millis(10));
    assert_eq!(narration, "Once upon a time, the boat sails.");

    let script = assistant.convert_storyboard(&harbor_frames()).await;
    let versions = assistant.ab_test(&script, None).await;
    assert_eq!(versions.len(), 2);
}
