//! Async facade that simulates the latency of a remote writing service in
//! front of the synchronous transforms.

use std::time::Duration;

use tracing::info;

use crate::analyzer::{analyze_text_description, AiAnalysis};
use crate::composer::ScriptComposer;
use crate::config::AssistantConfig;
use crate::frame_generator::generate_frame_with_canvas;
use crate::narration::NarrationStyle;
use crate::random::{RandomSource, StdRandom};
use crate::script::Script;
use crate::storyboard::StoryboardFrame;
use crate::transcription::TranscriptionProject;
use crate::variation::AbTestVersion;

/// Wraps a [`ScriptComposer`] and delays each call by the configured
/// latency. Calls cannot be cancelled and are never retried.
#[derive(Debug)]
pub struct ScriptAssistant<R = StdRandom> {
    composer: ScriptComposer<R>,
    config: AssistantConfig,
}

impl ScriptAssistant<StdRandom> {
    pub fn new(config: AssistantConfig) -> Self {
        Self::with_random(StdRandom::from_entropy(), config)
    }
}

impl<R: RandomSource> ScriptAssistant<R> {
    pub fn with_random(rng: R, config: AssistantConfig) -> Self {
        let composer = ScriptComposer::with_random(rng)
            .with_low_confidence_threshold(config.transcription.low_confidence_threshold);
        Self { composer, config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn composer_mut(&mut self) -> &mut ScriptComposer<R> {
        &mut self.composer
    }

    async fn analysis_delay(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.latency.analysis_ms)).await;
    }

    async fn generation_delay(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.latency.generation_ms)).await;
    }

    pub async fn analyze_description(&self, description: &str) -> AiAnalysis {
        info!(chars = description.len(), "analyzing description");
        self.analysis_delay().await;
        analyze_text_description(description)
    }

    pub async fn generate_frame(&self, text: &str, order: u32) -> StoryboardFrame {
        info!(order, "generating frame");
        self.generation_delay().await;
        generate_frame_with_canvas(text, order, self.config.canvas())
    }

    pub async fn convert_storyboard(&mut self, frames: &[StoryboardFrame]) -> Script {
        info!(frames = frames.len(), "converting storyboard");
        self.generation_delay().await;
        self.composer.convert_storyboard_to_script(frames)
    }

    pub async fn transcribe(&mut self, project: &TranscriptionProject) -> Script {
        info!(segments = project.segments.len(), "processing transcription");
        self.generation_delay().await;
        self.composer.process_transcription(project)
    }

    /// Narrates `content`; `None` uses the configured default style.
    pub async fn narrate(&mut self, content: &str, style: Option<NarrationStyle>) -> String {
        let style = style.unwrap_or(self.config.narration.default_style);
        info!(%style, "generating narration");
        self.generation_delay().await;
        self.composer.generate_voiceover_narration(content, style)
    }

    /// A/B versions of `base`; `None` uses the configured version count.
    pub async fn ab_test(&mut self, base: &Script, count: Option<usize>) -> Vec<AbTestVersion> {
        let count = count.unwrap_or(self.config.ab_test.default_versions);
        info!(count, "generating A/B test versions");
        self.generation_delay().await;
        self.composer.generate_ab_test_versions(base, count)
    }
}
