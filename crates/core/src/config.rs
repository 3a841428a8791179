use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::composer::DEFAULT_LOW_CONFIDENCE_THRESHOLD;
use crate::error::{ScriptError, ScriptResult};
use crate::limits::InputLimits;
use crate::narration::NarrationStyle;
use crate::visual::Canvas;

/// Tunables for the assistant, read from a TOML file.
///
/// Every section is optional; missing keys take their defaults, so a file
/// containing only `[latency]` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub canvas: CanvasConfig,
    pub latency: LatencyConfig,
    pub narration: NarrationConfig,
    pub ab_test: AbTestConfig,
    pub transcription: TranscriptionConfig,
    pub limits: InputLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            height: canvas.height,
        }
    }
}

impl From<CanvasConfig> for Canvas {
    fn from(config: CanvasConfig) -> Self {
        Canvas {
            width: config.width,
            height: config.height,
        }
    }
}

/// Simulated service latency in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub analysis_ms: u64,
    pub generation_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            analysis_ms: 1_000,
            generation_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub default_style: NarrationStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbTestConfig {
    pub default_versions: usize,
}

impl Default for AbTestConfig {
    fn default() -> Self {
        Self {
            default_versions: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub low_confidence_threshold: f64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl AssistantConfig {
    pub fn from_toml_str(input: &str) -> ScriptResult<Self> {
        let config: AssistantConfig =
            toml::from_str(input).map_err(|err| ScriptError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// load a config from a file path.
    pub fn load(path: &Path) -> ScriptResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// save the config to a file path.
    pub fn save(&self, path: &Path) -> ScriptResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|err| ScriptError::Config(err.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas.into()
    }

    fn validate(&self) -> ScriptResult<()> {
        let canvas = self.canvas;
        if !(canvas.width.is_finite() && canvas.width > 0.0)
            || !(canvas.height.is_finite() && canvas.height > 0.0)
        {
            return Err(ScriptError::Config(format!(
                "canvas must be positive, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        let threshold = self.transcription.low_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ScriptError::Config(format!(
                "low_confidence_threshold must be within [0, 1], got {threshold}"
            )));
        }
        Ok(())
    }
}
