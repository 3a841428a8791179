use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use scriptcraft::{
    analyze_emotional_arc, generate_auto_suggestions, generate_storyboard_with_canvas,
    script_schema, storyboard_from_json_with_limits, storyboard_schema,
    transcription_from_json_with_limits, transcription_schema, AssistantConfig, AutoSuggestion,
    LatencyConfig, NarrationStyle, Script, ScriptAssistant, StdRandom,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(author, version, about = "Screenplay composer and text analyzer")]
struct Cli {
    /// Seed for the random source; output is reproducible when set.
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write the result here instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    /// Wait the configured latency before each call.
    #[arg(long, global = true, default_value_t = false)]
    simulate_latency: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a storyboard JSON file into a script.
    Convert { frames: PathBuf },
    /// Convert a transcription project JSON file into a script.
    Transcribe { project: PathBuf },
    /// Score a scene description.
    Analyze {
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Generate one storyboard frame from a description.
    Frame {
        #[arg(long)]
        text: String,
        #[arg(long, default_value_t = 0)]
        order: u32,
    },
    /// Split a text file into paragraphs and generate a frame per paragraph.
    Storyboard {
        #[arg(long)]
        file: PathBuf,
    },
    /// Wrap text in narration phrases.
    Narrate {
        #[arg(long)]
        style: Option<NarrationStyle>,
        #[arg(long)]
        text: String,
    },
    /// Generate A/B variants of a script JSON file.
    AbTest {
        script: PathBuf,
        #[arg(long)]
        versions: Option<usize>,
    },
    /// Suggest edits for every element of a script JSON file.
    Suggest {
        script: PathBuf,
        #[arg(long, default_value = "editor")]
        context: String,
    },
    /// Emotional arc of a script JSON file.
    Arc { script: PathBuf },
    /// Convert every storyboard JSON file under a directory.
    Batch {
        dir: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the JSON schemas of the input and output documents.
    Schema,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementSuggestions {
    order: u32,
    suggestions: Vec<AutoSuggestion>,
}

#[derive(Serialize)]
struct Schemas {
    storyboard: serde_json::Value,
    transcription: serde_json::Value,
    script: serde_json::Value,
}

#[derive(Serialize)]
struct BatchReport {
    converted: Vec<String>,
    failed: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AssistantConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AssistantConfig::default(),
    };
    if !cli.simulate_latency {
        config.latency = LatencyConfig {
            analysis_ms: 0,
            generation_ms: 0,
        };
    }
    let rng = match cli.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    let mut assistant = ScriptAssistant::with_random(rng, config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("start runtime")?;
    let rendered = runtime.block_on(run(&cli, &mut assistant))?;
    write_output(cli.output.as_deref(), &rendered)
}

async fn run(cli: &Cli, assistant: &mut ScriptAssistant) -> Result<String> {
    let format = cli.format;
    let limits = assistant.config().limits;
    match &cli.command {
        Command::Convert { frames } => {
            let raw = read(frames)?;
            let frames =
                storyboard_from_json_with_limits(&raw, limits).context("parse storyboard")?;
            let script = assistant.convert_storyboard(&frames).await;
            render_script(&script, format)
        }
        Command::Transcribe { project } => {
            let raw = read(project)?;
            let project = transcription_from_json_with_limits(&raw, limits)
                .context("parse transcription")?;
            let script = assistant.transcribe(&project).await;
            render_script(&script, format)
        }
        Command::Analyze { text, file } => {
            let description = match (text, file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => read(path)?,
                (None, None) => anyhow::bail!("either --text or --file is required"),
            };
            limits
                .check_input_size(&description)
                .context("description too large")?;
            render(&assistant.analyze_description(&description).await, format)
        }
        Command::Frame { text, order } => {
            render(&assistant.generate_frame(text, *order).await, format)
        }
        Command::Storyboard { file } => {
            let text = read(file)?;
            limits.check_input_size(&text).context("text too large")?;
            let frames = generate_storyboard_with_canvas(&text, assistant.config().canvas());
            info!(frames = frames.len(), "generated storyboard");
            render(&frames, format)
        }
        Command::Narrate { style, text } => {
            render(&assistant.narrate(text, *style).await, format)
        }
        Command::AbTest { script, versions } => {
            let base = read_script(script)?;
            render(&assistant.ab_test(&base, *versions).await, format)
        }
        Command::Suggest { script, context } => {
            let script = read_script(script)?;
            let report: Vec<ElementSuggestions> = script
                .elements
                .iter()
                .map(|element| ElementSuggestions {
                    order: element.order,
                    suggestions: generate_auto_suggestions(element, context),
                })
                .filter(|entry| !entry.suggestions.is_empty())
                .collect();
            render(&report, format)
        }
        Command::Arc { script } => render(&analyze_emotional_arc(&read_script(script)?), format),
        Command::Batch { dir, out } => {
            let report = run_batch(assistant, dir, out, format).await?;
            render(&report, format)
        }
        Command::Schema => {
            let schemas = Schemas {
                storyboard: serde_json::to_value(storyboard_schema())?,
                transcription: serde_json::to_value(transcription_schema())?,
                script: serde_json::to_value(script_schema())?,
            };
            render(&schemas, format)
        }
    }
}

async fn run_batch(
    assistant: &mut ScriptAssistant,
    dir: &Path,
    out: &Path,
    format: Format,
) -> Result<BatchReport> {
    let limits = assistant.config().limits;
    let extension = match format {
        Format::Json => "json",
        Format::Yaml => "yaml",
    };
    fs::create_dir_all(out).with_context(|| format!("create {}", out.display()))?;

    let mut report = BatchReport {
        converted: Vec::new(),
        failed: Vec::new(),
    };
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_dir() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path);
        let rel_str = rel.to_string_lossy().replace('\\', "/");

        let raw = match read(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(file = %rel_str, error = %err, "skipping unreadable file");
                report.failed.push(rel_str);
                continue;
            }
        };
        let frames = match storyboard_from_json_with_limits(&raw, limits) {
            Ok(frames) => frames,
            Err(err) => {
                warn!(file = %rel_str, error = %err, "skipping storyboard");
                report.failed.push(rel_str);
                continue;
            }
        };
        let script = assistant.convert_storyboard(&frames).await;
        let target = out.join(rel).with_extension(extension);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, render_script(&script, format)?)
            .with_context(|| format!("write {}", target.display()))?;
        report.converted.push(rel_str);
    }
    Ok(report)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn read_script(path: &Path) -> Result<Script> {
    let raw = read(path)?;
    Script::from_json(&raw).with_context(|| format!("parse script {}", path.display()))
}

fn render<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    })
}

/// JSON scripts carry the versioned envelope so they can be read back.
fn render_script(script: &Script, format: Format) -> Result<String> {
    match format {
        Format::Json => script.to_json().context("serialize script"),
        Format::Yaml => render(script, format),
    }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(out) => {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(out, rendered).with_context(|| format!("write {}", out.display()))
        }
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FRAMES: &str = r#"[
        {"id": "a", "title": "Dock", "description": "Boats wait.", "duration": 3.0, "order": 0},
        {"id": "b", "description": "The sun rises.", "duration": 2.0, "order": 1}
    ]"#;

    fn quiet_assistant() -> ScriptAssistant {
        let mut config = AssistantConfig::default();
        config.latency = LatencyConfig {
            analysis_ms: 0,
            generation_ms: 0,
        };
        ScriptAssistant::with_random(StdRandom::seeded(7), config)
    }

    #[test]
    fn batch_converts_valid_files_and_reports_failures() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");
        fs::create_dir_all(input.path().join("act1")).unwrap();
        fs::write(input.path().join("act1/harbor.json"), FRAMES).unwrap();
        fs::write(input.path().join("broken.json"), "{ not json").unwrap();
        fs::write(input.path().join("notes.txt"), "ignored").unwrap();
        fs::write(input.path().join("latin1.json"), [0x5b, 0xe9, 0x5d]).unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let mut assistant = quiet_assistant();
        let report = runtime
            .block_on(run_batch(
                &mut assistant,
                input.path(),
                output.path(),
                Format::Json,
            ))
            .expect("batch runs");

        assert_eq!(report.converted, vec!["act1/harbor.json"]);
        assert_eq!(report.failed, vec!["broken.json", "latin1.json"]);

        let written = fs::read_to_string(output.path().join("act1/harbor.json")).unwrap();
        let script = Script::from_json(&written).expect("written script parses");
        assert_eq!(script.metadata.estimated_runtime, 5.0);
    }

    #[test]
    fn yaml_rendering_uses_kebab_case_tags() {
        let rendered = render(&NarrationStyle::Documentary, Format::Yaml).unwrap();
        assert_eq!(rendered.trim(), "documentary");
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("nested/out.json");
        write_output(Some(&target), "{}").unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "{}");
    }
}
