use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rtcmos_core::{
    AudioEstimate, MosConfig, MosError, MosEstimator, ScoreResult, StreamKind, StreamStat,
    VideoEstimate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub pretty: bool,
    pub detailed: bool,
    pub parallel: bool,
}

/// Either a list of samples or a single sample
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Many(Vec<StreamStat>),
    One(StreamStat),
}

impl InputDocument {
    fn into_stats(self) -> Vec<StreamStat> {
        match self {
            Self::Many(stats) => stats,
            Self::One(stat) => vec![stat],
        }
    }
}

/// Score plus the breakdown of whichever model produced it
#[derive(Debug, Serialize)]
struct DetailedResult {
    #[serde(flatten)]
    result: ScoreResult,
    /// Human description of the quality level
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio: Option<AudioEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<VideoEstimate>,
}

pub fn run_score(options: &ScoreOptions, out: &mut impl Write) -> Result<()> {
    let estimator = load_estimator(options.config.as_deref())?;
    let input = read_input(options.input.as_deref())?;
    let rendered = score_document(&estimator, &input, options)?;
    writeln!(out, "{rendered}").context("failed to write scores")?;
    Ok(())
}

pub fn run_defaults(out: &mut impl Write) -> Result<()> {
    let rendered = MosConfig::default()
        .to_toml_string()
        .context("failed to render default configuration")?;
    write!(out, "{rendered}").context("failed to write configuration")?;
    Ok(())
}

fn load_estimator(config: Option<&Path>) -> Result<MosEstimator> {
    let Some(path) = config else {
        return Ok(MosEstimator::new());
    };
    let config = MosConfig::from_file(path)
        .map_err(log_failure)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    MosEstimator::with_config(config)
        .map_err(log_failure)
        .context("configuration rejected")
}

fn log_failure(err: MosError) -> MosError {
    error!(category = %err.category(), "{}", err);
    err
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn score_document(estimator: &MosEstimator, input: &str, options: &ScoreOptions) -> Result<String> {
    let stats = serde_json::from_str::<InputDocument>(input)
        .context("input is not a stat sample or a JSON array of stat samples")?
        .into_stats();
    debug!("Parsed {} stat samples", stats.len());

    let results = if options.parallel {
        estimator.score_batch_parallel(&stats)
    } else {
        estimator.score_batch(&stats)
    };
    info!("Scored {} samples", results.len());

    let rendered = if options.detailed {
        let detailed: Vec<_> = stats
            .iter()
            .zip(results)
            .map(|(stat, result)| detail(estimator, stat, result))
            .collect();
        to_json(&detailed, options.pretty)?
    } else {
        to_json(&results, options.pretty)?
    };
    Ok(rendered)
}

fn detail(estimator: &MosEstimator, stat: &StreamStat, result: ScoreResult) -> DetailedResult {
    let kind = result.kind();
    DetailedResult {
        result,
        quality: result.level().map(|level| level.description()),
        audio: (kind == Some(StreamKind::Audio)).then(|| estimator.estimate_audio(stat)),
        video: (kind == Some(StreamKind::Video)).then(|| estimator.estimate_video(stat)),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("failed to serialize scores")
}
