//! Configured scoring entry point and batch dispatcher

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::audio::{self, AudioEstimate};
use crate::config::MosConfig;
use crate::error::{MosError, Result};
use crate::normalize::{normalize_audio, normalize_video};
use crate::types::{ScoreResult, ScoreStatus, StreamKind, StreamStat};
use crate::video::{self, VideoEstimate};

/// MOS estimator bound to one coefficient table
///
/// Cloning is cheap; the table is shared.
#[derive(Debug, Clone, Default)]
pub struct MosEstimator {
    config: Arc<MosConfig>,
}

impl MosEstimator {
    /// Create an estimator with the built-in coefficients
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with a custom coefficient table
    pub fn with_config(config: MosConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &MosConfig {
        &self.config
    }

    /// Decide which scorer a record belongs to
    pub fn classify(stat: &StreamStat) -> Result<StreamKind> {
        match (&stat.audio, &stat.video) {
            (Some(_), None) => Ok(StreamKind::Audio),
            (None, Some(_)) => Ok(StreamKind::Video),
            (None, None) => Err(MosError::MissingMediaParams),
            (Some(_), Some(_)) => Err(MosError::ConflictingMediaParams),
        }
    }

    /// Audio MOS for `stat`, treating it as an audio sample
    pub fn score_audio(&self, stat: &StreamStat) -> f64 {
        self.estimate_audio(stat).mos
    }

    /// Audio MOS with the E-model breakdown
    pub fn estimate_audio(&self, stat: &StreamStat) -> AudioEstimate {
        let normalized = normalize_audio(stat, &self.config.defaults);
        let estimate = audio::estimate(&normalized, &self.config.audio);
        debug!(
            mos = estimate.mos,
            r_factor = estimate.r_factor,
            delay_ms = estimate.delay_ms,
            ie = estimate.equipment_impairment,
            ipl = estimate.loss_impairment,
            id = estimate.delay_impairment,
            "Scored audio sample"
        );
        estimate
    }

    /// Video MOS for `stat`, treating it as a video sample
    pub fn score_video(&self, stat: &StreamStat) -> f64 {
        self.estimate_video(stat).mos
    }

    /// Video MOS with the regression breakdown
    pub fn estimate_video(&self, stat: &StreamStat) -> VideoEstimate {
        let normalized = normalize_video(stat, &self.config.defaults);
        let estimate = video::estimate(&normalized, &self.config.video);
        debug!(
            mos = estimate.mos,
            bpppf = estimate.bits_per_pixel_per_frame,
            base = estimate.base_quality,
            codec_factor = estimate.codec_factor,
            scale_factor = estimate.scale_factor,
            "Scored video sample"
        );
        estimate
    }

    /// Route one record to the matching scorer
    ///
    /// Records that cannot be classified come back zero-valued with a
    /// rejection status.
    pub fn score(&self, stat: &StreamStat) -> ScoreResult {
        self.score_indexed(0, stat)
    }

    /// Score every record, one result per input in input order
    pub fn score_batch(&self, stats: &[StreamStat]) -> Vec<ScoreResult> {
        let results: Vec<_> = stats
            .iter()
            .enumerate()
            .map(|(index, stat)| self.score_indexed(index, stat))
            .collect();
        log_batch(&results);
        results
    }

    /// Same as [`score_batch`](Self::score_batch), spread over the rayon pool
    pub fn score_batch_parallel(&self, stats: &[StreamStat]) -> Vec<ScoreResult> {
        let results: Vec<_> = stats
            .par_iter()
            .enumerate()
            .map(|(index, stat)| self.score_indexed(index, stat))
            .collect();
        log_batch(&results);
        results
    }

    fn score_indexed(&self, index: usize, stat: &StreamStat) -> ScoreResult {
        match Self::classify(stat) {
            Ok(StreamKind::Audio) => ScoreResult::audio(self.score_audio(stat)),
            Ok(StreamKind::Video) => ScoreResult::video(self.score_video(stat)),
            Err(err) => {
                warn!(index, category = %err.category(), "Rejected stat sample: {}", err);
                ScoreResult::rejected(rejection_status(&err))
            }
        }
    }
}

fn rejection_status(err: &MosError) -> ScoreStatus {
    match err {
        MosError::ConflictingMediaParams => ScoreStatus::Ambiguous,
        _ => ScoreStatus::Unclassified,
    }
}

fn log_batch(results: &[ScoreResult]) {
    let rejected = results.iter().filter(|r| !r.is_scored()).count();
    info!(
        total = results.len(),
        rejected,
        "Scored batch of {} stat samples",
        results.len()
    );
}
