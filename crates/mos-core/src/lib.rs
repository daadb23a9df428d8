//! # rtcmos-core: call quality estimation from stream statistics
//!
//! Estimates a Mean Opinion Score (MOS, 1 to 5) for live audio and video
//! streams from transport and encoding statistics alone: packet loss,
//! round-trip time, jitter buffer delay, bitrate, resolution, frame rate and
//! codec. No media is inspected.
//!
//! ## Models
//!
//! - **Audio**: a modified ITU-T G.107 E-model. Packet loss, bitrate, FEC,
//!   DTX and one-way delay become a transmission rating R, which is mapped
//!   to MOS with the standard cubic.
//! - **Video**: a logarithmic regression over bits per pixel per frame with
//!   corrections for codec efficiency, frame-rate mismatch, delay and
//!   rendering at a larger size than received.
//!
//! Unset fields are filled with defaults before scoring, see [`normalize`].
//! All coefficients live in [`MosConfig`] and can be overridden.
//!
//! ## Usage
//!
//! ```rust
//! use rtcmos_core::{score_batch, StreamStat, VideoParams};
//!
//! let stats = vec![
//!     StreamStat::audio(2.0, 32_000.0).with_round_trip_time(80),
//!     StreamStat::video(
//!         1_500_000.0,
//!         VideoParams::new("vp9").with_resolution(1280, 720).with_frame_rate(30.0),
//!     ),
//! ];
//!
//! let scores = score_batch(&stats);
//! assert_eq!(scores.len(), 2);
//! assert!(scores[0].audio_score >= 1.0 && scores[0].audio_score <= 5.0);
//! assert!(scores[1].video_score >= 1.0 && scores[1].video_score <= 5.0);
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod estimator;
pub mod math;
pub mod normalize;
pub mod quality;
pub mod types;
pub mod video;

use once_cell::sync::Lazy;

pub use audio::AudioEstimate;
pub use config::{AudioModel, MosConfig, ResolutionStep, StatDefaults, VideoModel};
pub use error::{ErrorCategory, MosError, Result};
pub use estimator::MosEstimator;
pub use normalize::{normalize_audio, normalize_video, NormalizedAudio, NormalizedVideo};
pub use quality::QualityLevel;
pub use types::{AudioParams, ScoreResult, ScoreStatus, StreamKind, StreamStat, VideoParams};
pub use video::VideoEstimate;

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static DEFAULT_ESTIMATOR: Lazy<MosEstimator> = Lazy::new(MosEstimator::new);

/// Estimator with the built-in coefficient table
pub fn default_estimator() -> &'static MosEstimator {
    &DEFAULT_ESTIMATOR
}

/// Audio MOS for one sample using the built-in coefficients
pub fn score_audio(stat: &StreamStat) -> f64 {
    DEFAULT_ESTIMATOR.score_audio(stat)
}

/// Video MOS for one sample using the built-in coefficients
pub fn score_video(stat: &StreamStat) -> f64 {
    DEFAULT_ESTIMATOR.score_video(stat)
}

/// Score a batch using the built-in coefficients, preserving input order
pub fn score_batch(stats: &[StreamStat]) -> Vec<ScoreResult> {
    DEFAULT_ESTIMATOR.score_batch(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions_use_builtin_table() {
        let stat = StreamStat::audio(10.0, 0.0);
        assert_eq!(score_audio(&stat), MosEstimator::new().score_audio(&stat));
        assert_eq!(default_estimator().config(), &MosConfig::default());
    }

    #[test]
    fn test_score_video_free_function() {
        let stat = StreamStat::video(100_000.0, VideoParams::default().with_frame_rate(0.0));
        assert_eq!(score_video(&stat), 1.0);
    }
}
