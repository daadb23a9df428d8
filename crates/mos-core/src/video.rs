//! Video MOS based on a logarithmic regression over bits per pixel per frame
//!
//! ```text
//! bPPPF = codec_factor * bitrate / pixels / fps
//! base  = clamp(2.3 ln(29 bPPPF) + 3.1, 1, 5)
//! MOS   = base - 1.9 ln(expected_fps / fps) - 0.002 delay
//! score = resolution_scale * clamp(round(MOS), 1, 5)
//! ```
//!
//! The coefficients come from a fit on a small reference set and are
//! expected to be retuned; see [`crate::config::VideoModel`].

use serde::{Deserialize, Serialize};

use crate::config::VideoModel;
use crate::math::{clamp, round2};
use crate::normalize::NormalizedVideo;
use crate::quality::QualityLevel;

/// Score for a stream that delivered no frames
pub const NO_FRAMES_MOS: f64 = 1.0;

/// Video score with the intermediate regression terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoEstimate {
    /// Mean Opinion Score (1.0-5.0), two decimals before the resolution scale
    pub mos: f64,
    pub bits_per_pixel_per_frame: f64,
    /// Regression output before the frame-rate and delay penalties
    pub base_quality: f64,
    pub codec_factor: f64,
    /// Resolution down-scale factor (1.0 when rendered at received size)
    pub scale_factor: f64,
    pub delay_ms: f64,
    pub level: QualityLevel,
}

impl VideoEstimate {
    fn no_frames(scale_factor: f64, codec_factor: f64, delay_ms: f64) -> Self {
        Self {
            mos: NO_FRAMES_MOS,
            bits_per_pixel_per_frame: 0.0,
            base_quality: NO_FRAMES_MOS,
            codec_factor,
            scale_factor,
            delay_ms,
            level: QualityLevel::from_mos(NO_FRAMES_MOS),
        }
    }
}

/// Score a normalized video sample
pub fn estimate(stat: &NormalizedVideo, model: &VideoModel) -> VideoEstimate {
    let pixels = stat.pixels();
    let scale_factor = model.resolution_scale(pixels, stat.expected_pixels());
    let codec_factor = model.codec_factor(&stat.codec);
    let delay_ms = f64::from(stat.buffer_delay_ms) + f64::from(stat.round_trip_time_ms / 2);

    // No motion at all: worst score regardless of the rest
    if stat.frame_rate == 0.0 {
        return VideoEstimate::no_frames(scale_factor, codec_factor, delay_ms);
    }

    let frame_rate = stat.frame_rate;
    let bits_per_pixel_per_frame = codec_factor * stat.bitrate / pixels / frame_rate;
    let base_quality = clamp(
        model.log_coefficient * (model.bpppf_scale * bits_per_pixel_per_frame).ln()
            + model.intercept,
        1.0,
        5.0,
    );

    let raw = base_quality
        - model.frame_rate_penalty * (stat.expected_frame_rate / frame_rate).ln()
        - model.delay_coefficient * delay_ms;
    let unscaled = clamp(round2(raw), 1.0, 5.0);
    let mos = clamp(scale_factor * unscaled, 1.0, 5.0);

    VideoEstimate {
        mos,
        bits_per_pixel_per_frame,
        base_quality,
        codec_factor,
        scale_factor,
        delay_ms,
        level: QualityLevel::from_mos(mos),
    }
}
