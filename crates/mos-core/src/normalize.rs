//! Stat normalization
//!
//! The normalizers are the only code that resolves unset or degenerate
//! fields. Their output types hold concrete values, so the scorers never see
//! an `Option`. After video normalization the pixel count is always positive
//! and the frame rate is either positive or the 0 "no frames" sentinel.

use crate::config::StatDefaults;
use crate::types::{AudioParams, StreamStat, VideoParams};

/// An audio sample with every field resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedAudio {
    pub packet_loss: f64,
    pub bitrate: f64,
    pub round_trip_time_ms: u32,
    pub buffer_delay_ms: u32,
    pub fec: bool,
    pub dtx: bool,
}

/// A video sample with every field resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVideo {
    pub packet_loss: f64,
    pub bitrate: f64,
    pub round_trip_time_ms: u32,
    pub buffer_delay_ms: u32,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub expected_width: u32,
    pub expected_height: u32,
    /// 0 means no frames were received
    pub frame_rate: f64,
    pub expected_frame_rate: f64,
}

impl NormalizedVideo {
    pub fn pixels(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    pub fn expected_pixels(&self) -> f64 {
        f64::from(self.expected_width) * f64::from(self.expected_height)
    }
}

/// Resolve an audio sample. A missing `audio` block counts as an empty one.
pub fn normalize_audio(stat: &StreamStat, defaults: &StatDefaults) -> NormalizedAudio {
    let params = stat.audio.unwrap_or_default();

    NormalizedAudio {
        packet_loss: non_negative(stat.packet_loss),
        bitrate: non_negative(stat.bitrate),
        round_trip_time_ms: stat.round_trip_time.unwrap_or(defaults.round_trip_time_ms),
        buffer_delay_ms: stat.buffer_delay.unwrap_or(defaults.buffer_delay_ms),
        fec: params.fec.unwrap_or(defaults.fec),
        dtx: params.dtx.unwrap_or(defaults.dtx),
    }
}

/// Resolve a video sample. A missing `video` block counts as an empty one.
///
/// Expected values are derived from the received ones after those have been
/// defaulted, never the other way round.
pub fn normalize_video(stat: &StreamStat, defaults: &StatDefaults) -> NormalizedVideo {
    let empty = VideoParams::default();
    let params = stat.video.as_ref().unwrap_or(&empty);

    let width = positive_dimension(params.width).unwrap_or(defaults.width);
    let height = positive_dimension(params.height).unwrap_or(defaults.height);
    let expected_width = positive_dimension(params.expected_width).unwrap_or(width);
    let expected_height = positive_dimension(params.expected_height).unwrap_or(height);

    let frame_rate = match params.frame_rate {
        Some(fps) if fps.is_finite() => fps.max(0.0),
        _ => defaults.frame_rate,
    };
    let expected_frame_rate = match params.expected_frame_rate {
        Some(fps) if fps.is_finite() && fps > 0.0 => fps,
        _ => frame_rate,
    };

    NormalizedVideo {
        packet_loss: non_negative(stat.packet_loss),
        bitrate: non_negative(stat.bitrate),
        round_trip_time_ms: stat.round_trip_time.unwrap_or(defaults.round_trip_time_ms),
        buffer_delay_ms: stat.buffer_delay.unwrap_or(defaults.buffer_delay_ms),
        codec: params.codec.clone(),
        width,
        height,
        expected_width,
        expected_height,
        frame_rate,
        expected_frame_rate,
    }
}

fn positive_dimension(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

/// NaN and negative values become 0; +inf saturates to `f64::MAX`
fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value.min(f64::MAX)
    }
}

impl From<NormalizedAudio> for StreamStat {
    fn from(n: NormalizedAudio) -> Self {
        StreamStat {
            packet_loss: n.packet_loss,
            bitrate: n.bitrate,
            round_trip_time: Some(n.round_trip_time_ms),
            buffer_delay: Some(n.buffer_delay_ms),
            audio: Some(AudioParams {
                fec: Some(n.fec),
                dtx: Some(n.dtx),
            }),
            video: None,
        }
    }
}

impl From<NormalizedVideo> for StreamStat {
    fn from(n: NormalizedVideo) -> Self {
        StreamStat {
            packet_loss: n.packet_loss,
            bitrate: n.bitrate,
            round_trip_time: Some(n.round_trip_time_ms),
            buffer_delay: Some(n.buffer_delay_ms),
            audio: None,
            video: Some(VideoParams {
                codec: n.codec,
                width: Some(n.width),
                height: Some(n.height),
                expected_width: Some(n.expected_width),
                expected_height: Some(n.expected_height),
                frame_rate: Some(n.frame_rate),
                expected_frame_rate: Some(n.expected_frame_rate),
            }),
        }
    }
}
