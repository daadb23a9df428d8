//! Input and output records
//!
//! Unset inputs are `Option`s. Nothing outside [`crate::normalize`] reads
//! them directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quality::QualityLevel;

/// One statistics sample for a single stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamStat {
    /// Packet loss percentage (0.0-100.0)
    pub packet_loss: f64,
    /// Encoded bitrate in bits per second
    pub bitrate: f64,
    /// Round-trip time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_trip_time: Option<u32>,
    /// Jitter buffer delay in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_delay: Option<u32>,
    /// Present for audio streams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioParams>,
    /// Present for video streams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoParams>,
}

impl StreamStat {
    /// An audio sample with every optional field unset
    pub fn audio(packet_loss: f64, bitrate: f64) -> Self {
        Self {
            packet_loss,
            bitrate,
            audio: Some(AudioParams::default()),
            ..Default::default()
        }
    }

    /// A video sample with every optional field unset
    pub fn video(bitrate: f64, params: VideoParams) -> Self {
        Self {
            bitrate,
            video: Some(params),
            ..Default::default()
        }
    }

    pub fn with_round_trip_time(mut self, rtt_ms: u32) -> Self {
        self.round_trip_time = Some(rtt_ms);
        self
    }

    pub fn with_buffer_delay(mut self, delay_ms: u32) -> Self {
        self.buffer_delay = Some(delay_ms);
        self
    }
}

/// Opus transport settings of an audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioParams {
    /// Forward error correction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fec: Option<bool>,
    /// Discontinuous transmission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtx: Option<bool>,
}

/// Encoding and rendering parameters of a video stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoParams {
    /// Codec name, e.g. vp8 / vp9 / av1 / h264
    pub codec: String,
    /// Resolution of the video received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Resolution of the rendering widget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_height: Option<u32>,
    /// Frame rate of the video received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f64>,
    /// Frame rate of the video source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_frame_rate: Option<f64>,
}

impl VideoParams {
    pub fn new(codec: impl Into<String>) -> Self {
        Self {
            codec: codec.into(),
            ..Default::default()
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_expected_resolution(mut self, width: u32, height: u32) -> Self {
        self.expected_width = Some(width);
        self.expected_height = Some(height);
        self
    }

    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = Some(fps);
        self
    }

    pub fn with_expected_frame_rate(mut self, fps: f64) -> Self {
        self.expected_frame_rate = Some(fps);
        self
    }
}

/// Which scorer a record is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Audio,
    Video,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Outcome of dispatching one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Routed to a scorer
    Scored { kind: StreamKind },
    /// Neither audio nor video parameters
    Unclassified,
    /// Both audio and video parameters
    Ambiguous,
}

/// Scores for one input record
///
/// The field of the stream type that was not scored stays at zero, as do
/// both fields of a rejected record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// MOS based on the modified E-model
    pub audio_score: f64,
    /// MOS based on the logarithmic regression
    pub video_score: f64,
    #[serde(flatten)]
    pub status: ScoreStatus,
}

impl ScoreResult {
    pub fn audio(mos: f64) -> Self {
        Self {
            audio_score: mos,
            video_score: 0.0,
            status: ScoreStatus::Scored {
                kind: StreamKind::Audio,
            },
        }
    }

    pub fn video(mos: f64) -> Self {
        Self {
            audio_score: 0.0,
            video_score: mos,
            status: ScoreStatus::Scored {
                kind: StreamKind::Video,
            },
        }
    }

    pub fn rejected(status: ScoreStatus) -> Self {
        Self {
            audio_score: 0.0,
            video_score: 0.0,
            status,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self.status, ScoreStatus::Scored { .. })
    }

    pub fn kind(&self) -> Option<StreamKind> {
        match self.status {
            ScoreStatus::Scored { kind } => Some(kind),
            _ => None,
        }
    }

    /// Quality level of the audio score, if this record was scored as audio
    pub fn audio_level(&self) -> Option<QualityLevel> {
        match self.kind() {
            Some(StreamKind::Audio) => Some(QualityLevel::from_mos(self.audio_score)),
            _ => None,
        }
    }

    /// Quality level of the video score, if this record was scored as video
    pub fn video_level(&self) -> Option<QualityLevel> {
        match self.kind() {
            Some(StreamKind::Video) => Some(QualityLevel::from_mos(self.video_score)),
            _ => None,
        }
    }

    /// Quality level of whichever score this record received
    pub fn level(&self) -> Option<QualityLevel> {
        self.audio_level().or_else(|| self.video_level())
    }
}
