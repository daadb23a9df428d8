//! Coefficient tables for the MOS models
//!
//! Every magic number used by the normalizers and the two scorers lives in
//! [`MosConfig`]. The built-in values are the offline regression fit; a
//! deployment can override any subset of them from a TOML file.
//!
//! ```toml
//! [defaults]
//! round_trip_time_ms = 80
//!
//! [video.codec_factors]
//! vp9 = 1.25
//! av1 = 1.43
//! h265 = 1.3
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MosError, Result};

/// Default round-trip time in milliseconds
pub const DEFAULT_ROUND_TRIP_TIME_MS: u32 = 50;
/// Default jitter buffer delay in milliseconds
pub const DEFAULT_BUFFER_DELAY_MS: u32 = 50;
/// Default received width in pixels
pub const DEFAULT_WIDTH: u32 = 480;
/// Default received height in pixels
pub const DEFAULT_HEIGHT: u32 = 640;
/// Default frame rate in frames per second
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Complete coefficient table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MosConfig {
    /// Values substituted for fields a stat sample leaves unset
    pub defaults: StatDefaults,
    /// E-model coefficients
    pub audio: AudioModel,
    /// bPPPF regression coefficients
    pub video: VideoModel,
}

/// Values substituted for fields a stat sample leaves unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDefaults {
    pub round_trip_time_ms: u32,
    pub buffer_delay_ms: u32,
    pub fec: bool,
    pub dtx: bool,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

impl Default for StatDefaults {
    fn default() -> Self {
        Self {
            round_trip_time_ms: DEFAULT_ROUND_TRIP_TIME_MS,
            buffer_delay_ms: DEFAULT_BUFFER_DELAY_MS,
            fec: true,
            dtx: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

/// Coefficients of the modified E-model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioModel {
    /// Fixed packetization delay added to the one-way delay estimate
    pub packetization_delay_ms: f64,
    /// Equipment impairment while DTX is on, bitrate is ignored
    pub dtx_impairment: f64,
    /// Equipment impairment when the bitrate is unknown
    pub unknown_bitrate_impairment: f64,
    /// `Ie = intercept - slope * ln(bitrate)`
    pub bitrate_impairment_intercept: f64,
    pub bitrate_impairment_slope: f64,
    /// Ceiling for the bitrate-derived equipment impairment
    pub max_equipment_impairment: f64,
    /// Packet-loss robustness `Bpl` with FEC enabled
    pub fec_loss_robustness: f64,
    /// Packet-loss robustness `Bpl` without FEC
    pub loss_robustness: f64,
    /// Linear delay impairment per millisecond
    pub delay_coefficient: f64,
    /// One-way delay above which the excess penalty applies
    pub delay_threshold_ms: f64,
    /// Extra impairment per millisecond above the threshold
    pub excess_delay_coefficient: f64,
}

impl Default for AudioModel {
    fn default() -> Self {
        Self {
            packetization_delay_ms: 20.0,
            dtx_impairment: 8.0,
            unknown_bitrate_impairment: 6.0,
            bitrate_impairment_intercept: 55.0,
            bitrate_impairment_slope: 4.6,
            max_equipment_impairment: 30.0,
            fec_loss_robustness: 20.0,
            loss_robustness: 10.0,
            delay_coefficient: 0.03,
            delay_threshold_ms: 150.0,
            excess_delay_coefficient: 0.1,
        }
    }
}

/// One step of the resolution down-scale penalty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStep {
    /// Lowest received/expected pixel ratio covered by this step
    pub min_ratio: f64,
    /// Scale factor applied to the score inside this step
    pub factor: f64,
}

/// Coefficients of the video regression and its corrections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoModel {
    /// Multiplier applied to bPPPF inside the logarithm
    pub bpppf_scale: f64,
    /// `base = log_coefficient * ln(bpppf_scale * bPPPF) + intercept`
    pub log_coefficient: f64,
    pub intercept: f64,
    /// Penalty per unit of `ln(expected_fps / fps)`
    pub frame_rate_penalty: f64,
    /// Penalty per millisecond of delay
    pub delay_coefficient: f64,
    /// Factor for codecs missing from `codec_factors`
    pub default_codec_factor: f64,
    /// Pixel ratios at or above this keep the ratio itself as scale factor
    pub near_identity_ratio: f64,
    /// Factor for ratios below every step
    pub smallest_scale_factor: f64,
    /// Steps below `near_identity_ratio`, ordered by descending `min_ratio`
    pub resolution_steps: Vec<ResolutionStep>,
    /// Codec efficiency factors keyed by lowercase codec name
    pub codec_factors: BTreeMap<String, f64>,
}

impl Default for VideoModel {
    fn default() -> Self {
        let mut codec_factors = BTreeMap::new();
        codec_factors.insert("vp9".to_string(), 1.2);
        codec_factors.insert("av1".to_string(), 1.43);

        Self {
            bpppf_scale: 29.0,
            log_coefficient: 2.3,
            intercept: 3.1,
            frame_rate_penalty: 1.9,
            delay_coefficient: 0.002,
            default_codec_factor: 1.0,
            near_identity_ratio: 0.8,
            smallest_scale_factor: 0.55,
            resolution_steps: vec![
                ResolutionStep {
                    min_ratio: 0.5,
                    factor: 0.75,
                },
                ResolutionStep {
                    min_ratio: 0.2,
                    factor: 0.7,
                },
            ],
            codec_factors,
        }
    }
}

impl VideoModel {
    /// Efficiency factor for `codec`, matched case-insensitively
    pub fn codec_factor(&self, codec: &str) -> f64 {
        self.codec_factors
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(codec))
            .map(|(_, factor)| *factor)
            .unwrap_or(self.default_codec_factor)
    }

    /// Scale factor for rendering `actual_pixels` at `expected_pixels`
    pub fn resolution_scale(&self, actual_pixels: f64, expected_pixels: f64) -> f64 {
        if expected_pixels <= actual_pixels {
            return 1.0;
        }

        let ratio = actual_pixels / expected_pixels;
        if ratio >= self.near_identity_ratio {
            return ratio;
        }

        self.resolution_steps
            .iter()
            .find(|step| ratio >= step.min_ratio)
            .map(|step| step.factor)
            .unwrap_or(self.smallest_scale_factor)
    }
}

impl MosConfig {
    /// Parse a coefficient table from TOML; missing keys keep their built-in values
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a coefficient table from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded MOS configuration from {}", path.display());
        Ok(config)
    }

    /// Render the table as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the table keeps every denominator positive and every
    /// coefficient finite
    pub fn validate(&self) -> Result<()> {
        let d = &self.defaults;
        if d.width == 0 || d.height == 0 {
            return Err(MosError::invalid_config(
                "default width and height must be positive",
            ));
        }
        if !d.frame_rate.is_finite() || d.frame_rate <= 0.0 {
            return Err(MosError::invalid_config(
                "default frame_rate must be a positive number",
            ));
        }

        let a = &self.audio;
        ensure_finite(
            "audio",
            &[
                ("packetization_delay_ms", a.packetization_delay_ms),
                ("dtx_impairment", a.dtx_impairment),
                ("unknown_bitrate_impairment", a.unknown_bitrate_impairment),
                ("bitrate_impairment_intercept", a.bitrate_impairment_intercept),
                ("bitrate_impairment_slope", a.bitrate_impairment_slope),
                ("max_equipment_impairment", a.max_equipment_impairment),
                ("fec_loss_robustness", a.fec_loss_robustness),
                ("loss_robustness", a.loss_robustness),
                ("delay_coefficient", a.delay_coefficient),
                ("delay_threshold_ms", a.delay_threshold_ms),
                ("excess_delay_coefficient", a.excess_delay_coefficient),
            ],
        )?;
        if a.fec_loss_robustness <= 0.0 || a.loss_robustness <= 0.0 {
            return Err(MosError::invalid_config(
                "audio loss robustness factors must be positive",
            ));
        }
        if a.max_equipment_impairment < 0.0 || a.max_equipment_impairment > 100.0 {
            return Err(MosError::invalid_config(
                "audio max_equipment_impairment must be within [0, 100]",
            ));
        }

        let v = &self.video;
        ensure_finite(
            "video",
            &[
                ("bpppf_scale", v.bpppf_scale),
                ("log_coefficient", v.log_coefficient),
                ("intercept", v.intercept),
                ("frame_rate_penalty", v.frame_rate_penalty),
                ("delay_coefficient", v.delay_coefficient),
                ("default_codec_factor", v.default_codec_factor),
                ("near_identity_ratio", v.near_identity_ratio),
                ("smallest_scale_factor", v.smallest_scale_factor),
            ],
        )?;
        if v.bpppf_scale <= 0.0 || v.default_codec_factor <= 0.0 {
            return Err(MosError::invalid_config(
                "video bpppf_scale and default_codec_factor must be positive",
            ));
        }
        if let Some((name, factor)) = v
            .codec_factors
            .iter()
            .find(|(_, factor)| !factor.is_finite() || **factor <= 0.0)
        {
            return Err(MosError::invalid_config(format!(
                "codec factor for {name} must be positive, got {factor}"
            )));
        }
        if !(v.near_identity_ratio > 0.0 && v.near_identity_ratio <= 1.0) {
            return Err(MosError::invalid_config(
                "video near_identity_ratio must be within (0, 1]",
            ));
        }

        let mut upper = v.near_identity_ratio;
        for step in &v.resolution_steps {
            if !step.min_ratio.is_finite() || step.min_ratio <= 0.0 || step.min_ratio >= upper {
                return Err(MosError::invalid_config(format!(
                    "resolution step min_ratio {} must be positive and below {}",
                    step.min_ratio, upper
                )));
            }
            if !is_scale_factor(step.factor) {
                return Err(MosError::invalid_config(format!(
                    "resolution step factor {} must be within (0, 1]",
                    step.factor
                )));
            }
            upper = step.min_ratio;
        }
        if !is_scale_factor(v.smallest_scale_factor) {
            return Err(MosError::invalid_config(
                "video smallest_scale_factor must be within (0, 1]",
            ));
        }

        Ok(())
    }
}

fn ensure_finite(section: &str, values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(MosError::invalid_config(format!(
            "{section}.{name} must be finite, got {value}"
        ))),
        None => Ok(()),
    }
}

fn is_scale_factor(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}
