//! Audio MOS based on a modified E-model (ITU-T G.107)
//!
//! The transmission rating starts at 100 and loses a loss impairment `Ipl`
//! and a delay impairment `Id`:
//!
//! ```text
//! delay = packetization + buffer + rtt / 2
//! Ie    = dtx ? 8 : bitrate > 0 ? clamp(55 - 4.6 ln(bitrate), 0, 30) : 6
//! Ipl   = Ie + (100 - Ie) * loss / (loss + Bpl)       Bpl = fec ? 20 : 10
//! Id    = 0.03 delay + max(0, 0.1 (delay - 150))
//! R     = clamp(100 - Ipl - Id, 0, 100)
//! MOS   = 1 + 0.035 R + 7e-6 R (R - 60) (100 - R)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::AudioModel;
use crate::math::{clamp, round2};
use crate::normalize::NormalizedAudio;
use crate::quality::QualityLevel;

const R0: f64 = 100.0;

/// Audio score with the intermediate E-model terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEstimate {
    /// Mean Opinion Score (1.0-5.0), two decimals
    pub mos: f64,
    /// Transmission rating (0-100)
    pub r_factor: f64,
    /// Estimated one-way delay in milliseconds
    pub delay_ms: f64,
    /// `Ie`
    pub equipment_impairment: f64,
    /// `Ipl`
    pub loss_impairment: f64,
    /// `Id`
    pub delay_impairment: f64,
    pub level: QualityLevel,
    /// Category of the transmission rating on the E-model R scale
    pub r_factor_level: QualityLevel,
}

/// Score a normalized audio sample
pub fn estimate(stat: &NormalizedAudio, model: &AudioModel) -> AudioEstimate {
    // Half the RTT in whole milliseconds
    let delay_ms = model.packetization_delay_ms
        + f64::from(stat.buffer_delay_ms)
        + f64::from(stat.round_trip_time_ms / 2);

    let equipment_impairment = equipment_impairment(stat, model);

    let loss_robustness = if stat.fec {
        model.fec_loss_robustness
    } else {
        model.loss_robustness
    };
    let loss = stat.packet_loss;
    let loss_impairment =
        equipment_impairment + (100.0 - equipment_impairment) * (loss / (loss + loss_robustness));

    let excess = if delay_ms > model.delay_threshold_ms {
        model.excess_delay_coefficient * (delay_ms - model.delay_threshold_ms)
    } else {
        0.0
    };
    let delay_impairment = delay_ms * model.delay_coefficient + excess;

    let r_factor = clamp(R0 - loss_impairment - delay_impairment, 0.0, 100.0);
    let mos = r_to_mos(r_factor);

    AudioEstimate {
        mos,
        r_factor,
        delay_ms,
        equipment_impairment,
        loss_impairment,
        delay_impairment,
        level: QualityLevel::from_mos(mos),
        r_factor_level: QualityLevel::from_r_factor(r_factor),
    }
}

fn equipment_impairment(stat: &NormalizedAudio, model: &AudioModel) -> f64 {
    // DTX silences the stream between talk spurts, so the nominal bitrate
    // says nothing about the codec operating point
    if stat.dtx {
        model.dtx_impairment
    } else if stat.bitrate > 0.0 {
        clamp(
            model.bitrate_impairment_intercept
                - model.bitrate_impairment_slope * stat.bitrate.ln(),
            0.0,
            model.max_equipment_impairment,
        )
    } else {
        model.unknown_bitrate_impairment
    }
}

/// Standard E-model R-to-MOS mapping, rounded and held inside [1, 5]
pub fn r_to_mos(r: f64) -> f64 {
    let mos = 1.0 + 0.035 * r + (r * (r - 60.0) * (100.0 - r) * 7.0) / 1_000_000.0;
    clamp(round2(mos), 1.0, 5.0)
}
