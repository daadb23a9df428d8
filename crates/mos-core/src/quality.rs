//! Quality categories for MOS values

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality level categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    /// Excellent quality (MOS >= 4.3)
    Excellent,
    /// Good quality (MOS 4.0-4.3)
    Good,
    /// Fair quality (MOS 3.6-4.0)
    Fair,
    /// Poor quality (MOS 3.1-3.6)
    Poor,
    /// Bad quality (MOS < 3.1)
    Bad,
}

impl QualityLevel {
    /// Create a quality level from a MOS score
    pub fn from_mos(mos: f64) -> Self {
        if mos >= 4.3 {
            Self::Excellent
        } else if mos >= 4.0 {
            Self::Good
        } else if mos >= 3.6 {
            Self::Fair
        } else if mos >= 3.1 {
            Self::Poor
        } else {
            Self::Bad
        }
    }

    /// Create a quality level from an E-model R-factor
    pub fn from_r_factor(r: f64) -> Self {
        if r >= 90.0 {
            Self::Excellent
        } else if r >= 80.0 {
            Self::Good
        } else if r >= 70.0 {
            Self::Fair
        } else if r >= 60.0 {
            Self::Poor
        } else {
            Self::Bad
        }
    }

    /// Get a description of the quality level
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent quality, very satisfied",
            Self::Good => "Good quality, satisfied",
            Self::Fair => "Fair quality, some users dissatisfied",
            Self::Poor => "Poor quality, many users dissatisfied",
            Self::Bad => "Bad quality, nearly all users dissatisfied",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Bad => "bad",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mos_boundaries() {
        assert_eq!(QualityLevel::from_mos(4.5), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_mos(4.3), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_mos(4.29), QualityLevel::Good);
        assert_eq!(QualityLevel::from_mos(3.6), QualityLevel::Fair);
        assert_eq!(QualityLevel::from_mos(3.1), QualityLevel::Poor);
        assert_eq!(QualityLevel::from_mos(1.0), QualityLevel::Bad);
    }

    #[test]
    fn test_from_r_factor() {
        assert_eq!(QualityLevel::from_r_factor(93.2), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_r_factor(75.0), QualityLevel::Fair);
        assert_eq!(QualityLevel::from_r_factor(10.0), QualityLevel::Bad);
    }

    #[test]
    fn test_display() {
        assert_eq!(QualityLevel::Good.to_string(), "good");
        assert!(QualityLevel::Bad.description().starts_with("Bad"));
    }
}
