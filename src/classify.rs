//! AQI severity classification.
//!
//! Maps a numeric air quality index onto one of five severity bands. Upper bounds
//! are inclusive, so 50, 100, 200 and 300 belong to the lower band.

use serde::Serialize;
use serde_json::Value;
use strum_macros::EnumIter as EnumIterMacro;

/// Severity band for an AQI reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "kebab-case")]
pub enum AqiCategory {
    /// 50 and below
    Good,
    /// 51 to 100
    Moderate,
    /// 101 to 200
    Poor,
    /// 201 to 300
    VeryPoor,
    /// Above 300
    Severe,
    /// The provider did not report a number
    Unknown,
}

// Inclusive upper bounds of each band, in order
const GOOD_MAX: i64 = 50;
const MODERATE_MAX: i64 = 100;
const POOR_MAX: i64 = 200;
const VERY_POOR_MAX: i64 = 300;

/// Classifies a numeric AQI. Total over `i64`; negative values are `Good`.
pub fn classify(aqi: i64) -> AqiCategory {
    if aqi <= GOOD_MAX {
        AqiCategory::Good
    } else if aqi <= MODERATE_MAX {
        AqiCategory::Moderate
    } else if aqi <= POOR_MAX {
        AqiCategory::Poor
    } else if aqi <= VERY_POOR_MAX {
        AqiCategory::VeryPoor
    } else {
        AqiCategory::Severe
    }
}

/// Classifies an optional reading; `None` (non-numeric upstream value) is `Unknown`.
pub fn classify_value(aqi: Option<i64>) -> AqiCategory {
    aqi.map(classify).unwrap_or(AqiCategory::Unknown)
}

/// Reads an AQI out of a loosely typed provider value.
///
/// WAQI reports `"-"` for stations without a current reading; that and any other
/// non-numeric value yield `None`. Floats are rounded and numeric strings parsed.
pub fn aqi_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Classifies free text, e.g. a value typed by hand or read from a log.
pub fn classify_str(raw: &str) -> AqiCategory {
    classify_value(raw.trim().parse().ok())
}

impl AqiCategory {
    /// Classifies a raw provider value; see [`aqi_from_value`].
    pub fn from_raw(raw: &Value) -> Self {
        classify_value(aqi_from_value(raw))
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
            AqiCategory::Unknown => "Unknown",
        }
    }

    /// CSS class used by the HTML page. Empty for `Unknown`.
    pub fn severity_class(&self) -> &'static str {
        match self {
            AqiCategory::Good => "good",
            AqiCategory::Moderate => "moderate",
            AqiCategory::Poor => "poor",
            AqiCategory::VeryPoor => "very-poor",
            AqiCategory::Severe => "severe",
            AqiCategory::Unknown => "",
        }
    }

    /// Emoji shown next to the label. Empty for `Unknown`.
    pub fn emoji(&self) -> &'static str {
        match self {
            AqiCategory::Good => "😊",
            AqiCategory::Moderate => "🙂",
            AqiCategory::Poor => "😷",
            AqiCategory::VeryPoor => "🤢",
            AqiCategory::Severe => "☠️",
            AqiCategory::Unknown => "",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
