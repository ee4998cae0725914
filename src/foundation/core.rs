use std::{fmt, str::FromStr};

use crate::foundation::error::{BillboardError, BillboardResult};

pub use kurbo::{Point, Rect, Vec2};

/// Lighting regime of the billboard photo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Daylight: depth is simulated as atmospheric haze.
    #[default]
    Day,
    /// Night: depth is simulated as a top-down spotlight falloff.
    Night,
}

impl TimeOfDay {
    /// Stable lowercase name (`"day"` or `"night"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = BillboardError;

    fn from_str(s: &str) -> BillboardResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            other => Err(BillboardError::config(format!(
                "time of day must be 'day' or 'night', got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
