//! Conversion options.

use serde::{Deserialize, Serialize};

use crate::consts::{CHINA_STANDARD_OFFSET_MINUTES, DEFAULT_HOUR_SUFFIX};
use crate::types::TimeBasis;

/// Options for [`crate::convert_str`] and [`crate::convert_now`].
///
/// Deserializable from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Read instants on the UTC basis instead of the local fixed offset.
    pub utc: bool,
    /// Local offset east of UTC, in minutes.
    pub local_offset_minutes: i32,
    /// Suffix for two-hour period names.
    pub hour_suffix: String,
}

impl ConvertOptions {
    /// The basis used to turn instants into civil dates.
    pub const fn basis(&self) -> TimeBasis {
        if self.utc {
            TimeBasis::Utc
        } else {
            TimeBasis::FixedOffset(self.local_offset_minutes)
        }
    }

    #[must_use]
    pub fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            utc: false,
            local_offset_minutes: CHINA_STANDARD_OFFSET_MINUTES,
            hour_suffix: DEFAULT_HOUR_SUFFIX.to_owned(),
        }
    }
}
