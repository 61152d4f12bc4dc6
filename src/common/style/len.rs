use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::unit::{EMUS_PER_CM, EMUS_PER_INCH, EMUS_PER_PT};

/// Length measurement with units.
///
/// Stored in EMUs (English Metric Units), the native unit of slide geometry.
///
/// # Examples
///
/// ```rust
/// use pptx_tools::common::Length;
///
/// let length = Length::from_inches(1.0);
/// assert_eq!(length.emus(), 914400);
/// assert_eq!(length.points(), 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length {
    emus: i64,
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self::from_emus(0);

    /// Create a length from EMUs.
    ///
    /// - 1 inch = 914,400 EMUs
    /// - 1 cm = 360,000 EMUs
    /// - 1 pt = 12,700 EMUs
    #[inline]
    pub const fn from_emus(emus: i64) -> Self {
        Self { emus }
    }

    /// Create a length from inches.
    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self {
            emus: (inches * EMUS_PER_INCH as f64).round() as i64,
        }
    }

    /// Create a length from centimeters.
    #[inline]
    pub fn from_cm(cm: f64) -> Self {
        Self {
            emus: (cm * EMUS_PER_CM as f64).round() as i64,
        }
    }

    /// Create a length from points (1/72 inch).
    #[inline]
    pub fn from_points(pt: f64) -> Self {
        Self {
            emus: (pt * EMUS_PER_PT as f64).round() as i64,
        }
    }

    /// Get the value in EMUs.
    #[inline]
    pub const fn emus(&self) -> i64 {
        self.emus
    }

    /// Convert to inches.
    #[inline]
    pub fn inches(&self) -> f64 {
        self.emus as f64 / EMUS_PER_INCH as f64
    }

    /// Convert to centimeters.
    #[inline]
    pub fn cm(&self) -> f64 {
        self.emus as f64 / EMUS_PER_CM as f64
    }

    /// Convert to points (1/72 inch).
    #[inline]
    pub fn points(&self) -> f64 {
        self.emus as f64 / EMUS_PER_PT as f64
    }

    /// Scale by a factor, rounding to the nearest EMU.
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            emus: (self.emus as f64 * factor).round() as i64,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\"", self.inches())
    }
}
