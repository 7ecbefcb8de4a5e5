//! Interval length: the user-configured recurring duration between alerts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A non-negative number of minutes.
///
/// Constructed only through [`IntervalLength::new`], which rejects negative
/// and non-finite values. Zero is a valid length but disables starting the
/// countdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalLength(f64);

impl IntervalLength {
    pub fn new(minutes: f64) -> Result<Self, ValidationError> {
        if !minutes.is_finite() {
            return Err(ValidationError::InvalidInterval {
                value: minutes.to_string(),
                message: "must be a finite number".into(),
            });
        }
        if minutes < 0.0 {
            return Err(ValidationError::InvalidInterval {
                value: minutes.to_string(),
                message: "must not be negative".into(),
            });
        }
        Ok(Self(minutes))
    }

    /// A zero-length interval (countdown disabled).
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn minutes(&self) -> f64 {
        self.0
    }

    /// Whole-second equivalent, rounded to nearest.
    ///
    /// All countdown arithmetic works in whole seconds; the display and the
    /// target timestamp both derive from this value.
    pub fn as_secs(&self) -> u64 {
        (self.0 * 60.0).round() as u64
    }

    /// True when the length rounds to zero whole seconds.
    ///
    /// Such a length cannot drive a countdown: the target would land on (or
    /// before) the current tick.
    pub fn is_zero(&self) -> bool {
        self.as_secs() == 0
    }
}

/// Whole minutes render without decimals, fractional ones with a single
/// decimal place ("30", "0.5"). Matches the notification body wording.
impl fmt::Display for IntervalLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as u64)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

impl FromStr for IntervalLength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes: f64 = s.trim().parse().map_err(|_| ValidationError::InvalidInterval {
            value: s.to_string(),
            message: "not a number".into(),
        })?;
        Self::new(minutes)
    }
}
