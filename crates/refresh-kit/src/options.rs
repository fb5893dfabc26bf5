//! Tunable constants for both trigger machines

use std::fmt;
use std::time::Duration;

/// Leading-edge (pull-to-refresh) tuning
#[derive(Clone, Debug, PartialEq)]
pub struct PullToRefreshOptions {
    /// Space above and below the indicator while it rests in the inset
    pub margin: f64,
    /// Pull distance ignored before progress is reported
    pub trigger_slop: f64,
    /// Full progress is reached after `viewport_height / progress_divisor`
    pub progress_divisor: f64,
    /// Animation hint for restoring the inset after refreshing ends
    pub restore_duration: Duration,
}

impl Default for PullToRefreshOptions {
    fn default() -> Self {
        Self {
            margin: 8.0,
            trigger_slop: 1.0,
            progress_divisor: 6.0,
            restore_duration: Duration::from_millis(200),
        }
    }
}

/// Trailing-edge (pagination) tuning
#[derive(Clone, Debug, PartialEq)]
pub struct PaginationOptions {
    /// Space between the end of content and the indicator, and below it
    pub margin: f64,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self { margin: 16.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefreshOptions {
    pub leading: PullToRefreshOptions,
    pub trailing: PaginationOptions,
}

impl RefreshOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_length("leading.margin", self.leading.margin)?;
        check_length("leading.trigger_slop", self.leading.trigger_slop)?;
        check_length("trailing.margin", self.trailing.margin)?;
        let divisor = self.leading.progress_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(OptionsError::NonPositiveDivisor(divisor));
        }
        Ok(())
    }
}

fn check_length(field: &'static str, value: f64) -> Result<(), OptionsError> {
    if !value.is_finite() {
        return Err(OptionsError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(OptionsError::Negative { field, value });
    }
    Ok(())
}

/// Rejected configuration
#[derive(Clone, Debug, PartialEq)]
pub enum OptionsError {
    NotFinite { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    NonPositiveDivisor(f64),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::NotFinite { field, value } => write!(f, "{} must be finite, got {}", field, value),
            OptionsError::Negative { field, value } => write!(f, "{} must not be negative, got {}", field, value),
            OptionsError::NonPositiveDivisor(value) => {
                write!(f, "leading.progress_divisor must be positive, got {}", value)
            }
        }
    }
}

impl std::error::Error for OptionsError {}
