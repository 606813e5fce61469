// Window settings - immutable engine configuration
use super::errors::EngineError;
use std::time::Duration;

pub const DEFAULT_TRANSITION_FRACTION: f64 = 0.95;

/// Validated, immutable engine settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    window_duration: f64,
    interval: Duration,
    transition_fraction: f64,
}

impl WindowSettings {
    pub fn new(
        window_duration: f64,
        interval: Duration,
        transition_fraction: f64,
    ) -> Result<Self, EngineError> {
        if !window_duration.is_finite() || window_duration <= 0.0 {
            return Err(EngineError::InvalidSettings(format!(
                "window duration must be finite and positive, got {}",
                window_duration
            )));
        }
        if interval.is_zero() {
            return Err(EngineError::InvalidSettings(
                "polling interval must be non-zero".to_string(),
            ));
        }
        if !(transition_fraction > 0.0 && transition_fraction <= 1.0) {
            return Err(EngineError::InvalidSettings(format!(
                "transition fraction must be in (0, 1], got {}",
                transition_fraction
            )));
        }

        Ok(Self {
            window_duration,
            interval,
            transition_fraction,
        })
    }

    pub fn window_duration(&self) -> f64 {
        self.window_duration
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval.as_secs_f64() * 1000.0
    }

    pub fn transition_fraction(&self) -> f64 {
        self.transition_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_settings() {
        let interval = Duration::from_millis(1000);
        assert!(WindowSettings::new(0.0, interval, 0.95).is_err());
        assert!(WindowSettings::new(f64::NAN, interval, 0.95).is_err());
        assert!(WindowSettings::new(30.0, Duration::ZERO, 0.95).is_err());
        assert!(WindowSettings::new(30.0, interval, 0.0).is_err());
        assert!(WindowSettings::new(30.0, interval, 1.5).is_err());
    }

    #[test]
    fn test_interval_ms() {
        let settings =
            WindowSettings::new(30.0, Duration::from_millis(250), DEFAULT_TRANSITION_FRACTION)
                .unwrap();
        assert_eq!(settings.interval_ms(), 250.0);
    }
}
