use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Dispatch parameters read from the head of the input.
///
/// Field names describe the role; the comments give the symbol used in the
/// input format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchParams {
    /// Vehicle seat capacity, the maximum group size (eta).
    pub capacity: usize,
    /// Vehicle speed in distance units per time unit (gama).
    pub speed: f64,
    /// Maximum request-time spread between a group's first member and a
    /// candidate (delta).
    pub max_time_window: f64,
    /// Maximum distance between any two origins in a group (alfa).
    pub max_origin_distance: f64,
    /// Maximum distance between any two destinations in a group (beta).
    pub max_destination_distance: f64,
    /// Minimum pooled efficiency required to admit a candidate (lambda).
    pub min_efficiency: f64,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            capacity: 4,
            speed: 1.0,
            max_time_window: f64::INFINITY,
            max_origin_distance: f64::INFINITY,
            max_destination_distance: f64::INFINITY,
            min_efficiency: 0.0,
        }
    }
}

impl DispatchParams {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_max_time_window(mut self, window: f64) -> Self {
        self.max_time_window = window;
        self
    }

    pub fn with_max_origin_distance(mut self, distance: f64) -> Self {
        self.max_origin_distance = distance;
        self
    }

    pub fn with_max_destination_distance(mut self, distance: f64) -> Self {
        self.max_destination_distance = distance;
        self
    }

    pub fn with_min_efficiency(mut self, efficiency: f64) -> Self {
        self.min_efficiency = efficiency;
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.capacity == 0 {
            return Err(InputError::InvalidParams(
                "vehicle capacity must be at least 1".into(),
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(InputError::InvalidParams(format!(
                "vehicle speed must be a positive number, got {}",
                self.speed
            )));
        }
        let thresholds = [
            ("time window", self.max_time_window),
            ("origin distance", self.max_origin_distance),
            ("destination distance", self.max_destination_distance),
            ("minimum efficiency", self.min_efficiency),
        ];
        if let Some((name, _)) = thresholds.iter().find(|(_, value)| value.is_nan()) {
            return Err(InputError::InvalidParams(format!("{name} is not a number")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(DispatchParams::default().validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let params = DispatchParams::default()
            .with_capacity(2)
            .with_speed(3.0)
            .with_max_time_window(10.0)
            .with_max_origin_distance(1.0)
            .with_max_destination_distance(2.0)
            .with_min_efficiency(0.5);
        assert_eq!(params.capacity, 2);
        assert_eq!(params.speed, 3.0);
        assert_eq!(params.max_time_window, 10.0);
        assert_eq!(params.max_origin_distance, 1.0);
        assert_eq!(params.max_destination_distance, 2.0);
        assert_eq!(params.min_efficiency, 0.5);
    }

    #[test]
    fn rejects_zero_capacity_and_bad_speed() {
        assert!(matches!(
            DispatchParams::default().with_capacity(0).validate(),
            Err(InputError::InvalidParams(_))
        ));
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                DispatchParams::default().with_speed(speed).validate().is_err(),
                "speed {speed} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_nan_thresholds() {
        let err = DispatchParams::default()
            .with_min_efficiency(f64::NAN)
            .validate()
            .expect_err("nan threshold");
        assert_eq!(
            err.to_string(),
            "invalid parameters: minimum efficiency is not a number"
        );
    }
}
