// src/forecast/mod.rs
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, MonitorResult};

/// Direction of a numeric sequence, judged from its gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Mixed,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "uptrend"),
            Trend::Downtrend => write!(f, "downtrend"),
            Trend::Mixed => write!(f, "mixed"),
        }
    }
}

/// Projects and classifies trends over a numeric sequence.
pub struct SequenceForecaster {
    data: Vec<f64>,
}

impl SequenceForecaster {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Extrapolate the last observed delta forward.
    /// Empty below two data points.
    pub fn linear_projection(&self, steps: usize) -> Vec<f64> {
        if self.data.len() < 2 {
            return Vec::new();
        }
        let last = self.data[self.data.len() - 1];
        let delta = last - self.data[self.data.len() - 2];
        (1..=steps).map(|i| last + delta * i as f64).collect()
    }

    /// Sliding-window mean. Empty when the window exceeds the data.
    pub fn rolling_average(&self, window: usize) -> MonitorResult<Vec<f64>> {
        if window == 0 {
            return Err(MonitorError::InvalidConfiguration(
                "rolling window must be positive".to_string(),
            ));
        }
        if self.data.len() < window {
            return Ok(Vec::new());
        }
        Ok(self
            .data
            .windows(window)
            .map(|w| w.iter().sum::<f64>() / window as f64)
            .collect())
    }

    /// Successive differences of the sequence.
    pub fn gradient(&self) -> Vec<f64> {
        self.data.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// A sequence is an uptrend/downtrend only when every step moves the
    /// same way; sequences too short to have a gradient are mixed.
    pub fn classify_trend(&self) -> Trend {
        let grad = self.gradient();
        if grad.is_empty() {
            return Trend::Mixed;
        }
        if grad.iter().all(|g| *g > 0.0) {
            Trend::Uptrend
        } else if grad.iter().all(|g| *g < 0.0) {
            Trend::Downtrend
        } else {
            Trend::Mixed
        }
    }

    /// Mean absolute gradient. Zero for sequences without one.
    pub fn trend_strength(&self) -> f64 {
        let grad = self.gradient();
        if grad.is_empty() {
            return 0.0;
        }
        grad.iter().map(|g| g.abs()).sum::<f64>() / grad.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_extends_last_delta() {
        let forecaster = SequenceForecaster::new(vec![1.0, 2.0]);
        assert_eq!(forecaster.linear_projection(3), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn projection_needs_two_points() {
        assert!(SequenceForecaster::new(vec![1.0]).linear_projection(5).is_empty());
    }

    #[test]
    fn rolling_average_slides_over_data() {
        let forecaster = SequenceForecaster::new(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            forecaster.rolling_average(2).unwrap(),
            vec![1.5, 2.5, 3.5]
        );
        assert!(forecaster.rolling_average(5).unwrap().is_empty());
        assert!(matches!(
            forecaster.rolling_average(0),
            Err(MonitorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn gradient_is_successive_differences() {
        let forecaster = SequenceForecaster::new(vec![1.0, 3.0, 6.0]);
        assert_eq!(forecaster.gradient(), vec![2.0, 3.0]);
    }

    #[test]
    fn trend_classification() {
        assert_eq!(
            SequenceForecaster::new(vec![1.0, 2.0, 3.0]).classify_trend(),
            Trend::Uptrend
        );
        assert_eq!(
            SequenceForecaster::new(vec![3.0, 2.0, 1.0]).classify_trend(),
            Trend::Downtrend
        );
        assert_eq!(
            SequenceForecaster::new(vec![1.0, 3.0, 2.0]).classify_trend(),
            Trend::Mixed
        );
        // flat steps break a monotone run
        assert_eq!(
            SequenceForecaster::new(vec![1.0, 1.0, 2.0]).classify_trend(),
            Trend::Mixed
        );
        assert_eq!(SequenceForecaster::new(vec![1.0]).classify_trend(), Trend::Mixed);
    }

    #[test]
    fn trend_strength_is_mean_absolute_gradient() {
        let forecaster = SequenceForecaster::new(vec![1.0, 3.0, 2.0]);
        assert!((forecaster.trend_strength() - 1.5).abs() < 1e-9);
        assert_eq!(SequenceForecaster::new(vec![]).trend_strength(), 0.0);
    }
}
