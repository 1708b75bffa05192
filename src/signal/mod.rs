// src/signal/mod.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MonitorError, MonitorResult};
use crate::monitor::clock::{Clock, SystemClock};

/// One timestamped sample in a signal buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

/// Coarse shape classification of an accumulated signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalPattern {
    /// High mean, low volatility.
    StableHigh,
    /// Low mean, high volatility.
    VolatileLow,
    Normal,
}

/// Aggregate statistics over a signal buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSummary {
    pub mean: f64,
    pub std: f64,
    pub max: f64,
    pub min: f64,
}

/// Accumulates a time series of observed values and derives statistics
/// over it.
///
/// The buffer is append-only except for [`normalize`](Self::normalize),
/// which rescales values in place, and [`from_json`](Self::from_json),
/// which replaces it wholesale.
pub struct SignalProcessor {
    signal_id: Uuid,
    buffer: Vec<DataPoint>,
    clock: Arc<dyn Clock>,
}

impl SignalProcessor {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            signal_id: Uuid::new_v4(),
            buffer: Vec::new(),
            clock,
        }
    }

    pub fn signal_id(&self) -> Uuid {
        self.signal_id
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.buffer.iter().map(|dp| dp.value).collect()
    }

    /// Append a sample stamped with the current clock instant.
    pub fn ingest(&mut self, value: f64) {
        let timestamp_ms = self.clock.now_ms();
        self.ingest_at(value, timestamp_ms);
    }

    /// Append a sample with an explicit timestamp.
    pub fn ingest_at(&mut self, value: f64, timestamp_ms: i64) {
        self.buffer.push(DataPoint {
            timestamp_ms,
            value,
        });
    }

    /// Population standard deviation of the buffered values.
    pub fn volatility(&self) -> MonitorResult<f64> {
        if self.buffer.is_empty() {
            return Err(MonitorError::EmptySignal);
        }
        let mean = self.mean();
        let variance = self
            .buffer
            .iter()
            .map(|dp| (dp.value - mean).powi(2))
            .sum::<f64>()
            / self.buffer.len() as f64;
        Ok(variance.sqrt())
    }

    /// Classify the buffered signal by its mean and volatility.
    pub fn classify_pattern(&self) -> MonitorResult<SignalPattern> {
        if self.buffer.is_empty() {
            return Err(MonitorError::EmptySignal);
        }
        let mean = self.mean();
        let volatility = self.volatility()?;

        let pattern = if mean > 100.0 && volatility < 5.0 {
            SignalPattern::StableHigh
        } else if mean < 10.0 && volatility > 20.0 {
            SignalPattern::VolatileLow
        } else {
            SignalPattern::Normal
        };
        Ok(pattern)
    }

    /// Min-max rescale all buffered values into [0, 1] in place.
    ///
    /// A constant series maps every sample to 0.5.
    pub fn normalize(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let min = self.fold_values(f64::INFINITY, f64::min);
        let max = self.fold_values(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        for dp in &mut self.buffer {
            dp.value = if range == 0.0 {
                0.5
            } else {
                (dp.value - min) / range
            };
        }
    }

    /// Element-wise difference against a reference series over the common
    /// prefix. Empty if either side is empty.
    pub fn align_with_reference(&self, reference: &[f64]) -> Vec<f64> {
        if self.buffer.is_empty() || reference.is_empty() {
            return Vec::new();
        }
        self.buffer
            .iter()
            .zip(reference)
            .map(|(dp, r)| dp.value - r)
            .collect()
    }

    /// Mean, standard deviation, and extrema of the buffered values.
    pub fn summary(&self) -> MonitorResult<SignalSummary> {
        if self.buffer.is_empty() {
            return Err(MonitorError::EmptySignal);
        }
        Ok(SignalSummary {
            mean: self.mean(),
            std: self.volatility()?,
            max: self.fold_values(f64::NEG_INFINITY, f64::max),
            min: self.fold_values(f64::INFINITY, f64::min),
        })
    }

    /// 64-bit hex digest of the value sum plus volatility.
    pub fn signature(&self) -> MonitorResult<String> {
        let total: f64 = self.buffer.iter().map(|dp| dp.value).sum();
        let raw = ((total + self.volatility()?) * 1_000_000.0) as i128;
        Ok(format!("{:#x}", raw.rem_euclid(1_i128 << 64)))
    }

    /// Hex digest of the offset-shifted value sum, modulo 10^12.
    pub fn shifted_signature(&self, offset: f64) -> MonitorResult<String> {
        if self.buffer.is_empty() {
            return Err(MonitorError::EmptySignal);
        }
        let total: f64 = self.buffer.iter().map(|dp| dp.value + offset).sum();
        let raw = (total * 100_000.0) as i128;
        Ok(format!("{:#x}", raw.rem_euclid(1_000_000_000_000)))
    }

    /// Sample-adjusted skewness of the buffered values.
    ///
    /// A constant series has zero skewness.
    pub fn skewness(&self) -> MonitorResult<f64> {
        let n = self.buffer.len();
        if n < 3 {
            return Err(MonitorError::InsufficientData { needed: 3, actual: n });
        }
        let mean = self.mean();
        let m2 = self.central_moment(mean, 2);
        let m3 = self.central_moment(mean, 3);
        if m2 == 0.0 {
            return Ok(0.0);
        }
        let g1 = m3 / m2.powf(1.5);
        let n = n as f64;
        Ok(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
    }

    /// Sample-adjusted excess kurtosis of the buffered values.
    ///
    /// A constant series has zero kurtosis.
    pub fn kurtosis(&self) -> MonitorResult<f64> {
        let len = self.buffer.len();
        if len < 4 {
            return Err(MonitorError::InsufficientData { needed: 4, actual: len });
        }
        let mean = self.mean();
        let n = len as f64;
        let s2 = self
            .buffer
            .iter()
            .map(|dp| (dp.value - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        if s2 == 0.0 {
            return Ok(0.0);
        }
        let m4: f64 = self
            .buffer
            .iter()
            .map(|dp| (dp.value - mean).powi(4))
            .sum();
        let lead = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
        let tail = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
        Ok(lead * m4 / s2.powi(2) - tail)
    }

    /// Average per-sample change between the first and last values.
    /// Zero below two samples.
    pub fn rate_of_change(&self) -> f64 {
        if self.buffer.len() < 2 {
            return 0.0;
        }
        let first = self.buffer[0].value;
        let last = self.buffer[self.buffer.len() - 1].value;
        (last - first) / self.buffer.len() as f64
    }

    /// Export the buffer as JSON.
    pub fn to_json(&self) -> MonitorResult<String> {
        Ok(serde_json::to_string(&self.buffer)?)
    }

    /// Replace the buffer from a JSON export.
    pub fn from_json(&mut self, json: &str) -> MonitorResult<()> {
        self.buffer = serde_json::from_str(json)?;
        Ok(())
    }

    fn mean(&self) -> f64 {
        self.buffer.iter().map(|dp| dp.value).sum::<f64>() / self.buffer.len() as f64
    }

    fn central_moment(&self, mean: f64, order: i32) -> f64 {
        self.buffer
            .iter()
            .map(|dp| (dp.value - mean).powi(order))
            .sum::<f64>()
            / self.buffer.len() as f64
    }

    fn fold_values(&self, init: f64, f: impl Fn(f64, f64) -> f64) -> f64 {
        self.buffer.iter().map(|dp| dp.value).fold(init, f)
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor_with(values: &[f64]) -> SignalProcessor {
        let mut processor = SignalProcessor::new();
        for (i, v) in values.iter().enumerate() {
            processor.ingest_at(*v, i as i64);
        }
        processor
    }

    #[test]
    fn volatility_is_population_std() {
        let processor = processor_with(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let vol = processor.volatility().unwrap();
        assert!((vol - 2.0).abs() < 1e-9);
    }

    #[test]
    fn statistics_over_empty_buffer_fail() {
        let processor = SignalProcessor::new();
        assert!(matches!(processor.volatility(), Err(MonitorError::EmptySignal)));
        assert!(matches!(processor.summary(), Err(MonitorError::EmptySignal)));
        assert!(matches!(
            processor.classify_pattern(),
            Err(MonitorError::EmptySignal)
        ));
    }

    #[test]
    fn pattern_classification() {
        let stable_high = processor_with(&[200.0, 201.0, 199.0, 200.0]);
        assert_eq!(
            stable_high.classify_pattern().unwrap(),
            SignalPattern::StableHigh
        );

        let volatile_low = processor_with(&[-30.0, 30.0, 0.0]);
        assert_eq!(
            volatile_low.classify_pattern().unwrap(),
            SignalPattern::VolatileLow
        );

        let normal = processor_with(&[10.0, 12.0]);
        assert_eq!(normal.classify_pattern().unwrap(), SignalPattern::Normal);
    }

    #[test]
    fn normalize_rescales_into_unit_range() {
        let mut processor = processor_with(&[0.0, 5.0, 10.0]);
        processor.normalize();
        assert_eq!(processor.values(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn normalize_maps_constant_series_to_midpoint() {
        let mut processor = processor_with(&[7.0, 7.0, 7.0]);
        processor.normalize();
        assert_eq!(processor.values(), vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn alignment_uses_common_prefix() {
        let processor = processor_with(&[5.0, 6.0, 7.0]);
        assert_eq!(processor.align_with_reference(&[1.0, 1.0]), vec![4.0, 5.0]);
        assert!(processor.align_with_reference(&[]).is_empty());
    }

    #[test]
    fn summary_reports_extrema() {
        let processor = processor_with(&[3.0, 1.0, 2.0]);
        let summary = processor.summary().unwrap();
        assert!((summary.mean - 2.0).abs() < 1e-9);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.min, 1.0);
    }

    #[test]
    fn signatures_are_stable_hex() {
        let processor = processor_with(&[1.0, 2.0, 3.0]);
        let sig = processor.signature().unwrap();
        assert!(sig.starts_with("0x"));
        assert_eq!(sig, processor.signature().unwrap());

        let shifted = processor.shifted_signature(1.0).unwrap();
        assert!(shifted.starts_with("0x"));
        assert_ne!(sig, shifted);
    }

    #[test]
    fn skewness_of_symmetric_series_is_zero() {
        let processor = processor_with(&[1.0, 2.0, 3.0]);
        assert!(processor.skewness().unwrap().abs() < 1e-9);

        let too_short = processor_with(&[1.0, 2.0]);
        assert!(matches!(
            too_short.skewness(),
            Err(MonitorError::InsufficientData { needed: 3, actual: 2 })
        ));
    }

    #[test]
    fn kurtosis_matches_sample_adjusted_formula() {
        let processor = processor_with(&[1.0, 2.0, 3.0, 4.0]);
        let kurt = processor.kurtosis().unwrap();
        assert!((kurt - (-1.2)).abs() < 1e-9);

        let too_short = processor_with(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            too_short.kurtosis(),
            Err(MonitorError::InsufficientData { needed: 4, actual: 3 })
        ));
    }

    #[test]
    fn rate_of_change_spans_first_to_last() {
        let processor = processor_with(&[10.0, 15.0, 20.0]);
        assert!((processor.rate_of_change() - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(processor_with(&[10.0]).rate_of_change(), 0.0);
    }

    #[test]
    fn buffer_round_trips_through_json() {
        let processor = processor_with(&[1.5, 2.5]);
        let json = processor.to_json().unwrap();

        let mut restored = SignalProcessor::new();
        restored.from_json(&json).unwrap();
        assert_eq!(restored.values(), vec![1.5, 2.5]);
    }
}
