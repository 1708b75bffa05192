// src/monitor/mod.rs
pub mod clock;

use std::sync::Arc;

use crate::error::{MonitorError, MonitorResult};
use crate::types::{
    BlockSyncStatus, HealthReport, NodeHealthStatus, PrecisionStatus, TimeSyncStatus,
    TransactionRecord,
};
use self::clock::{Clock, SystemClock};

pub const DEFAULT_DRIFT_THRESHOLD_MS: i64 = 1_000;
pub const DEFAULT_PRECISION_MARGIN_MS: i64 = 300;
pub const DEFAULT_LATENCY_CAP_MS: f64 = 1_800.0;
/// Wider latency cap carried from an earlier tuning pass. Not the active
/// default; select it through [`MonitorConfig::latency_cap_ms`].
pub const EXTENDED_LATENCY_CAP_MS: f64 = 2_500.0;

/// Thresholds for the four health checks.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Max absolute timestamp drift before a record is flagged, in ms.
    pub drift_threshold_ms: i64,
    /// Max absolute timestamp error for the high-precision check, in ms.
    pub precision_margin_ms: i64,
    /// Latency below which a node counts as healthy, in ms.
    pub latency_cap_ms: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            drift_threshold_ms: DEFAULT_DRIFT_THRESHOLD_MS,
            precision_margin_ms: DEFAULT_PRECISION_MARGIN_MS,
            latency_cap_ms: DEFAULT_LATENCY_CAP_MS,
        }
    }
}

/// Classifies transaction records along four independent axes.
///
/// Stateless and memoryless across calls; every method is a pure function
/// of (record, clock instant, thresholds).
#[derive(Clone)]
pub struct ChroniumMonitor {
    config: MonitorConfig,
    clock: Arc<dyn Clock>,
}

impl ChroniumMonitor {
    /// Create a monitor on the system clock.
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a monitor with an injected clock.
    pub fn with_clock(config: MonitorConfig, clock: Arc<dyn Clock>) -> MonitorResult<Self> {
        if config.drift_threshold_ms <= 0 {
            return Err(MonitorError::InvalidConfiguration(format!(
                "drift_threshold_ms must be positive, got {}",
                config.drift_threshold_ms
            )));
        }
        if config.precision_margin_ms <= 0 {
            return Err(MonitorError::InvalidConfiguration(format!(
                "precision_margin_ms must be positive, got {}",
                config.precision_margin_ms
            )));
        }
        if config.latency_cap_ms <= 0.0 {
            return Err(MonitorError::InvalidConfiguration(format!(
                "latency_cap_ms must be positive, got {}",
                config.latency_cap_ms
            )));
        }

        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Check record timestamp drift against the drift threshold.
    ///
    /// Drift exactly at the threshold still passes; only strictly greater
    /// drift is flagged.
    pub fn chrono_align(&self, record: &TransactionRecord) -> TimeSyncStatus {
        self.chrono_align_at(record, self.clock.now_ms())
    }

    /// Check record timestamp error against the tighter precision margin.
    pub fn sync_scope(&self, record: &TransactionRecord) -> PrecisionStatus {
        self.sync_scope_at(record, self.clock.now_ms())
    }

    /// Classify the block height: multiples of five are checkpoint blocks.
    pub fn analyze_block_sync(&self, record: &TransactionRecord) -> BlockSyncStatus {
        if record.block_height % 5 == 0 {
            BlockSyncStatus::CheckpointVerified
        } else {
            BlockSyncStatus::NormalBlock
        }
    }

    /// A node is healthy when its latency is under the cap and its
    /// timestamp passes the drift check.
    pub fn node_health_check(&self, record: &TransactionRecord) -> NodeHealthStatus {
        self.node_health_check_at(record, self.clock.now_ms())
    }

    /// Run all four checks against a single clock read.
    pub fn evaluate(&self, record: &TransactionRecord) -> HealthReport {
        let now_ms = self.clock.now_ms();
        let report = HealthReport {
            node_id: record.node_id.clone(),
            evaluated_at_ms: now_ms,
            time_sync: self.chrono_align_at(record, now_ms),
            precision: self.sync_scope_at(record, now_ms),
            block_sync: self.analyze_block_sync(record),
            node_health: self.node_health_check_at(record, now_ms),
        };
        log::debug!(
            "Evaluated record from {}: time_sync={:?} precision={:?} block_sync={:?} health={:?}",
            report.node_id,
            report.time_sync,
            report.precision,
            report.block_sync,
            report.node_health,
        );
        report
    }

    fn chrono_align_at(&self, record: &TransactionRecord, now_ms: i64) -> TimeSyncStatus {
        let diff = (record.timestamp_ms - now_ms).abs();
        if diff > self.config.drift_threshold_ms {
            TimeSyncStatus::DriftDetected
        } else {
            TimeSyncStatus::Valid
        }
    }

    fn sync_scope_at(&self, record: &TransactionRecord, now_ms: i64) -> PrecisionStatus {
        let error = (record.timestamp_ms - now_ms).abs();
        if error > self.config.precision_margin_ms {
            PrecisionStatus::PrecisionError
        } else {
            PrecisionStatus::HighPrecision
        }
    }

    fn node_health_check_at(&self, record: &TransactionRecord, now_ms: i64) -> NodeHealthStatus {
        let low_latency = record.latency_ms < self.config.latency_cap_ms;
        if low_latency && self.chrono_align_at(record, now_ms) == TimeSyncStatus::Valid {
            NodeHealthStatus::Healthy
        } else {
            NodeHealthStatus::Unstable
        }
    }
}
