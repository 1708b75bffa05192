// src/lib.rs
pub mod error;
pub mod forecast;
pub mod monitor;
pub mod signal;
pub mod simulator;
pub mod types;

pub use crate::error::{MonitorError, MonitorResult};
pub use crate::monitor::{ChroniumMonitor, MonitorConfig};
pub use crate::simulator::{RecordSimulator, SimulatorConfig};
pub use crate::types::*;

use std::sync::Arc;

use serde::Serialize;

use crate::forecast::{SequenceForecaster, Trend};
use crate::monitor::clock::{Clock, SystemClock};
use crate::signal::{SignalProcessor, SignalSummary};

/// One monitoring session: a synthetic record feed, the health evaluator,
/// and the latency signal accumulated across cycles.
pub struct MonitorSession {
    monitor: ChroniumMonitor,
    simulator: RecordSimulator,
    latency_signal: SignalProcessor,
    cycles: u64,
}

/// Cross-cycle view of a session's latency behavior.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub cycles: u64,
    pub latency: SignalSummary,
    pub latency_trend: Trend,
    pub projected_latency_ms: Vec<f64>,
}

impl MonitorSession {
    /// Create a session on the system clock.
    pub fn new(
        monitor_config: MonitorConfig,
        simulator_config: SimulatorConfig,
    ) -> MonitorResult<Self> {
        Self::with_clock(monitor_config, simulator_config, Arc::new(SystemClock))
    }

    /// Create a session with an injected clock shared by the evaluator,
    /// the simulator, and the latency signal.
    pub fn with_clock(
        monitor_config: MonitorConfig,
        simulator_config: SimulatorConfig,
        clock: Arc<dyn Clock>,
    ) -> MonitorResult<Self> {
        Ok(Self {
            monitor: ChroniumMonitor::with_clock(monitor_config, clock.clone())?,
            simulator: RecordSimulator::with_clock(simulator_config, clock.clone())?,
            latency_signal: SignalProcessor::with_clock(clock),
            cycles: 0,
        })
    }

    /// Generate one synthetic record and evaluate it.
    pub fn run_cycle(&mut self) -> HealthReport {
        let record = self.simulator.generate();
        self.evaluate_record(&record)
    }

    /// Evaluate a caller-supplied record, feeding its latency into the
    /// session's latency signal.
    pub fn evaluate_record(&mut self, record: &TransactionRecord) -> HealthReport {
        let report = self.monitor.evaluate(record);
        self.latency_signal
            .ingest_at(record.latency_ms, report.evaluated_at_ms);
        self.cycles += 1;

        log::info!(
            "Cycle {}: {} -> {} / {} / {} / {}",
            self.cycles,
            report.node_id,
            report.time_sync,
            report.precision,
            report.block_sync,
            report.node_health,
        );

        report
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn monitor(&self) -> &ChroniumMonitor {
        &self.monitor
    }

    pub fn latency_signal(&self) -> &SignalProcessor {
        &self.latency_signal
    }

    /// Summarize the latency signal observed so far, with a trend
    /// classification and a short projection.
    pub fn session_summary(&self) -> MonitorResult<SessionSummary> {
        let latency = self.latency_signal.summary()?;
        let forecaster = SequenceForecaster::new(self.latency_signal.values());

        Ok(SessionSummary {
            cycles: self.cycles,
            latency,
            latency_trend: forecaster.classify_trend(),
            projected_latency_ms: forecaster.linear_projection(5),
        })
    }
}
