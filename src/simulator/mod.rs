// src/simulator/mod.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::error::{MonitorError, MonitorResult};
use crate::monitor::clock::{Clock, SystemClock};
use crate::types::TransactionRecord;

/// Bounds for the synthetic record draws.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Record timestamps lag "now" by up to this many ms.
    pub max_timestamp_skew_ms: i64,
    /// Block heights are drawn below this bound.
    pub max_block_height: u64,
    /// Latencies are drawn below this bound, in ms.
    pub max_latency_ms: f64,
    /// Node ids are drawn from "Node-0" .. "Node-{pool_size-1}".
    pub node_pool_size: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_timestamp_skew_ms: 1_200,
            max_block_height: 100_000,
            max_latency_ms: 3_000.0,
            node_pool_size: 100,
        }
    }
}

/// Fabricates transaction records for demonstration runs.
///
/// Synthetic records are drawn fresh per call; the simulator keeps no state
/// beyond a generation counter.
pub struct RecordSimulator {
    config: SimulatorConfig,
    clock: Arc<dyn Clock>,
    generated: AtomicU64,
}

impl RecordSimulator {
    pub fn new(config: SimulatorConfig) -> MonitorResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SimulatorConfig, clock: Arc<dyn Clock>) -> MonitorResult<Self> {
        if config.max_timestamp_skew_ms <= 0 {
            return Err(MonitorError::InvalidConfiguration(format!(
                "max_timestamp_skew_ms must be positive, got {}",
                config.max_timestamp_skew_ms
            )));
        }
        if config.max_block_height == 0 || config.node_pool_size == 0 {
            return Err(MonitorError::InvalidConfiguration(
                "max_block_height and node_pool_size must be positive".to_string(),
            ));
        }
        if config.max_latency_ms <= 0.0 {
            return Err(MonitorError::InvalidConfiguration(format!(
                "max_latency_ms must be positive, got {}",
                config.max_latency_ms
            )));
        }

        Ok(Self {
            config,
            clock,
            generated: AtomicU64::new(0),
        })
    }

    /// Draw one synthetic record.
    pub fn generate(&self) -> TransactionRecord {
        let mut rng = rand::thread_rng();
        let now_ms = self.clock.now_ms();

        let record = TransactionRecord {
            timestamp_ms: now_ms - rng.gen_range(0..self.config.max_timestamp_skew_ms),
            block_height: rng.gen_range(0..self.config.max_block_height),
            latency_ms: rng.gen_range(0.0..self.config.max_latency_ms),
            node_id: format!("Node-{}", rng.gen_range(0..self.config.node_pool_size)),
        };

        let count = self.generated.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Generated synthetic record #{} from {}", count, record.node_id);

        record
    }

    /// Draw a batch of synthetic records.
    pub fn generate_batch(&self, count: usize) -> Vec<TransactionRecord> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Total records generated by this simulator.
    pub fn generated_count(&self) -> u64 {
        self.generated.load(Ordering::SeqCst)
    }
}
