// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One transaction-like observation from a node.
///
/// Records are immutable once constructed and carry no identity beyond the
/// evaluation call they are passed into. Negative `latency_ms` is accepted
/// but meaningless; no field is validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Epoch milliseconds of when the transaction/observation occurred.
    pub timestamp_ms: i64,
    /// Position in the chain.
    pub block_height: u64,
    /// Observed latency in milliseconds.
    pub latency_ms: f64,
    /// Short node identifier, e.g. "Node-17".
    pub node_id: String,
}

/// Timestamp drift classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSyncStatus {
    Valid,
    DriftDetected,
}

impl fmt::Display for TimeSyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSyncStatus::Valid => write!(f, "Time Sync Valid"),
            TimeSyncStatus::DriftDetected => write!(f, "Timestamp Drift Detected"),
        }
    }
}

/// Timestamp precision classification, a tighter bound than drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecisionStatus {
    HighPrecision,
    PrecisionError,
}

impl fmt::Display for PrecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionStatus::HighPrecision => write!(f, "High Precision OK"),
            PrecisionStatus::PrecisionError => write!(f, "Precision Error"),
        }
    }
}

/// Block checkpoint classification. Checkpoint blocks are heights that are
/// multiples of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockSyncStatus {
    CheckpointVerified,
    NormalBlock,
}

impl fmt::Display for BlockSyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockSyncStatus::CheckpointVerified => write!(f, "Checkpoint Block Verified"),
            BlockSyncStatus::NormalBlock => write!(f, "Normal Block"),
        }
    }
}

/// Overall node health: low latency and a passing drift check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeHealthStatus {
    Healthy,
    Unstable,
}

impl fmt::Display for NodeHealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeHealthStatus::Healthy => write!(f, "Healthy"),
            NodeHealthStatus::Unstable => write!(f, "Unstable"),
        }
    }
}

/// All four verdicts for one record, evaluated against a single clock
/// instant (`evaluated_at_ms`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub node_id: String,
    pub evaluated_at_ms: i64,
    pub time_sync: TimeSyncStatus,
    pub precision: PrecisionStatus,
    pub block_sync: BlockSyncStatus,
    pub node_health: NodeHealthStatus,
}

/// Directed, weighted interaction edge between two wallets.
///
/// Data shape for wallet-interaction clustering. No analysis in this crate
/// consumes it; it exists for downstream graph tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletInteraction {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub timestamp_ms: i64,
}

/// Summary of one wallet cluster produced by graph analysis.
///
/// Companion shape to [`WalletInteraction`]; declared for downstream
/// consumers only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub cluster_id: u64,
    pub members: Vec<String>,
    pub centrality: f64,
    pub suspicious_score: f64,
}
