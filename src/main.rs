// src/main.rs
use std::time::Duration;

use anyhow::Result;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chronium_monitor::{
    HealthReport, MonitorConfig, MonitorSession, NodeHealthStatus, PrecisionStatus,
    SimulatorConfig, TimeSyncStatus,
};

const DEMO_CYCLES: usize = 20;

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry()?;

    let mut session = MonitorSession::new(MonitorConfig::default(), SimulatorConfig::default())?;
    tracing::info!("Starting node health demo: {} cycles", DEMO_CYCLES);

    for _ in 0..DEMO_CYCLES {
        let report = session.run_cycle();
        print_report(&report);

        // brief jitter between cycles so the feed reads like live telemetry
        let pause = fastrand::u64(20..120);
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }

    let summary = session.session_summary()?;
    println!(
        "📊 Session: {} cycles | latency mean {:.1} ms, std {:.1} ms, range {:.0}-{:.0} ms | trend: {}",
        summary.cycles,
        summary.latency.mean,
        summary.latency.std,
        summary.latency.min,
        summary.latency.max,
        summary.latency_trend,
    );

    Ok(())
}

fn print_report(report: &HealthReport) {
    println!("=== Analysis Start ===");
    println!("{} {}", mark(report.time_sync == TimeSyncStatus::Valid), report.time_sync);
    println!(
        "{} {}",
        mark(report.precision == PrecisionStatus::HighPrecision),
        report.precision
    );
    println!("ℹ️ {}", report.block_sync);
    match report.node_health {
        NodeHealthStatus::Healthy => println!("✅ Node {} Healthy", report.node_id),
        NodeHealthStatus::Unstable => println!("⚠️ Node {} Unstable", report.node_id),
    }
    println!("=== Analysis End ===\n");
}

fn mark(ok: bool) -> &'static str {
    if ok { "✔️" } else { "⚠️" }
}

fn init_telemetry() -> Result<()> {
    // route the library's log records into tracing
    LogTracer::init()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chronium_monitor=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
