// src/main.rs

use anyhow::{Context, Result};
use debris_avoidance::pipeline::{
    PipelineMetrics, SessionSummary, TelemetrySnapshot, TrackingSession,
};
use debris_avoidance::replay::{find_replay_files, ReplaySource};
use debris_avoidance::types::Config;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.yaml";

struct ReplayOutcome {
    path: PathBuf,
    summary: SessionSummary,
    telemetry: TelemetrySnapshot,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_found = Path::new(CONFIG_PATH).exists();
    let config = if config_found {
        Config::load(CONFIG_PATH)?
    } else {
        Config::default()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("debris_avoidance={}", config.logging.level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🛰️  Debris Avoidance Engine Starting");
    if config_found {
        info!("✓ Configuration loaded from {}", CONFIG_PATH);
    } else {
        warn!("{} not found, using built-in defaults", CONFIG_PATH);
    }
    info!(
        "Thresholds: confidence>={:.2}, ratio=[{:.2}, {:.2}], lookahead={} frames, exclusion={:.0}px, growth>{:.2}",
        config.detection.confidence_min,
        config.detection.ratio_min,
        config.detection.ratio_max,
        config.prediction.lookahead_frames,
        config.prediction.exclusion_radius,
        config.prediction.growth_threshold
    );

    let replay_files = find_replay_files(&config.replay)?;
    if replay_files.is_empty() {
        error!("No replay files found in {}", config.replay.input_dir);
        return Ok(());
    }

    // One independent session per stream; only the counters are shared
    let metrics = PipelineMetrics::new();
    let mut handles = Vec::with_capacity(replay_files.len());
    for path in replay_files {
        let config = config.clone();
        let metrics = metrics.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            run_replay(path, &config, metrics)
        }));
    }

    for handle in handles {
        match handle.await {
            Ok(Ok(outcome)) => {
                report(&outcome);
                if config.replay.write_telemetry {
                    let stem = outcome
                        .path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("session");
                    let out_path = Path::new(&config.replay.output_dir)
                        .join(format!("{}_telemetry.json", stem));
                    if let Err(e) = write_json(&out_path, &outcome.telemetry) {
                        error!("Failed to write telemetry: {:#}", e);
                    }
                }
            }
            Ok(Err(e)) => error!("Failed to process replay: {:#}", e),
            Err(e) => error!("Replay task aborted: {}", e),
        }
    }

    let summary = metrics.summary();
    info!("\n========================================");
    info!("  Total frames: {}", summary.total_frames);
    info!(
        "  Frames with target: {} ({:.1}%)",
        summary.frames_with_target,
        100.0 * summary.frames_with_target as f64 / summary.total_frames.max(1) as f64
    );
    info!("  ⚠️  Collision-course frames: {}", summary.collision_course_frames);
    info!("  Intersect (safe) frames: {}", summary.intersect_safe_frames);
    info!(
        "  Status transitions: {} ({} critical)",
        summary.status_transitions, summary.critical_transitions
    );
    if summary.detector_failures > 0 {
        warn!("  Detector failures: {}", summary.detector_failures);
    }
    info!("  Processing speed: {:.1} FPS", summary.fps);

    if config.replay.write_telemetry {
        let out_path = Path::new(&config.replay.output_dir).join("metrics.json");
        write_json(&out_path, &summary)?;
    }

    Ok(())
}

fn run_replay(path: PathBuf, config: &Config, metrics: PipelineMetrics) -> Result<ReplayOutcome> {
    let mut source = ReplaySource::open(&path)?;
    let mut session = TrackingSession::new(config, metrics);
    let summary = session.run(&mut source);
    Ok(ReplayOutcome {
        path,
        summary,
        telemetry: session.telemetry(),
    })
}

fn report(outcome: &ReplayOutcome) {
    let s = &outcome.summary;
    info!("✓ {} [{}]", outcome.path.display(), s.session_id);
    info!(
        "  Frames: {} | with target: {} | collision course: {} | transitions: {}",
        s.frames, s.frames_with_target, s.collision_course_frames, s.transitions
    );
    info!(
        "  Final status: {} | maneuver: {} | Δv: {}",
        outcome.telemetry.system_status, outcome.telemetry.maneuver, outcome.telemetry.delta_v
    );
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    info!("Wrote {}", path.display());
    Ok(())
}
