use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use landlord_core::AppInfo;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the background writer alive; drop it to flush.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Installs a JSON subscriber writing `telemetry.jsonl` beside the round log.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_path(&outputs.jsonl);
    if let Some(dir) = telemetry_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    }
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;
    let (writer, guard) = NonBlockingBuilder::default().lossy(false).finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter_for(logging))
        .json()
        .with_current_span(false)
        .with_writer(writer)
        .finish();

    // Tests may have installed one already.
    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::info!(
        target: "landlord_sim::run",
        run_id,
        app = AppInfo::name(),
        version = AppInfo::version(),
        "structured logging enabled"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

fn telemetry_path(jsonl: &Path) -> PathBuf {
    match jsonl.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(TELEMETRY_FILE),
        _ => PathBuf::from(TELEMETRY_FILE),
    }
}

fn filter_for(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = logging.level().unwrap_or(Level::INFO);
        EnvFilter::new(level.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::telemetry_path;
    use std::path::{Path, PathBuf};

    #[test]
    fn telemetry_sits_beside_the_round_log() {
        assert_eq!(
            telemetry_path(Path::new("sim/out/run/rounds.jsonl")),
            PathBuf::from("sim/out/run/telemetry.jsonl")
        );
        assert_eq!(
            telemetry_path(Path::new("rounds.jsonl")),
            PathBuf::from("telemetry.jsonl")
        );
    }
}
