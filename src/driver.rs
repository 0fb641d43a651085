use crate::model::{LoadConfig, StopSignal};
use crate::worker;
use anyhow::ensure;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

fn seconds_to_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Run one bounded load generation pass: start `config.workers` workers,
/// let them hammer the target for `config.duration`, raise the stop
/// signal, then wait for every worker to exit before returning.
///
/// The only fallible paths are the worker-count check here and a worker
/// task dying at the runtime level (panic or cancellation); per-request
/// failures stay inside the workers.
pub async fn run(config: LoadConfig) -> anyhow::Result<()> {
    ensure!(config.workers > 0, "worker count must be positive");

    let config = Arc::new(config);
    let stop = StopSignal::new();
    let m = MultiProgress::new();

    let sty = ProgressStyle::with_template("{spinner} {elapsed_precise}/{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = m.add(ProgressBar::new_spinner());
    pb.set_style(sty);
    pb.set_message(seconds_to_hms(config.duration.as_secs()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut set = JoinSet::new();
    for rank in 0..config.workers {
        set.spawn(worker::worker_loop(
            rank,
            config.clone(),
            stop.clone(),
            m.clone(),
        ));
    }

    tokio::time::sleep(config.duration).await;
    stop.set();

    while let Some(res) = set.join_next().await {
        res?;
    }
    pb.finish_with_message("finished");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_rendering() {
        assert_eq!(seconds_to_hms(0), "00:00:00");
        assert_eq!(seconds_to_hms(120), "00:02:00");
        assert_eq!(seconds_to_hms(3725), "01:02:05");
    }
}
