use crate::model::{LoadConfig, RequestOutcome, StopSignal};
use chrono::Utc;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;

/// One worker: loop issuing GETs against `config.url` until `stop` is set.
///
/// The stop check happens at the top of each iteration, so a request
/// already in flight when the signal is raised completes normally. A
/// failed request is reported and the loop continues; nothing a single
/// request does can terminate the worker. Returns the number of attempts,
/// which the driver ignores.
pub async fn worker_loop(
    rank: usize,
    config: Arc<LoadConfig>,
    stop: StopSignal,
    m: MultiProgress,
) -> u64 {
    let client = reqwest::Client::new();

    let sty = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = m.add(ProgressBar::new_spinner());
    pb.set_style(sty);

    let mut attempts = 0;
    while !stop.is_set() {
        attempts += 1;

        let outcome = match client
            .get(&config.url)
            .headers(config.headers.clone())
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => RequestOutcome::Success { status, body },
                    Err(e) => RequestOutcome::Failure {
                        reason: e.to_string(),
                    },
                }
            }
            Err(e) => RequestOutcome::Failure {
                reason: e.to_string(),
            },
        };

        pb.println(format!(
            "{} worker {:02} {}",
            Utc::now().format("%H:%M:%S%.3f"),
            rank,
            outcome
        ));
        pb.set_message(outcome.to_string());
        pb.tick();
    }
    pb.finish_with_message("stopped");

    attempts
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;
    use reqwest::header::HeaderMap;
    use std::time::Duration;
    use wiremock::MockServer;

    fn config(url: String) -> Arc<LoadConfig> {
        Arc::new(LoadConfig {
            url,
            headers: HeaderMap::new(),
            workers: 1,
            duration: Duration::ZERO,
        })
    }

    // Bind a listener and drop it so the port refuses connections again.
    async fn dead_endpoint() -> String {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);
        format!("{uri}/tasks")
    }

    #[tokio::test]
    async fn preset_stop_means_zero_requests() {
        let stop = StopSignal::new();
        stop.set();
        let m = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());

        let attempts = worker_loop(0, config(dead_endpoint().await), stop, m).await;
        assert_eq!(attempts, 0);
    }

    #[tokio::test]
    async fn keeps_looping_through_failures() {
        // Nothing listens at the endpoint; every request is refused fast.
        let stop = StopSignal::new();
        let m = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());

        let handle = tokio::spawn(worker_loop(
            0,
            config(dead_endpoint().await),
            stop.clone(),
            m,
        ));
        tokio::time::sleep(Duration::from_millis(300)).await;
        stop.set();

        let attempts = handle.await.unwrap();
        assert!(attempts > 1, "expected repeated attempts, got {attempts}");
    }
}
