use fabric_dns_jobs::{JobRunner, SnapshotRefreshJob};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockSnapshotRefresh;

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    JobRunner::new().start().await;
}

#[tokio::test]
async fn test_zero_interval_refreshes_once_and_returns() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());
    let job = SnapshotRefreshJob::new(snapshot.clone()).with_interval(0);

    // start() returning proves the one-shot path does not loop.
    Arc::new(job).start().await;

    assert_eq!(snapshot.refresh_count(), 1);
}

#[tokio::test]
async fn test_refresh_runs_immediately_on_start() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());
    let job = SnapshotRefreshJob::new(snapshot.clone()).with_interval(3600);

    JobRunner::new().with_snapshot_refresh(job).start().await;
    sleep(Duration::from_millis(50)).await;

    assert_eq!(snapshot.refresh_count(), 1);
}

#[tokio::test]
async fn test_refresh_fires_on_interval() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());
    let job = SnapshotRefreshJob::new(snapshot.clone()).with_interval(1);

    JobRunner::new().with_snapshot_refresh(job).start().await;
    sleep(Duration::from_millis(1100)).await;

    assert!(snapshot.refresh_count() >= 2);
}

#[tokio::test]
async fn test_refresh_failure_keeps_the_loop_alive() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());
    snapshot.set_should_fail(true);
    let job = SnapshotRefreshJob::new(snapshot.clone()).with_interval(1);

    JobRunner::new().with_snapshot_refresh(job).start().await;
    sleep(Duration::from_millis(1100)).await;

    assert!(snapshot.refresh_count() >= 2);
}

#[tokio::test]
async fn test_cancellation_stops_the_job() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());
    let job = SnapshotRefreshJob::new(snapshot.clone()).with_interval(1);
    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_snapshot_refresh(job)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    sleep(Duration::from_millis(50)).await;
    shutdown.cancel();
    sleep(Duration::from_millis(100)).await;

    let count_after_cancel = snapshot.refresh_count();
    sleep(Duration::from_millis(1200)).await;

    assert_eq!(snapshot.refresh_count(), count_after_cancel);
}

#[tokio::test(start_paused = true)]
async fn test_slow_refresh_does_not_trigger_catch_up_burst() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());
    // The first interval-driven refresh (call 2, after the immediate one at
    // start) stalls across ten ticks.
    snapshot.set_delay_for_call(2, Duration::from_secs(10));
    let job = SnapshotRefreshJob::new(snapshot.clone()).with_interval(1);

    JobRunner::new().with_snapshot_refresh(job).start().await;

    // Virtual time: stall covers t=1s..11s; a burst of missed ticks would
    // pile up roughly ten refreshes right after it.
    sleep(Duration::from_millis(11_500)).await;
    assert!(
        snapshot.refresh_count() <= 4,
        "missed ticks burst: {} refreshes",
        snapshot.refresh_count()
    );
}

#[tokio::test]
async fn test_job_runner_builder_is_chainable() {
    let snapshot = Arc::new(MockSnapshotRefresh::new());

    let runner = JobRunner::new()
        .with_snapshot_refresh(SnapshotRefreshJob::new(snapshot).with_interval(3600))
        .with_shutdown_token(CancellationToken::new());

    runner.start().await;
}
