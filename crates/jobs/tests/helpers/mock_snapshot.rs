#![allow(dead_code)]

use async_trait::async_trait;
use fabric_dns_application::ports::{RefreshOutcome, SnapshotRefresh};
use fabric_dns_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockSnapshotRefresh {
    refresh_count: AtomicU64,
    should_fail: AtomicBool,
    /// When set, the given refresh call (1-based) sleeps for the duration
    /// before returning, simulating a slow file read.
    delay_for_call: Mutex<Option<(u64, Duration)>>,
}

impl MockSnapshotRefresh {
    pub fn new() -> Self {
        Self {
            refresh_count: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
            delay_for_call: Mutex::new(None),
        }
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub fn set_delay_for_call(&self, call: u64, delay: Duration) {
        *self.delay_for_call.lock().unwrap() = Some((call, delay));
    }
}

#[async_trait]
impl SnapshotRefresh for MockSnapshotRefresh {
    async fn refresh(&self) -> Result<RefreshOutcome, DomainError> {
        let count = self.refresh_count.fetch_add(1, Ordering::Relaxed) + 1;

        let delay = *self.delay_for_call.lock().unwrap();
        if let Some((call, duration)) = delay {
            if call == count {
                tokio::time::sleep(duration).await;
            }
        }

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::IoError("snapshot read failed".to_string()));
        }
        if count == 1 {
            Ok(RefreshOutcome::Reloaded { records: 3 })
        } else {
            Ok(RefreshOutcome::Unchanged)
        }
    }
}
