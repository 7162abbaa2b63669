use shared_types::DiscoveryJob;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::api::{ApiResult, DiscoveryApi, LeadApi};
use crate::helpers::notify::{NoticeLevel, Notifier};

pub const POLL_TIMEOUT_MESSAGE: &str = "Job took too long. Please refresh or delete if stuck.";

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub interval: Duration,
    pub max_duration: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_duration: Duration::from_secs(300),
        }
    }
}

/// Broadcast after every refresh of the job list and every start/stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollUpdate {
    pub revision: u64,
    pub active_job: Option<i64>,
}

struct ActivePoll {
    poll_id: u64,
    job_id: i64,
    started_at: Instant,
    handle: JoinHandle<()>,
}

/// Watches one running discovery job at a time, refreshing the shared job
/// list until the job leaves the running state, disappears, or the time
/// ceiling is hit.
#[derive(Clone)]
pub struct DiscoveryPoller {
    api: Arc<dyn LeadApi>,
    notifier: Arc<dyn Notifier>,
    config: PollerConfig,
    jobs: Arc<RwLock<Vec<DiscoveryJob>>>,
    active: Arc<Mutex<Option<ActivePoll>>>,
    next_poll_id: Arc<AtomicU64>,
    updates: Arc<watch::Sender<PollUpdate>>,
}

impl DiscoveryPoller {
    pub fn new(api: Arc<dyn LeadApi>, notifier: Arc<dyn Notifier>, config: PollerConfig) -> Self {
        let (updates, _) = watch::channel(PollUpdate::default());
        Self {
            api,
            notifier,
            config,
            jobs: Arc::new(RwLock::new(Vec::new())),
            active: Arc::new(Mutex::new(None)),
            next_poll_id: Arc::new(AtomicU64::new(1)),
            updates: Arc::new(updates),
        }
    }

    /// Starts polling `job_id`. Returns false, leaving the current poll
    /// untouched, when a poll is already active.
    pub async fn start(&self, job_id: i64) -> bool {
        let mut active = self.active.lock().await;
        if let Some(current) = active.as_ref() {
            tracing::debug!(
                "Poll for job {} already active, ignoring start for {}",
                current.job_id,
                job_id
            );
            return false;
        }

        let poll_id = self.next_poll_id.fetch_add(1, Ordering::SeqCst);
        let poller = self.clone();
        let handle = tokio::spawn(async move { poller.run(poll_id, job_id).await });

        *active = Some(ActivePoll {
            poll_id,
            job_id,
            started_at: Instant::now(),
            handle,
        });
        drop(active);

        tracing::info!("Polling discovery job {}", job_id);
        self.publish(Some(job_id));
        true
    }

    pub async fn stop(&self) {
        let taken = self.active.lock().await.take();
        if let Some(poll) = taken {
            poll.handle.abort();
            tracing::info!(
                "Stopped polling job {} after {:?}",
                poll.job_id,
                poll.started_at.elapsed()
            );
            self.publish(None);
        }
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    pub async fn active_job(&self) -> Option<i64> {
        self.active.lock().await.as_ref().map(|p| p.job_id)
    }

    pub async fn jobs(&self) -> Vec<DiscoveryJob> {
        self.jobs.read().await.clone()
    }

    /// Replaces the shared job list, e.g. after a manual reload.
    pub async fn replace_jobs(&self, jobs: Vec<DiscoveryJob>) {
        *self.jobs.write().await = jobs;
        let active = self.active_job().await;
        self.publish(active);
    }

    pub fn subscribe(&self) -> watch::Receiver<PollUpdate> {
        self.updates.subscribe()
    }

    async fn run(self, poll_id: u64, job_id: i64) {
        let started = Instant::now();
        let mut ticker = time::interval_at(started + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if started.elapsed() > self.config.max_duration {
                tracing::warn!(
                    "Discovery job {} still running after {:?}, giving up",
                    job_id,
                    self.config.max_duration
                );
                self.notifier
                    .notify(NoticeLevel::Warning, POLL_TIMEOUT_MESSAGE);
                break;
            }

            match self.refresh(job_id).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!("Discovery job {} is no longer running", job_id);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Polling job {} failed: {}", job_id, e);
                }
            }
        }

        self.finish(poll_id).await;
    }

    /// One poll tick. Returns whether the job is still running.
    async fn refresh(&self, job_id: i64) -> ApiResult<bool> {
        let progress = self.api.job_progress(job_id).await.unwrap_or_else(|e| {
            tracing::warn!("Progress for job {} unavailable: {}", job_id, e);
            None
        });
        let mut jobs = self.api.list_jobs().await?;

        if let Some(progress) = progress.filter(|p| p.has_message()) {
            if let Some(job) = jobs.iter_mut().find(|j| j.id == job_id) {
                job.progress = Some(progress);
            }
        }

        let running = jobs.iter().any(|j| j.id == job_id && j.is_running());
        *self.jobs.write().await = jobs;
        self.publish(Some(job_id));
        Ok(running)
    }

    async fn finish(&self, poll_id: u64) {
        let mut active = self.active.lock().await;
        if active.as_ref().map(|p| p.poll_id) == Some(poll_id) {
            *active = None;
            drop(active);
            self.publish(None);
        }
    }

    fn publish(&self, active_job: Option<i64>) {
        self.updates.send_modify(|update| {
            update.revision += 1;
            update.active_job = active_job;
        });
    }
}
