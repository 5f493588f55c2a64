//! Eviction sweeper
//!
//! Periodically removes participants that have not sent a heartbeat within the
//! inactivity threshold and appends one "left" status message per eviction.

use std::sync::Arc;
use std::time::Duration;

use chat_common::PresenceConfig;
use chat_core::entities::NewMessage;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use crate::services::{ServiceContext, ServiceResult};

/// Text of the status message appended for each evicted participant
pub const LEFT_TEXT: &str = "left";

/// Sweeper timing
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Time between sweeps
    pub interval: Duration,
    /// Participants idle for longer than this are evicted
    pub inactivity_threshold: Duration,
    /// Append attempts per "left" message within one sweep
    pub announce_attempts: u32,
    /// Base delay between append attempts, multiplied by the attempt number
    pub announce_backoff: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self::from(&PresenceConfig::default())
    }
}

impl From<&PresenceConfig> for SweeperConfig {
    fn from(presence: &PresenceConfig) -> Self {
        Self {
            interval: presence.sweep_interval(),
            inactivity_threshold: presence.inactivity_threshold(),
            announce_attempts: 3,
            announce_backoff: Duration::from_millis(100),
        }
    }
}

/// Outcome of a single sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Names removed from the presence store
    pub evicted: Vec<String>,
    /// Number of "left" messages appended
    pub announced: usize,
    /// Names whose "left" message could not be appended
    pub lost: Vec<String>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.evicted.is_empty()
    }
}

/// Timer-driven eviction of stale participants
pub struct EvictionSweeper {
    ctx: Arc<ServiceContext>,
    config: SweeperConfig,
}

impl EvictionSweeper {
    pub fn new(ctx: Arc<ServiceContext>, config: SweeperConfig) -> Self {
        Self { ctx, config }
    }

    /// Run one sweep: evict everyone idle since before `now - threshold` and
    /// announce each departure.
    ///
    /// Fails only if the eviction itself fails; announcement failures are
    /// retried and then recorded in the report.
    #[instrument(skip(self))]
    pub async fn sweep_once(&self) -> ServiceResult<SweepReport> {
        let threshold_ms = i64::try_from(self.config.inactivity_threshold.as_millis()).unwrap_or(i64::MAX);
        let cutoff = self.ctx.now_ms().saturating_sub(threshold_ms);

        let evicted = self
            .ctx
            .participant_repo()
            .delete_stale_before(cutoff)
            .await?;

        let mut report = SweepReport::default();
        if evicted.is_empty() {
            return Ok(report);
        }

        let time = self.ctx.time_of_day();
        for participant in evicted {
            let departure = NewMessage::status(
                &participant.name,
                self.ctx.broadcast_target(),
                LEFT_TEXT,
                &time,
            );
            if self.announce(&departure).await {
                report.announced += 1;
            } else {
                report.lost.push(participant.name.clone());
            }
            report.evicted.push(participant.name);
        }

        Ok(report)
    }

    /// Append a "left" message, retrying a bounded number of times
    async fn announce(&self, departure: &NewMessage) -> bool {
        let attempts = self.config.announce_attempts.max(1);

        for attempt in 1..=attempts {
            match self.ctx.message_repo().append(departure).await {
                Ok(_) => return true,
                Err(e) if attempt < attempts => {
                    warn!(name = %departure.from, attempt, error = %e, "Departure append failed, retrying");
                    time::sleep(self.config.announce_backoff * attempt).await;
                }
                Err(e) => {
                    error!(name = %departure.from, attempts, error = %e, "Departure message lost");
                }
            }
        }

        false
    }

    /// Start sweeping every `interval` until the handle is shut down.
    ///
    /// The first sweep happens one interval after start. Shutdown is only
    /// observed between sweeps.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = self.config.interval;

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(interval_ms = period.as_millis() as u64, "Eviction sweeper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.sweep_once().await {
                            Ok(report) if report.is_empty() => debug!("Sweep found no stale participants"),
                            Ok(report) => info!(
                                evicted = report.evicted.len(),
                                announced = report.announced,
                                lost = report.lost.len(),
                                "Stale participants evicted"
                            ),
                            Err(e) => warn!(error = %e, "Sweep failed, will retry next tick"),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Eviction sweeper stopped");
        });

        SweeperHandle { shutdown_tx, task }
    }
}

/// Handle to a running sweeper task
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the task and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Eviction sweeper task panicked");
        }
    }
}
