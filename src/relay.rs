//! The relay loop: pull from the source topic, transform, push to the sink.
//!
//! Delivery is at-least-once. A record's source offset only becomes
//! committable after the sink confirms the send, so a crash between send and
//! commit re-delivers rather than loses. Offsets of dropped records are
//! committed too; a drop is a terminal outcome, not a retry.

use crate::checkpoint::OffsetTracker;
use crate::kafka::{RelaySink, RelaySource};
use crate::record::Outcome;
use crate::transform::{JsonPassthrough, Transform};
use crate::{Config, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

pub struct Relay {
    config: Config,
    transform: Arc<dyn Transform>,
}

impl Relay {
    /// Creates a relay with the default JSON pass-through transform.
    pub fn new(config: Config) -> Self {
        Self::with_transform(config, Arc::new(JsonPassthrough))
    }

    pub fn with_transform(config: Config, transform: Arc<dyn Transform>) -> Self {
        Self { config, transform }
    }

    /// Runs the relay until the shutdown signal fires or a fatal error
    /// occurs. On shutdown the producer is flushed and tracked offsets are
    /// committed before returning.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let source = RelaySource::new(&self.config.source)?;
        let sink = RelaySink::new(&self.config.sink)?;
        let mut tracker = OffsetTracker::new(source.topic().to_string());

        info!(
            source = %source.topic(),
            sink = %sink.topic(),
            "Relay starting"
        );

        let poll_timeout = Duration::from_millis(self.config.relay.poll_timeout_ms);
        let checkpoint_enabled = self.config.relay.checkpoint_interval_secs > 0;
        let mut checkpoint_timer = tokio::time::interval(Duration::from_secs(
            self.config.relay.checkpoint_interval_secs.max(1),
        ));
        checkpoint_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut received: u64 = 0;
        let mut forwarded: u64 = 0;
        let mut dropped: u64 = 0;

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = shutdown.changed() => {
                    break;
                }
                _ = checkpoint_timer.tick() => {
                    if checkpoint_enabled {
                        Self::commit(&source, &mut tracker)?;
                    }
                }
                polled = tokio::time::timeout(poll_timeout, source.recv()) => {
                    let record = match polled {
                        // No records within the poll window; loop back so
                        // shutdown and the checkpoint timer stay responsive.
                        Err(_) => continue,
                        Ok(Err(e)) => {
                            error!("Source receive failed: {}", e);
                            return Err(e);
                        }
                        Ok(Ok(record)) => record,
                    };

                    received += 1;
                    let (partition, offset) = (record.partition, record.offset);

                    match self.transform.apply(&record) {
                        Outcome::Forward(out) => {
                            sink.send(&out).await?;
                            forwarded += 1;
                        }
                        Outcome::Drop => {
                            dropped += 1;
                        }
                    }

                    tracker.mark_delivered(partition, offset);
                }
            }
        }

        info!("Shutting down: flushing sink and committing offsets");
        sink.flush(Duration::from_secs(self.config.relay.flush_timeout_secs))?;
        Self::commit(&source, &mut tracker)?;

        info!(received, forwarded, dropped, "Relay stopped");
        Ok(())
    }

    /// One-shot produce used by the `send` subcommand: deliver a single
    /// payload to the sink topic over the configured connection and flush.
    pub async fn send_one(config: &Config, payload: Vec<u8>, key: Option<Vec<u8>>) -> Result<()> {
        let sink = RelaySink::new(&config.sink)?;
        let mut record = crate::record::Record::new(sink.topic().to_string(), 0, 0, payload);
        record.key = key;

        sink.send(&record).await?;
        sink.flush(Duration::from_secs(config.relay.flush_timeout_secs))?;

        info!(topic = %sink.topic(), "Message delivered");
        Ok(())
    }

    fn commit(source: &RelaySource, tracker: &mut OffsetTracker) -> Result<()> {
        if let Some(positions) = tracker.commit_list()? {
            source.commit(&positions).map_err(|e| {
                error!("Offset commit failed: {}", e);
                e
            })?;
            debug!(
                total_delivered = tracker.total_delivered(),
                "Committed source offsets"
            );
        }
        Ok(())
    }
}
