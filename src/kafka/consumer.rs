use crate::config::SourceConfig;
use crate::kafka::connection::client_config;
use crate::record::Record;
use crate::{Error, Result};
use futures::StreamExt;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::topic_partition_list::TopicPartitionList;
use tracing::{info, trace};

/// Source side of the relay: a consumer-group member subscribed to the
/// input topic. Auto-commit is off; offsets are committed explicitly by the
/// relay once delivery to the sink is confirmed.
pub struct RelaySource {
    consumer: StreamConsumer,
    topic: String,
}

impl RelaySource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let consumer: StreamConsumer =
            client_config(&config.brokers, config.tls.as_ref(), config.sasl.as_ref())?
                .set("group.id", &config.group_id)
                .set("enable.auto.commit", "false")
                .set("enable.partition.eof", "false")
                .set("auto.offset.reset", &config.auto_offset_reset)
                .create()
                .map_err(|e| Error::Connection(format!("failed to create consumer: {}", e)))?;

        consumer
            .subscribe(&[config.topic.as_str()])
            .map_err(Error::Kafka)?;

        info!(
            topic = %config.topic,
            group_id = %config.group_id,
            "Subscribed to source topic"
        );

        Ok(Self {
            consumer,
            topic: config.topic.clone(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Waits for the next record from the source topic.
    ///
    /// Suspends until a record arrives; cancel safe, so the relay can race
    /// it against the shutdown signal and the checkpoint timer.
    pub async fn recv(&self) -> Result<Record> {
        // The message stream only ends when the consumer is dropped, so the
        // None arm is unreachable while `self` is alive.
        let message = match self.consumer.stream().next().await {
            Some(result) => result.map_err(Error::Kafka)?,
            None => {
                return Err(Error::Connection(
                    "consumer message stream closed".to_string(),
                ))
            }
        };

        let record = Record {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key: message.key().map(|k| k.to_vec()),
            payload: message.payload().map(|p| p.to_vec()).unwrap_or_default(),
            timestamp_ms: message.timestamp().to_millis(),
        };

        trace!(
            partition = record.partition,
            offset = record.offset,
            bytes = record.payload.len(),
            "Received record"
        );

        Ok(record)
    }

    /// Commits the given positions to the consumer group.
    pub fn commit(&self, positions: &TopicPartitionList) -> Result<()> {
        self.consumer
            .commit(positions, CommitMode::Sync)
            .map_err(Error::Kafka)
    }
}
