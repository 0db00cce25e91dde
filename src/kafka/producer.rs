use crate::config::SinkConfig;
use crate::kafka::connection::client_config;
use crate::record::Record;
use crate::{Error, Result};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::trace;

/// Sink side of the relay. Sends are awaited until the broker acknowledges
/// them, so a returned `Ok` means the record survived the client's retry
/// policy; a returned error means retries are exhausted and the relay must
/// treat the record as undelivered.
pub struct RelaySink {
    producer: FutureProducer,
    topic: String,
}

impl RelaySink {
    pub fn new(config: &SinkConfig) -> Result<Self> {
        let producer: FutureProducer =
            client_config(&config.brokers, config.tls.as_ref(), config.sasl.as_ref())?
                .set("compression.type", &config.compression)
                .set("acks", &config.acks)
                .set("linger.ms", config.linger_ms.to_string())
                .set("batch.size", config.batch_size.to_string())
                .set("message.timeout.ms", config.message_timeout_ms.to_string())
                .create()
                .map_err(|e| Error::Connection(format!("failed to create producer: {}", e)))?;

        Ok(Self {
            producer,
            topic: config.topic.clone(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Sends a record to the sink topic and waits for broker confirmation.
    pub async fn send(&self, record: &Record) -> Result<()> {
        let mut outbound: FutureRecord<'_, [u8], [u8]> =
            FutureRecord::to(&self.topic).payload(record.payload.as_slice());
        if let Some(key) = record.key.as_deref() {
            outbound = outbound.key(key);
        }

        let (partition, offset) = self
            .producer
            .send(outbound, Timeout::Never)
            .await
            .map_err(|(e, _)| Error::Delivery {
                message: format!("send to '{}' failed: {}", self.topic, e),
            })?;

        trace!(
            topic = %self.topic,
            partition,
            offset,
            "Record delivered to sink"
        );

        Ok(())
    }

    /// Flushes buffered records; mandatory on shutdown.
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        self.producer.flush(timeout).map_err(Error::Kafka)
    }
}
