use crate::config::{SaslConfig, TlsConfig};
use crate::{Error, Result};
use rdkafka::ClientConfig;
use tracing::debug;

/// Builds the shared librdkafka client settings for one broker connection.
///
/// TLS material is validated here so a bad CA path fails at startup, before
/// any record is read. Hostname verification stays enabled unless the config
/// explicitly turns it off.
pub fn client_config(
    brokers: &[String],
    tls: Option<&TlsConfig>,
    sasl: Option<&SaslConfig>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::new();
    config.set("bootstrap.servers", brokers.join(","));

    let protocol = match (tls.is_some(), sasl.is_some()) {
        (true, true) => "sasl_ssl",
        (true, false) => "ssl",
        (false, true) => "sasl_plaintext",
        (false, false) => "plaintext",
    };
    config.set("security.protocol", protocol);

    if let Some(tls) = tls {
        if !tls.ca_cert_path.is_file() {
            return Err(Error::Connection(format!(
                "CA certificate not found: {}",
                tls.ca_cert_path.display()
            )));
        }
        config.set("ssl.ca.location", tls.ca_cert_path.to_string_lossy());
        if !tls.verify_hostname {
            debug!("TLS hostname verification disabled by configuration");
            config.set("ssl.endpoint.identification.algorithm", "none");
        }
    }

    if let Some(sasl) = sasl {
        config
            .set("sasl.mechanism", &sasl.mechanism)
            .set("sasl.username", &sasl.username)
            .set("sasl.password", &sasl.password);
    }

    Ok(config)
}
