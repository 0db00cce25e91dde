use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::watch;
use topic_relay::{Config, Error, Relay, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "topic-relay")]
#[command(about = "Kafka topic-to-topic JSON relay", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the relay loop (default)
    Run,
    /// Produce a single message to the sink topic and exit
    Send {
        #[arg(value_name = "PAYLOAD")]
        payload: String,

        #[arg(short, long, help = "Optional message key")]
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    info!("Starting topic-relay");
    info!("Loading configuration from {:?}", args.config);

    let config = match Config::from_file(&args.config) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(Error::Config(e.to_string()));
        }
    };

    info!(
        source_brokers = ?config.source.brokers,
        source_topic = %config.source.topic,
        group_id = %config.source.group_id,
        sink_brokers = ?config.sink.brokers,
        sink_topic = %config.sink.topic,
        checkpoint_interval_secs = config.relay.checkpoint_interval_secs,
        "Configuration summary"
    );

    match args.command {
        Some(Command::Send { payload, key }) => {
            Relay::send_one(&config, payload.into_bytes(), key.map(String::into_bytes)).await?;
            Ok(())
        }
        Some(Command::Run) | None => run_relay(config).await,
    }
}

async fn run_relay(config: Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut relay = Relay::new(config);
    match relay.run(shutdown_rx).await {
        Ok(()) => {
            info!("Relay shut down cleanly");
            Ok(())
        }
        Err(e) => {
            error!("Relay terminated: {}", e);
            Err(e)
        }
    }
}

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("topic_relay=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("topic_relay=info,warn"))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
