use anyhow::Result;
use kwlog::clock::MonotonicClock;
use kwlog::storage::FileSink;
use kwlog::transport::{SimulatedEcu, duplex};
use kwlog::{CancelFlag, Config, GroupLogger, SessionResult};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    config.validate()?;

    kwlog::logging::init_logging(&config.logging)?;
    info!("kwlog {} starting up", env!("APP_VERSION"));

    let sink = FileSink::create(&config.log_path).await?;

    // The bus handshake is not part of this binary; serve canned blocks
    let (transport, endpoint) = duplex();
    let ecu = SimulatedEcu::from_config(&config.simulator)?.spawn(endpoint);

    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping after the current request");
            on_signal.set();
        }
    });

    let logger = GroupLogger::new(&config, transport, sink, MonotonicClock::new(), cancel)?;
    let result = logger.run().await;
    ecu.abort();

    match result {
        SessionResult::UserTerminated => {
            info!("Logger shutdown complete");
            Ok(())
        }
        other => {
            error!("Logging session failed: {}", other);
            Err(anyhow::anyhow!(
                "Logging session ended with {} (code {})",
                other,
                other.code()
            ))
        }
    }
}
