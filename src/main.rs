//! Outage Watchdog: log how long and how often the Internet connection is down.

mod check;
mod config;
mod logger;
mod outage;
mod probe;
mod shutdown;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tokio::time::sleep;

use config::Config;
use logger::EventLog;
use outage::{OutageTracker, Transition};
use shutdown::ShutdownFlag;

#[derive(Parser, Debug)]
#[command(
    name = "outage-watchdog",
    about = "Log how long and how often the Internet connection is down",
    long_about = "Periodically probes a pool of public DNS servers over TCP and classifies the network as up or down. Every loss and recovery of connectivity is appended, with timestamps and outage durations, to a persistent log file."
)]
struct Cli {
    /// Per-probe TCP connect timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Probe attempts per reachability check
    #[arg(long, default_value_t = config::DEFAULT_MAX_RETRIES)]
    pub retries: u32,

    /// Sleep between checks while the connection is up, in seconds
    #[arg(long, default_value_t = config::DEFAULT_UP_INTERVAL_SECS)]
    pub up_interval: u64,

    /// Sleep between checks while the connection is down, in seconds
    #[arg(long, default_value_t = config::DEFAULT_DOWN_INTERVAL_SECS)]
    pub down_interval: u64,

    /// Path of the append-only outage log
    #[arg(long, default_value = config::DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            servers: config::SERVERS,
            connect_timeout: Duration::from_secs(self.timeout),
            max_retries: self.retries,
            up_interval: Duration::from_secs(self.up_interval),
            down_interval: Duration::from_secs(self.down_interval),
            log_path: self.log_file,
        }
    }
}

/// The watchdog loop: probe, feed the tracker, log transitions, sleep, poll
/// the shutdown flag. Appends "Is started" on entry and "Is terminating" as
/// the final line once the flag is observed; the iteration in flight when
/// the flag is set always completes first.
async fn run<R, F, Fut>(
    config: &Config,
    log: &EventLog,
    shutdown_flag: &ShutdownFlag,
    rng: &mut R,
    mut probe: F,
) -> anyhow::Result<()>
where
    R: rand::Rng,
    F: FnMut(config::Endpoint) -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    log.append("Is started")?;

    let mut tracker = OutageTracker::new();

    loop {
        let up = check::is_internet_up(config.servers, config.max_retries, rng, &mut probe).await;

        match tracker.observe(up, Utc::now()) {
            Some(Transition::Down) => log.append("Connection is down...")?,
            Some(Transition::Restored { duration }) => {
                log.append("Connection is up again.")?;
                log.append(&format!(
                    "Was disconnected for {}",
                    outage::format_duration(duration)
                ))?;
            }
            None => {}
        }

        let interval = if up {
            config.up_interval
        } else {
            config.down_interval
        };
        sleep(interval).await;

        if shutdown_flag.is_requested() {
            break;
        }
    }

    log.append("Is terminating")?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = cli.into_config();

    let shutdown_flag = ShutdownFlag::new();
    shutdown::spawn_signal_listener(shutdown_flag.clone());

    let log = EventLog::new(&config.log_path);
    let mut rng = rand::thread_rng();

    run(&config, &log, &shutdown_flag, &mut rng, |server| {
        probe::probe(server, config.connect_timeout)
    })
    .await
}
