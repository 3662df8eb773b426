//! BTC Monitor - price threshold alerts
//!
//! Polls a price feed, alerts once when the price crosses the configured
//! threshold, and serves a small REST API for changing the threshold at runtime.

mod api;
mod config;
mod error;

use clap::Parser;
use config::{AppConfig, FeedSettings, NotifierSettings, TelegramSettings};
use monitor_alerts::{CommandNotifier, FanoutNotifier, LogNotifier, Notifier, TelegramNotifier};
use monitor_core::MonitorError;
use monitor_engine::{create_state, PriceMonitor, SharedStateRef};
use monitor_feeds::{BinancePriceFeed, PriceFeed, SimulatedPriceFeed};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// BTC Monitor CLI
#[derive(Parser, Debug)]
#[command(name = "btc-monitor")]
#[command(about = "Price threshold monitor with one-shot alerts", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Alert threshold price
    #[arg(short, long)]
    price: Option<f64>,

    /// Check interval in minutes
    #[arg(short, long)]
    interval: Option<i64>,

    /// Alert direction: greater, less
    #[arg(short, long)]
    direction: Option<String>,

    /// Ticker symbol, e.g. BTCUSDT
    #[arg(short, long)]
    symbol: Option<String>,

    /// HTTP API port
    #[arg(long)]
    port: Option<u16>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use the offline price simulator instead of the REST API
    #[arg(long, default_value_t = false)]
    simulate: bool,

    /// Desktop notification program (e.g. notify-send)
    #[arg(long)]
    desktop_command: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of the file config.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(price) = self.price {
            config.alert.price = price;
        }
        if let Some(interval) = self.interval {
            config.alert.interval = interval;
        }
        if let Some(direction) = &self.direction {
            config.alert.direction = direction.to_lowercase();
        }
        if let Some(symbol) = &self.symbol {
            config.feed.symbol = symbol.to_uppercase();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.simulate {
            config.feed.simulate = true;
        }
        if let Some(command) = &self.desktop_command {
            config.notifier.desktop_command = Some(command.clone());
        }
    }
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn build_feed(settings: &FeedSettings, base_price: f64) -> Result<Arc<dyn PriceFeed>, MonitorError> {
    if settings.simulate {
        return Ok(Arc::new(SimulatedPriceFeed::new(&settings.symbol, base_price)));
    }
    let feed = BinancePriceFeed::with_base_url(&settings.base_url, &settings.symbol)?;
    Ok(Arc::new(feed))
}

fn build_notifier(settings: &NotifierSettings) -> FanoutNotifier {
    let mut fanout = FanoutNotifier::new().with(Arc::new(LogNotifier));

    if let Some(program) = &settings.desktop_command {
        fanout.push(Arc::new(CommandNotifier::new(program)));
    }

    if let Some(telegram) = &settings.telegram {
        match TelegramNotifier::new(&telegram.bot_token, &telegram.chat_id) {
            Ok(notifier) => fanout.push(Arc::new(notifier)),
            Err(e) => warn!("Telegram alerts disabled: {}", e),
        }
    }

    fanout
}

async fn run_stats_reporter(state: SharedStateRef) {
    let mut interval = tokio::time::interval(Duration::from_secs(600));
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let summary = state.stats_summary();
        info!(
            "📊 Stats | Uptime: {}s | Checks: {} | Feed failures: {} | Alerts: {}",
            summary.uptime_secs, summary.checks, summary.feed_failures, summary.alerts_sent
        );
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", args.config, e);
            std::process::exit(1);
        }
    };
    args.apply(&mut config);
    if config.notifier.telegram.is_none() {
        config.notifier.telegram = TelegramSettings::from_env();
    }

    init_logging(&config.log_level);

    let alert_config = match config.alert_config() {
        Ok(alert) => alert,
        Err(e) => {
            error!("Invalid alert settings: {}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 BTC Monitor starting...");
    info!("  Symbol: {}", config.feed.symbol);
    info!(
        "  Alert: price {} {:.2}",
        alert_config.direction.symbol(),
        alert_config.threshold
    );
    info!("  Interval: {} min", alert_config.period.as_secs() / 60);
    info!("  Simulated Feed: {}", config.feed.simulate);

    let feed = match build_feed(&config.feed, alert_config.threshold) {
        Ok(feed) => feed,
        Err(e) => {
            error!("Failed to create price feed: {}", e);
            std::process::exit(1);
        }
    };

    let notifier = build_notifier(&config.notifier);
    info!("  Notifiers: {}", notifier.sink_names().join(", "));
    let notifier: Arc<dyn Notifier> = Arc::new(notifier);

    let state = create_state(alert_config);
    let monitor = PriceMonitor::new(state.clone(), feed, notifier);
    let port = monitor.config_port();

    if let Err(e) = api::start_api_server(
        port,
        config.server.port,
        config.server.static_dir.as_deref(),
    )
    .await {
        error!("Failed to start API server: {}", e);
        std::process::exit(1);
    }

    let monitor_handle = tokio::spawn(monitor.run());

    let stats_state = state.clone();
    let stats_handle = tokio::spawn(async move {
        run_stats_reporter(stats_state).await;
    });

    info!("Press Ctrl+C to stop...");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }

    warn!("Shutdown signal received");
    monitor_handle.abort();
    stats_handle.abort();

    let summary = state.stats_summary();
    info!("📈 Final Stats:");
    info!("  Total uptime: {} seconds", summary.uptime_secs);
    info!("  Checks: {}", summary.checks);
    info!("  Feed failures: {}", summary.feed_failures);
    info!("  Alerts sent: {}", summary.alerts_sent);
    info!("  Last price: {:.2}", state.price());

    info!("👋 BTC Monitor stopped");
}
