//! OLED Status - host and one-wire readout binary
//!
//! Opens an SSD1306 panel on the given I2C bus node and refreshes it with
//! host and sensor facts until the panel becomes unreachable.

use anyhow::Context;
use clap::Parser;
use oled_status::{
    DisplayConfig, DisplayTransport, Layout, RefreshScheduler, SensorConfig, SensorReader,
    SensorSource, Ssd1306I2c, StatusError, DEFAULT_INTERFACE, DEFAULT_ONEWIRE_ROOT,
    SSD1306_I2C_ADDR,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level, Subscriber};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "oled_status")]
#[command(about = "Host and one-wire sensor status on an SSD1306 OLED")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Shows the IP address, CPU temperature and one-wire temperature sensors on a 128x64 SSD1306 OLED, refreshed every second"
)]
struct Cli {
    /// I2C bus device node of the display (e.g. /dev/i2c-1)
    #[arg(value_name = "DEVICE", required_unless_present = "snapshot")]
    device: Option<PathBuf>,

    /// Network interface whose IPv4 address is shown
    #[arg(long, default_value = DEFAULT_INTERFACE)]
    interface: String,

    /// Mount point of the one-wire filesystem
    #[arg(long, default_value = DEFAULT_ONEWIRE_ROOT)]
    onewire_root: PathBuf,

    /// Screen layout
    #[arg(long, value_enum, default_value_t = Layout::OneWireServer)]
    layout: Layout,

    /// 7-bit I2C address of the display (decimal or 0x-prefixed hex)
    #[arg(long, default_value_t = SSD1306_I2C_ADDR, value_parser = parse_address)]
    address: u16,

    /// Print one sensor snapshot as JSON and exit without touching the display
    #[arg(long)]
    snapshot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let sensor_config = SensorConfig::default()
        .with_interface(cli.interface.clone())
        .with_onewire_root(cli.onewire_root.clone());

    if cli.snapshot {
        return snapshot_command(sensor_config);
    }

    let display_config = DisplayConfig::default()
        .with_address(cli.address)
        .with_layout(cli.layout);

    let device = cli
        .device
        .as_deref()
        .ok_or_else(|| StatusError::invalid_arguments("missing DEVICE"))?;

    if let Err(err) = display_command(device, sensor_config, display_config).await {
        println!("\nERROR: {}\n", err);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    // RUST_LOG directives refine the level picked by the flags
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let subscriber = log_subscriber(log_level(cli), &directives);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the log subscriber")?;

    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn log_subscriber(level: Level, directives: &str) -> impl Subscriber + Send + Sync {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives);

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish()
}

async fn display_command(
    device: &Path,
    sensors: SensorConfig,
    config: DisplayConfig,
) -> oled_status::Result<()> {
    info!("Starting status display on {}", device.display());

    let mut panel = Ssd1306I2c::open(device, config.address)?;
    panel.init().await?;

    let mut scheduler = RefreshScheduler::from_config(panel, SensorReader::new(sensors), &config);
    scheduler.run().await
}

fn snapshot_command(sensors: SensorConfig) -> anyhow::Result<()> {
    let mut reader = SensorReader::new(sensors);
    let snapshot = reader.snapshot();

    let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
    println!("{}", json);

    Ok(())
}

fn parse_address(value: &str) -> Result<u16, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse::<u16>(),
    };

    parsed.map_err(|e| format!("invalid I2C address {value:?}: {e}"))
}
