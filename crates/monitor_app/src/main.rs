mod platform;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "status-monitor")]
#[command(about = "Watches a search backend's health and indexing progress", long_about = None)]
struct Cli {
    /// Status endpoint to poll, overriding the config file
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// RON config file
    #[arg(short = 'c', long = "config", default_value = "monitor.ron")]
    config: PathBuf,

    /// Log at debug level
    #[arg(long = "debug", default_value_t = false)]
    debug: bool,

    /// Print the default config as RON and exit
    #[arg(long = "print-default-config", default_value_t = false)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        println!("{}", platform::config::default_config_ron()?);
        return Ok(());
    }

    let mut config = platform::config::load(&cli.config)?;
    if let Some(url) = cli.url {
        config.status_url = url;
    }

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    monitor_logging::initialize(config.log_destination, level, &config.log_file);

    platform::app::run(config).await
}
