use anyhow::Context as _;
use clap::Parser;
use hierlog::{FormatKind, Level, LoggingConfig, WriterConfig};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Emit a message at every level from a few modules using the given
/// logging configuration.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML logging configuration file
    #[arg(long, env = "HIERLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Module levels, e.g. "<root>=INFO;app.db=DEBUG"
    #[arg(long, env = "HIERLOG_LEVELS")]
    levels: Option<String>,

    /// Output format of the default writer
    #[arg(long, value_enum)]
    format: Option<FormatKind>,

    /// Show the library's own diagnostics
    #[arg(long)]
    verbose: bool,

    /// Print the resulting level configuration
    #[arg(long)]
    show_config: bool,
}

const DEMO_MODULES: [&str; 3] = ["app", "app.db", "app.net.http"];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        init_diagnostics()?;
    }

    let mut config = match &cli.config {
        Some(path) => LoggingConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => LoggingConfig::default(),
    };
    if let Some(levels) = &cli.levels {
        config = config
            .with_level_string(levels)
            .context("Invalid --levels")?;
    }
    if let Some(format) = cli.format {
        config
            .default_writer
            .get_or_insert_with(WriterConfig::default)
            .format = format;
    }
    config.apply(hierlog::default_context())?;

    for name in DEMO_MODULES {
        let logger = hierlog::get_logger(name);
        for level in Level::ALL {
            hierlog::log!(logger, level, "{level} message from {name}");
        }
    }

    if cli.show_config {
        println!("{}", hierlog::logger_info());
    }

    Ok(())
}

fn init_diagnostics() -> anyhow::Result<()> {
    let filter = EnvFilter::try_new("hierlog=debug")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
