//! Binary entrypoint for the Empirebot CLI.
//!
//! Commands:
//! - `start` - run the bot until Ctrl-C
//! - `init` - write a starter `config.toml`
//! - `status` - print the number of registered players and storage location
//!
//! See the library crate docs for module-level details: `empirebot::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use empirebot::bot::BotServer;
use empirebot::config::Config;
use empirebot::logutil::LogSinks;
use empirebot::storage::{PlayerStore, SledStore};
use empirebot::telegram::TelegramClient;

#[derive(Parser)]
#[command(name = "empirebot")]
#[command(about = "Legendary Empire: a chat-bot exploration game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (long polling)
    Start,
    /// Write a default configuration file
    Init,
    /// Show registered player count
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(Some(&config), cli.verbose);
            config.validate(true)?;
            info!("Starting Empirebot v{}", env!("CARGO_PKG_VERSION"));

            let db_path = config.storage.player_db_path();
            let store = SledStore::open(&db_path)?;
            info!(
                "Player store at {} ({} players)",
                db_path.display(),
                store.count_players()?
            );
            if config.bot.admins.is_empty() {
                info!("No administrators configured; /stats is disabled");
            }
            let transport = TelegramClient::new(&config.telegram)?;
            let mut server = BotServer::new(&config, store, transport);
            server.run().await?;
        }
        Commands::Init => {
            init_logging(None, cli.verbose);
            info!("Initializing new bot configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Status => {
            let config = Config::load_or_default(&cli.config).await?;
            init_logging(Some(&config), cli.verbose);
            config.validate(false)?;
            let db_path = config.storage.player_db_path();
            let store = SledStore::open(&db_path)?;
            println!("Bot: {}", config.bot.name);
            println!("Store: {}", db_path.display());
            println!("Registered players: {}", store.count_players()?);
            println!("Administrators: {}", config.bot.admins.len());
        }
    }

    Ok(())
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    // keep dependency chatter down unless tracing
    if verbosity < 2 {
        builder.filter_module("sled", log::LevelFilter::Warn);
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }

    let sinks = LogSinks::open(
        config.and_then(|cfg| cfg.logging.file.as_deref()),
        config.and_then(|cfg| cfg.logging.security_file.as_deref()),
    );
    // with a log file, mirror to the console only when attached to a terminal
    let echo = !sinks.has_file() || atty::is(atty::Stream::Stdout);

    builder.format(move |fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!("{} [{}] {}", ts, record.level(), record.args());
        sinks.write(record.target(), &line);
        if echo {
            writeln!(fmt, "{}", line)
        } else {
            Ok(())
        }
    });
    let _ = builder.try_init();
}
