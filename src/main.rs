use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tile_snake::audio::{AudioHooks, Silent, TerminalBell};
use tile_snake::error::ConfigError;
use tile_snake::game::GameConfig;
use tile_snake::modes::HumanMode;
use tile_snake::storage::{self, best_score};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tile_snake")]
#[command(version, about = "Tile-grid snake game for the terminal")]
struct Cli {
    /// Tuning file; created with defaults when missing
    #[arg(long, default_value = "config.txt")]
    config: PathBuf,

    /// Best score file
    #[arg(long, default_value = "best_score.txt")]
    best_score: PathBuf,

    /// Screen width in pixels
    #[arg(long, default_value = "800")]
    width: i32,

    /// Screen height in pixels
    #[arg(long, default_value = "650")]
    height: i32,

    /// Tile edge in pixels
    #[arg(long, default_value = "20")]
    tile_size: i32,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Ring the terminal bell on eat and spawn
    #[arg(long)]
    bell: bool,

    /// Where log output goes
    #[arg(long, default_value = "tile_snake.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_file) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<ConfigError>().is_some() => ExitCode::from(2),
        Err(e) => {
            error!(error = %e, "Fatal error");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    anyhow::ensure!(cli.tile_size >= 2, "tile size must be at least 2");
    anyhow::ensure!(
        cli.width >= 4 * cli.tile_size && cli.height >= 4 * cli.tile_size,
        "screen must be at least four tiles in each direction"
    );

    println!("Reading config file...");
    let loaded = match storage::load_or_create(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "Config file rejected");
            wait_for_enter(&format!("Error with config file: {e}\nPress enter to continue."))?;
            return Err(e.into());
        }
    };

    if loaded.created {
        println!("Created {} with default values.", cli.config.display());
    }

    if loaded.tuning.is_cheat() {
        println!("Cheat Mode enabled. Best Scores will not be saved.");
        println!(
            "To disable cheat mode, change the values in {} back to default or delete the file.",
            cli.config.display()
        );
    } else {
        println!(
            "Note: Cheat Mode will be enabled if any of the values in {} are changed.",
            cli.config.display()
        );
    }

    let stored_best = best_score::load(&cli.best_score).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable best score");
        0
    });
    info!(stored_best, "Best score loaded");

    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        tile_size: cli.tile_size,
        ..GameConfig::default()
    }
    .with_tuning(loaded.tuning);

    let audio: Box<dyn AudioHooks> = if cli.bell {
        Box::new(TerminalBell::new(io::stderr()))
    } else {
        Box::new(Silent)
    };

    let mut mode = HumanMode::new(config, stored_best, cli.seed, audio);
    mode.run().await?;

    let stdin = io::stdin();
    best_score::offer_save(
        &cli.best_score,
        mode.best_score(),
        mode.cheat_mode(),
        &mut stdin.lock(),
        &mut io::stdout(),
    )
    .context("Failed to save best score")?;

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tile_snake=info".into()),
        )
        .init();
    Ok(())
}

fn wait_for_enter(message: &str) -> Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{message}")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
