use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{Board, InputResolution, PieceSeed, SessionConfig};
use clap::{Parser, Subcommand};
use tracing::Level;

use self::headless::HeadlessArg;

mod headless;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    session: SessionArgs,
    #[clap(flatten)]
    log: LogArgs,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal with the keyboard (default)
    Play,
    /// Run without a keyboard and print every frame as text
    Headless(#[clap(flatten)] HeadlessArg),
}

/// Options shared by every mode.
#[derive(Debug, Clone, clap::Args)]
struct SessionArgs {
    /// Board width in cells
    #[arg(long, global = true, default_value_t = Board::DEFAULT_WIDTH)]
    width: usize,
    /// Board height in cells
    #[arg(long, global = true, default_value_t = Board::DEFAULT_HEIGHT)]
    height: usize,
    /// Seed for the piece sequence, as 32 hexadecimal digits
    #[arg(long, global = true)]
    seed: Option<PieceSeed>,
    /// Milliseconds between ticks
    #[arg(long, global = true, default_value_t = 100)]
    tick_ms: u64,
    /// Apply at most one rotation and one shift per tick
    #[arg(long, global = true)]
    one_input_per_class: bool,
}

impl SessionArgs {
    fn config(&self) -> anyhow::Result<SessionConfig> {
        let config = SessionConfig {
            width: self.width,
            height: self.height,
            input_resolution: if self.one_input_per_class {
                InputResolution::OnePerClass
            } else {
                InputResolution::ApplyAll
            },
            seed: self.seed,
            ..SessionConfig::default()
        };
        config.validate().context("invalid board size")?;
        Ok(config)
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, clap::Args)]
struct LogArgs {
    /// Write log events to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[arg(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,
}

impl LogArgs {
    /// Installs the global subscriber.
    ///
    /// Nothing is installed without `--log-file`: the terminal belongs to the game.
    fn init(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        Ok(())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    args.log.init()?;
    let config = args.session.config()?;
    let tick_interval = args.session.tick_interval();
    match args.mode.unwrap_or(Mode::Play) {
        Mode::Play => play::run(&config, tick_interval)?,
        Mode::Headless(arg) => headless::run(&arg, &config, tick_interval)?,
    }
    Ok(())
}
