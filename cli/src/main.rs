use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing_subscriber::filter::LevelFilter;

use settings::Settings;
use sweep::SweepSession;
use theme::Theme;

mod hack;
mod settings;
mod sweep;
mod theme;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Glyphs used to draw the board
    #[arg(long, global = true)]
    theme: Option<Theme>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play minesweeper
    Sweep(SweepArgs),
    /// Narrow down a terminal password from likeness feedback
    Hack(HackArgs),
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[arg(long)]
    width: Option<u8>,

    #[arg(long)]
    height: Option<u8>,

    #[arg(short, long)]
    mines: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct HackArgs {
    /// File with one candidate per line, read from stdin when missing
    file: Option<PathBuf>,

    /// Print every scoreboard as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn sweep(settings: Settings, args: SweepArgs) -> Result<()> {
    let mut board = settings.board;
    board.width = args.width.unwrap_or(board.width);
    board.height = args.height.unwrap_or(board.height);
    board.mines = args.mines.unwrap_or(board.mines);
    board.seed = args.seed.or(board.seed);

    let config = board.game_config()?;
    log::debug!("config: {:?}, seed: {:?}", config, board.seed);

    let mut session = SweepSession::new(config, board.seed, settings.theme)?;
    session.run(io::stdin().lock(), &mut io::stdout().lock())
}

fn hack(args: HackArgs) -> Result<()> {
    let candidates = match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read candidates from {}", path.display()))?;
            Some(hack::read_candidates(&text))
        }
        None => None,
    };
    hack::run(
        candidates,
        args.json,
        io::stdin().lock(),
        &mut io::stdout().lock(),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    log::debug!("App started");

    match cli.command {
        Command::Sweep(args) => sweep(settings, args),
        Command::Hack(args) => hack(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sweep_flags_are_optional_overrides() {
        let cli = Cli::try_parse_from(["termlink", "--theme", "ascii", "sweep", "-m", "12", "-s", "5"])
            .unwrap();

        assert_eq!(cli.theme, Some(Theme::Ascii));
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep subcommand");
        };
        assert_eq!(args.mines, Some(12));
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.width, None);
    }

    #[test]
    fn hack_accepts_a_candidate_file() {
        let cli = Cli::try_parse_from(["termlink", "-v", "hack", "words.txt", "--json"]).unwrap();

        let Command::Hack(args) = cli.command else {
            panic!("expected hack subcommand");
        };
        assert_eq!(args.file, Some(PathBuf::from("words.txt")));
        assert!(args.json);
    }
}
