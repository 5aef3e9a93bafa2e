use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use termlink_core::{
    Coord, Coord2, GameConfig, GameOutcome, GameState, GameStatus, MarkOutcome, Position,
    Presenter, RevealOutcome, TileStyle, to_position,
};

use crate::theme::Theme;

const HELP: &str = "\
commands:
  r <pos>       reveal the cell at a linear position
  r <x> <y>     reveal the cell at column x, row y
  cheat         show where the mines are
  check         check whether the board is cleared
  validate      end the game now, an unfinished board loses
  new           start over with a fresh board
  help          show this message
  quit          leave";

#[derive(Clone, Debug, PartialEq)]
enum Tile {
    Hidden,
    Flagged,
    Open(String),
    Boom,
}

/// Terminal rendition of the board, fed by the engine's notifications.
#[derive(Debug)]
pub struct TerminalBoard {
    width: Coord,
    tiles: Vec<Tile>,
    theme: Theme,
    messages: Vec<String>,
}

impl TerminalBoard {
    pub fn new(size: Coord2, theme: Theme) -> Self {
        let cells = usize::from(size.0) * usize::from(size.1);
        Self {
            width: size.0,
            tiles: vec![Tile::Hidden; cells],
            theme,
            messages: Vec::new(),
        }
    }

    fn glyph(&self, tile: &Tile) -> String {
        match tile {
            Tile::Hidden => self.theme.hidden().to_owned(),
            Tile::Flagged => self.theme.flag().to_owned(),
            Tile::Open(text) if text.is_empty() => self.theme.empty().to_owned(),
            Tile::Open(text) => text.clone(),
            Tile::Boom => self.theme.mine().to_owned(),
        }
    }

    pub fn render(&mut self, out: &mut impl Write) -> Result<()> {
        let width = usize::from(self.width);
        write!(out, "   ")?;
        for x in 0..width {
            write!(out, "{:>2}", x % 100)?;
        }
        writeln!(out)?;

        for (y, row) in self.tiles.chunks(width.max(1)).enumerate() {
            write!(out, "{y:>3}")?;
            for tile in row {
                write!(out, " {}", self.glyph(tile))?;
            }
            writeln!(out)?;
        }

        for message in self.messages.drain(..) {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }
}

impl Presenter for TerminalBoard {
    fn reveal(&mut self, position: Position, text: &str, style: TileStyle) {
        if let Some(tile) = self.tiles.get_mut(usize::from(position)) {
            *tile = match style {
                TileStyle::Safe => Tile::Open(text.to_owned()),
                TileStyle::Boom => Tile::Boom,
            };
        }
    }

    fn flag(&mut self, position: Position) {
        if let Some(tile) = self.tiles.get_mut(usize::from(position))
            && *tile == Tile::Hidden
        {
            *tile = Tile::Flagged;
        }
    }

    fn game_end(&mut self, outcome: GameOutcome, cheated: bool) {
        self.messages.push(end_message(outcome, cheated).to_owned());
    }
}

fn end_message(outcome: GameOutcome, cheated: bool) -> &'static str {
    match (outcome, cheated) {
        (GameOutcome::Won, false) => "You Win!",
        (GameOutcome::Won, true) => "You Win... Cheater!",
        (GameOutcome::Lost, false) => "You Lose!",
        (GameOutcome::Lost, true) => "You were cheating and you still lost!",
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Target {
    Position(Position),
    Coords(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Reveal(Target),
    Cheat,
    Check,
    Validate,
    New,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        bail!("Empty command, type `help` for the list of commands");
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_lowercase().as_str(), args.as_slice()) {
        ("r" | "reveal", [position]) => Command::Reveal(Target::Position(
            position
                .parse::<Position>()
                .with_context(|| format!("Invalid position {position:?}"))?,
        )),
        ("r" | "reveal", [x, y]) => {
            let x = x.parse::<Coord>().with_context(|| format!("Invalid column {x:?}"))?;
            let y = y.parse::<Coord>().with_context(|| format!("Invalid row {y:?}"))?;
            Command::Reveal(Target::Coords((x, y)))
        }
        ("r" | "reveal", _) => bail!("Usage: r <pos> or r <x> <y>"),
        ("cheat", []) => Command::Cheat,
        ("check", []) => Command::Check,
        ("validate", []) => Command::Validate,
        ("new", []) => Command::New,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        _ => bail!("Unknown command {line:?}, type `help` for the list of commands"),
    };
    Ok(command)
}

/// One terminal session, possibly spanning several games.
pub struct SweepSession {
    config: GameConfig,
    seed: Option<u64>,
    theme: Theme,
    game: GameState,
    board: TerminalBoard,
}

impl SweepSession {
    /// A fixed seed makes every game of the session reproducible, later games use the next seeds.
    pub fn new(config: GameConfig, seed: Option<u64>, theme: Theme) -> Result<Self> {
        let mut seed = seed;
        let game = GameState::random(config, next_seed(&mut seed))?;
        Ok(Self {
            config,
            seed,
            theme,
            board: TerminalBoard::new(config.size, theme),
            game,
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    fn new_game(&mut self) -> Result<()> {
        self.game = GameState::random(self.config, next_seed(&mut self.seed))?;
        self.board = TerminalBoard::new(self.config.size, self.theme);
        log::info!(
            "New {}x{} game with {} mines",
            self.config.size.0,
            self.config.size.1,
            self.config.mines
        );
        Ok(())
    }

    fn resolve(&self, target: Target) -> Result<Position> {
        match target {
            Target::Position(position) => Ok(position),
            Target::Coords((x, y)) => {
                let (width, height) = self.game.size();
                if x >= width || y >= height {
                    bail!("({x}, {y}) is outside the {width}x{height} board");
                }
                Ok(to_position((x, y), width))
            }
        }
    }

    /// Applies one command, returns `false` once the player wants to leave.
    fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        match command {
            Command::Reveal(target) => {
                let position = match self.resolve(target) {
                    Ok(position) => position,
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        return Ok(true);
                    }
                };
                match self.game.reveal(position, &mut self.board) {
                    Ok(RevealOutcome::NoChange) => {
                        writeln!(out, "The game is over, type `new` to play again")?
                    }
                    Ok(_) => self.board.render(out)?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            Command::Cheat => {
                if self.game.cheat(&mut self.board) == MarkOutcome::Changed {
                    self.board.render(out)?;
                }
            }
            Command::Check => {
                if self.game.check_win(&mut self.board) == GameStatus::InProgress {
                    writeln!(out, "{} safe cells left", self.game.safe_cells_left())?;
                }
                self.board.render(out)?;
            }
            Command::Validate => {
                self.game.claim_victory(&mut self.board);
                self.board.render(out)?;
            }
            Command::New => {
                self.new_game()?;
                self.board.render(out)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.board.render(out)?;
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }
            let keep_going = match parse_command(&line) {
                Ok(command) => self.apply(command, out)?,
                Err(err) => {
                    writeln!(out, "{err:#}")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        Ok(())
    }
}

fn next_seed(seed: &mut Option<u64>) -> u64 {
    match seed {
        Some(next) => {
            let current = *next;
            *next = next.wrapping_add(1);
            current
        }
        None => rand::random(),
    }
}
