use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Option<GameOutcome> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(GameOutcome::Won),
            Self::Lost => Some(GameOutcome::Lost),
        }
    }
}

impl From<GameOutcome> for GameStatus {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Won => Self::Won,
            GameOutcome::Lost => Self::Lost,
        }
    }
}

/// One game session, from creation until it is won or lost.
///
/// Every action takes the presenter to notify, the state itself never renders anything.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    revealed_count: CellCount,
    status: GameStatus,
    cheat_activated: bool,
    triggered_mine: Option<Position>,
}

impl GameState {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            status: GameStatus::InProgress,
            cheat_activated: false,
            triggered_mine: None,
        }
    }

    pub fn create(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self::new(generator.generate(config)?))
    }

    /// Fresh game with randomly placed mines.
    pub fn random(config: GameConfig, seed: u64) -> Result<Self> {
        Self::create(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.mine_layout.safe_cell_count() - self.revealed_count
    }

    pub fn cheat_activated(&self) -> bool {
        self.cheat_activated
    }

    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn cell(&self, position: Position) -> Result<Cell> {
        let coords = self.mine_layout.validate_position(position)?;
        let state = self.cell_at(coords);
        Ok(Cell {
            position,
            x: coords.0,
            y: coords.1,
            is_mine: self.mine_layout.contains_mine(coords),
            is_revealed: state.is_revealed(),
            adjacent_mine_count: state.adjacent_mine_count(),
        })
    }

    /// Reveals a cell, cascading over every connected zero cell.
    ///
    /// While the game runs, out-of-range and already revealed cells are rejected with
    /// [`GameError::InvalidMove`]. Once it is finished every reveal, valid or not, is a
    /// [`RevealOutcome::NoChange`].
    pub fn reveal<P: Presenter + ?Sized>(
        &mut self,
        position: Position,
        presenter: &mut P,
    ) -> Result<RevealOutcome> {
        if self.status.is_finished() {
            log::debug!("Ignoring reveal at {position}, game already ended");
            return Ok(RevealOutcome::NoChange);
        }

        let coords = self.mine_layout.validate_position(position)?;

        if self.cell_at(coords).is_revealed() {
            return Err(GameError::InvalidMove { position });
        }

        if self.mine_layout.contains_mine(coords) {
            log::debug!("Mine hit at {position}");
            self.explode(Some(position), presenter);
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_fill(coords, presenter);

        Ok(match self.check_win(presenter) {
            GameStatus::Won => RevealOutcome::Won,
            _ => RevealOutcome::Revealed,
        })
    }

    /// Declares the game won when every safe cell is revealed, otherwise leaves it running.
    pub fn check_win<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> GameStatus {
        if !self.status.is_finished() && self.safe_cells_left() == 0 {
            self.end_game(GameOutcome::Won, presenter);
        }
        self.status
    }

    /// Settles the game now: a complete board wins, anything else loses.
    pub fn claim_victory<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> GameStatus {
        if self.status.is_finished() {
            return self.status;
        }

        if self.check_win(presenter) == GameStatus::InProgress {
            log::debug!(
                "Victory claimed with {} safe cells left",
                self.safe_cells_left()
            );
            self.explode(None, presenter);
        }
        self.status
    }

    /// Marks every mine with a flag. Only affects the end-of-game report.
    pub fn cheat<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> MarkOutcome {
        if self.status.is_finished() || self.cheat_activated {
            return MarkOutcome::NoChange;
        }

        self.cheat_activated = true;
        for position in self.mine_layout.mine_positions() {
            presenter.flag(position);
        }
        log::debug!("Cheat activated");
        MarkOutcome::Changed
    }

    fn flood_fill<P: Presenter + ?Sized>(&mut self, start: Coord2, presenter: &mut P) {
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            // the grid doubles as the visited set
            if self.cell_at(coords).is_revealed() || self.mine_layout.contains_mine(coords) {
                continue;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
            self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
            self.revealed_count += 1;

            let position = self.mine_layout.position_of(coords);
            presenter.reveal(position, count_text(adjacent_mines), TileStyle::Safe);
            log::trace!("Revealed {position}, adjacent mines: {adjacent_mines}");

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.cell_at(pos).is_revealed()),
                );
            }
        }
    }

    fn explode<P: Presenter + ?Sized>(&mut self, triggered: Option<Position>, presenter: &mut P) {
        self.triggered_mine = triggered;

        let mines: Vec<Coord2> = self.mine_layout.mine_coords().collect();
        for coords in mines {
            self.board[coords.to_nd_index()] = EngineCell::Exploded;
            presenter.reveal(
                self.mine_layout.position_of(coords),
                MINE_GLYPH,
                TileStyle::Boom,
            );
        }

        self.end_game(GameOutcome::Lost, presenter);
    }

    fn end_game<P: Presenter + ?Sized>(&mut self, outcome: GameOutcome, presenter: &mut P) {
        if self.status.is_finished() {
            return;
        }

        self.status = outcome.into();
        log::debug!(
            "Game ended: {:?}, cheated: {}",
            outcome,
            self.cheat_activated
        );
        presenter.game_end(outcome, self.cheat_activated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Position]) -> GameState {
        GameState::new(MineLayout::from_mine_positions(size, mines).unwrap())
    }

    fn revealed_positions(events: &[GameEvent]) -> Vec<Position> {
        let mut positions: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Reveal { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        positions.sort_unstable();
        positions
    }

    fn game_end_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameEnd { .. }))
            .count()
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut game = game((2, 2), &[0]);
        let mut events: Vec<GameEvent> = Vec::new();

        let outcome = game.reveal(3, &mut events).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.revealed_count(), 1);
        assert_eq!(game.cell_at((1, 1)), EngineCell::Revealed(1));
        assert_eq!(
            events,
            [GameEvent::Reveal {
                position: 3,
                text: "1".into(),
                style: TileStyle::Safe,
            }]
        );
    }

    #[test]
    fn zero_cell_cascades_up_to_the_mine_fence() {
        // . . . . .
        // . . . . .
        // . . * . .
        // . . . . .
        // . . . . .
        let mut game = game((5, 5), &[12]);
        let mut events: Vec<GameEvent> = Vec::new();

        let outcome = game.reveal(0, &mut events).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.revealed_count(), 24);
        assert_eq!(game.cell_at((2, 2)), EngineCell::Hidden);
        assert_eq!(game.cell_at((1, 1)), EngineCell::Revealed(1));
        assert_eq!(game.cell_at((0, 0)), EngineCell::Revealed(0));
    }

    #[test]
    fn cascade_visits_each_cell_at_most_once() {
        let mut game = game((6, 6), &[35]);
        let mut events: Vec<GameEvent> = Vec::new();

        game.reveal(0, &mut events).unwrap();

        let positions = revealed_positions(&events);
        let mut deduped = positions.clone();
        deduped.dedup();
        assert_eq!(positions, deduped);
        assert_eq!(positions.len(), 35);
    }

    #[test]
    fn cascade_stops_at_numbered_cells() {
        // . . * . .
        // . . * . .
        // . . * . .
        let mut game = game((5, 3), &[2, 7, 12]);
        let mut events: Vec<GameEvent> = Vec::new();

        game.reveal(0, &mut events).unwrap();

        assert_eq!(revealed_positions(&events), [0, 1, 5, 6, 10, 11]);
        assert_eq!(game.cell_at((3, 0)), EngineCell::Hidden);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn hitting_a_mine_explodes_every_mine() {
        let mut game = GameState::random(GameConfig::DEFAULT, 42).unwrap();
        let mines: Vec<Position> = game.mine_layout().mine_positions().collect();
        let mut events: Vec<GameEvent> = Vec::new();

        let outcome = game.reveal(mines[3], &mut events).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some(mines[3]));
        assert_eq!(revealed_positions(&events), mines);
        assert!(events.iter().all(|event| match event {
            GameEvent::Reveal { text, style, .. } => text == MINE_GLYPH && *style == TileStyle::Boom,
            _ => true,
        }));
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameEnd {
                outcome: GameOutcome::Lost,
                cheated: false,
            })
        );
    }

    #[test]
    fn revealing_every_safe_cell_wins_once() {
        let mut game = game((3, 1), &[1]);
        let mut events: Vec<GameEvent> = Vec::new();

        assert_eq!(game.reveal(0, &mut events).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.reveal(2, &mut events).unwrap(), RevealOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.check_win(&mut events), GameStatus::Won);
        assert_eq!(game_end_count(&events), 1);
    }

    #[test]
    fn finished_game_ignores_further_moves() {
        let mut game = game((2, 2), &[0]);
        let mut events: Vec<GameEvent> = Vec::new();

        game.reveal(0, &mut events).unwrap();
        events.clear();

        assert_eq!(game.reveal(3, &mut events).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.reveal(0, &mut events), Ok(RevealOutcome::NoChange));
        assert_eq!(game.reveal(9, &mut events), Ok(RevealOutcome::NoChange));
        assert_eq!(game.cheat(&mut events), MarkOutcome::NoChange);
        assert_eq!(game.claim_victory(&mut events), GameStatus::Lost);
        assert_eq!(game.revealed_count(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn revealing_twice_or_off_board_is_an_invalid_move() {
        let mut game = game((2, 2), &[0]);

        game.reveal(3, &mut NoopPresenter).unwrap();

        assert_eq!(
            game.reveal(3, &mut NoopPresenter),
            Err(GameError::InvalidMove { position: 3 })
        );
        assert_eq!(
            game.reveal(4, &mut NoopPresenter),
            Err(GameError::InvalidMove { position: 4 })
        );
        assert_eq!(game.revealed_count(), 1);
    }

    #[test]
    fn cheat_flags_mines_without_changing_the_game() {
        let mut game = game((3, 3), &[0, 8]);
        let mut events: Vec<GameEvent> = Vec::new();

        assert_eq!(game.cheat(&mut events), MarkOutcome::Changed);
        assert_eq!(game.cheat(&mut events), MarkOutcome::NoChange);

        assert_eq!(
            events,
            [
                GameEvent::Flag { position: 0 },
                GameEvent::Flag { position: 8 }
            ]
        );
        assert!(game.cheat_activated());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.revealed_count(), 0);
    }

    #[test]
    fn cheater_is_reported_at_game_end() {
        let mut game = game((2, 1), &[0]);
        let mut events: Vec<GameEvent> = Vec::new();

        game.cheat(&mut events);
        game.reveal(1, &mut events).unwrap();

        assert_eq!(
            events.last(),
            Some(&GameEvent::GameEnd {
                outcome: GameOutcome::Won,
                cheated: true,
            })
        );
    }

    #[test]
    fn check_win_leaves_incomplete_game_running() {
        let mut game = game((3, 1), &[1]);
        let mut events: Vec<GameEvent> = Vec::new();

        game.reveal(0, &mut events).unwrap();

        assert_eq!(game.check_win(&mut events), GameStatus::InProgress);
        assert_eq!(game_end_count(&events), 0);
    }

    #[test]
    fn claiming_victory_early_loses() {
        let mut game = game((3, 1), &[1]);
        let mut events: Vec<GameEvent> = Vec::new();

        game.reveal(0, &mut events).unwrap();

        assert_eq!(game.claim_victory(&mut events), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), None);
        assert_eq!(game.cell_at((1, 0)), EngineCell::Exploded);
        assert_eq!(game_end_count(&events), 1);
    }

    #[test]
    fn cell_snapshot_exposes_lazy_adjacent_count() {
        let mut game = game((2, 2), &[0]);

        assert_eq!(game.cell(3).unwrap().adjacent_mine_count, None);
        game.reveal(3, &mut NoopPresenter).unwrap();

        let cell = game.cell(3).unwrap();
        assert_eq!((cell.x, cell.y), (1, 1));
        assert!(cell.is_revealed);
        assert!(!cell.is_mine);
        assert_eq!(cell.adjacent_mine_count, Some(1));
        assert!(game.cell(0).unwrap().is_mine);
    }

    #[test]
    fn random_game_rejects_invalid_config() {
        assert!(matches!(
            GameState::random(GameConfig::new_unchecked((8, 8), 64), 1),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn state_survives_a_serde_round_trip() {
        let mut game = game((3, 3), &[4]);
        game.reveal(0, &mut NoopPresenter).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }
}
