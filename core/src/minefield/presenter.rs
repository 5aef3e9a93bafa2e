use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const MINE_GLYPH: &str = "☀";
pub const FLAG_GLYPH: &str = "⚐";

const COUNT_TEXT: [&str; 9] = ["", "1", "2", "3", "4", "5", "6", "7", "8"];

/// Text shown on a revealed safe cell, empty for zero.
pub fn count_text(count: u8) -> &'static str {
    COUNT_TEXT.get(usize::from(count)).copied().unwrap_or("?")
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileStyle {
    Safe,
    Boom,
}

impl TileStyle {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Boom => "boom",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Presentation layer notified of every visible change to a game.
pub trait Presenter {
    /// A cell became revealed, either by cascade or because the game exploded.
    fn reveal(&mut self, position: Position, text: &str, style: TileStyle);

    /// A mine got marked by the cheat.
    fn flag(&mut self, position: Position);

    /// Called once, when the game leaves `InProgress`.
    fn game_end(&mut self, outcome: GameOutcome, cheated: bool);
}

/// Recorded presenter notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Reveal {
        position: Position,
        text: String,
        style: TileStyle,
    },
    Flag {
        position: Position,
    },
    GameEnd {
        outcome: GameOutcome,
        cheated: bool,
    },
}

impl Presenter for Vec<GameEvent> {
    fn reveal(&mut self, position: Position, text: &str, style: TileStyle) {
        self.push(GameEvent::Reveal {
            position,
            text: text.to_string(),
            style,
        });
    }

    fn flag(&mut self, position: Position) {
        self.push(GameEvent::Flag { position });
    }

    fn game_end(&mut self, outcome: GameOutcome, cheated: bool) {
        self.push(GameEvent::GameEnd { outcome, cheated });
    }
}

/// Presenter for headless play, drops every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn reveal(&mut self, _position: Position, _text: &str, _style: TileStyle) {}

    fn flag(&mut self, _position: Position) {}

    fn game_end(&mut self, _outcome: GameOutcome, _cheated: bool) {}
}
