use alloc::string::String;
use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },
    #[error("Invalid move at position {position}")]
    InvalidMove { position: Position },
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LikenessError {
    #[error("Candidate {0:?} is not part of the scored set")]
    NotFound(String),
    #[error("Likeness {observed} is impossible, expected a value in 0..={max}")]
    InvalidLikeness { observed: i32, max: usize },
}

pub type LikenessResult<T> = core::result::Result<T, LikenessError>;
