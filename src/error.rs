use thiserror::Error;

use crate::PlayerOption;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error("The name {0} is already taken")]
    DuplicatePlayer(String),
    #[error("No player at index {0}")]
    UnknownPlayer(usize),
    #[error("Player {player} has no hand at index {hand}")]
    UnknownHand { player: usize, hand: usize },
    #[error("{0} is not a legal option for this hand")]
    IllegalOption(PlayerOption),
    #[error("Insufficient funds: {name} has {money}, needs {needed}")]
    InsufficientFunds { name: String, money: i64, needed: i64 },
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}
