mod card;
mod error;
mod game;
mod hand;
mod options;
mod participant;
mod rules;
mod shoe;
mod strategy;

pub use card::{Card, Rank, Suit};
pub use error::Error;
pub use game::{Game, HandResult, InsuranceResult, RoundReport};
pub use hand::{
    hand_values, DealerHand, Hand, HandOutcome, HandValues, PlayerHand, BLACKJACK,
    DEALER_LOWER_LIMIT,
};
pub use options::{ActionEffect, PlayerOption, TableView};
pub use participant::{Dealer, Participant, Player, DEALER_NAME, DEFAULT_MONEY};
pub use rules::{GameRules, PayoutRatio};
pub use shoe::{DrawSource, Shoe};
pub use strategy::{optimal_move, BasicStrategy, Decider};
