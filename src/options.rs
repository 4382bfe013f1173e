//! Decisions a player can make on a hand, and what they do to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::hand::{BLACKJACK, BLACKJACK_CARD_COUNT};
use crate::{Card, DrawSource, Error, GameRules, PlayerHand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerOption {
    Stand,
    Hit,
    DoubleDown,
    Split,
    TakeInsurance,
}

impl PlayerOption {
    pub const ALL: [PlayerOption; 5] = [
        PlayerOption::TakeInsurance,
        PlayerOption::Stand,
        PlayerOption::Hit,
        PlayerOption::DoubleDown,
        PlayerOption::Split,
    ];

    /// Shortcut typed at the prompt.
    pub fn code(self) -> &'static str {
        match self {
            PlayerOption::Stand => "s",
            PlayerOption::Hit => "h",
            PlayerOption::DoubleDown => "d",
            PlayerOption::Split => "sp",
            PlayerOption::TakeInsurance => "t",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerOption::Stand => "Stand",
            PlayerOption::Hit => "Hit",
            PlayerOption::DoubleDown => "Double down",
            PlayerOption::Split => "Split",
            PlayerOption::TakeInsurance => "Take insurance",
        }
    }

    /// e.g. `[h] Hit`
    pub fn readable(self) -> String {
        format!("[{}] {}", self.code(), self.label())
    }
}

impl fmt::Display for PlayerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        PlayerOption::ALL
            .into_iter()
            .find(|option| option.code() == code)
            .ok_or_else(|| Error::InvalidOption(s.trim().to_string()))
    }
}

/// The rest of the table as seen from the hand being played.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    pub rules: &'a GameRules,
    pub dealer_up_card: Option<Card>,
    /// Hands the owning player holds this round, including this one.
    pub hand_count: usize,
    pub insurance_taken: bool,
}

/// A change an action asks the owning player to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    None,
    /// Set the player's insurance stake.
    Insure(u32),
    /// Insert this hand right after the one that was split.
    Split(PlayerHand),
}

impl PlayerHand {
    /// Legal options, in prompt order.
    pub fn options(&self, table: &TableView<'_>) -> Vec<PlayerOption> {
        if !self.playing || self.is_bust() || self.is_blackjack() {
            return Vec::new();
        }

        let rules = table.rules;
        let opening = self.len() == BLACKJACK_CARD_COUNT;
        let after_split = table.hand_count > 1;
        let mut options = Vec::with_capacity(PlayerOption::ALL.len());

        let dealer_shows_ace = table.dealer_up_card.is_some_and(|card| card.is_ace());
        if rules.offer_insurance
            && dealer_shows_ace
            && opening
            && !self.from_split
            && !after_split
            && !table.insurance_taken
            && self.bet / 2 > 0
        {
            options.push(PlayerOption::TakeInsurance);
        }

        options.push(PlayerOption::Stand);
        options.push(PlayerOption::Hit);

        let can_double = self.bet.checked_mul(2).is_some();
        if opening && can_double && (!after_split || rules.double_after_split) {
            options.push(PlayerOption::DoubleDown);
        }

        if self.can_split() && table.hand_count <= rules.max_splits as usize {
            options.push(PlayerOption::Split);
        }

        options
    }

    /// Carry out `option`. Legality is the caller's concern; acting on a
    /// finished hand is a bug.
    pub fn act(&mut self, option: PlayerOption, source: &mut dyn DrawSource) -> ActionEffect {
        assert!(self.playing, "Cannot {} a finished hand", option.label());

        match option {
            PlayerOption::Stand => {
                self.playing = false;
                ActionEffect::None
            }
            PlayerOption::Hit => {
                self.hit(source);
                if self.is_bust() || self.best() == Some(BLACKJACK) {
                    self.playing = false;
                }
                ActionEffect::None
            }
            PlayerOption::DoubleDown => {
                let bet = self.bet;
                self.bet = bet
                    .checked_mul(2)
                    .unwrap_or_else(|| panic!("Cannot double a stake of {bet}"));
                self.hit(source);
                self.playing = false;
                ActionEffect::None
            }
            PlayerOption::Split => ActionEffect::Split(self.split(source)),
            PlayerOption::TakeInsurance => ActionEffect::Insure(self.bet / 2),
        }
    }
}
