use serde::{Deserialize, Serialize};

use crate::{Error, DEFAULT_MONEY};

/// Blackjack payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, Error> {
        if denominator == 0 {
            return Err(Error::InvalidRules("Denominator cannot be zero".into()));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn calculate_payout(&self, bet: u32) -> i64 {
        (i64::from(bet) * i64::from(self.numerator)) / i64::from(self.denominator)
    }
}

impl std::str::FromStr for PayoutRatio {
    type Err = Error;

    /// Parses `N:D`, e.g. `3:2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRules(format!("Invalid payout ratio '{s}', expected N:D"));
        let (num, den) = s.split_once(':').ok_or_else(invalid)?;
        let num = num.trim().parse().map_err(|_| invalid())?;
        let den = den.trim().parse().map_err(|_| invalid())?;
        Self::new(num, den)
    }
}

/// Configurable table rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Number of decks in the shoe
    pub num_decks: u8,

    /// Stake placed on every hand at the start of a round
    pub min_bet: u32,

    /// Money each player sits down with
    pub starting_money: i64,

    /// Dealer hits on soft 17
    pub dealer_hits_soft_17: bool,

    /// Allow doubling a hand that came from a split
    pub double_after_split: bool,

    /// Maximum number of splits per player per round
    pub max_splits: u8,

    /// Offer insurance when the dealer shows an Ace
    pub offer_insurance: bool,

    /// Fraction of the shoe dealt before it is reshuffled between rounds
    pub penetration: f64,

    /// Blackjack payout multiplier (commonly 3:2 or 6:5)
    pub blackjack_payout: PayoutRatio,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            num_decks: 6,
            min_bet: 10,
            starting_money: DEFAULT_MONEY,
            dealer_hits_soft_17: false,
            double_after_split: true,
            max_splits: 3,
            offer_insurance: true,
            penetration: 0.75,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
        }
    }
}

impl GameRules {
    /// European rules (no doubling after a split, no insurance)
    pub fn european() -> Self {
        Self {
            double_after_split: false,
            offer_insurance: false,
            ..Self::default()
        }
    }

    /// Single deck rules (usually paired with 6:5 blackjack)
    pub fn single_deck() -> Self {
        Self {
            num_decks: 1,
            dealer_hits_soft_17: true,
            double_after_split: false,
            max_splits: 1,
            penetration: 0.5,
            blackjack_payout: PayoutRatio::SIX_TO_FIVE,
            ..Self::default()
        }
    }

    pub fn preset(name: &str) -> Result<Self, Error> {
        match name {
            "default" => Ok(Self::default()),
            "european" => Ok(Self::european()),
            "single_deck" => Ok(Self::single_deck()),
            _ => Err(Error::InvalidRules(format!(
                "Unknown preset '{name}'. Available: default, european, single_deck"
            ))),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_decks == 0 {
            return Err(Error::InvalidRules("At least one deck is required".into()));
        }
        if self.min_bet == 0 {
            return Err(Error::InvalidRules("Minimum bet must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.penetration) {
            return Err(Error::InvalidRules(format!(
                "Penetration {} is outside 0..=1",
                self.penetration
            )));
        }
        if self.blackjack_payout.denominator == 0 {
            return Err(Error::InvalidRules("Denominator cannot be zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_ratio_three_to_two() {
        let ratio = PayoutRatio::THREE_TO_TWO;
        assert_eq!(ratio.calculate_payout(100), 150);
        assert_eq!(ratio.calculate_payout(10), 15);
        assert_eq!(ratio.calculate_payout(50), 75);
    }

    #[test]
    fn test_payout_ratio_six_to_five() {
        let ratio = PayoutRatio::SIX_TO_FIVE;
        assert_eq!(ratio.calculate_payout(100), 120);
        assert_eq!(ratio.calculate_payout(10), 12);
    }

    #[test]
    fn test_payout_ratio_zero_denominator() {
        assert!(PayoutRatio::new(3, 0).is_err());
    }

    #[test]
    fn test_payout_ratio_from_str() {
        assert_eq!("6:5".parse::<PayoutRatio>().unwrap(), PayoutRatio::SIX_TO_FIVE);
        assert_eq!(" 2 : 1 ".parse::<PayoutRatio>().unwrap(), PayoutRatio::new(2, 1).unwrap());
        assert!("3/2".parse::<PayoutRatio>().is_err());
        assert!("3:0".parse::<PayoutRatio>().is_err());
    }

    #[test]
    fn test_default_rules() {
        let rules = GameRules::default();
        assert!(!rules.dealer_hits_soft_17);
        assert_eq!(rules.starting_money, 500);
        assert_eq!(rules.blackjack_payout, PayoutRatio::THREE_TO_TWO);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GameRules::preset("single_deck").unwrap().num_decks, 1);
        assert!(!GameRules::preset("european").unwrap().offer_insurance);
        assert!(GameRules::preset("vegas").is_err());
    }

    #[test]
    fn test_partial_rules_file_uses_defaults() {
        let rules: GameRules =
            serde_json::from_str(r#"{ "num_decks": 2, "dealer_hits_soft_17": true }"#).unwrap();
        assert_eq!(rules.num_decks, 2);
        assert!(rules.dealer_hits_soft_17);
        assert_eq!(rules.min_bet, 10);
        assert_eq!(rules.blackjack_payout, PayoutRatio::THREE_TO_TWO);
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        let rules = GameRules {
            min_bet: 0,
            ..GameRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = GameRules {
            penetration: 1.5,
            ..GameRules::default()
        };
        assert!(rules.validate().is_err());
    }
}
