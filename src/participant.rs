//! The dealer (the house) and the players, each holding hands.

use std::fmt;

use log::info;

use crate::options::{ActionEffect, PlayerOption};
use crate::{Card, DealerHand, DrawSource, PlayerHand};

pub const DEALER_NAME: &str = "Dealer";
pub const DEFAULT_MONEY: i64 = 500;

pub trait Participant {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Default)]
pub struct Dealer {
    hand: DealerHand,
}

impl Dealer {
    pub fn new(hits_soft_17: bool) -> Self {
        Self {
            hand: DealerHand::new(hits_soft_17),
        }
    }

    pub fn hand(&self) -> &DealerHand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut DealerHand {
        &mut self.hand
    }

    /// The face-up card players see while they act.
    pub fn up_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    pub fn play_hand(&mut self, source: &mut dyn DrawSource) {
        self.hand.evaluate(source);
    }
}

impl Participant for Dealer {
    fn name(&self) -> &str {
        DEALER_NAME
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    pub money: i64,
    pub insurance: u32,
    hands: Vec<PlayerHand>,
}

impl Player {
    pub fn new(name: impl Into<String>, money: i64) -> Self {
        Self {
            name: name.into(),
            money,
            insurance: 0,
            hands: Vec::new(),
        }
    }

    pub fn hands(&self) -> &[PlayerHand] {
        &self.hands
    }

    pub fn hand(&self, index: usize) -> Option<&PlayerHand> {
        self.hands.get(index)
    }

    pub fn hand_mut(&mut self, index: usize) -> Option<&mut PlayerHand> {
        self.hands.get_mut(index)
    }

    pub fn add_hand(&mut self, bet: u32) -> &mut PlayerHand {
        self.hands.push(PlayerHand::new(bet));
        let index = self.hands.len() - 1;
        &mut self.hands[index]
    }

    pub fn clear_hands(&mut self) {
        self.hands.clear();
    }

    /// Everything currently at stake: every hand's bet plus insurance.
    pub fn committed(&self) -> i64 {
        let bets: i64 = self.hands.iter().map(|h| i64::from(h.bet)).sum();
        bets + i64::from(self.insurance)
    }

    /// Can the player put `extra` more on the table?
    pub fn can_cover(&self, extra: u32) -> bool {
        self.money >= self.committed() + i64::from(extra)
    }

    pub fn add_money(&mut self, amount: i64) {
        self.money += amount;
        if amount < 0 {
            info!("{} lost {}", self.name, -amount);
        } else {
            info!("{} won {}", self.name, amount);
        }
    }

    pub fn money_summary(&self) -> String {
        format!("{} has {} money", self.name, self.money)
    }

    /// Apply `option` to the hand at `index`, inserting split hands in place.
    pub fn act(&mut self, index: usize, option: PlayerOption, source: &mut dyn DrawSource) {
        let Some(hand) = self.hands.get_mut(index) else {
            panic!("{} has no hand at index {}", self.name, index);
        };
        match hand.act(option, source) {
            ActionEffect::None => {}
            ActionEffect::Insure(stake) => self.insurance = stake,
            ActionEffect::Split(sibling) => self.hands.insert(index + 1, sibling),
        }
    }
}

impl Participant for Player {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = if self.hands.len() == 1 { "" } else { "s" };
        write!(f, "{} has {} with hand{}:", self.name, self.money, s)?;
        for hand in &self.hands {
            write!(f, "\n    {hand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shoe;

    fn cards(keys: &[&str]) -> Vec<Card> {
        keys.iter().map(|k| k.parse().unwrap()).collect()
    }

    #[test]
    fn test_dealer_defaults() {
        let dealer = Dealer::default();
        assert_eq!(dealer.name(), "Dealer");
        assert!(dealer.hand().is_empty());
        assert_eq!(dealer.up_card(), None);
    }

    #[test]
    fn test_dealer_play_hand() {
        let mut dealer = Dealer::new(false);
        dealer.hand_mut().deal_cards(&cards(&["TC", "6D"]));
        dealer.play_hand(&mut Shoe::stacked(cards(&["5S", "9S"])));
        assert_eq!(dealer.hand().best(), Some(21));
        assert_eq!(dealer.up_card(), Some("TC".parse().unwrap()));
    }

    #[test]
    fn test_add_and_clear_hands() {
        let mut player = Player::new("Alice", DEFAULT_MONEY);
        player.add_hand(10);
        player.add_hand(25);
        assert_eq!(player.hands().len(), 2);
        assert_eq!(player.hands()[1].bet, 25);
        assert_eq!(player.committed(), 35);

        player.clear_hands();
        assert!(player.hands().is_empty());
    }

    #[test]
    fn test_add_money() {
        let mut player = Player::new("Alice", 500);
        player.add_money(15);
        player.add_money(-40);
        assert_eq!(player.money, 475);
        assert_eq!(player.money_summary(), "Alice has 475 money");
    }

    #[test]
    fn test_can_cover() {
        let mut player = Player::new("Alice", 30);
        player.add_hand(10);
        assert!(player.can_cover(10));
        assert!(player.can_cover(20));
        assert!(!player.can_cover(21));
    }

    #[test]
    fn test_split_inserts_after_original() {
        let mut shoe = Shoe::stacked(cards(&["2S", "3S", "4S", "5S"]));
        let mut player = Player::new("Alice", 500);
        player.add_hand(10).deal_cards(&cards(&["8C", "8D"]));
        player.add_hand(10).deal_cards(&cards(&["KC", "QD"]));

        player.act(0, PlayerOption::Split, &mut shoe);

        assert_eq!(player.hands().len(), 3);
        assert_eq!(player.hands()[0].cards(), cards(&["8C", "2S"]).as_slice());
        assert_eq!(player.hands()[1].cards(), cards(&["8D", "3S"]).as_slice());
        assert!(player.hands()[1].from_split);
        assert_eq!(player.hands()[2].cards(), cards(&["KC", "QD"]).as_slice());
    }

    #[test]
    #[should_panic(expected = "Alice has no hand at index 1")]
    fn test_act_on_missing_hand() {
        let mut player = Player::new("Alice", 500);
        player.add_hand(10).deal_cards(&cards(&["TC", "7D"]));
        player.act(1, PlayerOption::Stand, &mut Shoe::seeded(1, 1));
    }

    #[test]
    fn test_insurance_sets_stake() {
        let mut player = Player::new("Alice", 500);
        player.add_hand(20).deal_cards(&cards(&["TC", "7D"]));
        player.act(0, PlayerOption::TakeInsurance, &mut Shoe::seeded(1, 1));
        assert_eq!(player.insurance, 10);
        assert!(player.hands()[0].playing);
        assert_eq!(player.committed(), 30);
    }

    #[test]
    fn test_display_lists_hands() {
        let mut player = Player::new("Alice", 500);
        player.add_hand(10).deal_cards(&cards(&["TC", "7D"]));
        assert_eq!(player.to_string(), "Alice has 500 with hand:\n    [10♣ 7♦] {17}  stake: 10");
    }
}
