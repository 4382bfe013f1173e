use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Point value with the Ace counted low. The high Ace is a hand-level concern.
    pub fn value(self) -> u8 {
        (self as u8).min(10)
    }

    pub fn id(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn from_id(id: &str) -> Option<Self> {
        match id {
            "T" => Some(Rank::Ten),
            _ => Rank::ALL.into_iter().find(|rank| rank.id() == id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn id(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_id(id: char) -> Option<Self> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.id() == id.to_ascii_uppercase() || suit.symbol() == id)
    }
}

/// A playing card from the standard 52-card pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Two-character key such as `AS` or `TC`, the inverse of `FromStr`.
    pub fn key(&self) -> String {
        let rank = match self.rank {
            Rank::Ten => "T",
            rank => rank.id(),
        };
        format!("{}{}", rank, self.suit.id())
    }

    /// Card at `index` of an unshuffled deck, suit-major.
    pub fn from_index(index: usize) -> Self {
        assert!(index < 52, "Invalid card index: {}", index);
        Self::new(Rank::ALL[index % 13], Suit::ALL[index / 13])
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.id(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s
            .chars()
            .last()
            .ok_or_else(|| Error::InvalidCard(s.to_string()))?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];

        let rank = Rank::from_id(&rank_part.to_ascii_uppercase())
            .ok_or_else(|| Error::InvalidCard(s.to_string()))?;
        let suit = Suit::from_id(suit_char).ok_or_else(|| Error::InvalidCard(s.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_values() {
        assert_eq!(Card::new(Rank::Two, Suit::Spades).value(), 2);
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).value(), 10);
        assert_eq!(Card::new(Rank::King, Suit::Hearts).value(), 10);
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).value(), 1);
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).to_string(), "10♣");
    }

    #[test]
    fn test_card_from_key() {
        assert_eq!("AS".parse::<Card>().unwrap(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!("TC".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Clubs));
        assert_eq!("10d".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!("Q♥".parse::<Card>().unwrap(), Card::new(Rank::Queen, Suit::Hearts));
    }

    #[test]
    fn test_card_key_parses_back() {
        let card = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(card.key(), "TH");
        assert_eq!(card.key().parse::<Card>().unwrap(), card);
    }

    #[test]
    fn test_card_from_bad_key() {
        assert!("".parse::<Card>().is_err());
        assert!("1S".parse::<Card>().is_err());
        assert!("AX".parse::<Card>().is_err());
        assert!("ZZZ".parse::<Card>().is_err());
    }

    #[test]
    fn test_from_index_covers_deck() {
        let mut cards: Vec<Card> = (0..52).map(Card::from_index).collect();
        cards.sort_by_key(|c| (c.suit, c.rank));
        cards.dedup();
        assert_eq!(cards.len(), 52);
    }

    #[test]
    #[should_panic(expected = "Invalid card index")]
    fn test_from_index_out_of_range() {
        Card::from_index(52);
    }
}
