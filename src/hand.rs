use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Card, DrawSource};

pub const BLACKJACK: u8 = 21;
pub const BLACKJACK_CARD_COUNT: usize = 2;
pub const DEALER_LOWER_LIMIT: u8 = 17;

/// Every legal total of a hand, ascending.
pub type HandValues = BTreeSet<u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Lose,
    Draw,
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandOutcome::Win => "win",
            HandOutcome::Lose => "lose",
            HandOutcome::Draw => "draw",
        })
    }
}

/// Every distinct total not over 21, choosing 1 or 11 independently for each
/// Ace. No cards gives `{0}`; an empty set means the cards are bust.
pub fn hand_values(cards: &[Card]) -> HandValues {
    let mut values = HandValues::from([0]);
    for card in cards {
        values = values
            .iter()
            .flat_map(|&total| {
                let low = total + card.value();
                let high = if card.is_ace() { Some(total + 11) } else { None };
                std::iter::once(low).chain(high)
            })
            .filter(|&total| total <= BLACKJACK)
            .collect();
    }
    values
}

/// An ordered run of cards held by one participant for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn values(&self) -> HandValues {
        hand_values(&self.cards)
    }

    /// Highest legal total, `None` when bust.
    pub fn best(&self) -> Option<u8> {
        self.values().last().copied()
    }

    /// The best total is only reachable by counting an Ace as 11.
    pub fn is_soft(&self) -> bool {
        let hard: u8 = self.cards.iter().map(Card::value).sum();
        self.best().is_some_and(|best| best > hard)
    }

    pub fn is_blackjack(&self) -> bool {
        self.len() == BLACKJACK_CARD_COUNT && self.values().contains(&BLACKJACK)
    }

    pub fn is_bust(&self) -> bool {
        self.values().is_empty()
    }

    pub fn hit(&mut self, source: &mut dyn DrawSource) {
        self.hit_card(source.draw());
    }

    /// Append a known card instead of drawing one.
    pub fn hit_card(&mut self, card: Card) {
        debug!("Hit {} onto {}", card, self);
        self.cards.push(card);
    }

    pub fn deal(&mut self, source: &mut dyn DrawSource) {
        assert!(self.is_empty(), "Hand already has cards: {}", self);
        for _ in 0..BLACKJACK_CARD_COUNT {
            self.hit(source);
        }
    }

    /// Deal a known opening pair.
    pub fn deal_cards(&mut self, cards: &[Card]) {
        assert!(self.is_empty(), "Hand already has cards: {}", self);
        assert_eq!(
            cards.len(),
            BLACKJACK_CARD_COUNT,
            "A deal needs exactly {} cards",
            BLACKJACK_CARD_COUNT
        );
        for &card in cards {
            self.hit_card(card);
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// One-line display prefixed by the owner's name.
    pub fn show(&self, name: &str) -> String {
        format!("{name}: {self}")
    }

    /// Only the first card face up, as the dealer shows it before playing.
    pub fn masked(&self) -> String {
        match self.cards.first() {
            Some(card) => format!("[{card} ??]"),
            None => "[]".to_string(),
        }
    }

    fn take_last(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        let values: Vec<String> = self.values().iter().map(u8::to_string).collect();
        write!(f, "[{}] {{{}}}", faces.join(" "), values.join(", "))
    }
}

/// The house hand, played to a fixed rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerHand {
    hand: Hand,
    pub hits_soft_17: bool,
}

impl DealerHand {
    pub fn new(hits_soft_17: bool) -> Self {
        Self {
            hand: Hand::new(),
            hits_soft_17,
        }
    }

    pub fn should_hit(&self) -> bool {
        match self.best() {
            None => false,
            Some(best) if best < DEALER_LOWER_LIMIT => true,
            Some(best) => best == DEALER_LOWER_LIMIT && self.hits_soft_17 && self.is_soft(),
        }
    }

    /// Draw until bust or standing on 17 or more.
    pub fn evaluate(&mut self, source: &mut dyn DrawSource) {
        while self.should_hit() {
            self.hit(source);
        }
        debug!("Dealer stands with {}", self.hand);
    }
}

impl Deref for DealerHand {
    type Target = Hand;

    fn deref(&self) -> &Hand {
        &self.hand
    }
}

impl DerefMut for DealerHand {
    fn deref_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

/// A staked hand; one per bet, plus one per split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    hand: Hand,
    pub bet: u32,
    pub from_split: bool,
    pub playing: bool,
    pub outcome: Option<HandOutcome>,
}

impl PlayerHand {
    pub fn new(bet: u32) -> Self {
        assert!(bet > 0, "A hand needs a positive bet");
        Self {
            hand: Hand::new(),
            bet,
            from_split: false,
            playing: true,
            outcome: None,
        }
    }

    pub fn can_split(&self) -> bool {
        matches!(self.cards(), [first, second] if first.rank == second.rank)
    }

    /// Move the second card to a new sibling hand and draw to both.
    ///
    /// Split Aces take one card each and are finished.
    pub fn split(&mut self, source: &mut dyn DrawSource) -> PlayerHand {
        assert!(self.can_split(), "Can't split the hand {}", self.hand);
        assert!(self.playing, "Can't split a finished hand");

        let mut sibling = PlayerHand::new(self.bet);
        sibling.from_split = true;
        if let Some(card) = self.hand.take_last() {
            sibling.hit_card(card);
        }

        self.hit(source);
        sibling.hit(source);

        if self.cards()[0].is_ace() {
            self.playing = false;
            sibling.playing = false;
        }
        sibling
    }

    /// Settle against the dealer's final hand.
    pub fn evaluate(&mut self, dealer: &Hand) -> HandOutcome {
        debug_assert!(self.outcome.is_none(), "Hand already evaluated");
        let outcome = if self.is_bust() {
            HandOutcome::Lose
        } else if self.is_blackjack() && !dealer.is_blackjack() {
            HandOutcome::Win
        } else if dealer.is_bust() {
            HandOutcome::Win
        } else {
            match self.best().cmp(&dealer.best()) {
                std::cmp::Ordering::Greater => HandOutcome::Win,
                std::cmp::Ordering::Less => HandOutcome::Lose,
                std::cmp::Ordering::Equal => HandOutcome::Draw,
            }
        };
        self.outcome = Some(outcome);
        outcome
    }
}

impl Deref for PlayerHand {
    type Target = Hand;

    fn deref(&self) -> &Hand {
        &self.hand
    }
}

impl DerefMut for PlayerHand {
    fn deref_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

impl fmt::Display for PlayerHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  stake: {}", self.hand, self.bet)
    }
}
