//! The dealing source: one or more 52-card decks shuffled together.

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::Card;

/// Anything hands can draw cards from.
///
/// Implementations must always yield a card; running dry is their own concern.
pub trait DrawSource {
    fn draw(&mut self) -> Card;
}

pub struct Shoe {
    num_decks: u8,
    /// Top of the shoe is the end of the vector.
    cards: Vec<Card>,
    rng: ChaCha8Rng,
    /// Still dealing a fixed sequence; never asks for a reshuffle.
    stacked: bool,
}

impl Shoe {
    pub fn new(num_decks: u8) -> Self {
        Self::with_rng(num_decks, ChaCha8Rng::from_entropy())
    }

    /// Reproducible shoe for replays.
    pub fn seeded(num_decks: u8, seed: u64) -> Self {
        Self::with_rng(num_decks, ChaCha8Rng::seed_from_u64(seed))
    }

    /// A shoe that deals `cards` in the given order before falling back to a
    /// freshly shuffled single deck.
    pub fn stacked(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.reverse();
        Self {
            num_decks: 1,
            cards,
            rng: ChaCha8Rng::seed_from_u64(0),
            stacked: true,
        }
    }

    fn with_rng(num_decks: u8, rng: ChaCha8Rng) -> Self {
        let mut shoe = Self {
            num_decks: num_decks.max(1),
            cards: Vec::new(),
            rng,
            stacked: false,
        };
        shoe.reset();
        shoe
    }

    pub fn num_decks(&self) -> u8 {
        self.num_decks
    }

    pub fn capacity(&self) -> usize {
        self.num_decks as usize * 52
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// True once more than `penetration` of the shoe has been dealt.
    pub fn needs_reshuffle(&self, penetration: f64) -> bool {
        if self.stacked {
            return false;
        }
        let dealt = self.capacity().saturating_sub(self.remaining());
        dealt as f64 > self.capacity() as f64 * penetration
    }

    /// Refill with every card of every deck, then shuffle.
    pub fn reset(&mut self) {
        self.cards = (0..self.num_decks)
            .flat_map(|_| (0..52).map(Card::from_index))
            .collect();
        self.stacked = false;
        self.shuffle();
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        debug!("Shuffled shoe of {} cards", self.cards.len());
    }
}

impl DrawSource for Shoe {
    fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            warn!("Shoe exhausted, reshuffling {} deck(s)", self.num_decks);
            self.reset();
        }
    }
}
