use crate::{Card, Dealer, Player, PlayerHand, PlayerOption, Rank};

/// Chooses an option for the hand being played.
pub trait Decider {
    /// `options` is never empty; the answer must be one of them.
    fn decide(
        &mut self,
        player: &Player,
        hand_index: usize,
        dealer: &Dealer,
        options: &[PlayerOption],
    ) -> PlayerOption;
}

/// The standard hit/stand/double/split chart. Never insures.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy;

impl Decider for BasicStrategy {
    fn decide(
        &mut self,
        player: &Player,
        hand_index: usize,
        dealer: &Dealer,
        options: &[PlayerOption],
    ) -> PlayerOption {
        let (Some(hand), Some(up_card)) = (player.hand(hand_index), dealer.up_card()) else {
            return PlayerOption::Stand;
        };
        let wanted = optimal_move(
            hand,
            &up_card,
            options.contains(&PlayerOption::DoubleDown),
            options.contains(&PlayerOption::Split),
        );

        if options.contains(&wanted) {
            wanted
        } else {
            PlayerOption::Stand
        }
    }
}

/// Up-card value with the Ace high, as the chart is written.
fn up_card_value(card: &Card) -> u8 {
    if card.is_ace() {
        11
    } else {
        card.value()
    }
}

/// Get the optimal move based on basic strategy
pub fn optimal_move(
    hand: &PlayerHand,
    dealer_up_card: &Card,
    can_double: bool,
    can_split: bool,
) -> PlayerOption {
    let Some(player_value) = hand.best() else {
        return PlayerOption::Stand;
    };
    let dealer_value = up_card_value(dealer_up_card);
    let is_soft = hand.is_soft();

    if can_split && hand.can_split() {
        match hand.cards()[0].rank {
            // Always split Aces and 8s
            Rank::Ace | Rank::Eight => return PlayerOption::Split,
            Rank::Nine => {
                if !matches!(dealer_value, 7 | 10 | 11) {
                    return PlayerOption::Split;
                }
            }
            Rank::Two | Rank::Three | Rank::Six | Rank::Seven => {
                if (2..=7).contains(&dealer_value) {
                    return PlayerOption::Split;
                }
            }
            // Never split 10s, 5s, 4s
            _ => {}
        }
    }

    if can_double {
        let double = if is_soft {
            match player_value {
                19 => dealer_value == 6,
                18 => (2..=6).contains(&dealer_value),
                17 => (3..=6).contains(&dealer_value),
                15 | 16 => (4..=6).contains(&dealer_value),
                13 | 14 => (5..=6).contains(&dealer_value),
                _ => false,
            }
        } else {
            match player_value {
                11 => true,
                10 => dealer_value <= 9,
                9 => (3..=6).contains(&dealer_value),
                _ => false,
            }
        };
        if double {
            return PlayerOption::DoubleDown;
        }
    }

    let stand = if is_soft {
        player_value >= 19 || (player_value == 18 && dealer_value < 9)
    } else {
        match player_value {
            17.. => true,
            13..=16 => (2..=6).contains(&dealer_value),
            12 => (4..=6).contains(&dealer_value),
            _ => false,
        }
    };

    if stand {
        PlayerOption::Stand
    } else {
        PlayerOption::Hit
    }
}
