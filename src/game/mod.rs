use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::options::TableView;
use crate::participant::Participant;
use crate::{
    Dealer, Decider, Error, GameRules, Hand, HandOutcome, Player, PlayerOption, Shoe,
};

/// Settlement of one player hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub player: String,
    pub hand_index: usize,
    pub hand: Hand,
    pub bet: u32,
    pub outcome: HandOutcome,
    /// Money won (positive) or lost (negative).
    pub net: i64,
}

/// Settlement of an insurance side bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceResult {
    pub player: String,
    pub stake: u32,
    pub net: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub dealer_hand: Hand,
    pub hands: Vec<HandResult>,
    pub insurance: Vec<InsuranceResult>,
}

impl RoundReport {
    pub fn net_for(&self, player: &str) -> i64 {
        let hands: i64 = self
            .hands
            .iter()
            .filter(|r| r.player == player)
            .map(|r| r.net)
            .sum();
        let insurance: i64 = self
            .insurance
            .iter()
            .filter(|r| r.player == player)
            .map(|r| r.net)
            .sum();
        hands + insurance
    }
}

/// One table: the shoe, the dealer and the seated players.
pub struct Game {
    rules: GameRules,
    shoe: Shoe,
    dealer: Dealer,
    players: Vec<Player>,
    round: u32,
}

impl Game {
    pub fn new(rules: GameRules) -> Result<Self, Error> {
        let shoe = Shoe::new(rules.num_decks);
        Self::with_shoe(rules, shoe)
    }

    pub fn with_shoe(rules: GameRules, shoe: Shoe) -> Result<Self, Error> {
        rules.validate()?;
        Ok(Self {
            rules,
            shoe,
            dealer: Dealer::new(rules.dealer_hits_soft_17),
            players: Vec::new(),
            round: 0,
        })
    }

    /// Seat `number_of_players` players named `Player_1`, `Player_2`, ...
    pub fn standard_setup(&mut self, number_of_players: usize) -> Result<(), Error> {
        for i in 1..=number_of_players {
            self.add_player(format!("Player_{i}"), self.rules.starting_money)?;
        }
        Ok(())
    }

    pub fn add_player(&mut self, name: impl Into<String>, money: i64) -> Result<&mut Player, Error> {
        let name = name.into();
        if self.players.iter().any(|p| p.name() == name) {
            return Err(Error::DuplicatePlayer(name));
        }
        debug!("Seating {name} with {money}");
        self.players.push(Player::new(name, money));
        let index = self.players.len() - 1;
        Ok(&mut self.players[index])
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Result<&Player, Error> {
        self.players.get(index).ok_or(Error::UnknownPlayer(index))
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Start a round: every player who can afford it stakes the minimum bet.
    ///
    /// A table still holding the previous round's cards is reset first.
    pub fn place_bets(&mut self) -> Result<(), Error> {
        if self.has_stale_round() {
            debug!("Clearing cards left from round {}", self.round);
            self.reset_round();
        }

        let min_bet = self.rules.min_bet;
        let mut placed = 0;
        for player in &mut self.players {
            if player.can_cover(min_bet) {
                player.add_hand(min_bet);
                placed += 1;
            } else {
                warn!("{} cannot cover the minimum bet of {}", player.name(), min_bet);
            }
        }

        if placed == 0 {
            if let Some(player) = self.players.first() {
                return Err(Error::InsufficientFunds {
                    name: player.name().to_string(),
                    money: player.money,
                    needed: i64::from(min_bet),
                });
            }
        }
        Ok(())
    }

    fn has_stale_round(&self) -> bool {
        !self.dealer.hand().is_empty()
            || self
                .players
                .iter()
                .any(|p| !p.hands().is_empty() || p.insurance > 0)
    }

    /// Two cards to every staked hand, then two to the dealer.
    pub fn deal(&mut self) {
        for player in &mut self.players {
            for hand in 0..player.hands().len() {
                if let Some(hand) = player.hand_mut(hand) {
                    hand.deal(&mut self.shoe);
                }
            }
        }
        self.dealer.hand_mut().deal(&mut self.shoe);
        info!("{} shows {}", self.dealer.name(), self.dealer.hand().masked());
    }

    fn table_view(&self, player: &Player) -> TableView<'_> {
        TableView {
            rules: &self.rules,
            dealer_up_card: self.dealer.up_card(),
            hand_count: player.hands().len(),
            insurance_taken: player.insurance > 0,
        }
    }

    /// Legal options for one hand, restricted to what the player can afford.
    pub fn player_options(
        &self,
        player_index: usize,
        hand_index: usize,
    ) -> Result<Vec<PlayerOption>, Error> {
        let player = self.player(player_index)?;
        let hand = player.hand(hand_index).ok_or(Error::UnknownHand {
            player: player_index,
            hand: hand_index,
        })?;

        let mut options = hand.options(&self.table_view(player));
        options.retain(|option| match option {
            PlayerOption::DoubleDown | PlayerOption::Split => player.can_cover(hand.bet),
            PlayerOption::TakeInsurance => player.can_cover(hand.bet / 2),
            PlayerOption::Stand | PlayerOption::Hit => true,
        });
        Ok(options)
    }

    pub fn act(
        &mut self,
        player_index: usize,
        hand_index: usize,
        option: PlayerOption,
    ) -> Result<(), Error> {
        if !self.player_options(player_index, hand_index)?.contains(&option) {
            return Err(Error::IllegalOption(option));
        }

        let player = &mut self.players[player_index];
        info!("{} chose {} on hand {}", player.name(), option.label(), hand_index + 1);
        player.act(hand_index, option, &mut self.shoe);
        Ok(())
    }

    /// Play every hand of one player, left to right, including hands split
    /// off along the way.
    fn play_player(&mut self, player_index: usize, decider: &mut dyn Decider) -> Result<(), Error> {
        let mut hand_index = 0;
        while hand_index < self.players[player_index].hands().len() {
            loop {
                let player = &self.players[player_index];
                let hand = &player.hands()[hand_index];
                if !hand.playing {
                    break;
                }

                let options = self.player_options(player_index, hand_index)?;
                if options.is_empty() {
                    if let Some(hand) = self.players[player_index].hand_mut(hand_index) {
                        hand.playing = false;
                    }
                    break;
                }

                debug!("Playing hand {} of {}", hand, player.name());
                let choice = decider.decide(player, hand_index, &self.dealer, &options);
                self.act(player_index, hand_index, choice)?;
            }
            hand_index += 1;
        }
        Ok(())
    }

    pub fn play_dealer(&mut self) {
        self.dealer.play_hand(&mut self.shoe);
        info!("{}", self.dealer.hand().show(self.dealer.name()));
    }

    /// Resolve every hand against the dealer and move the money.
    pub fn settle(&mut self) -> RoundReport {
        let dealer_hand: &Hand = self.dealer.hand();
        let dealer_blackjack = dealer_hand.is_blackjack();
        let payout = self.rules.blackjack_payout;
        let mut hands = Vec::new();
        let mut insurance = Vec::new();

        for player in &mut self.players {
            let name = player.name().to_string();
            let natural_possible = player.hands().len() == 1;
            let mut net_total = 0;

            for hand_index in 0..player.hands().len() {
                let Some(hand) = player.hand_mut(hand_index) else {
                    continue;
                };
                let outcome = hand.evaluate(dealer_hand);
                let net = match outcome {
                    HandOutcome::Win if natural_possible && hand.is_blackjack() => {
                        payout.calculate_payout(hand.bet)
                    }
                    HandOutcome::Win => i64::from(hand.bet),
                    HandOutcome::Lose => -i64::from(hand.bet),
                    HandOutcome::Draw => 0,
                };
                net_total += net;
                hands.push(HandResult {
                    player: name.clone(),
                    hand_index,
                    hand: Hand::clone(hand),
                    bet: hand.bet,
                    outcome,
                    net,
                });
                info!("{} hand {}: {} ({})", name, hand_index + 1, hand, outcome);
            }

            if player.insurance > 0 {
                let stake = player.insurance;
                let net = if dealer_blackjack {
                    2 * i64::from(stake)
                } else {
                    -i64::from(stake)
                };
                net_total += net;
                insurance.push(InsuranceResult {
                    player: name.clone(),
                    stake,
                    net,
                });
            }

            if !player.hands().is_empty() {
                player.add_money(net_total);
                info!("{}", player.money_summary());
            }
        }

        RoundReport {
            round: self.round,
            dealer_hand: Hand::clone(dealer_hand),
            hands,
            insurance,
        }
    }

    /// Bet, deal, play every hand, play the dealer, settle.
    pub fn play_round(&mut self, decider: &mut dyn Decider) -> Result<RoundReport, Error> {
        self.round += 1;
        info!("Round {}", self.round);

        self.place_bets()?;
        self.deal();

        for player_index in 0..self.players.len() {
            self.play_player(player_index, decider)?;
        }

        self.play_dealer();
        Ok(self.settle())
    }

    /// Clear the table and reshuffle once the shoe is past its penetration.
    pub fn reset_round(&mut self) {
        for player in &mut self.players {
            player.clear_hands();
            player.insurance = 0;
        }
        self.dealer.hand_mut().clear();

        if self.shoe.needs_reshuffle(self.rules.penetration) {
            info!("Reshuffling the shoe");
            self.shoe.reset();
        }
    }
}
