use blackjack::{
    BasicStrategy, Card, Dealer, Decider, Error, Game, GameRules, HandOutcome, Participant,
    Player, PlayerOption, Shoe, BLACKJACK, DEALER_LOWER_LIMIT,
};

fn cards(keys: &[&str]) -> Vec<Card> {
    keys.iter().map(|k| k.parse().unwrap()).collect()
}

/// Hits whenever it is allowed to.
struct AlwaysHit {
    decisions: usize,
}

impl Decider for AlwaysHit {
    fn decide(
        &mut self,
        player: &Player,
        hand_index: usize,
        _dealer: &Dealer,
        options: &[PlayerOption],
    ) -> PlayerOption {
        let hand = player.hand(hand_index).unwrap();
        assert!(hand.playing);
        assert!(!hand.is_bust());
        self.decisions += 1;
        if options.contains(&PlayerOption::Hit) {
            PlayerOption::Hit
        } else {
            PlayerOption::Stand
        }
    }
}

#[test]
fn test_many_rounds_keep_the_books() {
    let mut game = Game::with_shoe(GameRules::default(), Shoe::seeded(6, 1337)).unwrap();
    game.standard_setup(3).unwrap();
    let mut strategy = BasicStrategy;

    for _ in 0..200 {
        let before: Vec<i64> = game.players().iter().map(|p| p.money).collect();
        let report = match game.play_round(&mut strategy) {
            Ok(report) => report,
            Err(Error::InsufficientFunds { .. }) => break,
            Err(e) => panic!("unexpected error: {e}"),
        };

        let dealer = &report.dealer_hand;
        assert!(dealer.is_bust() || dealer.best().unwrap() >= DEALER_LOWER_LIMIT);

        for result in &report.hands {
            assert!(result.hand.len() >= 2);
            if result.hand.is_bust() {
                assert_eq!(result.outcome, HandOutcome::Lose);
            }
        }

        for (player, money) in game.players().iter().zip(before) {
            assert_eq!(player.money - money, report.net_for(player.name()));
        }
        game.reset_round();
    }

    assert!(game.round() > 0);
}

#[test]
fn test_always_hit_ends_every_hand() {
    let mut game = Game::with_shoe(GameRules::default(), Shoe::seeded(2, 42)).unwrap();
    game.standard_setup(2).unwrap();
    let mut decider = AlwaysHit { decisions: 0 };

    for _ in 0..50 {
        let report = game.play_round(&mut decider).unwrap();
        for result in &report.hands {
            let best = result.hand.best();
            assert!(result.hand.is_bust() || best == Some(BLACKJACK));
        }
        game.reset_round();
    }

    assert!(decider.decisions > 0);
}

#[test]
fn test_natural_against_dealer_natural_is_a_push() {
    let shoe = Shoe::stacked(cards(&["AH", "KH", "AS", "QS"]));
    let mut game = Game::with_shoe(GameRules::default(), shoe).unwrap();
    game.add_player("Alice", 100).unwrap();

    let report = game.play_round(&mut BasicStrategy).unwrap();
    assert_eq!(report.hands[0].outcome, HandOutcome::Draw);
    assert_eq!(game.players()[0].money, 100);
}

#[test]
fn test_six_to_five_payout() {
    let rules = GameRules::single_deck();
    let shoe = Shoe::stacked(cards(&["AH", "KH", "9S", "8S"]));
    let mut game = Game::with_shoe(rules, shoe).unwrap();
    game.add_player("Alice", 100).unwrap();

    let report = game.play_round(&mut BasicStrategy).unwrap();
    assert_eq!(report.hands[0].net, 12);
    assert_eq!(game.players()[0].money, 112);
}

#[test]
fn test_rules_from_json() {
    let rules: GameRules =
        serde_json::from_str(r#"{ "min_bet": 25, "dealer_hits_soft_17": true }"#).unwrap();
    assert_eq!(rules.min_bet, 25);
    assert!(rules.dealer_hits_soft_17);
    assert_eq!(rules.num_decks, GameRules::default().num_decks);

    let shoe = Shoe::stacked(cards(&["TC", "9D", "AS", "6S", "4H"]));
    let mut game = Game::with_shoe(rules, shoe).unwrap();
    game.add_player("Alice", 100).unwrap();

    // dealer hits the soft 17 and makes 21
    let report = game.play_round(&mut BasicStrategy).unwrap();
    assert_eq!(report.dealer_hand.best(), Some(21));
    assert_eq!(report.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(game.players()[0].money, 75);
}

#[test]
fn test_report_serializes() {
    let shoe = Shoe::stacked(cards(&["TC", "9D", "TS", "8S"]));
    let mut game = Game::with_shoe(GameRules::default(), shoe).unwrap();
    game.add_player("Alice", 100).unwrap();

    let report = game.play_round(&mut BasicStrategy).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["round"], 1);
    assert_eq!(json["hands"][0]["player"], "Alice");
    assert_eq!(json["hands"][0]["net"], 10);
}
