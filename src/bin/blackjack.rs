use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use blackjack::{
    BasicStrategy, Dealer, Decider, Error, Game, GameRules, Participant, PayoutRatio, Player,
    PlayerOption, RoundReport, Shoe,
};
use clap::Parser;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "blackjack", about = "Play blackjack at a single table")]
struct Cli {
    /// Number of players at the table
    #[arg(long, env = "BLACKJACK_PLAYERS", default_value = "1")]
    players: usize,

    /// Rules preset: default, european, single_deck
    #[arg(long, env = "BLACKJACK_PRESET")]
    preset: Option<String>,

    /// JSON rules file; missing fields take the default rules
    #[arg(long, env = "BLACKJACK_RULES")]
    rules: Option<PathBuf>,

    /// Number of decks in the shoe
    #[arg(long, env = "BLACKJACK_DECKS")]
    decks: Option<u8>,

    /// Stake placed on each hand
    #[arg(long, env = "BLACKJACK_MIN_BET")]
    min_bet: Option<u32>,

    /// Money each player starts with
    #[arg(long, env = "BLACKJACK_MONEY")]
    money: Option<i64>,

    /// Blackjack payout ratio (e.g. "3:2", "6:5")
    #[arg(long, env = "BLACKJACK_PAYOUT")]
    blackjack_payout: Option<PayoutRatio>,

    /// Dealer hits soft 17
    #[arg(long, env = "BLACKJACK_H17")]
    dealer_hits_soft_17: Option<bool>,

    /// Seed the shoe for a reproducible game
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    /// Let basic strategy play every hand
    #[arg(long)]
    auto: bool,

    /// Stop after this many rounds instead of asking
    #[arg(long)]
    rounds: Option<u32>,
}

impl Cli {
    fn game_rules(&self) -> Result<GameRules, BoxErr> {
        let mut rules = match &self.preset {
            Some(preset) => GameRules::preset(preset)?,
            None => GameRules::default(),
        };

        if let Some(path) = &self.rules {
            let text = std::fs::read_to_string(path)?;
            rules = serde_json::from_str(&text)?;
            log::info!("Loaded rules from {}", path.display());
        }

        if let Some(decks) = self.decks {
            rules.num_decks = decks;
        }
        if let Some(min_bet) = self.min_bet {
            rules.min_bet = min_bet;
        }
        if let Some(money) = self.money {
            rules.starting_money = money;
        }
        if let Some(payout) = self.blackjack_payout {
            rules.blackjack_payout = payout;
        }
        if let Some(h17) = self.dealer_hits_soft_17 {
            rules.dealer_hits_soft_17 = h17;
        }

        rules.validate()?;
        Ok(rules)
    }
}

/// Asks at the terminal for every decision.
struct Terminal;

impl Decider for Terminal {
    fn decide(
        &mut self,
        player: &Player,
        hand_index: usize,
        dealer: &Dealer,
        options: &[PlayerOption],
    ) -> PlayerOption {
        if let Some(hand) = player.hand(hand_index) {
            println!();
            println!("{} shows {}", dealer.name(), dealer.hand().masked());
            println!("Playing hand {}", hand.show(player.name()));
        }

        let prompt = options
            .iter()
            .map(|option| option.readable())
            .collect::<Vec<_>>()
            .join(", ");

        loop {
            let Some(line) = prompt_line(&format!("{prompt}? ")) else {
                log::warn!("Input closed, standing");
                return PlayerOption::Stand;
            };
            match line.parse::<PlayerOption>() {
                Ok(option) if options.contains(&option) => return option,
                Ok(option) => println!("{} is not available, try again.", option.label()),
                Err(_) => println!("Key {} not recognised, try again.", line.trim()),
            }
        }
    }
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn print_report(game: &Game, report: &RoundReport) {
    println!();
    println!("{}", report.dealer_hand.show(game.dealer().name()));
    for result in &report.hands {
        println!(
            "{} hand {}: {}  {} ({:+})",
            result.player,
            result.hand_index + 1,
            result.hand,
            result.outcome,
            result.net
        );
    }
    for result in &report.insurance {
        println!("{} insurance: {:+}", result.player, result.net);
    }
    for player in game.players() {
        println!("{}", player.money_summary());
    }
}

fn run(cli: Cli) -> Result<(), BoxErr> {
    let rules = cli.game_rules()?;
    let shoe = match cli.seed {
        Some(seed) => Shoe::seeded(rules.num_decks, seed),
        None => Shoe::new(rules.num_decks),
    };
    let mut game = Game::with_shoe(rules, shoe)?;
    game.standard_setup(cli.players)?;

    let mut decider: Box<dyn Decider> = if cli.auto {
        Box::new(BasicStrategy)
    } else {
        Box::new(Terminal)
    };

    loop {
        let report = match game.play_round(decider.as_mut()) {
            Ok(report) => report,
            Err(Error::InsufficientFunds { name, money, needed }) => {
                println!("{name} has {money} left and cannot cover a bet of {needed}");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        print_report(&game, &report);
        game.reset_round();

        let more = match cli.rounds {
            Some(rounds) => game.round() < rounds,
            None if cli.auto => false,
            None => prompt_line("\nPlay another round? [Y/n] ")
                .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes"))
                .unwrap_or(false),
        };
        if !more {
            break;
        }
    }

    println!("\nGame ended with:");
    for player in game.players() {
        println!("  - {}: {}", player.name(), player.money);
    }
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
