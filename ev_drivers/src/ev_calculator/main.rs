mod chart;

use clap::Parser;
use ev_drivers::parse_config_from_file;
use ev_engine::{Action, Engine, Rule, Shoe};
use strum::IntoEnumIterator;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "~/.ev_calculator.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Player hand as comma-separated ranks, e.g. "10,6"
    #[arg(short, long)]
    player: Option<String>,

    /// Dealer up card(s) as comma-separated ranks, e.g. "10"
    #[arg(short, long)]
    dealer: Option<String>,

    /// Evaluate a single action (Stand, Hit, Double or Split) instead of
    /// all of them
    #[arg(short, long)]
    action: Option<Action>,

    /// Print the hard, soft and pair decision charts for a fresh shoe
    #[arg(long)]
    chart: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = CommandLineArgs::parse();
    if args.config == DEFAULT_CONFIG_PATH {
        let home_dir = home::home_dir().expect("Cannot find home directory");
        let config_file_path = home_dir.join(".ev_calculator.yml");
        if !config_file_path.exists() {
            panic!("Config file not exists");
        }
        if config_file_path.is_dir() {
            panic!("This should be a path rather than a directory");
        }
        args.config = String::from(config_file_path.to_str().unwrap());
    }
    let args = args;

    let config = parse_config_from_file(&args.config);
    let rule: Rule = config.rule.into();
    let number_of_decks = config.ev_calculator.number_of_decks;
    info!(?rule, number_of_decks, "configuration loaded");

    let mut engine = Engine::new(rule);

    if args.chart {
        chart::print_decision_charts(&mut engine, number_of_decks);
        return;
    }

    let player = parse_ranks(args.player.as_deref().expect("--player is required"));
    let dealer = parse_ranks(args.dealer.as_deref().expect("--dealer is required"));
    let shoe = shoe_after_deal(number_of_decks, &player, &dealer);

    match args.action {
        Some(action) => {
            let ev = engine
                .expectation(action, &shoe, &player, &dealer)
                .expect("cannot evaluate the given situation");
            println!("{:?}: {:+.6}", action, ev);
        }
        None => {
            let mut best: Option<(Action, f64)> = None;
            for action in Action::iter() {
                let ev = match engine.expectation(action, &shoe, &player, &dealer) {
                    Ok(ev) => ev,
                    // A non-pair hand simply has no split expectation.
                    Err(_) if action == Action::Split => continue,
                    Err(error) => panic!("cannot evaluate the given situation: {}", error),
                };
                println!("{:?}: {:+.6}", action, ev);
                if best.map_or(true, |(_, best_ev)| ev > best_ev) {
                    best = Some((action, ev));
                }
            }
            if let Some((action, ev)) = best {
                println!("Best: {:?} ({:+.6})", action, ev);
            }
        }
    }
    info!(cache_entries = engine.cache_entries(), "evaluation finished");
}

fn parse_ranks(input: &str) -> Vec<u8> {
    input
        .split(',')
        .map(|rank| {
            rank.trim()
                .parse::<u8>()
                .expect("Hand ranks must be integers in [1, 10]")
        })
        .collect()
}

fn shoe_after_deal(number_of_decks: u8, player: &[u8], dealer: &[u8]) -> Shoe {
    let mut shoe = Shoe::with_decks(number_of_decks);
    for &rank in player.iter().chain(dealer) {
        shoe.remove_card(rank);
    }
    shoe
}
