use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rule: ConfigRule,
    pub ev_calculator: ConfigEvCalculator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRule {
    pub blackjack_odds: f64,
    pub dealer_hits_on_soft_17: bool,
    pub dealer_peeks_for_21: bool,
    pub natural_blackjack_splits: bool,
    pub double_after_split: bool,
    pub hit_split_aces: bool,
    pub double_split_aces: bool,
    pub can_surrender: bool,
}

impl From<ConfigRule> for ev_engine::Rule {
    fn from(config: ConfigRule) -> ev_engine::Rule {
        ev_engine::Rule {
            blackjack_odds: config.blackjack_odds,
            dealer_hits_on_soft_17: config.dealer_hits_on_soft_17,
            dealer_peeks_for_21: config.dealer_peeks_for_21,
            natural_blackjack_splits: config.natural_blackjack_splits,
            double_after_split: config.double_after_split,
            hit_split_aces: config.hit_split_aces,
            double_split_aces: config.double_split_aces,
            can_surrender: config.can_surrender,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEvCalculator {
    pub number_of_decks: u8,
}

/// Reads the content of a given config file and parses it to a Config.
///
/// Panics if any error occurs.
pub fn parse_config_from_file(filename: &str) -> Config {
    let file_content = fs::read_to_string(filename).unwrap();
    serde_yaml::from_str(&file_content).unwrap()
}
