pub mod calculation;
mod hand;
mod shoe;
mod statekey;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;
use thiserror::Error;

pub use calculation::Engine;
pub use hand::Hand;
pub use shoe::Shoe;
pub use statekey::{EvCache, StateKey};

/// House rules consulted by the engine. A `Rule` is fixed for the lifetime
/// of an [`Engine`] instance; changing rules means building a new engine.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Payout multiplier for a natural blackjack (1.5 = 3:2, 1.2 = 6:5).
    pub blackjack_odds: f64,
    pub dealer_hits_on_soft_17: bool,
    /// When the dealer shows an ace or a ten-value card, she has already
    /// checked the hole card for a natural before the player acts.
    pub dealer_peeks_for_21: bool,
    /// Whether a two-card 21 dealt to a split hand still pays blackjack
    /// odds. When false it pays even money.
    pub natural_blackjack_splits: bool,
    pub double_after_split: bool,
    pub hit_split_aces: bool,
    /// Requires both `double_after_split` and `hit_split_aces`.
    pub double_split_aces: bool,
    /// Offered at the table, but surrender carries no expectation to
    /// compute: the engine never consults this flag.
    pub can_surrender: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            blackjack_odds: 1.5,
            dealer_hits_on_soft_17: true,
            dealer_peeks_for_21: true,
            natural_blackjack_splits: false,
            double_after_split: true,
            hit_split_aces: false,
            double_split_aces: false,
            can_surrender: true,
        }
    }
}

/// The four player decisions the engine can price.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum Action {
    Stand,
    Hit,
    Double,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("card rank {0} is not in [1, 10]")]
    InvalidRank(u8),
    #[error("dealer hand must contain at least the up card")]
    MissingDealerUpCard,
    #[error("only a two-card pair can be split")]
    NotSplittable,
}
