mod dealer_ev;
mod player_ev;

use tracing::debug;

use crate::statekey::EvCache;
use crate::{Action, EngineError, Hand, Rule, Shoe};

/// Exact expectation engine for one table configuration.
///
/// The engine owns its rule set and its memoization cache. It is cheap to
/// construct and not safe for concurrent use; callers wanting parallelism
/// shard queries across independent instances, each with its own cache.
#[derive(Debug, Default)]
pub struct Engine {
    rule: Rule,
    cache: EvCache,
}

impl Engine {
    pub fn new(rule: Rule) -> Engine {
        Engine {
            rule,
            cache: EvCache::new(),
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Number of memoized states accumulated so far.
    pub fn cache_entries(&self) -> usize {
        self.cache.len()
    }

    /// Expectation of standing on the current hand.
    pub fn stand(&mut self, shoe: &Shoe, player: &[u8], dealer: &[u8]) -> Result<f64, EngineError> {
        self.expectation(Action::Stand, shoe, player, dealer)
    }

    /// Expectation of hitting and then playing on optimally.
    pub fn hit(&mut self, shoe: &Shoe, player: &[u8], dealer: &[u8]) -> Result<f64, EngineError> {
        self.expectation(Action::Hit, shoe, player, dealer)
    }

    /// Expectation of doubling the wager for exactly one more card.
    pub fn double(
        &mut self,
        shoe: &Shoe,
        player: &[u8],
        dealer: &[u8],
    ) -> Result<f64, EngineError> {
        self.expectation(Action::Double, shoe, player, dealer)
    }

    /// Expectation of splitting the hand, which must be a two-card pair.
    pub fn split(&mut self, shoe: &Shoe, player: &[u8], dealer: &[u8]) -> Result<f64, EngineError> {
        self.expectation(Action::Split, shoe, player, dealer)
    }

    /// Expectation of the given action. The caller's shoe and hands are
    /// copied into the recursion state and never mutated.
    pub fn expectation(
        &mut self,
        action: Action,
        shoe: &Shoe,
        player: &[u8],
        dealer: &[u8],
    ) -> Result<f64, EngineError> {
        let mut player = Hand::from_ranks(player)?;
        let mut dealer = Hand::from_ranks(dealer)?;
        if dealer.is_empty() {
            return Err(EngineError::MissingDealerUpCard);
        }
        if action == Action::Split && !player.can_split() {
            return Err(EngineError::NotSplittable);
        }

        let mut shoe = shoe.clone();
        let rule = self.rule;
        let cache = &mut self.cache;
        let ev = match action {
            Action::Stand => dealer_ev::stand_expectation(
                &rule,
                &mut shoe,
                &mut player,
                &mut dealer,
                false,
                cache,
            ),
            Action::Hit => player_ev::hit_expectation(
                &rule,
                &mut shoe,
                &mut player,
                &mut dealer,
                false,
                cache,
            ),
            Action::Double => player_ev::double_expectation(
                &rule,
                &mut shoe,
                &mut player,
                &mut dealer,
                false,
                cache,
            ),
            Action::Split => {
                player_ev::split_expectation(&rule, &mut shoe, &mut player, &mut dealer, cache)
            }
        };
        debug!(
            ?action,
            ev,
            cache_entries = self.cache.len(),
            "expectation calculated"
        );
        Ok(ev)
    }
}
