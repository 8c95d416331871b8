use super::dealer_ev::stand_expectation;
use crate::statekey::{EvCache, StateKey};
use crate::{Action, Hand, Rule, Shoe};

/// Expectation of taking one card and then playing on optimally, choosing
/// between standing and hitting again at every later state.
pub(crate) fn hit_expectation(
    // Input parameters
    rule: &Rule,

    // Parameters to maintain current state
    shoe: &mut Shoe,
    player: &mut Hand,
    dealer: &mut Hand,
    from_split: bool,

    // Memoized results
    cache: &mut EvCache,
) -> f64 {
    let key = StateKey::new(shoe, player, dealer, from_split, Action::Hit);
    if let Some(ev) = cache.get(&key) {
        return ev;
    }

    let mut total_value = 0.0;
    let mut total_weight = 0.0;
    for rank in 1..=10 {
        let count = shoe[rank];
        if count == 0 {
            continue;
        }
        let weight = count as f64;

        shoe.remove_card(rank);
        player.push(rank);

        if player.is_bust() {
            total_value -= weight;
        } else {
            let stand = stand_expectation(rule, shoe, player, dealer, from_split, cache);
            let hit = hit_expectation(rule, shoe, player, dealer, from_split, cache);
            total_value += stand.max(hit) * weight;
        }
        total_weight += weight;

        player.pop();
        shoe.add_card(rank);
    }

    let ev = if total_weight > 0.0 {
        total_value / total_weight
    } else {
        0.0
    };
    cache.insert(key, ev);
    ev
}

/// Expectation of doubling the wager for exactly one more card. A bust
/// forfeits the doubled bet; anything else stands immediately.
pub(crate) fn double_expectation(
    // Input parameters
    rule: &Rule,

    // Parameters to maintain current state
    shoe: &mut Shoe,
    player: &mut Hand,
    dealer: &mut Hand,
    from_split: bool,

    // Memoized results
    cache: &mut EvCache,
) -> f64 {
    let key = StateKey::new(shoe, player, dealer, from_split, Action::Double);
    if let Some(ev) = cache.get(&key) {
        return ev;
    }

    let mut total_value = 0.0;
    let mut total_weight = 0.0;
    for rank in 1..=10 {
        let count = shoe[rank];
        if count == 0 {
            continue;
        }
        let weight = count as f64;

        shoe.remove_card(rank);
        player.push(rank);

        if player.is_bust() {
            total_value -= 2.0 * weight;
        } else {
            total_value +=
                2.0 * stand_expectation(rule, shoe, player, dealer, from_split, cache) * weight;
        }
        total_weight += weight;

        player.pop();
        shoe.add_card(rank);
    }

    let ev = if total_weight > 0.0 {
        total_value / total_weight
    } else {
        0.0
    };
    cache.insert(key, ev);
    ev
}

/// Expectation of splitting a pair into two hands.
///
/// The first post-split hand is enumerated over its next card and played
/// optimally under the post-split rules; the result is doubled because
/// both hands face the same shoe and are symmetric. The depletion of the
/// shoe by the first hand's play is not modelled for the second.
pub(crate) fn split_expectation(
    // Input parameters
    rule: &Rule,

    // Parameters to maintain current state
    shoe: &mut Shoe,
    player: &mut Hand,
    dealer: &mut Hand,

    // Memoized results
    cache: &mut EvCache,
) -> f64 {
    debug_assert!(player.can_split());

    let key = StateKey::new(shoe, player, dealer, true, Action::Split);
    if let Some(ev) = cache.get(&key) {
        return ev;
    }

    let is_ace_split = player.first() == Some(1);
    let may_hit = !is_ace_split || rule.hit_split_aces;
    let may_double = rule.double_after_split
        && (!is_ace_split || (rule.hit_split_aces && rule.double_split_aces));

    let second_card = player.pop().expect("split requires a two-card pair");

    let mut total_value = 0.0;
    let mut total_weight = 0.0;
    for rank in 1..=10 {
        let count = shoe[rank];
        if count == 0 {
            continue;
        }
        let weight = count as f64;

        shoe.remove_card(rank);
        player.push(rank);

        let stand = stand_expectation(rule, shoe, player, dealer, true, cache);
        let hit = if may_hit {
            hit_expectation(rule, shoe, player, dealer, true, cache)
        } else {
            -f64::INFINITY
        };
        let double = if may_double {
            double_expectation(rule, shoe, player, dealer, true, cache)
        } else {
            -f64::INFINITY
        };

        total_value += 2.0 * stand.max(hit).max(double) * weight;
        total_weight += weight;

        player.pop();
        shoe.add_card(rank);
    }

    player.push(second_card);

    let ev = if total_weight > 0.0 {
        total_value / total_weight
    } else {
        0.0
    };
    cache.insert(key, ev);
    ev
}
