use std::cmp::Ordering;

use crate::statekey::{EvCache, StateKey};
use crate::{Action, Hand, Rule, Shoe};

/// Expected outcome once the player stops drawing, averaged over every
/// dealer completion the house rules allow.
///
/// Branches are weighted by the card count before the draw; every draw is
/// undone on the way back up, so the shoe and hands leave this function in
/// their entry state.
pub(crate) fn stand_expectation(
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
    let key = StateKey::new(shoe, player, dealer, from_split, Action::Stand);
    if let Some(ev) = cache.get(&key) {
        return ev;
    }

    // Case 1: Dealer must stand.
    let dealer_score = dealer.score();
    let must_stand = dealer_score > 17
        || dealer_score == 17 && (!dealer.is_soft() || !rule.dealer_hits_on_soft_17);
    if must_stand {
        let outcome = round_outcome(rule, player, dealer, from_split);
        cache.insert(key, outcome);
        return outcome;
    }

    // Case 2: Dealer must hit.
    let mut total_value = 0.0;
    let mut total_weight = 0.0;
    for rank in 1..=10 {
        let count = shoe[rank];
        if count == 0 {
            continue;
        }
        if completes_peeked_natural(rule, dealer, rank) {
            continue;
        }

        shoe.remove_card(rank);
        dealer.push(rank);
        let child = stand_expectation(rule, shoe, player, dealer, from_split, cache);
        dealer.pop();
        shoe.add_card(rank);

        total_value += child * count as f64;
        total_weight += count as f64;
    }

    let ev = if total_weight > 0.0 {
        total_value / total_weight
    } else {
        0.0
    };
    cache.insert(key, ev);
    ev
}

/// Conditional on the player acting at all, a peeked dealer cannot be
/// holding the hole card that would have completed a natural. The check
/// only applies while the dealer still shows a single card: past that
/// point the hole card has long been drawn.
fn completes_peeked_natural(rule: &Rule, dealer: &Hand, rank: u8) -> bool {
    if !rule.dealer_peeks_for_21 || dealer.len() != 1 {
        return false;
    }
    match dealer.first() {
        Some(10) => rank == 1,
        Some(1) => rank == 10,
        _ => false,
    }
}

/// Terminal payoff for both hands played out, in units of the initial
/// wager. Naturals are classified jointly before any score comparison;
/// a post-split two-card 21 only counts as a natural when the rules say
/// it still pays blackjack odds.
pub(crate) fn round_outcome(rule: &Rule, player: &Hand, dealer: &Hand, from_split: bool) -> f64 {
    let player_natural = player.is_natural() && (!from_split || rule.natural_blackjack_splits);
    let dealer_natural = dealer.is_natural();

    if player_natural && dealer_natural {
        0.0
    } else if player_natural {
        rule.blackjack_odds
    } else if dealer_natural {
        -1.0
    } else if player.is_bust() {
        -1.0
    } else if dealer.is_bust() {
        1.0
    } else {
        match player.score().cmp(&dealer.score()) {
            Ordering::Greater => 1.0,
            Ordering::Equal => 0.0,
            Ordering::Less => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(ranks: &[u8]) -> Hand {
        Hand::from_ranks(ranks).unwrap()
    }

    fn stand(rule: &Rule, shoe: &mut Shoe, player: &[u8], dealer: &[u8]) -> f64 {
        let mut player = hand(player);
        let mut dealer = hand(dealer);
        stand_expectation(rule, shoe, &mut player, &mut dealer, false, &mut EvCache::new())
    }

    #[test]
    fn outcome_prefers_naturals_over_scores() {
        let rule = Rule::default();
        assert_eq!(round_outcome(&rule, &hand(&[1, 10]), &hand(&[10, 1]), false), 0.0);
        assert_eq!(round_outcome(&rule, &hand(&[1, 10]), &hand(&[10, 9]), false), 1.5);
        assert_eq!(round_outcome(&rule, &hand(&[7, 7, 7]), &hand(&[10, 1]), false), -1.0);
    }

    #[test]
    fn outcome_compares_scores_without_naturals() {
        let rule = Rule::default();
        assert_eq!(round_outcome(&rule, &hand(&[10, 9]), &hand(&[10, 8]), false), 1.0);
        assert_eq!(round_outcome(&rule, &hand(&[10, 8]), &hand(&[10, 9]), false), -1.0);
        assert_eq!(round_outcome(&rule, &hand(&[10, 9]), &hand(&[9, 10]), false), 0.0);
        assert_eq!(
            round_outcome(&rule, &hand(&[10, 5, 7]), &hand(&[10, 6]), false),
            -1.0
        );
        assert_eq!(
            round_outcome(&rule, &hand(&[10, 6]), &hand(&[10, 6, 9]), false),
            1.0
        );
        // A player bust loses even to a dealer bust.
        assert_eq!(
            round_outcome(&rule, &hand(&[10, 5, 7]), &hand(&[10, 6, 9]), false),
            -1.0
        );
    }

    #[test]
    fn split_twenty_one_pays_even_money_by_default() {
        let rule = Rule::default();
        assert_eq!(round_outcome(&rule, &hand(&[1, 10]), &hand(&[10, 9]), true), 1.0);

        let generous = Rule {
            natural_blackjack_splits: true,
            ..Rule::default()
        };
        assert_eq!(
            round_outcome(&generous, &hand(&[1, 10]), &hand(&[10, 9]), true),
            1.5
        );
    }

    #[test]
    fn dealer_standing_pat_scores_immediately() {
        let rule = Rule::default();
        let mut shoe = Shoe::with_decks(1);
        let before = shoe.clone();

        assert_eq!(stand(&rule, &mut shoe, &[10, 9], &[10, 8]), 1.0);
        assert_eq!(stand(&rule, &mut shoe, &[10, 6], &[10, 10]), -1.0);
        assert_eq!(shoe, before);
    }

    #[test]
    fn soft_seventeen_follows_the_house_rule() {
        // Dealer shows soft 17 and the only card left is a 4: hitting
        // makes 21 and beats the player's 17, standing pushes.
        let mut shoe = Shoe::from_counts([0, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        let before = shoe.clone();

        let hits = Rule::default();
        assert_eq!(stand(&hits, &mut shoe, &[10, 7], &[1, 6]), -1.0);
        assert_eq!(shoe, before);

        let stands = Rule {
            dealer_hits_on_soft_17: false,
            ..Rule::default()
        };
        assert_eq!(stand(&stands, &mut shoe, &[10, 7], &[1, 6]), 0.0);
    }

    #[test]
    fn hard_seventeen_always_stands() {
        let mut shoe = Shoe::from_counts([0, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(stand(&Rule::default(), &mut shoe, &[10, 8], &[10, 7]), 1.0);
    }

    #[test]
    fn peek_prunes_the_dealer_natural() {
        // Shoe holds one ace and one 6. With the peek rule the ace cannot
        // be the hole card under a ten: the dealer draws the 6 for 16,
        // then the ace for a hard 17, losing to 19. Without the peek the
        // ace branch is a dealer natural and the two branches cancel.
        let rule = Rule::default();
        let mut shoe = Shoe::from_counts([1, 0, 0, 0, 0, 1, 0, 0, 0, 0]);
        let before = shoe.clone();

        assert_eq!(stand(&rule, &mut shoe, &[10, 9], &[10]), 1.0);
        assert_eq!(shoe, before);

        let no_peek = Rule {
            dealer_peeks_for_21: false,
            ..Rule::default()
        };
        assert_eq!(stand(&no_peek, &mut shoe, &[10, 9], &[10]), 0.0);
        assert_eq!(shoe, before);
    }

    #[test]
    fn peek_only_guards_the_hole_card() {
        // The ace is pruned as a hole card but stays drawable afterwards:
        // the dealer runs 10, 5, ace, ace for a hard 17 and loses to 18.
        let rule = Rule::default();
        let mut shoe = Shoe::from_counts([2, 0, 0, 0, 1, 0, 0, 0, 0, 0]);

        assert_eq!(stand(&rule, &mut shoe, &[10, 8], &[10]), 1.0);
    }

    #[test]
    fn exhausted_shoe_defaults_to_zero() {
        let rule = Rule::default();
        let mut shoe = Shoe::from_counts([0; 10]);
        assert_eq!(stand(&rule, &mut shoe, &[10, 6], &[10]), 0.0);
    }
}
