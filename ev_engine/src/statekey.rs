use std::collections::HashMap;

use crate::{Action, Hand, Shoe};

/// Canonical memoization key for one node of the recursion.
///
/// Two hands with the same score and softness have identical continuations
/// against the same shoe, so the key stores scores rather than cards and
/// thereby collapses physically distinct but equivalent deals. The full
/// shoe composition stays in the key: probes compare it for deep equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    shoe_counts: [u16; 10],
    player_score: u16,
    player_soft: bool,
    dealer_score: u16,
    dealer_soft: bool,
    from_split: bool,
    action: Action,
}

impl StateKey {
    pub fn new(
        shoe: &Shoe,
        player: &Hand,
        dealer: &Hand,
        from_split: bool,
        action: Action,
    ) -> StateKey {
        StateKey {
            shoe_counts: shoe.counts(),
            player_score: player.score(),
            player_soft: player.is_soft(),
            dealer_score: dealer.score(),
            dealer_soft: dealer.is_soft(),
            from_split,
            action,
        }
    }
}

/// Expectation cache owned by one engine instance.
///
/// Grows monotonically while a query runs and is never evicted during one;
/// a fresh engine starts with a fresh cache.
#[derive(Debug, Clone, Default)]
pub struct EvCache {
    entries: HashMap<StateKey, f64>,
}

impl EvCache {
    pub fn new() -> EvCache {
        EvCache {
            entries: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &StateKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: StateKey, ev: f64) {
        self.entries.insert(key, ev);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn generate_random_counts(number_of_decks: u8) -> [u16; 10] {
        let mut rng = rand::thread_rng();
        let mut counts: [u16; 10] = [0; 10];
        for count in counts.iter_mut().take(9) {
            *count = rng.gen_range(0..=(number_of_decks as u16) * 4);
        }
        counts[9] = rng.gen_range(0..=(number_of_decks as u16) * 16);

        counts
    }

    fn key_for(shoe: &Shoe, player: &[u8], dealer: &[u8], action: Action) -> StateKey {
        StateKey::new(
            shoe,
            &Hand::from_ranks(player).unwrap(),
            &Hand::from_ranks(dealer).unwrap(),
            false,
            action,
        )
    }

    #[test]
    fn hands_with_equal_score_and_softness_share_a_key() {
        let shoe = Shoe::with_decks(2);
        let a = key_for(&shoe, &[10, 6], &[10], Action::Stand);
        let b = key_for(&shoe, &[9, 7], &[10], Action::Stand);
        assert_eq!(a, b);

        let soft = key_for(&shoe, &[1, 6], &[10], Action::Stand);
        let hard = key_for(&shoe, &[10, 7], &[10], Action::Stand);
        assert_ne!(soft, hard);
    }

    #[test]
    fn action_and_split_flag_distinguish_keys() {
        let shoe = Shoe::with_decks(2);
        let stand = key_for(&shoe, &[8, 8], &[6], Action::Stand);
        let hit = key_for(&shoe, &[8, 8], &[6], Action::Hit);
        assert_ne!(stand, hit);

        let player = Hand::from_ranks(&[8, 8]).unwrap();
        let dealer = Hand::from_ranks(&[6]).unwrap();
        let plain = StateKey::new(&shoe, &player, &dealer, false, Action::Stand);
        let split = StateKey::new(&shoe, &player, &dealer, true, Action::Stand);
        assert_ne!(plain, split);
    }

    #[test]
    fn shoe_composition_distinguishes_keys() {
        for _turn in 0..10 {
            let counts = generate_random_counts(8);
            let mut shoe = Shoe::from_counts(counts);
            let original = key_for(&shoe, &[10, 6], &[10], Action::Hit);

            shoe.add_card(5);
            let changed = key_for(&shoe, &[10, 6], &[10], Action::Hit);
            assert_ne!(original, changed);

            shoe.remove_card(5);
            let restored = key_for(&shoe, &[10, 6], &[10], Action::Hit);
            assert_eq!(original, restored);
        }
    }

    #[test]
    fn cache_probe_after_insert() {
        let shoe = Shoe::with_decks(1);
        let key = key_for(&shoe, &[10, 6], &[10], Action::Stand);

        let mut cache = EvCache::new();
        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), -0.5);
        assert_eq!(cache.get(&key), Some(-0.5));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
