use ev_engine::{Action, Engine, Shoe};
use strum::IntoEnumIterator;

const DEALER_UP_CARDS: [u8; 10] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 1];

/// Prints the classic three decision charts for a fresh shoe: hard totals,
/// soft totals and pairs, one best-action letter per cell.
pub fn print_decision_charts(engine: &mut Engine, number_of_decks: u8) {
    println!("Hard:");
    for hand_total in 5..=18 {
        for dealer_up_card in DEALER_UP_CARDS {
            let hand_cards = {
                if hand_total - 2 <= 10 {
                    [2, hand_total - 2]
                } else {
                    [10, hand_total - 10]
                }
            };
            print_best_decision(engine, number_of_decks, &hand_cards, dealer_up_card);
        }
        println!();
    }

    println!();
    println!("Soft:");
    for another_card in 2..=9 {
        for dealer_up_card in DEALER_UP_CARDS {
            print_best_decision(engine, number_of_decks, &[1, another_card], dealer_up_card);
        }
        println!();
    }

    println!();
    println!("Pairs:");
    for pair_card in 1..=10 {
        for dealer_up_card in DEALER_UP_CARDS {
            print_best_decision(
                engine,
                number_of_decks,
                &[pair_card, pair_card],
                dealer_up_card,
            );
        }
        println!();
    }
}

fn print_best_decision(engine: &mut Engine, number_of_decks: u8, player: &[u8], dealer_up_card: u8) {
    let mut shoe = Shoe::with_decks(number_of_decks);
    for &rank in player {
        shoe.remove_card(rank);
    }
    shoe.remove_card(dealer_up_card);

    let mut best_action = Action::Stand;
    let mut best_ev = -f64::INFINITY;
    for action in Action::iter() {
        let Ok(ev) = engine.expectation(action, &shoe, player, &[dealer_up_card]) else {
            continue;
        };
        if ev > best_ev {
            best_ev = ev;
            best_action = action;
        }
    }

    print!("{} ", decision_to_char(best_action));
}

fn decision_to_char(action: Action) -> char {
    match action {
        Action::Stand => 'S',
        Action::Hit => 'H',
        Action::Double => 'D',
        Action::Split => 'P',
    }
}
