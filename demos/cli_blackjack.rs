//! CLI blackjack example.
//!
//! Set `RUST_LOG=bjtable=debug` to watch the engine's card events.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};

use bjtable::{Card, GameState, GameStatus, Hand, Suit, Table, TableOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Blackjack CLI example (type 'q' to quit)");

    let options = TableOptions::default().with_refill_when_broke(true);
    let table = Table::from_entropy(options);
    let player = table.create_player();
    let player_id = player.id().to_string();

    loop {
        let money = table.get_player(&player_id).map_or(0, |p| p.balance());

        let Some(bet) = prompt_usize(&format!("Balance {money}. Bet amount (0 to quit): ")) else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        let mut round = match table.start_round(&player_id, bet) {
            Ok(round) => round,
            Err(err) => {
                println!("Bet error: {err}");
                continue;
            }
        };

        while round.status() == GameStatus::PlayerTurn {
            print_table(&round);

            println!("{}", format_actions(&round));
            let action = prompt_line("Action: ");

            let result = match action.as_str() {
                "h" | "hit" => table.hit(round.id()),
                "s" | "stand" => table.stand(round.id()),
                "p" | "split" => table.split(round.id()),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            match result {
                Ok(next) => round = next,
                Err(err) => println!("Action error: {err}"),
            }
        }

        print_table(&round);
        println!("Round complete: {}", round.status());
        for result in round.results() {
            println!(
                "Hand {}: {:?} ({} vs {}), paid {}",
                result.hand_index,
                result.outcome,
                result.player_value,
                result.dealer_value,
                result.payout
            );
        }
        println!("Payout: {} on a stake of {}", round.payout(), round.total_bet());

        table.evict_finished();
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(round: &GameState) {
    println!("\nDeck: {} cards remaining", round.deck().len());

    let mut dealer = format_cards(round.dealer_visible_cards());
    if !round.is_finished() {
        dealer.push_str(" ??");
    }
    match round.dealer_visible_score() {
        Some(score) => println!("\nDealer: {dealer} (value {score})"),
        None => println!("\nDealer: {dealer}"),
    }

    for (index, hand) in round.player_hands().enumerate() {
        let marker = if !round.is_finished() && index == round.current_hand_index() {
            "*"
        } else {
            " "
        };
        println!(
            "{} Hand {}: {} | value {} | bet {}",
            marker,
            index,
            format_hand(hand),
            hand.score(),
            round.bet()
        );
    }
    println!();
}

fn format_actions(round: &GameState) -> String {
    let can_split = round.split_hand().is_none() && round.player_hand().is_pair();
    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("split", "p", can_split),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    format_cards(hand.cards())
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
