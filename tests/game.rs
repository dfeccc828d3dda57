//! Round integration tests.

use std::collections::HashSet;
use std::thread;

use bjtable::{
    ActionError, Card, DECK_SIZE, Deck, GameState, GameStatus, HandOutcome, Rank, SplitRejection,
    StartError, Suit, Table, TableOptions,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Deck dealt in the given order: player, player, dealer, dealer, then draws.
fn stacked(cards: &[Card]) -> Deck {
    Deck::from_cards(cards.iter().copied())
}

fn table_with_player(balance: usize) -> Table {
    let table = Table::new(TableOptions::default(), 42);
    table.register_player("p1", balance);
    table
}

fn balance(table: &Table) -> usize {
    table.get_player("p1").unwrap().balance()
}

fn all_cards(state: &GameState) -> Vec<Card> {
    let mut cards: Vec<Card> = state.deck().iter().copied().collect();
    for hand in state.player_hands() {
        cards.extend_from_slice(hand.cards());
    }
    cards.extend_from_slice(state.dealer_hand().cards());
    cards
}

#[test]
fn stand_with_dealer_bust_pays_double() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),  // player
        card(Suit::Clubs, Rank::Seven), // player
        card(Suit::Spades, Rank::Ten),  // dealer up
        card(Suit::Hearts, Rank::Six),  // dealer hole
        card(Suit::Clubs, Rank::King),  // dealer draw
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert_eq!(round.status(), GameStatus::PlayerTurn);
    assert_eq!(round.payout(), 0);
    assert_eq!(balance(&table), 90);

    let round = table.stand(round.id()).unwrap();
    assert_eq!(round.status(), GameStatus::PlayerWon);
    assert_eq!(round.dealer_hand().len(), 3);
    assert!(round.dealer_hand().is_bust());
    assert_eq!(round.payout(), 20);
    assert_eq!(balance(&table), 110);
}

#[test]
fn natural_blackjack_pays_three_to_two() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::King),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Hearts, Rank::Seven),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert_eq!(round.status(), GameStatus::PlayerWon);
    assert_eq!(round.payout(), 25);
    assert_eq!(round.results()[0].outcome, HandOutcome::Blackjack);
    assert_eq!(balance(&table), 115);
}

#[test]
fn natural_payout_rounds_down_on_odd_bets() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::King),
        card(Suit::Clubs, Rank::Ace),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Hearts, Rank::Seven),
    ]);

    let round = table.start_round_with_deck("p1", 5, deck).unwrap();
    assert_eq!(round.payout(), 12);
    assert_eq!(balance(&table), 107);
}

#[test]
fn both_naturals_push() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::Queen),
        card(Suit::Spades, Rank::Ace),
        card(Suit::Hearts, Rank::Jack),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert_eq!(round.status(), GameStatus::Push);
    assert_eq!(round.payout(), 10);
    assert_eq!(balance(&table), 100);
}

#[test]
fn dealer_natural_wins_immediately() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Nine),
        card(Suit::Spades, Rank::Ace),
        card(Suit::Hearts, Rank::King),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert_eq!(round.status(), GameStatus::DealerWon);
    assert_eq!(round.payout(), 0);
    assert_eq!(balance(&table), 90);
}

#[test]
fn bust_on_hit_ends_round() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Nine), // player hit
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let round = table.hit(round.id()).unwrap();
    assert_eq!(round.player_hand().score(), 25);
    assert_eq!(round.status(), GameStatus::DealerWon);
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(round.payout(), 0);
    assert_eq!(balance(&table), 90);
}

#[test]
fn finished_round_rejects_every_action() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Nine),
        card(Suit::Diamonds, Rank::Two),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let finished = table.hit(round.id()).unwrap();
    assert!(finished.is_finished());

    for result in [
        table.hit(round.id()),
        table.stand(round.id()),
        table.split(round.id()),
    ] {
        assert!(matches!(
            result,
            Err(ActionError::InvalidState {
                status: GameStatus::DealerWon,
                ..
            })
        ));
    }

    assert_eq!(table.get_game(round.id()).unwrap(), finished);
    assert_eq!(balance(&table), 90);
}

#[test]
fn dealer_hits_soft_17() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Nine),
        card(Suit::Spades, Rank::Ace),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Clubs, Rank::Four), // dealer draw to 21
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let round = table.stand(round.id()).unwrap();
    assert_eq!(round.dealer_hand().len(), 3);
    assert_eq!(round.dealer_hand().score(), 21);
    assert_eq!(round.status(), GameStatus::DealerWon);
    assert_eq!(balance(&table), 90);
}

#[test]
fn dealer_stands_on_hard_17_and_ties_push() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Seven),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Four),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let round = table.stand(round.id()).unwrap();
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(round.status(), GameStatus::Push);
    assert_eq!(round.payout(), 10);
    assert_eq!(round.results()[0].outcome, HandOutcome::Push);
    assert_eq!(balance(&table), 100);
}

#[test]
fn split_debits_second_stake_and_deals_each_hand() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Two),   // first hand
        card(Suit::Clubs, Rank::Three), // second hand
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let round = table.split(round.id()).unwrap();

    assert_eq!(balance(&table), 80);
    assert_eq!(round.current_hand_index(), 0);
    assert_eq!(round.status(), GameStatus::PlayerTurn);
    assert_eq!(round.total_bet(), 20);

    assert_eq!(
        round.player_hand().cards(),
        &[card(Suit::Hearts, Rank::Eight), card(Suit::Clubs, Rank::Two)]
    );
    let split_hand = round.split_hand().unwrap();
    assert_eq!(
        split_hand.cards(),
        &[card(Suit::Diamonds, Rank::Eight), card(Suit::Clubs, Rank::Three)]
    );
    assert_eq!(round.player_hand().score(), 10);
    assert_eq!(split_hand.score(), 11);
}

#[test]
fn split_hands_resolve_independently() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Two),   // first hand: 10
        card(Suit::Clubs, Rank::Three), // second hand: 11
        card(Suit::Clubs, Rank::King),  // second hand hit: 21
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    table.split(id).unwrap();

    let round = table.stand(id).unwrap();
    assert_eq!(round.current_hand_index(), 1);
    assert_eq!(round.status(), GameStatus::PlayerTurn);

    let round = table.hit(id).unwrap();
    assert_eq!(round.split_hand().unwrap().score(), 21);
    assert_eq!(round.status(), GameStatus::PlayerTurn);

    let round = table.stand(id).unwrap();
    assert_eq!(round.dealer_hand().score(), 17);

    let outcomes: Vec<HandOutcome> = round.results().iter().map(|r| r.outcome).collect();
    assert_eq!(outcomes, vec![HandOutcome::Lose, HandOutcome::Win]);
    assert_eq!(round.payout(), 20);
    // Primary hand lost but not every hand did.
    assert_eq!(round.status(), GameStatus::Push);
    assert_eq!(balance(&table), 100);
}

#[test]
fn split_with_winning_primary_reports_player_won() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Nine),
        card(Suit::Diamonds, Rank::Nine),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Clubs, Rank::Ten), // first hand: 19
        card(Suit::Clubs, Rank::Six), // second hand: 15
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    table.split(id).unwrap();
    table.stand(id).unwrap();
    let round = table.stand(id).unwrap();

    assert_eq!(round.status(), GameStatus::PlayerWon);
    assert_eq!(round.payout(), 20);
    assert_eq!(balance(&table), 100);
}

#[test]
fn bust_on_first_split_hand_moves_to_second() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Clubs, Rank::Six),    // first hand: 14
        card(Suit::Clubs, Rank::Seven),  // second hand: 15
        card(Suit::Clubs, Rank::Ten),    // first hand hit: bust
        card(Suit::Spades, Rank::Queen), // second hand hit: bust
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    table.split(id).unwrap();

    let round = table.hit(id).unwrap();
    assert!(round.player_hand().is_bust());
    assert_eq!(round.current_hand_index(), 1);
    assert_eq!(round.status(), GameStatus::PlayerTurn);

    let round = table.hit(id).unwrap();
    assert!(round.split_hand().unwrap().is_bust());
    assert_eq!(round.status(), GameStatus::DealerWon);
    // Dealer never draws when every hand is bust.
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(round.payout(), 0);
    assert_eq!(balance(&table), 80);
}

#[test]
fn one_bust_split_hand_still_plays_the_dealer() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Clubs, Rank::Six),    // first hand: 14
        card(Suit::Clubs, Rank::Ten),    // second hand: 18
        card(Suit::Clubs, Rank::Nine),   // first hand hit: bust
        card(Suit::Spades, Rank::Queen), // dealer draw: bust
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    table.split(id).unwrap();
    table.hit(id).unwrap();
    let round = table.stand(id).unwrap();

    assert!(round.dealer_hand().is_bust());
    let outcomes: Vec<HandOutcome> = round.results().iter().map(|r| r.outcome).collect();
    assert_eq!(outcomes, vec![HandOutcome::Lose, HandOutcome::Win]);
    assert_eq!(round.payout(), 20);
    assert_eq!(round.status(), GameStatus::Push);
    assert_eq!(balance(&table), 100);
}

#[test]
fn bust_on_second_split_hand_hit_plays_the_dealer() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Clubs, Rank::Ace),    // first hand: 19
        card(Suit::Clubs, Rank::Five),   // second hand: 13
        card(Suit::Clubs, Rank::King),   // second hand hit: bust
        card(Suit::Spades, Rank::Two),   // dealer draw: 18
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    table.split(id).unwrap();
    assert_eq!(balance(&table), 80);

    let round = table.stand(id).unwrap();
    assert_eq!(round.status(), GameStatus::PlayerTurn);
    assert_eq!(round.current_hand_index(), 1);

    let round = table.hit(id).unwrap();
    assert!(round.is_finished());
    assert_eq!(round.dealer_hand().len(), 3);
    assert_eq!(round.dealer_hand().score(), 18);

    let outcomes: Vec<HandOutcome> = round.results().iter().map(|r| r.outcome).collect();
    assert_eq!(outcomes, vec![HandOutcome::Win, HandOutcome::Lose]);
    assert_eq!(round.results()[1].player_value, 23);
    assert_eq!(round.payout(), 20);
    assert_eq!(round.status(), GameStatus::PlayerWon);
    assert_eq!(balance(&table), 100);
}

#[test]
fn split_aces_keep_playing() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Diamonds, Rank::Ace),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Clubs, Rank::Five),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    table.split(id).unwrap();

    let round = table.hit(id).unwrap();
    assert_eq!(round.player_hand().len(), 3);
    assert_eq!(round.player_hand().score(), 18);
    assert_eq!(round.status(), GameStatus::PlayerTurn);
    assert_eq!(round.current_hand_index(), 0);
}

#[test]
fn split_preconditions() {
    let table = table_with_player(100);

    let unpaired = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::King),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
    ]);
    let round = table.start_round_with_deck("p1", 10, unpaired).unwrap();
    assert!(matches!(
        table.split(round.id()),
        Err(ActionError::InvalidAction {
            reason: SplitRejection::RanksDiffer,
            ..
        })
    ));

    let three_cards = stacked(&[
        card(Suit::Hearts, Rank::Two),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Diamonds, Rank::Three),
    ]);
    let round = table.start_round_with_deck("p1", 10, three_cards).unwrap();
    table.hit(round.id()).unwrap();
    assert!(matches!(
        table.split(round.id()),
        Err(ActionError::InvalidAction {
            reason: SplitRejection::NotTwoCards,
            ..
        })
    ));

    let twice = stacked(&[
        card(Suit::Hearts, Rank::Four),
        card(Suit::Clubs, Rank::Four),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Diamonds, Rank::Four),
        card(Suit::Spades, Rank::Four),
    ]);
    let round = table.start_round_with_deck("p1", 10, twice).unwrap();
    let split = table.split(round.id()).unwrap();
    assert!(split.player_hand().is_pair());
    let before = balance(&table);
    assert!(matches!(
        table.split(round.id()),
        Err(ActionError::InvalidAction {
            reason: SplitRejection::AlreadySplit,
            ..
        })
    ));
    assert_eq!(balance(&table), before);
}

#[test]
fn split_without_funds_leaves_round_untouched() {
    let table = table_with_player(15);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Seven),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Clubs, Rank::Three),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert_eq!(balance(&table), 5);

    assert!(matches!(
        table.split(round.id()),
        Err(ActionError::InsufficientFunds {
            balance: 5,
            requested: 10,
            ..
        })
    ));
    assert_eq!(table.get_game(round.id()).unwrap(), round);
    assert_eq!(balance(&table), 5);
}

#[test]
fn start_round_validation() {
    let options = TableOptions::default().with_max_bet(Some(50));
    let table = Table::new(options, 1);
    table.register_player("p1", 30);

    assert!(matches!(
        table.start_round("p1", 0),
        Err(StartError::InvalidBet { amount: 0, .. })
    ));
    assert!(matches!(
        table.start_round("p1", 51),
        Err(StartError::InvalidBet { amount: 51, .. })
    ));
    assert!(matches!(
        table.start_round("p1", 40),
        Err(StartError::InsufficientFunds {
            balance: 30,
            requested: 40,
            ..
        })
    ));
    assert!(matches!(
        table.start_round("stranger", 10),
        Err(StartError::PlayerNotFound { .. })
    ));

    assert!(table.games().is_empty());
    assert_eq!(balance(&table), 30);
}

#[test]
fn bets_too_large_to_pay_out_are_rejected() {
    let table = table_with_player(usize::MAX);
    let deck = || {
        stacked(&[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Clubs, Rank::King),
        ])
    };

    for bet in [usize::MAX / 2 + 1, usize::MAX / 4 + 1] {
        let err = table.start_round_with_deck("p1", bet, deck()).unwrap_err();
        assert!(matches!(err, StartError::InvalidBet { amount, .. } if amount == bet));
    }
    assert_eq!(balance(&table), usize::MAX);
    assert!(table.games().is_empty());
}

#[test]
fn payout_overflowing_the_balance_leaves_round_untouched() {
    let table = table_with_player(usize::MAX);
    let bet = usize::MAX / 4;
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Seven),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Six),
        card(Suit::Clubs, Rank::King), // dealer draw: bust
    ]);

    let round = table.start_round_with_deck("p1", bet, deck).unwrap();
    assert_eq!(balance(&table), usize::MAX - bet);

    let err = table.stand(round.id()).unwrap_err();
    assert!(matches!(
        err,
        ActionError::BalanceOverflow { amount, .. } if amount == bet * 2
    ));
    assert_eq!(balance(&table), usize::MAX - bet);
    assert_eq!(table.get_game(round.id()), Some(round));
}

#[test]
fn natural_overflowing_the_balance_refunds_the_stake() {
    let table = table_with_player(usize::MAX);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::King),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Hearts, Rank::Seven),
    ]);

    let err = table.start_round_with_deck("p1", 10, deck).unwrap_err();
    assert!(matches!(err, StartError::BalanceOverflow { amount: 25, .. }));
    assert_eq!(balance(&table), usize::MAX);
    assert!(table.games().is_empty());
}

#[test]
fn auto_registration_and_refill() {
    let options = TableOptions::default()
        .with_auto_register_players(true)
        .with_refill_when_broke(true)
        .with_starting_balance(100);
    let table = Table::new(options, 9);

    table.start_round("newcomer", 10).unwrap();
    let newcomer = table.get_player("newcomer").unwrap();
    assert!(newcomer.balance() >= 90);

    table.register_player("broke", 0);
    table.start_round("broke", 10).unwrap();
    assert!(table.get_player("broke").unwrap().balance() >= 90);
}

#[test]
fn short_deck_aborts_start_without_debit() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Two),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Spades, Rank::Four),
    ]);

    assert!(matches!(
        table.start_round_with_deck("p1", 10, deck),
        Err(StartError::EmptyDeck { .. })
    ));
    assert_eq!(balance(&table), 100);
    assert!(table.games().is_empty());
}

#[test]
fn exhausted_deck_aborts_round() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Five),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Hearts, Rank::Seven),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert!(matches!(
        table.hit(round.id()),
        Err(ActionError::EmptyDeck { .. })
    ));
    assert!(table.get_game(round.id()).is_none());
    assert!(matches!(
        table.stand(round.id()),
        Err(ActionError::GameNotFound { .. })
    ));
    assert_eq!(balance(&table), 90);
}

#[test]
fn unknown_round() {
    let table = table_with_player(100);
    let other = Table::new(TableOptions::default(), 2);
    other.register_player("p1", 100);
    let foreign = other.start_round("p1", 10).unwrap();

    assert!(matches!(
        table.hit(foreign.id()),
        Err(ActionError::GameNotFound { .. })
    ));
}

#[test]
fn dealer_hole_card_hidden_until_finished() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Seven),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Hearts, Rank::Nine),
    ]);

    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    assert_eq!(round.dealer_up_card(), Some(&card(Suit::Spades, Rank::Nine)));
    assert_eq!(round.dealer_visible_cards().len(), 1);
    assert_eq!(round.dealer_visible_score(), None);
    assert_eq!(round.dealer_hand().score(), 18);

    let round = table.stand(round.id()).unwrap();
    assert_eq!(round.dealer_visible_cards().len(), 2);
    assert_eq!(round.dealer_visible_score(), Some(18));
    assert_eq!(round.status(), GameStatus::DealerWon);
}

#[test]
fn shuffled_rounds_conserve_the_deck() {
    let table = Table::new(TableOptions::default(), 1234);
    table.register_player("p1", 1_000_000);

    for _ in 0..50 {
        let round = table.start_round("p1", 10).unwrap();
        let mut state = round;
        while state.status() == GameStatus::PlayerTurn {
            state = if state.player_hand().score() < 15 {
                table.hit(state.id()).unwrap()
            } else {
                table.stand(state.id()).unwrap()
            };
        }

        let cards = all_cards(&state);
        assert_eq!(cards.len(), DECK_SIZE);
        let unique: HashSet<Card> = cards.into_iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }
}

#[test]
fn concurrent_actions_on_one_round_are_linearized() {
    let table = table_with_player(100);
    let deck = stacked(&[
        card(Suit::Hearts, Rank::Two),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Diamonds, Rank::Two),
        card(Suit::Spades, Rank::Two),
        card(Suit::Hearts, Rank::Three),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Diamonds, Rank::Three),
        card(Suit::Spades, Rank::Three),
        card(Suit::Hearts, Rank::Four),
        card(Suit::Clubs, Rank::Four),
    ]);
    let round = table.start_round_with_deck("p1", 10, deck).unwrap();
    let id = round.id();
    let table = &table;

    let successful_hits: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || usize::from(table.hit(id).is_ok())))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .sum()
    });

    let state = table.get_game(id).unwrap();
    assert_eq!(successful_hits, 4);
    assert_eq!(state.player_hand().len(), 6);
    assert_eq!(state.deck().len(), 12 - 4 - 4);
    assert_eq!(state.status(), GameStatus::PlayerTurn);
}

#[test]
fn concurrent_rounds_for_many_players() {
    let table = Table::new(TableOptions::default(), 77);
    let ids: Vec<String> = (0..8).map(|n| format!("player-{n}")).collect();
    for id in &ids {
        table.register_player(id, 1_000);
    }
    let table = &table;

    let payouts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                scope.spawn(move || {
                    let mut payout = 0;
                    for _ in 0..10 {
                        let mut round = table.start_round(id, 10).unwrap();
                        if round.status() == GameStatus::PlayerTurn {
                            round = table.stand(round.id()).unwrap();
                        }
                        payout += round.payout();
                    }
                    payout
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(table.games().len(), 80);
    for (id, payout) in ids.iter().zip(payouts) {
        let balance = table.get_player(id).unwrap().balance();
        assert_eq!(balance, 1_000 - 10 * 10 + payout);
    }
}
