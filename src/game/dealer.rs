extern crate alloc;

use alloc::vec::Vec;

use tracing::{debug, info};

use crate::error::ActionError;
use crate::hand::{Hand, is_bust};
use crate::options::RoundingMode;
use crate::result::{HandOutcome, HandResult};

use super::{GameState, GameStatus, Table};

/// Dealer stands on this total unless it is soft.
const DEALER_STANDS_ON: u16 = 17;

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Returns whether the dealer must draw another card.
///
/// The dealer draws below 17, stands above 17, and on exactly 17 draws only
/// when the hand is soft. Softness is read by comparing the score against the
/// total with every ace counted as 1: if they differ, an ace is still worth 11.
///
/// ```
/// use bjtable::{Card, Hand, Rank, Suit, should_dealer_hit};
///
/// let soft_17 = Hand::from_cards([
///     Card::new(Suit::Spades, Rank::Ace),
///     Card::new(Suit::Hearts, Rank::Six),
/// ]);
/// assert!(should_dealer_hit(&soft_17));
///
/// let hard_17 = Hand::from_cards([
///     Card::new(Suit::Spades, Rank::Ten),
///     Card::new(Suit::Hearts, Rank::Six),
///     Card::new(Suit::Clubs, Rank::Ace),
/// ]);
/// assert!(!should_dealer_hit(&hard_17));
/// ```
#[must_use]
pub fn should_dealer_hit(hand: &Hand) -> bool {
    let score = hand.score();
    match score.cmp(&DEALER_STANDS_ON) {
        core::cmp::Ordering::Less => true,
        core::cmp::Ordering::Greater => false,
        core::cmp::Ordering::Equal => hand.min_score() != score,
    }
}

/// Pays a standing hand against the final dealer total.
///
/// Admitted bets leave room for four stakes, so doubling cannot overflow.
const fn resolve_hand(hand_score: u16, dealer_score: u16, bet: usize) -> (HandOutcome, usize) {
    if is_bust(hand_score) {
        (HandOutcome::Lose, 0)
    } else if is_bust(dealer_score) || hand_score > dealer_score {
        (HandOutcome::Win, bet * 2)
    } else if hand_score == dealer_score {
        (HandOutcome::Push, bet)
    } else {
        (HandOutcome::Lose, 0)
    }
}

impl Table {
    /// Winnings on a natural, excluding the returned stake.
    ///
    /// Returns `None` if the winnings do not fit in `usize`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    pub(super) fn blackjack_winnings(&self, bet: usize) -> Option<usize> {
        let amount = (bet as f64) * self.options.blackjack_pays;
        if !amount.is_finite() || amount < 0.0 || amount >= usize::MAX as f64 {
            return None;
        }
        Some(round_amount(amount, self.options.rounding_blackjack))
    }

    /// Largest total a round staked at `bet` can pay back.
    ///
    /// A split round returns at most two winning hands on two stakes; a
    /// natural returns the stake plus the blackjack winnings.
    pub(super) fn max_payout(&self, bet: usize) -> Option<usize> {
        let split = bet.checked_mul(4)?;
        let natural = bet.checked_add(self.blackjack_winnings(bet)?)?;
        Some(split.max(natural))
    }

    /// Ends the player's turn: plays the dealer out and settles every hand.
    ///
    /// When every player hand is bust the dealer does not draw and the round
    /// goes to the dealer.
    pub(super) fn finish_player_turn(&self, state: &mut GameState) -> Result<(), ActionError> {
        if state.player_hands().all(Hand::is_bust) {
            record_results(state, |_| (HandOutcome::Lose, 0));
            state.payout = 0;
            state.status = GameStatus::DealerWon;
            info!(game_id = %state.id, "all player hands bust");
            return Ok(());
        }

        state.status = GameStatus::DealerTurn;
        play_dealer(state)?;

        let dealer_score = state.dealer_hand.score();
        let bet = state.bet;
        record_results(state, |score| resolve_hand(score, dealer_score, bet));

        let payout: usize = state.results.iter().map(|result| result.payout).sum();
        if payout > 0 {
            self.players.credit(&state.player_id, payout)?;
        }

        state.payout = payout;
        state.status = summary_status(&state.results);

        info!(
            game_id = %state.id,
            dealer_score,
            payout,
            status = %state.status,
            "round resolved"
        );

        Ok(())
    }
}

/// Draws for the dealer until the policy says stand.
fn play_dealer(state: &mut GameState) -> Result<(), ActionError> {
    while should_dealer_hit(&state.dealer_hand) {
        let card = state
            .deck
            .deal()
            .map_err(|_| ActionError::EmptyDeck { game_id: state.id })?;
        state.dealer_hand.add_card(card);
        debug!(
            game_id = %state.id,
            %card,
            dealer_score = state.dealer_hand.score(),
            "dealer draws"
        );
    }
    Ok(())
}

/// Replaces the round's results with one entry per player hand.
fn record_results(state: &mut GameState, mut resolve: impl FnMut(u16) -> (HandOutcome, usize)) {
    let dealer_value = state.dealer_hand.score();
    let bet = state.bet;
    let results: Vec<HandResult> = state
        .player_hands()
        .enumerate()
        .map(|(hand_index, hand)| {
            let (outcome, payout) = resolve(hand.score());
            HandResult {
                hand_index,
                outcome,
                bet,
                payout,
                player_value: hand.score(),
                dealer_value,
            }
        })
        .collect();
    state.results = results;
}

/// Collapses per-hand results into the round's single status.
///
/// `DealerWon` when every hand lost, `PlayerWon` when the primary hand won,
/// `Push` for anything else, including a split where only the second hand won.
fn summary_status(results: &[HandResult]) -> GameStatus {
    if results
        .iter()
        .all(|result| result.outcome == HandOutcome::Lose)
    {
        GameStatus::DealerWon
    } else if results.first().is_some_and(|result| result.outcome.is_win()) {
        GameStatus::PlayerWon
    } else {
        GameStatus::Push
    }
}
