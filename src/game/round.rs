extern crate alloc;

use alloc::string::ToString;

use tracing::{debug, info, warn};

use crate::deck::Deck;
use crate::error::{EmptyDeckError, StartError};
use crate::result::{HandOutcome, HandResult};

use super::{GameState, GameStatus, Table};

impl Table {
    /// Starts a round for `player_id` with a freshly shuffled deck.
    ///
    /// The bet is debited, then cards are dealt player, player, dealer,
    /// dealer. A natural on either side settles the round at once; otherwise
    /// the round waits in [`GameStatus::PlayerTurn`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bet is outside the table limits or too large
    /// to pay out, the player does not exist, or the player cannot cover the
    /// bet. Nothing is debited or stored on error.
    pub fn start_round(&self, player_id: &str, bet: usize) -> Result<GameState, StartError> {
        let deck = self.shuffled_deck();
        self.start_round_with_deck(player_id, bet, deck)
    }

    /// Starts a round dealt from `deck` instead of a fresh shuffle.
    ///
    /// # Errors
    ///
    /// As [`Table::start_round`], plus [`StartError::EmptyDeck`] if `deck`
    /// holds fewer than four cards.
    pub fn start_round_with_deck(
        &self,
        player_id: &str,
        bet: usize,
        deck: Deck,
    ) -> Result<GameState, StartError> {
        self.check_bet(player_id, bet)?;

        let mut state = GameState::new(self.next_id(), player_id.to_string(), bet, deck);
        deal_initial(&mut state).map_err(|EmptyDeckError| StartError::EmptyDeck {
            player_id: player_id.to_string(),
        })?;

        self.prepare_account(player_id)?;
        if let Err(err) = self.players.debit(player_id, bet) {
            warn!(player_id = %player_id, bet, error = %err, "bet rejected");
            return Err(err.into());
        }

        if let Err(err) = self.settle_naturals(&mut state) {
            self.players.credit(player_id, bet)?;
            warn!(player_id = %player_id, bet, error = %err, "stake refunded");
            return Err(err);
        }

        info!(
            game_id = %state.id,
            player_id = %player_id,
            bet,
            player_score = state.player_hand.score(),
            status = %state.status,
            "round started"
        );

        self.games.insert(state.clone());
        Ok(state)
    }

    fn check_bet(&self, player_id: &str, bet: usize) -> Result<(), StartError> {
        if self.options.accepts_bet(bet) && self.max_payout(bet).is_some() {
            Ok(())
        } else {
            Err(StartError::InvalidBet {
                player_id: player_id.to_string(),
                amount: bet,
            })
        }
    }

    /// Applies the table's account provisioning policy before a debit.
    fn prepare_account(&self, player_id: &str) -> Result<(), StartError> {
        if self.options.auto_register_players && !self.players.contains(player_id) {
            self.players
                .get_or_insert(player_id, self.options.starting_balance);
            info!(player_id = %player_id, "player auto-registered");
        }

        if self.options.refill_when_broke
            && self
                .players
                .refill_if_empty(player_id, self.options.starting_balance)?
        {
            info!(player_id = %player_id, "empty balance refilled");
        }

        Ok(())
    }

    /// Resolves a natural on either side right after the deal.
    fn settle_naturals(&self, state: &mut GameState) -> Result<(), StartError> {
        let player_natural = state.player_hand.is_natural();
        let dealer_natural = state.dealer_hand.is_natural();

        let (status, outcome, payout) = match (player_natural, dealer_natural) {
            (true, false) => {
                let winnings = self.blackjack_winnings(state.bet).ok_or_else(|| {
                    StartError::InvalidBet {
                        player_id: state.player_id.clone(),
                        amount: state.bet,
                    }
                })?;
                (
                    GameStatus::PlayerWon,
                    HandOutcome::Blackjack,
                    state.bet + winnings,
                )
            }
            (true, true) => (GameStatus::Push, HandOutcome::Push, state.bet),
            (false, true) => (GameStatus::DealerWon, HandOutcome::Lose, 0),
            (false, false) => return Ok(()),
        };

        if payout > 0 {
            self.players.credit(&state.player_id, payout)?;
        }

        state.results.push(HandResult {
            hand_index: 0,
            outcome,
            bet: state.bet,
            payout,
            player_value: state.player_hand.score(),
            dealer_value: state.dealer_hand.score(),
        });
        state.payout = payout;
        state.status = status;

        Ok(())
    }
}

/// Deals two cards to the player, then two to the dealer.
fn deal_initial(state: &mut GameState) -> Result<(), EmptyDeckError> {
    for _ in 0..2 {
        let card = state.deck.deal()?;
        debug!(game_id = %state.id, %card, "player dealt");
        state.player_hand.add_card(card);
    }
    for _ in 0..2 {
        let card = state.deck.deal()?;
        state.dealer_hand.add_card(card);
    }
    Ok(())
}
