use tracing::{debug, info, warn};

use crate::card::Card;
use crate::error::{ActionError, SplitRejection};
use crate::hand::Hand;
use crate::result::{HandOutcome, HandResult};

use super::{Action, GameId, GameState, GameStatus, Table};

fn ensure_player_turn(state: &GameState, action: Action) -> Result<(), ActionError> {
    if state.status == GameStatus::PlayerTurn {
        Ok(())
    } else {
        Err(ActionError::InvalidState {
            game_id: state.id,
            action,
            status: state.status,
        })
    }
}

fn deal(state: &mut GameState) -> Result<Card, ActionError> {
    state
        .deck
        .deal()
        .map_err(|_| ActionError::EmptyDeck { game_id: state.id })
}

impl Table {
    /// Player action: Hit (draw a card to the active hand).
    ///
    /// A bust on the only hand ends the round for the dealer. A bust on the
    /// first of two split hands moves play to the second; a bust on the
    /// second ends the player's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the round does not exist or is not waiting for a
    /// player action. If the deck runs out the round is aborted and removed.
    pub fn hit(&self, game_id: GameId) -> Result<GameState, ActionError> {
        self.act(game_id, |state| {
            ensure_player_turn(state, Action::Hit)?;

            let card = deal(state)?;
            let hand_index = state.current_hand_index;
            let hand = state.active_hand_mut();
            hand.add_card(card);
            let score = hand.score();
            debug!(game_id = %game_id, hand_index, %card, score, "player hits");

            if hand.is_bust() {
                match (state.split_hand.is_some(), hand_index) {
                    (false, _) => {
                        state.results.push(HandResult {
                            hand_index: 0,
                            outcome: HandOutcome::Lose,
                            bet: state.bet,
                            payout: 0,
                            player_value: score,
                            dealer_value: state.dealer_hand.score(),
                        });
                        state.status = GameStatus::DealerWon;
                        info!(game_id = %game_id, score, "player busts");
                    }
                    (true, 0) => state.current_hand_index = 1,
                    (true, _) => self.finish_player_turn(state)?,
                }
            }

            Ok(state.clone())
        })
    }

    /// Player action: Stand (lock in the active hand).
    ///
    /// Standing on the first of two split hands moves play to the second;
    /// otherwise the dealer plays and the round resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the round does not exist or is not waiting for a
    /// player action. If the deck runs out during dealer play the round is
    /// aborted and removed.
    pub fn stand(&self, game_id: GameId) -> Result<GameState, ActionError> {
        self.act(game_id, |state| {
            ensure_player_turn(state, Action::Stand)?;

            if state.split_hand.is_some() && state.current_hand_index == 0 {
                state.current_hand_index = 1;
                debug!(game_id = %game_id, "first split hand stands");
            } else {
                self.finish_player_turn(state)?;
            }

            Ok(state.clone())
        })
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// A second stake equal to the original bet is debited, each card starts
    /// its own hand, and each hand is dealt one more card. Play resumes on the
    /// first hand. Split aces are played like any other hand: they are not
    /// limited to one card and do not stand automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the round does not exist, is not waiting for a
    /// player action, has already been split, the primary hand is not a pair,
    /// or the player cannot cover the second stake. If the deck runs out the
    /// round is aborted and removed.
    pub fn split(&self, game_id: GameId) -> Result<GameState, ActionError> {
        self.act(game_id, |state| {
            ensure_player_turn(state, Action::Split)?;
            check_split(state)?;

            let Some(split_card) = state.player_hand.take_split_card() else {
                return Err(ActionError::InvalidAction {
                    game_id,
                    reason: SplitRejection::NotTwoCards,
                });
            };
            let mut split_hand = Hand::from_cards([split_card]);

            let first = deal(state)?;
            let second = deal(state)?;
            state.player_hand.add_card(first);
            split_hand.add_card(second);

            if let Err(err) = self.players.debit(&state.player_id, state.bet) {
                warn!(game_id = %game_id, error = %err, "split stake rejected");
                return Err(err.into());
            }

            state.split_hand = Some(split_hand);
            state.current_hand_index = 0;

            info!(
                game_id = %game_id,
                first_score = state.player_hand.score(),
                second_score = state.split_hand.as_ref().map_or(0, Hand::score),
                "hand split"
            );

            Ok(state.clone())
        })
    }
}

fn check_split(state: &GameState) -> Result<(), ActionError> {
    let reason = if state.split_hand.is_some() {
        SplitRejection::AlreadySplit
    } else if state.player_hand.len() != 2 {
        SplitRejection::NotTwoCards
    } else if !state.player_hand.is_pair() {
        SplitRejection::RanksDiffer
    } else {
        return Ok(());
    };

    Err(ActionError::InvalidAction {
        game_id: state.id,
        reason,
    })
}
