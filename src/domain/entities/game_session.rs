//! Game session - one player's blackjack table
//!
//! Owns both hands and walks the round lifecycle
//! `NotStarted -> InProgress -> RoundOver`. Commentary is stored here for
//! display but never influences a transition.

use crate::domain::services::{
    draw_many, draw_random, hand_value, is_bust, DeckError, RandomSource, DEALER_STAND_THRESHOLD,
};
use crate::domain::value_objects::{Card, Hand, RoundOutcome, RoundPhase};

/// Cards dealt to each side at the start of a round
pub const INITIAL_HAND_SIZE: usize = 2;

/// Whether an action changed the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        *self == Transition::Applied
    }
}

/// Mutable state of one player's table
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    player_hand: Hand,
    dealer_hand: Hand,
    phase: RoundPhase,
    outcome: Option<RoundOutcome>,
    commentary: String,
}

impl GameSession {
    /// Create an empty session; the first observation deals
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a round from known hands
    pub fn from_hands(player: &[Card], dealer: &[Card]) -> Self {
        Self {
            player_hand: player.iter().copied().collect(),
            dealer_hand: dealer.iter().copied().collect(),
            phase: RoundPhase::InProgress,
            outcome: None,
            commentary: String::new(),
        }
    }

    /// Deal a fresh round if none is in play
    pub fn observe(&mut self, rng: &mut dyn RandomSource) -> Result<Transition, DeckError> {
        if self.phase == RoundPhase::NotStarted {
            self.deal(rng)
        } else {
            Ok(Transition::Ignored)
        }
    }

    /// Deal two cards to the player, then two to the dealer from what is left
    pub fn deal(&mut self, rng: &mut dyn RandomSource) -> Result<Transition, DeckError> {
        if self.phase != RoundPhase::NotStarted {
            return Ok(Transition::Ignored);
        }

        let player = draw_many(&[], INITIAL_HAND_SIZE, rng)?;
        let dealer = draw_many(&player, INITIAL_HAND_SIZE, rng)?;

        self.player_hand = player.into_iter().collect();
        self.dealer_hand = dealer.into_iter().collect();
        self.phase = RoundPhase::InProgress;
        self.outcome = None;
        self.commentary.clear();

        Ok(Transition::Applied)
    }

    /// Player takes one card; going over 21 ends the round
    pub fn hit(&mut self, rng: &mut dyn RandomSource) -> Result<Transition, DeckError> {
        if self.phase != RoundPhase::InProgress {
            return Ok(Transition::Ignored);
        }

        let card = draw_random(&self.cards_in_play(), rng)?;
        self.player_hand.push(card);
        self.commentary.clear();

        if is_bust(&self.player_hand) {
            self.finish(RoundOutcome::PlayerBust);
        }

        Ok(Transition::Applied)
    }

    /// Player stands; dealer draws to 17 and the round is settled
    pub fn stand(&mut self, rng: &mut dyn RandomSource) -> Result<Transition, DeckError> {
        if self.phase != RoundPhase::InProgress {
            return Ok(Transition::Ignored);
        }

        // Draw into a copy so an exhausted deck leaves the round untouched
        let mut dealer = self.dealer_hand.clone();
        while hand_value(&dealer) < DEALER_STAND_THRESHOLD {
            let in_play: Vec<Card> =
                self.player_hand.iter().chain(dealer.iter()).copied().collect();
            dealer.push(draw_random(&in_play, rng)?);
        }
        self.dealer_hand = dealer;
        self.commentary.clear();

        let dealer_total = hand_value(&self.dealer_hand);
        self.finish(RoundOutcome::from_totals(self.player_total(), dealer_total));

        Ok(Transition::Applied)
    }

    /// Clear everything; the next observation deals a new round
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn set_commentary(&mut self, commentary: String) {
        self.commentary = commentary;
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.outcome = Some(outcome);
        self.phase = RoundPhase::RoundOver;
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Result text, empty until the round ends
    pub fn result(&self) -> &str {
        self.outcome.map(|o| o.message()).unwrap_or_default()
    }

    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    pub fn player_total(&self) -> u16 {
        hand_value(&self.player_hand)
    }

    /// Full dealer hand, including the hidden card
    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer_hand
    }

    /// Dealer cards the player may see: all of them once the round is over,
    /// otherwise only the first
    pub fn visible_dealer_cards(&self) -> &[Card] {
        if self.is_game_over() {
            &self.dealer_hand
        } else {
            &self.dealer_hand[..self.dealer_hand.len().min(1)]
        }
    }

    pub fn dealer_visible_card(&self) -> Option<Card> {
        self.dealer_hand.first().copied()
    }

    /// Dealer total, revealed only after the round ends
    pub fn dealer_total(&self) -> Option<u16> {
        self.is_game_over().then(|| hand_value(&self.dealer_hand))
    }

    pub fn cards_in_play(&self) -> Vec<Card> {
        self.player_hand
            .iter()
            .chain(self.dealer_hand.iter())
            .copied()
            .collect()
    }
}
