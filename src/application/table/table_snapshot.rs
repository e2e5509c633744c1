use crate::domain::entities::{GameSession, Transition};
use crate::domain::value_objects::{Card, RoundPhase};

/// What the player is allowed to see of a table
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub session_id: String,
    pub phase: RoundPhase,
    pub player_hand: Vec<Card>,
    pub player_total: u16,
    /// Dealer cards face up; only the first one until the round ends
    pub dealer_cards: Vec<Card>,
    pub dealer_hidden_cards: usize,
    pub dealer_total: Option<u16>,
    pub game_over: bool,
    pub result: String,
    pub commentary: String,
    /// Whether the requested action changed the table
    pub applied: bool,
}

impl TableSnapshot {
    pub fn capture(session_id: &str, session: &GameSession, transition: Transition) -> Self {
        let dealer_cards = session.visible_dealer_cards().to_vec();

        Self {
            session_id: session_id.to_string(),
            phase: session.phase(),
            player_hand: session.player_hand().to_vec(),
            player_total: session.player_total(),
            dealer_hidden_cards: session.dealer_hand().len() - dealer_cards.len(),
            dealer_cards,
            dealer_total: session.dealer_total(),
            game_over: session.is_game_over(),
            result: session.result().to_string(),
            commentary: session.commentary().to_string(),
            applied: transition.is_applied(),
        }
    }
}
