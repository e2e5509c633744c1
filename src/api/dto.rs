use serde::Serialize;

use crate::application::table::TableSnapshot;
use crate::domain::value_objects::{Card, RoundPhase};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTableResponse {
    pub success: bool,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub success: bool,
    pub session_id: String,
    pub phase: RoundPhase,
    pub applied: bool,
    pub player: PlayerView,
    pub dealer: DealerView,
    pub game_over: bool,
    pub result: String,
    pub commentary: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub cards: Vec<Card>,
    pub total: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerView {
    pub cards: Vec<Card>,
    pub hidden_cards: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u16>,
}

impl From<TableSnapshot> for TableResponse {
    fn from(snapshot: TableSnapshot) -> Self {
        Self {
            success: true,
            session_id: snapshot.session_id,
            phase: snapshot.phase,
            applied: snapshot.applied,
            player: PlayerView {
                cards: snapshot.player_hand,
                total: snapshot.player_total,
            },
            dealer: DealerView {
                cards: snapshot.dealer_cards,
                hidden_cards: snapshot.dealer_hidden_cards,
                total: snapshot.dealer_total,
            },
            game_over: snapshot.game_over,
            result: snapshot.result,
            commentary: snapshot.commentary,
        }
    }
}
