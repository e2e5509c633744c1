use tracing::{debug, warn};

use crate::domain::entities::GameSession;
use crate::domain::value_objects::PlayerAction;
use crate::infrastructure::services::{speechless, CommentaryRequest, DealerCommentator};

/// Ask the dealer to comment on `action` and store the text on the session.
/// A failed request stores the speechless placeholder instead; it never
/// touches the round itself.
pub(super) async fn refresh_commentary(
    commentator: &DealerCommentator,
    session: &mut GameSession,
    action: PlayerAction,
) {
    let Some(dealer_visible_card) = session.dealer_visible_card() else {
        return;
    };

    let request = CommentaryRequest {
        action,
        player_hand: session.player_hand().to_vec(),
        dealer_visible_card,
    };

    let text = match commentator.comment(&request).await {
        Ok(text) => {
            debug!("Dealer commentary: {} chars", text.len());
            text
        }
        Err(e) => {
            warn!("Dealer commentary failed: {}", e);
            speechless(&e)
        }
    };

    session.set_commentary(text);
}
