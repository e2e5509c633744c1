use serde::Serialize;

/// Lifecycle of a single round at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    NotStarted,
    InProgress,
    RoundOver,
}

impl Default for RoundPhase {
    fn default() -> Self {
        RoundPhase::NotStarted
    }
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::NotStarted => "notStarted",
            RoundPhase::InProgress => "inProgress",
            RoundPhase::RoundOver => "roundOver",
        }
    }
}

/// Player action that can trigger dealer commentary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Hit,
    Stand,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Hit => "Hit",
            PlayerAction::Stand => "Stand",
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    PlayerBust,
    PlayerWins,
    Tie,
    DealerWins,
}

impl RoundOutcome {
    /// Compare final totals after the dealer has finished drawing
    pub fn from_totals(player_total: u16, dealer_total: u16) -> Self {
        if dealer_total > 21 || player_total > dealer_total {
            RoundOutcome::PlayerWins
        } else if dealer_total == player_total {
            RoundOutcome::Tie
        } else {
            RoundOutcome::DealerWins
        }
    }

    /// Result text shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            RoundOutcome::PlayerBust => "💥 You busted! Dealer wins.",
            RoundOutcome::PlayerWins => "🎉 You win!",
            RoundOutcome::Tie => "🤝 It's a tie!",
            RoundOutcome::DealerWins => "🏴 Dealer wins!",
        }
    }
}
