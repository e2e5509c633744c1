//! Deck & valuation - pure blackjack card arithmetic
//!
//! The deck is a fixed sampling universe. Cards are never removed from it;
//! "remaining" always means deck minus the cards currently in play.

use std::sync::OnceLock;

use crate::domain::services::RandomSource;
use crate::domain::value_objects::{Card, Rank, Suit};

/// Number of cards in a standard deck
pub const DECK_SIZE: usize = 52;

/// Dealer keeps drawing while below this total
pub const DEALER_STAND_THRESHOLD: u16 = 17;

/// Best possible total
pub const BLACKJACK: u16 = 21;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("Deck exhausted: {in_play} cards in play, {requested} requested")]
    Exhausted { in_play: usize, requested: usize },
}

static DECK: OnceLock<Vec<Card>> = OnceLock::new();

/// Build the 52 cards, suit-major then rank-minor
pub fn build_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// The shared deck, generated once
pub fn deck() -> &'static [Card] {
    DECK.get_or_init(build_deck)
}

/// Value of a single card: face cards 10, Ace 11, numbers at face value
pub fn card_value(card: &Card) -> u8 {
    match card.rank {
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        Rank::Ace => 11,
    }
}

/// Best ace-adjusted total of a hand.
///
/// Every Ace starts at 11; while the total is over 21 one Ace at a time is
/// reinterpreted as 1. A hand that still exceeds 21 with every Ace at 1 is a
/// bust and reports that minimum.
pub fn hand_value(hand: &[Card]) -> u16 {
    let mut total: u16 = hand.iter().map(|c| card_value(c) as u16).sum();
    let mut aces = hand.iter().filter(|c| c.is_ace()).count();

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// True when the best total still counts an Ace as 11
pub fn is_soft(hand: &[Card]) -> bool {
    let hard_total: u16 = hand
        .iter()
        .map(|c| if c.is_ace() { 1 } else { card_value(c) as u16 })
        .sum();
    hand.iter().any(|c| c.is_ace()) && hard_total + 10 == hand_value(hand)
}

pub fn is_bust(hand: &[Card]) -> bool {
    hand_value(hand) > BLACKJACK
}

/// Deck minus `in_play`, in deck order
pub fn remaining_cards(in_play: &[Card]) -> Vec<Card> {
    deck()
        .iter()
        .filter(|card| !in_play.contains(card))
        .copied()
        .collect()
}

/// Draw one card uniformly from the cards not in play
pub fn draw_random(in_play: &[Card], rng: &mut dyn RandomSource) -> Result<Card, DeckError> {
    let remaining = remaining_cards(in_play);
    rng.choose(&remaining).ok_or(DeckError::Exhausted {
        in_play: in_play.len(),
        requested: 1,
    })
}

/// Draw `amount` distinct cards from the cards not in play
pub fn draw_many(
    in_play: &[Card],
    amount: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Card>, DeckError> {
    let remaining = remaining_cards(in_play);
    let exhausted = DeckError::Exhausted {
        in_play: in_play.len(),
        requested: amount,
    };
    if remaining.len() < amount {
        return Err(exhausted);
    }

    let cards = rng.sample(&remaining, amount);
    if cards.len() != amount {
        return Err(exhausted);
    }
    Ok(cards)
}
