//! Draw/discard pile pairs.
//!
//! A `Deck<T>` owns a fixed set of cards split between a draw pile (top =
//! end of vec) and a discard pile. Cards move between the two piles and the
//! players' hands but are never created or destroyed, so
//! `draw_len + discard_len + cards held elsewhere` stays constant.
//!
//! Drawing from an empty draw pile shuffles the discard pile back in first.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameResult, GameRng};

/// A draw pile and its discard pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<T> {
    draw_pile: Vec<T>,
    discard_pile: Vec<T>,
}

impl<T> Deck<T> {
    /// Create a deck holding `cards`, shuffled.
    #[must_use]
    pub fn new(mut cards: Vec<T>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards,
            discard_pile: Vec::new(),
        }
    }

    /// Create a deck with both piles given explicitly, unshuffled.
    ///
    /// The last element of `draw_pile` is drawn first.
    #[must_use]
    pub fn with_piles(draw_pile: Vec<T>, discard_pile: Vec<T>) -> Self {
        Self {
            draw_pile,
            discard_pile,
        }
    }

    /// Take the top card, reshuffling the discards in if the pile is empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> GameResult<T> {
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(GameError::ResourceExhausted(
                    "draw and discard piles are both empty".into(),
                ));
            }
            self.draw_pile.append(&mut self.discard_pile);
            rng.shuffle(&mut self.draw_pile);
        }
        self.draw_pile
            .pop()
            .ok_or_else(|| GameError::ResourceExhausted("draw pile is empty".into()))
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: T) {
        self.discard_pile.push(card);
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw_pile);
    }

    /// Add new cards to the draw pile and shuffle it.
    pub fn add_and_shuffle(&mut self, cards: impl IntoIterator<Item = T>, rng: &mut GameRng) {
        self.draw_pile.extend(cards);
        self.shuffle(rng);
    }

    #[must_use]
    pub fn draw_pile(&self) -> &[T] {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[T] {
        &self.discard_pile
    }

    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards currently in either pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_from_top() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::with_piles(vec![1, 2, 3], Vec::new());

        assert_eq!(deck.draw(&mut rng), Ok(3));
        assert_eq!(deck.draw(&mut rng), Ok(2));
        assert_eq!(deck.draw_len(), 1);
    }

    #[test]
    fn test_reshuffle_on_empty() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new((0..10).collect::<Vec<u32>>(), &mut rng);

        let drawn: Vec<_> = (0..10).map(|_| deck.draw(&mut rng).unwrap()).collect();
        assert_eq!(deck.draw_len(), 0);
        for card in drawn {
            deck.discard(card);
        }

        let card = deck.draw(&mut rng).unwrap();
        assert!(card < 10);
        assert_eq!(deck.draw_len(), 9);
        assert_eq!(deck.discard_len(), 0);
    }

    #[test]
    fn test_exhausted() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::with_piles(vec!['a'], Vec::new());

        deck.draw(&mut rng).unwrap();
        let err = deck.draw(&mut rng).unwrap_err();
        assert!(matches!(err, GameError::ResourceExhausted(_)));
    }

    #[test]
    fn test_shuffle_keeps_sizes() {
        let mut rng = GameRng::new(3);
        let mut deck = Deck::with_piles((0..20).collect::<Vec<u32>>(), vec![99]);

        deck.shuffle(&mut rng);
        assert_eq!(deck.draw_len(), 20);
        assert_eq!(deck.discard_len(), 1);
        assert_ne!(deck.draw_pile(), (0..20).collect::<Vec<u32>>().as_slice());
    }

    #[test]
    fn test_add_and_shuffle() {
        let mut rng = GameRng::new(3);
        let mut deck = Deck::with_piles(vec![1, 2], Vec::new());
        deck.add_and_shuffle([7, 7, 7], &mut rng);

        assert_eq!(deck.len(), 5);
        assert_eq!(deck.draw_pile().iter().filter(|&&c| c == 7).count(), 3);
    }
}
