//! Flashcard review deck.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Question;

/// A shuffled deck with a cursor and a flip state.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Question>,
    index: usize,
    flipped: bool,
}

impl FlashcardDeck {
    pub fn new<R: Rng + ?Sized>(questions: Vec<Question>, rng: &mut R) -> Self {
        let mut deck = Self {
            cards: questions,
            index: 0,
            flipped: false,
        };
        deck.cards.shuffle(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 0-based position of the current card.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Question> {
        self.cards.get(self.index)
    }

    /// Whether the answer side is showing.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Advance, wrapping to the first card.
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.flipped = false;
        self.index = (self.index + 1) % self.cards.len();
    }

    /// Go back, wrapping to the last card.
    pub fn prev(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.flipped = false;
        self.index = (self.index + self.cards.len() - 1) % self.cards.len();
    }

    /// Reshuffle and return to the first card.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.index = 0;
        self.flipped = false;
    }
}
