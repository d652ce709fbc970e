//! Session configuration.

use std::str::FromStr;

use ninjutsu_proto::{Choice, RoomEndpoint};
use thiserror::Error;

use crate::CueConfig;

/// Values offered to participants when none are configured.
const DEFAULT_DECK: &[Choice] = &[0, 1, 2, 3, 5, 8, 13, 20, 40, 100];

/// Errors from parsing a vote deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// Deck has no values.
    #[error("vote deck is empty")]
    Empty,

    /// A value is not an integer.
    #[error("invalid vote value: {0:?}")]
    InvalidValue(String),
}

/// Ordered set of values a participant can vote with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDeck(Vec<Choice>);

impl VoteDeck {
    /// Build a deck from explicit values.
    pub fn new(values: Vec<Choice>) -> Result<Self, DeckError> {
        if values.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self(values))
    }

    /// All values in order.
    pub fn values(&self) -> &[Choice] {
        &self.0
    }

    /// Value at a position.
    pub fn get(&self, index: usize) -> Option<Choice> {
        self.0.get(index).copied()
    }

    /// Value bound to a digit key.
    ///
    /// Keys follow the keyboard row: `1` picks the first value, `9` the
    /// ninth and `0` the tenth.
    pub fn for_digit(&self, digit: char) -> Option<Choice> {
        let index = match digit.to_digit(10)? {
            0 => 9,
            d => d as usize - 1,
        };
        self.get(index)
    }
}

impl Default for VoteDeck {
    fn default() -> Self {
        Self(DEFAULT_DECK.to_vec())
    }
}

impl FromStr for VoteDeck {
    type Err = DeckError;

    /// Parse a comma-separated list such as `1,2,3,5,8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| token.parse().map_err(|_| DeckError::InvalidValue(token.to_owned())))
            .collect::<Result<Vec<Choice>, _>>()?;
        Self::new(values)
    }
}

/// Everything needed to run one room session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Room socket and join mode.
    pub endpoint: RoomEndpoint,
    /// Initial sound preference.
    pub sound_enabled: bool,
    /// Cue volume settings.
    pub cue: CueConfig,
    /// Values offered for voting.
    pub deck: VoteDeck,
}

impl SessionConfig {
    /// Defaults for an endpoint: sound on, default cues and deck.
    pub fn new(endpoint: RoomEndpoint) -> Self {
        Self { endpoint, sound_enabled: true, cue: CueConfig::default(), deck: VoteDeck::default() }
    }

    /// Set the initial sound preference.
    #[must_use]
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Set the cue configuration.
    #[must_use]
    pub fn with_cue(mut self, cue: CueConfig) -> Self {
        self.cue = cue;
        self
    }

    /// Set the vote deck.
    #[must_use]
    pub fn with_deck(mut self, deck: VoteDeck) -> Self {
        self.deck = deck;
        self
    }
}
