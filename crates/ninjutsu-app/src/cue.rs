//! Feedback cues.
//!
//! A cue is a short sound request emitted when a peer votes or when the
//! room reveals. The state machine never plays anything itself: it emits
//! [`crate::AppAction::PlayCue`] with a concrete [`CueSample`] and the driver
//! decides what that means on its platform.
//!
//! Sample choice is a uniform random index into a fixed list, drawn from an
//! injected RNG so tests can seed it.

use rand::Rng;

/// Base cue volume.
pub const DEFAULT_VOLUME: f32 = 0.2;

/// Extra volume for reveal samples.
const REVEAL_BOOST: f32 = 0.2;

const PEER_VOTED_SAMPLES: &[&str] =
    &["sword-slice", "sword-swipe", "knife-sharpen", "blade-through-flesh"];

const REVEAL_SAMPLES: &[&str] =
    &["gut-punch", "fight-shout", "pain-shout-a", "pain-shout-b", "pain-shout-c"];

/// Kind of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Some participant voted.
    PeerVoted,
    /// The room entered the reveal phase.
    Reveal,
}

/// Concrete sample to play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueSample {
    /// Kind of feedback this sample belongs to.
    pub cue: Cue,
    /// Sample name.
    pub name: &'static str,
    /// Playback volume in `0.0..=1.0`.
    pub volume: f32,
}

/// Cue configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueConfig {
    /// Base volume in `0.0..=1.0`. Reveal samples play slightly louder.
    pub volume: f32,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self { volume: DEFAULT_VOLUME }
    }
}

/// Fixed sample pools per cue.
#[derive(Debug, Clone)]
pub struct CueBank {
    config: CueConfig,
    peer_voted: &'static [&'static str],
    reveal: &'static [&'static str],
}

impl CueBank {
    /// Bank with the built-in sample pools.
    pub fn new(config: CueConfig) -> Self {
        Self { config, peer_voted: PEER_VOTED_SAMPLES, reveal: REVEAL_SAMPLES }
    }

    /// Samples available for a cue.
    pub fn samples(&self, cue: Cue) -> &'static [&'static str] {
        match cue {
            Cue::PeerVoted => self.peer_voted,
            Cue::Reveal => self.reveal,
        }
    }

    /// Playback volume for a cue, clamped to `0.0..=1.0`.
    pub fn volume(&self, cue: Cue) -> f32 {
        let volume = match cue {
            Cue::PeerVoted => self.config.volume,
            Cue::Reveal => self.config.volume + REVEAL_BOOST,
        };
        volume.clamp(0.0, 1.0)
    }

    /// Pick one sample for a cue. `None` if the pool is empty.
    pub fn pick<R: Rng + ?Sized>(&self, cue: Cue, rng: &mut R) -> Option<CueSample> {
        let samples = self.samples(cue);
        if samples.is_empty() {
            return None;
        }
        let name = samples[rng.random_range(0..samples.len())];
        Some(CueSample { cue, name, volume: self.volume(cue) })
    }
}

impl Default for CueBank {
    fn default() -> Self {
        Self::new(CueConfig::default())
    }
}
