//! External collaborator seam: player queries, narration, and display.
//!
//! The engine consumes three capabilities from the surrounding game server —
//! ask a player a question and block for the answer, broadcast a display
//! event, narrate a text event — plus a "state changed, re-sync" signal.
//! [`Interface`] is that seam. Queries are synchronous: the engine suspends
//! until an answer arrives and assumes the answer is always an index into
//! the offered options (retry and timeout policy belong to the caller).
//!
//! This module also provides programmatic implementations:
//! - [`AutoInterface`] always picks the first option and swallows output
//! - [`ScriptedInterface`] replays queued answers and records all traffic
//! - [`RandomInterface`] picks uniformly random legal answers, for
//!   randomized full-game simulation

use crate::game_state::GameState;
use crate::ids::PlayerId;
use crate::snapshot::{CardSnapshot, PlayerSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;

/// Query kind offered to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Pick one of several options.
    Select,
    /// Binary (or binary-flavored) choice.
    YesNo,
    /// Single-option acknowledgement.
    Confirm,
}

/// A blocking single-choice question. The answer is an index into `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub options: Vec<String>,
}

impl Prompt {
    pub fn select(options: Vec<String>) -> Self {
        Self {
            kind: PromptKind::Select,
            options,
        }
    }

    pub fn yes_no(options: Vec<String>) -> Self {
        Self {
            kind: PromptKind::YesNo,
            options,
        }
    }

    pub fn confirm(label: impl Into<String>) -> Self {
        Self {
            kind: PromptKind::Confirm,
            options: vec![label.into()],
        }
    }
}

/// Structured display event, broadcast to all observers or privately to one
/// player's socket (secret draws).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayEvent {
    Roll { four: u8, six: u8 },
    Reveal { player: PlayerSnapshot },
    Die { player: PlayerSnapshot },
    Draw { card: CardSnapshot },
    Hit { attacker: PlayerId, target: PlayerId, damage: u32 },
}

/// The capabilities the engine consumes from the surrounding game server.
pub trait Interface {
    /// Blocking single-choice query to one player. Returns an index into
    /// `prompt.options`; the engine assumes it is always in range.
    fn ask(&mut self, player: PlayerId, prompt: &Prompt) -> usize;

    /// Fire-and-forget narrated text broadcast to all observers.
    fn tell(&mut self, message: &str);

    /// Structured display event; private to `target` when given.
    fn show(&mut self, event: DisplayEvent, target: Option<PlayerId>);

    /// Player/game state changed; re-sync displayed state.
    fn update(&mut self, game: &GameState);
}

/// Picks the first option for every query and swallows all output.
/// Fallback driver for AI players and a minimal test scaffold.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoInterface;

impl Interface for AutoInterface {
    fn ask(&mut self, _player: PlayerId, _prompt: &Prompt) -> usize {
        0
    }

    fn tell(&mut self, _message: &str) {}

    fn show(&mut self, _event: DisplayEvent, _target: Option<PlayerId>) {}

    fn update(&mut self, _game: &GameState) {}
}

/// Replays queued answers and records everything the engine emitted.
/// An exhausted queue answers 0; answers are clamped to the offered range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInterface {
    answers: VecDeque<usize>,
    /// Every prompt asked, with the player it was asked of.
    pub asked: Vec<(PlayerId, Prompt)>,
    /// Every narrated message, in order.
    pub transcript: Vec<String>,
    /// Every display event with its optional private target.
    pub events: Vec<(DisplayEvent, Option<PlayerId>)>,
    /// Number of `update` signals received.
    pub updates: usize,
}

impl ScriptedInterface {
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// True if some narrated message contains the given fragment.
    pub fn said(&self, fragment: &str) -> bool {
        self.transcript.iter().any(|m| m.contains(fragment))
    }
}

impl Interface for ScriptedInterface {
    fn ask(&mut self, player: PlayerId, prompt: &Prompt) -> usize {
        let answer = self.answers.pop_front().unwrap_or(0);
        self.asked.push((player, prompt.clone()));
        answer.min(prompt.options.len().saturating_sub(1))
    }

    fn tell(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }

    fn show(&mut self, event: DisplayEvent, target: Option<PlayerId>) {
        self.events.push((event, target));
    }

    fn update(&mut self, _game: &GameState) {
        self.updates += 1;
    }
}

/// Answers every query with a uniformly random legal index. Drives the
/// randomized full-game simulations.
#[derive(Debug, Clone)]
pub struct RandomInterface {
    rng: StdRng,
}

impl RandomInterface {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Interface for RandomInterface {
    fn ask(&mut self, _player: PlayerId, prompt: &Prompt) -> usize {
        if prompt.options.len() <= 1 {
            0
        } else {
            self.rng.random_range(0..prompt.options.len())
        }
    }

    fn tell(&mut self, _message: &str) {}

    fn show(&mut self, _event: DisplayEvent, _target: Option<PlayerId>) {}

    fn update(&mut self, _game: &GameState) {}
}
