use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::MotionParams;

/// Conversational state pushed by whatever drives the orb.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationState {
    #[default]
    #[serde(alias = "listening")]
    Idle,
    Thinking,
    Speaking,
}

impl ConversationState {
    pub const ALL: [ConversationState; 3] = [
        ConversationState::Idle,
        ConversationState::Thinking,
        ConversationState::Speaking,
    ];

    /// Activity level this state pulls toward.
    pub fn target_activity(self, params: &MotionParams) -> f64 {
        match self {
            ConversationState::Idle => params.idle_target,
            ConversationState::Thinking => params.thinking_target,
            ConversationState::Speaking => params.speaking_target,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::Thinking => "thinking",
            ConversationState::Speaking => "speaking",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            ConversationState::Idle => 0,
            ConversationState::Thinking => 1,
            ConversationState::Speaking => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ConversationState::Thinking,
            2 => ConversationState::Speaking,
            _ => ConversationState::Idle,
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStateError(pub String);

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown conversational state '{}' (expected idle, thinking or speaking)",
            self.0
        )
    }
}

impl std::error::Error for ParseStateError {}

impl FromStr for ConversationState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" | "listening" => Ok(ConversationState::Idle),
            "thinking" => Ok(ConversationState::Thinking),
            "speaking" => Ok(ConversationState::Speaking),
            _ => Err(ParseStateError(s.trim().to_string())),
        }
    }
}

/// Single-word cell holding the current state. Writers never block and a
/// reader always sees a whole value; last write wins.
#[derive(Debug, Default)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new(state: ConversationState) -> Self {
        Self(AtomicU8::new(state.to_u8()))
    }

    pub fn get(&self) -> ConversationState {
        ConversationState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, state: ConversationState) {
        self.0.store(state.to_u8(), Ordering::Release);
    }
}
