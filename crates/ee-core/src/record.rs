//! Dimmer event records reconstructed from the token stream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A complete light event.
///
/// Records are immutable once built. The dimmer adjustment only exists for
/// [`Action::Delta`], so a `TurnOff` record has no delta to read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// What happened at `timestamp`.
    #[serde(flatten)]
    pub action: Action,
}

/// The event carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// The light was switched off.
    TurnOff,
    /// The dimmer level was adjusted by a signed fraction.
    Delta { delta: f64 },
}

impl Record {
    /// Creates a `TurnOff` record.
    pub const fn turn_off(timestamp: i64) -> Self {
        Self {
            timestamp,
            action: Action::TurnOff,
        }
    }

    /// Creates a `Delta` record.
    pub const fn delta(timestamp: i64, delta: f64) -> Self {
        Self {
            timestamp,
            action: Action::Delta { delta },
        }
    }

    /// The dimmer adjustment this record applies, `0.0` for `TurnOff`.
    pub const fn dimmer_delta(&self) -> f64 {
        match self.action {
            Action::TurnOff => 0.0,
            Action::Delta { delta } => delta,
        }
    }

    pub const fn kind(&self) -> ActionKind {
        match self.action {
            Action::TurnOff => ActionKind::TurnOff,
            Action::Delta { .. } => ActionKind::Delta,
        }
    }
}

/// The action keyword as it appears in the input, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    TurnOff,
    Delta,
}

impl ActionKind {
    /// Canonical spelling used in the input format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TurnOff => "TurnOff",
            Self::Delta => "Delta",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownAction;

    /// Matches the keyword case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("turnoff") {
            Ok(Self::TurnOff)
        } else if s.eq_ignore_ascii_case("delta") {
            Ok(Self::Delta)
        } else {
            Err(UnknownAction(s.to_string()))
        }
    }
}

/// Error type for unrecognized action keywords.
#[derive(Debug, Clone)]
pub struct UnknownAction(String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}
