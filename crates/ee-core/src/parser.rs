//! Incremental record parser over the reassembled token sequence.
//!
//! The pending buffer is a small state machine with two terminal shapes,
//! `[timestamp, TurnOff]` and `[timestamp, Delta, value]`. Each token either
//! advances it, completes a record, or is rejected on the spot.

use thiserror::Error;

use crate::record::{ActionKind, Record};

/// A malformed pending buffer. All variants are recoverable: the parser has
/// already reset itself and the next token is processed normally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A record must start with an integer timestamp.
    #[error("invalid timestamp: {token}")]
    InvalidTimestamp { token: String },

    /// The token after a timestamp was neither `TurnOff` nor `Delta`.
    #[error("invalid action for timestamp {timestamp}: {token}")]
    InvalidAction { timestamp: i64, token: String },

    /// The token after `Delta` was not a finite real number.
    #[error("invalid delta for timestamp {timestamp}: {token}")]
    InvalidDelta { timestamp: i64, token: String },

    /// A new timestamp arrived before the pending one received an action.
    #[error("timestamp {timestamp} superseded before an action was seen")]
    Superseded { timestamp: i64 },
}

/// Tokens accepted so far for the record being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pending {
    /// Waiting for a timestamp.
    #[default]
    Empty,
    /// Have a timestamp, waiting for an action keyword.
    Timestamp(i64),
    /// Have `timestamp Delta`, waiting for the value.
    AwaitingDelta(i64),
}

/// Builds records one token at a time.
#[derive(Debug, Default)]
pub struct RecordParser {
    pending: Pending,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a partial record is buffered.
    pub fn has_pending(&self) -> bool {
        self.pending != Pending::Empty
    }

    /// Appends a token to the pending buffer.
    ///
    /// Returns the completed record when the token finishes one. On error the
    /// buffer has been discarded, except for [`ParseError::Superseded`] where
    /// the offending token is kept as the new pending timestamp.
    pub fn feed(&mut self, token: &str) -> Result<Option<Record>, ParseError> {
        match self.pending {
            Pending::Empty => {
                let timestamp = parse_timestamp(token).ok_or_else(|| {
                    ParseError::InvalidTimestamp {
                        token: token.to_string(),
                    }
                })?;
                self.pending = Pending::Timestamp(timestamp);
                Ok(None)
            }
            Pending::Timestamp(timestamp) => match token.parse::<ActionKind>() {
                Ok(ActionKind::TurnOff) => {
                    self.pending = Pending::Empty;
                    Ok(Some(Record::turn_off(timestamp)))
                }
                Ok(ActionKind::Delta) => {
                    self.pending = Pending::AwaitingDelta(timestamp);
                    Ok(None)
                }
                Err(_) => {
                    if let Some(next) = parse_timestamp(token) {
                        self.pending = Pending::Timestamp(next);
                        return Err(ParseError::Superseded { timestamp });
                    }
                    self.pending = Pending::Empty;
                    Err(ParseError::InvalidAction {
                        timestamp,
                        token: token.to_string(),
                    })
                }
            },
            Pending::AwaitingDelta(timestamp) => {
                self.pending = Pending::Empty;
                let delta = parse_delta(token).ok_or_else(|| ParseError::InvalidDelta {
                    timestamp,
                    token: token.to_string(),
                })?;
                Ok(Some(Record::delta(timestamp, delta)))
            }
        }
    }

    /// Ends parsing, returning whatever partial record was still buffered.
    pub fn finish(self) -> Pending {
        self.pending
    }
}

fn parse_timestamp(token: &str) -> Option<i64> {
    token.parse().ok()
}

fn parse_delta(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
