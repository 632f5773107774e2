//! Core logic for the dimmer energy estimator.
//!
//! This crate contains:
//! - Reassembly: turning framed input lines into one token sequence
//! - Parsing: building `TurnOff` / `Delta` records from tokens
//! - Storage: keeping records ordered by timestamp
//! - Estimation: integrating the clamped dimmer level over time

mod estimate;
mod ingest;
pub mod parser;
pub mod reassembler;
pub mod record;
mod store;

pub use estimate::{
    DEFAULT_POWER_WATTS, DEFAULT_PRECISION, EnergyEstimate, EstimateConfig, clamp_dimmer,
    estimate_energy, round_to,
};
pub use ingest::{IngestError, IngestSummary, ingest};
pub use parser::{ParseError, RecordParser};
pub use reassembler::Reassembler;
pub use record::{Action, ActionKind, Record};
pub use store::Store;
