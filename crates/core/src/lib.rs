// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Shiftcycle recurring pattern engine.
//!
//! Validates and stores cyclic work patterns through injected collaborators,
//! and answers "what is scheduled on date X" for stored and unsaved patterns.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calculator;
mod command;
mod engine;
mod error;
mod executor;
mod ports;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use calculator::{
    MAX_PREVIEW_DAYS, PatternStatistics, calculate_statistics, ensure_shifts_resolvable,
    generate_preview, resolve_range, resolve_shift_for_date,
};
pub use command::{Command, MutationOutcome, PatternDraft, StoredPattern};
pub use engine::{EngineConfig, PatternEngine, ResolvedSchedule};
pub use error::{CoreError, ErrorKind, StoreError};
pub use executor::MutationExecutor;
pub use ports::{
    AssignmentStore, Clock, FixedClock, IdentityProvider, PatternStore, RecurrenceRuleStore,
    ShiftLookup, StaticIdentity, SystemClock,
};
