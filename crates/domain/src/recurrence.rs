// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence rule encoding for custom patterns.
//!
//! A custom pattern is stored in the generic `description` column that other
//! recurrence kinds also use. The sentinel prefix tells them apart.
//!
//! ## Stored format
//!
//! ```text
//! CUSTOM_PATTERN:{"days":[{"d":1,"s":"EARLY","w":true},{"d":2,"w":false}],"len":2,"v":1}
//! ```
//!
//! - `d` is the 1-based day number
//! - `w` is the work-day flag
//! - `s` is the shift identifier, omitted on rest days
//! - `len` is the cycle length, `v` the payload version (only `1` exists)
//!
//! Keys are written in lexical order without whitespace so that encoding the
//! same pattern twice yields byte-identical output. This layout is a stable
//! compatibility contract; do not reorder or rename keys.

use crate::error::DomainError;
use crate::types::{MAX_PATTERN_LENGTH, Pattern, PatternDay, RecurrenceRule, ShiftId};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

/// Prefix marking a recurrence rule description as a custom pattern.
pub const CUSTOM_PATTERN_SENTINEL: &str = "CUSTOM_PATTERN:";

/// The only payload version this crate writes or reads.
pub const PAYLOAD_VERSION: u8 = 1;

/// How the decoder reacts to a corrupt payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Reject any defect.
    #[default]
    Strict,
    /// Recover the longest valid prefix of days and log a warning.
    Lenient,
}

#[derive(Debug, Deserialize)]
struct PatternPayload {
    v: u8,
    len: u16,
    days: Vec<DayRecord>,
}

#[derive(Debug, Deserialize)]
struct DayRecord {
    d: u16,
    w: bool,
    #[serde(default)]
    s: Option<String>,
}

impl DayRecord {
    fn into_pattern_day(self) -> Result<PatternDay, String> {
        match (self.w, self.s) {
            (true, Some(shift)) if !shift.trim().is_empty() => {
                Ok(PatternDay::work(self.d, ShiftId::new(&shift)))
            }
            (true, _) => Err(format!("work day {} has no shift", self.d)),
            (false, None) => Ok(PatternDay::rest(self.d)),
            (false, Some(_)) => Err(format!("rest day {} carries a shift", self.d)),
        }
    }
}

/// Returns true if a rule description carries the custom pattern sentinel.
#[must_use]
pub fn is_custom_pattern(description: &str) -> bool {
    description.starts_with(CUSTOM_PATTERN_SENTINEL)
}

/// Encodes a pattern into an unpersisted recurrence rule.
#[must_use]
pub fn encode_pattern(pattern: &Pattern) -> RecurrenceRule {
    RecurrenceRule::new(pattern.length(), encode_description(pattern))
}

/// Encodes a pattern into the sentinel-prefixed description string.
#[must_use]
pub fn encode_description(pattern: &Pattern) -> String {
    let days: Vec<Value> = pattern
        .days()
        .iter()
        .map(|day| match day.shift_id() {
            Some(shift) => json!({ "d": day.day_number(), "s": shift.value(), "w": true }),
            None => json!({ "d": day.day_number(), "w": false }),
        })
        .collect();

    let payload: Value = json!({
        "days": days,
        "len": pattern.length(),
        "v": PAYLOAD_VERSION,
    });

    format!("{CUSTOM_PATTERN_SENTINEL}{payload}")
}

/// Decodes a recurrence rule back into a pattern.
///
/// # Arguments
///
/// * `rule` - The stored rule
/// * `mode` - Whether corrupt payloads are rejected or partially recovered
///
/// # Errors
///
/// - `NotCustomPattern` if the description lacks the sentinel (in any mode)
/// - `CorruptPattern` if the payload is defective (strict mode), or if
///   nothing at all can be recovered (lenient mode)
pub fn decode_pattern(rule: &RecurrenceRule, mode: DecodeMode) -> Result<Pattern, DomainError> {
    let body: &str = rule
        .description()
        .strip_prefix(CUSTOM_PATTERN_SENTINEL)
        .ok_or(DomainError::NotCustomPattern)?;

    match decode_payload(body, rule.pattern_length()) {
        Ok(pattern) => Ok(pattern),
        Err(err) if mode == DecodeMode::Lenient => {
            let recovered: Vec<PatternDay> = recover_days(body);
            if recovered.is_empty() {
                return Err(err);
            }

            warn!(
                rule_id = ?rule.rule_id(),
                declared = rule.pattern_length(),
                recovered = recovered.len(),
                %err,
                "Recovered partial custom pattern from corrupt payload"
            );
            Pattern::new(recovered).map_err(|e| corrupt(e.to_string()))
        }
        Err(err) => Err(err),
    }
}

fn corrupt(reason: String) -> DomainError {
    DomainError::CorruptPattern { reason }
}

fn decode_payload(body: &str, declared_length: u16) -> Result<Pattern, DomainError> {
    let payload: PatternPayload =
        serde_json::from_str(body).map_err(|e| corrupt(format!("malformed payload: {e}")))?;

    if payload.v != PAYLOAD_VERSION {
        return Err(corrupt(format!(
            "unsupported payload version {}",
            payload.v
        )));
    }

    if usize::from(payload.len) != payload.days.len() {
        return Err(corrupt(format!(
            "payload declares {} days but contains {}",
            payload.len,
            payload.days.len()
        )));
    }

    if payload.len != declared_length {
        return Err(corrupt(format!(
            "rule declares {declared_length} days but payload declares {}",
            payload.len
        )));
    }

    let days: Vec<PatternDay> = payload
        .days
        .into_iter()
        .map(DayRecord::into_pattern_day)
        .collect::<Result<_, _>>()
        .map_err(corrupt)?;

    Pattern::new(days).map_err(|e| corrupt(e.to_string()))
}

/// Byte offset just past the `[` opening the `days` array.
fn days_array_start(body: &str) -> Option<usize> {
    const KEY: &str = "\"days\"";
    let after_key: usize = body.find(KEY)? + KEY.len();
    let bracket: usize = body.get(after_key..)?.find('[')?;
    let between: &str = body.get(after_key..after_key + bracket)?;

    if between.chars().all(|c| c == ':' || c.is_whitespace()) {
        Some(after_key + bracket + 1)
    } else {
        None
    }
}

/// Reads day records one by one and keeps every record up to the first
/// defect: a parse failure, a gap in numbering, or an inconsistent work flag.
fn recover_days(body: &str) -> Vec<PatternDay> {
    let mut days: Vec<PatternDay> = Vec::new();
    let Some(mut rest) = days_array_start(body).and_then(|start| body.get(start..)) else {
        return days;
    };

    while days.len() < MAX_PATTERN_LENGTH {
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<DayRecord>();
        let Some(Ok(record)) = stream.next() else {
            break;
        };
        let consumed: usize = stream.byte_offset();

        if usize::from(record.d) != days.len() + 1 {
            break;
        }
        let Ok(day) = record.into_pattern_day() else {
            break;
        };
        days.push(day);

        match rest.get(consumed..).map(str::trim_start) {
            Some(tail) if tail.starts_with(',') => rest = &tail[1..],
            _ => break,
        }
    }

    days
}
