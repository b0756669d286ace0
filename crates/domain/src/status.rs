// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment lifecycle status.
//!
//! Status is never stored. It is a pure function of "today" and the
//! assignment bounds, recomputed on every call. As long as "today" only
//! moves forward, an assignment moves `Pending -> Active -> Expired` and
//! never back.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Temporal lifecycle state of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// The anchor date has not been reached yet
    Pending,
    /// Today lies within the assignment bounds
    Active,
    /// The end date has passed
    Expired,
}

impl AssignmentStatus {
    /// Derives the temporal status from today's date and the assignment bounds.
    ///
    /// - `today < anchor_date` is `Pending`
    /// - `end_date` present and `today > end_date` is `Expired`
    /// - anything else is `Active`
    #[must_use]
    pub fn resolve(today: Date, anchor_date: Date, end_date: Option<Date>) -> Self {
        if today < anchor_date {
            Self::Pending
        } else if end_date.is_some_and(|end| today > end) {
            Self::Expired
        } else {
            Self::Active
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// Temporal status combined with the administrative enable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Pending,
    Active,
    Expired,
    /// Administratively disabled, whatever the dates say
    Inactive,
}

impl EffectiveStatus {
    /// Derives the effective status.
    ///
    /// A disabled assignment is always `Inactive`.
    #[must_use]
    pub fn resolve(today: Date, anchor_date: Date, end_date: Option<Date>, enabled: bool) -> Self {
        if !enabled {
            return Self::Inactive;
        }

        match AssignmentStatus::resolve(today, anchor_date, end_date) {
            AssignmentStatus::Pending => Self::Pending,
            AssignmentStatus::Active => Self::Active,
            AssignmentStatus::Expired => Self::Expired,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
