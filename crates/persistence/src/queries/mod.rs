// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `shifts`: Shift catalogue lookups
//! - `rules`: Recurrence rules and their structured day rows
//! - `assignments`: Schedule assignment lookups

pub mod assignments;
pub mod rules;
pub mod shifts;
