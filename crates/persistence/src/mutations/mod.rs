// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! Every write that touches more than one row runs inside a transaction.
//!
//! ## Module Organization
//!
//! - `shifts`: Shift catalogue maintenance
//! - `rules`: Recurrence rule writes, including structured day rows
//! - `assignments`: Schedule assignment writes

pub mod assignments;
pub mod rules;
pub mod shifts;
