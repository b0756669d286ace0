// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calculator::{
    PatternStatistics, calculate_statistics, ensure_shifts_resolvable, generate_preview,
    resolve_range, resolve_shift_for_date,
};
use crate::command::{Command, MutationOutcome, PatternDraft, StoredPattern};
use crate::error::CoreError;
use crate::ports::{AssignmentStore, Clock, IdentityProvider, PatternStore, ShiftLookup};
use shiftcycle_domain::{
    Assignment, DecodeMode, DomainError, Pattern, PatternDay, RecurrenceRule, Shift,
    WorkScheduleDay, add_years, decode_pattern, encode_pattern, validate_end_date,
    validate_pattern_configuration,
};
use std::sync::Arc;
use time::Date;
use tracing::{info, warn};

/// Engine settings supplied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on concurrently running mutations.
    pub mutation_workers: usize,
    /// How stored payloads that fail to decode are handled.
    pub decode_mode: DecodeMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mutation_workers: 4,
            decode_mode: DecodeMode::Strict,
        }
    }
}

/// A resolved day together with the assignment that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchedule {
    pub assignment_id: i64,
    pub pattern_name: String,
    pub day: WorkScheduleDay,
}

/// The recurring pattern engine.
///
/// Holds only injected collaborators and configuration; all data lives in
/// the store passed to each call. Cloning is cheap.
#[derive(Clone)]
pub struct PatternEngine {
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl std::fmt::Debug for PatternEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternEngine")
            .field("user_id", &self.identity.user_id())
            .field("team_name", &self.identity.team_name())
            .field("today", &self.clock.today())
            .field("config", &self.config)
            .finish()
    }
}

impl PatternEngine {
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        Self {
            identity,
            clock,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.identity.user_id()
    }

    #[must_use]
    pub fn team_name(&self) -> &str {
        self.identity.team_name()
    }

    /// Validates a draft without writing anything.
    ///
    /// Runs the structural rules, the anchor window, the name and end date
    /// checks, then confirms every referenced shift exists.
    ///
    /// # Errors
    ///
    /// - `Validation` for the first violated rule
    /// - `Read` if the shift lookup fails
    pub fn validate_draft<L: ShiftLookup + ?Sized>(
        &self,
        lookup: &mut L,
        draft: &PatternDraft,
    ) -> Result<Pattern, CoreError> {
        let today: Date = self.today();
        validate_pattern_configuration(&draft.days, draft.anchor_date, &draft.name, today)?;
        validate_end_date(draft.anchor_date, draft.end_date)?;
        ensure_shifts_resolvable(lookup, &draft.days)?;

        if add_years(today, 1).is_ok_and(|horizon| draft.anchor_date > horizon) {
            info!(
                anchor_date = %draft.anchor_date,
                %today,
                "Pattern anchor date is more than a year in the future"
            );
        }

        Ok(Pattern::new(draft.days.clone())?)
    }

    /// Applies a mutating command to the store.
    ///
    /// Validation always completes before the first write. If the assignment
    /// write fails after a new rule was saved, the rule is deleted again on a
    /// best-effort basis.
    ///
    /// # Errors
    ///
    /// - `Validation` if the draft breaks a rule
    /// - `NotFound` if the target assignment does not exist
    /// - `Create`, `Update` or `Delete` if the store fails during that step
    pub fn apply<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        command: Command,
    ) -> Result<MutationOutcome, CoreError> {
        match command {
            Command::CreatePattern(draft) => self.create_pattern(store, draft),
            Command::UpdatePattern {
                assignment_id,
                draft,
            } => self.update_pattern(store, assignment_id, draft),
            Command::DeletePattern { assignment_id } => self.delete_pattern(store, assignment_id),
        }
    }

    fn create_pattern<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        draft: PatternDraft,
    ) -> Result<MutationOutcome, CoreError> {
        let pattern: Pattern = self.validate_draft(store, &draft)?;

        let rule: RecurrenceRule = store
            .save_rule(&encode_pattern(&pattern), &pattern)
            .map_err(|e| CoreError::Create(e.to_string()))?;
        let rule_id: i64 = saved_rule_id(&rule, CoreError::Create)?;

        let mut assignment: Assignment = Assignment::new(
            draft.name,
            self.identity.user_id(),
            self.identity.team_name().to_string(),
            draft.anchor_date,
        );
        assignment.end_date = draft.end_date;
        assignment.enabled = draft.enabled;
        assignment.priority = draft.priority;
        assignment.rule_id = Some(rule_id);

        let assignment: Assignment = match store.save_assignment(&assignment) {
            Ok(saved) => saved,
            Err(err) => {
                discard_orphaned_rule(store, rule_id);
                return Err(CoreError::Create(err.to_string()));
            }
        };

        info!(
            assignment_id = ?assignment.assignment_id(),
            rule_id,
            length = pattern.length(),
            "Created pattern assignment"
        );

        Ok(MutationOutcome::Created(StoredPattern {
            assignment,
            rule,
            pattern,
        }))
    }

    fn update_pattern<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        assignment_id: i64,
        draft: PatternDraft,
    ) -> Result<MutationOutcome, CoreError> {
        let existing: Assignment = self.owned_assignment(store, assignment_id)?;
        let pattern: Pattern = self.validate_draft(store, &draft)?;

        let rule: RecurrenceRule = store
            .save_rule(&encode_pattern(&pattern), &pattern)
            .map_err(|e| CoreError::Update(e.to_string()))?;
        let rule_id: i64 = saved_rule_id(&rule, CoreError::Update)?;

        let mut updated: Assignment = existing.clone();
        updated.name = draft.name;
        updated.anchor_date = draft.anchor_date;
        updated.end_date = draft.end_date;
        updated.enabled = draft.enabled;
        updated.priority = draft.priority;
        updated.rule_id = Some(rule_id);

        let assignment: Assignment = match store.save_assignment(&updated) {
            Ok(saved) => saved,
            Err(err) => {
                discard_orphaned_rule(store, rule_id);
                return Err(CoreError::Update(err.to_string()));
            }
        };

        // The assignment already points at the new rule, so a failure to
        // drop the old one leaves an orphan rather than failing the update.
        if let Some(old_rule_id) = existing.rule_id.filter(|old| *old != rule_id) {
            release_rule(store, old_rule_id);
        }

        info!(assignment_id, rule_id, "Updated pattern assignment");

        Ok(MutationOutcome::Updated(StoredPattern {
            assignment,
            rule,
            pattern,
        }))
    }

    fn delete_pattern<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        assignment_id: i64,
    ) -> Result<MutationOutcome, CoreError> {
        let existing: Assignment = self.owned_assignment(store, assignment_id)?;

        store
            .delete_assignment(assignment_id)
            .map_err(|e| CoreError::Delete(e.to_string()))?;

        let rule_deleted: bool = existing
            .rule_id
            .is_some_and(|rule_id| release_rule(store, rule_id));

        info!(assignment_id, rule_deleted, "Deleted pattern assignment");

        Ok(MutationOutcome::Deleted {
            assignment_id,
            rule_deleted,
        })
    }

    /// Loads an assignment of the current user with its decoded pattern.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the assignment or its rule does not exist
    /// - `Validation(NotCustomPattern)` if the rule is another recurrence kind
    /// - `Decode` if the stored pattern is corrupt
    /// - `Read` if the store fails
    pub fn load_pattern<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        assignment_id: i64,
    ) -> Result<StoredPattern, CoreError> {
        let assignment: Assignment = self.owned_assignment(store, assignment_id)?;
        self.hydrate(store, assignment)
    }

    /// Lists every assignment of the current user with its decoded pattern.
    ///
    /// # Errors
    ///
    /// Same as [`PatternEngine::load_pattern`], for any listed assignment.
    pub fn list_patterns_for_current_user<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<Vec<StoredPattern>, CoreError> {
        let assignments: Vec<Assignment> = store
            .list_assignments_for_user(self.identity.user_id())
            .map_err(|e| CoreError::Read(e.to_string()))?;

        assignments
            .into_iter()
            .map(|assignment| self.hydrate(store, assignment))
            .collect()
    }

    /// Resolves what the current user is scheduled to work on `date`.
    ///
    /// Among processable assignments covering `date`, the highest priority
    /// wins; ties go to the lowest assignment ID. Returns `None` if no
    /// assignment applies.
    ///
    /// # Errors
    ///
    /// Same as [`PatternEngine::load_pattern`], plus shift resolution errors.
    pub fn resolve_user_schedule<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        date: Date,
    ) -> Result<Option<ResolvedSchedule>, CoreError> {
        let today: Date = self.today();
        let mut candidates: Vec<Assignment> = store
            .list_assignments_for_user(self.identity.user_id())
            .map_err(|e| CoreError::Read(e.to_string()))?
            .into_iter()
            .filter(|a| a.is_processable(today) && a.covers(date))
            .collect();

        candidates.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.assignment_id().cmp(&b.assignment_id()))
        });

        let Some(chosen) = candidates.into_iter().next() else {
            return Ok(None);
        };

        let stored: StoredPattern = self.hydrate(store, chosen)?;
        let day: Option<WorkScheduleDay> =
            resolve_shift_for_date(store, date, &stored.assignment, &stored.pattern)?;

        Ok(day.map(|day| ResolvedSchedule {
            assignment_id: stored.assignment.assignment_id().unwrap_or_default(),
            pattern_name: stored.assignment.name,
            day,
        }))
    }

    /// Resolves every covered date in `[from, to]` for one assignment.
    ///
    /// # Errors
    ///
    /// Same as [`PatternEngine::load_pattern`], plus range and shift
    /// resolution errors.
    pub fn resolve_range<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        assignment_id: i64,
        from: Date,
        to: Date,
    ) -> Result<Vec<WorkScheduleDay>, CoreError> {
        let stored: StoredPattern = self.load_pattern(store, assignment_id)?;
        resolve_range(store, &stored.assignment, &stored.pattern, from, to)
    }

    /// Previews an unsaved pattern for `days` days from `anchor_date`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the days are malformed, a shift is unknown, or
    ///   `days` exceeds the preview limit
    /// - `Read` if the shift lookup fails
    pub fn preview<L: ShiftLookup + ?Sized>(
        &self,
        lookup: &mut L,
        days: Vec<PatternDay>,
        anchor_date: Date,
        preview_days: u32,
    ) -> Result<Vec<WorkScheduleDay>, CoreError> {
        let pattern: Pattern = Pattern::new(days)?;
        ensure_shifts_resolvable(lookup, pattern.days())?;
        generate_preview(lookup, &pattern, anchor_date, preview_days)
    }

    /// Computes statistics for an unsaved pattern.
    ///
    /// # Errors
    ///
    /// - `Validation` if the days are malformed
    /// - `Read` if the shift lookup fails
    pub fn statistics<L: ShiftLookup + ?Sized>(
        &self,
        lookup: &mut L,
        days: Vec<PatternDay>,
    ) -> Result<PatternStatistics, CoreError> {
        let pattern: Pattern = Pattern::new(days)?;
        let shifts: Vec<Shift> = lookup
            .list_shifts()
            .map_err(|e| CoreError::Read(e.to_string()))?;
        Ok(calculate_statistics(&pattern, &shifts))
    }

    fn owned_assignment<S: AssignmentStore + ?Sized>(
        &self,
        store: &mut S,
        assignment_id: i64,
    ) -> Result<Assignment, CoreError> {
        store
            .get_assignment(assignment_id)
            .map_err(|e| CoreError::Read(e.to_string()))?
            .filter(|a| a.user_id == self.identity.user_id())
            .ok_or_else(|| CoreError::not_found("Assignment", assignment_id))
    }

    fn hydrate<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        assignment: Assignment,
    ) -> Result<StoredPattern, CoreError> {
        let rule_id: i64 = assignment.rule_id.ok_or_else(|| {
            CoreError::Read(format!(
                "assignment {} has no recurrence rule",
                assignment.assignment_id().unwrap_or_default()
            ))
        })?;

        let rule: RecurrenceRule = store
            .get_rule(rule_id)
            .map_err(|e| CoreError::Read(e.to_string()))?
            .ok_or_else(|| CoreError::not_found("Recurrence rule", rule_id))?;

        let pattern: Pattern = self.pattern_for_rule(store, &rule)?;
        Ok(StoredPattern {
            assignment,
            rule,
            pattern,
        })
    }

    /// Prefers the structured day rows; rules stored before those existed
    /// only carry the encoded description.
    fn pattern_for_rule<S: PatternStore + ?Sized>(
        &self,
        store: &mut S,
        rule: &RecurrenceRule,
    ) -> Result<Pattern, CoreError> {
        let rows: Vec<PatternDay> = match rule.rule_id() {
            Some(rule_id) => store
                .get_pattern_days(rule_id)
                .map_err(|e| CoreError::Read(e.to_string()))?,
            None => Vec::new(),
        };

        if rows.is_empty() {
            return decode_pattern(rule, self.config.decode_mode).map_err(CoreError::from_decode);
        }

        Pattern::new(rows).map_err(|e| {
            CoreError::Decode(DomainError::CorruptPattern {
                reason: e.to_string(),
            })
        })
    }
}

fn saved_rule_id(
    rule: &RecurrenceRule,
    kind: fn(String) -> CoreError,
) -> Result<i64, CoreError> {
    rule.rule_id()
        .ok_or_else(|| kind(String::from("store returned a rule without an ID")))
}

/// Deletes a rule saved earlier in a mutation that did not complete.
fn discard_orphaned_rule<S: PatternStore + ?Sized>(store: &mut S, rule_id: i64) {
    if let Err(err) = store.delete_rule(rule_id) {
        warn!(
            rule_id,
            %err,
            "Failed to delete orphaned recurrence rule; it will remain until garbage collected"
        );
    }
}

/// Deletes a rule if no assignment references it any more.
///
/// Returns true if the rule was deleted.
fn release_rule<S: PatternStore + ?Sized>(store: &mut S, rule_id: i64) -> bool {
    match store.is_rule_referenced(rule_id) {
        Ok(true) => false,
        Ok(false) => match store.delete_rule(rule_id) {
            Ok(()) => true,
            Err(err) => {
                warn!(rule_id, %err, "Failed to delete unreferenced recurrence rule");
                false
            }
        },
        Err(err) => {
            warn!(rule_id, %err, "Failed to check recurrence rule references");
            false
        }
    }
}
