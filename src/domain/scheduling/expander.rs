//! Recurrence expander - turns weekly enrollments into dated session drafts.
//!
//! For each enrollment the expander walks the local dates of the window,
//! picks the dates matching the enrollment's weekday, resolves the slot's
//! wall-clock start in the reference timezone and emits a draft unless the
//! slot is already occupied.
//!
//! # Guarantees
//!
//! - Deterministic: identical inputs give identical drafts in identical order
//!   (enrollment order, then date).
//! - Idempotent: feeding the drafts back as existing sessions yields no drafts.
//! - No draft shares a session key with another draft or an existing session.
//!
//! Bad enrollment data never fails the run. Each rejected enrollment or date
//! is logged and recorded in [`Expansion::skipped`].

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use tracing::{debug, warn};

use super::enrollment::Enrollment;
use super::session::{ExistingSession, SessionDraft};
use super::session_key::SessionKeyIndex;
use super::time::{parse_weekday, ClockTime, ReferenceTimezone};
use super::window::WeekWindow;
use crate::domain::foundation::{EnrollmentId, ProfileId, SessionStatus};

/// Why an enrollment or one of its dates produced no draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Paused,
    MissingStudent,
    MissingTutor,
    MissingAvailability,
    UnknownWeekday(String),
    MalformedTime(String),
    UnresolvableLocalTime(String),
    BeforeStartDate,
    Duplicate,
}

/// A rejected enrollment (`date: None`) or a rejected occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOccurrence {
    pub enrollment_id: EnrollmentId,
    pub date: Option<NaiveDate>,
    pub reason: SkipReason,
}

/// Result of one expansion run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub drafts: Vec<SessionDraft>,
    pub skipped: Vec<SkippedOccurrence>,
}

impl Expansion {
    /// True when the run produced no drafts.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Number of skips with the given reason.
    pub fn skipped_for(&self, reason: &SkipReason) -> usize {
        self.skipped.iter().filter(|s| &s.reason == reason).count()
    }

    fn skip(&mut self, enrollment_id: EnrollmentId, date: Option<NaiveDate>, reason: SkipReason) {
        self.skipped.push(SkippedOccurrence {
            enrollment_id,
            date,
            reason,
        });
    }
}

/// Validated view of an enrollment's first availability slot.
struct WeeklyRule {
    weekday: Weekday,
    start_time: ClockTime,
    student_id: ProfileId,
    tutor_id: ProfileId,
}

impl WeeklyRule {
    fn from_enrollment(enrollment: &Enrollment) -> Result<Self, SkipReason> {
        if enrollment.paused {
            return Err(SkipReason::Paused);
        }
        let student = enrollment.student.as_ref().ok_or(SkipReason::MissingStudent)?;
        let tutor = enrollment.tutor.as_ref().ok_or(SkipReason::MissingTutor)?;
        let slot = enrollment
            .primary_slot()
            .ok_or(SkipReason::MissingAvailability)?;

        let start_time: ClockTime = slot
            .start_time
            .parse()
            .map_err(|_| SkipReason::MalformedTime(slot.start_time.clone()))?;
        // The end time does not shape the session but must still be well formed.
        slot.end_time
            .parse::<ClockTime>()
            .map_err(|_| SkipReason::MalformedTime(slot.end_time.clone()))?;
        let weekday =
            parse_weekday(&slot.day).map_err(|_| SkipReason::UnknownWeekday(slot.day.clone()))?;

        Ok(Self {
            weekday,
            start_time,
            student_id: student.id,
            tutor_id: tutor.id,
        })
    }
}

/// Expands enrollments into session drafts for a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceExpander {
    timezone: ReferenceTimezone,
}

impl RecurrenceExpander {
    pub fn new(timezone: ReferenceTimezone) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> &ReferenceTimezone {
        &self.timezone
    }

    /// Runs a full expansion against a snapshot of existing sessions.
    pub fn expand(
        &self,
        window: &WeekWindow,
        enrollments: &[Enrollment],
        existing: &[ExistingSession],
    ) -> Expansion {
        let mut index = SessionKeyIndex::from_existing(existing, self.timezone);
        let mut expansion = Expansion::default();

        for enrollment in enrollments {
            self.expand_enrollment(window, enrollment, &mut index, &mut expansion);
        }

        debug!(
            drafts = expansion.drafts.len(),
            skipped = expansion.skipped.len(),
            occupied = index.len(),
            "Expansion finished"
        );
        expansion
    }

    /// Expands a single enrollment.
    ///
    /// `index` is the run's accumulator: every draft's key is inserted before
    /// this returns, so later enrollments see the slots taken here.
    pub fn expand_enrollment(
        &self,
        window: &WeekWindow,
        enrollment: &Enrollment,
        index: &mut SessionKeyIndex,
        out: &mut Expansion,
    ) {
        let rule = match WeeklyRule::from_enrollment(enrollment) {
            Ok(rule) => rule,
            Err(reason) => {
                match &reason {
                    SkipReason::Paused => {
                        debug!(enrollment_id = %enrollment.id, "Skipping paused enrollment")
                    }
                    other => {
                        warn!(enrollment_id = %enrollment.id, reason = ?other, "Skipping invalid enrollment")
                    }
                }
                out.skip(enrollment.id, None, reason);
                return;
            }
        };

        let not_before = match self.timezone.start_of_day(enrollment.start_date) {
            Ok(instant) => instant,
            Err(e) => {
                warn!(enrollment_id = %enrollment.id, error = %e, "Cannot resolve enrollment start date");
                out.skip(enrollment.id, None, SkipReason::UnresolvableLocalTime(e.to_string()));
                return;
            }
        };

        for day in window.days().filter(|day| day.weekday() == rule.weekday) {
            let day = window.clamp(day);
            self.expand_occurrence(day, &rule, not_before, enrollment, index, out);
        }
    }

    fn expand_occurrence(
        &self,
        day: NaiveDate,
        rule: &WeeklyRule,
        not_before: DateTime<Utc>,
        enrollment: &Enrollment,
        index: &mut SessionKeyIndex,
        out: &mut Expansion,
    ) {
        let local = day.and_time(rule.start_time.as_naive_time());
        let start = match self.timezone.localize(local) {
            Ok(instant) => instant,
            Err(e) => {
                warn!(enrollment_id = %enrollment.id, %day, error = %e, "Cannot resolve session start");
                out.skip(enrollment.id, Some(day), SkipReason::UnresolvableLocalTime(e.to_string()));
                return;
            }
        };

        if start < not_before {
            debug!(
                enrollment_id = %enrollment.id,
                %day,
                start_date = %enrollment.start_date,
                "Occurrence precedes enrollment start date"
            );
            out.skip(enrollment.id, Some(day), SkipReason::BeforeStartDate);
            return;
        }

        let key = index.key_for(&rule.student_id, &rule.tutor_id, &start);
        if index.contains(&key) {
            debug!(enrollment_id = %enrollment.id, %key, "Slot already booked");
            out.skip(enrollment.id, Some(day), SkipReason::Duplicate);
            return;
        }

        out.drafts.push(SessionDraft {
            enrollment_id: enrollment.id,
            date: start,
            student_id: rule.student_id,
            tutor_id: rule.tutor_id,
            status: SessionStatus::Active,
            summary: enrollment.summary.clone(),
            meeting_id: enrollment.meeting_id.clone(),
            duration: enrollment.duration,
        });
        index.insert(key);
    }
}
