//! Time-slot composition.
//!
//! Turns one date's block coverage into labelled, non-overlapping slots.
//!
//! # Algorithm
//! 1. Leave days (vacation, personal, other) produce no slots.
//! 2. Academy travel and lesson minutes inside coverage become
//!    `travel_time` / `academy` slots.
//! 3. Non-study minutes inside coverage, minus academy minutes, become
//!    `meal_sleep` slots labelled with their kind.
//! 4. The remainder is study time. On designated holidays all of it is
//!    `self_study`; on study and review days the part inside the
//!    self-study allowance is `self_study` and the rest `study_time`.
//!
//! Every slot is a subset of coverage and the pieces partition it, so the
//! slot minutes of a non-leave day always add up to its coverage minutes.

use chrono::NaiveDate;

use crate::error::{Result, ScheduleError};
use crate::models::{DayType, IntervalSet, SlotType, TimeInterval, TimeSlot};
use crate::resolve::{AcademyDay, NonStudySegment};

/// Slots and study hours of one date.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDay {
    /// Slots ordered by start, pairwise disjoint.
    pub time_slots: Vec<TimeSlot>,
    /// `(study_time + self_study) / 60`.
    pub study_hours: f64,
}

impl ComposedDay {
    fn empty() -> Self {
        Self {
            time_slots: Vec::new(),
            study_hours: 0.0,
        }
    }
}

/// Composes daily slots.
#[derive(Debug, Clone, Default)]
pub struct SlotComposer {
    self_study_allowance: IntervalSet,
}

impl SlotComposer {
    /// Creates a composer without a self-study allowance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the daily window passed through as `self_study` on study and
    /// review days.
    pub fn with_self_study_allowance(mut self, window: Option<TimeInterval>) -> Self {
        self.self_study_allowance = window.map(IntervalSet::single).unwrap_or_default();
        self
    }

    /// Composes the slots of one date.
    ///
    /// # Errors
    /// [`ScheduleError::SlotOverlap`] if two composed slots overlap. This
    /// cannot happen for resolved inputs and indicates a bug.
    pub fn compose(
        &self,
        date: NaiveDate,
        day_type: DayType,
        coverage: &IntervalSet,
        academy: &AcademyDay,
        non_study: &[NonStudySegment],
    ) -> Result<ComposedDay> {
        if day_type.is_leave() || coverage.is_empty() {
            return Ok(ComposedDay::empty());
        }

        let mut slots = Vec::new();

        for entry in &academy.entries {
            for (set, slot_type) in [
                (&entry.pre_travel, SlotType::TravelTime),
                (&entry.lesson, SlotType::Academy),
                (&entry.post_travel, SlotType::TravelTime),
            ] {
                push_slots(&mut slots, &set.intersect(coverage), slot_type, &entry.label);
            }
        }

        // Academy time wins over non-study time; earlier segments win over
        // later ones.
        let mut taken = academy.occupied();
        for segment in non_study {
            let free = segment.intervals.intersect(coverage).subtract(&taken);
            push_slots(&mut slots, &free, SlotType::MealSleep, &segment.label);
            taken = taken.union(&free);
        }

        let remainder = coverage.subtract(&taken);
        if day_type == DayType::DesignatedHoliday {
            push_unlabelled(&mut slots, &remainder, SlotType::SelfStudy);
        } else {
            push_unlabelled(
                &mut slots,
                &remainder.intersect(&self.self_study_allowance),
                SlotType::SelfStudy,
            );
            push_unlabelled(
                &mut slots,
                &remainder.subtract(&self.self_study_allowance),
                SlotType::StudyTime,
            );
        }

        slots.sort_by_key(|s| (s.start, s.end));
        check_disjoint(date, &slots)?;

        let study_minutes: u32 = slots
            .iter()
            .filter(|s| matches!(s.slot_type, SlotType::StudyTime | SlotType::SelfStudy))
            .map(TimeSlot::duration_minutes)
            .sum();

        Ok(ComposedDay {
            time_slots: slots,
            study_hours: f64::from(study_minutes) / 60.0,
        })
    }
}

fn push_slots(slots: &mut Vec<TimeSlot>, set: &IntervalSet, slot_type: SlotType, label: &str) {
    slots.extend(set.iter().map(|iv| TimeSlot::new(*iv, slot_type).with_label(label)));
}

fn push_unlabelled(slots: &mut Vec<TimeSlot>, set: &IntervalSet, slot_type: SlotType) {
    slots.extend(set.iter().map(|iv| TimeSlot::new(*iv, slot_type)));
}

fn check_disjoint(date: NaiveDate, slots: &[TimeSlot]) -> Result<()> {
    for pair in slots.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(ScheduleError::SlotOverlap {
                date,
                first: Box::new(pair[0].clone()),
                second: Box::new(pair[1].clone()),
            });
        }
    }
    Ok(())
}
