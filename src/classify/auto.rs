//! The automatic policy: no study/review cycle.

use crate::models::{DatePeriod, DayType};
use crate::resolve::ExclusionCalendar;

use super::{excluded_day_type, DayAssignment, DayClassifier};

/// Marks every non-excluded date as a study date.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoClassifier;

impl DayClassifier for AutoClassifier {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn classify(&self, period: &DatePeriod, calendar: &ExclusionCalendar) -> Vec<DayAssignment> {
        period
            .dates()
            .map(|date| {
                let day_type = excluded_day_type(calendar, date).unwrap_or(DayType::Study);
                DayAssignment::new(date, day_type)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exclusion;
    use chrono::NaiveDate;

    #[test]
    fn test_auto_has_no_review_days() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let period = DatePeriod::new(d(1), d(10));
        let (calendar, _) = ExclusionCalendar::build(
            &[Exclusion::designated_holiday(d(2)), Exclusion::vacation(d(5))],
            &period,
        );
        let days = AutoClassifier.classify(&period, &calendar);

        assert_eq!(days.len(), 10);
        assert_eq!(days[1].day_type, DayType::DesignatedHoliday);
        assert_eq!(days[4].day_type, DayType::Vacation);
        assert_eq!(
            days.iter().filter(|a| a.day_type == DayType::Study).count(),
            8
        );
        assert!(days.iter().all(|a| a.week_number.is_none()));
    }
}
