//! Calendar exclusions.
//!
//! An exclusion marks one date as (partly) unavailable. Its identity is the
//! `(date, type)` pair; the free-form reason is opaque payload and never
//! drives any logic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a date is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionType {
    /// Vacation (휴가). The whole day is unavailable.
    #[serde(alias = "휴가")]
    Vacation,
    /// Personal matter (개인사정). The whole day is unavailable.
    #[serde(alias = "개인사정")]
    Personal,
    /// Designated holiday (지정휴일). Cycle-transparent; still yields self-study.
    #[serde(alias = "휴일지정", alias = "지정휴일")]
    DesignatedHoliday,
    /// Any other reason (기타). The whole day is unavailable.
    #[serde(alias = "기타")]
    Other,
}

impl ExclusionType {
    /// Precedence when one date carries several types. Lower wins.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::DesignatedHoliday => 0,
            Self::Vacation => 1,
            Self::Personal => 2,
            Self::Other => 3,
        }
    }

    /// Whether the type removes the whole day from study.
    pub fn is_leave(self) -> bool {
        !matches!(self, Self::DesignatedHoliday)
    }
}

/// A dated exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exclusion {
    /// Excluded date.
    #[serde(rename = "exclusion_date")]
    pub date: NaiveDate,
    /// Exclusion category.
    pub exclusion_type: ExclusionType,
    /// Free-form reason shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Exclusion {
    /// Creates an exclusion without a reason.
    pub fn new(date: NaiveDate, exclusion_type: ExclusionType) -> Self {
        Self {
            date,
            exclusion_type,
            reason: None,
        }
    }

    /// Vacation on `date`.
    pub fn vacation(date: NaiveDate) -> Self {
        Self::new(date, ExclusionType::Vacation)
    }

    /// Personal matter on `date`.
    pub fn personal(date: NaiveDate) -> Self {
        Self::new(date, ExclusionType::Personal)
    }

    /// Designated holiday on `date`.
    pub fn designated_holiday(date: NaiveDate) -> Self {
        Self::new(date, ExclusionType::DesignatedHoliday)
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Identity key.
    pub fn key(&self) -> (NaiveDate, ExclusionType) {
        (self.date, self.exclusion_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_type_aliases() {
        let t: ExclusionType = serde_json::from_str("\"휴일지정\"").unwrap();
        assert_eq!(t, ExclusionType::DesignatedHoliday);
        let t: ExclusionType = serde_json::from_str("\"개인사정\"").unwrap();
        assert_eq!(t, ExclusionType::Personal);
        let t: ExclusionType = serde_json::from_str("\"vacation\"").unwrap();
        assert_eq!(t, ExclusionType::Vacation);
        assert_eq!(
            serde_json::to_string(&ExclusionType::DesignatedHoliday).unwrap(),
            "\"designated_holiday\""
        );
    }

    #[test]
    fn test_exclusion_key_ignores_reason() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let a = Exclusion::vacation(d).with_reason("family trip");
        let b = Exclusion::vacation(d);
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_leave_types() {
        assert!(ExclusionType::Vacation.is_leave());
        assert!(ExclusionType::Other.is_leave());
        assert!(!ExclusionType::DesignatedHoliday.is_leave());
    }
}
