//! Case stage/status classification and statute arithmetic
//!
//! A casefile's progress is a two-level classification: a coarse stage
//! (`Intake` -> `Processing` -> `Demand` -> `Closed`) and a finer status
//! within the stage. The intake pipeline only ever writes the initial
//! `Intake`/`New` pair; later transitions belong to case management.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Coarse case progress stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStage {
    Intake,
    Processing,
    Demand,
    Closed,
}

impl CaseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Processing => "processing",
            Self::Demand => "demand",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intake" => Some(Self::Intake),
            "processing" => Some(Self::Processing),
            "demand" => Some(Self::Demand),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Fine-grained case status within a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    New,
    Active,
    OnHold,
    Resolved,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "active" => Some(Self::Active),
            "on_hold" => Some(Self::OnHold),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// The stage/status pair every newly created case starts in.
pub fn initial_case_state() -> (CaseStage, CaseStatus) {
    (CaseStage::Intake, CaseStatus::New)
}

/// Statute of limitations period: two calendar years after the date of loss.
pub const STATUTE_LIMITATION_MONTHS: u32 = 24;

/// Compute the statute filing deadline for a date of loss.
///
/// Calendar arithmetic, not a 730-day literal: `2024-03-10` -> `2026-03-10`.
/// A Feb 29 loss date clamps to Feb 28 of the (non-leap) deadline year.
pub fn statute_deadline(date_of_loss: NaiveDate) -> NaiveDate {
    // checked_add_months only fails near NaiveDate::MAX; loss dates are
    // validated to be non-future, so the fallback is unreachable in practice.
    date_of_loss
        .checked_add_months(Months::new(STATUTE_LIMITATION_MONTHS))
        .unwrap_or(date_of_loss)
}

/// Whole days from `today` until `deadline`; negative if the deadline has
/// already passed.
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_statute_deadline_is_two_calendar_years() {
        assert_eq!(statute_deadline(d("2024-03-10")), d("2026-03-10"));
        assert_eq!(statute_deadline(d("2024-01-15")), d("2026-01-15"));
        assert_eq!(statute_deadline(d("2022-12-31")), d("2024-12-31"));
    }

    #[test]
    fn test_statute_deadline_clamps_leap_day() {
        // 2024-02-29 + 24 months lands in non-leap 2026
        assert_eq!(statute_deadline(d("2024-02-29")), d("2026-02-28"));
    }

    #[test]
    fn test_days_until_can_be_negative() {
        assert_eq!(days_until(d("2026-01-15"), d("2026-01-10")), 5);
        assert_eq!(days_until(d("2026-01-15"), d("2026-01-15")), 0);
        assert_eq!(days_until(d("2020-01-01"), d("2026-01-01")), -2192);
    }

    #[test]
    fn test_stage_status_round_trip() {
        for stage in [
            CaseStage::Intake,
            CaseStage::Processing,
            CaseStage::Demand,
            CaseStage::Closed,
        ] {
            assert_eq!(CaseStage::parse(stage.as_str()), Some(stage));
        }
        for status in [
            CaseStatus::New,
            CaseStatus::Active,
            CaseStatus::OnHold,
            CaseStatus::Resolved,
        ] {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CaseStage::parse("unknown"), None);
    }

    #[test]
    fn test_initial_case_state() {
        let (stage, status) = initial_case_state();
        assert_eq!(stage, CaseStage::Intake);
        assert_eq!(status, CaseStatus::New);
    }
}
