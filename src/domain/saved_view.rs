//! Saved views: named, persisted combinations of list filters.

use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::lead::LeadStatus;
use crate::domain::types::{HubId, OwnerRef, SavedViewId, SavedViewName};

/// Creation-time window of a saved view, relative to "now" when applied.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    Week,
    Month,
    Quarter,
    /// Any unrecognized keyword deserializes here and means "unbounded".
    #[default]
    #[serde(other)]
    All,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Quarter => "quarter",
            DateRange::All => "all",
        }
    }

    /// Lower bound of the window ending at `now`, or `None` when unbounded.
    /// `now` is a UTC timestamp, so `Today` starts at UTC midnight.
    pub fn window_start(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            DateRange::Today => now.date().and_hms_opt(0, 0, 0),
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => Some(now - Duration::days(30)),
            DateRange::Quarter => Some(now - Duration::days(90)),
            DateRange::All => None,
        }
    }

    /// True when `created_at` falls inside `[window_start, now]`. Unbounded
    /// windows start at the epoch, so future records never match.
    pub fn contains(&self, created_at: NaiveDateTime, now: NaiveDateTime) -> bool {
        created_at <= now
            && self
                .window_start(now)
                .is_none_or(|start| created_at >= start)
    }
}

impl FromStr for DateRange {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "today" => DateRange::Today,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            "quarter" => DateRange::Quarter,
            _ => DateRange::All,
        })
    }
}

/// Filter stored inside a saved view. Empty sets do not constrain.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ViewFilter {
    #[serde(default)]
    pub statuses: Vec<LeadStatus>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub date_range: DateRange,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedView {
    pub id: SavedViewId,
    pub hub_id: HubId,
    pub owner: OwnerRef,
    pub name: SavedViewName,
    pub filter: ViewFilter,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSavedView {
    pub hub_id: HubId,
    pub owner: OwnerRef,
    pub name: SavedViewName,
    pub filter: ViewFilter,
}

impl NewSavedView {
    #[must_use]
    pub fn new(hub_id: HubId, owner: OwnerRef, name: SavedViewName, filter: ViewFilter) -> Self {
        Self {
            hub_id,
            owner,
            name,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn today_starts_at_midnight() {
        let now = at(20, 15);
        assert!(DateRange::Today.contains(at(20, 0), now));
        assert!(!DateRange::Today.contains(at(19, 23), now));
    }

    #[test]
    fn week_is_seven_days_back() {
        let now = at(20, 12);
        assert!(DateRange::Week.contains(at(13, 12), now));
        assert!(!DateRange::Week.contains(at(13, 11), now));
    }

    #[test]
    fn future_records_fall_outside_every_window() {
        let now = at(20, 12);
        assert!(!DateRange::Month.contains(at(21, 0), now));
        assert!(!DateRange::All.contains(at(21, 0), now));
        assert!(DateRange::All.contains(at(1, 0), now));
    }

    #[test]
    fn unknown_keyword_is_unbounded() {
        assert_eq!("decade".parse::<DateRange>().unwrap(), DateRange::All);
        let parsed: DateRange = serde_json::from_str("\"decade\"").unwrap();
        assert_eq!(parsed, DateRange::All);
        let parsed: DateRange = serde_json::from_str("\"quarter\"").unwrap();
        assert_eq!(parsed, DateRange::Quarter);
    }

    #[test]
    fn filter_deserializes_with_missing_fields() {
        let filter: ViewFilter = serde_json::from_str(r#"{"statuses":["Won"]}"#).unwrap();
        assert_eq!(filter.statuses, vec![LeadStatus::Won]);
        assert!(filter.sources.is_empty());
        assert_eq!(filter.date_range, DateRange::All);
    }
}
