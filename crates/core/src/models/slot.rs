use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::{self, hhmm};

/// A candidate reservable interval. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "start_24", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(rename = "end_24", with = "hhmm")]
    pub end: NaiveTime,
    pub label: String,
    pub available: bool,
}

impl Slot {
    pub fn new(start: NaiveTime, end: NaiveTime, available: bool) -> Self {
        Self {
            start,
            end,
            label: time::range_label(start, end),
            available,
        }
    }
}

/// "List slots" request once its wire fields have been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSlotsRequest {
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub duration_hours: u32,
}

impl ListSlotsRequest {
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.duration_hours))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSlotsResponse {
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub duration_hours: u32,
    pub slots: Vec<Slot>,
}
