use chrono::offset::Offset;
use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

const DAY_QUARTERS: i64 = 24 * 4;

/// Reference timezone that every timestamp is normalized into before bucketing.
///
/// Defaults to UTC so that slot and day boundaries do not depend on the machine
/// the report runs on. `local` opts into the system zone.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Named(chrono_tz::UTC)
    }
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("utc")
            || trimmed.eq_ignore_ascii_case("z")
        {
            return Ok(Timezone::default());
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Wall-clock time in this zone, with the offset dropped
    pub(crate) fn wall_clock(self, utc: DateTime<Utc>) -> NaiveDateTime {
        self.to_fixed_offset(utc).naive_local()
    }

    pub(crate) fn today(self) -> NaiveDate {
        self.wall_clock(Utc::now()).date()
    }

    fn resolve_earliest(self, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Timezone::Local => Local
                .from_local_datetime(&wall)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Timezone::Named(tz) => tz
                .from_local_datetime(&wall)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// First UTC instant that falls on `date` in this zone.
    ///
    /// When a DST jump skips midnight, the day starts at the first wall-clock
    /// quarter hour that exists.
    pub(crate) fn start_of_day_utc(self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        (0..DAY_QUARTERS)
            .map(|i| midnight + Duration::minutes(i * 15))
            .find_map(|wall| self.resolve_earliest(wall))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }
}
