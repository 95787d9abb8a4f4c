use chrono::{Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::FetchError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict `YYYY-MM-DD`, chrono alone would also take `2024-1-5`.
pub fn parse_start_date(input: &str) -> Result<NaiveDate, FetchError> {
    let invalid = || FetchError::InvalidDate {
        input: input.to_string(),
    };
    if !is_date_shaped(input) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

// chrono pads %m/%d with spaces and signs %Y, so check digits first.
fn is_date_shaped(input: &str) -> bool {
    input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub trait LocalMidnight {
    fn midnight_timestamp<Tz: TimeZone>(&self, tz: &Tz) -> Option<i64>;
}

impl LocalMidnight for NaiveDate {
    fn midnight_timestamp<Tz: TimeZone>(&self, tz: &Tz) -> Option<i64> {
        let midnight = self.and_time(NaiveTime::MIN);
        match tz.from_local_datetime(&midnight) {
            LocalResult::Single(at) => Some(at.timestamp()),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp()),
            LocalResult::None => first_after_gap(tz, midnight),
        }
    }
}

// Zones that skip 00:00 for DST start the day at the end of the gap.
fn first_after_gap<Tz: TimeZone>(tz: &Tz, midnight: NaiveDateTime) -> Option<i64> {
    (1..=4 * 60)
        .map(|minutes| midnight + Duration::minutes(minutes))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|at| at.timestamp())
}
