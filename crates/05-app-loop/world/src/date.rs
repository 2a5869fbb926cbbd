//! Wire-to-display date conversion for schedule timestamps.
//!
//! The server sends naive Asia/Seoul wall-clock timestamps
//! (`2023-04-29T14:00:00`). They are displayed in the same zone, so no
//! timezone arithmetic happens here; only the rendering changes.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// `chrono` format of schedule timestamps on the wire.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A wire timestamp that could not be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("`{input}` is not a schedule timestamp")]
pub struct DateFormatError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Language used for weekday names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayStyle {
    /// `Saturday`
    #[default]
    English,
    /// `토요일`
    Korean,
}

impl WeekdayStyle {
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        match self {
            WeekdayStyle::English => match weekday {
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
                Weekday::Sun => "Sunday",
            },
            WeekdayStyle::Korean => match weekday {
                Weekday::Mon => "월요일",
                Weekday::Tue => "화요일",
                Weekday::Wed => "수요일",
                Weekday::Thu => "목요일",
                Weekday::Fri => "금요일",
                Weekday::Sat => "토요일",
                Weekday::Sun => "일요일",
            },
        }
    }
}

/// Parses a wire timestamp.
pub fn parse_wire(input: &str) -> Result<NaiveDateTime, DateFormatError> {
    NaiveDateTime::parse_from_str(input, WIRE_FORMAT).map_err(|source| DateFormatError {
        input: input.to_string(),
        source,
    })
}

/// Renders `M월 d일 EEEE H:mm`.
pub fn display_date(at: NaiveDateTime, style: WeekdayStyle) -> String {
    format!(
        "{}월 {}일 {} {}:{:02}",
        at.month(),
        at.day(),
        style.weekday_name(at.weekday()),
        at.hour(),
        at.minute()
    )
}

/// Converts a wire timestamp for display; unparseable input yields `""`.
pub fn convert_date_string(input: &str, style: WeekdayStyle) -> String {
    match parse_wire(input) {
        Ok(at) => display_date(at, style),
        Err(err) => {
            debug!("dropping schedule date: {err}");
            String::new()
        }
    }
}

/// A timestamp already rendered by [`display_date`].
#[derive(Clone, Debug, PartialEq, Eq)]
struct DisplayStamp<'a> {
    month: u32,
    day: u32,
    weekday: &'a str,
    time: NaiveTime,
}

fn parse_display(input: &str, style: WeekdayStyle) -> Option<DisplayStamp<'_>> {
    let mut parts = input.split_whitespace();
    let month = parts.next()?.strip_suffix('월')?.parse().ok()?;
    let day = parts.next()?.strip_suffix('일')?.parse().ok()?;
    let weekday = parts.next()?;
    let time = NaiveTime::parse_from_str(parts.next()?, "%H:%M").ok()?;
    if parts.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    if !WEEKDAYS.iter().any(|&w| style.weekday_name(w) == weekday) {
        return None;
    }

    Some(DisplayStamp {
        month,
        day,
        weekday,
        time,
    })
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Renders a session span as `M월 d일 EEEE HH:mm ~ HH:mm` from two
/// [`display_date`] strings.
///
/// Returns `""` when either side is not a display timestamp for `style`.
pub fn format_time_interval(start: &str, end: &str, style: WeekdayStyle) -> String {
    let (Some(start), Some(end)) = (parse_display(start, style), parse_display(end, style)) else {
        debug!("dropping schedule span: `{start}` ~ `{end}`");
        return String::new();
    };

    format!(
        "{}월 {}일 {} {} ~ {}",
        start.month,
        start.day,
        start.weekday,
        start.time.format("%H:%M"),
        end.time.format("%H:%M")
    )
}
