//! Attendance domain models exchanged between services and the reducer.
//!
//! Field names follow the server's camelCase JSON so scripted responses and
//! scenario files can be written in the same shape the backend returns.

use serde::{Deserialize, Serialize};

/// Session classification attached to a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    /// No session takes place today.
    NoSession,
    /// A session with attendance checks.
    HasAttendance,
    /// A session without attendance checks (events, socials).
    NoAttendance,
    /// Any session type this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl SessionType {
    pub fn is_no_session(self) -> bool {
        matches!(self, SessionType::NoSession)
    }
}

/// One attendance check already recorded for today's session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttendance {
    pub status: String,
    pub attended_at: String,
}

/// Today's schedule as returned by the attendance service.
///
/// `start_date`/`end_date` carry the wire format (`2023-04-29T14:00:00`)
/// until the reducer rewrites them for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleModel {
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub id: i64,
    pub location: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub message: String,
    #[serde(default)]
    pub attendances: Vec<TodayAttendance>,
}

impl ScheduleModel {
    /// Schedule for a day without any session.
    pub fn no_session(message: impl Into<String>) -> Self {
        Self {
            session_type: SessionType::NoSession,
            id: 0,
            location: String::new(),
            name: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            message: message.into(),
            attendances: Vec::new(),
        }
    }
}

/// Aggregate attendance counts for the member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalScore {
    pub attendance: u32,
    pub absent: u32,
    pub tardy: u32,
    pub participate: u32,
}

/// A single past attendance record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub attribute: String,
    pub name: String,
    pub status: String,
    pub date: String,
}

/// Attendance score summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreModel {
    pub part: String,
    pub generation: u32,
    pub name: String,
    pub score: f32,
    pub total: TotalScore,
    #[serde(default)]
    pub attendances: Vec<AttendanceRecord>,
}

/// Progress of one of today's attendance checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    /// Check not opened yet.
    Pending,
    /// Check taken.
    Done,
    /// Check missed.
    Absent,
    /// Check taken late.
    Tardy,
}

/// One step in today's attendance progress bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStep {
    pub step: u8,
    pub title: String,
    pub status: StepStatus,
}

/// Which attendance check the member has most recently completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TakenAttendanceType {
    First,
    Second,
}

/// An open attendance round for a lecture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRound {
    pub sub_lecture_id: i64,
    pub round: u32,
}

/// Round lookup result as reported by the service.
///
/// A missing payload is represented one level up as `None` and never reaches
/// the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundReport {
    /// The server answered but no round is currently open.
    Empty,
    /// A round is open.
    Active(LectureRound),
}
