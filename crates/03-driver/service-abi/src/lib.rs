//! Service ABI types shared between services and the scheduler.
//!
//! This crate defines the protocol boundary between the scheduler (layer 05)
//! and service implementations (layer 04), with no app-specific dependencies.

#![allow(missing_docs)]

use smallvec::SmallVec;
use std::sync::Arc;

mod error;
pub mod models;
pub mod poke;

pub use error::TransportError;
pub use models::{
    AttendanceRecord, AttendanceStep, LectureRound, RoundReport, ScheduleModel, ScoreModel,
    SessionType, StepStatus, TakenAttendanceType, TodayAttendance, TotalScore,
};
pub use poke::{PokeCmd, PokeFriends, PokeFriendsPage, PokeMessage, PokeRep, PokeUser};

/// Policy describing how the scheduler should handle backpressure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Command must be submitted immediately; failure is surfaced.
    Must,
    /// Replace or merge with pending work of the same kind.
    Coalesce,
    /// Drop when queues are congested.
    BestEffort,
    /// Never drop; scheduler will retry on subsequent passes.
    Lossless,
}

/// Outcome returned when attempting to submit a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Command entered the queue untouched.
    Accepted,
    /// Command replaced or merged with a pending entry.
    Coalesced,
    /// Command was intentionally dropped per policy.
    Dropped,
    /// Service could not accept without blocking.
    WouldBlock,
    /// Service is closed or unhealthy.
    Closed,
}

/// Non-blocking service trait implemented by backend adapters.
pub trait Service {
    /// Command type accepted by the service.
    type Cmd: Send + 'static;
    /// Report type produced by the service.
    type Rep: Send + 'static;

    /// Attempts to submit a command without blocking. Defaults to `Accepted`.
    fn try_submit(&self, _cmd: &Self::Cmd) -> SubmitOutcome {
        SubmitOutcome::Accepted
    }

    /// Drains up to `max` reports without blocking. Defaults to empty.
    fn drain(&self, _max: usize) -> SmallVec<[Self::Rep; 8]> {
        SmallVec::new()
    }
}

/// Command directed at the attendance service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttendanceCmd {
    /// Fetch today's schedule.
    FetchSchedule,
    /// Fetch the member's attendance score.
    FetchScore,
    /// Look up the open attendance round for a lecture.
    FetchRound { lecture_id: i64 },
}

impl AttendanceCmd {
    /// Returns the scheduler policy for this command.
    ///
    /// A schedule or score answer may replace a queued answer of the same
    /// kind, never a report of another kind. Round lookups drive the loading
    /// indicator to its terminal state and must never be lost.
    pub fn submit_policy(&self) -> SubmitPolicy {
        match self {
            AttendanceCmd::FetchSchedule | AttendanceCmd::FetchScore => SubmitPolicy::Coalesce,
            AttendanceCmd::FetchRound { .. } => SubmitPolicy::Lossless,
        }
    }

    /// Whether `rep` is the kind of report this command produces.
    pub fn answered_by(&self, rep: &AttendanceRep) -> bool {
        matches!(
            (self, rep),
            (AttendanceCmd::FetchSchedule, AttendanceRep::ScheduleFetched(_))
                | (AttendanceCmd::FetchScore, AttendanceRep::ScoreFetched(_))
                | (
                    AttendanceCmd::FetchRound { .. },
                    AttendanceRep::LectureRound(_) | AttendanceRep::LectureRoundError(_)
                )
        )
    }
}

/// Attendance service report variants, one per upstream signal.
#[derive(Clone, Debug, PartialEq)]
pub enum AttendanceRep {
    /// Result of a schedule fetch.
    ScheduleFetched(Result<ScheduleModel, TransportError>),
    /// Result of a score fetch.
    ScoreFetched(Result<ScoreModel, TransportError>),
    /// Today's attendance progress changed.
    TodayAttendances(Vec<AttendanceStep>),
    /// The most recently taken attendance check changed.
    TakenAttendanceType(TakenAttendanceType),
    /// Result of a round lookup. `Ok(None)` means the payload was missing.
    LectureRound(Result<Option<RoundReport>, TransportError>),
    /// The server refused the round lookup with a user-facing title.
    LectureRoundError(String),
}

/// Handle to the attendance service implementation.
pub type AttendanceServiceHandle =
    Arc<dyn Service<Cmd = AttendanceCmd, Rep = AttendanceRep> + Send + Sync>;
/// Handle to the poke service implementation.
pub type PokeServiceHandle = Arc<dyn Service<Cmd = PokeCmd, Rep = PokeRep> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_decodes_from_server_json() {
        let json = r#"{
            "type": "HAS_ATTENDANCE",
            "id": 7,
            "location": "IT 창업관",
            "name": "3차 세미나",
            "startDate": "2023-04-29T14:00:00",
            "endDate": "2023-04-29T18:00:00",
            "message": "",
            "attendances": [{ "status": "ATTENDANCE", "attendedAt": "14:00" }]
        }"#;

        let model: ScheduleModel = serde_json::from_str(json).expect("decode schedule");
        assert_eq!(model.session_type, SessionType::HasAttendance);
        assert_eq!(model.start_date, "2023-04-29T14:00:00");
        assert_eq!(model.attendances[0].attended_at, "14:00");
    }

    #[test]
    fn commands_only_claim_their_own_reports() {
        let round_error = AttendanceRep::LectureRoundError("출석 시간이 아닙니다".into());
        assert!(!AttendanceCmd::FetchSchedule.answered_by(&round_error));
        assert!(AttendanceCmd::FetchRound { lecture_id: 1 }.answered_by(&round_error));
        assert!(AttendanceCmd::FetchScore
            .answered_by(&AttendanceRep::ScoreFetched(Err(TransportError::Timeout))));
    }

    #[test]
    fn unknown_session_type_is_not_no_session() {
        let ty: SessionType = serde_json::from_str(r#""SPECIAL_EVENT""#).expect("decode type");
        assert_eq!(ty, SessionType::Unknown);
        assert!(!ty.is_no_session());
    }

    #[test]
    fn round_lookups_are_lossless() {
        assert_eq!(
            AttendanceCmd::FetchRound { lecture_id: 1 }.submit_policy(),
            SubmitPolicy::Lossless
        );
        assert_eq!(
            AttendanceCmd::FetchSchedule.submit_policy(),
            SubmitPolicy::Coalesce
        );
    }

    #[test]
    fn transport_error_exposes_server_message() {
        let err = TransportError::status(403, "출석 기간이 아닙니다");
        assert_eq!(err.server_message(), Some("출석 기간이 아닙니다"));
        assert_eq!(TransportError::Timeout.server_message(), None);
    }
}
