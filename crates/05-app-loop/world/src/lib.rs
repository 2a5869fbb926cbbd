//! Attendance screen state and the reducers that drive it.
//!
//! The `world` crate intentionally stays small and synchronous. It defines the
//! shared enums and structs that the scheduler, services hub, and view compile
//! against, along with the `AttendanceWorld` container the reducers mutate.

/// Wire-to-display date helpers.
pub mod date;
/// User-facing labels.
pub mod labels;
/// Pure intent reducer.
pub mod reduce_intent;
/// Pure report reducer.
pub mod reduce_report;
/// Core message and emission types.
pub mod types;
/// Screen state container.
pub mod world;

pub use crate::date::{convert_date_string, format_time_interval, DateFormatError, WeekdayStyle};
pub use crate::labels::take_nth_attendance;
pub use crate::reduce_intent::IntentReducer;
pub use crate::reduce_report::ReportReducer;
pub use crate::types::{
    AttendanceButtonInfo, AttendanceCmd, AttendanceRep, AttendanceStep, Emission, FetchFailure,
    FetchSource, FollowUps, Intent, IntentEffects, IntentPriority, LectureRound, PokeCmd,
    PokeFriends, PokeFriendsPage, PokeMessage, PokeRep, PokeUser, Report, RoundReport,
    RoundState, SceneType, ScheduleModel, ScheduleState, ScoreModel, SessionType, SubmitOutcome,
    SubmitPolicy, TakenAttendanceType, TransportError, WorkCmd,
};
pub use crate::world::{AttendanceWorld, ReducerConfig};
