//! Attendance screen state owned by the reducers.

use serde::Deserialize;

use crate::date::WeekdayStyle;
use crate::types::{LectureRound, RoundState, SceneType, ScheduleState};

/// Round number shown on the disabled button when no round is open.
pub const DEFAULT_CLOSED_ROUND: u32 = 2;
/// Button title used when a round lookup fails without a server message.
pub const DEFAULT_ROUND_ERROR_TITLE: &str = "출석 정보를 불러오지 못했습니다";

/// Knobs that change how reports are rendered for the view.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReducerConfig {
    /// Language of weekday names in schedule dates.
    pub weekday_style: WeekdayStyle,
    /// Round shown on the disabled button when no round is open.
    pub closed_round: u32,
    /// Fallback button title for failed round lookups.
    pub round_error_title: String,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            weekday_style: WeekdayStyle::default(),
            closed_round: DEFAULT_CLOSED_ROUND,
            round_error_title: DEFAULT_ROUND_ERROR_TITLE.to_string(),
        }
    }
}

/// State of one attendance screen session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttendanceWorld {
    /// Rendering configuration.
    pub config: ReducerConfig,
    /// Day classification derived from the last schedule.
    pub scene_type: Option<SceneType>,
    /// Last schedule emitted to the view.
    pub schedule: ScheduleState,
    /// What is known about today's attendance round.
    pub round: RoundState,
    /// Last loading flag emitted to the view.
    pub loading: bool,
    /// Number of reports reduced since the session started.
    pub reports_seen: u64,
}

impl AttendanceWorld {
    /// Creates a world using the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world with a custom configuration.
    pub fn with_config(config: ReducerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The open round, if any.
    pub fn current_round(&self) -> Option<LectureRound> {
        match self.round {
            RoundState::Active(round) => Some(round),
            RoundState::Unknown | RoundState::Closed => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
