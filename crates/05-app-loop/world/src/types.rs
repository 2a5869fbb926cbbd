//! Intent, work, report, and emission types shared across the attendance screen.
//!
//! Frontends push [`Intent`]s, the reducer turns them into [`WorkCmd`]s for
//! the services hub, and service [`Report`]s come back as [`Emission`]s for
//! the output cells.

use smallvec::SmallVec;

// Re-export service ABI types that world uses
pub use service_abi::{
    AttendanceCmd, AttendanceRep, AttendanceStep, LectureRound, PokeCmd, PokeFriends,
    PokeFriendsPage, PokeMessage, PokeRep, PokeUser, RoundReport, ScheduleModel, ScoreModel,
    SessionType, SubmitOutcome, SubmitPolicy, TakenAttendanceType, TransportError,
};

/// Priority level for intent scheduling (P0 is highest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentPriority {
    /// View lifecycle triggers and user actions.
    P0,
    /// Follow-ups deferred by the report reducer.
    P1,
    /// Background paging.
    P2,
}

impl IntentPriority {
    pub fn index(self) -> usize {
        match self {
            IntentPriority::P0 => 0,
            IntentPriority::P1 => 1,
            IntentPriority::P2 => 2,
        }
    }
}

/// Intent emitted by the view, or deferred by the reducer itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// The attendance screen is about to become visible.
    ViewWillAppear,
    /// The user pulled to refresh.
    Refresh,
    /// Look up the open attendance round for today's lecture.
    FetchLectureRound { lecture_id: i64 },
    /// Load the grouped friends overview.
    GetFriends,
    /// Load one page of friends for a relation.
    GetFriendsByRelation { relation: String, page: u32 },
    /// Poke a friend with a canned message.
    Poke { user_id: i64, message: PokeMessage },
}

impl Intent {
    /// Returns the scheduler priority for this intent.
    pub fn priority(&self) -> IntentPriority {
        match self {
            Intent::ViewWillAppear => IntentPriority::P0,
            Intent::Refresh => IntentPriority::P0,
            Intent::Poke { .. } => IntentPriority::P0,
            Intent::FetchLectureRound { .. } => IntentPriority::P1,
            Intent::GetFriends => IntentPriority::P1,
            Intent::GetFriendsByRelation { .. } => IntentPriority::P2,
        }
    }
}

/// Work command routed through the services hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkCmd {
    /// Command that targets the attendance service.
    Attendance(AttendanceCmd),
    /// Command that targets the poke service.
    Poke(PokeCmd),
}

impl WorkCmd {
    /// Default submission policy for this command.
    pub fn default_policy(&self) -> SubmitPolicy {
        match self {
            WorkCmd::Attendance(cmd) => cmd.submit_policy(),
            WorkCmd::Poke(cmd) => cmd.submit_policy(),
        }
    }
}

/// Report emitted by backend services.
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// Attendance-originated report.
    Attendance(AttendanceRep),
    /// Poke-originated report.
    Poke(PokeRep),
}

/// Which day the attendance screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneType {
    ScheduledDay,
    UnscheduledDay,
}

/// View-ready schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScheduleState {
    /// Nothing has been fetched for this screen yet.
    #[default]
    NoSession,
    /// A session is scheduled; dates are already in display format.
    Scheduled(ScheduleModel),
    /// No session today; the model is passed through unchanged.
    Unscheduled(ScheduleModel),
}

impl ScheduleState {
    pub fn model(&self) -> Option<&ScheduleModel> {
        match self {
            ScheduleState::NoSession => None,
            ScheduleState::Scheduled(model) | ScheduleState::Unscheduled(model) => Some(model),
        }
    }
}

/// What the reducer knows about today's attendance round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundState {
    /// No round lookup has answered yet.
    #[default]
    Unknown,
    /// The server reported that no round is open.
    Closed,
    /// A round is open and can be checked in to.
    Active(LectureRound),
}

/// Title and enablement of the take-attendance button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendanceButtonInfo {
    pub title: String,
    pub is_enabled: bool,
}

impl AttendanceButtonInfo {
    pub fn enabled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_enabled: true,
        }
    }

    pub fn disabled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_enabled: false,
        }
    }
}

/// Request whose failure was surfaced to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchSource {
    Schedule,
    Score,
    LectureRound,
    Friends,
    FriendsList,
    Poke,
}

/// A transport failure surfaced to the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub source: FetchSource,
    pub error: TransportError,
}

/// A single update for the view-facing output cells.
#[derive(Clone, Debug, PartialEq)]
pub enum Emission {
    Schedule(ScheduleState),
    Score(ScoreModel),
    TodayAttendances(Vec<AttendanceStep>),
    TakenAttendanceType(TakenAttendanceType),
    ButtonInfo(AttendanceButtonInfo),
    Loading(bool),
    FetchFailed(FetchFailure),
    Friends(PokeFriends),
    FriendsList(PokeFriendsPage),
    Poked(PokeUser),
}

/// Work and emissions produced while reducing an intent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntentEffects {
    /// Commands to submit to the services hub.
    pub work: SmallVec<[WorkCmd; 4]>,
    /// Emissions to apply before the work is submitted.
    pub emissions: SmallVec<[Emission; 4]>,
}

impl IntentEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_work(&mut self, cmd: WorkCmd) {
        self.work.push(cmd);
    }

    pub fn push_emission(&mut self, emission: Emission) {
        self.emissions.push(emission);
    }
}

/// Follow-up actions produced while reducing reports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FollowUps {
    /// Emissions for the output cells, in order.
    pub emissions: SmallVec<[Emission; 8]>,
    /// Intents to enqueue for the next scheduler pass.
    pub deferred_intents: SmallVec<[(IntentPriority, Intent); 8]>,
}

impl FollowUps {
    /// Creates an empty set of follow-ups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an emission for the output cells.
    pub fn push_emission(&mut self, emission: Emission) {
        self.emissions.push(emission);
    }

    /// Adds a deferred intent for the next scheduler pass.
    pub fn push_deferred_intent(&mut self, priority: IntentPriority, intent: Intent) {
        self.deferred_intents.push((priority, intent));
    }
}
