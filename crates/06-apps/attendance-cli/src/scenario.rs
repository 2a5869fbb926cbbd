//! Scenario files: scripted service answers plus the steps to replay.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use app::{Output, Session, SessionConfig, Subscription};
use hub::Intent;
use log::{debug, info};
use mock::MockServices;
use serde::Deserialize;
use service_abi::{
    AttendanceStep, PokeMessage, RoundReport, ScheduleModel, SubmitOutcome, TakenAttendanceType,
};
use services_attendance::AttendanceScript;
use services_poke::PokeScript;
use thiserror::Error;
use world::{
    AttendanceButtonInfo, FetchFailure, PokeFriends, PokeFriendsPage, PokeUser, ScheduleState,
    ScoreModel,
};

use crate::render;

/// Scheduler passes allowed per `pump` step.
const PUMP_ROUNDS: usize = 64;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} is not a valid scenario")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("scenario has no steps")]
    NoSteps,
}

/// Scripted answers for every service.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Responses {
    pub attendance: AttendanceScript,
    pub poke: PokeScript,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub responses: Responses,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Sends an intent as the view would.
    Intent(ScenarioIntent),
    /// Pushes a signal that does not come from a fetch.
    Push(UpstreamPush),
    /// Runs the scheduler until idle.
    Pump,
    /// Releases the session.
    Teardown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioIntent {
    ViewWillAppear,
    Refresh,
    FetchLectureRound { lecture_id: i64 },
    GetFriends,
    GetFriendsByRelation { relation: String, page: u32 },
    Poke { user_id: i64, message: PokeMessage },
}

impl From<ScenarioIntent> for Intent {
    fn from(intent: ScenarioIntent) -> Self {
        match intent {
            ScenarioIntent::ViewWillAppear => Intent::ViewWillAppear,
            ScenarioIntent::Refresh => Intent::Refresh,
            ScenarioIntent::FetchLectureRound { lecture_id } => {
                Intent::FetchLectureRound { lecture_id }
            }
            ScenarioIntent::GetFriends => Intent::GetFriends,
            ScenarioIntent::GetFriendsByRelation { relation, page } => {
                Intent::GetFriendsByRelation { relation, page }
            }
            ScenarioIntent::Poke { user_id, message } => Intent::Poke { user_id, message },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamPush {
    TodayAttendances(Vec<AttendanceStep>),
    TakenAttendanceType(TakenAttendanceType),
    LectureRound(Option<RoundReport>),
    LectureRoundError(String),
    Schedule(ScheduleModel),
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|err| match err {
            ParseFailure::Json(source) => ScenarioError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::NoSteps => ScenarioError::NoSteps,
        })
    }

    fn parse(raw: &str) -> Result<Self, ParseFailure> {
        let scenario: Scenario = serde_json::from_str(raw).map_err(ParseFailure::Json)?;
        if scenario.steps.is_empty() {
            return Err(ParseFailure::NoSteps);
        }
        Ok(scenario)
    }
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    NoSteps,
}

/// Subscriptions to every output, rendered as one line per emission.
struct Recorder {
    schedule: Subscription<ScheduleState>,
    score: Subscription<ScoreModel>,
    today_attendances: Subscription<Vec<AttendanceStep>>,
    taken_attendance_type: Subscription<TakenAttendanceType>,
    button_info: Subscription<AttendanceButtonInfo>,
    loading: Subscription<bool>,
    fetch_failures: Subscription<FetchFailure>,
    friends: Subscription<PokeFriends>,
    friends_list: Subscription<PokeFriendsPage>,
    poked: Subscription<PokeUser>,
}

impl Recorder {
    fn attach(output: &Output) -> Self {
        Self {
            schedule: output.schedule.subscribe(),
            score: output.score.subscribe(),
            today_attendances: output.today_attendances.subscribe(),
            taken_attendance_type: output.taken_attendance_type.subscribe(),
            button_info: output.button_info.subscribe(),
            loading: output.loading.subscribe(),
            fetch_failures: output.fetch_failures.subscribe(),
            friends: output.friends.subscribe(),
            friends_list: output.friends_list.subscribe(),
            poked: output.poked.subscribe(),
        }
    }

    fn drain_lines(&self, config: &SessionConfig) -> Vec<String> {
        let style = config.reducer.weekday_style;
        let mut lines = Vec::new();
        lines.extend(self.loading.drain().into_iter().map(render::loading));
        lines.extend(
            self.schedule
                .drain()
                .iter()
                .map(|state| render::schedule(state, style)),
        );
        lines.extend(self.score.drain().iter().map(render::score));
        lines.extend(
            self.today_attendances
                .drain()
                .iter()
                .map(|steps| render::today_attendances(steps)),
        );
        lines.extend(
            self.taken_attendance_type
                .drain()
                .into_iter()
                .map(render::taken_attendance_type),
        );
        lines.extend(self.button_info.drain().iter().map(render::button_info));
        lines.extend(self.fetch_failures.drain().iter().map(render::fetch_failure));
        lines.extend(self.friends.drain().iter().map(render::friends));
        lines.extend(self.friends_list.drain().iter().map(render::friends_list));
        lines.extend(self.poked.drain().iter().map(render::poked));
        lines
    }
}

/// Replays `scenario`, returning every emission as a rendered line.
pub fn run(scenario: Scenario, config: &SessionConfig) -> Result<Vec<String>> {
    let services = MockServices::new(scenario.responses.attendance, scenario.responses.poke);
    let mut session = Session::new(services.hub()?, config);
    let recorder = Recorder::attach(&session.output());
    let upstream = services.upstream();
    let mut lines = Vec::new();

    for (index, step) in scenario.steps.into_iter().enumerate() {
        debug!("step {index}: {step:?}");
        match step {
            Step::Intent(intent) => session.send(intent.into()),
            Step::Push(push) => {
                let outcome = match push {
                    UpstreamPush::TodayAttendances(steps) => upstream.today_attendances(steps),
                    UpstreamPush::TakenAttendanceType(taken) => {
                        upstream.taken_attendance_type(taken)
                    }
                    UpstreamPush::LectureRound(round) => upstream.lecture_round(round),
                    UpstreamPush::LectureRoundError(title) => upstream.lecture_round_error(title),
                    UpstreamPush::Schedule(schedule) => upstream.schedule(schedule),
                };
                if !matches!(outcome, SubmitOutcome::Accepted | SubmitOutcome::Coalesced) {
                    debug!("upstream push at step {index} -> {outcome:?}");
                }
            }
            Step::Pump => {
                session.pump(PUMP_ROUNDS);
            }
            Step::Teardown => session.teardown(),
        }
        lines.extend(recorder.drain_lines(config));
    }

    info!(
        "scenario finished after {} report(s)",
        session.world().reports_seen
    );
    Ok(lines)
}
