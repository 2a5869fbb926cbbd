//! In-process attendance service answering fetches from a script.
//!
//! Commands are answered synchronously into a bounded report queue that the
//! scheduler drains. An [`UpstreamHandle`] lets other parts of the app (the
//! take-attendance flow, tests, the CLI) push the signals that do not
//! originate from a fetch, such as today's attendance progress.

use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use service_abi::{
    AttendanceCmd, AttendanceRep, AttendanceServiceHandle, AttendanceStep, RoundReport,
    ScheduleModel, ScoreModel, Service, SubmitOutcome, SubmitPolicy, TakenAttendanceType,
    TransportError,
};
use services_common::{ReportQueue, Scripted, ScriptedSequence};
use smallvec::{smallvec, SmallVec};
use std::mem;
use std::sync::Arc;

const DEFAULT_CAPACITY: usize = 32;

/// Scripted answer to a round lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResponse {
    /// The server returned a round payload.
    Round(RoundReport),
    /// The server answered without a payload.
    Missing,
    /// The server refused the lookup with a user-facing title.
    Refused(String),
    /// The request failed in transit.
    Error(TransportError),
}

impl RoundResponse {
    fn into_report(self) -> AttendanceRep {
        match self {
            RoundResponse::Round(round) => AttendanceRep::LectureRound(Ok(Some(round))),
            RoundResponse::Missing => AttendanceRep::LectureRound(Ok(None)),
            RoundResponse::Refused(title) => AttendanceRep::LectureRoundError(title),
            RoundResponse::Error(err) => AttendanceRep::LectureRound(Err(err)),
        }
    }
}

/// Answers the attendance service replays, per request kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceScript {
    #[serde(default)]
    pub schedule: ScriptedSequence<Scripted<ScheduleModel>>,
    #[serde(default)]
    pub score: ScriptedSequence<Scripted<ScoreModel>>,
    #[serde(default)]
    pub rounds: ScriptedSequence<RoundResponse>,
}

impl AttendanceScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(mut self, schedule: ScheduleModel) -> Self {
        self.schedule.push(Scripted::Ok(schedule));
        self
    }

    pub fn schedule_error(mut self, err: TransportError) -> Self {
        self.schedule.push(Scripted::Error(err));
        self
    }

    pub fn score(mut self, score: ScoreModel) -> Self {
        self.score.push(Scripted::Ok(score));
        self
    }

    pub fn score_error(mut self, err: TransportError) -> Self {
        self.score.push(Scripted::Error(err));
        self
    }

    pub fn round(mut self, response: RoundResponse) -> Self {
        self.rounds.push(response);
        self
    }
}

/// Scripted attendance service for tests, demos, and the CLI.
pub struct AttendanceService {
    reports: Arc<ReportQueue<AttendanceRep>>,
    script: Mutex<AttendanceScript>,
    submitted: Mutex<Vec<AttendanceCmd>>,
}

impl AttendanceService {
    /// Creates a service with the given report capacity and script.
    pub fn new(capacity: usize, script: AttendanceScript) -> Arc<Self> {
        Arc::new(Self {
            reports: Arc::new(ReportQueue::with_capacity(capacity)),
            script: Mutex::new(script),
            submitted: Mutex::new(Vec::new()),
        })
    }

    /// Creates a type-erased handle for the services hub.
    pub fn new_handle(capacity: usize, script: AttendanceScript) -> AttendanceServiceHandle {
        Self::new(capacity, script)
    }

    /// Returns a handle that pushes upstream signals into this service.
    pub fn upstream(&self) -> UpstreamHandle {
        UpstreamHandle {
            reports: Arc::clone(&self.reports),
        }
    }

    /// Commands accepted so far, in submission order.
    pub fn submitted(&self) -> Vec<AttendanceCmd> {
        self.submitted.lock().clone()
    }

    /// Simulates the backend going away; later submissions are refused.
    pub fn close(&self) {
        self.reports.close();
    }

    fn answer(&self, cmd: &AttendanceCmd) -> AttendanceRep {
        let mut script = self.script.lock();
        match cmd {
            AttendanceCmd::FetchSchedule => AttendanceRep::ScheduleFetched(
                script
                    .schedule
                    .next_answer()
                    .map_or(Err(TransportError::Disconnected), Scripted::into_result),
            ),
            AttendanceCmd::FetchScore => AttendanceRep::ScoreFetched(
                script
                    .score
                    .next_answer()
                    .map_or(Err(TransportError::Disconnected), Scripted::into_result),
            ),
            AttendanceCmd::FetchRound { .. } => script
                .rounds
                .next_answer()
                .unwrap_or(RoundResponse::Error(TransportError::Disconnected))
                .into_report(),
        }
    }
}

impl Default for AttendanceService {
    fn default() -> Self {
        Self {
            reports: Arc::new(ReportQueue::with_capacity(DEFAULT_CAPACITY)),
            script: Mutex::new(AttendanceScript::default()),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

impl Service for AttendanceService {
    type Cmd = AttendanceCmd;
    type Rep = AttendanceRep;

    fn try_submit(&self, cmd: &Self::Cmd) -> SubmitOutcome {
        let outcome = self.reports.try_submit(
            cmd.submit_policy(),
            1,
            |queued| cmd.answered_by(queued),
            || smallvec![self.answer(cmd)],
        );
        debug!("attendance service {cmd:?} -> {outcome:?}");
        if matches!(outcome, SubmitOutcome::Accepted | SubmitOutcome::Coalesced) {
            self.submitted.lock().push(cmd.clone());
        }
        outcome
    }

    fn drain(&self, max: usize) -> SmallVec<[Self::Rep; 8]> {
        self.reports.drain(max)
    }
}

/// Pushes upstream attendance signals that do not originate from a fetch.
#[derive(Clone)]
pub struct UpstreamHandle {
    reports: Arc<ReportQueue<AttendanceRep>>,
}

impl UpstreamHandle {
    /// Pushes an arbitrary report. When full, the oldest queued report of the
    /// same kind is replaced; other kinds are never evicted.
    pub fn push(&self, report: AttendanceRep) -> SubmitOutcome {
        let kind = mem::discriminant(&report);
        self.reports.try_submit(
            SubmitPolicy::Coalesce,
            1,
            |queued| mem::discriminant(queued) == kind,
            || smallvec![report],
        )
    }

    pub fn today_attendances(&self, steps: Vec<AttendanceStep>) -> SubmitOutcome {
        self.push(AttendanceRep::TodayAttendances(steps))
    }

    pub fn taken_attendance_type(&self, taken: TakenAttendanceType) -> SubmitOutcome {
        self.push(AttendanceRep::TakenAttendanceType(taken))
    }

    pub fn lecture_round(&self, round: Option<RoundReport>) -> SubmitOutcome {
        self.push(AttendanceRep::LectureRound(Ok(round)))
    }

    pub fn lecture_round_error(&self, title: impl Into<String>) -> SubmitOutcome {
        self.push(AttendanceRep::LectureRoundError(title.into()))
    }

    pub fn schedule(&self, schedule: ScheduleModel) -> SubmitOutcome {
        self.push(AttendanceRep::ScheduleFetched(Ok(schedule)))
    }
}

/// Creates an attendance service handle with default capacity and no script.
pub fn default_service() -> AttendanceServiceHandle {
    Arc::new(AttendanceService::default())
}
