//! Pure report reducer for the attendance screen.
//!
//! Each upstream signal is handled on its own; nothing here orders one signal
//! against another. The loading flag is cleared exactly when a terminal
//! branch is reached: an unscheduled day, a round answer, or a round error.
//! Failed schedule fetches are terminal too, so the spinner never outlives a
//! dead request.

use log::{debug, warn};

use crate::date::convert_date_string;
use crate::labels::take_nth_attendance;
use crate::types::{
    AttendanceButtonInfo, AttendanceRep, Emission, FetchFailure, FetchSource, FollowUps, Intent,
    IntentPriority, PokeRep, Report, RoundReport, RoundState, SceneType, ScheduleModel,
    ScheduleState, TransportError,
};
use crate::world::AttendanceWorld;

/// Trait for handling reports and producing follow-up actions.
pub trait ReportReducer {
    /// Processes a report and returns emissions and deferred intents.
    fn reduce_report(&mut self, report: Report) -> FollowUps;
}

impl ReportReducer for AttendanceWorld {
    fn reduce_report(&mut self, report: Report) -> FollowUps {
        let mut follow_ups = FollowUps::new();
        self.reports_seen = self.reports_seen.saturating_add(1);

        match report {
            Report::Attendance(rep) => self.reduce_attendance(rep, &mut follow_ups),
            Report::Poke(rep) => reduce_poke(rep, &mut follow_ups),
        }

        follow_ups
    }
}

impl AttendanceWorld {
    fn reduce_attendance(&mut self, report: AttendanceRep, follow_ups: &mut FollowUps) {
        match report {
            AttendanceRep::ScheduleFetched(Ok(model)) => self.apply_schedule(model, follow_ups),
            AttendanceRep::ScheduleFetched(Err(error)) => {
                warn!("schedule fetch failed: {error}");
                follow_ups.push_emission(Emission::FetchFailed(FetchFailure {
                    source: FetchSource::Schedule,
                    error,
                }));
                self.finish_loading(follow_ups);
            }
            AttendanceRep::ScoreFetched(Ok(model)) => {
                debug!("score fetched for {} ({})", model.name, model.part);
                follow_ups.push_emission(Emission::Score(model));
            }
            AttendanceRep::ScoreFetched(Err(error)) => {
                warn!("score fetch failed: {error}");
                follow_ups.push_emission(Emission::FetchFailed(FetchFailure {
                    source: FetchSource::Score,
                    error,
                }));
            }
            AttendanceRep::TodayAttendances(steps) => {
                debug!("today attendances: {} step(s)", steps.len());
                follow_ups.push_emission(Emission::TodayAttendances(steps));
            }
            AttendanceRep::TakenAttendanceType(taken) => {
                debug!("taken attendance type: {taken:?}");
                follow_ups.push_emission(Emission::TakenAttendanceType(taken));
            }
            AttendanceRep::LectureRound(Ok(None)) => {
                debug!("lecture round answered without payload; ignoring");
            }
            AttendanceRep::LectureRound(Ok(Some(round))) => self.apply_round(round, follow_ups),
            AttendanceRep::LectureRound(Err(error)) => {
                warn!("lecture round lookup failed: {error}");
                let title = error
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.config.round_error_title.clone());
                follow_ups.push_emission(Emission::FetchFailed(FetchFailure {
                    source: FetchSource::LectureRound,
                    error,
                }));
                self.apply_round_error(title, follow_ups);
            }
            AttendanceRep::LectureRoundError(title) => {
                debug!("lecture round refused: {title}");
                self.apply_round_error(title, follow_ups);
            }
        }
    }

    fn apply_schedule(&mut self, model: ScheduleModel, follow_ups: &mut FollowUps) {
        debug!("schedule fetched: {:?} #{}", model.session_type, model.id);

        if model.session_type.is_no_session() {
            self.scene_type = Some(SceneType::UnscheduledDay);
            self.schedule = ScheduleState::Unscheduled(model);
            follow_ups.push_emission(Emission::Schedule(self.schedule.clone()));
            self.finish_loading(follow_ups);
            return;
        }

        let style = self.config.weekday_style;
        let lecture_id = model.id;
        let model = ScheduleModel {
            start_date: convert_date_string(&model.start_date, style),
            end_date: convert_date_string(&model.end_date, style),
            ..model
        };

        self.scene_type = Some(SceneType::ScheduledDay);
        self.schedule = ScheduleState::Scheduled(model);
        follow_ups.push_emission(Emission::Schedule(self.schedule.clone()));
        // Loading stays on until the round lookup answers.
        follow_ups.push_deferred_intent(IntentPriority::P1, Intent::FetchLectureRound { lecture_id });
    }

    fn apply_round(&mut self, round: RoundReport, follow_ups: &mut FollowUps) {
        let button = match round {
            RoundReport::Empty => {
                self.round = RoundState::Closed;
                AttendanceButtonInfo::disabled(take_nth_attendance(self.config.closed_round))
            }
            RoundReport::Active(round) => {
                self.round = RoundState::Active(round);
                AttendanceButtonInfo::enabled(take_nth_attendance(round.round))
            }
        };
        debug!("lecture round: {:?}", self.round);

        follow_ups.push_emission(Emission::ButtonInfo(button));
        self.finish_loading(follow_ups);
    }

    fn apply_round_error(&mut self, title: String, follow_ups: &mut FollowUps) {
        follow_ups.push_emission(Emission::ButtonInfo(AttendanceButtonInfo::disabled(title)));
        self.finish_loading(follow_ups);
    }

    fn finish_loading(&mut self, follow_ups: &mut FollowUps) {
        self.loading = false;
        follow_ups.push_emission(Emission::Loading(false));
    }
}

fn reduce_poke(report: PokeRep, follow_ups: &mut FollowUps) {
    match report {
        PokeRep::Friends(Ok(friends)) => {
            debug!(
                "friends fetched: {} friend(s), {} best friend(s), {} soulmate(s)",
                friends.friends.len(),
                friends.best_friends.len(),
                friends.soulmates.len()
            );
            follow_ups.push_emission(Emission::Friends(friends));
        }
        PokeRep::FriendsList(Ok(page)) => {
            debug!(
                "friends page for {}: {}/{}",
                page.relation_name,
                page.friends.len(),
                page.total_size
            );
            follow_ups.push_emission(Emission::FriendsList(page));
        }
        PokeRep::Poked(Ok(user)) => {
            debug!("poked user #{}", user.user_id);
            follow_ups.push_emission(Emission::Poked(user));
        }
        PokeRep::Friends(Err(error)) => poke_failed(FetchSource::Friends, error, follow_ups),
        PokeRep::FriendsList(Err(error)) => {
            poke_failed(FetchSource::FriendsList, error, follow_ups)
        }
        PokeRep::Poked(Err(error)) => poke_failed(FetchSource::Poke, error, follow_ups),
    }
}

fn poke_failed(source: FetchSource, error: TransportError, follow_ups: &mut FollowUps) {
    warn!("{source:?} request failed: {error}");
    follow_ups.push_emission(Emission::FetchFailed(FetchFailure { source, error }));
}
