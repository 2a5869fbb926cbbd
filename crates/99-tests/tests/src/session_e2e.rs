use std::time::Duration;

use app::{Session, SessionConfig};
use hub::Intent;
use mock::MockServices;
use pretty_assertions::assert_eq;
use service_abi::{LectureRound, RoundReport, ScheduleModel, TransportError};
use services_attendance::{AttendanceScript, RoundResponse};
use services_poke::PokeScript;
use world::{
    AttendanceButtonInfo, FetchSource, ReducerConfig, RoundState, SceneType, ScheduleState,
    WeekdayStyle,
};

use crate::fixtures::{init_logging, seminar, session, PUMP_ROUNDS};

/// Appear on a day without a session: unscheduled, not loading, no button.
#[test]
fn appear_on_unscheduled_day() {
    let day_off = ScheduleModel::no_session("오늘은 일정이 없어요");
    let (mut session, _services) = session(
        AttendanceScript::new().schedule(day_off.clone()),
        PokeScript::default(),
    );
    let output = session.output();
    let loading = output.loading.subscribe();
    let button = output.button_info.subscribe();

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);

    assert_eq!(output.schedule.get(), Some(ScheduleState::Unscheduled(day_off)));
    assert_eq!(loading.drain(), vec![true, false]);
    assert!(button.drain().is_empty());
    assert!(!session.world().is_loading());
    assert_eq!(session.world().scene_type, Some(SceneType::UnscheduledDay));
}

/// Appear on a seminar day: display dates, an open round, loading cleared.
#[test]
fn appear_on_scheduled_day_with_open_round() {
    let round = LectureRound {
        sub_lecture_id: 0,
        round: 2,
    };
    let (mut session, services) = session(
        AttendanceScript::new()
            .schedule(seminar("2023-04-29T14:00:00", "2023-04-29T18:00:00"))
            .round(RoundResponse::Round(RoundReport::Active(round))),
        PokeScript::default(),
    );
    let output = session.output();
    let loading = output.loading.subscribe();
    let button = output.button_info.subscribe();

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);

    let Some(ScheduleState::Scheduled(model)) = output.schedule.get() else {
        panic!("expected a scheduled day, got {:?}", output.schedule.get());
    };
    assert_eq!(model.start_date, "4월 29일 Saturday 14:00");
    assert_eq!(model.end_date, "4월 29일 Saturday 18:00");
    assert_eq!(
        button.drain(),
        vec![AttendanceButtonInfo::enabled("2차 출석체크")]
    );
    assert_eq!(loading.drain(), vec![true, false]);
    assert_eq!(session.world().round, RoundState::Active(round));
    assert_eq!(services.attendance.submitted().len(), 3);
}

/// A late subscriber still sees the last schedule, but not past button events.
#[test]
fn late_view_gets_state_but_not_events() {
    let (mut session, _services) = session(
        AttendanceScript::new()
            .schedule(seminar("2023-04-29T14:00:00", "2023-04-29T18:00:00"))
            .round(RoundResponse::Round(RoundReport::Empty)),
        PokeScript::default(),
    );

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);

    let output = session.output();
    let schedule = output.schedule.subscribe();
    let button = output.button_info.subscribe();
    assert!(matches!(
        schedule.try_next(),
        Some(ScheduleState::Scheduled(_))
    ));
    assert!(button.try_next().is_none());
    assert_eq!(session.world().round, RoundState::Closed);
}

/// Re-entering while a fetch is pending lets the later answer win.
#[test]
fn refresh_during_flight_overwrites_with_latest_answer() {
    let first = ScheduleModel::no_session("첫 번째 응답");
    let second = ScheduleModel::no_session("두 번째 응답");
    let (mut session, services) = session(
        AttendanceScript::new()
            .schedule(first.clone())
            .schedule(second.clone()),
        PokeScript::default(),
    );
    let output = session.output();
    let schedule = output.schedule.subscribe();

    session.send(Intent::ViewWillAppear);
    session.send(Intent::Refresh);
    session.pump(PUMP_ROUNDS);

    assert_eq!(
        schedule.drain(),
        vec![
            ScheduleState::Unscheduled(first),
            ScheduleState::Unscheduled(second.clone()),
        ]
    );
    assert_eq!(output.schedule.get(), Some(ScheduleState::Unscheduled(second)));
    assert_eq!(services.attendance.submitted().len(), 4);
}

/// A failed schedule fetch never leaves the spinner running.
#[test]
fn schedule_failure_clears_loading() {
    let (mut session, _services) = session(
        AttendanceScript::new().schedule_error(TransportError::status(503, "점검 중")),
        PokeScript::default(),
    );
    let output = session.output();
    let loading = output.loading.subscribe();
    let failures = output.fetch_failures.subscribe();

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);

    assert_eq!(loading.drain(), vec![true, false]);
    let sources: Vec<FetchSource> = failures.drain().into_iter().map(|f| f.source).collect();
    assert_eq!(sources, vec![FetchSource::Schedule, FetchSource::Score]);
    assert_eq!(output.schedule.get(), None);
}

/// A refused round shows the server's title on a disabled button.
#[test]
fn refused_round_disables_button_with_server_title() {
    let (mut session, _services) = session(
        AttendanceScript::new()
            .schedule(seminar("2023-04-29T14:00:00", "2023-04-29T18:00:00"))
            .round(RoundResponse::Refused("출석 시간이 아닙니다".to_string())),
        PokeScript::default(),
    );
    let output = session.output();
    let button = output.button_info.subscribe();

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);

    assert_eq!(
        button.drain(),
        vec![AttendanceButtonInfo::disabled("출석 시간이 아닙니다")]
    );
    assert!(!session.world().is_loading());
}

/// Configuration reaches the reducer through the session.
#[test]
fn session_config_controls_rendering() {
    init_logging();
    let services = MockServices::new(
        AttendanceScript::new()
            .schedule(seminar("2023-04-29T14:00:00", "2023-04-29T18:00:00"))
            .round(RoundResponse::Round(RoundReport::Empty)),
        PokeScript::default(),
    );
    let config = SessionConfig {
        reducer: ReducerConfig {
            weekday_style: WeekdayStyle::Korean,
            closed_round: 1,
            ..ReducerConfig::default()
        },
        ..SessionConfig::default()
    };
    let mut session = Session::new(services.hub().expect("mock hub"), &config);
    let output = session.output();
    let button = output.button_info.subscribe();

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);

    assert_eq!(
        output.schedule.get().and_then(|s| s.model().map(|m| m.start_date.clone())),
        Some("4월 29일 토요일 14:00".to_string())
    );
    assert_eq!(
        button.recv_timeout(Duration::from_millis(10)),
        Ok(AttendanceButtonInfo::disabled("1차 출석체크"))
    );
}
