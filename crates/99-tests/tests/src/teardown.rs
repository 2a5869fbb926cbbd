use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hub::Intent;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use service_abi::{LectureRound, RoundReport, ScheduleModel, TakenAttendanceType};
use services_attendance::AttendanceScript;
use services_poke::PokeScript;

use crate::fixtures::{seminar, session, PUMP_ROUNDS};

/// After release, nothing reaches the view even while upstream keeps pushing.
#[test]
fn no_emissions_after_teardown() {
    let (mut session, services) = session(
        AttendanceScript::new().schedule(ScheduleModel::no_session("")),
        PokeScript::default(),
    );
    let output = session.output();
    let schedule = output.schedule.subscribe();
    let button = output.button_info.subscribe();
    let taken = output.taken_attendance_type.subscribe();

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);
    assert_eq!(schedule.drain().len(), 1);

    session.teardown();
    let upstream = services.upstream();
    let pusher = thread::spawn(move || {
        for round in 1..=20 {
            upstream.lecture_round(Some(RoundReport::Active(LectureRound {
                sub_lecture_id: 1,
                round,
            })));
            upstream.taken_attendance_type(TakenAttendanceType::Second);
            upstream.schedule(seminar("2023-04-29T14:00:00", "2023-04-29T18:00:00"));
        }
    });
    pusher.join().expect("pusher thread");

    session.send(Intent::Refresh);
    assert_eq!(session.pump(PUMP_ROUNDS), 0);

    assert!(schedule.is_closed());
    assert!(schedule.drain().is_empty());
    assert!(button.drain().is_empty());
    assert!(taken.drain().is_empty());
    assert!(session.is_torn_down());
    assert_eq!(output.button_info.subscriber_count(), 0);
}

/// Subscribing after release yields an already-disconnected subscription.
#[test]
fn subscribe_after_teardown_is_disconnected() {
    let (mut session, _services) = session(
        AttendanceScript::new().schedule(ScheduleModel::no_session("")),
        PokeScript::default(),
    );
    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);
    session.teardown();
    session.teardown();

    let schedule = session.output().schedule.subscribe();

    assert!(schedule.is_closed());
    assert!(schedule.try_next().is_none());
}

/// A view on another thread observes emissions until the session goes away.
#[test]
fn view_thread_sees_emissions_then_disconnect() {
    let (mut session, _services) = session(
        AttendanceScript::new().schedule(ScheduleModel::no_session("")),
        PokeScript::default(),
    );
    let loading = session.output().loading.subscribe();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_view = Arc::clone(&seen);

    let view = thread::spawn(move || {
        // Runs until the session disconnects the stream.
        while let Ok(value) = loading.recv_timeout(Duration::from_secs(5)) {
            seen_by_view.lock().push(value);
        }
    });

    session.send(Intent::ViewWillAppear);
    session.pump(PUMP_ROUNDS);
    session.teardown();
    view.join().expect("view thread");

    assert_eq!(*seen.lock(), vec![true, false]);
}
