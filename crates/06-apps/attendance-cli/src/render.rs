//! One-line renderings of every output emission.

use service_abi::StepStatus;
use world::{
    format_time_interval, AttendanceButtonInfo, AttendanceStep, FetchFailure, PokeFriends,
    PokeFriendsPage, PokeUser, ScheduleState, ScoreModel, TakenAttendanceType, WeekdayStyle,
};

pub fn loading(on: bool) -> String {
    format!("loading: {}", if on { "on" } else { "off" })
}

pub fn schedule(state: &ScheduleState, style: WeekdayStyle) -> String {
    match state {
        ScheduleState::NoSession => "schedule: none".to_string(),
        ScheduleState::Scheduled(model) => {
            let span = format_time_interval(&model.start_date, &model.end_date, style);
            if span.is_empty() {
                format!("schedule: scheduled {} @ {}", model.name, model.location)
            } else {
                format!(
                    "schedule: scheduled {} @ {} ({span})",
                    model.name, model.location
                )
            }
        }
        ScheduleState::Unscheduled(model) => format!("schedule: unscheduled {}", model.message),
    }
}

pub fn score(score: &ScoreModel) -> String {
    format!(
        "score: {} {}기 {} {}점 (출석 {} / 지각 {} / 결석 {})",
        score.part,
        score.generation,
        score.name,
        score.score,
        score.total.attendance,
        score.total.tardy,
        score.total.absent
    )
}

pub fn today_attendances(steps: &[AttendanceStep]) -> String {
    let steps: Vec<String> = steps
        .iter()
        .map(|step| format!("{} {}", step.title, step_status(step.status)))
        .collect();
    format!("today: {}", steps.join(", "))
}

fn step_status(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "PENDING",
        StepStatus::Done => "DONE",
        StepStatus::Absent => "ABSENT",
        StepStatus::Tardy => "TARDY",
    }
}

pub fn taken_attendance_type(taken: TakenAttendanceType) -> String {
    match taken {
        TakenAttendanceType::First => "taken: first".to_string(),
        TakenAttendanceType::Second => "taken: second".to_string(),
    }
}

pub fn button_info(info: &AttendanceButtonInfo) -> String {
    let state = if info.is_enabled { "enabled" } else { "disabled" };
    format!("button: [{}] {state}", info.title)
}

pub fn fetch_failure(failure: &FetchFailure) -> String {
    format!("failed: {:?}: {}", failure.source, failure.error)
}

pub fn friends(friends: &PokeFriends) -> String {
    format!(
        "friends: {} friend(s), {} best friend(s), {} soulmate(s)",
        friends.friends.len(),
        friends.best_friends.len(),
        friends.soulmates.len()
    )
}

pub fn friends_list(page: &PokeFriendsPage) -> String {
    format!(
        "friends page {}: {}/{}",
        page.relation_name,
        page.friends.len(),
        page.total_size
    )
}

pub fn poked(user: &PokeUser) -> String {
    format!("poked: {} x{}", user.name, user.poke_num)
}
