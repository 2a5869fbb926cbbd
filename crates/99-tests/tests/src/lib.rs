//! End-to-end scenarios for the attendance screen.

#[cfg(test)]
mod session_e2e;

#[cfg(test)]
mod teardown;

#[cfg(test)]
mod poke_e2e;

/// Shared fixtures for the scenario modules.
#[cfg(test)]
mod fixtures {
    use app::{Session, SessionConfig};
    use mock::MockServices;
    use service_abi::{ScheduleModel, SessionType};
    use services_attendance::AttendanceScript;
    use services_poke::PokeScript;

    pub const PUMP_ROUNDS: usize = 32;

    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub fn seminar(start: &str, end: &str) -> ScheduleModel {
        ScheduleModel {
            session_type: SessionType::HasAttendance,
            id: 0,
            location: "건국대학교 새천년관".to_string(),
            name: "1차 행사".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            message: String::new(),
            attendances: Vec::new(),
        }
    }

    pub fn session(attendance: AttendanceScript, poke: PokeScript) -> (Session, MockServices) {
        init_logging();
        let services = MockServices::new(attendance, poke);
        let hub = services.hub().expect("mock hub");
        (Session::new(hub, &SessionConfig::default()), services)
    }
}
