//! User-facing labels.

/// `"{n}차 출석체크"`: title of the take-attendance button for round `n`.
pub fn take_nth_attendance(n: u32) -> String {
    format!("{n}차 출석체크")
}
