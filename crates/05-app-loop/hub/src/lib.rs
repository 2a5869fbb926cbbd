//! Service hub orchestration and shared scheduling primitives.

use anyhow::{anyhow, Result};
use log::trace;

pub use world::reduce_intent::IntentReducer;
pub use world::reduce_report::ReportReducer;
pub use world::{
    AttendanceCmd, AttendanceRep, Emission, FollowUps, Intent, IntentEffects, IntentPriority,
    PokeCmd, PokeRep, Report, SubmitOutcome, SubmitPolicy, WorkCmd,
};

// Re-export Service trait and handle types from service-abi
pub use service_abi::{AttendanceServiceHandle, PokeServiceHandle, Service};

/// Default budget for processing intents per scheduler pass.
pub const DEFAULT_INTENT_BUDGET: usize = 3;
/// Default budget for draining reports per scheduler pass.
pub const DEFAULT_REPORT_BUDGET: usize = 32;

/// Aggregates backend services and exposes scheduling helpers.
#[derive(Clone)]
pub struct ServicesHub {
    attendance: AttendanceServiceHandle,
    poke: PokeServiceHandle,
}

impl ServicesHub {
    /// Creates a new builder for constructing a hub.
    pub fn builder() -> ServicesHubBuilder {
        ServicesHubBuilder::new()
    }

    /// Attempts to submit a work command to the appropriate service.
    pub fn try_submit_work(&self, cmd: WorkCmd) -> SubmitOutcome {
        let outcome = match &cmd {
            WorkCmd::Attendance(inner) => self.attendance.try_submit(inner),
            WorkCmd::Poke(inner) => self.poke.try_submit(inner),
        };
        trace!("submitted {cmd:?} -> {outcome:?}");
        outcome
    }

    /// Drains reports across all services up to the provided budget.
    ///
    /// Services are visited in turn so a chatty one cannot starve the other.
    pub fn drain_reports(&self, budget: usize) -> Vec<Report> {
        if budget == 0 {
            return Vec::new();
        }

        let mut remaining = budget;
        let mut out = Vec::with_capacity(budget);
        let mut progressed = true;

        while remaining > 0 && progressed {
            progressed = false;

            if remaining > 0 {
                let drained = self.attendance.drain(remaining.min(FAIR_SHARE));
                if !drained.is_empty() {
                    remaining = remaining.saturating_sub(drained.len());
                    out.extend(drained.into_iter().map(Report::Attendance));
                    progressed = true;
                }
            }

            if remaining > 0 {
                let drained = self.poke.drain(remaining.min(FAIR_SHARE));
                if !drained.is_empty() {
                    remaining = remaining.saturating_sub(drained.len());
                    out.extend(drained.into_iter().map(Report::Poke));
                    progressed = true;
                }
            }
        }

        out
    }
}

/// Reports taken from one service before moving on to the next.
const FAIR_SHARE: usize = 8;

/// Builder for assembling a [`ServicesHub`] from individual service handles.
pub struct ServicesHubBuilder {
    attendance: Option<AttendanceServiceHandle>,
    poke: Option<PokeServiceHandle>,
}

impl ServicesHubBuilder {
    /// Creates an empty builder with no services attached.
    pub fn new() -> Self {
        Self {
            attendance: None,
            poke: None,
        }
    }

    /// Sets the attendance service handle.
    pub fn attendance(mut self, svc: AttendanceServiceHandle) -> Self {
        self.attendance = Some(svc);
        self
    }

    /// Sets the poke service handle.
    pub fn poke(mut self, svc: PokeServiceHandle) -> Self {
        self.poke = Some(svc);
        self
    }

    /// Builds a [`ServicesHub`], returning an error if any service is missing.
    pub fn build(self) -> Result<ServicesHub> {
        Ok(ServicesHub {
            attendance: self
                .attendance
                .ok_or_else(|| anyhow!("missing attendance service"))?,
            poke: self.poke.ok_or_else(|| anyhow!("missing poke service"))?,
        })
    }
}

impl Default for ServicesHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}
