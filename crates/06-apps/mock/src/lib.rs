//! Services hub builders backed by the scripted in-process services.

use std::sync::Arc;

use anyhow::Result;
use hub::{ServicesHub, ServicesHubBuilder};
use services_attendance::{AttendanceScript, AttendanceService, UpstreamHandle};
use services_poke::{PokeScript, PokeService};

/// Report capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 32;

/// Scripted services kept alongside the hub so tests can inspect them.
#[derive(Clone)]
pub struct MockServices {
    pub attendance: Arc<AttendanceService>,
    pub poke: Arc<PokeService>,
}

impl MockServices {
    /// Creates both services with the default capacity.
    pub fn new(attendance: AttendanceScript, poke: PokeScript) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, attendance, poke)
    }

    /// Creates both services with the given report capacity.
    pub fn with_capacity(capacity: usize, attendance: AttendanceScript, poke: PokeScript) -> Self {
        Self {
            attendance: AttendanceService::new(capacity, attendance),
            poke: PokeService::new(capacity, poke),
        }
    }

    /// Builds a hub routing to these services.
    pub fn hub(&self) -> Result<ServicesHub> {
        ServicesHubBuilder::new()
            .attendance(self.attendance.clone())
            .poke(self.poke.clone())
            .build()
    }

    /// Handle for pushing upstream attendance signals.
    pub fn upstream(&self) -> UpstreamHandle {
        self.attendance.upstream()
    }
}

/// Creates a hub over freshly scripted services.
pub fn make_hub(attendance: AttendanceScript, poke: PokeScript) -> Result<ServicesHub> {
    MockServices::new(attendance, poke).hub()
}

/// Creates a hub whose services answer nothing but transport errors.
pub fn make_empty_hub() -> Result<ServicesHub> {
    make_hub(AttendanceScript::default(), PokeScript::default())
}
