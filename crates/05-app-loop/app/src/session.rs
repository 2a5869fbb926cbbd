use std::sync::Arc;

use hub::{Intent, ServicesHub};
use log::info;
use world::AttendanceWorld;

use crate::cancel::CancelBag;
use crate::config::SessionConfig;
use crate::output::Output;
use crate::Scheduler;

/// One attendance screen activation: a scheduler, its output, and the bag
/// that tears both down.
pub struct Session {
    scheduler: Scheduler,
    bag: CancelBag,
}

impl Session {
    pub fn new(hub: ServicesHub, config: &SessionConfig) -> Self {
        let world = AttendanceWorld::with_config(config.reducer.clone());
        let scheduler = Scheduler::new(world, hub, Output::new(), config);
        let bag = CancelBag::new();
        scheduler.register(&bag);
        Self { scheduler, bag }
    }

    pub fn output(&self) -> Arc<Output> {
        Arc::clone(self.scheduler.output())
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn world(&self) -> &AttendanceWorld {
        self.scheduler.world()
    }

    pub fn send(&mut self, intent: Intent) {
        self.scheduler.enqueue_intent(intent);
    }

    /// Pumps the scheduler until it goes idle.
    pub fn pump(&mut self, max_rounds: usize) -> usize {
        self.scheduler.run_until_idle(max_rounds)
    }

    /// Releases every subscription and stops the scheduler.
    pub fn teardown(&self) {
        if !self.bag.is_cancelled() {
            info!(
                "tearing down attendance session after {} report(s)",
                self.scheduler.world().reports_seen
            );
        }
        self.bag.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.bag.is_cancelled()
    }
}
