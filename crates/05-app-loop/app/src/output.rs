//! View-facing output cells.
//!
//! State cells cache their last value and replay it to new subscribers; event
//! streams only reach subscribers that are live when a value is sent. Both
//! are multicast and safe to observe from a thread other than the one running
//! the scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::trace;
use parking_lot::Mutex;

use crate::cancel::Cancellable;
use hub::Emission;
use world::{
    AttendanceButtonInfo, AttendanceStep, FetchFailure, PokeFriends, PokeFriendsPage, PokeUser,
    ScheduleState, ScoreModel, TakenAttendanceType,
};

/// Receiving end of a state cell or event stream.
///
/// Disconnects once the owning output is released.
pub struct Subscription<T> {
    rx: Receiver<T>,
    closed: Arc<AtomicBool>,
}

impl<T> Subscription<T> {
    /// Returns the next pending value without blocking.
    pub fn try_next(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Takes every pending value.
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    /// Waits up to `timeout` for the next value.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Returns `true` once the source has been released.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Live senders for one output, pruned as subscribers go away.
struct Fanout<T> {
    senders: Vec<Sender<T>>,
}

impl<T: Clone> Fanout<T> {
    fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    fn send(&mut self, value: &T) {
        self.senders.retain(|tx| tx.send(value.clone()).is_ok());
    }

    fn len(&self) -> usize {
        self.senders.len()
    }
}

/// Last-value-wins multicast cell.
pub struct StateCell<T> {
    value: ArcSwapOption<T>,
    fanout: Mutex<Fanout<T>>,
    closed: Arc<AtomicBool>,
}

impl<T: Clone> StateCell<T> {
    pub fn new() -> Self {
        Self {
            value: ArcSwapOption::empty(),
            fanout: Mutex::new(Fanout::new()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stores `value` and delivers it to every live subscriber.
    ///
    /// Ignored once the cell has been closed.
    pub fn set(&self, value: T) {
        let mut fanout = self.fanout.lock();
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        fanout.send(&value);
        self.value.store(Some(Arc::new(value)));
    }

    /// Returns the cached value, if any.
    pub fn get(&self) -> Option<T> {
        self.value.load_full().map(|value| T::clone(&value))
    }

    /// Subscribes, receiving the cached value first when one exists.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = unbounded();
        let mut fanout = self.fanout.lock();
        if !self.closed.load(Ordering::Acquire) {
            if let Some(current) = self.value.load_full() {
                let _ = tx.send(T::clone(&current));
            }
            fanout.senders.push(tx);
        }
        Subscription {
            rx,
            closed: Arc::clone(&self.closed),
        }
    }

    /// Number of subscribers still attached as of the last delivery.
    pub fn subscriber_count(&self) -> usize {
        self.fanout.lock().len()
    }

    /// Disconnects every subscriber and refuses further values.
    pub fn close(&self) {
        let mut fanout = self.fanout.lock();
        self.closed.store(true, Ordering::Release);
        fanout.senders.clear();
    }
}

impl<T: Clone> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Multicast stream with no cached value.
pub struct EventStream<T> {
    fanout: Mutex<Fanout<T>>,
    closed: Arc<AtomicBool>,
}

impl<T: Clone> EventStream<T> {
    pub fn new() -> Self {
        Self {
            fanout: Mutex::new(Fanout::new()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Delivers `value` to subscribers that are currently attached.
    pub fn send(&self, value: T) {
        let mut fanout = self.fanout.lock();
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        fanout.send(&value);
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = unbounded();
        let mut fanout = self.fanout.lock();
        if !self.closed.load(Ordering::Acquire) {
            fanout.senders.push(tx);
        }
        Subscription {
            rx,
            closed: Arc::clone(&self.closed),
        }
    }

    /// Number of subscribers still attached as of the last delivery.
    pub fn subscriber_count(&self) -> usize {
        self.fanout.lock().len()
    }

    /// Disconnects every subscriber and refuses further values.
    pub fn close(&self) {
        let mut fanout = self.fanout.lock();
        self.closed.store(true, Ordering::Release);
        fanout.senders.clear();
    }
}

impl<T: Clone> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every output the attendance screen observes.
#[derive(Default)]
pub struct Output {
    pub schedule: StateCell<ScheduleState>,
    pub score: StateCell<ScoreModel>,
    pub today_attendances: StateCell<Vec<AttendanceStep>>,
    pub taken_attendance_type: StateCell<TakenAttendanceType>,
    pub button_info: EventStream<AttendanceButtonInfo>,
    pub loading: EventStream<bool>,
    pub fetch_failures: EventStream<FetchFailure>,
    pub friends: EventStream<PokeFriends>,
    pub friends_list: EventStream<PokeFriendsPage>,
    pub poked: EventStream<PokeUser>,
}

impl Output {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Routes a reducer emission to its cell.
    pub fn apply(&self, emission: Emission) {
        trace!("emit {emission:?}");
        match emission {
            Emission::Schedule(state) => self.schedule.set(state),
            Emission::Score(score) => self.score.set(score),
            Emission::TodayAttendances(steps) => self.today_attendances.set(steps),
            Emission::TakenAttendanceType(taken) => self.taken_attendance_type.set(taken),
            Emission::ButtonInfo(info) => self.button_info.send(info),
            Emission::Loading(loading) => self.loading.send(loading),
            Emission::FetchFailed(failure) => self.fetch_failures.send(failure),
            Emission::Friends(friends) => self.friends.send(friends),
            Emission::FriendsList(page) => self.friends_list.send(page),
            Emission::Poked(user) => self.poked.send(user),
        }
    }

    /// Disconnects every subscription on every cell.
    pub fn close(&self) {
        self.schedule.close();
        self.score.close();
        self.today_attendances.close();
        self.taken_attendance_type.close();
        self.button_info.close();
        self.loading.close();
        self.fetch_failures.close();
        self.friends.close();
        self.friends_list.close();
        self.poked.close();
    }
}

impl Cancellable for Output {
    fn cancel(&self) {
        self.close();
    }
}
