//! Cancellable timers for the feedback modal.
//!
//! The modal never sleeps. It asks a [`Scheduler`] for a timer and keeps the
//! returned [`TimerHandle`]; when the delay elapses the host feeds a
//! [`TimerFired`] back into [`FeedbackModal::handle_timer`]. Each timer is
//! tagged with the epoch it was started in so late deliveries can be
//! recognised and dropped.
//!
//! Two schedulers are provided:
//!
//! - [`TokioScheduler`] spawns a sleeping task per timer on a tokio runtime
//!   and delivers firings over an unbounded channel.
//! - [`ManualScheduler`] is a virtual clock advanced explicitly, for tests
//!   and other deterministic hosts.
//!
//! [`FeedbackModal::handle_timer`]: super::FeedbackModal::handle_timer

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

/// Open/close cycle counter.
pub type Epoch = u64;

/// Identifier of one scheduled timer, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Simulated network round-trip while submitting.
    SubmitLatency,
    /// Dwell on the success view before closing.
    AutoClose,
}

/// Context captured when a timer is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTag {
    /// Epoch the timer belongs to.
    pub epoch: Epoch,
    /// Purpose of the timer.
    pub kind: TimerKind,
}

/// Delivered to the modal when a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    /// Timer that elapsed.
    pub id: TimerId,
    /// Tag it was scheduled with.
    pub tag: TimerTag,
}

/// Owner's grip on a scheduled timer.
///
/// Cancelling invalidates the timer so it never fires. Dropping the handle
/// cancels it too, which means a timer cannot outlive the state that owns
/// it.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl TimerHandle {
    fn new(id: TimerId, cancelled: Arc<AtomicBool>, abort: Option<AbortHandle>) -> Self {
        Self { id, cancelled, abort }
    }

    /// Id of the underlying timer.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Prevent the timer from firing. Safe to call more than once.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Source of cancellable one-shot timers.
pub trait Scheduler {
    /// Start a timer that fires once after `delay`.
    fn schedule(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle;
}

/// Timers backed by tokio tasks.
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: Handle,
    tx: UnboundedSender<TimerFired>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto `runtime`.
    ///
    /// Firings arrive on the returned receiver.
    pub fn new(runtime: Handle) -> (Self, UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            runtime,
            tx,
            next_id: 0,
        };
        (scheduler, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancelled);
        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::Acquire) {
                // Receiver gone means the host shut down; nothing to notify.
                let _ = tx.send(TimerFired { id, tag });
            }
        });

        TimerHandle::new(id, cancelled, Some(task.abort_handle()))
    }
}

#[derive(Debug)]
struct PendingTimer {
    id: TimerId,
    deadline: Duration,
    tag: TimerTag,
    cancelled: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same clock, so a test can keep one clone and hand the
/// other to the modal.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    /// A clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of timers that are scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .pending
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::Acquire))
            .count()
    }

    /// Move the clock forward by `by` and return every live timer that is
    /// now due, earliest first.
    pub fn advance(&self, by: Duration) -> Vec<TimerFired> {
        let mut clock = self.clock.borrow_mut();
        clock.now += by;
        let now = clock.now;

        clock.pending.retain(|t| !t.cancelled.load(Ordering::Acquire));
        let (mut due, rest): (Vec<_>, Vec<_>) =
            clock.pending.drain(..).partition(|t| t.deadline <= now);
        clock.pending = rest;

        due.sort_by_key(|t| (t.deadline, t.id));
        due.into_iter()
            .map(|t| TimerFired { id: t.id, tag: t.tag })
            .collect()
    }

    /// Jump to the earliest live deadline and fire that timer alone.
    pub fn fire_next(&self) -> Option<TimerFired> {
        let mut clock = self.clock.borrow_mut();
        clock.pending.retain(|t| !t.cancelled.load(Ordering::Acquire));
        let index = clock
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;
        let timer = clock.pending.remove(index);
        clock.now = clock.now.max(timer.deadline);
        Some(TimerFired {
            id: timer.id,
            tag: timer.tag,
        })
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = TimerId(clock.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));
        let deadline = clock.now + delay;
        clock.pending.push(PendingTimer {
            id,
            deadline,
            tag,
            cancelled: Arc::clone(&cancelled),
        });
        TimerHandle::new(id, cancelled, None)
    }
}
