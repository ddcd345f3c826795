//! Countdown timer with a single expiry callback.
//!
//! The tick task and [`CountdownTimer::cancel`] share one mutex, and the callback lives
//! inside it. Whoever takes the lock first wins: a cancel removes the callback, so after
//! `cancel()` returns nothing can fire.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const LOW_TIME_THRESHOLD_SECS: u64 = 5 * 60;

const TICK: Duration = Duration::from_secs(1);

type ExpiryCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("Timer duration must be at least 1 minute")]
    ZeroDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ready,
    Running,
    Expired,
    Cancelled,
}

struct Shared {
    remaining_secs: u64,
    status: Status,
    on_expiry: Option<ExpiryCallback>,
}

/// Snapshot of a timer. `remaining_secs` never increases while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub running: bool,
}

impl TimerState {
    pub fn remaining(&self) -> RemainingTime {
        RemainingTime::from_secs(self.remaining_secs)
    }

    pub fn is_low_time(&self) -> bool {
        self::is_low_time(self.remaining_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    pub minutes: u64,
    /// 0..=59
    pub seconds: u64,
}

impl RemainingTime {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            minutes: secs / 60,
            seconds: secs % 60,
        }
    }
}

/// `MM:SS`, zero padded. Minutes grow past two digits for durations over 99 minutes.
pub fn format_clock(remaining_secs: u64) -> String {
    let RemainingTime { minutes, seconds } = RemainingTime::from_secs(remaining_secs);
    format!("{:02}:{:02}", minutes, seconds)
}

pub fn is_low_time(remaining_secs: u64) -> bool {
    remaining_secs < LOW_TIME_THRESHOLD_SECS
}

pub struct CountdownTimer {
    total_secs: u64,
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    // The state stays consistent even if a callback panicked while holding the lock.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn tick(shared: &Mutex<Shared>) -> ControlFlow<()> {
    let mut s = lock(shared);
    if s.status != Status::Running {
        return ControlFlow::Break(());
    }
    s.remaining_secs = s.remaining_secs.saturating_sub(1);
    if s.remaining_secs > 0 {
        return ControlFlow::Continue(());
    }
    s.status = Status::Expired;
    if let Some(on_expiry) = s.on_expiry.take() {
        on_expiry();
    }
    ControlFlow::Break(())
}

impl CountdownTimer {
    /// The callback runs on the tick task while the timer's lock is held,
    /// so it must not call back into this timer.
    pub fn new(
        duration_minutes: u32,
        on_expiry: impl FnOnce() + Send + 'static,
    ) -> Result<Self, TimerError> {
        if duration_minutes == 0 {
            return Err(TimerError::ZeroDuration);
        }
        let total_secs = u64::from(duration_minutes) * 60;
        Ok(Self {
            total_secs,
            shared: Arc::new(Mutex::new(Shared {
                remaining_secs: total_secs,
                status: Status::Ready,
                on_expiry: Some(Box::new(on_expiry)),
            })),
            task: None,
        })
    }

    /// Spawns the tick task on the current tokio runtime.
    /// Has no effect once started, expired or cancelled.
    pub fn start(&mut self) {
        {
            let mut s = lock(&self.shared);
            if s.status != Status::Ready {
                return;
            }
            s.status = Status::Running;
        }

        let shared = Arc::clone(&self.shared);
        let mut interval = time::interval_at(Instant::now() + TICK, TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        self.task = Some(tokio::spawn(async move {
            loop {
                interval.tick().await;
                if tick(&shared).is_break() {
                    break;
                }
            }
        }));
        log::debug!("Countdown started ({}s)", self.total_secs);
    }

    /// Stops ticking and drops the callback. Idempotent; a no-op after expiry.
    pub fn cancel(&mut self) {
        {
            let mut s = lock(&self.shared);
            if matches!(s.status, Status::Ready | Status::Running) {
                s.status = Status::Cancelled;
                log::debug!("Countdown cancelled with {}s left", s.remaining_secs);
            }
            s.on_expiry = None;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn state(&self) -> TimerState {
        let s = lock(&self.shared);
        TimerState {
            remaining_secs: s.remaining_secs,
            total_secs: self.total_secs,
            running: s.status == Status::Running,
        }
    }

    pub fn is_expired(&self) -> bool {
        lock(&self.shared).status == Status::Expired
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_timer(minutes: u32) -> (CountdownTimer, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = CountdownTimer::new(minutes, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        (timer, fired)
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(45 * 60), "45:00");
        assert_eq!(format_clock(5 * 60 + 7), "05:07");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(
            RemainingTime::from_secs(125),
            RemainingTime {
                minutes: 2,
                seconds: 5
            }
        );
    }

    #[test]
    fn low_time_threshold() {
        assert!(is_low_time(0));
        assert!(is_low_time(299));
        assert!(!is_low_time(300));
        assert!(!is_low_time(301));
        assert!(!is_low_time(45 * 60));
    }

    #[test]
    fn zero_minutes_is_rejected() {
        assert!(matches!(
            CountdownTimer::new(0, || {}),
            Err(TimerError::ZeroDuration)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_once_at_deadline() {
        for minutes in [1u32, 2, 5] {
            let (mut timer, fired) = counting_timer(minutes);
            let total = u64::from(minutes) * 60;
            timer.start();

            time::sleep(Duration::from_millis(total * 1000 - 500)).await;
            assert_eq!(fired.load(Ordering::SeqCst), 0, "fired early ({} min)", minutes);
            assert_eq!(timer.state().remaining_secs, 1);
            assert!(timer.state().running);

            time::sleep(Duration::from_secs(1)).await;
            assert_eq!(fired.load(Ordering::SeqCst), 1);
            assert!(timer.is_expired());
            assert_eq!(timer.state().remaining_secs, 0);
            assert!(!timer.state().running);

            time::sleep(Duration::from_secs(600)).await;
            assert_eq!(fired.load(Ordering::SeqCst), 1, "fired twice ({} min)", minutes);
            assert_eq!(timer.state().remaining_secs, 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_tick_before_start() {
        let (timer, fired) = counting_timer(1);
        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(timer.state().remaining_secs, 60);
        assert!(!timer.state().running);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_everything() {
        let (mut timer, fired) = counting_timer(1);
        timer.start();

        time::sleep(Duration::from_millis(30_500)).await;
        assert_eq!(timer.state().remaining_secs, 30);
        timer.cancel();

        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state().remaining_secs, 30);
        assert!(!timer.state().running);

        // restarting a cancelled timer is not possible
        timer.start();
        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_one_second_before_the_deadline_never_fires() {
        let (mut timer, fired) = counting_timer(1);
        timer.start();

        time::sleep(Duration::from_millis(59_500)).await;
        assert_eq!(timer.state().remaining_secs, 1);
        timer.cancel();

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state().remaining_secs, 1);
        assert!(!timer.is_expired());
    }

    #[test]
    fn final_tick_after_cancel_is_a_no_op() {
        let (mut timer, fired) = counting_timer(1);
        {
            let mut s = lock(&timer.shared);
            s.remaining_secs = 1;
            s.status = Status::Running;
        }
        timer.cancel();

        assert!(tick(&timer.shared).is_break());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state().remaining_secs, 1);
        assert!(!timer.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_cancels_it() {
        let (mut timer, fired) = counting_timer(1);
        timer.start();
        time::sleep(Duration::from_secs(10)).await;
        drop(timer);

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
