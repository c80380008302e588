use std::time::{Duration, Instant};

/// Ticks owed after a long stall are capped so a suspended terminal does not
/// replay minutes of simulation at once.
const MAX_CATCH_UP: u32 = 5;

/// Fixed-interval tick accounting for one engine.
///
/// The host polls [`TickScheduler::due_ticks`] from its frame loop and steps
/// the engine once per returned tick. Cancellation is synchronous: once
/// [`TickScheduler::cancel`] returns, no further ticks are ever reported.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
    cancelled: bool,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks that became due since the last call. The first call
    /// arms the timer and reports nothing.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if self.cancelled {
            return 0;
        }
        let next = *self.next_due.get_or_insert(now + self.interval);
        if now < next {
            return 0;
        }

        let behind = (now - next).as_nanos() / self.interval.as_nanos();
        let owed = behind.saturating_add(1);
        if owed > u128::from(MAX_CATCH_UP) {
            log::warn!("scheduler: {} ticks behind, dropping to {}", owed, MAX_CATCH_UP);
            self.next_due = Some(now + self.interval);
            return MAX_CATCH_UP;
        }
        let owed = owed as u32;
        self.next_due = Some(next + self.interval * owed);
        owed
    }

    /// Start counting afresh from the next poll.
    pub fn rearm(&mut self) {
        self.next_due = None;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
