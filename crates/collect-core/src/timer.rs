use std::time::Duration;

/// Cancelable single-shot task polled against a monotonic clock.
///
/// Scheduling while a task is pending replaces it, so a stale deadline can
/// never fire after state has moved on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask<T> {
    pending: Option<(Duration, T)>,
}

impl<T> Default for ScheduledTask<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ScheduledTask<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) {
        self.pending = Some((now + delay, payload));
    }

    /// Drop the pending task, returning whether one existed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the payload if its deadline has passed.
    pub fn take_due(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.pending.take().map(|(_, payload)| payload),
            _ => None,
        }
    }
}
