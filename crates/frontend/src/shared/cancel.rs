//! Cancellation for long-running fetch loops and overlapping reloads.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Shared flag checked between requests of a multi-page load. The owning
/// page sets it from `on_cleanup` so an abandoned loop stops issuing requests.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Hands out increasing tickets so only the newest response is applied
/// when reloads overlap.
#[derive(Clone, Default)]
pub struct RequestSeq(Arc<AtomicU64>);

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request and returns its ticket.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Relaxed) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_through_clones() {
        let flag = CancelFlag::new();
        let seen_by_task = flag.clone();
        assert!(!seen_by_task.is_cancelled());
        flag.cancel();
        assert!(seen_by_task.is_cancelled());
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = RequestSeq::new();
        let first = seq.next();
        let second = seq.clone().next();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn slow_first_load_is_dropped_after_a_refresh() {
        let seq = RequestSeq::new();
        let mut shown = Vec::new();
        let mount = seq.next();
        let refresh = seq.next();
        // The refresh answers first, the mount load arrives afterwards
        for (ticket, rows) in [(refresh, "fresh"), (mount, "stale")] {
            if seq.is_current(ticket) {
                shown.push(rows);
            }
        }
        assert_eq!(shown, vec!["fresh"]);
    }
}
