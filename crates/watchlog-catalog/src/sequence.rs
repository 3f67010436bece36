use std::sync::atomic::{AtomicU64, Ordering};
use watchlog_models::SearchResult;

/// Token identifying one issued search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Search results tagged with the ticket of the request that produced them
#[derive(Debug, Clone)]
pub struct TrackedSearch {
    pub ticket: SearchTicket,
    pub results: Vec<SearchResult>,
}

/// Hands out increasing tickets so a caller can drop a response that
/// arrives after a newer search was issued (last issued wins).
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let sequencer = SearchSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }
}
