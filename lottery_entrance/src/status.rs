use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const SUBMITTING: u8 = 1;
const AWAITING_CONFIRMATION: u8 = 2;

/// Tracks the one entry transaction that may be outstanding at a time.
#[derive(Debug, Default)]
pub struct RequestStatus {
    state: AtomicU8,
}

impl RequestStatus {
    pub fn is_submitting(&self) -> bool {
        self.state.load(Ordering::SeqCst) == SUBMITTING
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.state.load(Ordering::SeqCst) == AWAITING_CONFIRMATION
    }

    pub fn is_busy(&self) -> bool {
        self.state.load(Ordering::SeqCst) != IDLE
    }

    /// Claim the slot, or `None` if a request is already outstanding.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.state
            .compare_exchange(IDLE, SUBMITTING, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight { status: self })
    }
}

/// Releases the slot when dropped, whichever way the request ended.
#[derive(Debug)]
pub struct InFlight<'a> {
    status: &'a RequestStatus,
}

impl InFlight<'_> {
    pub fn submitted(&self) {
        self.status
            .state
            .store(AWAITING_CONFIRMATION, Ordering::SeqCst);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.status.state.store(IDLE, Ordering::SeqCst);
    }
}
