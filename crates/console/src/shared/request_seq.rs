//! Sequence-tagged requests
//!
//! Each fetch takes a ticket before it starts; when several fetches for the
//! same view overlap, only the completion holding the latest ticket is
//! applied, whatever order they finish in.
//!
//! A one-shot caller such as a CLI command awaits its single fetch and has
//! nothing to discard; long-lived views that refetch on every filter change
//! hold one `LatestView` per screen and route every fetch through
//! [`LatestView::load`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Ticket handed out by [`RequestSequencer::next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket; every ticket is greater than all earlier ones
    pub fn next(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Last issued ticket, if any
    pub fn latest(&self) -> Option<Ticket> {
        match self.issued.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest() == Some(ticket)
    }
}

/// Value shown by a view plus the sequencer that owns its requests
#[derive(Debug)]
pub struct LatestView<T> {
    sequencer: RequestSequencer,
    state: Mutex<Option<(Ticket, T)>>,
}

impl<T> Default for LatestView<T> {
    fn default() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            state: Mutex::new(None),
        }
    }
}

impl<T: Clone> LatestView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a request about to be sent
    pub fn begin(&self) -> Ticket {
        self.sequencer.next()
    }

    /// Store `value` if `ticket` is still the latest; returns whether it was applied
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if !self.sequencer.is_latest(ticket) {
            tracing::debug!(
                "Discarding stale response #{} (latest #{:?})",
                ticket.value(),
                self.sequencer.latest().map(|t| t.value())
            );
            return false;
        }

        *state = Some((ticket, value));
        true
    }

    /// Currently applied value
    pub fn current(&self) -> Option<T> {
        let state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.as_ref().map(|(_, value)| value.clone())
    }

    /// Run `fetch` under a fresh ticket and apply its result if still latest.
    ///
    /// Errors are returned to the caller without touching the current value.
    pub async fn load<F, Fut, E>(&self, fetch: F) -> Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
    {
        let ticket = self.begin();
        let value = fetch().await?;
        Ok(self.complete(ticket, value))
    }
}
