use std::{cell::Cell, collections::BTreeSet, rc::Rc, time::Duration};

use crate::foundation::{
    core::SectionId,
    error::{ChoreoError, ChoreoResult},
};

/// When snap discovery runs after mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiscoveryOpts {
    /// Layout settling window before discovery fires, in milliseconds.
    pub settle_delay_ms: u64,
    /// Fire early once every pinned section has resolved its layout.
    pub readiness_barrier: bool,
}

impl Default for DiscoveryOpts {
    fn default() -> Self {
        Self {
            settle_delay_ms: 500,
            readiness_barrier: true,
        }
    }
}

impl DiscoveryOpts {
    /// Settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Handle for a scheduled discovery.
///
/// The host hands it back when its timer fires. A ticket outliving its page (or a remount) is
/// stale; the liveness flag is checked on delivery because cancelling the host timer can race with
/// a callback already in flight.
#[derive(Clone, Debug)]
pub struct DiscoveryTicket {
    generation: u64,
    alive: Rc<Cell<bool>>,
    due_at: Duration,
}

impl DiscoveryTicket {
    /// Whether the page that issued this ticket is still mounted.
    pub fn is_live(&self) -> bool {
        self.alive.get()
    }

    /// Host time at which the settle delay expires.
    pub fn due_at(&self) -> Duration {
        self.due_at
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    Pending,
    Fired,
    Cancelled,
}

/// Deferred, once-per-mount discovery trigger.
#[derive(Debug)]
pub(crate) struct DiscoveryGate {
    generation: u64,
    alive: Rc<Cell<bool>>,
    due_at: Duration,
    unresolved: BTreeSet<SectionId>,
    barrier: bool,
    state: GateState,
}

impl DiscoveryGate {
    pub(crate) fn arm(
        now: Duration,
        generation: u64,
        pinned: impl IntoIterator<Item = SectionId>,
        opts: &DiscoveryOpts,
    ) -> (Self, DiscoveryTicket) {
        let alive = Rc::new(Cell::new(true));
        let due_at = now.saturating_add(opts.settle_delay());
        let gate = Self {
            generation,
            alive: Rc::clone(&alive),
            due_at,
            unresolved: pinned.into_iter().collect(),
            barrier: opts.readiness_barrier,
            state: GateState::Pending,
        };
        let ticket = DiscoveryTicket {
            generation,
            alive,
            due_at,
        };
        (gate, ticket)
    }

    /// Count a section into the barrier once it has registered or fallen back.
    pub(crate) fn resolve(&mut self, id: SectionId) {
        self.unresolved.remove(&id);
    }

    /// Track a section added after mount.
    pub(crate) fn expect(&mut self, id: SectionId) {
        if self.state == GateState::Pending {
            self.unresolved.insert(id);
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.state == GateState::Pending
    }

    /// Whether discovery should run at `now`.
    pub(crate) fn is_due(&self, now: Duration) -> bool {
        self.state == GateState::Pending
            && (now >= self.due_at || (self.barrier && self.unresolved.is_empty()))
    }

    /// Consume the gate for `ticket`. Stale or repeated deliveries are rejected.
    pub(crate) fn accept(&mut self, ticket: &DiscoveryTicket) -> ChoreoResult<()> {
        if !ticket.alive.get() || ticket.generation != self.generation || !self.is_pending() {
            return Err(ChoreoError::StaleRegistry);
        }
        self.state = GateState::Fired;
        Ok(())
    }

    /// Consume the gate from an internal poll.
    pub(crate) fn fire(&mut self) -> ChoreoResult<()> {
        if !self.alive.get() || !self.is_pending() {
            return Err(ChoreoError::StaleRegistry);
        }
        self.state = GateState::Fired;
        Ok(())
    }

    /// Invalidate the gate and every ticket it issued.
    pub(crate) fn cancel(&mut self) {
        self.alive.set(false);
        self.state = GateState::Cancelled;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/discovery.rs"]
mod tests;
