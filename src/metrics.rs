//! In-process counters for the bot. Cheap relaxed atomics; read with [`snapshot`].
use std::sync::atomic::{AtomicU64, Ordering};

static EVENTS_HANDLED: AtomicU64 = AtomicU64::new(0);
static EVENT_FAILURES: AtomicU64 = AtomicU64::new(0);
static REGISTRATIONS: AtomicU64 = AtomicU64::new(0);
static MAPS_GENERATED: AtomicU64 = AtomicU64::new(0);
static CELLS_REVEALED: AtomicU64 = AtomicU64::new(0);

pub fn inc_events_handled() {
    EVENTS_HANDLED.fetch_add(1, Ordering::Relaxed);
}

/// Events that ended in a storage failure.
pub fn inc_event_failures() {
    EVENT_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_registrations() {
    REGISTRATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_maps_generated() {
    MAPS_GENERATED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_cells_revealed() {
    CELLS_REVEALED.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub events_handled: u64,
    pub event_failures: u64,
    pub registrations: u64,
    pub maps_generated: u64,
    pub cells_revealed: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        events_handled: EVENTS_HANDLED.load(Ordering::Relaxed),
        event_failures: EVENT_FAILURES.load(Ordering::Relaxed),
        registrations: REGISTRATIONS.load(Ordering::Relaxed),
        maps_generated: MAPS_GENERATED.load(Ordering::Relaxed),
        cells_revealed: CELLS_REVEALED.load(Ordering::Relaxed),
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "events={} failures={} registrations={} maps={} cells={}",
            self.events_handled,
            self.event_failures,
            self.registrations,
            self.maps_generated,
            self.cells_revealed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_only_grow() {
        let before = snapshot();
        inc_cells_revealed();
        inc_maps_generated();
        let after = snapshot();
        assert!(after.cells_revealed > before.cells_revealed);
        assert!(after.maps_generated > before.maps_generated);
    }
}
