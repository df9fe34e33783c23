//! Reserved-interval timeline for one modeled resource.
//!
//! Every modeled hardware unit (memory bank, DMA engine, generic compute
//! block) owns a [`Timeline`]: an ordered list of non-overlapping
//! `[start, end]` windows during which the unit is busy. The scheduler asks a
//! timeline where an operation of a given duration can run without colliding
//! with already-reserved work, either on one resource
//! ([`Timeline::allocate`]) or in lockstep across several
//! ([`Timeline::allocate_joint`]).
//!
//! # Placement Policy
//!
//! Single-resource allocation is first-fit: the earliest gap that holds the
//! requested duration wins, even if a later gap would pack tighter. The model
//! favors predictable, fast scheduling over packing density.
//!
//! Joint allocation never backfills gaps. Multi-party operations arrive in
//! monotonically increasing time order, so the synchronized window is always
//! appended at the tail of every participant.

use smallvec::{smallvec, SmallVec};
use thiserror::Error;

/// Simulated time coordinate. Abstract ticks, not wall-clock.
pub type Tick = u64;

/// Inline capacity for the reserved-interval list. Most resources carry only
/// a handful of live reservations between purges.
const INLINE_INTERVALS: usize = 8;

/// A reserved `[start, end]` time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: Tick,
    pub end: Tick,
}

impl Interval {
    /// Create an interval. `end` must not precede `start`.
    #[inline]
    pub fn new(start: Tick, end: Tick) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Length of the window in ticks.
    #[inline]
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }

    /// True for the zero-length idle marker.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two windows claim any tick in common.
    ///
    /// Zero-length intervals reserve no time and never conflict with
    /// anything; the `(0, 0)` sentinel must not block a reservation that
    /// starts at tick 0.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end && other.start < self.end
    }
}

/// Errors raised by synchronized (multi-resource) allocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A joint reservation needs at least one resource besides the initiator.
    #[error("joint allocation on resource {id} has no participants")]
    EmptyParticipants { id: u64 },

    /// The same resource appeared twice in one joint reservation, which
    /// would double-book its timeline within a single synchronized window.
    #[error("resource {id} appears more than once in a joint allocation")]
    DuplicateParticipant { id: u64 },
}

/// Occupation timeline for a single modeled resource.
///
/// Invariant: `reserved` is sorted ascending by start and pairwise
/// non-overlapping. A fresh timeline is seeded with the zero-length sentinel
/// `(0, 0)`, meaning "idle since time 0".
#[derive(Debug, Clone)]
pub struct Timeline {
    id: u64,
    reserved: SmallVec<[Interval; INLINE_INTERVALS]>,
    energy_weight: u32,
}

impl Timeline {
    /// Create an idle timeline for the resource with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            reserved: smallvec![Interval::new(0, 0)],
            energy_weight: 1,
        }
    }

    /// Attach an energy cost weight. Informational only; scheduling ignores
    /// it, but energy accounting in the surrounding estimator reads it back.
    pub fn with_energy_weight(mut self, weight: u32) -> Self {
        self.energy_weight = weight;
        self
    }

    /// Unique id of the modeled resource.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Energy cost weight attached to this resource.
    #[inline]
    pub fn energy_weight(&self) -> u32 {
        self.energy_weight
    }

    /// Currently reserved windows, sorted by start.
    #[inline]
    pub fn reserved(&self) -> &[Interval] {
        &self.reserved
    }

    /// First tick at which an appended operation could start.
    #[inline]
    pub fn next_free(&self) -> Tick {
        self.reserved.last().map_or(0, |last| last.end + 1)
    }

    /// Drop every reservation that ended strictly before `horizon`.
    ///
    /// Bounds memory growth over long simulations. Removing a prefix of a
    /// sorted, non-overlapping list keeps both invariants.
    pub fn purge_before(&mut self, horizon: Tick) {
        let before = self.reserved.len();
        self.reserved.retain(|iv| iv.end >= horizon);
        let dropped = before - self.reserved.len();
        if dropped > 0 {
            log::trace!(
                "resource {}: purged {} interval(s) ending before {}",
                self.id,
                dropped,
                horizon
            );
        }
    }

    /// Reserve `duration` ticks at or after `desired_start`, returning the
    /// completion time of the placed operation.
    ///
    /// First-fit gap search: the operation lands in the earliest gap wide
    /// enough to hold it without overlapping a neighbor, otherwise it is
    /// appended after the last reservation. The request is only ever shifted
    /// later, never earlier, and the result never overlaps existing work.
    ///
    /// When `purge_before` is given, reservations ending before that tick are
    /// dropped first.
    pub fn allocate(
        &mut self,
        desired_start: Tick,
        duration: Tick,
        purge_before: Option<Tick>,
    ) -> Tick {
        if let Some(horizon) = purge_before {
            self.purge_before(horizon);
        }

        let (slot, actual_start) = match self.reserved.len() {
            // Purging can empty the list entirely; the request then stands
            // as asked.
            0 => (0, desired_start),
            1 => self.place_against_single(desired_start, duration),
            _ => self.find_first_fit(desired_start, duration),
        };

        let interval = Interval::new(actual_start, actual_start + duration);
        self.reserved.insert(slot, interval);
        log::trace!(
            "resource {}: reserved ({}, {}) for request (start {}, duration {})",
            self.id,
            interval.start,
            interval.end,
            desired_start,
            duration
        );
        interval.end
    }

    /// Placement when exactly one interval is reserved (usually the idle
    /// sentinel): take `desired_start` if the requested window clears the
    /// existing one, otherwise queue right behind it.
    fn place_against_single(&self, desired_start: Tick, duration: Tick) -> (usize, Tick) {
        let existing = self.reserved[0];
        let requested = Interval::new(desired_start, desired_start + duration);
        if requested.overlaps(&existing) {
            (1, existing.end + 1)
        } else if desired_start < existing.start {
            (0, desired_start)
        } else {
            (1, desired_start)
        }
    }

    /// First-fit scan over adjacent reservation pairs. A gap qualifies when
    /// it is strictly wider than `duration` and the candidate start (one past
    /// the gap's left edge, or `desired_start` if that falls inside the gap)
    /// still leaves room before the gap's right edge.
    fn find_first_fit(&self, desired_start: Tick, duration: Tick) -> (usize, Tick) {
        for i in 0..self.reserved.len() - 1 {
            let current = self.reserved[i];
            let next = self.reserved[i + 1];
            if next.start - current.end <= duration {
                continue;
            }
            let candidate = desired_start.max(current.end + 1);
            if candidate + duration <= next.start {
                return (i + 1, candidate);
            }
        }
        // No gap fits; append after the last reservation.
        (self.reserved.len(), self.next_free())
    }

    /// Reserve an identical `duration`-tick window on this timeline and on
    /// every participant, returning the shared completion time.
    ///
    /// The synchronized start is the latest of `desired_start`, this
    /// resource's next-free tick, and every participant's next-free tick.
    /// The window is appended at the tail of each timeline; joint operations
    /// model shared-bus occupation and arrive in increasing time order, so
    /// they never backfill gaps.
    ///
    /// Group commit is all-or-nothing: validation happens before any
    /// timeline is touched, and once it passes every append is infallible,
    /// so no caller can observe a partially reserved participant set.
    pub fn allocate_joint(
        &mut self,
        desired_start: Tick,
        duration: Tick,
        participants: &mut [&mut Timeline],
    ) -> Result<Tick, ScheduleError> {
        if participants.is_empty() {
            return Err(ScheduleError::EmptyParticipants { id: self.id });
        }
        for (i, participant) in participants.iter().enumerate() {
            if participant.id == self.id
                || participants[..i].iter().any(|p| p.id == participant.id)
            {
                return Err(ScheduleError::DuplicateParticipant {
                    id: participant.id,
                });
            }
        }

        let mut actual_start = desired_start.max(self.next_free());
        for participant in participants.iter() {
            actual_start = actual_start.max(participant.next_free());
        }

        let interval = Interval::new(actual_start, actual_start + duration);
        self.reserved.push(interval);
        for participant in participants.iter_mut() {
            participant.reserved.push(interval);
        }

        log::debug!(
            "resource {}: joint reservation ({}, {}) across {} participant(s)",
            self.id,
            interval.start,
            interval.end,
            participants.len()
        );
        Ok(interval.end)
    }
}
