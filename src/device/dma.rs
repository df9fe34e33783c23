//! DMA transfer timing model.
//!
//! [`TransferTiming`] converts a data volume into a cycle count:
//! a fixed warm-up (bus request plus bus grant) followed by the volume moved
//! at `transfer_rate` per tick, rounded up. The formula has no side effects;
//! a caller turns the returned duration into bus occupation by reserving it
//! on the engine's timeline and on the source and destination memories with
//! [`Timeline::allocate_joint`].

use crate::device::tier_spec;
use crate::device::timeline::Timeline;

/// Timing parameters of a transfer engine.
#[derive(Debug, Clone, Copy)]
pub struct TransferTiming {
    /// Burst (hold the bus) vs. cycle-steal arbitration. Informational; the
    /// cycle formula does not depend on it.
    pub burst_mode: bool,
    /// Volume moved per tick. Must be non-zero.
    pub transfer_rate: u64,
    /// Fixed latency charged before any transfer.
    pub warmup_cycles: u64,
}

impl Default for TransferTiming {
    fn default() -> Self {
        Self {
            burst_mode: tier_spec::DMA_BURST_MODE,
            transfer_rate: tier_spec::DMA_TRANSFER_RATE,
            warmup_cycles: tier_spec::DMA_WARMUP_CYCLES,
        }
    }
}

impl TransferTiming {
    /// Cycles needed to move `volume`: warm-up plus the ceiling of
    /// volume over rate. Pure; reserves nothing.
    pub fn transfer_cycles(&self, volume: u64) -> u64 {
        debug_assert!(self.transfer_rate > 0);
        self.warmup_cycles + volume.div_ceil(self.transfer_rate)
    }
}

/// A modeled DMA engine: occupation timeline plus transfer timing.
#[derive(Debug, Clone)]
pub struct DmaEngine {
    timeline: Timeline,
    timing: TransferTiming,
}

impl DmaEngine {
    /// Create an engine with the stock timing parameters.
    pub fn new(id: u64) -> Self {
        Self::with_timing(id, TransferTiming::default())
    }

    /// Create an engine with explicit timing parameters.
    pub fn with_timing(id: u64, timing: TransferTiming) -> Self {
        Self {
            timeline: Timeline::new(id),
            timing,
        }
    }

    /// Cycles needed to move `volume` through this engine.
    pub fn transfer_cycles(&self, volume: u64) -> u64 {
        self.timing.transfer_cycles(volume)
    }

    /// Timing parameters of this engine.
    pub fn timing(&self) -> &TransferTiming {
        &self.timing
    }

    /// Occupation timeline of this engine.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Mutable occupation timeline, for interval allocation.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::KB;

    #[test]
    fn test_transfer_cycles_whole_multiple_of_rate() {
        let timing = TransferTiming::default();
        let cycles = timing.transfer_cycles(25 * timing.transfer_rate);
        assert_eq!(cycles, timing.warmup_cycles + 25);
    }

    #[test]
    fn test_transfer_cycles_rounds_up() {
        let timing = TransferTiming {
            burst_mode: true,
            transfer_rate: 10,
            warmup_cycles: 2,
        };
        assert_eq!(timing.transfer_cycles(1), 3);
        assert_eq!(timing.transfer_cycles(10), 3);
        assert_eq!(timing.transfer_cycles(11), 4);
    }

    #[test]
    fn test_zero_volume_costs_only_warmup() {
        let timing = TransferTiming::default();
        assert_eq!(timing.transfer_cycles(0), timing.warmup_cycles);
    }

    #[test]
    fn test_stock_engine_parameters() {
        let engine = DmaEngine::new(1);
        assert!(engine.timing().burst_mode);
        assert_eq!(engine.timing().transfer_rate, 10 * KB);
        assert_eq!(engine.timing().warmup_cycles, 2);
    }

    #[test]
    fn test_transfer_cycles_is_pure() {
        let engine = DmaEngine::new(2);
        let first = engine.transfer_cycles(123 * KB);
        for _ in 0..5 {
            assert_eq!(engine.transfer_cycles(123 * KB), first);
        }
        assert_eq!(engine.timeline().reserved().len(), 1);
    }
}
