//! Stock memory tiers.
//!
//! Two fixed configurations of [`MemoryBank`]: a fast on-chip SRAM tier and
//! a large off-chip DRAM tier. Both leave port counts unlimited; they differ
//! in access-volume budget and per-unit cycle cost (see
//! [`crate::device::tier_spec`]).

use crate::device::memory::{DataType, GeometryError, MemoryBank, MemoryParams, PortCount};
use crate::device::tier_spec;

impl MemoryBank {
    /// On-chip SRAM tier: unlimited ports, small access-volume budget, fast
    /// per-unit cycles.
    pub fn sram(id: u64, line_count: u64, data_type: DataType) -> Result<Self, GeometryError> {
        Self::new(
            id,
            MemoryParams {
                read_ports: PortCount::Unlimited,
                write_ports: PortCount::Unlimited,
                default_access_volume: tier_spec::SRAM_DEFAULT_ACCESS_VOLUME,
                line_count,
                data_type,
                cycles_per_access_unit: tier_spec::SRAM_CYCLES_PER_ACCESS_UNIT,
                min_cycles: tier_spec::SRAM_MIN_CYCLES,
            },
        )
    }

    /// Off-chip DRAM tier: unlimited ports, large access-volume budget, slow
    /// per-unit cycles.
    pub fn dram(id: u64, line_count: u64, data_type: DataType) -> Result<Self, GeometryError> {
        Self::new(
            id,
            MemoryParams {
                read_ports: PortCount::Unlimited,
                write_ports: PortCount::Unlimited,
                default_access_volume: tier_spec::DRAM_DEFAULT_ACCESS_VOLUME,
                line_count,
                data_type,
                cycles_per_access_unit: tier_spec::DRAM_CYCLES_PER_ACCESS_UNIT,
                min_cycles: tier_spec::DRAM_MIN_CYCLES,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::memory::AccessKind;

    #[test]
    fn test_sram_ports_are_unlimited() {
        let sram = MemoryBank::sram(1, 1024, DataType::F32).unwrap();
        assert_eq!(sram.params().read_ports, PortCount::Unlimited);
        assert_eq!(sram.params().write_ports, PortCount::Unlimited);
        // Unlimited ports: lines touched never changes the cost.
        assert_eq!(
            sram.access_cycles(1, AccessKind::Read),
            sram.access_cycles(1_000_000, AccessKind::Write)
        );
    }

    #[test]
    fn test_tier_constants_differ() {
        let sram = MemoryBank::sram(2, 1024, DataType::F32).unwrap();
        let dram = MemoryBank::dram(3, 1024, DataType::F32).unwrap();
        assert_eq!(sram.params().cycles_per_access_unit, 5);
        assert_eq!(sram.params().min_cycles, 2);
        assert_eq!(dram.params().cycles_per_access_unit, 40);
        assert_eq!(dram.params().min_cycles, 5);
        assert!(dram.params().default_access_volume > sram.params().default_access_volume);
    }

    #[test]
    fn test_small_bank_hits_cycle_floor() {
        // 1024 f32 lines are tiny next to either tier's access-volume
        // budget, so both land on their min-cycle floor.
        let sram = MemoryBank::sram(4, 1024, DataType::F32).unwrap();
        let dram = MemoryBank::dram(5, 1024, DataType::F32).unwrap();
        assert_eq!(sram.base_access_cycles(), 2);
        assert_eq!(dram.base_access_cycles(), 5);
    }

    #[test]
    fn test_large_sram_scales_past_floor() {
        // 2^24 f32 lines: 1 + 24 + 32 = 57 bits per line, which is several
        // SRAM access units worth of storage.
        let sram = MemoryBank::sram(6, 1 << 24, DataType::F32).unwrap();
        assert!(sram.base_access_cycles() > 2);
        assert_eq!(sram.base_access_cycles() % 5, 0);
    }
}
