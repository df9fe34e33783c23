//! Calibration constants for the modeled component tiers.
//!
//! These are the fixed parameter sets behind the stock DMA engine and the
//! SRAM/DRAM memory tiers. They are coarse, deliberately simple numbers
//! meant to rank on-chip against off-chip memory, not to reproduce any one
//! part's datasheet. Per-deployment calibration goes through
//! [`crate::config::CostModelConfig`] instead of editing these.

use crate::units::{KB, MB};

// ============================================================================
// DMA engine defaults
// ============================================================================

/// Stock DMA arbitration: burst mode (hold the bus for the whole transfer)
/// rather than cycle stealing. Informational; the cycle formula ignores it.
pub const DMA_BURST_MODE: bool = true;

/// Volume moved per tick by the stock DMA engine.
pub const DMA_TRANSFER_RATE: u64 = 10 * KB;

/// Fixed latency before any transfer: bus request plus bus grant.
pub const DMA_WARMUP_CYCLES: u64 = 2;

// ============================================================================
// SRAM tier (fast on-chip memory)
// ============================================================================

/// Nominal volume handled per access unit for the SRAM tier.
pub const SRAM_DEFAULT_ACCESS_VOLUME: u64 = 10 * KB;

/// Cycles charged per access unit for the SRAM tier.
pub const SRAM_CYCLES_PER_ACCESS_UNIT: u64 = 5;

/// Floor on the per-access cycle count for the SRAM tier.
pub const SRAM_MIN_CYCLES: u64 = 2;

// ============================================================================
// DRAM tier (large off-chip memory)
// ============================================================================

/// Nominal volume handled per access unit for the DRAM tier.
pub const DRAM_DEFAULT_ACCESS_VOLUME: u64 = 512 * MB;

/// Cycles charged per access unit for the DRAM tier.
pub const DRAM_CYCLES_PER_ACCESS_UNIT: u64 = 40;

/// Floor on the per-access cycle count for the DRAM tier.
pub const DRAM_MIN_CYCLES: u64 = 5;
