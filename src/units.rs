//! Volume unit multipliers.
//!
//! Callers express memory sizes and transfer rates in human units and pass
//! the resulting raw integers into the model. The chain is bit-based and
//! every step is a factor of 1024 — including the byte, which is 1024 bits
//! here, not 8. Downstream calibration constants depend on this coarser
//! convention, so it is part of the model's contract.

/// Base unit: one bit.
pub const BIT: u64 = 1;

/// 1024 bits.
pub const BYTE: u64 = 1024 * BIT;

/// 1024 bytes.
pub const KB: u64 = 1024 * BYTE;

/// 1024 kilobytes.
pub const MB: u64 = 1024 * KB;

/// 1024 megabytes.
pub const GB: u64 = 1024 * MB;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_chain() {
        assert_eq!(BYTE, 1024);
        assert_eq!(KB, 1024 * 1024);
        assert_eq!(MB, 1024 * KB);
        assert_eq!(GB, 1024 * MB);
    }
}
