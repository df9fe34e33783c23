//! Memory timing model.
//!
//! A [`MemoryBank`] owns an occupation [`Timeline`] and derives its timing
//! and geometry once, at construction, from port counts, line geometry, and
//! a data-type tag:
//!
//! - each stored line carries a valid bit, an address field wide enough to
//!   name every line, and the datum itself;
//! - total storage volume is the per-line width times the line count;
//! - the base per-access cycle count charges `cycles_per_access_unit` for
//!   every `default_access_volume` worth of storage, with a configurable
//!   floor.
//!
//! [`MemoryBank::access_cycles`] is a pure function of those derived values;
//! reserving the resulting duration on the bank's timeline is the caller's
//! job (see [`Timeline::allocate`] and [`Timeline::allocate_joint`]).

use thiserror::Error;

use crate::device::timeline::Timeline;

/// Parallelism limit on a memory port group.
///
/// An explicit tagged value instead of a reserved integer, so "no limit"
/// cannot be confused with a real port count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCount {
    /// No parallelism constraint; accesses never queue on this port group.
    Unlimited,
    /// At most this many lines per cycle group. Must be non-zero.
    Bounded(u64),
}

/// Direction of a memory access. Closed enumeration; every operation is one
/// or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// Data-type tag determining the stored datum width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    F32,
    F16,
    F8,
    F4,
    /// Any unrecognized tag. Falls back to a 1-bit datum rather than
    /// failing.
    Other,
}

impl DataType {
    /// Resolve a textual tag by exact match. Unknown tags map to
    /// [`DataType::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "f32" => Self::F32,
            "f16" => Self::F16,
            "f8" => Self::F8,
            "f4" => Self::F4,
            _ => Self::Other,
        }
    }

    /// Bits occupied by one datum of this type.
    ///
    /// `F16` deliberately reports the same width as `F32`. That matches the
    /// calibrated numbers this model was validated against; it looks like an
    /// upstream copy-paste and is tracked as an open question, but changing
    /// it here would silently shift every derived cycle count.
    pub fn bits(&self) -> u64 {
        match self {
            Self::F32 => 32,
            Self::F16 => 32,
            Self::F8 => 8,
            Self::F4 => 4,
            Self::Other => 1,
        }
    }
}

/// Construction parameters for a [`MemoryBank`].
#[derive(Debug, Clone)]
pub struct MemoryParams {
    pub read_ports: PortCount,
    pub write_ports: PortCount,
    /// Nominal volume handled per access unit; denominator of the base
    /// cycle formula. Must be non-zero.
    pub default_access_volume: u64,
    /// Number of storage lines. Zero is tolerated (address width is coerced
    /// to 1 and the storage volume becomes zero).
    pub line_count: u64,
    pub data_type: DataType,
    /// Cycles charged per access unit of storage volume.
    pub cycles_per_access_unit: u64,
    /// Floor on the derived base cycle count.
    pub min_cycles: u64,
}

/// Rejected memory configurations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A zero access volume would divide by zero in the base cycle formula.
    #[error("memory {id}: default access volume must be non-zero")]
    ZeroAccessVolume { id: u64 },

    /// `PortCount::Bounded(0)` would divide by zero in the per-access
    /// formula; a memory with no ports at all cannot be accessed.
    #[error("memory {id}: bounded port count must be non-zero")]
    ZeroPortCount { id: u64 },

    /// Line count times per-line width exceeds what the volume arithmetic
    /// can represent; derived cycle counts would silently wrap.
    #[error("memory {id}: total storage volume overflows u64")]
    StorageVolumeOverflow { id: u64 },
}

/// A modeled memory bank: occupation timeline plus derived timing geometry.
#[derive(Debug, Clone)]
pub struct MemoryBank {
    timeline: Timeline,
    params: MemoryParams,
    address_width: u64,
    total_line_width: u64,
    total_storage_volume: u64,
    base_access_cycles: u64,
}

/// `ceil(log2(n))` for `n > 0`. Well-defined over the whole `u64` range,
/// including values past the largest representable power of two.
fn ceil_log2(n: u64) -> u64 {
    if n <= 1 {
        0
    } else {
        u64::from(u64::BITS - (n - 1).leading_zeros())
    }
}

/// Nearest-integer division, rounding half up.
fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

impl MemoryBank {
    /// Build a memory bank, deriving geometry and base access cycles
    /// eagerly. Fails fast on configurations that would divide by zero
    /// later instead of letting garbage cycle counts propagate.
    pub fn new(id: u64, params: MemoryParams) -> Result<Self, GeometryError> {
        if params.default_access_volume == 0 {
            return Err(GeometryError::ZeroAccessVolume { id });
        }
        if params.read_ports == PortCount::Bounded(0)
            || params.write_ports == PortCount::Bounded(0)
        {
            return Err(GeometryError::ZeroPortCount { id });
        }

        let address_width = if params.line_count > 0 {
            ceil_log2(params.line_count)
        } else {
            1
        };
        // Valid bit + address field + datum.
        let total_line_width = 1 + address_width + params.data_type.bits();
        let total_storage_volume = total_line_width
            .checked_mul(params.line_count)
            .ok_or(GeometryError::StorageVolumeOverflow { id })?;
        let access_units = rounded_div(total_storage_volume, params.default_access_volume);
        let base_access_cycles =
            (params.cycles_per_access_unit * access_units).max(params.min_cycles);

        log::debug!(
            "memory {}: line width {} bits, storage volume {} bits, base access cycles {}",
            id,
            total_line_width,
            total_storage_volume,
            base_access_cycles
        );

        Ok(Self {
            timeline: Timeline::new(id),
            params,
            address_width,
            total_line_width,
            total_storage_volume,
            base_access_cycles,
        })
    }

    /// Cycles needed to read or write `lines_touched` lines.
    ///
    /// An unlimited port group services any number of lines in the base
    /// cycle count. A bounded one queues accesses in port-sized groups.
    ///
    /// The denominator is the read-port count on both paths. That mirrors
    /// the calibrated model this was validated against (most likely an
    /// upstream slip, tracked as an open question); switching the write path
    /// to `write_ports` would silently change existing estimates.
    pub fn access_cycles(&self, lines_touched: u64, kind: AccessKind) -> u64 {
        let gating = match kind {
            AccessKind::Read => self.params.read_ports,
            AccessKind::Write => self.params.write_ports,
        };
        if gating == PortCount::Unlimited {
            return self.base_access_cycles;
        }
        match self.params.read_ports {
            PortCount::Bounded(ports) => {
                lines_touched.div_ceil(ports) * self.base_access_cycles
            }
            // Bounded writes against unlimited reads leave no meaningful
            // denominator; fall back to the base count.
            PortCount::Unlimited => self.base_access_cycles,
        }
    }

    /// Occupation timeline of this bank.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Mutable occupation timeline, for interval allocation.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Construction parameters this bank was built from.
    pub fn params(&self) -> &MemoryParams {
        &self.params
    }

    /// Bits needed to address every line.
    pub fn address_width(&self) -> u64 {
        self.address_width
    }

    /// Bits per stored line: valid bit + address field + datum.
    pub fn total_line_width(&self) -> u64 {
        self.total_line_width
    }

    /// Total storage volume in bits.
    pub fn total_storage_volume(&self) -> u64 {
        self.total_storage_volume
    }

    /// Derived base per-access cycle count.
    pub fn base_access_cycles(&self) -> u64 {
        self.base_access_cycles
    }
}
