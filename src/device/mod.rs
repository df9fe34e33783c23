//! Hardware component models.
//!
//! This module provides the timing primitives the cost estimator is built
//! from:
//! - Reserved-interval timelines, one per modeled resource
//! - DMA engines with a volume-to-cycles transfer formula
//! - Memory banks with derived geometry and per-access cycle costs
//! - Stock SRAM/DRAM tier presets
//!
//! # Scheduling Flow
//!
//! A driver constructs one component per simulated hardware unit, asks the
//! timing formulas for an operation's duration, then reserves that duration
//! on the component's timeline:
//!
//! ```
//! use accel_cost_model::device::{DataType, DmaEngine, MemoryBank};
//!
//! let mut dma = DmaEngine::new(0);
//! let mut dram = MemoryBank::dram(1, 4096, DataType::F32).unwrap();
//! let mut sram = MemoryBank::sram(2, 4096, DataType::F32).unwrap();
//!
//! // Move 50 rate-units of data from DRAM into SRAM: the DMA engine and
//! // both memories are busy for the whole transfer.
//! let cycles = dma.transfer_cycles(50 * dma.timing().transfer_rate);
//! let done = dma
//!     .timeline_mut()
//!     .allocate_joint(0, cycles, &mut [dram.timeline_mut(), sram.timeline_mut()])
//!     .unwrap();
//!
//! // A compute block reading the landed data starts after the transfer.
//! let read = sram.access_cycles(128, accel_cost_model::device::AccessKind::Read);
//! let finished = sram.timeline_mut().allocate(done + 1, read, None);
//! assert!(finished > done);
//! ```

pub mod dma;
pub mod memory;
pub mod presets;
pub mod tier_spec;
pub mod timeline;

pub use dma::{DmaEngine, TransferTiming};
pub use memory::{AccessKind, DataType, GeometryError, MemoryBank, MemoryParams, PortCount};
pub use timeline::{Interval, ScheduleError, Tick, Timeline};
