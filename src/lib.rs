//! accel-cost-model library
//!
//! Discrete-event cost model for hardware accelerator components. Each
//! modeled component (generic device, DMA engine, memory bank) owns a
//! timeline of reserved time intervals; the library decides where in
//! simulated time an operation of a given duration can run without
//! colliding with already-reserved work, and supplies the timing formulas
//! that turn data volumes and line counts into durations.

pub mod config;
pub mod device;
pub mod units;
