//! Calibration configuration for the cost model.
//!
//! Every timing constant the model ships with can be overridden from a TOML
//! file, so a simulation driver can calibrate against measured hardware
//! without recompiling. Configuration is loaded from multiple sources in
//! priority order:
//!
//! 1. Environment variable `ACCEL_COST_MODEL_CONFIG` (path to a file)
//! 2. Project-local config file (`./accel-cost-model.toml`)
//! 3. User config file (`~/.config/accel-cost-model/config.toml`)
//! 4. Built-in defaults (see [`crate::device::tier_spec`])
//!
//! # Config File Format
//!
//! ```toml
//! # accel-cost-model.toml
//!
//! [dma]
//! transfer_rate = 10485760   # volume per tick
//! warmup_cycles = 2
//!
//! [sram]
//! cycles_per_access_unit = 5
//! min_cycles = 2
//! ```
//!
//! All sections and fields are optional; anything absent keeps its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::device::dma::TransferTiming;
use crate::device::memory::{DataType, MemoryParams, PortCount};
use crate::device::tier_spec;

/// DMA timing overrides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DmaSection {
    pub burst_mode: bool,
    pub transfer_rate: u64,
    pub warmup_cycles: u64,
}

impl Default for DmaSection {
    fn default() -> Self {
        Self {
            burst_mode: tier_spec::DMA_BURST_MODE,
            transfer_rate: tier_spec::DMA_TRANSFER_RATE,
            warmup_cycles: tier_spec::DMA_WARMUP_CYCLES,
        }
    }
}

/// Per-tier memory timing overrides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MemoryTierSection {
    pub default_access_volume: u64,
    pub cycles_per_access_unit: u64,
    pub min_cycles: u64,
}

impl MemoryTierSection {
    fn sram_defaults() -> Self {
        Self {
            default_access_volume: tier_spec::SRAM_DEFAULT_ACCESS_VOLUME,
            cycles_per_access_unit: tier_spec::SRAM_CYCLES_PER_ACCESS_UNIT,
            min_cycles: tier_spec::SRAM_MIN_CYCLES,
        }
    }

    fn dram_defaults() -> Self {
        Self {
            default_access_volume: tier_spec::DRAM_DEFAULT_ACCESS_VOLUME,
            cycles_per_access_unit: tier_spec::DRAM_CYCLES_PER_ACCESS_UNIT,
            min_cycles: tier_spec::DRAM_MIN_CYCLES,
        }
    }
}

impl Default for MemoryTierSection {
    fn default() -> Self {
        Self::sram_defaults()
    }
}

/// Cost-model calibration values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CostModelConfig {
    pub dma: DmaSection,
    pub sram: MemoryTierSection,
    pub dram: MemoryTierSection,
}

impl Default for CostModelConfig {
    fn default() -> Self {
        Self {
            dma: DmaSection::default(),
            sram: MemoryTierSection::sram_defaults(),
            dram: MemoryTierSection::dram_defaults(),
        }
    }
}

impl CostModelConfig {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. File named by `ACCEL_COST_MODEL_CONFIG`
    /// 2. Project-local `accel-cost-model.toml`
    /// 3. User config `~/.config/accel-cost-model/config.toml`
    /// 4. Defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("ACCEL_COST_MODEL_CONFIG") {
            log::info!("Using config path from environment: {}", path);
            if let Some(config) = Self::load_from_file(Path::new(&path)) {
                return config;
            }
        }

        if let Some(config) = Self::load_from_file(Path::new("accel-cost-model.toml")) {
            return config;
        }

        if let Some(config) = Self::load_user_config() {
            return config;
        }

        Self::default()
    }

    /// Load configuration from ~/.config/accel-cost-model/config.toml
    fn load_user_config() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("accel-cost-model").join("config.toml");
        Self::load_from_file(&config_path)
    }

    /// Load configuration from a specific file.
    ///
    /// Returns `None` (and logs) when the file is missing, unreadable, or
    /// fails to parse; callers fall through to the next source.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Transfer timing carrying this configuration's DMA section.
    ///
    /// A configured transfer rate of zero would divide by zero in the cycle
    /// formula; it is rejected here with a warning and the stock rate is
    /// used instead, the same way unreadable config files fall through to
    /// the next source.
    pub fn transfer_timing(&self) -> TransferTiming {
        let transfer_rate = if self.dma.transfer_rate == 0 {
            log::warn!(
                "Configured DMA transfer rate of 0 is unusable; falling back to {}",
                tier_spec::DMA_TRANSFER_RATE
            );
            tier_spec::DMA_TRANSFER_RATE
        } else {
            self.dma.transfer_rate
        };
        TransferTiming {
            burst_mode: self.dma.burst_mode,
            transfer_rate,
            warmup_cycles: self.dma.warmup_cycles,
        }
    }

    /// SRAM-tier memory parameters with this configuration's overrides.
    pub fn sram_params(&self, line_count: u64, data_type: DataType) -> MemoryParams {
        Self::tier_params(&self.sram, line_count, data_type)
    }

    /// DRAM-tier memory parameters with this configuration's overrides.
    pub fn dram_params(&self, line_count: u64, data_type: DataType) -> MemoryParams {
        Self::tier_params(&self.dram, line_count, data_type)
    }

    fn tier_params(
        tier: &MemoryTierSection,
        line_count: u64,
        data_type: DataType,
    ) -> MemoryParams {
        MemoryParams {
            read_ports: PortCount::Unlimited,
            write_ports: PortCount::Unlimited,
            default_access_volume: tier.default_access_volume,
            line_count,
            data_type,
            cycles_per_access_unit: tier.cycles_per_access_unit,
            min_cycles: tier.min_cycles,
        }
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# accel-cost-model configuration
# Place this file at ~/.config/accel-cost-model/config.toml or
# ./accel-cost-model.toml. All sections and fields are optional.

[dma]
# burst_mode = true
# transfer_rate = 10485760
# warmup_cycles = 2

[sram]
# default_access_volume = 10485760
# cycles_per_access_unit = 5
# min_cycles = 2

[dram]
# default_access_volume = 549755813888
# cycles_per_access_unit = 40
# min_cycles = 5
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::memory::MemoryBank;
    use crate::units::{KB, MB};

    #[test]
    fn test_defaults_match_tier_constants() {
        let config = CostModelConfig::default();
        assert_eq!(config.dma.transfer_rate, 10 * KB);
        assert_eq!(config.dma.warmup_cycles, 2);
        assert_eq!(config.sram.default_access_volume, 10 * KB);
        assert_eq!(config.dram.default_access_volume, 512 * MB);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CostModelConfig = toml::from_str(
            r#"
            [dma]
            warmup_cycles = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.dma.warmup_cycles, 9);
        // Untouched fields keep their defaults.
        assert_eq!(config.dma.transfer_rate, 10 * KB);
        assert_eq!(config.sram, MemoryTierSection::sram_defaults());
        assert_eq!(config.dram, MemoryTierSection::dram_defaults());
    }

    #[test]
    fn test_sample_config_parses() {
        let sample = CostModelConfig::sample_config();
        let config: CostModelConfig = toml::from_str(&sample).expect("sample config should parse");
        assert_eq!(config, CostModelConfig::default());
    }

    #[test]
    fn test_transfer_timing_from_config() {
        let config: CostModelConfig = toml::from_str(
            r#"
            [dma]
            transfer_rate = 100
            warmup_cycles = 1
            "#,
        )
        .unwrap();
        let timing = config.transfer_timing();
        assert_eq!(timing.transfer_cycles(250), 1 + 3);
    }

    #[test]
    fn test_zero_transfer_rate_falls_back_to_default() {
        let config: CostModelConfig = toml::from_str(
            r#"
            [dma]
            transfer_rate = 0
            "#,
        )
        .unwrap();
        let timing = config.transfer_timing();
        assert_eq!(timing.transfer_rate, 10 * KB);
        // The formula stays usable instead of dividing by zero.
        assert_eq!(timing.transfer_cycles(100), timing.warmup_cycles + 1);
    }

    #[test]
    fn test_tier_params_feed_memory_bank() {
        let config: CostModelConfig = toml::from_str(
            r#"
            [sram]
            default_access_volume = 1024
            cycles_per_access_unit = 7
            min_cycles = 3
            "#,
        )
        .unwrap();
        let bank = MemoryBank::new(1, config.sram_params(1024, DataType::F32)).unwrap();
        // round(43 * 1024 / 1024) = 43 units at 7 cycles each.
        assert_eq!(bank.base_access_cycles(), 43 * 7);
    }
}
