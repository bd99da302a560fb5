//! Demo simulation configuration, loaded from TOML.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Parameters for the headless chain-reaction scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Seed for every deterministic draw in the run.
    pub world_seed: u64,
    /// Fuse length for normally ignited squibs, in ticks.
    pub base_fuse: u32,
    /// Blast reach when destroying squib blocks, in blocks.
    pub blast_radius: f64,
    /// How many squib blocks the scenario places in a row.
    pub charge_count: u32,
    /// Grid distance between charges in the row.
    pub charge_spacing: i32,
    /// Safety cap on simulation length.
    pub max_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_seed: 1337,
            base_fuse: 80,
            blast_radius: 2.0,
            charge_count: 5,
            charge_spacing: 1,
            max_ticks: 2400,
        }
    }
}

impl SimConfig {
    /// Load a config file, falling back to defaults for omitted keys.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self =
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the scenario cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.charge_count > 0, "charge_count must be at least 1");
        ensure!(self.charge_spacing > 0, "charge_spacing must be at least 1");
        ensure!(
            self.blast_radius > 0.0,
            "blast_radius must be positive, got {}",
            self.blast_radius
        );
        if self.charge_spacing as f64 > self.blast_radius {
            tracing::warn!(
                spacing = self.charge_spacing,
                radius = self.blast_radius,
                "charges are spaced wider than the blast radius; the chain will not propagate"
            );
        }
        Ok(())
    }
}
