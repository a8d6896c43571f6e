use crate::consts::{DEFAULT_BITS, DEFAULT_HASHES};
use crate::errors::{BloomError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Filter parameters. JSON form: `{"bits": 10000000, "hashes": 3}`;
/// either field may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_bits")]
    pub bits: u64,
    #[serde(default = "default_hashes")]
    pub hashes: u32,
}

fn default_bits() -> u64 { DEFAULT_BITS }
fn default_hashes() -> u32 { DEFAULT_HASHES }

impl Default for FilterConfig {
    fn default() -> Self {
        Self { bits: DEFAULT_BITS, hashes: DEFAULT_HASHES }
    }
}

impl FilterConfig {
    pub fn new(bits: u64, hashes: u32) -> Self {
        Self { bits, hashes }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: FilterConfig = serde_json::from_str(&s)?;
        Ok(cfg)
    }

    /// Flags given on the command line win over file or default values.
    pub fn with_overrides(mut self, bits: Option<u64>, hashes: Option<u32>) -> Self {
        if let Some(b) = bits { self.bits = b; }
        if let Some(h) = hashes { self.hashes = h; }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.bits == 0 {
            return Err(BloomError::InvalidBits(self.bits));
        }
        if self.hashes == 0 {
            return Err(BloomError::InvalidHashes(self.hashes));
        }
        Ok(())
    }
}
