//! Insert-only Bloom filter over a fixed bit vector.
//!
//! Probe `i` of a key is `blake3(key || u32_le(i))` reduced modulo `m`, so every
//! slot draws from its own digest rather than a split or derived one.
use crate::config::FilterConfig;
use crate::errors::{BloomError, Result};

/// Result of [`Bloom::insert`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// At least one probe bit was clear and all `k` are now set.
    Inserted,
    /// Every probe bit was already set; the filter was left untouched.
    Saturated,
}

impl InsertOutcome {
    pub fn is_saturated(self) -> bool {
        matches!(self, InsertOutcome::Saturated)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bloom {
    m_bits: u64,
    k: u32,
    bits: Vec<u8>,
    inserted: u64,
}

impl Bloom {
    pub fn new(m_bits: u64, k: u32) -> Result<Self> {
        if m_bits == 0 {
            return Err(BloomError::InvalidBits(m_bits));
        }
        if k == 0 {
            return Err(BloomError::InvalidHashes(k));
        }
        let bytes = usize::try_from(m_bits.div_ceil(8)).map_err(|_| BloomError::InvalidBits(m_bits))?;
        let mut bits = Vec::new();
        bits.try_reserve_exact(bytes).map_err(|_| BloomError::InvalidBits(m_bits))?;
        bits.resize(bytes, 0u8);
        Ok(Self { m_bits, k, bits, inserted: 0 })
    }

    pub fn from_config(cfg: &FilterConfig) -> Result<Self> {
        Self::new(cfg.bits, cfg.hashes)
    }

    pub fn m_bits(&self) -> u64 { self.m_bits }
    pub fn k(&self) -> u32 { self.k }
    pub fn as_bytes(&self) -> &[u8] { &self.bits }

    /// Number of inserts that were not reported saturated.
    pub fn inserted(&self) -> u64 { self.inserted }

    /// The `k` probe positions for `key`, in slot order. Values may repeat.
    pub fn indices(&self, key: &[u8]) -> Vec<u64> {
        self.probes(key).collect()
    }

    #[inline]
    fn probes<'a>(&self, key: &'a [u8]) -> impl Iterator<Item = u64> + 'a {
        let m = self.m_bits;
        (0..self.k).map(move |slot| slot_digest(key, slot) % m)
    }

    #[inline]
    fn bit(&self, i: u64) -> bool {
        let idx = (i / 8) as usize; let off = (i & 7) as u8;
        (self.bits[idx] & (1u8 << off)) != 0
    }

    #[inline]
    fn set(&mut self, i: u64) {
        let idx = (i / 8) as usize; let off = (i & 7) as u8;
        self.bits[idx] |= 1u8 << off;
    }

    /// Sets the probe bits of `key` unless all of them are already set.
    ///
    /// The all-bits-set case is a per-key heuristic for a full filter: it also
    /// fires for a repeated key or for a new key whose probes all collide.
    pub fn insert(&mut self, key: &[u8]) -> InsertOutcome {
        let probes = self.indices(key);
        if probes.iter().all(|&i| self.bit(i)) {
            return InsertOutcome::Saturated;
        }
        for i in probes {
            self.set(i);
        }
        self.inserted += 1;
        InsertOutcome::Inserted
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.probes(key).all(|i| self.bit(i))
    }

    pub fn count_ones(&self) -> u64 {
        self.bits.iter().map(|b| b.count_ones() as u64).sum()
    }

    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.m_bits as f64
    }

    /// Expected false-positive rate after [`Bloom::inserted`] insertions.
    pub fn estimated_fp_rate(&self) -> f64 {
        theoretical_fp_rate(self.m_bits, self.k, self.inserted)
    }
}

/// `(1 - e^(-k·n/m))^k`
pub fn theoretical_fp_rate(m_bits: u64, k: u32, n: u64) -> f64 {
    if m_bits == 0 {
        return 1.0;
    }
    let exp = -(k as f64) * (n as f64) / (m_bits as f64);
    (1.0 - exp.exp()).powi(k as i32)
}

#[inline]
fn slot_digest(key: &[u8], slot: u32) -> u64 {
    let mut h = blake3::Hasher::new();
    h.update(key);
    h.update(&slot.to_le_bytes());
    let dig = h.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&dig.as_bytes()[0..8]);
    u64::from_le_bytes(head)
}
