//! Thread-safe handle around [`Bloom`].
//!
//! `insert` holds the write lock across the saturation check and the bit sets,
//! so check-and-set is atomic per key. `contains` only takes the read lock.
use crate::filter::{Bloom, InsertOutcome};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Debug)]
pub struct SharedBloom {
    inner: Arc<RwLock<Bloom>>,
}

impl SharedBloom {
    pub fn new(filter: Bloom) -> Self {
        Self { inner: Arc::new(RwLock::new(filter)) }
    }

    // Bits only ever go 0 -> 1, so a poisoned guard still sees a valid filter.
    fn read(&self) -> RwLockReadGuard<'_, Bloom> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Bloom> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, key: &[u8]) -> InsertOutcome {
        self.write().insert(key)
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.read().contains(key)
    }

    pub fn m_bits(&self) -> u64 { self.read().m_bits() }
    pub fn k(&self) -> u32 { self.read().k() }
    pub fn inserted(&self) -> u64 { self.read().inserted() }
    pub fn fill_ratio(&self) -> f64 { self.read().fill_ratio() }
    pub fn estimated_fp_rate(&self) -> f64 { self.read().estimated_fp_rate() }

    pub fn snapshot(&self) -> Bloom {
        self.read().clone()
    }
}

impl From<Bloom> for SharedBloom {
    fn from(filter: Bloom) -> Self {
        Self::new(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::theoretical_fp_rate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn parallel_inserts_are_all_visible() {
        let shared = SharedBloom::new(Bloom::new(200_000, 3).unwrap());
        thread::scope(|s| {
            for t in 0..8 {
                let h = shared.clone();
                s.spawn(move || {
                    for i in 0..500 {
                        let _ = h.insert(format!("https://t{t}.example/{i}").as_bytes());
                    }
                });
            }
        });
        for t in 0..8 {
            for i in 0..500 {
                assert!(shared.contains(format!("https://t{t}.example/{i}").as_bytes()));
            }
        }
    }

    #[test]
    fn same_key_from_many_threads_inserts_once() {
        for round in 0..20 {
            let shared = SharedBloom::new(Bloom::new(10_000, 4).unwrap());
            let inserted = AtomicUsize::new(0);
            let key = format!("https://race.example/{round}");
            thread::scope(|s| {
                for _ in 0..16 {
                    s.spawn(|| {
                        if shared.insert(key.as_bytes()) == InsertOutcome::Inserted {
                            inserted.fetch_add(1, Ordering::Relaxed);
                        }
                    });
                }
            });
            assert_eq!(inserted.load(Ordering::Relaxed), 1);
            assert_eq!(shared.inserted(), 1);
        }
    }

    #[test]
    fn snapshot_matches_single_threaded_state() {
        let shared = SharedBloom::from(Bloom::new(1000, 3).unwrap());
        let mut local = Bloom::new(1000, 3).unwrap();
        for key in ["http://a.com", "http://b.com", "http://a.com"] {
            assert_eq!(shared.insert(key.as_bytes()), local.insert(key.as_bytes()));
        }
        assert_eq!(shared.snapshot(), local);
        assert_eq!(shared.fill_ratio(), local.fill_ratio());
        assert!(shared.fill_ratio() > 0.0);
        assert_eq!(shared.estimated_fp_rate(), theoretical_fp_rate(1000, 3, 2));
        assert_eq!(shared.m_bits(), 1000);
        assert_eq!(shared.k(), 3);
    }
}
