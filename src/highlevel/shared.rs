//! Lock-guarded registry handle for hosts serving concurrent requests.
//!
//! Prefer one [`PointRegistry`] per request. When several requests must see
//! the same registry, wrap it in a [`SharedRegistry`]: readers run in
//! parallel, writers are exclusive, and [`reset_with`](SharedRegistry::reset_with)
//! clears and repopulates under a single write lock so no reader ever
//! observes the half-rebuilt state.

use crate::error::{FaceForgeError, Result};
use crate::kernel::PointRegistry;
use std::sync::{Arc, RwLock};

#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<PointRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: PointRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Run `f` with shared access.
    pub fn read<T>(&self, f: impl FnOnce(&PointRegistry) -> T) -> Result<T> {
        let guard = self.inner.read().map_err(|_| FaceForgeError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive access.
    pub fn write<T>(&self, f: impl FnOnce(&mut PointRegistry) -> T) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| FaceForgeError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// Clear the registry, then let `populate` rebuild it, atomically.
    pub fn reset_with<T>(&self, populate: impl FnOnce(&mut PointRegistry) -> T) -> Result<T> {
        self.write(|registry| {
            registry.clear();
            populate(registry)
        })
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<PointRegistry> {
        self.read(PointRegistry::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::SamplingMode;
    use std::thread;

    #[test]
    fn test_reset_with_is_atomic_for_readers() {
        let shared = SharedRegistry::new();
        shared
            .reset_with(|r| {
                r.add_point("a", Some(vec![1.0, 1.0]), Some([0.0, 0.0]));
                r.add_point("b", Some(vec![1.0, 1.0]), Some([1.0, 1.0]));
            })
            .unwrap();

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    shared
                        .reset_with(|r| {
                            let v = f64::from(i);
                            r.add_point("a", Some(vec![v, v]), Some([0.0, 0.0]));
                            r.add_point("b", Some(vec![v, v]), Some([1.0, 1.0]));
                        })
                        .unwrap();
                }
            })
        };

        for _ in 0..200 {
            let (len, sample) = shared
                .read(|r| (r.len(), r.sample([0.5, 0.5], SamplingMode::Distance)))
                .unwrap();
            assert_eq!(len, 2, "reader observed a partially rebuilt registry");
            let sample = sample.unwrap().unwrap();
            assert!((sample[0] - sample[1]).abs() < 1e-12);
        }

        writer.join().unwrap();
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedRegistry::new();
        shared.write(|r| r.add_point("a", None, None)).unwrap();
        let snap = shared.snapshot().unwrap();
        shared.write(|r| r.clear()).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(shared.read(|r| r.len()).unwrap(), 0);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let shared = SharedRegistry::new();
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            poisoner
                .write(|_| panic!("writer died"))
                .ok();
        })
        .join();
        assert!(matches!(shared.read(|r| r.len()), Err(FaceForgeError::LockPoisoned)));
    }
}
