//! Storage contract for large point arrays.
//!
//! Centroided mass lists can be parked in a [`PointStore`] and fetched back by
//! handle. Whether a store keeps data in memory or spills it to disk is up to
//! the implementation; this crate ships only [`MemoryPointStore`].

use std::collections::BTreeMap;

use crate::error::ProcessingError;
use crate::scan::check_point_arrays;

/// Opaque handle returned by [`PointStore::store`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreHandle(u64);

impl StoreHandle {
    /// Raw handle value
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Read/write contract for point-array storage
pub trait PointStore {
    /// Store parallel arrays and return a handle to them
    fn store(&mut self, mz: &[f64], intensity: &[f32]) -> Result<StoreHandle, ProcessingError>;

    /// Read the arrays stored under `handle`
    fn read(&self, handle: StoreHandle) -> Result<(Vec<f64>, Vec<f32>), ProcessingError>;

    /// Release the arrays stored under `handle`
    fn free(&mut self, handle: StoreHandle) -> Result<(), ProcessingError>;
}

/// Point store keeping every array in memory
#[derive(Debug, Default)]
pub struct MemoryPointStore {
    next_id: u64,
    entries: BTreeMap<u64, (Vec<f64>, Vec<f32>)>,
}

impl MemoryPointStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PointStore for MemoryPointStore {
    fn store(&mut self, mz: &[f64], intensity: &[f32]) -> Result<StoreHandle, ProcessingError> {
        check_point_arrays(mz, intensity)?;
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, (mz.to_vec(), intensity.to_vec()));
        Ok(StoreHandle(id))
    }

    fn read(&self, handle: StoreHandle) -> Result<(Vec<f64>, Vec<f32>), ProcessingError> {
        self.entries
            .get(&handle.0)
            .cloned()
            .ok_or(ProcessingError::UnknownHandle(handle.0))
    }

    fn free(&mut self, handle: StoreHandle) -> Result<(), ProcessingError> {
        self.entries
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(ProcessingError::UnknownHandle(handle.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_read_free() {
        let mut store = MemoryPointStore::new();
        let a = store.store(&[100.0, 200.0], &[1.0, 2.0]).unwrap();
        let b = store.store(&[300.0], &[3.0]).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        let (mz, intensity) = store.read(a).unwrap();
        assert_eq!(mz, vec![100.0, 200.0]);
        assert_eq!(intensity, vec![1.0, 2.0]);

        store.free(a).unwrap();
        assert_eq!(store.read(a), Err(ProcessingError::UnknownHandle(a.id())));
        assert!(store.free(a).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_rejects_mismatched_arrays() {
        let mut store = MemoryPointStore::new();
        assert!(store.store(&[1.0], &[]).is_err());
        assert!(store.is_empty());
    }
}
