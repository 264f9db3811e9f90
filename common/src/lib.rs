pub mod dashboard;
pub mod readings;
pub mod session;

/// Convenience helper for passing the last of a value between threads. For example from a worker
/// thread performing a network request to the UI thread applying the result.
pub struct ValueStore<T>(std::sync::Arc<std::sync::Mutex<Option<T>>>);

// Manual impls so `T` needs neither `Clone` nor `Default`.
impl<T> Clone for ValueStore<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for ValueStore<T> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<T> ValueStore<T> {
    /// Sets `value` as the last value.
    ///
    /// # Panics
    ///
    /// If the locking the interally used mutex fails.
    pub fn set(&self, value: T) {
        let mut data = self.0.lock().unwrap();
        let _ = data.insert(value);
    }

    /// Takes the stored value, leaving the store empty.
    ///
    /// # Panics
    ///
    /// If the locking of the mutex fails
    pub fn take(&self) -> Option<T> {
        let mut data = self.0.lock().unwrap();
        data.take()
    }
}
