//! Usage: Mutex extension trait that recovers from poisoned locks.

use std::sync::{Mutex, MutexGuard};

pub trait MutexExt<T> {
    /// Lock the mutex; on poison, recover the inner data and log the event.
    fn lock_or_recover(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    #[track_caller]
    fn lock_or_recover(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                let loc = std::panic::Location::caller();
                tracing::error!(
                    mutex_type = std::any::type_name::<T>(),
                    file = loc.file(),
                    line = loc.line(),
                    "Mutex poisoned (线程 panic 导致)，已自动恢复"
                );
                poisoned.into_inner()
            }
        }
    }
}
