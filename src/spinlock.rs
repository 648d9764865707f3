// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
A reader-writer spinlock holding a single cloneable value.

On the wasm main thread, we can't necessarily block on a mutex, so the global sink
slot spins instead.  Critical sections are one clone or one swap.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

const UNLOCKED: u8 = 0;
//up to 254 readers, or 1 writer (val = 255)
const LOCKED_WRITE: u8 = u8::MAX;

pub(crate) struct Spinlock<T> {
    data: UnsafeCell<T>,
    state: AtomicU8,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send + Sync> Sync for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub(crate) const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            state: AtomicU8::new(UNLOCKED),
        }
    }

    fn acquire_read(&self) -> ReadGuard<'_, T> {
        while self
            .state
            .fetch_update(Acquire, Relaxed, |v| (v < LOCKED_WRITE - 1).then_some(v + 1))
            .is_err()
        {
            std::hint::spin_loop();
        }
        ReadGuard(self)
    }

    fn acquire_write(&self) -> WriteGuard<'_, T> {
        while self
            .state
            .compare_exchange_weak(UNLOCKED, LOCKED_WRITE, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        WriteGuard(self)
    }

    /// Replaces the value, returning the previous one.
    pub(crate) fn replace(&self, value: T) -> T {
        let _guard = self.acquire_write();
        // SAFETY: the write guard gives exclusive access
        unsafe { std::mem::replace(&mut *self.data.get(), value) }
    }
}

impl<T: Clone> Spinlock<T> {
    /// Clones the current value out.
    pub(crate) fn load(&self) -> T {
        let _guard = self.acquire_read();
        // SAFETY: the read guard excludes writers
        unsafe { (*self.data.get()).clone() }
    }
}

// guards release on drop so a panicking clone cannot leave the lock held
struct ReadGuard<'a, T>(&'a Spinlock<T>);

impl<T> Drop for ReadGuard<'_, T> {
    fn drop(&mut self) {
        self.0.state.fetch_sub(1, Release);
    }
}

struct WriteGuard<'a, T>(&'a Spinlock<T>);

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        self.0.state.store(UNLOCKED, Release);
    }
}
