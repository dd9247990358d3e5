#[cfg(not(loom))]
pub(crate) mod export {
  pub(crate) mod sync {
    pub(crate) use parking_lot::Mutex;
    pub(crate) use parking_lot::MutexGuard;
    pub(crate) use spin::Mutex as SpinMutex;
    pub(crate) use spin::MutexGuard as SpinMutexGuard;

    pub(crate) mod atomic {
      pub(crate) use std::sync::atomic::AtomicBool;
      pub(crate) use std::sync::atomic::AtomicU8;
      pub(crate) use std::sync::atomic::AtomicU64;
      pub(crate) use std::sync::atomic::AtomicUsize;
      pub(crate) use std::sync::atomic::Ordering;
    }
  }
}

#[cfg(loom)]
pub(crate) mod export {
  pub(crate) mod sync {
    pub(crate) use self::mutex::Mutex;
    pub(crate) use self::mutex::MutexGuard;
    pub(crate) use self::mutex::Mutex as SpinMutex;
    pub(crate) use self::mutex::MutexGuard as SpinMutexGuard;

    pub(crate) mod atomic {
      pub(crate) use loom::sync::atomic::AtomicBool;
      pub(crate) use loom::sync::atomic::AtomicU8;
      pub(crate) use loom::sync::atomic::AtomicU64;
      pub(crate) use loom::sync::atomic::AtomicUsize;
      pub(crate) use loom::sync::atomic::Ordering;
    }

    mod mutex {
      use std::fmt::Debug;
      use std::fmt::Formatter;
      use std::fmt::Result;

      pub(crate) type MutexGuard<'a, T> = loom::sync::MutexGuard<'a, T>;

      /// Poison-free facade over the loom mutex, matching `parking_lot`.
      pub(crate) struct Mutex<T> {
        inner: loom::sync::Mutex<T>,
      }

      impl<T> Mutex<T> {
        #[inline]
        pub(crate) fn new(value: T) -> Self {
          Self {
            inner: loom::sync::Mutex::new(value),
          }
        }

        #[inline]
        pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
          match self.inner.lock() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
          }
        }
      }

      impl<T> Debug for Mutex<T> {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
          f.write_str("Mutex(..)")
        }
      }
    }
  }
}

#[doc(inline)]
pub(crate) use self::export::*;
