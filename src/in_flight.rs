use std::sync::atomic::{AtomicBool, Ordering};

/// Holds a component's "request pending" flag. The flag is cleared when the
/// guard drops, including when the owning future is dropped mid-request.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// Callers check `flag` under their state lock before claiming it.
    pub(crate) fn claim(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self { flag }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub(crate) fn is_set(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Acquire)
}
