/// Monotonic millisecond counter (e.g. `millis()` or a SysTick count).
///
/// The counter may wrap; elapsed time is always computed with
/// `wrapping_sub`, so rollover is harmless as long as intervals stay
/// below ~49 days.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds from `earlier` to `later`, tolerant of counter wrap.
#[inline]
pub fn elapsed_ms(earlier: u32, later: u32) -> u32 {
    later.wrapping_sub(earlier)
}
