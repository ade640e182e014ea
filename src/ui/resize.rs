use std::time::{Duration, Instant};

/// Drawing surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Coalesces bursts of resize notifications into one settled size.
///
/// The first measurement is taken as-is; later ones only settle once no new
/// notification has arrived for `quiet_period`.
#[derive(Debug)]
pub struct ResizeDebouncer {
    quiet_period: Duration,
    current: Option<ViewportSize>,
    pending: Option<(ViewportSize, Instant)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl ResizeDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            current: None,
            pending: None,
        }
    }

    /// Settled size, if any measurement was taken yet.
    pub fn current(&self) -> Option<ViewportSize> {
        self.current
    }

    /// When the pending notification settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Take a measurement immediately, dropping anything pending.
    pub fn measure_now(&mut self, size: ViewportSize) -> ViewportSize {
        self.pending = None;
        self.current = Some(size);
        size
    }

    /// Record a resize notification. Returns the size right away only when it is
    /// the very first measurement.
    pub fn notify(&mut self, size: ViewportSize, now: Instant) -> Option<ViewportSize> {
        if self.current.is_none() {
            return Some(self.measure_now(size));
        }
        self.pending = Some((size, now + self.quiet_period));
        None
    }

    /// Settle the pending size once its quiet period has elapsed.
    /// Returns `None` if nothing settled or the size didn't actually change.
    pub fn poll(&mut self, now: Instant) -> Option<ViewportSize> {
        let (size, deadline) = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;
        if self.current == Some(size) {
            return None;
        }
        tracing::debug!("Viewport settled at {}x{}", size.width, size.height);
        self.current = Some(size);
        Some(size)
    }
}
